//! Configuration management for the command line tool

use crate::audio::{ToneSpec, Waveform};
use crate::error::{WaveError, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub tone: ToneConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToneConfig {
    pub waveform: Waveform,
    pub frequency: f64,
    pub duration_secs: f64,
    pub amplitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tone: ToneConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sine,
            frequency: 440.0,
            duration_secs: 1.0,
            amplitude: 0.5,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("tone.wav"),
            sample_rate: 44100,
            channels: 1,
            bits_per_sample: 16,
        }
    }
}

impl Config {
    /// Synthesis parameters described by this config
    pub fn tone_spec(&self) -> ToneSpec {
        ToneSpec {
            waveform: self.tone.waveform,
            frequency: self.tone.frequency,
            duration_secs: self.tone.duration_secs,
            amplitude: self.tone.amplitude,
            sample_rate: self.output.sample_rate,
            channels: self.output.channels,
            bits_per_sample: self.output.bits_per_sample,
        }
    }

    pub fn output_path(&self) -> &PathBuf {
        &self.output.path
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "wavecodec", about = "Canonical RIFF/WAVE PCM tool", version, author)]
pub struct Args {
    #[arg(short = 'v', long = "verbose", global = true, help = "Enable verbose output mode")]
    pub verbose: bool,

    #[arg(short = 'c', long = "config", global = true, help = "Config file path (TOML format)")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the format and payload size of a WAV file
    Info {
        #[arg(help = "WAV file to inspect")]
        file: PathBuf,
    },

    /// Load a WAV file and write it back with a canonical header
    Copy {
        #[arg(help = "Input WAV file")]
        input: PathBuf,

        #[arg(help = "Output WAV file")]
        output: PathBuf,
    },

    /// Synthesize a test tone
    Tone(ToneArgs),

    /// Write the default config file
    InitConfig {
        #[arg(default_value = "wavecodec.toml", help = "Where to write the config")]
        path: PathBuf,
    },
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ToneArgs {
    #[arg(short = 'o', long = "output", help = "Output WAV file path")]
    pub output: Option<PathBuf>,

    #[arg(short = 'w', long = "waveform", value_enum, help = "Waveform shape")]
    pub waveform: Option<Waveform>,

    #[arg(short = 'f', long = "frequency", help = "Tone frequency (Hz)")]
    pub frequency: Option<f64>,

    #[arg(short = 'd', long = "duration", help = "Tone duration (seconds)")]
    pub duration: Option<f64>,

    #[arg(short = 'a', long = "amplitude", help = "Peak amplitude (0.0 - 1.0)")]
    pub amplitude: Option<f64>,

    #[arg(short = 'r', long = "sample-rate", help = "Audio sample rate (Hz)")]
    pub sample_rate: Option<u32>,

    #[arg(long = "channels", help = "Number of interleaved channels")]
    pub channels: Option<u16>,

    #[arg(short = 'b', long = "bits", help = "Bits per sample (8, 16 or 32)")]
    pub bits: Option<u16>,
}

impl Config {
    /// Create config from command line arguments and config file
    pub fn from_args_and_config(args: &ToneArgs, config_file: Option<&Path>) -> Result<Self> {
        // First load config file (if provided)
        let mut config = if let Some(config_path) = config_file {
            Self::from_file(config_path)?
        } else {
            Self::default()
        };

        // Command line arguments override config file settings
        if let Some(output) = &args.output {
            config.output.path = output.clone();
        }
        if let Some(waveform) = args.waveform {
            config.tone.waveform = waveform;
        }
        if let Some(frequency) = args.frequency {
            config.tone.frequency = frequency;
        }
        if let Some(duration) = args.duration {
            config.tone.duration_secs = duration;
        }
        if let Some(amplitude) = args.amplitude {
            config.tone.amplitude = amplitude;
        }
        if let Some(sample_rate) = args.sample_rate {
            config.output.sample_rate = sample_rate;
        }
        if let Some(channels) = args.channels {
            config.output.channels = channels;
        }
        if let Some(bits) = args.bits {
            config.output.bits_per_sample = bits;
        }

        // Validate config
        config.validate()?;

        Ok(config)
    }

    /// Load config from TOML config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| WaveError::config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| WaveError::config(format!("Failed to parse config file: {}", e)))
    }

    /// Validate configuration parameter validity
    pub fn validate(&self) -> Result<()> {
        // Validate sample rate
        if self.output.sample_rate == 0 {
            return Err(WaveError::config("Sample rate must be greater than 0"));
        }
        if self.output.sample_rate > 192000 {
            return Err(WaveError::config("Sample rate cannot exceed 192000 Hz"));
        }

        if self.output.channels == 0 {
            return Err(WaveError::config("Channel count must be at least 1"));
        }

        if !matches!(self.output.bits_per_sample, 8 | 16 | 32) {
            return Err(WaveError::config("Bits per sample must be 8, 16 or 32"));
        }

        // Frequency must stay below Nyquist
        let nyquist = self.output.sample_rate as f64 / 2.0;
        if !(self.tone.frequency > 0.0 && self.tone.frequency < nyquist) {
            return Err(WaveError::config(format!(
                "Frequency must be in range (0, {}) Hz", nyquist
            )));
        }

        if !(self.tone.duration_secs > 0.0 && self.tone.duration_secs <= 3600.0) {
            return Err(WaveError::config("Duration must be in range (0, 3600] seconds"));
        }

        if !(0.0..=1.0).contains(&self.tone.amplitude) {
            return Err(WaveError::config("Amplitude must be in range [0.0, 1.0]"));
        }

        Ok(())
    }

    /// Save config to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| WaveError::config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| WaveError::config(format!("Failed to write config file: {}", e)))
    }

    /// Create default config file
    pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let default_config = Self::default();
        default_config.save_to_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_overrides() -> ToneArgs {
        ToneArgs {
            output: None,
            waveform: None,
            frequency: None,
            duration: None,
            amplitude: None,
            sample_rate: None,
            channels: None,
            bits: None,
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output.sample_rate, 44100);
        assert_eq!(config.output.channels, 1);
        assert_eq!(config.output.bits_per_sample, 16);
        assert_eq!(config.tone.waveform, Waveform::Sine);
        assert_eq!(config.tone.frequency, 440.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.output.sample_rate = 0;
        assert!(config.validate().is_err());
        config.output.sample_rate = 8000;

        config.tone.frequency = 4000.0;
        assert!(config.validate().is_err());
        config.tone.frequency = 440.0;

        config.output.bits_per_sample = 24;
        assert!(config.validate().is_err());
        config.output.bits_per_sample = 8;

        config.tone.amplitude = -0.1;
        assert!(config.validate().is_err());
        config.tone.amplitude = 1.0;

        config.tone.duration_secs = 0.0;
        assert!(config.validate().is_err());
        config.tone.duration_secs = 2.0;

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_file_operations() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.tone.waveform = Waveform::Square;
        config.output.channels = 2;

        assert!(config.save_to_file(&config_path).is_ok());
        assert!(config_path.exists());

        let loaded_config = Config::from_file(&config_path).unwrap();
        assert_eq!(loaded_config.tone.waveform, Waveform::Square);
        assert_eq!(loaded_config.output.channels, 2);
        assert_eq!(loaded_config.output.sample_rate, config.output.sample_rate);
    }

    #[test]
    fn test_args_override_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.output.sample_rate = 8000;
        config.tone.frequency = 1000.0;
        config.save_to_file(&config_path).unwrap();

        let mut args = no_overrides();
        args.frequency = Some(250.0);
        args.waveform = Some(Waveform::Noise);

        let merged = Config::from_args_and_config(&args, Some(config_path.as_path())).unwrap();
        assert_eq!(merged.output.sample_rate, 8000);
        assert_eq!(merged.tone.frequency, 250.0);
        assert_eq!(merged.tone.waveform, Waveform::Noise);

        let spec = merged.tone_spec();
        assert_eq!(spec.sample_rate, 8000);
        assert_eq!(spec.waveform, Waveform::Noise);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let mut args = no_overrides();
        args.bits = Some(12);
        assert!(Config::from_args_and_config(&args, None).is_err());
    }

    #[test]
    fn test_unreadable_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::from_file(temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(WaveError::Config { .. })));
    }
}
