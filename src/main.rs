//! wavecodec - Canonical RIFF/WAVE PCM tool

use anyhow::Context;
use clap::Parser;
use std::path::Path;
use std::process;
use wavecodec::config::{Command, ToneArgs};
use wavecodec::{audio, init_logging, Args, Config, WaveCodec};

fn main() {
    let args = Args::parse();

    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    if args.verbose {
        println!("{}", wavecodec::get_library_info());
        println!();
    }

    match &args.command {
        Command::Info { file } => run_info(file),
        Command::Copy { input, output } => run_copy(input, output),
        Command::Tone(tone_args) => run_tone(tone_args, args.config_file.as_deref()),
        Command::InitConfig { path } => {
            Config::create_default_config(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            println!("Wrote default config to {}", path.display());
            Ok(())
        }
    }
}

fn run_info(file: &Path) -> anyhow::Result<()> {
    let codec = WaveCodec::open(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    if let Err(e) = codec.validate() {
        log::warn!("{}: {}", file.display(), e);
    }

    print!("{}", codec.summary());
    println!("Frames: {}", codec.frame_count());
    println!("Duration: {:.3}s", codec.duration_secs());
    Ok(())
}

fn run_copy(input: &Path, output: &Path) -> anyhow::Result<()> {
    let codec = WaveCodec::open(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    codec.save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    log::info!("Copied {} bytes of audio to {}", codec.len(), output.display());
    Ok(())
}

fn run_tone(tone_args: &ToneArgs, config_file: Option<&Path>) -> anyhow::Result<()> {
    let config = Config::from_args_and_config(tone_args, config_file)?;
    let spec = config.tone_spec();

    let codec = audio::render_tone(&spec)?;
    codec.save(config.output_path())
        .with_context(|| format!("Failed to write {}", config.output_path().display()))?;

    println!(
        "Wrote {:.3}s {} tone at {} Hz to {}",
        codec.duration_secs(),
        spec.waveform.name(),
        spec.frequency,
        config.output_path().display()
    );
    Ok(())
}
