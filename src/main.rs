//! voxprep command line interface
//!
//! Decodes, denoises, and probes audio sources, and drives an external
//! text-to-speech program.

use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};
use voxprep::core::time::{samples_to_centiseconds, to_timestamp};
use voxprep::decoder::symphonia::decode_file;
use voxprep::decoder::AudioIngest;
use voxprep::encoder::{Encoder, WavEncoder};
use voxprep::filter::FrameDenoiser;
use voxprep::processor::DenoisePipeline;
use voxprep::speech::{speak_text, CommandSynthesizer};
use voxprep::AudioResult;

#[derive(Parser)]
#[command(name = "voxprep")]
#[command(about = "Audio ingestion and denoising front end for speech models", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print layout and duration of an audio file
    Probe {
        /// Input audio file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Decode audio to mono 16 kHz WAV
    Decode {
        /// Input audio file, or - for stdin
        #[arg(value_name = "FILE")]
        input: String,

        /// Output WAV file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Write the unmixed stereo channels instead of the mono mix
        #[arg(long)]
        stereo: bool,

        /// Target sample rate (defaults to 16000)
        #[arg(short, long)]
        rate: Option<u32>,
    },

    /// Decode and noise-suppress audio to mono 16 kHz WAV
    Denoise {
        /// Input audio file, or - for stdin
        #[arg(value_name = "FILE")]
        input: String,

        /// Output WAV file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Speak text through an external synthesizer command
    Speak {
        /// Synthesizer program, invoked as <COMMAND> <voice> <file>
        #[arg(value_name = "COMMAND")]
        command: String,

        /// Text to speak
        #[arg(value_name = "TEXT")]
        text: String,

        /// Voice identifier passed to the program
        #[arg(long, default_value_t = 0)]
        voice: i32,

        /// Scratch file the text is written to
        #[arg(long, value_name = "FILE", default_value = "voxprep-say.txt")]
        file: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    info!("voxprep {}", voxprep::VERSION);

    match cli.command {
        Commands::Probe { input } => probe(&input)?,
        Commands::Decode {
            input,
            output,
            stereo,
            rate,
        } => decode(&input, &output, stereo, rate)?,
        Commands::Denoise { input, output } => denoise(&input, &output)?,
        Commands::Speak {
            command,
            text,
            voice,
            file,
        } => {
            speak_text(&CommandSynthesizer::new(command), &file, voice, &text)?;
            println!("Spoke {} characters", text.chars().count());
        }
    }

    Ok(())
}

fn probe(input: &Path) -> AudioResult<()> {
    let decoded = decode_file(input)?;
    let frames = decoded.samples.len() / decoded.channels.max(1);
    let duration = samples_to_centiseconds(frames, decoded.sample_rate);

    println!("{}", input.display());
    println!("  Sample rate: {} Hz", decoded.sample_rate);
    println!("  Channels: {}", decoded.channels);
    println!("  Frames: {}", frames);
    println!("  Duration: {}", to_timestamp(duration, false));

    Ok(())
}

fn decode(input: &str, output: &Path, stereo: bool, rate: Option<u32>) -> AudioResult<()> {
    let mut ingest = AudioIngest::new();
    if let Some(rate) = rate {
        ingest = ingest.with_target_rate(rate);
    }

    let (buffer, split) = ingest.load(input, stereo)?;

    let written = match split {
        Some(split) => {
            let mut encoder = WavEncoder::new(output, split.left.sample_rate(), 2)?;
            encoder.encode_pair(&split)?;
            encoder.finalize()?;
            split.left.len() + split.right.len()
        }
        None => {
            let mut encoder = WavEncoder::new(output, buffer.sample_rate(), 1)?;
            encoder.encode(&buffer)?;
            encoder.finalize()?;
            buffer.len()
        }
    };

    println!("Wrote {} samples to {}", written, output.display());
    Ok(())
}

fn denoise(input: &str, output: &Path) -> AudioResult<()> {
    let (mut buffer, _) = AudioIngest::new().load(input, false)?;

    let mut pipeline = DenoisePipeline::new();
    let mut denoiser = FrameDenoiser::new();
    pipeline.process(&mut denoiser, &mut buffer)?;

    let mut encoder = WavEncoder::new(output, buffer.sample_rate(), 1)?;
    encoder.encode(&buffer)?;
    encoder.finalize()?;

    let duration = samples_to_centiseconds(buffer.len(), buffer.sample_rate());
    println!(
        "Denoised {} of audio to {}",
        to_timestamp(duration, false),
        output.display()
    );
    Ok(())
}
