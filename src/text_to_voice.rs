use clap::{Arg, ArgMatches, Command};
use epub_audio_narrator::config::Backend;
use epub_audio_narrator::tts::{Engine, SpeechEngine};
use log::{info, LevelFilter};
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("Text to Voice")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Synthesizes a single piece of text into a WAV file")
        .arg(
            Arg::new("tts")
                .long("tts")
                .value_name("ENGINE")
                .help("TTS engine to use")
                .value_parser(Backend::NAMES)
                .default_value("bark"),
        )
        .arg(
            Arg::new("voice")
                .long("voice")
                .value_name("VOICE")
                .help("Bark speaker prompt or Coqui model name"),
        )
        .arg(
            Arg::new("text")
                .long("text")
                .value_name("TEXT")
                .help("Text to convert to speech")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .value_name("FILE")
                .help("Output audio file")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("sample-rate")
                .long("sample-rate")
                .value_name("HZ")
                .help("Sample rate written to the output file (defaults to the engine's own rate)")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
}

/// Rate to stamp on the output: `--sample-rate` if given, else the engine's.
/// Samples are written as-is, never resampled.
fn output_sample_rate(matches: &ArgMatches, engine_rate: u32) -> u32 {
    matches
        .get_one::<u32>("sample-rate")
        .copied()
        .unwrap_or(engine_rate)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .init();

    let matches = build_cli().get_matches();
    let backend = matches
        .get_one::<String>("tts")
        .map(|name| name.parse::<Backend>())
        .transpose()?
        .unwrap_or_default();
    let voice = matches.get_one::<String>("voice").map(String::as_str);
    let text = matches.get_one::<String>("text").ok_or("missing --text")?;
    let output = matches.get_one::<PathBuf>("output").ok_or("missing --output")?;

    let mut engine = Engine::new(backend, voice);
    info!("Initializing {} engine", engine.name());
    engine.initialize()?;

    let mut audio = engine.generate_audio(text)?;
    audio.sample_rate = output_sample_rate(&matches, audio.sample_rate);
    audio.save(output)?;
    println!(
        "✅ Wrote {} ({} Hz, {:.1}s)",
        output.display(),
        audio.sample_rate,
        audio.duration()
    );
    Ok(())
}
