use clap::{Arg, ArgAction, ArgMatches, Command};
use epub_audio_narrator::config::{Backend, Config};
use epub_audio_narrator::tts::Engine;
use epub_audio_narrator::Pipeline;
use log::{debug, LevelFilter};
use std::path::{Path, PathBuf};
use std::process;

fn build_cli() -> Command {
    Command::new("EPUB to Audio")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Narrates every chapter of an EPUB into its own WAV file")
        .arg(
            Arg::new("epub")
                .value_name("EPUB")
                .help("Path to the .epub file to process")
                .required(true),
        )
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
                .help("Bark speaker prompt (e.g. v2/en_speaker_6) or Coqui model name; \"none\" for the engine default"),
        )
        .arg(
            Arg::new("chapter")
                .long("chapter")
                .value_name("NUM")
                .help("Only convert this chapter (1-based)")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("animation")
                .long("animation")
                .help("Also render a spectrogram video per chapter (needs ffmpeg)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("save-paragraphs")
                .long("save-paragraphs")
                .help("Also write each paragraph's audio to its own file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .value_name("DIR")
                .help("Directory for the generated files")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("."),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Show debug logging")
                .action(ArgAction::SetTrue),
        )
}

fn config_from_matches(matches: &ArgMatches) -> Result<Config, Box<dyn std::error::Error>> {
    let backend = matches
        .get_one::<String>("tts")
        .map(|name| name.parse::<Backend>())
        .transpose()?
        .unwrap_or_default();

    Ok(Config {
        backend,
        voice: matches.get_one::<String>("voice").cloned(),
        chapter: matches.get_one::<u64>("chapter").map(|&n| n as usize),
        animation: matches.get_flag("animation"),
        save_paragraphs: matches.get_flag("save-paragraphs"),
        output_dir: matches
            .get_one::<PathBuf>("output-dir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(".")),
    })
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_from_matches(matches)?;
    debug!("Effective configuration: {}", serde_json::to_string(&config)?);

    let epub_path = matches
        .get_one::<String>("epub")
        .map(Path::new)
        .ok_or("missing EPUB path")?;

    let engine = Engine::new(config.backend, config.voice.as_deref());
    let mut pipeline = Pipeline::new(engine, config);
    let summary = pipeline.convert_file(epub_path)?;

    if summary.failed_paragraphs > 0 {
        println!(
            "⚠️  {} paragraph(s) could not be synthesized",
            summary.failed_paragraphs
        );
    }
    Ok(())
}

fn main() {
    let matches = build_cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
