use super::command::{check_launches, synthesize_to_wav, text_arg, SCRATCH_WAV};
use super::SpeechEngine;
use crate::audio::AudioBuffer;
use crate::error::EngineError;
use std::ffi::OsString;
use std::path::Path;

pub const DEFAULT_VOICE: &str = "v2/en_speaker_6";
pub const SAMPLE_RATE: u32 = 24_000;

const PYTHON: &str = "python3";

/// Bark, driven through its `python -m bark` command line.
///
/// The voice selects a speaker prompt; without one Bark picks its own.
///
/// `initialize` only checks that `python3 -m bark --help` runs. Every
/// `generate_audio` call is a fresh interpreter, so Bark loads its models
/// again for each paragraph.
#[derive(Debug, Clone)]
pub struct BarkEngine {
    voice: Option<String>,
    program: String,
    initialized: bool,
}

impl Default for BarkEngine {
    fn default() -> Self {
        Self::new(Some(DEFAULT_VOICE.to_string()))
    }
}

impl BarkEngine {
    pub fn new(voice: Option<String>) -> Self {
        Self {
            voice,
            program: PYTHON.to_string(),
            initialized: false,
        }
    }

    /// Use a different Python interpreter, e.g. one inside a virtualenv.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn voice(&self) -> Option<&str> {
        self.voice.as_deref()
    }

    fn synthesis_args(&self, text: &str, wav_path: &Path) -> Vec<OsString> {
        let dir = wav_path.parent().unwrap_or_else(|| Path::new("."));
        let file = wav_path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from(SCRATCH_WAV));

        let mut args: Vec<OsString> = vec![
            "-m".into(),
            "bark".into(),
            text_arg("--text", text),
            "--output_filename".into(),
            file,
            "--output_dir".into(),
            dir.into(),
        ];
        if let Some(voice) = &self.voice {
            args.push("--history_prompt".into());
            args.push(voice.into());
        }
        args
    }
}

impl SpeechEngine for BarkEngine {
    fn name(&self) -> &str {
        "bark"
    }

    fn initialize(&mut self) -> Result<(), EngineError> {
        check_launches(&self.program, &["-m", "bark", "--help"])?;
        self.initialized = true;
        Ok(())
    }

    fn generate_audio(&self, text: &str) -> Result<AudioBuffer, EngineError> {
        if !self.initialized {
            return Err(EngineError::NotInitialized);
        }

        let audio = synthesize_to_wav(&self.program, |wav| self.synthesis_args(text, wav))?;
        if audio.sample_rate != SAMPLE_RATE {
            return Err(EngineError::UnexpectedSampleRate {
                expected: SAMPLE_RATE,
                found: audio.sample_rate,
            });
        }
        Ok(audio)
    }
}
