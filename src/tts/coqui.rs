use super::command::{check_launches, synthesize_to_wav, text_arg};
use super::SpeechEngine;
use crate::audio::AudioBuffer;
use crate::error::EngineError;
use std::ffi::OsString;
use std::path::Path;

pub const DEFAULT_MODEL: &str = "tts_models/en/ljspeech/fast_pitch";

const TTS_CLI: &str = "tts";

/// Coqui TTS through its `tts` command line. Output rate depends on the model.
#[derive(Debug, Clone)]
pub struct CoquiEngine {
    model_name: String,
    program: String,
    initialized: bool,
}

impl Default for CoquiEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

impl CoquiEngine {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            program: TTS_CLI.to_string(),
            initialized: false,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    fn synthesis_args(&self, text: &str, wav_path: &Path) -> Vec<OsString> {
        vec![
            text_arg("--text", text),
            "--model_name".into(),
            self.model_name.as_str().into(),
            "--out_path".into(),
            wav_path.into(),
        ]
    }
}

impl SpeechEngine for CoquiEngine {
    fn name(&self) -> &str {
        "coqui"
    }

    fn initialize(&mut self) -> Result<(), EngineError> {
        check_launches(&self.program, &["--help"])?;
        self.initialized = true;
        Ok(())
    }

    fn generate_audio(&self, text: &str) -> Result<AudioBuffer, EngineError> {
        if !self.initialized {
            return Err(EngineError::NotInitialized);
        }
        synthesize_to_wav(&self.program, |wav| self.synthesis_args(text, wav))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesis_args() {
        let engine = CoquiEngine::new("tts_models/en/vctk/vits");
        let args: Vec<String> = engine
            .synthesis_args("Hello.", Path::new("/tmp/out.wav"))
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "--text=Hello.",
                "--model_name",
                "tts_models/en/vctk/vits",
                "--out_path",
                "/tmp/out.wav",
            ]
        );
    }

    #[test]
    fn test_generate_before_initialize_fails() {
        assert!(matches!(
            CoquiEngine::default().generate_audio("text"),
            Err(EngineError::NotInitialized)
        ));
    }

    #[cfg(unix)]
    mod with_fake_cli {
        use super::*;
        use crate::audio::save_wav;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        /// A stand-in `tts` that copies a prepared WAV to `--out_path`, and
        /// fails outright for the text "boom".
        fn fake_cli(dir: &TempDir, sample_rate: u32) -> String {
            let fixture = dir.path().join("fixture.wav");
            save_wav(&fixture, &[5, -5, 7], sample_rate).unwrap();

            let script = dir.path().join("tts");
            fs::write(
                &script,
                format!(
                    "#!/bin/sh\n\
                     out=''\n\
                     while [ $# -gt 0 ]; do\n\
                       case \"$1\" in\n\
                         --text=boom) echo 'model exploded' >&2; exit 3 ;;\n\
                         --out_path) out=\"$2\"; shift ;;\n\
                       esac\n\
                       shift\n\
                     done\n\
                     [ -n \"$out\" ] && cp '{}' \"$out\"\n\
                     exit 0\n",
                    fixture.display()
                ),
            )
            .unwrap();
            fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
            script.to_string_lossy().into_owned()
        }

        #[test]
        fn test_generate_reads_model_rate_from_output() {
            let dir = tempfile::tempdir().unwrap();
            let mut engine = CoquiEngine::default().with_program(fake_cli(&dir, 22_050));
            engine.initialize().unwrap();

            let audio = engine.generate_audio("Hello world.").unwrap();
            assert_eq!(audio, AudioBuffer::new(vec![5, -5, 7], 22_050));
        }

        #[test]
        fn test_non_zero_exit_surfaces_stderr() {
            let dir = tempfile::tempdir().unwrap();
            let mut engine = CoquiEngine::default().with_program(fake_cli(&dir, 22_050));
            engine.initialize().unwrap();

            match engine.generate_audio("boom") {
                Err(EngineError::Failed { stderr, .. }) => assert_eq!(stderr, "model exploded"),
                other => panic!("expected a failed run, got {other:?}"),
            }
        }
    }
}
