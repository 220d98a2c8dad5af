//! Running an external synthesizer that renders text into a WAV file.

use crate::audio::{load_wav, AudioBuffer};
use crate::error::EngineError;
use log::debug;
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

/// File name the synthesizer is asked to write inside its scratch directory.
pub(crate) const SCRATCH_WAV: &str = "utterance.wav";

/// `--flag=value` as one argument, so text starting with `-` is never read as
/// an option.
pub(crate) fn text_arg(flag: &str, text: &str) -> OsString {
    format!("{flag}={text}").into()
}

/// Check that `program` launches and exits cleanly with `args`.
pub(crate) fn check_launches(program: &str, args: &[&str]) -> Result<(), EngineError> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| EngineError::Unavailable {
            program: program.to_string(),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(EngineError::Unavailable {
            program: program.to_string(),
            reason: format!("`{} {}` exited with {}", program, args.join(" "), status),
        });
    }
    Ok(())
}

/// Run `program` with the arguments produced by `build_args` for a scratch
/// WAV path, then load what it wrote.
pub(crate) fn synthesize_to_wav<F>(program: &str, build_args: F) -> Result<AudioBuffer, EngineError>
where
    F: FnOnce(&Path) -> Vec<OsString>,
{
    let scratch = tempfile::tempdir()?;
    let wav_path = scratch.path().join(SCRATCH_WAV);

    let mut cmd = Command::new(program);
    cmd.args(build_args(&wav_path))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());

    debug!("Running {:?}", cmd);
    let output = cmd.output().map_err(|source| EngineError::Spawn {
        program: program.to_string(),
        source,
    })?;

    if !output.status.success() {
        return Err(EngineError::Failed {
            program: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(load_wav(&wav_path)?)
}
