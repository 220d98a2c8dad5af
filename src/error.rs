use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors that end a conversion run.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("File \"{}\" does not exist.", .0.display())]
    InputNotFound(PathBuf),

    #[error("failed to read EPUB container {}: {reason}", .path.display())]
    ContainerRead { path: PathBuf, reason: String },

    #[error("TTS engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by a speech engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{program} is not available: {reason}")]
    Unavailable { program: String, reason: String },

    #[error("engine used before initialize()")]
    NotInitialized,

    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("expected {expected} Hz output, got {found} Hz")]
    UnexpectedSampleRate { expected: u32, found: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Audio(#[from] AudioError),
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio generated")]
    NoAudio,

    #[error("cannot concatenate {found} Hz audio onto {expected} Hz audio")]
    SampleRateMismatch { expected: u32, found: u32 },

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

#[derive(Debug, Error)]
pub enum VisualizerError {
    #[error("failed to launch ffmpeg: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("ffmpeg exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
}
