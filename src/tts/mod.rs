//! Speech engines.
//!
//! Every backend implements [`SpeechEngine`]; the set of backends the binaries
//! can pick from is closed and lives in [`Engine`].

pub mod bark;
mod command;
pub mod coqui;

pub use bark::BarkEngine;
pub use coqui::CoquiEngine;

use crate::audio::AudioBuffer;
use crate::config::Backend;
use crate::error::EngineError;

/// Voice value that asks a backend for its built-in default.
pub const ENGINE_DEFAULT_VOICE: &str = "none";

pub trait SpeechEngine {
    fn name(&self) -> &str;

    /// One-time setup. Must succeed before the first `generate_audio`.
    fn initialize(&mut self) -> Result<(), EngineError>;

    /// Render `text` as mono PCM.
    fn generate_audio(&self, text: &str) -> Result<AudioBuffer, EngineError>;
}

#[derive(Debug, Clone)]
pub enum Engine {
    Bark(BarkEngine),
    Coqui(CoquiEngine),
}

impl Engine {
    /// Build the engine for `backend`.
    ///
    /// `voice` is a Bark speaker prompt or a Coqui model name. `None` keeps the
    /// backend's usual default; `"none"` drops Bark's speaker prompt entirely.
    pub fn new(backend: Backend, voice: Option<&str>) -> Self {
        let forced_default = voice.is_some_and(|v| v.eq_ignore_ascii_case(ENGINE_DEFAULT_VOICE));

        match backend {
            Backend::Bark if forced_default => Engine::Bark(BarkEngine::new(None)),
            Backend::Bark => Engine::Bark(
                voice
                    .map(|v| BarkEngine::new(Some(v.to_string())))
                    .unwrap_or_default(),
            ),
            Backend::Coqui => match voice {
                Some(model) if !forced_default => Engine::Coqui(CoquiEngine::new(model)),
                _ => Engine::Coqui(CoquiEngine::default()),
            },
        }
    }
}

impl SpeechEngine for Engine {
    fn name(&self) -> &str {
        match self {
            Engine::Bark(engine) => engine.name(),
            Engine::Coqui(engine) => engine.name(),
        }
    }

    fn initialize(&mut self) -> Result<(), EngineError> {
        match self {
            Engine::Bark(engine) => engine.initialize(),
            Engine::Coqui(engine) => engine.initialize(),
        }
    }

    fn generate_audio(&self, text: &str) -> Result<AudioBuffer, EngineError> {
        match self {
            Engine::Bark(engine) => engine.generate_audio(text),
            Engine::Coqui(engine) => engine.generate_audio(text),
        }
    }
}
