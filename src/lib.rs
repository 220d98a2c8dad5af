//! # epub-audio-narrator
//!
//! Narrates the chapters of an EPUB into one WAV file per chapter using an
//! external text-to-speech backend (Bark or Coqui), with optional
//! per-paragraph files and spectrogram videos.
//!
//! ```rust,ignore
//! use epub_audio_narrator::{Config, Engine, Pipeline};
//! use epub_audio_narrator::config::Backend;
//!
//! let config = Config::default();
//! let engine = Engine::new(Backend::Bark, None);
//! let summary = Pipeline::new(engine, config).convert_file("book.epub".as_ref())?;
//! println!("{} chapters", summary.chapters_written.len());
//! ```

pub mod audio;
pub mod config;
pub mod container;
pub mod error;
pub mod markup;
pub mod pipeline;
pub mod sanitize;
pub mod tts;
pub mod visualize;

pub use audio::AudioBuffer;
pub use config::{Backend, Config};
pub use error::ConvertError;
pub use pipeline::{Pipeline, RunSummary};
pub use tts::{Engine, SpeechEngine};
