//! Chapter-by-chapter narration of a book.
//!
//! Each document item is split into a title and paragraphs, every paragraph is
//! synthesized in turn, and the successful results are joined into one WAV
//! per chapter. Chapters are numbered by how many have been extracted
//! successfully so far, not by their position in the container.

use crate::audio::AudioBuffer;
use crate::config::Config;
use crate::container::{DocumentItem, DocumentItems};
use crate::error::{AudioError, ConvertError, EngineError};
use crate::markup::MarkupSplitter;
use crate::sanitize::sanitize_filename;
use crate::tts::SpeechEngine;
use crate::visualize::Visualizer;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub number: usize,
    /// Already sanitized, never empty.
    pub title: String,
    pub paragraphs: Vec<String>,
}

/// What a run produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub chapters_written: Vec<PathBuf>,
    pub paragraph_files: Vec<PathBuf>,
    pub videos: Vec<PathBuf>,
    /// Document items dropped for lacking a usable title or any paragraph.
    pub skipped_items: usize,
    /// Chapters where every paragraph failed to synthesize.
    pub silent_chapters: usize,
    pub failed_paragraphs: usize,
}

pub fn chapter_stem(number: usize, title: &str) -> String {
    format!("{}-{}", number, title)
}

pub fn chapter_audio_path(dir: &Path, number: usize, title: &str) -> PathBuf {
    dir.join(format!("{}.wav", chapter_stem(number, title)))
}

/// `paragraph` is 1-based.
pub fn paragraph_audio_path(dir: &Path, number: usize, title: &str, paragraph: usize) -> PathBuf {
    dir.join(format!("{}-{}.wav", chapter_stem(number, title), paragraph))
}

pub struct Pipeline<E: SpeechEngine> {
    engine: E,
    splitter: MarkupSplitter,
    visualizer: Visualizer,
    config: Config,
}

impl<E: SpeechEngine> Pipeline<E> {
    pub fn new(engine: E, config: Config) -> Self {
        Self {
            engine,
            splitter: MarkupSplitter::new(),
            visualizer: Visualizer::default(),
            config,
        }
    }

    pub fn with_visualizer(mut self, visualizer: Visualizer) -> Self {
        self.visualizer = visualizer;
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Open `epub_path` and narrate it.
    pub fn convert_file(&mut self, epub_path: &Path) -> Result<RunSummary, ConvertError> {
        if !epub_path.exists() {
            return Err(ConvertError::InputNotFound(epub_path.to_path_buf()));
        }

        println!("📖 Reading {}...", epub_path.display());
        let items = DocumentItems::open(epub_path)?;
        self.run(items)
    }

    /// Narrate a sequence of document items.
    pub fn run<I>(&mut self, items: I) -> Result<RunSummary, ConvertError>
    where
        I: IntoIterator<Item = DocumentItem>,
    {
        let start_time = Instant::now();
        fs::create_dir_all(&self.config.output_dir)?;

        println!("🔄 Initializing {} TTS engine...", self.engine.name());
        self.engine.initialize()?;

        let mut summary = RunSummary::default();
        let mut extracted = 0usize;

        for item in items {
            let Some(chapter) = self.extract_chapter(&item, extracted + 1) else {
                summary.skipped_items += 1;
                continue;
            };
            extracted = chapter.number;

            if let Some(wanted) = self.config.chapter {
                if chapter.number != wanted {
                    debug!("Chapter {} not selected", chapter.number);
                    continue;
                }
            }

            self.convert_chapter(&chapter, &mut summary)?;

            if self.config.chapter == Some(chapter.number) {
                break;
            }
        }

        if let Some(wanted) = self.config.chapter {
            if wanted > extracted {
                info!("Chapter {wanted} requested but the book only has {extracted}");
            }
        }

        println!(
            "✅ {} chapter file(s) written in {:.2?}",
            summary.chapters_written.len(),
            start_time.elapsed()
        );
        Ok(summary)
    }

    /// Title and paragraphs for one item, or `None` when it has nothing to narrate.
    fn extract_chapter(&self, item: &DocumentItem, number: usize) -> Option<Chapter> {
        let label = item.id.as_deref().unwrap_or("<unnamed>");
        let (title, paragraphs) = self.splitter.split(&item.markup);

        let Some(title) = title else {
            info!("Skipping {label}: no title found");
            return None;
        };

        let title = sanitize_filename(&title);
        if title.is_empty() {
            info!("Skipping {label}: title is empty once sanitized");
            return None;
        }

        if paragraphs.is_empty() {
            info!("Skipping {label} ({title}): no paragraphs found");
            return None;
        }

        Some(Chapter {
            number,
            title,
            paragraphs,
        })
    }

    fn convert_chapter(
        &self,
        chapter: &Chapter,
        summary: &mut RunSummary,
    ) -> Result<(), ConvertError> {
        println!("\n🎤 Processing chapter {}: {}", chapter.number, chapter.title);

        let results = self.synthesize_paragraphs(chapter);

        let mut buffers = Vec::with_capacity(results.len());
        for (idx, result) in results.into_iter().enumerate() {
            match result {
                Ok(buffer) => {
                    if self.config.save_paragraphs {
                        self.save_paragraph(chapter, idx + 1, &buffer, summary);
                    }
                    buffers.push(buffer);
                }
                Err(_) => summary.failed_paragraphs += 1,
            }
        }

        let audio = match AudioBuffer::concat(&buffers) {
            Ok(audio) => audio,
            Err(AudioError::NoAudio) => {
                println!("  ⚠️  No audio generated for this chapter.");
                summary.silent_chapters += 1;
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let path = chapter_audio_path(&self.config.output_dir, chapter.number, &chapter.title);
        audio.save(&path)?;
        println!(
            "  ✅ Audio file created: {} ({:.1}s)",
            path.display(),
            audio.duration()
        );

        if self.config.animation {
            match self.visualizer.render(&path) {
                Ok(video) => {
                    println!("  🎬 Video file created: {}", video.display());
                    summary.videos.push(video);
                }
                Err(e) => warn!("Spectrogram video for {} failed: {}", path.display(), e),
            }
        }

        summary.chapters_written.push(path);
        Ok(())
    }

    fn synthesize_paragraphs(&self, chapter: &Chapter) -> Vec<Result<AudioBuffer, EngineError>> {
        let total = chapter.paragraphs.len();
        let progress_bar = ProgressBar::new(total as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("  {spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▉▊▋▌▍▎▏  "),
        );

        let results = chapter
            .paragraphs
            .iter()
            .enumerate()
            .map(|(idx, paragraph)| {
                progress_bar.set_message(format!("paragraph {} of {}", idx + 1, total));
                let result = self.engine.generate_audio(paragraph);
                if let Err(e) = &result {
                    progress_bar.suspend(|| {
                        warn!("Error generating audio for paragraph {}: {}", idx + 1, e)
                    });
                }
                progress_bar.inc(1);
                result
            })
            .collect();

        progress_bar.finish_and_clear();
        results
    }

    fn save_paragraph(
        &self,
        chapter: &Chapter,
        paragraph: usize,
        buffer: &AudioBuffer,
        summary: &mut RunSummary,
    ) {
        let path = paragraph_audio_path(
            &self.config.output_dir,
            chapter.number,
            &chapter.title,
            paragraph,
        );
        match buffer.save(&path) {
            Ok(()) => summary.paragraph_files.push(path),
            Err(e) => warn!("Could not write {}: {}", path.display(), e),
        }
    }
}
