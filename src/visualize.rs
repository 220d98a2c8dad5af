//! Spectrogram videos rendered by ffmpeg.

use crate::error::VisualizerError;
use log::debug;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

const SPECTROGRAM_FILTER: &str =
    "[0:a]showspectrum=s=1920x1080:mode=combined:slide=scroll:scale=log,format=yuv420p[v]";

#[derive(Debug, Clone)]
pub struct Visualizer {
    program: String,
}

impl Default for Visualizer {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_string(),
        }
    }
}

impl Visualizer {
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Render a scrolling log-scale spectrogram of `audio_path` muxed with the
    /// audio itself, written next to it as H.264/AAC `.mp4`.
    pub fn render(&self, audio_path: &Path) -> Result<PathBuf, VisualizerError> {
        let video_path = video_path_for(audio_path);

        let mut cmd = Command::new(&self.program);
        cmd.args(spectrogram_args(audio_path, &video_path))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        debug!("Running {:?}", cmd);
        let output = cmd.output().map_err(VisualizerError::Spawn)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VisualizerError::Failed {
                status: output.status,
                stderr: last_lines(&stderr, 5),
            });
        }

        Ok(video_path)
    }
}

pub fn video_path_for(audio_path: &Path) -> PathBuf {
    audio_path.with_extension("mp4")
}

fn spectrogram_args(audio_path: &Path, video_path: &Path) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-i".into(),
        audio_path.into(),
        "-filter_complex".into(),
        SPECTROGRAM_FILTER.into(),
        "-map".into(),
        "[v]".into(),
        "-map".into(),
        "0:a".into(),
        "-c:v".into(),
        "libx264".into(),
        "-c:a".into(),
        "aac".into(),
        video_path.into(),
    ]
}

// ffmpeg prints its whole banner to stderr; the reason is at the end.
fn last_lines(text: &str, count: usize) -> String {
    let lines: Vec<&str> = text.trim().lines().collect();
    lines[lines.len().saturating_sub(count)..].join("\n")
}
