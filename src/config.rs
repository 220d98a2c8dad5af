use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Bark,
    Coqui,
}

impl Backend {
    pub const NAMES: [&'static str; 2] = ["bark", "coqui"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Bark => "bark",
            Backend::Coqui => "coqui",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bark" => Ok(Backend::Bark),
            "coqui" => Ok(Backend::Coqui),
            other => Err(format!("unknown TTS backend `{other}` (expected bark or coqui)")),
        }
    }
}

/// Settings for one conversion run, fixed at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub backend: Backend,
    pub voice: Option<String>,
    /// 1-based chapter to convert; every chapter when unset.
    pub chapter: Option<usize>,
    pub animation: bool,
    /// Also write each paragraph's audio to its own file.
    pub save_paragraphs: bool,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::Bark,
            voice: None,
            chapter: None,
            animation: false,
            save_paragraphs: false,
            output_dir: PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parsing() {
        assert_eq!("bark".parse::<Backend>(), Ok(Backend::Bark));
        assert_eq!("Coqui".parse::<Backend>(), Ok(Backend::Coqui));
        assert!("espeak".parse::<Backend>().is_err());
        for name in Backend::NAMES {
            assert_eq!(name.parse::<Backend>().unwrap().as_str(), name);
        }
    }

    #[test]
    fn test_config_serializes_backend_lowercase() {
        let config = Config {
            backend: Backend::Coqui,
            chapter: Some(3),
            ..Default::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["backend"], "coqui");
        assert_eq!(json["chapter"], 3);
        assert_eq!(json["output_dir"], ".");
    }
}
