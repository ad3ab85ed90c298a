use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parsers::Markers;

pub const CONFIG_FILE_NAME: &str = "warnsum.toml";
pub const DEFAULT_ENDPOINT: &str = "https://slack.com/api/files.upload";
pub const TOKEN_ENV: &str = "WARNSUM_TOKEN";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub summarize: SummarizeConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizeConfig {
    #[serde(flatten)]
    pub markers: Markers,
    /// Glob patterns of files whose warnings are dropped.
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub endpoint: String,
    pub channels: Vec<String>,
    pub token: Option<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            channels: Vec::new(),
            token: None,
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str, source: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config {
            path: source.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text, path)
    }

    /// Explicit path first (must exist), then `./warnsum.toml`, then the user config dir.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(p) = explicit {
            tracing::debug!("loading config from {}", p.display());
            return Self::load_file(p);
        }

        for candidate in default_locations() {
            if candidate.is_file() {
                tracing::debug!("loading config from {}", candidate.display());
                return Self::load_file(&candidate);
            }
        }

        tracing::debug!("no config file found, using defaults");
        Ok(Self::default())
    }
}

fn default_locations() -> Vec<PathBuf> {
    let mut out = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(mut dir) = dirs_next::config_dir() {
        dir.push("warnsum");
        dir.push("config.toml");
        out.push(dir);
    }
    out
}

pub fn default_config_toml() -> &'static str {
    r#"# warnsum configuration

[summarize]
# Lines starting with this prefix name the file for the entries below them.
file_marker = "/"
# Lines starting with this prefix are warning entries: `<marker> <line> ... <token>`.
line_marker = "Line"
# Warnings in files matching these globs are dropped.
exclude = []

[upload]
endpoint = "https://slack.com/api/files.upload"
channels = []
# Prefer the WARNSUM_TOKEN environment variable over storing the token here.
# token = ""
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg = Config::from_toml_str("", Path::new("inline")).expect("parse");
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.summarize.markers.file_marker, "/");
        assert_eq!(cfg.summarize.markers.line_marker, "Line");
        assert_eq!(cfg.upload.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = Config::from_toml_str(
            r#"
[summarize]
line_marker = "Warning"
exclude = ["**/generated/**"]

[upload]
channels = ["ci", "frontend"]
"#,
            Path::new("inline"),
        )
        .expect("parse");

        assert_eq!(cfg.summarize.markers.file_marker, "/");
        assert_eq!(cfg.summarize.markers.line_marker, "Warning");
        assert_eq!(cfg.summarize.exclude, vec!["**/generated/**"]);
        assert_eq!(cfg.upload.channels, vec!["ci", "frontend"]);
        assert_eq!(cfg.upload.endpoint, DEFAULT_ENDPOINT);
        assert!(cfg.upload.token.is_none());
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = Config::from_toml_str("this is not toml", Path::new("bad.toml")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("bad.toml"), "unexpected error: {msg}");
    }

    #[test]
    fn explicit_missing_file_fails() {
        let td = tempdir().expect("tempdir");
        let err = Config::load(Some(&td.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn default_template_parses() {
        let cfg = Config::from_toml_str(default_config_toml(), Path::new("template")).expect("parse");
        assert_eq!(cfg, Config::default());
    }
}
