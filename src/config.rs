use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ConfigError, ShoutoutError};
use crate::projector::{ColumnIntents, ColumnMatcher, PhotoTable, Projector};

pub const DEFAULT_CONFIG_FILE: &str = "shoutouts.yaml";
pub const DEFAULT_TITLE: &str = "Team Shout-outs";

/// The two card layouts the shout-out page has shipped with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Quote from a "reason" column; cards headed by the teammate, footed `By <name>`.
    #[default]
    Reason,
    /// Quote from a "send" column; no heading, footed `- <name>`.
    Send,
}

impl Preset {
    pub fn quote_matcher(self) -> ColumnMatcher {
        match self {
            Preset::Reason => ColumnMatcher::contains("reason"),
            Preset::Send => ColumnMatcher::contains("send"),
        }
    }

    pub fn card_style(self) -> CardStyle {
        match self {
            Preset::Reason => CardStyle { show_heading: true, footer_prefix: "By " },
            Preset::Send => CardStyle { show_heading: false, footer_prefix: "- " },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardStyle {
    pub show_heading: bool,
    pub footer_prefix: &'static str,
}

impl Default for CardStyle {
    fn default() -> Self {
        Preset::default().card_style()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatcherKind {
    #[default]
    Contains,
    Exact,
    Pattern,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MatcherConfig {
    #[serde(default)]
    pub kind: MatcherKind,
    pub value: String,
}

impl MatcherConfig {
    pub fn build(&self) -> Result<ColumnMatcher, ConfigError> {
        Ok(match self.kind {
            MatcherKind::Contains => ColumnMatcher::contains(&self.value),
            MatcherKind::Exact => ColumnMatcher::exact(&self.value),
            MatcherKind::Pattern => ColumnMatcher::Pattern(Regex::new(&self.value)?),
        })
    }
}

/// Contents of `shoutouts.yaml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub title: Option<String>,
    pub preset: Option<Preset>,
    pub quote_column: Option<MatcherConfig>,
    /// Replaces the built-in photo table when present.
    pub photos: Option<BTreeMap<String, String>>,
}

impl Config {
    pub fn parse(text: &str) -> Result<Config, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load an explicit config path, or `shoutouts.yaml` from `dir` when it
    /// exists. A missing default file means built-in defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Config, ShoutoutError> {
        let path: PathBuf = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let p = dir.join(DEFAULT_CONFIG_FILE);
                if !p.exists() {
                    debug!(path = %p.display(), "no config file, using defaults");
                    return Ok(Config::default());
                }
                p
            }
        };

        let text = fs::read_to_string(&path).map_err(|e| ShoutoutError::Config {
            path: path.clone(),
            source: e.into(),
        })?;
        let config = Config::parse(&text).map_err(|source| ShoutoutError::Config {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn preset(&self) -> Preset {
        self.preset.unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn projector(&self) -> Result<Projector, ConfigError> {
        let quote = match &self.quote_column {
            Some(m) => m.build()?,
            None => self.preset().quote_matcher(),
        };
        let photos = match &self.photos {
            Some(map) => map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect(),
            None => PhotoTable::default(),
        };
        Ok(Projector::new(ColumnIntents::with_quote(quote), photos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
        assert_eq!(Config::default().preset(), Preset::Reason);
        assert_eq!(Config::default().title(), DEFAULT_TITLE);
    }

    #[test]
    fn full_config_parses() {
        let config = Config::parse(
            r#"
title: FRAN
preset: send
quote_column:
  kind: pattern
  value: "(?i)^message"
photos:
  Sam: /sam.png
"#,
        )
        .unwrap();
        assert_eq!(config.title(), "FRAN");
        assert_eq!(config.preset(), Preset::Send);

        let projector = config.projector().unwrap();
        assert!(projector.intents.quote.matches("Message to team"));
        assert!(!projector.intents.quote.matches("Sending note"));
        assert_eq!(projector.photos.lookup("Sam"), Some("/sam.png"));
        assert_eq!(projector.photos.lookup("Evelin Ortiz"), None);
    }

    #[test]
    fn matcher_kind_defaults_to_contains() {
        let config = Config::parse("quote_column:\n  value: kudos\n").unwrap();
        let matcher = config.projector().unwrap().intents.quote;
        assert!(matcher.matches("Your KUDOS"));
    }

    #[test]
    fn preset_picks_quote_column() {
        let config = Config::parse("preset: send").unwrap();
        assert!(config.projector().unwrap().intents.quote.matches("Sending Note"));
        assert!(!Preset::Send.card_style().show_heading);
        assert_eq!(Preset::Reason.card_style().footer_prefix, "By ");
    }

    #[test]
    fn bad_pattern_is_config_error() {
        let config = Config::parse("quote_column:\n  kind: pattern\n  value: \"(\"\n").unwrap();
        assert!(matches!(config.projector(), Err(ConfigError::Pattern(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(Config::parse("colour: red"), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn missing_default_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(None, dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.yaml")), dir.path()).unwrap_err();
        assert!(matches!(err, ShoutoutError::Config { .. }));
    }

    #[test]
    fn default_file_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "title: Kudos\n").unwrap();
        assert_eq!(Config::load(None, dir.path()).unwrap().title(), "Kudos");
    }
}
