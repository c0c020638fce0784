//! Run settings. Every field defaults to a built-in constant; there is no
//! config file. The serde derives let tests and callers build variants from
//! TOML or JSON snippets.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Live-events feed published upstream.
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/drmlive/fancode-live-events/refs/heads/main/fancode.json";

/// Output file, relative to the working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "fancodebd_by_siam.json";

pub const DEFAULT_FROM_PREFIX: &str = "https://in-mc-fdlive.fancode.com/";
pub const DEFAULT_TO_PREFIX: &str = "https://bd-mc-fdlive.fancode.com/";

/// Host prefix swap applied to each match record's stream URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteRule {
    /// Literal prefix that must open the URL for it to be rewritten.
    pub from_prefix: String,
    /// Replacement for `from_prefix`; the rest of the URL is kept.
    pub to_prefix: String,
}

impl Default for RewriteRule {
    fn default() -> Self {
        Self {
            from_prefix: DEFAULT_FROM_PREFIX.to_string(),
            to_prefix: DEFAULT_TO_PREFIX.to_string(),
        }
    }
}

/// Settings for one run. The CLI always uses `FeedConfig::default()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// HTTP(S) URL of the JSON feed.
    pub source_url: String,
    /// Where the rewritten document is written.
    pub output_path: PathBuf,
    pub rewrite: RewriteRule,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            rewrite: RewriteRule::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = FeedConfig::default();
        assert_eq!(cfg.source_url, DEFAULT_SOURCE_URL);
        assert_eq!(cfg.output_path, PathBuf::from("fancodebd_by_siam.json"));
        assert_eq!(cfg.rewrite.from_prefix, "https://in-mc-fdlive.fancode.com/");
        assert_eq!(cfg.rewrite.to_prefix, "https://bd-mc-fdlive.fancode.com/");
    }

    #[test]
    fn config_toml_partial_override_keeps_defaults() {
        let toml = r#"
            output_path = "/tmp/out.json"
        "#;
        let cfg: FeedConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.output_path, PathBuf::from("/tmp/out.json"));
        assert_eq!(cfg.source_url, DEFAULT_SOURCE_URL);
        assert_eq!(cfg.rewrite, RewriteRule::default());
    }

    #[test]
    fn config_toml_round_trip() {
        let cfg = FeedConfig::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let parsed: FeedConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_rewrite_section() {
        let toml = r#"
            source_url = "http://127.0.0.1:8080/feed.json"

            [rewrite]
            to_prefix = "https://xx-mc-fdlive.fancode.com/"
        "#;
        let cfg: FeedConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.source_url, "http://127.0.0.1:8080/feed.json");
        assert_eq!(cfg.rewrite.from_prefix, DEFAULT_FROM_PREFIX);
        assert_eq!(cfg.rewrite.to_prefix, "https://xx-mc-fdlive.fancode.com/");
    }
}
