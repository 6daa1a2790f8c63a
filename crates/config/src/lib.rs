use std::env;
use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

// ── Final score mode ──────────────────────────────────────────────────────────

/// Controls how a score breakdown turns its weighted sum into `final_score`.
///
/// | Mode               | Formula                  | Notes                                  |
/// |--------------------|--------------------------|----------------------------------------|
/// | `round_then_scale` | `round(sum) * 100`       | Matches the historical breakdown view. |
/// | `scale_then_round` | `round(sum * 100)`       | Agrees with the single-score path.     |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalScoreMode {
    #[default]
    RoundThenScale,
    ScaleThenRound,
}

// ── Trending weights ──────────────────────────────────────────────────────────

/// Partial weight configuration.  Any key left as `None` falls back to the
/// built-in default for that component, independently of the others.
///
/// Both the short keys (`engagement`) and the legacy client keys
/// (`engagementWeight`) are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightOverrides {
    #[serde(alias = "engagementWeight", skip_serializing_if = "Option::is_none")]
    pub engagement: Option<f64>,
    #[serde(alias = "qualityWeight", skip_serializing_if = "Option::is_none")]
    pub quality: Option<f64>,
    #[serde(alias = "recencyWeight", skip_serializing_if = "Option::is_none")]
    pub recency: Option<f64>,
    #[serde(alias = "momentumWeight", skip_serializing_if = "Option::is_none")]
    pub momentum: Option<f64>,
}

impl WeightOverrides {
    /// Layer `other` on top of `self`: keys set in `other` win.
    pub fn merged_with(self, other: WeightOverrides) -> Self {
        Self {
            engagement: other.engagement.or(self.engagement),
            quality: other.quality.or(self.quality),
            recency: other.recency.or(self.recency),
            momentum: other.momentum.or(self.momentum),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.engagement.is_none()
            && self.quality.is_none()
            && self.recency.is_none()
            && self.momentum.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendingConfig {
    pub weights: WeightOverrides,
    pub final_score_mode: FinalScoreMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Number of takes `takes rank` prints when `--limit` is not given.
    pub default_limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self { default_limit: 10 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub trending: TrendingConfig,
    pub feed: FeedConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::default();
        if let Ok(raw) = fs::read_to_string(path) {
            config = toml::from_str(&raw)?;
        }

        if let Ok(level) = env::var("TAKES_LOG_LEVEL") {
            if !level.is_empty() {
                config.telemetry.log_level = level;
            }
        }

        Ok(config)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let rendered = toml::to_string_pretty(self)?;
        fs::write(path, rendered)?;
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert!(cfg.trending.weights.is_empty());
        assert_eq!(cfg.trending.final_score_mode, FinalScoreMode::RoundThenScale);
        assert_eq!(cfg.feed.default_limit, 10);
        assert_eq!(cfg.telemetry.log_level, "info");
    }

    // ── load_from ──────────────────────────────────────────────────────────

    #[test]
    fn load_from_missing_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(dir.path().join("nonexistent.toml")).unwrap();
        assert_eq!(cfg.feed.default_limit, 10);
        assert!(cfg.trending.weights.is_empty());
    }

    #[test]
    fn load_from_valid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.toml");
        fs::write(
            &path,
            r#"
[trending]
final_score_mode = "scale_then_round"

[trending.weights]
engagement = 0.5
momentum = 0.25

[feed]
default_limit = 3
"#,
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path).unwrap();
        assert_eq!(cfg.trending.final_score_mode, FinalScoreMode::ScaleThenRound);
        assert_eq!(cfg.trending.weights.engagement, Some(0.5));
        assert_eq!(cfg.trending.weights.momentum, Some(0.25));
        assert_eq!(cfg.trending.weights.quality, None);
        assert_eq!(cfg.trending.weights.recency, None);
        assert_eq!(cfg.feed.default_limit, 3);
    }

    #[test]
    fn load_accepts_legacy_weight_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("legacy.toml");
        fs::write(
            &path,
            r#"
[trending.weights]
engagementWeight = 1.0
qualityWeight = 0.0
"#,
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path).unwrap();
        assert_eq!(cfg.trending.weights.engagement, Some(1.0));
        assert_eq!(cfg.trending.weights.quality, Some(0.0));
    }

    #[test]
    fn load_from_invalid_toml_returns_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "this is not valid toml {{{{").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }

    // ── save_to + roundtrip ────────────────────────────────────────────────

    #[test]
    fn save_and_reload_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub/config.toml");

        let mut cfg = AppConfig::default();
        cfg.trending.weights.recency = Some(0.9);
        cfg.trending.final_score_mode = FinalScoreMode::ScaleThenRound;
        cfg.feed.default_limit = 25;

        cfg.save_to(&path).unwrap();
        assert!(path.exists());

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.trending.weights.recency, Some(0.9));
        assert_eq!(loaded.trending.weights.engagement, None);
        assert_eq!(loaded.trending.final_score_mode, FinalScoreMode::ScaleThenRound);
        assert_eq!(loaded.feed.default_limit, 25);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/c/config.toml");
        AppConfig::default().save_to(&path).unwrap();
        assert!(path.exists());
    }

    // ── Overrides ──────────────────────────────────────────────────────────

    #[test]
    fn merged_with_prefers_the_newer_layer_per_key() {
        let file = WeightOverrides {
            engagement: Some(0.6),
            quality: Some(0.1),
            ..Default::default()
        };
        let flags = WeightOverrides {
            quality: Some(0.3),
            momentum: Some(0.0),
            ..Default::default()
        };
        let merged = file.merged_with(flags);
        assert_eq!(merged.engagement, Some(0.6));
        assert_eq!(merged.quality, Some(0.3));
        assert_eq!(merged.recency, None);
        assert_eq!(merged.momentum, Some(0.0));
    }

    #[test]
    fn final_score_mode_serde_roundtrip() {
        for (mode, label) in [
            (FinalScoreMode::RoundThenScale, "\"round_then_scale\""),
            (FinalScoreMode::ScaleThenRound, "\"scale_then_round\""),
        ] {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, label);
            let back: FinalScoreMode = serde_json::from_str(&json).unwrap();
            assert_eq!(back, mode);
        }
    }

    // ── Env var overrides ──────────────────────────────────────────────────

    #[test]
    fn env_log_level_overrides_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("env.toml");
        fs::write(
            &path,
            r#"
[telemetry]
log_level = "warn"
"#,
        )
        .unwrap();

        // SAFETY: test is single-threaded for this env var.
        unsafe { env::set_var("TAKES_LOG_LEVEL", "trace") };
        let cfg = AppConfig::load_from(&path).unwrap();
        assert_eq!(cfg.telemetry.log_level, "trace");
        unsafe { env::remove_var("TAKES_LOG_LEVEL") };
    }
}
