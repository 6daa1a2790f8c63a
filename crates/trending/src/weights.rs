use serde::{Deserialize, Serialize};
use takes_config::WeightOverrides;

/// Fully resolved component weights.
///
/// The weights are independent multipliers.  They are not required to sum
/// to 1 and are never normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendingWeights {
    pub engagement: f64,
    pub quality: f64,
    pub recency: f64,
    pub momentum: f64,
}

impl TrendingWeights {
    pub const DEFAULT: Self = Self {
        engagement: 0.40,
        quality: 0.35,
        recency: 0.20,
        momentum: 0.05,
    };

    /// Apply `overrides` key by key on top of [`Self::DEFAULT`].
    pub fn from_overrides(overrides: &WeightOverrides) -> Self {
        let d = Self::DEFAULT;
        Self {
            engagement: overrides.engagement.unwrap_or(d.engagement),
            quality: overrides.quality.unwrap_or(d.quality),
            recency: overrides.recency.unwrap_or(d.recency),
            momentum: overrides.momentum.unwrap_or(d.momentum),
        }
    }
}

impl Default for TrendingWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<WeightOverrides> for TrendingWeights {
    fn from(overrides: WeightOverrides) -> Self {
        Self::from_overrides(&overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_overrides_resolve_to_defaults() {
        let w = TrendingWeights::from_overrides(&WeightOverrides::default());
        assert_eq!(w, TrendingWeights::DEFAULT);
    }

    #[test]
    fn each_key_falls_back_independently() {
        let w: TrendingWeights = WeightOverrides {
            quality: Some(0.0),
            momentum: Some(2.5),
            ..Default::default()
        }
        .into();
        assert_eq!(w.engagement, 0.40);
        assert_eq!(w.quality, 0.0);
        assert_eq!(w.recency, 0.20);
        assert_eq!(w.momentum, 2.5);
    }

    #[test]
    fn legacy_client_keys_are_accepted() {
        let overrides: WeightOverrides = serde_json::from_str(
            r#"{"engagementWeight":1,"qualityWeight":0,"recencyWeight":0,"momentumWeight":0}"#,
        )
        .unwrap();
        let w = TrendingWeights::from(overrides);
        assert_eq!(
            w,
            TrendingWeights {
                engagement: 1.0,
                quality: 0.0,
                recency: 0.0,
                momentum: 0.0,
            }
        );
    }
}
