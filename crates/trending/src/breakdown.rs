use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use takes_config::FinalScoreMode;

use crate::scorer::{SubScores, round_half_up};
use crate::schema::Take;
use crate::weights::TrendingWeights;

/// One named component of a trending score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentScore {
    pub score: f64,
    pub weight: f64,
    pub weighted: f64,
}

impl ComponentScore {
    fn new(score: f64, weight: f64) -> Self {
        Self {
            score,
            weight,
            weighted: score * weight,
        }
    }
}

/// Per-component explanation of a take's trending score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub engagement: ComponentScore,
    pub quality: ComponentScore,
    pub recency: ComponentScore,
    pub momentum: ComponentScore,
    #[serde(rename = "final")]
    pub final_score: i64,
}

impl ScoreBreakdown {
    /// Unrounded, unscaled sum of the weighted contributions.
    pub fn weighted_sum(&self) -> f64 {
        self.engagement.weighted
            + self.quality.weighted
            + self.recency.weighted
            + self.momentum.weighted
    }

    pub fn components(&self) -> [(&'static str, ComponentScore); 4] {
        [
            ("engagement", self.engagement),
            ("quality", self.quality),
            ("recency", self.recency),
            ("momentum", self.momentum),
        ]
    }
}

impl fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, c) in self.components() {
            writeln!(
                f,
                "  {name:<11} {:>7.2} × {:<5.2} = {:>7.2}",
                c.score, c.weight, c.weighted
            )?;
        }
        write!(f, "  {:<11} {:>7}", "final", self.final_score)
    }
}

/// Turn a weighted sum into the breakdown's `final_score`.
///
/// `RoundThenScale` rounds first, so the result is always a multiple of 100
/// and can sit up to 50 points away from [`crate::trending_score`].
pub fn final_score(weighted_sum: f64, mode: FinalScoreMode) -> i64 {
    match mode {
        FinalScoreMode::RoundThenScale => round_half_up(weighted_sum).saturating_mul(100),
        FinalScoreMode::ScaleThenRound => round_half_up(weighted_sum * 100.0),
    }
}

/// Breakdown of `take` as of now.
pub fn score_breakdown(
    take: &Take,
    weights: &TrendingWeights,
    mode: FinalScoreMode,
) -> ScoreBreakdown {
    score_breakdown_at(take, weights, mode, Utc::now())
}

pub fn score_breakdown_at(
    take: &Take,
    weights: &TrendingWeights,
    mode: FinalScoreMode,
    now: DateTime<Utc>,
) -> ScoreBreakdown {
    let subs = SubScores::of(take, now);
    ScoreBreakdown {
        engagement: ComponentScore::new(subs.engagement, weights.engagement),
        quality: ComponentScore::new(subs.quality, weights.quality),
        recency: ComponentScore::new(subs.recency, weights.recency),
        momentum: ComponentScore::new(subs.momentum, weights.momentum),
        final_score: final_score(subs.weighted_sum(weights), mode),
    }
}
