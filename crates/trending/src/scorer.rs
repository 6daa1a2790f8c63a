//! Trending score for takes.
//!
//! Scoring model (default weights):
//! ```text
//! score = round(100 × (engagement(0.40) + quality(0.35) + recency(0.20) + momentum(0.05)))
//! ```
//! Every sub-score sits on a 0–100 scale, so with weights summing to ~1 the
//! final score lands in roughly 0–10 000.  Scoring is total: no input is
//! rejected, out-of-range values are clamped by the formulas themselves.

use chrono::{DateTime, Utc};
use takes_config::{AppConfig, FinalScoreMode};
use tracing::trace;

use crate::age::age_hours;
use crate::breakdown::{ScoreBreakdown, score_breakdown_at};
use crate::ranking::{RankedTake, sort_by_trending_at, top_trending_at};
use crate::schema::{Take, TakeTimestamp};
use crate::weights::TrendingWeights;

const RECENCY_HALF_LIFE_HOURS: f64 = 24.0;
const RECENCY_FLOOR: f64 = 5.0;

/// The four sub-scores of one take, computed against a single `now`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub engagement: f64,
    pub quality: f64,
    pub recency: f64,
    pub momentum: f64,
}

impl SubScores {
    pub fn of(take: &Take, now: DateTime<Utc>) -> Self {
        Self {
            engagement: engagement_score(take),
            quality: quality_score(take),
            recency: recency_score(take.timestamp.as_ref(), now),
            momentum: momentum_score(take),
        }
    }

    pub fn weighted_sum(&self, weights: &TrendingWeights) -> f64 {
        self.engagement * weights.engagement
            + self.quality * weights.quality
            + self.recency * weights.recency
            + self.momentum * weights.momentum
    }
}

// ── Sub-scores ────────────────────────────────────────────────────────────────

fn log10_at_least_one(count: i64) -> f64 {
    (count.max(1) as f64).log10()
}

/// Likes, comments and rating volume, each on its own capped log curve.
///
/// The caps (40/30/30) add up to exactly 100, so engagement only saturates
/// when all three channels are maxed.
pub fn engagement_score(take: &Take) -> f64 {
    let likes = (log10_at_least_one(take.likes) * 20.0).min(40.0);
    let comments = (log10_at_least_one(take.comments) * 15.0).min(30.0);
    let rating_volume = (log10_at_least_one(take.num_ratings) * 15.0).min(30.0);
    (likes + comments + rating_volume).min(100.0)
}

/// Community rating (up to 60 points) plus author credibility (up to 40).
///
/// Only the sum is capped; a `rank` above 10 or a negative `ball_knowledge`
/// flows through linearly.
pub fn quality_score(take: &Take) -> f64 {
    let rating = (take.rank / 10.0) * 60.0;
    let credibility = (take.ball_knowledge / 100.0) * 40.0;
    (rating + credibility).min(100.0)
}

/// Exponential decay with a 24 h half-life, floored at 5.
pub fn recency_score(timestamp: Option<&TakeTimestamp>, now: DateTime<Utc>) -> f64 {
    let hours = age_hours(timestamp, now);
    let decay = 0.5_f64.powf(hours / RECENCY_HALF_LIFE_HOURS);
    (decay * 100.0).max(RECENCY_FLOOR)
}

/// Discussion ratio (comments per like) plus a small volume bonus.
pub fn momentum_score(take: &Take) -> f64 {
    let discussion = if take.comments > 0 {
        (take.comments as f64 / take.likes.max(1) as f64 * 30.0).min(100.0)
    } else {
        0.0
    };
    let volume = (log10_at_least_one(take.likes.saturating_add(take.comments)) * 10.0).min(30.0);
    (discussion + volume).min(100.0)
}

// ── Composite ─────────────────────────────────────────────────────────────────

/// Round to the nearest integer with ties going toward positive infinity.
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Trending score of `take` as of now.
pub fn trending_score(take: &Take, weights: &TrendingWeights) -> i64 {
    trending_score_at(take, weights, Utc::now())
}

/// Trending score of `take` as of `now`.
pub fn trending_score_at(take: &Take, weights: &TrendingWeights, now: DateTime<Utc>) -> i64 {
    let subs = SubScores::of(take, now);
    let score = round_half_up(subs.weighted_sum(weights) * 100.0);
    trace!(
        id = take.label(),
        engagement = subs.engagement,
        quality = subs.quality,
        recency = subs.recency,
        momentum = subs.momentum,
        score,
        "scored take"
    );
    score
}

// ── Scorer handle ─────────────────────────────────────────────────────────────

/// Weights plus breakdown policy, resolved once from config and shared freely.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrendingScorer {
    pub weights: TrendingWeights,
    pub final_score_mode: FinalScoreMode,
}

impl TrendingScorer {
    pub fn new(weights: TrendingWeights) -> Self {
        Self {
            weights,
            final_score_mode: FinalScoreMode::default(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            weights: TrendingWeights::from_overrides(&config.trending.weights),
            final_score_mode: config.trending.final_score_mode,
        }
    }

    pub fn with_final_score_mode(mut self, mode: FinalScoreMode) -> Self {
        self.final_score_mode = mode;
        self
    }

    pub fn score(&self, take: &Take) -> i64 {
        trending_score(take, &self.weights)
    }

    pub fn breakdown(&self, take: &Take) -> ScoreBreakdown {
        score_breakdown_at(take, &self.weights, self.final_score_mode, Utc::now())
    }

    pub fn sort(&self, takes: &[Take]) -> Vec<RankedTake> {
        sort_by_trending_at(takes, &self.weights, Utc::now())
    }

    pub fn top(&self, takes: &[Take], limit: usize) -> Vec<RankedTake> {
        top_trending_at(takes, limit, &self.weights, Utc::now())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
