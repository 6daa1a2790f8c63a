use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schema::Take;
use crate::scorer::trending_score_at;
use crate::weights::TrendingWeights;

/// A copy of a take annotated with its trending score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedTake {
    #[serde(flatten)]
    pub take: Take,
    pub trending_score: i64,
}

/// Score every take and return copies sorted by score, highest first.
///
/// The input is only read.  The sort is stable, but callers should not rely
/// on the relative order of equal scores.
pub fn sort_by_trending(takes: &[Take], weights: &TrendingWeights) -> Vec<RankedTake> {
    sort_by_trending_at(takes, weights, Utc::now())
}

/// Same as [`sort_by_trending`] with every take scored against `now`.
pub fn sort_by_trending_at(
    takes: &[Take],
    weights: &TrendingWeights,
    now: DateTime<Utc>,
) -> Vec<RankedTake> {
    let mut ranked: Vec<RankedTake> = takes
        .iter()
        .map(|take| RankedTake {
            trending_score: trending_score_at(take, weights, now),
            take: take.clone(),
        })
        .collect();

    ranked.sort_by(|l, r| r.trending_score.cmp(&l.trending_score));
    debug!(count = ranked.len(), "sorted takes by trending score");
    ranked
}

/// The `limit` highest-scoring takes.  A zero limit yields nothing; a limit
/// past the end yields every take.
pub fn top_trending(takes: &[Take], limit: usize, weights: &TrendingWeights) -> Vec<RankedTake> {
    top_trending_at(takes, limit, weights, Utc::now())
}

pub fn top_trending_at(
    takes: &[Take],
    limit: usize,
    weights: &TrendingWeights,
    now: DateTime<Utc>,
) -> Vec<RankedTake> {
    let mut ranked = sort_by_trending_at(takes, weights, now);
    ranked.truncate(limit);
    debug!(limit, kept = ranked.len(), "truncated trending list");
    ranked
}

// ── Tests ─────────────────────────────────────────────────────────────────────
