pub mod age;
pub mod breakdown;
pub mod feed;
pub mod ranking;
pub mod schema;
pub mod scorer;
pub mod weights;

pub use breakdown::{ComponentScore, ScoreBreakdown, score_breakdown, score_breakdown_at};
pub use feed::{FeedError, load_takes, parse_takes};
pub use ranking::{RankedTake, sort_by_trending, sort_by_trending_at, top_trending, top_trending_at};
pub use schema::{Take, TakeTimestamp};
pub use scorer::{
    SubScores, TrendingScorer, engagement_score, momentum_score, quality_score, recency_score,
    trending_score, trending_score_at,
};
pub use weights::TrendingWeights;
