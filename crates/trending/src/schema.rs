use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Offset-less layouts read as UTC.  The space-separated form is what
/// SQLite's `CURRENT_TIMESTAMP` produces.
const NAIVE_LAYOUTS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// When a take was posted.
///
/// | Variant       | Wire form                                  | Notes                  |
/// |---------------|--------------------------------------------|------------------------|
/// | `At`          | RFC 3339, offset-less ISO, or `YYYY-MM-DD` | Canonical, UTC         |
/// | `EpochMillis` | integer                                    | Unix milliseconds      |
/// | `Relative`    | `"2 hours ago"`                            | Legacy, parsed lossily |
///
/// Any string that is not one of the absolute layouts lands in `Relative`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TakeTimestamp {
    At(DateTime<Utc>),
    EpochMillis(i64),
    Relative(String),
}

impl TakeTimestamp {
    pub fn relative(text: impl Into<String>) -> Self {
        Self::Relative(text.into())
    }

    /// Classify a textual timestamp: absolute layouts first, `Relative` otherwise.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::At(at.with_timezone(&Utc));
        }
        for layout in NAIVE_LAYOUTS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, layout) {
                return Self::At(naive.and_utc());
            }
        }
        if let Some(midnight) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
        {
            return Self::At(midnight.and_utc());
        }
        Self::Relative(text.to_string())
    }
}

impl From<DateTime<Utc>> for TakeTimestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self::At(at)
    }
}

impl<'de> Deserialize<'de> for TakeTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Millis(i64),
            Text(String),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Millis(ms) => Self::EpochMillis(ms),
            Wire::Text(text) => Self::parse(&text),
        })
    }
}

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A user-authored opinion post as supplied by the feed.
///
/// Only the six numeric/time fields are read by the scorer; `id`, `author`
/// and `content` ride along for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Take {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub likes: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub comments: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub num_ratings: i64,
    /// Average community rating, nominally 0–10.
    #[serde(deserialize_with = "null_as_default")]
    pub rank: f64,
    /// Author credibility, nominally 0–100.
    #[serde(deserialize_with = "null_as_default")]
    pub ball_knowledge: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<TakeTimestamp>,
}

impl Take {
    /// Identifier used in log lines and CLI output; `-` when the feed gave none.
    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or("-")
    }
}
