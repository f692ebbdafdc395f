//! Wire types exchanged with the leaderboard API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Ranking metric understood by the leaderboard API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Power,
    #[default]
    Killpoints,
    Kills,
    Deads,
}

impl Metric {
    /// All metrics, in selector order.
    pub const ALL: [Metric; 4] = [
        Metric::Power,
        Metric::Killpoints,
        Metric::Kills,
        Metric::Deads,
    ];

    /// Query-string name of the metric.
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Power => "power",
            Metric::Killpoints => "killpoints",
            Metric::Kills => "kills",
            Metric::Deads => "deads",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Power => "Power",
            Metric::Killpoints => "Kill Points",
            Metric::Kills => "Total Kills",
            Metric::Deads => "Deaths",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown metric: {0}")]
pub struct UnknownMetric(pub String);

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|metric| metric.as_str() == s)
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}

/// Successful `/leaderboard` payload.
///
/// `metric` keeps whatever name the server echoed so that an unexpected
/// value still renders instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Leaderboard {
    #[serde(deserialize_with = "lenient_string")]
    pub kingdom: String,
    pub metric: String,
    pub dt: String,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub rows: Vec<LeaderboardRow>,
}

/// One ranked player.
///
/// The backend forwards query-engine result cells, which arrive as strings,
/// so text columns accept numbers too and `value` stays a raw JSON value
/// until it is formatted.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LeaderboardRow {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub alliance: Option<String>,
    #[serde(default)]
    pub value: Value,
}

/// `/health` payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<String>,
    pub service: String,
    pub version: String,
    #[serde(default)]
    pub request_id: Option<String>,
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(value_to_string))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(Value::deserialize(deserializer)?).unwrap_or_default())
}
