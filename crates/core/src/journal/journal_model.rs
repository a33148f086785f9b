//! Trading journal domain models.
//!
//! Entries are append-only: once written they are never updated or
//! deleted. Tags are stored as a JSON array in the database and surface
//! here as a plain `Vec<String>`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::portfolio::TradeSide;

/// What kind of journal entry this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryCategory {
    Trade,
    Analysis,
    Strategy,
    Reflection,
}

impl EntryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryCategory::Trade => "TRADE",
            EntryCategory::Analysis => "ANALYSIS",
            EntryCategory::Strategy => "STRATEGY",
            EntryCategory::Reflection => "REFLECTION",
        }
    }

    pub fn all() -> &'static [EntryCategory] {
        &[
            EntryCategory::Trade,
            EntryCategory::Analysis,
            EntryCategory::Strategy,
            EntryCategory::Reflection,
        ]
    }
}

impl fmt::Display for EntryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TRADE" => Ok(EntryCategory::Trade),
            "ANALYSIS" => Ok(EntryCategory::Analysis),
            "STRATEGY" => Ok(EntryCategory::Strategy),
            "REFLECTION" => Ok(EntryCategory::Reflection),
            other => Err(format!("Unknown entry category: {}", other)),
        }
    }
}

/// How the author felt when writing the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmotionalState {
    Excited,
    Nervous,
    Confident,
    Fearful,
    Neutral,
}

impl EmotionalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionalState::Excited => "EXCITED",
            EmotionalState::Nervous => "NERVOUS",
            EmotionalState::Confident => "CONFIDENT",
            EmotionalState::Fearful => "FEARFUL",
            EmotionalState::Neutral => "NEUTRAL",
        }
    }

    pub fn all() -> &'static [EmotionalState] {
        &[
            EmotionalState::Excited,
            EmotionalState::Nervous,
            EmotionalState::Confident,
            EmotionalState::Fearful,
            EmotionalState::Neutral,
        ]
    }
}

impl fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionalState {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EXCITED" => Ok(EmotionalState::Excited),
            "NERVOUS" => Ok(EmotionalState::Nervous),
            "CONFIDENT" => Ok(EmotionalState::Confident),
            "FEARFUL" => Ok(EmotionalState::Fearful),
            "NEUTRAL" => Ok(EmotionalState::Neutral),
            other => Err(format!("Unknown emotional state: {}", other)),
        }
    }
}

/// The author's read of the broader market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketSentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl MarketSentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketSentiment::Bullish => "BULLISH",
            MarketSentiment::Bearish => "BEARISH",
            MarketSentiment::Neutral => "NEUTRAL",
        }
    }

    pub fn all() -> &'static [MarketSentiment] {
        &[
            MarketSentiment::Bullish,
            MarketSentiment::Bearish,
            MarketSentiment::Neutral,
        ]
    }
}

impl fmt::Display for MarketSentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketSentiment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BULLISH" => Ok(MarketSentiment::Bullish),
            "BEARISH" => Ok(MarketSentiment::Bearish),
            "NEUTRAL" => Ok(MarketSentiment::Neutral),
            other => Err(format!("Unknown market sentiment: {}", other)),
        }
    }
}

/// Trade detail carried by TRADE entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeDetail {
    pub side: TradeSide,
    pub amount: Decimal,
    /// Unit price in USD at the time of the trade.
    pub price: Decimal,
}

/// A journal entry as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub category: EntryCategory,
    /// Provider id of the coin this entry is about, if any.
    pub coin_id: Option<u64>,
    /// Present when `category` is TRADE.
    pub trade: Option<TradeDetail>,
    pub emotional_state: EmotionalState,
    /// Self-rated confidence, 1 (lowest) to 5 (highest).
    pub confidence: u8,
    pub market_sentiment: MarketSentiment,
    pub text: String,
    pub lessons_learned: Option<String>,
    pub follow_up_needed: bool,
    pub tags: Vec<String>,
}

/// Input for a new journal entry. The store assigns id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJournalEntry {
    pub category: EntryCategory,
    pub coin_id: Option<u64>,
    pub trade: Option<TradeDetail>,
    pub emotional_state: EmotionalState,
    pub confidence: u8,
    pub market_sentiment: MarketSentiment,
    pub text: String,
    pub lessons_learned: Option<String>,
    pub follow_up_needed: bool,
    pub tags: Vec<String>,
}

/// Query filters for journal entries.
///
/// Filters compose conjunctively: every supplied filter must match, and
/// an absent filter imposes no constraint. Results are always ordered by
/// timestamp descending.
#[derive(Debug, Clone, Default)]
pub struct JournalFilters {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub category: Option<EntryCategory>,
    pub coin_id: Option<u64>,
    pub emotional_state: Option<EmotionalState>,
}

impl JournalFilters {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn since(start_date: DateTime<Utc>) -> Self {
        Self {
            start_date: Some(start_date),
            ..Self::default()
        }
    }

    pub fn category(category: EntryCategory) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }
}

/// How often each emotional state shows up, and what it correlates with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalPattern {
    pub emotional_state: EmotionalState,
    pub count: i64,
    /// Share of this state's TRADE entries that were buys, when any exist.
    pub buy_ratio: Option<f64>,
    pub avg_confidence: f64,
}

/// Per-sentiment rollup of TRADE entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategicInsight {
    pub category: EntryCategory,
    pub market_sentiment: MarketSentiment,
    pub count: i64,
    pub avg_confidence: f64,
    /// Distinct tags seen for this group, comma-joined.
    pub common_tags: Option<String>,
}
