//! Shared constants.

/// All quotes and valuations are denominated in USD.
pub const QUOTE_CURRENCY: &str = "USD";

/// Window used by the "recent entries" journal view, in days.
pub const RECENT_JOURNAL_DAYS: i64 = 7;
