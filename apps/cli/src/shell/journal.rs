//! Trading journal actions.

use std::sync::Arc;

use coinfolio_core::journal::{
    EmotionalState, EntryCategory, JournalEntry, JournalFilters, MarketSentiment,
    NewJournalEntry, TradeDetail,
};
use coinfolio_core::portfolio::TradeSide;

use super::{prompt, render};
use crate::main_lib::AppState;

pub async fn add_entry(state: &Arc<AppState>) -> anyhow::Result<()> {
    let categories: Vec<String> = EntryCategory::all().iter().map(|c| c.to_string()).collect();
    let category = EntryCategory::all()
        [prompt::select("What type of journal entry?", &categories)?];

    let mut coin_id = None;
    let mut trade = None;

    if category == EntryCategory::Trade {
        let holdings = state.portfolio_service.list_holdings()?;
        if holdings.is_empty() {
            println!("No coins in portfolio. Please add coins first.");
            return Ok(());
        }

        let labels: Vec<String> = holdings
            .iter()
            .map(|h| format!("{} ({})", h.name, h.symbol))
            .collect();
        let holding = &holdings[prompt::select("Select coin:", &labels)?];
        coin_id = Some(holding.coin_id);

        let side = match prompt::select(
            "Trade type:",
            &["BUY".to_string(), "SELL".to_string()],
        )? {
            0 => TradeSide::Buy,
            _ => TradeSide::Sell,
        };
        let amount = prompt::input_positive_decimal("Amount:")?;
        let price = prompt::input_positive_decimal("Price (USD):")?;
        trade = Some(TradeDetail { side, amount, price });
    }

    let states: Vec<String> = EmotionalState::all().iter().map(|s| s.to_string()).collect();
    let emotional_state = EmotionalState::all()
        [prompt::select("How are you feeling about this?", &states)?];

    let ratings: Vec<String> = (1..=5).map(|n| n.to_string()).collect();
    let confidence = prompt::select("Rate your confidence level (1-5):", &ratings)? as u8 + 1;

    let sentiments: Vec<String> = MarketSentiment::all().iter().map(|s| s.to_string()).collect();
    let market_sentiment = MarketSentiment::all()
        [prompt::select("Current market sentiment:", &sentiments)?];

    let text = prompt::input_multiline("\nEnter your detailed thoughts")?;
    let lessons = prompt::input_multiline("\nEnter lessons learned")?;
    let follow_up_needed = prompt::confirm("Does this need follow-up?", false)?;
    let tags = prompt::input_tags("Enter tags (comma-separated):")?;

    let entry = state
        .journal_service
        .add_entry(NewJournalEntry {
            category,
            coin_id,
            trade,
            emotional_state,
            confidence,
            market_sentiment,
            text,
            lessons_learned: (!lessons.is_empty()).then_some(lessons),
            follow_up_needed,
            tags,
        })
        .await?;

    println!("\nJournal entry added successfully!");
    println!("\nEntry Preview:");
    println!("-------------");
    print_entry(&entry);
    Ok(())
}

pub fn view_entries(state: &Arc<AppState>) -> anyhow::Result<()> {
    let views = [
        "All Entries".to_string(),
        "Recent Entries".to_string(),
        "Trade Entries".to_string(),
        "Follow-up Needed".to_string(),
    ];

    let entries = match prompt::select("View entries by:", &views)? {
        0 => state.journal_service.query_entries(&JournalFilters::none())?,
        1 => state.journal_service.recent_entries()?,
        2 => state
            .journal_service
            .query_entries(&JournalFilters::category(EntryCategory::Trade))?,
        _ => state.journal_service.list_follow_ups()?,
    };

    if entries.is_empty() {
        println!("\nNo entries found.");
        return Ok(());
    }

    for entry in &entries {
        println!("\n-------------------");
        print_entry(entry);
    }
    println!("-------------------");
    Ok(())
}

pub fn trading_patterns(state: &Arc<AppState>) -> anyhow::Result<()> {
    println!("\nAnalyzing Trading Patterns...");

    let patterns = state.journal_service.emotional_patterns()?;
    if patterns.is_empty() {
        println!("\nNo journal entries yet.");
        return Ok(());
    }

    println!("\nEmotional Patterns:");
    let rows: Vec<Vec<String>> = patterns
        .iter()
        .map(|p| {
            vec![
                p.emotional_state.to_string(),
                p.count.to_string(),
                p.buy_ratio
                    .map(|r| format!("{:.2}", r))
                    .unwrap_or_else(|| "-".to_string()),
                format!("{:.2}", p.avg_confidence),
            ]
        })
        .collect();
    render::print_table(&["State", "Count", "Buy Ratio", "Avg Confidence"], &rows);

    let insights = state.journal_service.strategic_insights()?;
    if !insights.is_empty() {
        println!("\nStrategic Insights:");
        let rows: Vec<Vec<String>> = insights
            .iter()
            .map(|i| {
                vec![
                    i.market_sentiment.to_string(),
                    i.count.to_string(),
                    format!("{:.2}", i.avg_confidence),
                    i.common_tags.clone().unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();
        render::print_table(&["Sentiment", "Trades", "Avg Confidence", "Tags"], &rows);
    }

    let follow_ups = state.journal_service.list_follow_ups()?;
    if !follow_ups.is_empty() {
        println!("\nPending Follow-ups:");
        for entry in &follow_ups {
            let preview: String = entry.text.chars().take(50).collect();
            println!(
                "- {}: {} - {}...",
                entry.timestamp.format("%Y-%m-%d"),
                entry.category,
                preview
            );
        }
    }
    Ok(())
}

fn print_entry(entry: &JournalEntry) {
    println!("Date: {}", entry.timestamp.format("%Y-%m-%d %H:%M"));
    println!("Type: {}", entry.category);
    if let Some(coin_id) = entry.coin_id {
        println!("Coin ID: {}", coin_id);
    }
    if let Some(trade) = &entry.trade {
        println!("Trade Type: {}", trade.side);
        println!("Amount: {}", trade.amount.round_dp(4));
        println!("Price: ${}", trade.price.round_dp(2));
    }
    println!("Emotional State: {}", entry.emotional_state);
    println!("Confidence: {}/5", entry.confidence);
    println!("Market Sentiment: {}", entry.market_sentiment);
    println!("\nEntry:");
    println!("{}", entry.text);
    if let Some(lessons) = &entry.lessons_learned {
        println!("\nLessons Learned:");
        println!("{}", lessons);
    }
    if !entry.tags.is_empty() {
        println!("\nTags: {}", entry.tags.join(", "));
    }
    if entry.follow_up_needed {
        println!("Follow-up needed");
    }
}
