//! Portfolio management actions.

use std::sync::Arc;

use coinfolio_core::portfolio::{Holding, NewTrade, TradeSide};

use super::{prompt, render};
use crate::main_lib::AppState;

/// Select one registered coin, or report when there are none.
fn select_holding<'a>(holdings: &'a [Holding], message: &str) -> anyhow::Result<Option<&'a Holding>> {
    if holdings.is_empty() {
        println!("\nNo coins in portfolio. Add some coins first!");
        return Ok(None);
    }

    let labels: Vec<String> = holdings
        .iter()
        .map(|h| format!("{} ({})", h.name, h.symbol))
        .collect();
    let index = prompt::select(message, &labels)?;
    Ok(Some(&holdings[index]))
}

pub async fn add_coin(state: &Arc<AppState>) -> anyhow::Result<()> {
    let symbol = prompt::input("Enter coin symbol (e.g., BTC):")?;

    let candidates = state.price_provider.search_by_symbol(&symbol).await?;

    // Symbols are ambiguous; let the user pick by name and provider id.
    let labels: Vec<String> = candidates
        .iter()
        .map(|c| format!("{} ({}) - ID: {}", c.name, c.symbol, c.id))
        .collect();
    let index = prompt::select("Select the correct coin:", &labels)?;
    let quote = &candidates[index];

    let amount = prompt::input_positive_decimal("Enter the amount you hold:")?;
    let strategy = prompt::input_optional("Enter your strategy for this coin (optional):")?;

    let holding = state
        .portfolio_service
        .register_coin(quote, amount, strategy)
        .await?;

    println!("Added {} to portfolio", holding.name);
    Ok(())
}

pub fn view_portfolio(state: &Arc<AppState>) -> anyhow::Result<()> {
    let valuation = state.portfolio_service.get_portfolio_value()?;

    if valuation.holdings.is_empty() {
        println!("\nPortfolio is empty. Add some coins first!");
        return Ok(());
    }

    println!("\nYour Portfolio:");
    let rows: Vec<Vec<String>> = valuation
        .holdings
        .iter()
        .map(|h| {
            vec![
                h.symbol.clone(),
                h.name.clone(),
                h.quantity.round_dp(4).to_string(),
                format!("${}", h.entry_price.round_dp(2)),
                format!("${}", h.last_price.round_dp(2)),
                format!("${}", h.value.round_dp(2)),
                format!("${}", h.profit_loss.round_dp(2)),
                h.strategy.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    render::print_table(
        &["Symbol", "Name", "Quantity", "Entry", "Current", "Value", "P/L", "Strategy"],
        &rows,
    );

    println!(
        "\nTotal Portfolio Value: ${}",
        valuation.total_value.round_dp(2)
    );
    Ok(())
}

pub async fn update_prices(state: &Arc<AppState>) -> anyhow::Result<()> {
    let report = state.portfolio_service.refresh_prices().await?;

    for updated in &report.updated {
        println!(
            "Updated {} price to ${}",
            updated.symbol,
            updated.price.round_dp(2)
        );
    }
    for failed in &report.failed {
        println!("Failed to update {}: {}", failed.symbol, failed.message);
    }
    if report.updated.is_empty() && report.failed.is_empty() {
        println!("\nNo coins in portfolio.");
    }
    Ok(())
}

pub async fn remove_coin(state: &Arc<AppState>) -> anyhow::Result<()> {
    let holdings = state.portfolio_service.list_holdings()?;
    let Some(holding) = select_holding(&holdings, "Select coin to remove:")? else {
        return Ok(());
    };

    state.portfolio_service.remove_coin(holding.coin_id).await?;
    println!("Coin removed from portfolio");
    Ok(())
}

pub async fn record_trade(state: &Arc<AppState>) -> anyhow::Result<()> {
    let holdings = state.portfolio_service.list_holdings()?;
    let Some(holding) = select_holding(&holdings, "Select coin:")? else {
        return Ok(());
    };
    let coin_id = holding.coin_id;

    let side = match prompt::select(
        "Trade type:",
        &["BUY".to_string(), "SELL".to_string()],
    )? {
        0 => TradeSide::Buy,
        _ => TradeSide::Sell,
    };
    let quantity = prompt::input_positive_decimal("Amount:")?;
    let unit_price = prompt::input_positive_decimal("Price (USD):")?;
    let notes = prompt::input_optional("Notes (optional):")?;

    let trade = state
        .portfolio_service
        .record_trade(NewTrade {
            coin_id,
            side,
            quantity,
            unit_price,
            notes,
        })
        .await?;

    println!(
        "Recorded {} {} @ ${}",
        trade.side,
        trade.quantity.round_dp(4),
        trade.unit_price.round_dp(2)
    );
    Ok(())
}

pub fn trade_history(state: &Arc<AppState>) -> anyhow::Result<()> {
    let history = state.portfolio_service.trade_history()?;

    if history.is_empty() {
        println!("\nNo trades recorded yet.");
        return Ok(());
    }

    println!("\nTrade History:");
    let rows: Vec<Vec<String>> = history
        .iter()
        .map(|t| {
            vec![
                t.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                t.symbol.clone(),
                t.side.to_string(),
                t.quantity.round_dp(4).to_string(),
                format!("${}", t.unit_price.round_dp(2)),
                format!("${}", t.total_value.round_dp(2)),
                t.notes.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    render::print_table(
        &["Date", "Symbol", "Side", "Amount", "Price", "Total", "Notes"],
        &rows,
    );
    Ok(())
}
