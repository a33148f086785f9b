//! AI analysis actions.

use std::sync::Arc;

use chrono::Local;

use coinfolio_core::market::MarketSnapshot;
use coinfolio_core::portfolio::PortfolioValuation;

use super::prompt;
use crate::main_lib::AppState;

/// Gather the data every analysis template needs. A missing snapshot is
/// fine; the prompt renders it as unavailable.
fn gather(state: &Arc<AppState>) -> anyhow::Result<(PortfolioValuation, Option<MarketSnapshot>)> {
    let valuation = state.portfolio_service.get_portfolio_value()?;
    let snapshot = state.snapshots.latest_snapshot()?;
    Ok((valuation, snapshot))
}

pub async fn full_analysis(state: &Arc<AppState>) -> anyhow::Result<()> {
    println!("\nRunning complete portfolio analysis...");
    let (valuation, snapshot) = gather(state)?;

    println!("\n=== Portfolio Analysis ===");
    let analysis = state
        .analyst
        .analyze_portfolio(&valuation, snapshot.as_ref())
        .await?;
    println!("{}", analysis);

    println!("\n=== Strategy Suggestions ===");
    let strategies = state.analyst.suggest_strategies(&analysis).await?;
    println!("{}", strategies);

    println!("\n=== Risk Assessment ===");
    let risks = state
        .analyst
        .risk_assessment(&valuation, snapshot.as_ref())
        .await?;
    println!("{}", risks);

    println!("\n=== Market Sentiment Analysis ===");
    let sentiment = state
        .analyst
        .market_sentiment(&valuation, snapshot.as_ref())
        .await?;
    println!("{}", sentiment);

    if prompt::confirm("Would you like to save this analysis to a file?", false)? {
        let timestamp = Local::now().format("%Y-%m-%dT%H-%M-%S");
        let filename = format!("portfolio-analysis-{}.txt", timestamp);
        let content = format!(
            "Portfolio Analysis Report\nGenerated: {}\n\n\
             === Portfolio Analysis ===\n{}\n\n\
             === Strategy Suggestions ===\n{}\n\n\
             === Risk Assessment ===\n{}\n\n\
             === Market Sentiment Analysis ===\n{}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            analysis,
            strategies,
            risks,
            sentiment,
        );
        std::fs::write(&filename, content)?;
        println!("\nAnalysis saved to {}", filename);
    }

    Ok(())
}

pub async fn strategies(state: &Arc<AppState>) -> anyhow::Result<()> {
    println!("\nGenerating trading strategies...");
    let (valuation, snapshot) = gather(state)?;

    let analysis = state
        .analyst
        .analyze_portfolio(&valuation, snapshot.as_ref())
        .await?;
    let strategies = state.analyst.suggest_strategies(&analysis).await?;

    println!("\n=== Strategy Suggestions ===");
    println!("{}", strategies);
    Ok(())
}

pub async fn risk_assessment(state: &Arc<AppState>) -> anyhow::Result<()> {
    println!("\nAssessing portfolio risks...");
    let (valuation, snapshot) = gather(state)?;

    let risks = state
        .analyst
        .risk_assessment(&valuation, snapshot.as_ref())
        .await?;

    println!("\n=== Risk Assessment ===");
    println!("{}", risks);
    Ok(())
}

pub async fn market_sentiment(state: &Arc<AppState>) -> anyhow::Result<()> {
    println!("\nAnalyzing market sentiment...");
    let (valuation, snapshot) = gather(state)?;

    let sentiment = state
        .analyst
        .market_sentiment(&valuation, snapshot.as_ref())
        .await?;

    println!("\n=== Market Sentiment Analysis ===");
    println!("{}", sentiment);
    Ok(())
}
