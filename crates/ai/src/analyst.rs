//! The narrative analyst and its four prompt templates.

use std::sync::Arc;

use log::debug;

use coinfolio_core::market::MarketSnapshot;
use coinfolio_core::portfolio::PortfolioValuation;

use crate::error::AiError;
use crate::providers::ChatProvider;

/// Builds prompts from portfolio and market data and relays the model's
/// replies.
///
/// Four templates exist: general analysis, strategy suggestion (which
/// additionally takes the prior analysis text), risk assessment and
/// market-sentiment analysis. Replies come back verbatim.
pub struct NarrativeAnalyst {
    provider: Arc<dyn ChatProvider>,
}

impl NarrativeAnalyst {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    /// General portfolio health analysis.
    pub async fn analyze_portfolio(
        &self,
        valuation: &PortfolioValuation,
        snapshot: Option<&MarketSnapshot>,
    ) -> Result<String, AiError> {
        let user = format!(
            "Analyze this portfolio and market data:\n\n\
             Portfolio Data:\n{}\n\n\
             Global Market Metrics:\n{}\n\n\
             Provide:\n\
             1. Overall portfolio health assessment\n\
             2. Risk analysis\n\
             3. Diversification recommendations\n\
             4. Market timing insights\n\
             5. Specific actions to consider",
            render_valuation(valuation)?,
            render_snapshot(snapshot)?,
        );

        self.ask(
            "You are a cryptocurrency portfolio analyst providing detailed analysis.",
            &user,
        )
        .await
    }

    /// Trading strategy suggestions built on a prior analysis.
    pub async fn suggest_strategies(&self, previous_analysis: &str) -> Result<String, AiError> {
        let user = format!(
            "Based on this portfolio analysis:\n{}\n\n\
             Suggest specific trading strategies for:\n\
             1. Market entry points\n\
             2. Exit strategies\n\
             3. Position sizing\n\
             4. Risk management rules\n\
             5. Portfolio rebalancing",
            previous_analysis,
        );

        self.ask("You are a cryptocurrency trading strategy advisor.", &user)
            .await
    }

    /// Risk factor assessment.
    pub async fn risk_assessment(
        &self,
        valuation: &PortfolioValuation,
        snapshot: Option<&MarketSnapshot>,
    ) -> Result<String, AiError> {
        let user = format!(
            "Analyze these risk factors:\n\n\
             Portfolio:\n{}\n\n\
             Market Conditions:\n{}\n\n\
             Consider:\n\
             1. Volatility exposure\n\
             2. Correlation risks\n\
             3. Market cycle position\n\
             4. Liquidity risks\n\
             5. Concentration risks",
            render_valuation(valuation)?,
            render_snapshot(snapshot)?,
        );

        self.ask("You are a cryptocurrency risk assessment specialist.", &user)
            .await
    }

    /// Market sentiment impact analysis.
    pub async fn market_sentiment(
        &self,
        valuation: &PortfolioValuation,
        snapshot: Option<&MarketSnapshot>,
    ) -> Result<String, AiError> {
        let user = format!(
            "Analyze market sentiment impact:\n\n\
             Global Metrics:\n{}\n\n\
             Portfolio:\n{}\n\n\
             Provide insights on:\n\
             1. Market sentiment indicators\n\
             2. Trend analysis\n\
             3. Portfolio positioning\n\
             4. Opportunity areas\n\
             5. Sentiment-based risks",
            render_snapshot(snapshot)?,
            render_valuation(valuation)?,
        );

        self.ask("You are a cryptocurrency market sentiment analyst.", &user)
            .await
    }

    async fn ask(&self, system: &str, user: &str) -> Result<String, AiError> {
        debug!("Requesting analysis from {}", self.provider.id());
        self.provider.complete(system, user).await
    }
}

fn render_valuation(valuation: &PortfolioValuation) -> Result<String, AiError> {
    serde_json::to_string_pretty(valuation).map_err(|e| AiError::Internal(e.to_string()))
}

/// A missing snapshot degrades to a placeholder instead of failing the
/// whole request.
fn render_snapshot(snapshot: Option<&MarketSnapshot>) -> Result<String, AiError> {
    match snapshot {
        Some(snapshot) => {
            serde_json::to_string_pretty(snapshot).map_err(|e| AiError::Internal(e.to_string()))
        }
        None => Ok("unavailable".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::CannedChatProvider;
    use chrono::Utc;
    use coinfolio_core::portfolio::HoldingValuation;
    use rust_decimal_macros::dec;

    fn valuation() -> PortfolioValuation {
        PortfolioValuation {
            holdings: vec![HoldingValuation {
                coin_id: 1,
                symbol: "BTC".to_string(),
                name: "Bitcoin".to_string(),
                quantity: dec!(1.5),
                entry_price: dec!(10),
                last_price: dec!(11),
                value: dec!(16.5),
                profit_loss: dec!(1.5),
                strategy: None,
            }],
            total_value: dec!(16.5),
        }
    }

    fn snapshot() -> MarketSnapshot {
        MarketSnapshot {
            total_market_cap: dec!(2100000000000),
            btc_dominance: dec!(52.1),
            sentiment: "fear".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_analysis_prompt_carries_portfolio_and_metrics() {
        let provider = Arc::new(CannedChatProvider::new("analysis text"));
        let analyst = NarrativeAnalyst::new(provider.clone());

        let reply = analyst
            .analyze_portfolio(&valuation(), Some(&snapshot()))
            .await
            .unwrap();
        assert_eq!(reply, "analysis text");

        let prompts = provider.prompts();
        assert_eq!(prompts.len(), 1);
        let (system, user) = &prompts[0];
        assert!(system.contains("portfolio analyst"));
        assert!(user.contains("\"symbol\": \"BTC\""));
        assert!(user.contains("\"sentiment\": \"fear\""));
        assert!(user.contains("Diversification recommendations"));
    }

    #[tokio::test]
    async fn test_missing_snapshot_renders_placeholder() {
        let provider = Arc::new(CannedChatProvider::new("ok"));
        let analyst = NarrativeAnalyst::new(provider.clone());

        analyst.analyze_portfolio(&valuation(), None).await.unwrap();

        let (_, user) = &provider.prompts()[0];
        assert!(user.contains("Global Market Metrics:\nunavailable"));
    }

    #[tokio::test]
    async fn test_strategy_prompt_embeds_previous_analysis() {
        let provider = Arc::new(CannedChatProvider::new("strategies"));
        let analyst = NarrativeAnalyst::new(provider.clone());

        analyst
            .suggest_strategies("the portfolio is overweight BTC")
            .await
            .unwrap();

        let (system, user) = &provider.prompts()[0];
        assert!(system.contains("strategy advisor"));
        assert!(user.contains("the portfolio is overweight BTC"));
        assert!(user.contains("Position sizing"));
    }

    #[tokio::test]
    async fn test_risk_and_sentiment_use_their_own_templates() {
        let provider = Arc::new(CannedChatProvider::new("text"));
        let analyst = NarrativeAnalyst::new(provider.clone());

        analyst
            .risk_assessment(&valuation(), Some(&snapshot()))
            .await
            .unwrap();
        analyst
            .market_sentiment(&valuation(), Some(&snapshot()))
            .await
            .unwrap();

        let prompts = provider.prompts();
        assert!(prompts[0].0.contains("risk assessment specialist"));
        assert!(prompts[0].1.contains("Concentration risks"));
        assert!(prompts[1].0.contains("market sentiment analyst"));
        assert!(prompts[1].1.contains("Sentiment-based risks"));
    }

    #[tokio::test]
    async fn test_reply_is_verbatim_even_when_odd() {
        // No parsing or validation of the model output ever happens.
        let weird = "```json\n{\"not\": \"parsed\"}\n```";
        let provider = Arc::new(CannedChatProvider::new(weird));
        let analyst = NarrativeAnalyst::new(provider);

        let reply = analyst.analyze_portfolio(&valuation(), None).await.unwrap();
        assert_eq!(reply, weird);
    }
}
