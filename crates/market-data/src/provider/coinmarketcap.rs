//! CoinMarketCap quote provider implementation.
//!
//! Talks to the `cryptocurrency/quotes/latest` endpoint, queried either by
//! ticker symbol or by CMC numeric id, always converted to USD. The API key
//! travels in the `X-CMC_PRO_API_KEY` header. Failures carry the message
//! from the response's `status` envelope when one is present.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::CoinQuote;
use crate::provider::PriceProvider;

const BASE_URL: &str = "https://pro-api.coinmarketcap.com/v1";
const PROVIDER_ID: &str = "COINMARKETCAP";

// ============================================================================
// API Response Structures
// ============================================================================

/// Envelope carried by every response.
#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    error_code: i64,
    error_message: Option<String>,
}

/// Response from /cryptocurrency/quotes/latest.
///
/// `data` is keyed by whatever the request queried with (symbol or id).
#[derive(Debug, Deserialize)]
struct QuotesResponse {
    status: StatusEnvelope,
    #[serde(default)]
    data: HashMap<String, CoinEntry>,
}

/// One coin object inside the `data` map.
#[derive(Debug, Deserialize)]
struct CoinEntry {
    id: u64,
    name: String,
    symbol: String,
    slug: String,
    quote: QuoteMap,
}

#[derive(Debug, Deserialize)]
struct QuoteMap {
    #[serde(rename = "USD")]
    usd: UsdQuote,
}

#[derive(Debug, Deserialize)]
struct UsdQuote {
    price: Option<f64>,
    volume_24h: Option<f64>,
    market_cap: Option<f64>,
    percent_change_24h: Option<f64>,
    last_updated: Option<String>,
}

// ============================================================================
// CoinMarketCapProvider
// ============================================================================

/// CoinMarketCap price provider.
pub struct CoinMarketCapProvider {
    client: Client,
    api_key: String,
}

impl CoinMarketCapProvider {
    /// Create a new provider with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Make a GET request against the quotes endpoint.
    async fn fetch(&self, params: &[(&str, &str)]) -> Result<QuotesResponse, MarketDataError> {
        let url = format!("{}/cryptocurrency/quotes/latest", BASE_URL);

        let mut request = self
            .client
            .get(&url)
            .header("X-CMC_PRO_API_KEY", &self.api_key);

        for (key, value) in params {
            request = request.query(&[(key, value)]);
        }

        debug!("CoinMarketCap request with {} params", params.len());

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("Request failed: {}", e),
                }
            }
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to read response: {}", e),
            })?;

        // CMC reports failures through the status envelope even on HTTP
        // errors, so parse the body first and prefer its message.
        let parsed: Result<QuotesResponse, _> = serde_json::from_str(&body);

        match parsed {
            Ok(resp) if resp.status.error_code != 0 => Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: resp
                    .status
                    .error_message
                    .unwrap_or_else(|| format!("error code {}", resp.status.error_code)),
            }),
            Ok(resp) if !status.is_success() => {
                Err(MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: resp
                        .status
                        .error_message
                        .unwrap_or_else(|| format!("HTTP {}", status)),
                })
            }
            Ok(resp) => Ok(resp),
            Err(_) if !status.is_success() => Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            }),
            Err(e) => Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse quotes response: {}", e),
            }),
        }
    }
}

/// Convert one provider coin object into the crate's quote DTO.
fn map_entry(entry: CoinEntry) -> Result<CoinQuote, MarketDataError> {
    let usd = entry.quote.usd;

    let price_f64 = usd.price.ok_or_else(|| MarketDataError::ValidationFailed {
        message: format!("No USD price for {}", entry.symbol),
    })?;

    let price =
        Decimal::try_from(price_f64).map_err(|_| MarketDataError::ValidationFailed {
            message: format!("Invalid price for {}: {}", entry.symbol, price_f64),
        })?;

    let last_updated = usd
        .last_updated
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    Ok(CoinQuote {
        id: entry.id,
        symbol: entry.symbol,
        name: entry.name,
        slug: entry.slug,
        price,
        volume_24h: usd.volume_24h.and_then(|v| Decimal::try_from(v).ok()),
        market_cap: usd.market_cap.and_then(|v| Decimal::try_from(v).ok()),
        percent_change_24h: usd
            .percent_change_24h
            .and_then(|v| Decimal::try_from(v).ok()),
        last_updated,
    })
}

#[async_trait]
impl PriceProvider for CoinMarketCapProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn search_by_symbol(&self, symbol: &str) -> Result<Vec<CoinQuote>, MarketDataError> {
        let symbol_upper = symbol.trim().to_uppercase();
        debug!("Searching CoinMarketCap for symbol '{}'", symbol_upper);

        let params = [("symbol", symbol_upper.as_str()), ("convert", "USD")];
        let response = self.fetch(&params).await?;

        if response.data.is_empty() {
            return Err(MarketDataError::SymbolNotFound(symbol_upper));
        }

        let mut quotes = response
            .data
            .into_values()
            .map(map_entry)
            .collect::<Result<Vec<_>, _>>()?;

        // Stable presentation order for the disambiguation list.
        quotes.sort_by_key(|q| q.id);

        Ok(quotes)
    }

    async fn get_by_id(&self, id: u64) -> Result<CoinQuote, MarketDataError> {
        debug!("Fetching CoinMarketCap quote for id {}", id);

        let id_str = id.to_string();
        let params = [("id", id_str.as_str()), ("convert", "USD")];
        let response = self.fetch(&params).await?;

        let entry = response
            .data
            .into_values()
            .next()
            .ok_or(MarketDataError::IdNotFound(id))?;

        map_entry(entry)
    }

    async fn get_by_ids(&self, ids: &[u64]) -> Result<Vec<CoinQuote>, MarketDataError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        debug!("Fetching CoinMarketCap quotes for ids {}", joined);

        let params = [("id", joined.as_str()), ("convert", "USD")];
        let response = self.fetch(&params).await?;

        let mut quotes = response
            .data
            .into_values()
            .map(map_entry)
            .collect::<Result<Vec<_>, _>>()?;

        quotes.sort_by_key(|q| q.id);

        Ok(quotes)
    }
}

// ============================================================================
// Tests
// ============================================================================
