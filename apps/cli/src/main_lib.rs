use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use coinfolio_ai::{ChatProvider, NarrativeAnalyst, OpenAiChatProvider};
use coinfolio_chain_data::{BalanceProvider, MoralisProvider};
use coinfolio_core::journal::{JournalService, JournalServiceTrait};
use coinfolio_core::market::SnapshotRepositoryTrait;
use coinfolio_core::portfolio::{PortfolioService, PortfolioServiceTrait};
use coinfolio_core::wallets::{WalletService, WalletServiceTrait};
use coinfolio_market_data::{CoinMarketCapProvider, PriceProvider};
use coinfolio_storage_sqlite::db;
use coinfolio_storage_sqlite::holdings::HoldingRepository;
use coinfolio_storage_sqlite::journal::JournalRepository;
use coinfolio_storage_sqlite::snapshots::SnapshotRepository;
use coinfolio_storage_sqlite::trades::TradeRepository;
use coinfolio_storage_sqlite::wallets::WalletRepository;

use crate::config::Config;

/// Everything the shell needs, wired once at startup.
pub struct AppState {
    pub portfolio_service: Arc<dyn PortfolioServiceTrait>,
    pub wallet_service: Arc<dyn WalletServiceTrait>,
    pub journal_service: Arc<dyn JournalServiceTrait>,
    pub snapshots: Arc<dyn SnapshotRepositoryTrait>,
    pub price_provider: Arc<dyn PriceProvider>,
    pub analyst: NarrativeAnalyst,
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

/// Open the database, run migrations, construct the adapters and wire
/// the services. Clients are built here once and injected everywhere as
/// trait objects; nothing holds a global.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer(Arc::clone(&pool));

    let holding_repo = Arc::new(HoldingRepository::new(Arc::clone(&pool), writer.clone()));
    let trade_repo = Arc::new(TradeRepository::new(Arc::clone(&pool), writer.clone()));
    let wallet_repo = Arc::new(WalletRepository::new(Arc::clone(&pool), writer.clone()));
    let journal_repo = Arc::new(JournalRepository::new(Arc::clone(&pool), writer.clone()));
    let snapshots: Arc<dyn SnapshotRepositoryTrait> =
        Arc::new(SnapshotRepository::new(Arc::clone(&pool), writer));

    let price_provider: Arc<dyn PriceProvider> =
        Arc::new(CoinMarketCapProvider::new(config.cmc_api_key.clone()));
    let balance_provider: Arc<dyn BalanceProvider> =
        Arc::new(MoralisProvider::new(config.moralis_api_key.clone()));
    let chat_provider: Arc<dyn ChatProvider> = Arc::new(OpenAiChatProvider::new(
        config.openai_base_url.clone(),
        config.openai_api_key.clone(),
        config.openai_model.clone(),
    ));

    let portfolio_service: Arc<dyn PortfolioServiceTrait> = Arc::new(PortfolioService::new(
        holding_repo,
        trade_repo,
        Arc::clone(&price_provider),
    ));
    let wallet_service: Arc<dyn WalletServiceTrait> =
        Arc::new(WalletService::new(wallet_repo, balance_provider));
    let journal_service: Arc<dyn JournalServiceTrait> =
        Arc::new(JournalService::new(journal_repo));
    let analyst = NarrativeAnalyst::new(chat_provider);

    Ok(Arc::new(AppState {
        portfolio_service,
        wallet_service,
        journal_service,
        snapshots,
        price_provider,
        analyst,
    }))
}
