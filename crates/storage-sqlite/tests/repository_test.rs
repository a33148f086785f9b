//! Integration tests for the SQLite repositories, run against a real
//! on-disk database created from the embedded migrations.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use coinfolio_core::errors::{DatabaseError, Error};
use coinfolio_core::journal::{
    EmotionalState, EntryCategory, JournalFilters, JournalRepositoryTrait, MarketSentiment,
    NewJournalEntry, TradeDetail,
};
use coinfolio_core::market::{MarketSnapshot, SnapshotRepositoryTrait};
use coinfolio_core::portfolio::{
    Holding, HoldingRepositoryTrait, NewTrade, TradeRepositoryTrait, TradeSide,
};
use coinfolio_core::wallets::{TrackedWallet, WalletRepositoryTrait};

use coinfolio_chain_data::Chain;
use coinfolio_storage_sqlite::db;
use coinfolio_storage_sqlite::holdings::HoldingRepository;
use coinfolio_storage_sqlite::journal::JournalRepository;
use coinfolio_storage_sqlite::snapshots::SnapshotRepository;
use coinfolio_storage_sqlite::trades::TradeRepository;
use coinfolio_storage_sqlite::wallets::WalletRepository;

const SOL_ADDRESS: &str = "DYw8jCTfwHNRJhhmFcbXvVDTqWMEVFBX6ZKUmG5CNSKK";

struct Fixture {
    // Held for the lifetime of the test so the directory is not removed.
    _dir: TempDir,
    holdings: HoldingRepository,
    trades: TradeRepository,
    wallets: WalletRepository,
    journal: JournalRepository,
    snapshots: SnapshotRepository,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().expect("create temp dir");
    let db_path = dir.path().join("portfolio.db");
    let db_path = db::init(db_path.to_str().expect("utf-8 path")).expect("init db");

    let pool = db::create_pool(&db_path).expect("create pool");
    db::run_migrations(&pool).expect("run migrations");
    let writer = db::spawn_writer(Arc::clone(&pool));

    Fixture {
        _dir: dir,
        holdings: HoldingRepository::new(Arc::clone(&pool), writer.clone()),
        trades: TradeRepository::new(Arc::clone(&pool), writer.clone()),
        wallets: WalletRepository::new(Arc::clone(&pool), writer.clone()),
        journal: JournalRepository::new(Arc::clone(&pool), writer.clone()),
        snapshots: SnapshotRepository::new(pool, writer),
    }
}

fn holding(coin_id: u64, symbol: &str, entry_price: Decimal, last_price: Decimal) -> Holding {
    Holding {
        coin_id,
        symbol: symbol.to_string(),
        name: format!("{} Coin", symbol),
        entry_price,
        last_price,
        strategy: None,
        last_updated: Utc::now(),
    }
}

fn buy(coin_id: u64, quantity: Decimal, unit_price: Decimal) -> NewTrade {
    NewTrade {
        coin_id,
        side: TradeSide::Buy,
        quantity,
        unit_price,
        notes: None,
    }
}

fn sell(coin_id: u64, quantity: Decimal, unit_price: Decimal) -> NewTrade {
    NewTrade {
        coin_id,
        side: TradeSide::Sell,
        quantity,
        unit_price,
        notes: None,
    }
}

fn journal_entry(category: EntryCategory, state: EmotionalState, text: &str) -> NewJournalEntry {
    NewJournalEntry {
        category,
        coin_id: None,
        trade: None,
        emotional_state: state,
        confidence: 3,
        market_sentiment: MarketSentiment::Neutral,
        text: text.to_string(),
        lessons_learned: None,
        follow_up_needed: false,
        tags: Vec::new(),
    }
}

// --- Holdings ---

#[tokio::test(flavor = "multi_thread")]
async fn test_upsert_holding_replaces_on_duplicate_id() {
    let f = fixture();

    f.holdings
        .upsert_holding(holding(1, "BTC", dec!(10), dec!(10)))
        .await
        .unwrap();
    // Same coin id again: full replace, no error.
    let replaced = f
        .holdings
        .upsert_holding(holding(1, "BTC", dec!(12), dec!(13)))
        .await
        .unwrap();

    assert_eq!(replaced.entry_price, dec!(12));

    let rows = f.holdings.list_holdings().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].last_price, dec!(13));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_last_price_overwrites_stored_price() {
    let f = fixture();

    f.holdings
        .upsert_holding(holding(1, "BTC", dec!(10), dec!(10)))
        .await
        .unwrap();
    f.holdings.update_last_price(1, dec!(11)).await.unwrap();

    let row = f.holdings.get_holding(1).unwrap().unwrap();
    assert_eq!(row.last_price, dec!(11));
    assert_eq!(row.entry_price, dec!(10));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_missing_holding_is_noop() {
    let f = fixture();
    assert!(f.holdings.delete_holding(404).await.is_ok());
}

// --- Trades and positions ---

#[tokio::test(flavor = "multi_thread")]
async fn test_compute_holdings_is_signed_sum_of_ledger() {
    let f = fixture();

    f.holdings
        .upsert_holding(holding(1, "BTC", dec!(10), dec!(11)))
        .await
        .unwrap();
    f.trades.record_trade(buy(1, dec!(2), dec!(10))).await.unwrap();
    f.trades
        .record_trade(sell(1, dec!(0.5), dec!(12)))
        .await
        .unwrap();

    let positions = f.trades.compute_holdings().unwrap();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].quantity, dec!(1.5));
    assert_eq!(positions[0].last_price, dec!(11));
    assert_eq!(positions[0].value, dec!(16.50));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_closed_position_omitted_from_compute_holdings() {
    let f = fixture();

    f.holdings
        .upsert_holding(holding(1, "BTC", dec!(10), dec!(10)))
        .await
        .unwrap();
    f.holdings
        .upsert_holding(holding(2, "ETH", dec!(4), dec!(4)))
        .await
        .unwrap();
    f.trades.record_trade(buy(1, dec!(1), dec!(10))).await.unwrap();
    f.trades
        .record_trade(sell(1, dec!(1), dec!(12)))
        .await
        .unwrap();
    f.trades.record_trade(buy(2, dec!(3), dec!(4))).await.unwrap();

    let positions = f.trades.compute_holdings().unwrap();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].coin_id, 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_trade_history_joins_identity_newest_first() {
    let f = fixture();

    f.holdings
        .upsert_holding(holding(1, "BTC", dec!(10), dec!(10)))
        .await
        .unwrap();
    f.trades.record_trade(buy(1, dec!(2), dec!(10))).await.unwrap();
    f.trades
        .record_trade(sell(1, dec!(0.5), dec!(12)))
        .await
        .unwrap();

    let history = f.trades.trade_history().unwrap();
    assert_eq!(history.len(), 2);
    // Newest first: the sell was recorded last.
    assert_eq!(history[0].side, TradeSide::Sell);
    assert_eq!(history[0].symbol, "BTC");
    assert_eq!(history[0].total_value, dec!(6.0));
    assert!(history[0].timestamp >= history[1].timestamp);
}

// --- Wallets ---

#[tokio::test(flavor = "multi_thread")]
async fn test_duplicate_wallet_address_fails_and_keeps_existing_row() {
    let f = fixture();

    let wallet = TrackedWallet {
        address: SOL_ADDRESS.to_string(),
        chain: Chain::Solana,
        label: Some("original".to_string()),
        tracked_since: Utc::now(),
    };
    f.wallets.add_wallet(wallet.clone()).await.unwrap();

    let mut duplicate = wallet;
    duplicate.label = Some("impostor".to_string());
    let err = f.wallets.add_wallet(duplicate).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Database(DatabaseError::UniqueViolation(_))
    ));

    let rows = f.wallets.list_wallets().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].label.as_deref(), Some("original"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remove_wallet_deletes_row_and_tolerates_absence() {
    let f = fixture();

    f.wallets
        .add_wallet(TrackedWallet {
            address: SOL_ADDRESS.to_string(),
            chain: Chain::Solana,
            label: None,
            tracked_since: Utc::now(),
        })
        .await
        .unwrap();

    f.wallets.remove_wallet(SOL_ADDRESS).await.unwrap();
    assert!(f.wallets.list_wallets().unwrap().is_empty());

    // Removing again is a no-op.
    assert!(f.wallets.remove_wallet(SOL_ADDRESS).await.is_ok());
}

// --- Journal ---

#[tokio::test(flavor = "multi_thread")]
async fn test_journal_filters_compose_conjunctively_ordered_desc() {
    let f = fixture();

    let mut trade_entry = journal_entry(
        EntryCategory::Trade,
        EmotionalState::Confident,
        "Scaled into the position.",
    );
    trade_entry.coin_id = Some(1);
    trade_entry.trade = Some(TradeDetail {
        side: TradeSide::Buy,
        amount: dec!(0.5),
        price: dec!(64000),
    });
    trade_entry.tags = vec!["breakout".to_string()];
    f.journal.add_entry(trade_entry).await.unwrap();

    f.journal
        .add_entry(journal_entry(
            EntryCategory::Reflection,
            EmotionalState::Neutral,
            "Weekly review.",
        ))
        .await
        .unwrap();

    // Single filter.
    let trades = f
        .journal
        .query_entries(&JournalFilters::category(EntryCategory::Trade))
        .unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].tags, vec!["breakout".to_string()]);
    assert_eq!(trades[0].trade.as_ref().unwrap().amount, dec!(0.5));

    // Two filters narrow conjunctively.
    let mut filters = JournalFilters::category(EntryCategory::Trade);
    filters.emotional_state = Some(EmotionalState::Fearful);
    assert!(f.journal.query_entries(&filters).unwrap().is_empty());

    // Date window filter plus ordering.
    let all = f
        .journal
        .query_entries(&JournalFilters::since(Utc::now() - chrono::Duration::hours(1)))
        .unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[0].timestamp >= all[1].timestamp);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_follow_ups_listed_newest_first() {
    let f = fixture();

    let mut flagged = journal_entry(
        EntryCategory::Strategy,
        EmotionalState::Nervous,
        "Revisit stop-loss levels.",
    );
    flagged.follow_up_needed = true;
    f.journal.add_entry(flagged).await.unwrap();

    f.journal
        .add_entry(journal_entry(
            EntryCategory::Analysis,
            EmotionalState::Neutral,
            "Nothing actionable.",
        ))
        .await
        .unwrap();

    let follow_ups = f.journal.list_follow_ups().unwrap();
    assert_eq!(follow_ups.len(), 1);
    assert!(follow_ups[0].follow_up_needed);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_emotional_patterns_rollup() {
    let f = fixture();

    for _ in 0..2 {
        let mut entry = journal_entry(
            EntryCategory::Trade,
            EmotionalState::Excited,
            "Chased the pump.",
        );
        entry.confidence = 5;
        entry.trade = Some(TradeDetail {
            side: TradeSide::Buy,
            amount: dec!(1),
            price: dec!(100),
        });
        f.journal.add_entry(entry).await.unwrap();
    }
    let mut calm_sell = journal_entry(
        EntryCategory::Trade,
        EmotionalState::Neutral,
        "Took profit per plan.",
    );
    calm_sell.trade = Some(TradeDetail {
        side: TradeSide::Sell,
        amount: dec!(1),
        price: dec!(120),
    });
    f.journal.add_entry(calm_sell).await.unwrap();

    let patterns = f.journal.emotional_patterns().unwrap();
    assert_eq!(patterns.len(), 2);

    let excited = patterns
        .iter()
        .find(|p| p.emotional_state == EmotionalState::Excited)
        .unwrap();
    assert_eq!(excited.count, 2);
    assert_eq!(excited.buy_ratio, Some(1.0));
    assert_eq!(excited.avg_confidence, 5.0);

    let neutral = patterns
        .iter()
        .find(|p| p.emotional_state == EmotionalState::Neutral)
        .unwrap();
    assert_eq!(neutral.buy_ratio, Some(0.0));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_strategic_insights_rollup_covers_trades_only() {
    let f = fixture();

    let mut bullish = journal_entry(
        EntryCategory::Trade,
        EmotionalState::Confident,
        "Momentum entry.",
    );
    bullish.market_sentiment = MarketSentiment::Bullish;
    bullish.confidence = 4;
    bullish.trade = Some(TradeDetail {
        side: TradeSide::Buy,
        amount: dec!(1),
        price: dec!(100),
    });
    bullish.tags = vec!["momentum".to_string(), "btc".to_string()];
    f.journal.add_entry(bullish).await.unwrap();

    // Non-trade entries stay out of the rollup.
    f.journal
        .add_entry(journal_entry(
            EntryCategory::Analysis,
            EmotionalState::Neutral,
            "Macro notes.",
        ))
        .await
        .unwrap();

    let insights = f.journal.strategic_insights().unwrap();
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].market_sentiment, MarketSentiment::Bullish);
    assert_eq!(insights[0].count, 1);
    assert_eq!(insights[0].avg_confidence, 4.0);
    assert_eq!(insights[0].common_tags.as_deref(), Some("momentum, btc"));
}

// --- Snapshots ---

#[tokio::test(flavor = "multi_thread")]
async fn test_latest_snapshot_returns_most_recent_row() {
    let f = fixture();

    assert!(f.snapshots.latest_snapshot().unwrap().is_none());

    f.snapshots
        .record_snapshot(MarketSnapshot {
            total_market_cap: dec!(2100000000000),
            btc_dominance: dec!(52.1),
            sentiment: "fear".to_string(),
            timestamp: Utc::now() - chrono::Duration::hours(2),
        })
        .await
        .unwrap();
    f.snapshots
        .record_snapshot(MarketSnapshot {
            total_market_cap: dec!(2200000000000),
            btc_dominance: dec!(53.4),
            sentiment: "greed".to_string(),
            timestamp: Utc::now(),
        })
        .await
        .unwrap();

    let latest = f.snapshots.latest_snapshot().unwrap().unwrap();
    assert_eq!(latest.sentiment, "greed");
    assert_eq!(latest.btc_dominance, dec!(53.4));
}
