//! The interactive menu shell.
//!
//! One action at a time: every menu choice runs to completion (all I/O
//! awaited sequentially) before the menu is shown again. An action's
//! error is printed and the loop continues; the process only exits on
//! the Exit choice.

mod analysis;
mod journal;
mod portfolio;
mod prompt;
mod render;
mod wallets;

use std::sync::Arc;

use crate::main_lib::AppState;

struct MenuItem {
    label: &'static str,
    action: Action,
}

enum Action {
    AddCoin,
    ViewPortfolio,
    UpdatePrices,
    RemoveCoin,
    RecordTrade,
    TradeHistory,
    FullAnalysis,
    Strategies,
    RiskAssessment,
    MarketSentiment,
    AddJournalEntry,
    ViewJournalEntries,
    TradingPatterns,
    AddWallet,
    ViewWallets,
    CheckBalances,
    WalletPortfolio,
    RemoveWallet,
    Exit,
}

const GROUPS: &[(&str, &[MenuItem])] = &[
    (
        "Portfolio Management",
        &[
            MenuItem { label: "Add Coin to Portfolio", action: Action::AddCoin },
            MenuItem { label: "View Portfolio", action: Action::ViewPortfolio },
            MenuItem { label: "Update Prices", action: Action::UpdatePrices },
            MenuItem { label: "Remove Coin", action: Action::RemoveCoin },
            MenuItem { label: "Record Trade", action: Action::RecordTrade },
            MenuItem { label: "Trade History", action: Action::TradeHistory },
        ],
    ),
    (
        "AI Analysis",
        &[
            MenuItem { label: "Full Portfolio Analysis", action: Action::FullAnalysis },
            MenuItem { label: "Get Trading Strategies", action: Action::Strategies },
            MenuItem { label: "Risk Assessment", action: Action::RiskAssessment },
            MenuItem { label: "Market Sentiment", action: Action::MarketSentiment },
        ],
    ),
    (
        "Trading Journal",
        &[
            MenuItem { label: "Add Journal Entry", action: Action::AddJournalEntry },
            MenuItem { label: "View Journal Entries", action: Action::ViewJournalEntries },
            MenuItem { label: "View Trading Patterns", action: Action::TradingPatterns },
        ],
    ),
    (
        "Wallet Tracking",
        &[
            MenuItem { label: "Add Wallet", action: Action::AddWallet },
            MenuItem { label: "View Wallets", action: Action::ViewWallets },
            MenuItem { label: "Check Balances", action: Action::CheckBalances },
            MenuItem { label: "View Wallet Portfolio", action: Action::WalletPortfolio },
            MenuItem { label: "Remove Wallet", action: Action::RemoveWallet },
        ],
    ),
    (
        "System",
        &[MenuItem { label: "Exit", action: Action::Exit }],
    ),
];

fn show_menu() -> anyhow::Result<&'static Action> {
    println!("\nWhat would you like to do?");
    let mut index = 0;
    for (group, items) in GROUPS {
        println!("--- {} ---", group);
        for item in *items {
            index += 1;
            println!("  {}. {}", index, item.label);
        }
    }

    let items: Vec<&MenuItem> = GROUPS.iter().flat_map(|(_, items)| *items).collect();
    loop {
        let line = prompt::input("Choice:")?;
        if let Ok(n) = line.parse::<usize>() {
            if (1..=items.len()).contains(&n) {
                return Ok(&items[n - 1].action);
            }
        }
        println!("Please enter a number between 1 and {}.", items.len());
    }
}

pub async fn run(state: Arc<AppState>) {
    loop {
        let action = match show_menu() {
            Ok(action) => action,
            Err(e) => {
                eprintln!("Error: {}", e);
                continue;
            }
        };

        let result = match action {
            Action::AddCoin => portfolio::add_coin(&state).await,
            Action::ViewPortfolio => portfolio::view_portfolio(&state),
            Action::UpdatePrices => portfolio::update_prices(&state).await,
            Action::RemoveCoin => portfolio::remove_coin(&state).await,
            Action::RecordTrade => portfolio::record_trade(&state).await,
            Action::TradeHistory => portfolio::trade_history(&state),
            Action::FullAnalysis => analysis::full_analysis(&state).await,
            Action::Strategies => analysis::strategies(&state).await,
            Action::RiskAssessment => analysis::risk_assessment(&state).await,
            Action::MarketSentiment => analysis::market_sentiment(&state).await,
            Action::AddJournalEntry => journal::add_entry(&state).await,
            Action::ViewJournalEntries => journal::view_entries(&state),
            Action::TradingPatterns => journal::trading_patterns(&state),
            Action::AddWallet => wallets::add_wallet(&state).await,
            Action::ViewWallets => wallets::view_wallets(&state),
            Action::CheckBalances => wallets::check_balances(&state).await,
            Action::WalletPortfolio => wallets::wallet_portfolio(&state).await,
            Action::RemoveWallet => wallets::remove_wallet(&state).await,
            Action::Exit => {
                println!("Goodbye!");
                return;
            }
        };

        // Report and return to the menu; an action error never takes the
        // whole shell down.
        if let Err(e) = result {
            eprintln!("Error: {}", e);
        }
    }
}
