//! Wallet tracking actions.

use std::sync::Arc;

use coinfolio_chain_data::{Chain, TokenBalance};
use coinfolio_core::wallets::{NewWallet, TrackedWallet};

use super::{prompt, render};
use crate::main_lib::AppState;

/// Select one tracked wallet, or report when there are none.
fn select_wallet<'a>(
    wallets: &'a [TrackedWallet],
    message: &str,
) -> anyhow::Result<Option<&'a TrackedWallet>> {
    if wallets.is_empty() {
        println!("\nNo wallets being tracked.");
        return Ok(None);
    }

    let labels: Vec<String> = wallets
        .iter()
        .map(|w| format!("{} ({})", w.display_name(), w.chain))
        .collect();
    let index = prompt::select(message, &labels)?;
    Ok(Some(&wallets[index]))
}

fn print_tokens(tokens: &[TokenBalance]) {
    if tokens.is_empty() {
        println!("\nNo token balances found.");
        return;
    }

    println!("\nToken Balances:");
    let rows: Vec<Vec<String>> = tokens
        .iter()
        .map(|t| {
            vec![
                t.symbol.clone().unwrap_or_else(|| "Unknown".to_string()),
                t.amount.to_string(),
                t.token_id.clone(),
            ]
        })
        .collect();
    render::print_table(&["Symbol", "Amount", "Token Address"], &rows);
}

pub async fn add_wallet(state: &Arc<AppState>) -> anyhow::Result<()> {
    let address = prompt::input("Enter wallet address:")?;

    let chains: Vec<String> = Chain::all().iter().map(|c| c.to_string()).collect();
    let chain = Chain::all()[prompt::select("Select chain:", &chains)?];

    let label = prompt::input_optional("Enter a label for this wallet (optional):")?;

    state
        .wallet_service
        .add_wallet(NewWallet {
            address,
            chain,
            label,
        })
        .await?;

    println!("Wallet added successfully!");
    Ok(())
}

pub fn view_wallets(state: &Arc<AppState>) -> anyhow::Result<()> {
    let wallets = state.wallet_service.list_wallets()?;

    if wallets.is_empty() {
        println!("\nNo wallets being tracked.");
        return Ok(());
    }

    println!("\nTracked Wallets:");
    let rows: Vec<Vec<String>> = wallets
        .iter()
        .map(|w| {
            vec![
                w.label.clone().unwrap_or_else(|| "-".to_string()),
                w.address.clone(),
                w.chain.to_string(),
                w.tracked_since.format("%Y-%m-%d %H:%M").to_string(),
            ]
        })
        .collect();
    render::print_table(&["Label", "Address", "Chain", "Tracked Since"], &rows);
    Ok(())
}

pub async fn check_balances(state: &Arc<AppState>) -> anyhow::Result<()> {
    let wallets = state.wallet_service.list_wallets()?;
    let Some(wallet) = select_wallet(&wallets, "Select wallet to check:")? else {
        return Ok(());
    };

    println!("\nFetching balances...");
    let (native, tokens) = state
        .wallet_service
        .check_balances(wallet.chain, &wallet.address)
        .await?;

    println!(
        "\n{} Balance: {} {}",
        wallet.chain.native_symbol(),
        native,
        wallet.chain.native_symbol()
    );
    print_tokens(&tokens);
    Ok(())
}

pub async fn wallet_portfolio(state: &Arc<AppState>) -> anyhow::Result<()> {
    let wallets = state.wallet_service.list_wallets()?;
    let Some(wallet) = select_wallet(&wallets, "Select wallet:")? else {
        return Ok(());
    };

    println!("\nFetching portfolio...");
    let portfolio = state
        .wallet_service
        .wallet_portfolio(wallet.chain, &wallet.address)
        .await?;

    println!("\nPortfolio Summary for {}:", wallet.display_name());
    println!(
        "Native: {} {}",
        portfolio.native_balance,
        portfolio.chain.native_symbol()
    );
    print_tokens(&portfolio.tokens);
    Ok(())
}

pub async fn remove_wallet(state: &Arc<AppState>) -> anyhow::Result<()> {
    let wallets = state.wallet_service.list_wallets()?;
    let Some(wallet) = select_wallet(&wallets, "Select wallet to remove:")? else {
        return Ok(());
    };

    state.wallet_service.remove_wallet(&wallet.address).await?;
    println!("Wallet removed successfully!");
    Ok(())
}
