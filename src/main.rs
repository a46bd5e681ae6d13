//! Command-line console for operating the auction contract.
//!
//! This binary is the presentation layer: it wires the client components
//! together from environment configuration, maps subcommands onto
//! coordinator operations and renders the returned result objects.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ethers::utils::to_checksum;
use gavel::client::{
    AccountRegistry, AuctionCoordinator, AuctionGateway, AuctionStateReader, ClientConfig,
    HttpNodeClient, NodeClient, TransactionExecutor,
};
use gavel::types::format_eth;
use gavel::{OperationOutcome, Severity, SnapshotView, WinnerInfo};
use std::sync::Arc;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "gavel")]
#[command(about = "Operator console for the on-chain auction contract")]
struct Cli {
    /// Render results as JSON instead of human-readable lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List imported signing accounts (the first one is the default)
    Accounts,
    /// Refresh and display the current auction state
    Status {
        /// Account to evaluate end-auction eligibility for
        #[arg(long)]
        from: Option<String>,
    },
    /// Place a bid
    Bid {
        /// Bidder display name registered with the bid
        #[arg(long)]
        name: String,
        /// Bid amount in ether, e.g. "1.5"
        #[arg(long)]
        amount: String,
        /// Sending account address; defaults to the first imported account
        #[arg(long)]
        from: Option<String>,
    },
    /// End the auction (owner only; the contract enforces this)
    End {
        /// Sending account address; defaults to the first imported account
        #[arg(long)]
        from: Option<String>,
    },
    /// Display winner information for an ended auction
    Winner,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;

    let node: Arc<dyn NodeClient> = Arc::new(HttpNodeClient::connect(&config.rpc_url)?);
    let chain_id = node
        .chain_id()
        .await
        .context("failed to query the chain id")?;
    info!("Connected to {} (chain id {})", config.rpc_url, chain_id);

    let registry = AccountRegistry::import_all(&config.private_keys);
    info!("Imported {} signing account(s)", registry.len());

    let gateway = Arc::new(AuctionGateway::new(node.clone(), config.contract_address)?);
    let executor = TransactionExecutor::new(node, chain_id);
    let reader = AuctionStateReader::new(gateway.clone());
    let mut coordinator = AuctionCoordinator::new(registry, gateway, executor, reader);

    match cli.command {
        Commands::Accounts => {
            if cli.json {
                let addresses: Vec<String> = coordinator
                    .registry()
                    .identities()
                    .iter()
                    .map(|identity| identity.checksummed())
                    .collect();
                println!("{}", serde_json::to_string_pretty(&addresses)?);
            } else if coordinator.registry().is_empty() {
                println!("no accounts imported; set AUCTION_PRIVATE_KEYS");
            } else {
                for (index, identity) in coordinator.registry().identities().iter().enumerate() {
                    let marker = if index == 0 { " (default)" } else { "" };
                    println!("{}{}", identity.checksummed(), marker);
                }
            }
        }
        Commands::Status { from } => {
            let view = coordinator.refresh().await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                render_view(&view);
                let from = resolve_from(&coordinator, from);
                if coordinator.end_auction_eligible(from.as_deref()) {
                    println!("note: the selected account owns the auction and may end it");
                } else {
                    println!("note: the selected account cannot end the auction");
                }
            }
        }
        Commands::Bid { name, amount, from } => {
            let from = resolve_from(&coordinator, from).unwrap_or_default();
            let outcome = coordinator.place_bid(&from, &name, &amount).await;
            render_outcome(&outcome, cli.json)?;
        }
        Commands::End { from } => {
            let from = resolve_from(&coordinator, from).unwrap_or_default();
            let outcome = coordinator.end_auction(&from).await;
            render_outcome(&outcome, cli.json)?;
        }
        Commands::Winner => {
            let winner = coordinator.fetch_winner().await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&winner)?);
            } else {
                render_winner(&winner);
            }
        }
    }

    Ok(())
}

/// Explicit `--from` wins; otherwise fall back to the default account.
fn resolve_from(coordinator: &AuctionCoordinator, from: Option<String>) -> Option<String> {
    from.or_else(|| {
        coordinator
            .registry()
            .default_identity()
            .map(|identity| identity.checksummed())
    })
}

fn render_outcome(outcome: &OperationOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }
    let prefix = match outcome.severity {
        Severity::Success => "ok",
        Severity::Error => "error",
        Severity::Info => "note",
    };
    println!("{}: {}", prefix, outcome.message);
    Ok(())
}

fn render_view(view: &SnapshotView) {
    match view {
        SnapshotView::Ready(snapshot) => {
            println!(
                "auction active:  {}",
                if snapshot.is_active { "yes" } else { "no" }
            );
            println!("highest bid:     {} ETH", snapshot.highest_bid_eth());
            println!("bidder name:     {}", snapshot.highest_bidder_name);
            println!(
                "highest bidder:  {}",
                to_checksum(&snapshot.highest_bidder, None)
            );
            println!("contract owner:  {}", to_checksum(&snapshot.owner, None));
        }
        SnapshotView::Unavailable { reason } => {
            println!("error: auction state unavailable: {}", reason);
        }
    }
}

fn render_winner(winner: &WinnerInfo) {
    match winner {
        WinnerInfo::InProgress => {
            println!("note: the auction is still in progress - no winner yet");
        }
        WinnerInfo::Unavailable => {
            println!("error: winner information could not be retrieved");
        }
        WinnerInfo::Decided {
            name,
            amount_wei,
            address,
        } => {
            println!("winner:  {}", name);
            println!("amount:  {} ETH", format_eth(*amount_wei));
            println!("address: {}", to_checksum(address, None));
        }
    }
}
