//! Demo 2: Account Overview
//!
//! Showcases: Signed requests (balances, orders, positions, offers, fees)
//!
//! Run: BITFINEX_API_KEY=... BITFINEX_API_SECRET=... cargo run --bin account_overview

use bitfinex_rest::{BitfinexRestClient, Credentials, PastTradesQuery, RestResult};
use colored::*;
use serde_json::Value;

fn section(title: &str, result: RestResult<Value>) {
    println!("{}", title.white().bold());
    match result {
        Ok(Value::Array(items)) if items.is_empty() => println!("  {}", "(none)".dimmed()),
        Ok(Value::Array(items)) => {
            for item in items.iter().take(10) {
                println!("  {}", item);
            }
            if items.len() > 10 {
                println!("  {} more", items.len() - 10);
            }
        }
        // Exchange-side errors are plain bodies too
        Ok(other) => println!("  {}", other.to_string().yellow()),
        Err(e) => println!("  {}", e.to_string().red()),
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(70).cyan());
    println!("{}", "  ACCOUNT OVERVIEW".cyan().bold());
    println!("{}", "  Bitfinex REST Demo - Authenticated Endpoints".cyan());
    println!("{}", "═".repeat(70).cyan());
    println!();

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e);
            eprintln!("  export BITFINEX_API_KEY='your-api-key'");
            eprintln!("  export BITFINEX_API_SECRET='your-api-secret'");
            std::process::exit(1);
        }
    };

    println!("{} Using {:?}\n", "✓".green(), credentials);
    let client = BitfinexRestClient::with_credentials(credentials);

    section("Balances", client.balances().await);
    section("Active orders", client.trading().active_orders().await);
    section("Active positions", client.trading().active_positions().await);
    section("Active offers", client.funding().active_offers().await);
    section(
        "Recent trades (btcusd)",
        client.account().past_trades(&PastTradesQuery::default()).await,
    );
    section("Account fees", client.account().account_fees().await);

    client.clear_credentials();
    println!("{} Credentials cleared.", "✓".green());
    Ok(())
}
