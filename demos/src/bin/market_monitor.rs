//! Demo 1: Market Monitor
//!
//! Showcases: Public market data (ticker, today, symbols), no credentials
//!
//! Run: cargo run --bin market_monitor [symbol ...]

use bitfinex_rest::BitfinexRestClient;
use colored::*;
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Duration;

const DEFAULT_SYMBOLS: [&str; 3] = ["btcusd", "ethusd", "ltcusd"];
const ROUNDS: usize = 5;

fn decimal(value: &Value) -> Option<Decimal> {
    value.as_str().and_then(|s| s.parse().ok())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(70).cyan());
    println!("{}", "  MARKET MONITOR".cyan().bold());
    println!("{}", "  Bitfinex REST Demo - Public Endpoints".cyan());
    println!("{}", "═".repeat(70).cyan());
    println!();

    let mut symbols: Vec<String> = std::env::args().skip(1).collect();
    if symbols.is_empty() {
        symbols = DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect();
    }

    let client = BitfinexRestClient::new();

    let known = client.market().symbols().await?;
    let known: Vec<&str> = known
        .as_array()
        .map(|list| list.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    println!("{} {} symbols listed\n", "✓".green(), known.len());

    for symbol in &symbols {
        if !known.is_empty() && !known.contains(&symbol.as_str()) {
            println!("{} {} is not a listed symbol", "!".yellow(), symbol);
        }
    }

    println!(
        "  {:<10} {:>12} {:>12} {:>12} {:>10}",
        "SYMBOL".white().bold(),
        "BID".white().bold(),
        "ASK".white().bold(),
        "LAST".white().bold(),
        "SPREAD bps".white().bold()
    );
    println!("  {}", "─".repeat(60));

    for round in 0..ROUNDS {
        for symbol in &symbols {
            let ticker = match client.ticker(symbol).await {
                Ok(ticker) => ticker,
                Err(e) => {
                    println!("  {:<10} {}", symbol.cyan(), e.to_string().red());
                    continue;
                }
            };

            // Exchange errors come back as {"message": ...}
            if let Some(message) = ticker.get("message") {
                println!("  {:<10} {}", symbol.cyan(), message.to_string().red());
                continue;
            }

            let bid = decimal(&ticker["bid"]).unwrap_or_default();
            let ask = decimal(&ticker["ask"]).unwrap_or_default();
            let last = decimal(&ticker["last_price"]).unwrap_or_default();
            let mid = (bid + ask) / Decimal::TWO;
            let spread_bps = if mid.is_zero() {
                Decimal::ZERO
            } else {
                (ask - bid) / mid * Decimal::from(10_000)
            };

            println!(
                "  {:<10} {:>12} {:>12} {:>12} {:>10}",
                symbol.cyan(),
                bid.to_string().green(),
                ask.to_string().red(),
                last,
                format!("{:.2}", spread_bps).yellow()
            );
        }

        if round + 1 < ROUNDS {
            tokio::time::sleep(Duration::from_secs(2)).await;
            println!("  {}", "─".repeat(60).dimmed());
        }
    }

    println!();
    for symbol in &symbols {
        if let Ok(today) = client.market().today(symbol).await {
            println!(
                "  {} today: low {} high {} volume {}",
                symbol.cyan(),
                today["low"],
                today["high"],
                today["volume"]
            );
        }
    }

    println!("\n{} Demo complete.", "✓".green());
    Ok(())
}
