//! Example: REST API trading operations
//!
//! This example demonstrates how to use the REST API for:
//! - Fetching market data (ticker, order book)
//! - Checking account balances and active orders
//! - Building an order (only submitted when BITFINEX_PLACE_ORDER=1)
//!
//! Run with: cargo run --example rest_trading
//!
//! NOTE: For private endpoints, set BITFINEX_API_KEY and BITFINEX_API_SECRET.

use bitfinex_rest::{BitfinexRestClient, Credentials, NewOrder, OrderSide, DEFAULT_SYMBOL};
use rust_decimal_macros::dec;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Bitfinex REST API Example ===\n");

    // Create client (no credentials for public endpoints)
    let client = BitfinexRestClient::new();

    // ========================================================================
    // PUBLIC ENDPOINTS - No authentication required
    // ========================================================================

    println!("--- Public Market Data ---\n");

    println!("Fetching {} ticker...", DEFAULT_SYMBOL);
    match client.ticker(DEFAULT_SYMBOL).await {
        Ok(ticker) => {
            println!("  Last Price: ${}", ticker["last_price"]);
            println!("  Best Bid:   ${}", ticker["bid"]);
            println!("  Best Ask:   ${}", ticker["ask"]);
            println!("  Volume:     {}", ticker["volume"]);
        }
        Err(e) => println!("  Error: {}", e),
    }
    println!();

    println!("Fetching {} order book...", DEFAULT_SYMBOL);
    match client.market().orderbook(DEFAULT_SYMBOL).await {
        Ok(book) => {
            for side in ["bids", "asks"] {
                println!("  Top {}:", side);
                let levels = book[side].as_array().cloned().unwrap_or_default();
                for (i, level) in levels.iter().take(3).enumerate() {
                    println!("    {}. ${} x {}", i + 1, level["price"], level["amount"]);
                }
            }
        }
        Err(e) => println!("  Error: {}", e),
    }
    println!();

    // ========================================================================
    // PRIVATE ENDPOINTS - Authentication required
    // ========================================================================

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            println!("--- Private Endpoints Skipped ({}) ---", e);
            println!("Set BITFINEX_API_KEY and BITFINEX_API_SECRET to test private endpoints.");
            println!();
            println!("Example:");
            println!("  export BITFINEX_API_KEY='your-api-key'");
            println!("  export BITFINEX_API_SECRET='your-api-secret'");
            return Ok(());
        }
    };

    println!("--- Private Account Data ---\n");
    client.set_credentials_from(credentials);

    println!("Fetching account balances...");
    match client.balances().await {
        Ok(balances) => {
            // An error payload is an object, balances are an array
            match balances.as_array() {
                Some(wallets) => {
                    for wallet in wallets {
                        println!(
                            "    {} {}: {} (available {})",
                            wallet["type"], wallet["currency"], wallet["amount"], wallet["available"]
                        );
                    }
                }
                None => println!("  Exchange answered: {}", balances),
            }
        }
        Err(e) => println!("  Error: {}", e),
    }
    println!();

    println!("Fetching active orders...");
    match client.trading().active_orders().await {
        Ok(orders) => println!("  {}", orders),
        Err(e) => println!("  Error: {}", e),
    }
    println!();

    println!("--- Order Example ---\n");

    let order = NewOrder::exchange_limit(DEFAULT_SYMBOL, OrderSide::Buy, dec!(0.001), dec!(1000));
    println!("  Symbol: {}", order.symbol);
    println!("  Type:   {}", order.order_type);
    println!("  Side:   {}", order.side);
    println!("  Amount: {}", order.amount);
    println!("  Price:  ${}", order.price);

    if env::var("BITFINEX_PLACE_ORDER").as_deref() == Ok("1") {
        match client.place_order(&order).await {
            Ok(response) => match response.get("order_id") {
                Some(id) => println!("\n  Placed order {}", id),
                None => println!("\n  Exchange answered: {}", response),
            },
            Err(e) => println!("\n  Error: {}", e),
        }
    } else {
        println!("\n  Not submitted (set BITFINEX_PLACE_ORDER=1 to submit)");
    }

    println!("\nDone!");
    Ok(())
}
