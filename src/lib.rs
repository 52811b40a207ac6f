//! # Binance Wallet Client
//!
//! An async Rust client library for the Binance wallet REST API.
//!
//! ## Features
//!
//! - Deposit history, deposit addresses, withdrawal creation and history
//! - HMAC-SHA256 signed requests with timestamp and `recvWindow` handling
//! - Cancellable in-flight requests
//! - Strong typing for all request/response types
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use binance_api_client::rest::RestClient;
//! use binance_api_client::rest::wallet::DepositAddressRequest;
//! use binance_api_client::auth::StaticCredentials;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Arc::new(StaticCredentials::new("api_key", "api_secret"));
//!     let client = RestClient::builder().credentials(credentials).build();
//!
//!     let address = client
//!         .get_deposit_address(&DepositAddressRequest::new("BTC"))
//!         .await?;
//!     println!("Deposit address: {}", address.address);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::BinanceError;

/// Result type alias using BinanceError
pub type Result<T> = std::result::Result<T, BinanceError>;
