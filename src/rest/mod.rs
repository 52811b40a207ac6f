//! Binance REST API client.
//!
//! Provides the signed-request dispatch layer and the wallet endpoints.
//!
//! # Trait-based API
//!
//! The [`WalletClient`] trait abstracts the wallet operations, enabling:
//! - Mock implementations for testing
//! - Decorator pattern (e.g., retry or rate limiting wrappers)
//! - Alternative implementations
//!
//! ```rust,ignore
//! use binance_api_client::rest::{RestClient, WalletClient};
//! use binance_api_client::rest::wallet::DepositHistoryRequest;
//!
//! async fn pending_deposits<C: WalletClient>(client: &C) -> Result<usize, binance_api_client::BinanceError> {
//!     let deposits = client.list_deposits(&DepositHistoryRequest::new().status(0)).await?;
//!     Ok(deposits.len())
//! }
//! ```

mod client;
mod endpoints;
mod params;
mod request;
mod traits;
pub mod wallet;

pub use client::{RestClient, RestClientBuilder};
pub use endpoints::*;
pub use params::{ParamValue, ParameterSet};
pub use request::{Request, SecurityType};
pub use traits::WalletClient;

// Cancellation plumbing for [`RestClient::dispatch_abortable`].
pub use futures_util::future::{AbortHandle, AbortRegistration};
