//! Common types used across the Binance client library.

pub mod serde_helpers;
