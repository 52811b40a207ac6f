//! Binance REST API endpoint constants.

/// Base URL for the Binance REST API.
pub const BINANCE_BASE_URL: &str = "https://api.binance.com";

/// Wallet endpoints (all require a signed request).
pub mod wallet {
    /// Fetch deposit history (legacy wapi envelope).
    pub const DEPOSIT_HISTORY: &str = "/wapi/v3/depositHistory.html";
    /// Fetch the deposit address for a coin.
    pub const DEPOSIT_ADDRESS: &str = "/sapi/v1/capital/deposit/address";
    /// Submit a withdrawal.
    pub const WITHDRAW: &str = "/sapi/v1/capital/withdraw/apply";
    /// Fetch withdrawal history.
    pub const WITHDRAW_HISTORY: &str = "/sapi/v1/capital/withdraw/history";
}
