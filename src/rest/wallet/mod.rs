//! Wallet endpoints: deposit history, deposit addresses, withdrawals.
//!
//! All wallet endpoints are signed. Each method builds a parameter set from
//! its typed request, hands a request descriptor to the dispatcher, and
//! decodes the response into typed records.

mod types;

pub use types::*;

use reqwest::Method;

use crate::error::{ApiError, BinanceError, error_codes};
use crate::rest::RestClient;
use crate::rest::endpoints::wallet::{
    DEPOSIT_ADDRESS, DEPOSIT_HISTORY, WITHDRAW, WITHDRAW_HISTORY,
};
use crate::rest::request::{Request, SecurityType};

impl RestClient {
    /// Fetch deposit history.
    ///
    /// Setting `start_time` requires `end_time` and vice versa; a half-open
    /// range fails with [`BinanceError::InvalidRequest`] before any network
    /// call.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use binance_api_client::rest::RestClient;
    /// use binance_api_client::rest::wallet::DepositHistoryRequest;
    /// use binance_api_client::auth::StaticCredentials;
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let credentials = Arc::new(StaticCredentials::new("key", "secret"));
    ///     let client = RestClient::builder().credentials(credentials).build();
    ///
    ///     let deposits = client
    ///         .list_deposits(&DepositHistoryRequest::new().asset("ETH").status(1))
    ///         .await?;
    ///     for deposit in deposits {
    ///         println!("{} {} at {}", deposit.amount, deposit.asset, deposit.insert_time);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn list_deposits(
        &self,
        request: &DepositHistoryRequest,
    ) -> Result<Vec<Deposit>, BinanceError> {
        let params = request.params()?;
        let descriptor =
            Request::new(Method::GET, DEPOSIT_HISTORY, SecurityType::Signed).with_params(params);
        let response: DepositHistoryResponse = self.dispatch(descriptor).await?;
        if !response.success {
            let message = response
                .msg
                .unwrap_or_else(|| "deposit history request failed".to_string());
            return Err(BinanceError::Api(ApiError::new(error_codes::UNKNOWN, message)));
        }
        Ok(response.deposits)
    }

    /// Fetch the deposit address for a coin.
    pub async fn get_deposit_address(
        &self,
        request: &DepositAddressRequest,
    ) -> Result<DepositAddress, BinanceError> {
        let descriptor = Request::new(Method::GET, DEPOSIT_ADDRESS, SecurityType::Signed)
            .with_params(request.params());
        self.dispatch(descriptor).await
    }

    /// Submit a withdrawal.
    ///
    /// Returns the exchange-assigned withdrawal ID on acceptance. Rejections
    /// (insufficient balance, invalid address, missing tag for coins that
    /// require one) surface as [`BinanceError::Api`].
    pub async fn create_withdraw(
        &self,
        request: &CreateWithdrawRequest,
    ) -> Result<WithdrawResponse, BinanceError> {
        let descriptor = Request::new(Method::POST, WITHDRAW, SecurityType::Signed)
            .with_params(request.params());
        self.dispatch(descriptor).await
    }

    /// Fetch withdrawal history.
    ///
    /// Setting `start_time` requires `end_time` and vice versa; a half-open
    /// range fails with [`BinanceError::InvalidRequest`] before any network
    /// call.
    pub async fn list_withdraws(
        &self,
        request: &WithdrawHistoryRequest,
    ) -> Result<Vec<Withdraw>, BinanceError> {
        let params = request.params()?;
        let descriptor =
            Request::new(Method::GET, WITHDRAW_HISTORY, SecurityType::Signed).with_params(params);
        self.dispatch(descriptor).await
    }
}
