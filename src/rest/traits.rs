//! Trait definition for the wallet REST API client.
//!
//! This module provides the `WalletClient` trait which abstracts the wallet
//! operations. This enables:
//! - Mock implementations for testing
//! - Decorator pattern (e.g., rate limiting or retry wrappers)
//! - Alternative implementations

use std::future::Future;

use crate::error::BinanceError;
use crate::rest::RestClient;
use crate::rest::wallet::{
    CreateWithdrawRequest, Deposit, DepositAddress, DepositAddressRequest, DepositHistoryRequest,
    Withdraw, WithdrawHistoryRequest, WithdrawResponse,
};

/// Trait defining the wallet REST API operations.
///
/// All methods are async and return `Result<T, BinanceError>`.
pub trait WalletClient: Send + Sync {
    /// Fetch deposit history.
    fn list_deposits(
        &self,
        request: &DepositHistoryRequest,
    ) -> impl Future<Output = Result<Vec<Deposit>, BinanceError>> + Send;

    /// Fetch the deposit address for a coin.
    fn get_deposit_address(
        &self,
        request: &DepositAddressRequest,
    ) -> impl Future<Output = Result<DepositAddress, BinanceError>> + Send;

    /// Submit a withdrawal.
    fn create_withdraw(
        &self,
        request: &CreateWithdrawRequest,
    ) -> impl Future<Output = Result<WithdrawResponse, BinanceError>> + Send;

    /// Fetch withdrawal history.
    fn list_withdraws(
        &self,
        request: &WithdrawHistoryRequest,
    ) -> impl Future<Output = Result<Vec<Withdraw>, BinanceError>> + Send;
}

impl WalletClient for RestClient {
    async fn list_deposits(
        &self,
        request: &DepositHistoryRequest,
    ) -> Result<Vec<Deposit>, BinanceError> {
        RestClient::list_deposits(self, request).await
    }

    async fn get_deposit_address(
        &self,
        request: &DepositAddressRequest,
    ) -> Result<DepositAddress, BinanceError> {
        RestClient::get_deposit_address(self, request).await
    }

    async fn create_withdraw(
        &self,
        request: &CreateWithdrawRequest,
    ) -> Result<WithdrawResponse, BinanceError> {
        RestClient::create_withdraw(self, request).await
    }

    async fn list_withdraws(
        &self,
        request: &WithdrawHistoryRequest,
    ) -> Result<Vec<Withdraw>, BinanceError> {
        RestClient::list_withdraws(self, request).await
    }
}
