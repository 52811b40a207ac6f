//! Types for the wallet endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_with::{TimestampMilliSeconds, serde_as};
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::error::BinanceError;
use crate::rest::params::ParameterSet;
use crate::types::serde_helpers::{empty_string_as_none, space_separated_datetime};

/// Request for deposit history.
///
/// All fields are optional; only fields explicitly set appear in the request.
#[derive(Debug, Clone, Default)]
pub struct DepositHistoryRequest {
    /// Asset (e.g., "BTC", "ETH").
    pub asset: Option<String>,
    /// Deposit status filter (0: pending, 6: credited but cannot withdraw, 1: success).
    pub status: Option<i32>,
    /// Start time in milliseconds since epoch.
    pub start_time: Option<i64>,
    /// End time in milliseconds since epoch.
    pub end_time: Option<i64>,
}

impl DepositHistoryRequest {
    /// Create an empty deposit history request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by asset.
    pub fn asset(mut self, asset: impl Into<String>) -> Self {
        self.asset = Some(asset.into());
        self
    }

    /// Filter by deposit status.
    pub fn status(mut self, status: i32) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the start time. Requires `end_time` to be set as well; the window
    /// must span at most 90 days.
    pub fn start_time(mut self, start_time: i64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Set the end time. Requires `start_time` to be set as well.
    pub fn end_time(mut self, end_time: i64) -> Self {
        self.end_time = Some(end_time);
        self
    }

    pub(crate) fn params(&self) -> Result<ParameterSet, BinanceError> {
        check_time_range(self.start_time, self.end_time)?;
        let mut params = ParameterSet::new();
        params.set_if_present("asset", self.asset.clone());
        params.set_if_present("status", self.status);
        params.set_if_present("startTime", self.start_time);
        params.set_if_present("endTime", self.end_time);
        Ok(params)
    }
}

/// Request for the deposit address of a coin.
#[derive(Debug, Clone)]
pub struct DepositAddressRequest {
    /// Coin (mandatory).
    pub coin: String,
    /// Network. When unset, the exchange returns the default network address.
    pub network: Option<String>,
}

impl DepositAddressRequest {
    /// Create a deposit address request for a coin.
    pub fn new(coin: impl Into<String>) -> Self {
        Self {
            coin: coin.into(),
            network: None,
        }
    }

    /// Select a specific network.
    pub fn network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }

    pub(crate) fn params(&self) -> ParameterSet {
        let mut params = ParameterSet::new();
        params.set("coin", self.coin.clone());
        params.set_if_present("network", self.network.clone());
        params
    }
}

/// Request to submit a withdrawal.
///
/// Whether `address_tag` is required, optional, or forbidden depends on the
/// coin; that is exchange policy and is not validated client-side.
#[derive(Debug, Clone)]
pub struct CreateWithdrawRequest {
    /// Coin (mandatory).
    pub coin: String,
    /// Destination address (mandatory).
    pub address: String,
    /// Amount to withdraw (mandatory).
    pub amount: Decimal,
    /// Client-supplied withdrawal ID.
    pub withdraw_order_id: Option<String>,
    /// Network to withdraw over.
    pub network: Option<String>,
    /// Secondary address identifier (memo/tag) for coins that use one.
    pub address_tag: Option<String>,
    /// When true, the transaction fee is deducted from the remaining balance
    /// instead of the withdrawn amount.
    pub transaction_fee_flag: Option<bool>,
    /// Description of the address, stored in the exchange's address book.
    pub name: Option<String>,
}

impl CreateWithdrawRequest {
    /// Create a withdrawal request.
    pub fn new(coin: impl Into<String>, address: impl Into<String>, amount: Decimal) -> Self {
        Self {
            coin: coin.into(),
            address: address.into(),
            amount,
            withdraw_order_id: None,
            network: None,
            address_tag: None,
            transaction_fee_flag: None,
            name: None,
        }
    }

    /// Set a client-supplied withdrawal ID.
    pub fn withdraw_order_id(mut self, id: impl Into<String>) -> Self {
        self.withdraw_order_id = Some(id.into());
        self
    }

    /// Select the withdrawal network.
    pub fn network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }

    /// Set the secondary address identifier (memo/tag).
    pub fn address_tag(mut self, tag: impl Into<String>) -> Self {
        self.address_tag = Some(tag.into());
        self
    }

    /// Deduct the transaction fee from the remaining balance.
    pub fn transaction_fee_flag(mut self, flag: bool) -> Self {
        self.transaction_fee_flag = Some(flag);
        self
    }

    /// Set an address-book description for the destination address.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub(crate) fn params(&self) -> ParameterSet {
        let mut params = ParameterSet::new();
        params.set("coin", self.coin.clone());
        params.set_if_present("withdrawOrderId", self.withdraw_order_id.clone());
        params.set_if_present("network", self.network.clone());
        params.set("address", self.address.clone());
        params.set_if_present("addressTag", self.address_tag.clone());
        params.set("amount", self.amount);
        params.set_if_present("transactionFeeFlag", self.transaction_fee_flag);
        params.set_if_present("name", self.name.clone());
        params
    }
}

/// Request for withdrawal history.
#[derive(Debug, Clone, Default)]
pub struct WithdrawHistoryRequest {
    /// Coin (e.g., "BTC", "ETH").
    pub coin: Option<String>,
    /// Client-supplied withdrawal ID to filter by.
    pub withdraw_order_id: Option<String>,
    /// Withdrawal status filter (see [`Withdraw::status`]).
    pub status: Option<i32>,
    /// Start time in milliseconds since epoch.
    pub start_time: Option<i64>,
    /// End time in milliseconds since epoch.
    pub end_time: Option<i64>,
    /// Result offset for pagination.
    pub offset: Option<i32>,
    /// Maximum number of records to return.
    pub limit: Option<i32>,
}

impl WithdrawHistoryRequest {
    /// Create an empty withdrawal history request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by coin.
    pub fn coin(mut self, coin: impl Into<String>) -> Self {
        self.coin = Some(coin.into());
        self
    }

    /// Filter by client-supplied withdrawal ID.
    pub fn withdraw_order_id(mut self, id: impl Into<String>) -> Self {
        self.withdraw_order_id = Some(id.into());
        self
    }

    /// Filter by withdrawal status.
    pub fn status(mut self, status: i32) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the start time. Requires `end_time` to be set as well.
    pub fn start_time(mut self, start_time: i64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Set the end time. Requires `start_time` to be set as well.
    pub fn end_time(mut self, end_time: i64) -> Self {
        self.end_time = Some(end_time);
        self
    }

    /// Set the result offset.
    pub fn offset(mut self, offset: i32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the maximum number of records.
    pub fn limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub(crate) fn params(&self) -> Result<ParameterSet, BinanceError> {
        check_time_range(self.start_time, self.end_time)?;
        let mut params = ParameterSet::new();
        params.set_if_present("coin", self.coin.clone());
        params.set_if_present("withdrawOrderId", self.withdraw_order_id.clone());
        params.set_if_present("status", self.status);
        params.set_if_present("startTime", self.start_time);
        params.set_if_present("endTime", self.end_time);
        params.set_if_present("offset", self.offset);
        params.set_if_present("limit", self.limit);
        Ok(params)
    }
}

/// The exchange requires the time filters as a pair.
fn check_time_range(start: Option<i64>, end: Option<i64>) -> Result<(), BinanceError> {
    if start.is_some() != end.is_some() {
        return Err(BinanceError::InvalidRequest(
            "startTime and endTime must be provided together".to_string(),
        ));
    }
    Ok(())
}

/// A single deposit entry.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct Deposit {
    /// Time the deposit was credited.
    #[serde(rename = "insertTime")]
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub insert_time: OffsetDateTime,
    /// Deposited amount, exact as reported.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    /// Asset name.
    pub asset: String,
    /// Deposit address.
    pub address: String,
    /// Secondary address identifier, when the asset uses one.
    #[serde(
        rename = "addressTag",
        deserialize_with = "empty_string_as_none::deserialize",
        default
    )]
    pub address_tag: Option<String>,
    /// On-chain transaction ID.
    #[serde(rename = "txId")]
    pub tx_id: String,
    /// Status (0: pending, 6: credited but cannot withdraw, 1: success).
    pub status: i32,
}

/// Envelope for the legacy deposit history endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct DepositHistoryResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(rename = "depositList", default)]
    pub deposits: Vec<Deposit>,
    #[serde(default)]
    pub msg: Option<String>,
}

/// A deposit address for a coin.
#[derive(Debug, Clone, Deserialize)]
pub struct DepositAddress {
    /// Coin name.
    pub coin: String,
    /// Deposit address.
    pub address: String,
    /// Secondary address identifier, when the coin uses one.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub tag: Option<String>,
    /// Block explorer URL for the address.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub url: Option<String>,
}

/// Response from submitting a withdrawal.
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawResponse {
    /// Exchange-assigned withdrawal ID.
    pub id: String,
}

/// A single withdrawal entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Withdraw {
    /// Exchange-assigned withdrawal ID.
    pub id: String,
    /// Client-supplied withdrawal ID, when one was given.
    #[serde(
        rename = "withdrawOrderId",
        alias = "withdrawOrderID",
        deserialize_with = "empty_string_as_none::deserialize",
        default
    )]
    pub withdraw_order_id: Option<String>,
    /// Withdrawn amount, exact as reported.
    pub amount: Decimal,
    /// Transaction fee charged.
    #[serde(rename = "transactionFee")]
    pub transaction_fee: Decimal,
    /// Destination address.
    pub address: String,
    /// Secondary address identifier, when the coin uses one.
    #[serde(
        rename = "addressTag",
        deserialize_with = "empty_string_as_none::deserialize",
        default
    )]
    pub address_tag: Option<String>,
    /// Coin name.
    pub coin: String,
    /// On-chain transaction ID.
    #[serde(rename = "txId")]
    pub tx_id: String,
    /// Time the withdrawal was applied for, in UTC.
    #[serde(
        rename = "applyTime",
        deserialize_with = "space_separated_datetime::deserialize"
    )]
    pub apply_time: PrimitiveDateTime,
    /// Network the withdrawal went over.
    #[serde(default)]
    pub network: Option<String>,
    /// Status (0: email sent, 1: cancelled, 2: awaiting approval, 3: rejected,
    /// 4: processing, 5: failure, 6: completed).
    pub status: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_withdraw_history_params_stable_order() {
        let request = WithdrawHistoryRequest::new()
            .coin("ETH")
            .status(0)
            .start_time(1_508_198_532_000)
            .end_time(1_508_198_532_001);

        let params = request.params().unwrap();
        assert_eq!(
            params.encode(),
            "coin=ETH&status=0&startTime=1508198532000&endTime=1508198532001"
        );
    }

    #[test]
    fn test_time_range_requires_both_ends() {
        let start_only = DepositHistoryRequest::new().start_time(1_508_198_532_000);
        assert!(matches!(
            start_only.params(),
            Err(BinanceError::InvalidRequest(_))
        ));

        let end_only = WithdrawHistoryRequest::new().end_time(1_508_198_532_001);
        assert!(matches!(
            end_only.params(),
            Err(BinanceError::InvalidRequest(_))
        ));

        let both = DepositHistoryRequest::new()
            .start_time(1_508_198_532_000)
            .end_time(1_508_198_532_001);
        assert!(both.params().is_ok());
    }

    #[test]
    fn test_unset_fields_absent_from_params() {
        let params = DepositHistoryRequest::new().asset("BTC").params().unwrap();
        assert_eq!(params.encode(), "asset=BTC");
    }

    #[test]
    fn test_create_withdraw_params_full() {
        let request = CreateWithdrawRequest::new("USDT", "myaddress", "0.01".parse().unwrap())
            .withdraw_order_id("testID")
            .network("ETH")
            .address_tag("xyz")
            .transaction_fee_flag(true)
            .name("eth");

        let params = request.params();
        assert_eq!(
            params.encode(),
            "coin=USDT&withdrawOrderId=testID&network=ETH&address=myaddress\
             &addressTag=xyz&amount=0.01&transactionFeeFlag=true&name=eth"
        );
    }

    #[test]
    fn test_deposit_decodes_float_amount_exactly() {
        let json = r#"{
            "insertTime": 1508198532000,
            "amount": 0.04670582,
            "asset": "ETH",
            "address": "0x6915f16f8791d0a1cc2bf47c13a6b2a92000504b",
            "addressTag": "",
            "txId": "0xdf33b22bdb2b28b1f75ccd201a4a4m6e7g83jy5fc5d5a9d1340961598cfcb0a1",
            "status": 1
        }"#;

        let deposit: Deposit = serde_json::from_str(json).unwrap();
        assert_eq!(deposit.amount.to_string(), "0.04670582");
        assert_eq!(deposit.asset, "ETH");
        assert_eq!(deposit.address_tag, None);
        assert_eq!(deposit.status, 1);
        assert_eq!(deposit.insert_time.unix_timestamp(), 1_508_198_532);
    }

    #[test]
    fn test_deposit_address_decodes() {
        let json = r#"{"coin":"BTC","address":"1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa","tag":"","url":""}"#;

        let address: DepositAddress = serde_json::from_str(json).unwrap();
        assert_eq!(address.coin, "BTC");
        assert_eq!(address.address, "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa");
        assert_eq!(address.tag, None);
        assert_eq!(address.url, None);
    }
}
