use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use binance_api_client::auth::{Credentials, StaticCredentials, TimestampProvider, sign_request};
use binance_api_client::error::BinanceError;
use binance_api_client::rest::wallet::{
    CreateWithdrawRequest, DepositAddressRequest, DepositHistoryRequest, WithdrawHistoryRequest,
};
use binance_api_client::rest::{AbortHandle, Request, RestClient, SecurityType};
use reqwest::Method;
use time::macros::datetime;

const TEST_KEY: &str = "test_key";
const TEST_SECRET: &str = "test_secret";

/// Timestamp provider pinned to a fixed instant, so signed payloads are
/// reproducible in tests.
struct FixedClock(u64);

impl TimestampProvider for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

fn build_client(server: &MockServer) -> RestClient {
    let credentials = Arc::new(StaticCredentials::new(TEST_KEY, TEST_SECRET));
    RestClient::builder()
        .base_url(server.uri())
        .credentials(credentials)
        .build()
}

#[tokio::test]
async fn test_list_deposits() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "success": true,
        "depositList": [
            {
                "insertTime": 1508198532000_i64,
                "amount": 0.04670582,
                "asset": "ETH",
                "address": "0x6915f16f8791d0a1cc2bf47c13a6b2a92000504b",
                "addressTag": "",
                "txId": "0xdf33b22bdb2b28b1f75ccd201a4a4m6e7g83jy5fc5d5a9d1340961598cfcb0a1",
                "status": 1
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/wapi/v3/depositHistory.html"))
        .and(query_param("asset", "ETH"))
        .and(query_param("status", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let deposits = client
        .list_deposits(&DepositHistoryRequest::new().asset("ETH").status(1))
        .await
        .unwrap();

    assert_eq!(deposits.len(), 1);
    assert_eq!(deposits[0].amount.to_string(), "0.04670582");
    assert_eq!(deposits[0].asset, "ETH");
    assert_eq!(deposits[0].address_tag, None);
    assert_eq!(deposits[0].status, 1);
}

#[tokio::test]
async fn test_list_deposits_envelope_failure() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "success": false,
        "msg": "Service temporarily unavailable."
    });

    Mock::given(method("GET"))
        .and(path("/wapi/v3/depositHistory.html"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let result = client.list_deposits(&DepositHistoryRequest::new()).await;

    match result {
        Err(BinanceError::Api(e)) => assert_eq!(e.message, "Service temporarily unavailable."),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_deposit_address() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "coin": "BTC",
        "address": "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa",
        "tag": "",
        "url": "https://btc.com/1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"
    });

    Mock::given(method("GET"))
        .and(path("/sapi/v1/capital/deposit/address"))
        .and(query_param("coin", "BTC"))
        .and(query_param("network", "BTC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let address = client
        .get_deposit_address(&DepositAddressRequest::new("BTC").network("BTC"))
        .await
        .unwrap();

    assert_eq!(address.coin, "BTC");
    assert_eq!(address.address, "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa");
    assert_eq!(address.tag, None);
    assert_eq!(
        address.url.as_deref(),
        Some("https://btc.com/1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa")
    );
}

#[tokio::test]
async fn test_create_withdraw() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "id": "7213fea8e94b4a5593d507237e5a555b"
    });

    Mock::given(method("POST"))
        .and(path("/sapi/v1/capital/withdraw/apply"))
        .and(body_string_contains("coin=USDT"))
        .and(body_string_contains("withdrawOrderId=testID"))
        .and(body_string_contains("network=ETH"))
        .and(body_string_contains("address=myaddress"))
        .and(body_string_contains("addressTag=xyz"))
        .and(body_string_contains("amount=0.01"))
        .and(body_string_contains("transactionFeeFlag=true"))
        .and(body_string_contains("name=eth"))
        .and(body_string_contains("signature="))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = CreateWithdrawRequest::new("USDT", "myaddress", "0.01".parse().unwrap())
        .withdraw_order_id("testID")
        .network("ETH")
        .address_tag("xyz")
        .transaction_fee_flag(true)
        .name("eth");
    let response = client.create_withdraw(&request).await.unwrap();

    assert_eq!(response.id, "7213fea8e94b4a5593d507237e5a555b");
}

#[tokio::test]
async fn test_list_withdraws() {
    let server = MockServer::start().await;
    let response = serde_json::json!([
        {
            "id": "7213fea8e94b4a5593d507237e5a555b",
            "withdrawOrderID": "",
            "amount": "0.99",
            "transactionFee": "0.01",
            "address": "0x6915f16f8791d0a1cc2bf47c13a6b2a92000504b",
            "coin": "USDT",
            "txId": "0xdf33b22bdb2b28b1f75ccd201a4a4m6e7g83jy5fc5d5a9d1340961598cfcb0a1",
            "applyTime": "2019-10-12 11:12:02",
            "network": "ETH",
            "status": 4
        },
        {
            "id": "7213fea8e94b4a5534ggsd237e5a555b",
            "withdrawOrderID": "withdrawtest",
            "amount": "999.9999",
            "transactionFee": "0.0001",
            "address": "463tWEBn5XZJSxLU34r6g7h8jtxuNcDbjLSjkn3XAXHCbLrTTErJrBWYgHJQyrCwkNgYvyV3z8zctJLPCZy24jvb3NiTcTJ",
            "addressTag": "342341222",
            "txId": "b3c6219639c8ae3f9cf010cdc24fw7f7yt8j1e063f9b4bd1a05cb44c4b6e2509",
            "coin": "XMR",
            "applyTime": "2019-10-12 11:12:02",
            "status": 4
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/sapi/v1/capital/withdraw/history"))
        .and(query_param("coin", "ETH"))
        .and(query_param("status", "0"))
        .and(query_param("startTime", "1508198532000"))
        .and(query_param("endTime", "1508198532001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let withdraws = client
        .list_withdraws(
            &WithdrawHistoryRequest::new()
                .coin("ETH")
                .status(0)
                .start_time(1_508_198_532_000)
                .end_time(1_508_198_532_001),
        )
        .await
        .unwrap();

    assert_eq!(withdraws.len(), 2);

    assert_eq!(withdraws[0].amount.to_string(), "0.99");
    assert_eq!(withdraws[0].transaction_fee.to_string(), "0.01");
    assert_eq!(
        withdraws[0].address,
        "0x6915f16f8791d0a1cc2bf47c13a6b2a92000504b"
    );
    assert_eq!(withdraws[0].coin, "USDT");
    assert_eq!(withdraws[0].apply_time, datetime!(2019-10-12 11:12:02));
    assert_eq!(withdraws[0].status, 4);
    assert_eq!(withdraws[0].withdraw_order_id, None);
    assert_eq!(withdraws[0].network.as_deref(), Some("ETH"));

    assert_eq!(withdraws[1].amount.to_string(), "999.9999");
    assert_eq!(
        withdraws[1].address,
        "463tWEBn5XZJSxLU34r6g7h8jtxuNcDbjLSjkn3XAXHCbLrTTErJrBWYgHJQyrCwkNgYvyV3z8zctJLPCZy24jvb3NiTcTJ"
    );
    assert_eq!(withdraws[1].coin, "XMR");
    assert_eq!(withdraws[1].apply_time, datetime!(2019-10-12 11:12:02));
    assert_eq!(withdraws[1].status, 4);
    assert_eq!(withdraws[1].withdraw_order_id.as_deref(), Some("withdrawtest"));
    assert_eq!(withdraws[1].address_tag.as_deref(), Some("342341222"));
}

#[tokio::test]
async fn test_signed_query_matches_transmitted_bytes() {
    let server = MockServer::start().await;

    // With a pinned clock the signed payload is fully deterministic, so the
    // signature the server should observe can be computed up front.
    let timestamp = 1_499_827_319_559_u64;
    let expected_payload = format!("coin=ETH&timestamp={timestamp}&recvWindow=5000");
    let credentials = Credentials::new(TEST_KEY, TEST_SECRET);
    let expected_signature = sign_request(&credentials, &expected_payload).unwrap();

    Mock::given(method("GET"))
        .and(path("/sapi/v1/capital/deposit/address"))
        .and(query_param("coin", "ETH"))
        .and(query_param("timestamp", timestamp.to_string()))
        .and(query_param("recvWindow", "5000"))
        .and(query_param("signature", expected_signature))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "coin": "ETH",
            "address": "0x6915f16f8791d0a1cc2bf47c13a6b2a92000504b",
            "tag": "",
            "url": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = RestClient::builder()
        .base_url(server.uri())
        .credentials(Arc::new(StaticCredentials::new(TEST_KEY, TEST_SECRET)))
        .timestamp_provider(Arc::new(FixedClock(timestamp)))
        .recv_window(5000)
        .build();

    let address = client
        .get_deposit_address(&DepositAddressRequest::new("ETH"))
        .await
        .unwrap();
    assert_eq!(address.coin, "ETH");
}

#[tokio::test]
async fn test_api_error_body() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "code": -1021,
        "msg": "Timestamp for this request is outside of the recvWindow."
    });

    Mock::given(method("GET"))
        .and(path("/sapi/v1/capital/withdraw/history"))
        .respond_with(ResponseTemplate::new(400).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let result = client.list_withdraws(&WithdrawHistoryRequest::new()).await;

    match result {
        Err(BinanceError::Api(e)) => {
            assert_eq!(e.code, -1021);
            assert!(e.is_invalid_timestamp());
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_error_without_api_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sapi/v1/capital/withdraw/history"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let result = client.list_withdraws(&WithdrawHistoryRequest::new()).await;

    match result {
        Err(BinanceError::HttpStatus { status, body }) => {
            assert_eq!(status.as_u16(), 502);
            assert!(body.contains("Bad Gateway"));
        }
        other => panic!("expected HttpStatus error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sapi/v1/capital/deposit/address"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let result = client
        .get_deposit_address(&DepositAddressRequest::new("BTC"))
        .await;

    match result {
        Err(BinanceError::InvalidResponse(message)) => {
            assert!(message.contains("not json at all"));
        }
        other => panic!("expected InvalidResponse error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_record_fails_whole_list() {
    let server = MockServer::start().await;
    // Second record is missing mandatory fields; the whole response must
    // fail rather than silently dropping the record.
    let response = serde_json::json!([
        {
            "id": "7213fea8e94b4a5593d507237e5a555b",
            "amount": "0.99",
            "transactionFee": "0.01",
            "address": "0x6915f16f8791d0a1cc2bf47c13a6b2a92000504b",
            "coin": "USDT",
            "txId": "0xdf33b22bdb2b28b1f75ccd201a4a4m6e7g83jy5fc5d5a9d1340961598cfcb0a1",
            "applyTime": "2019-10-12 11:12:02",
            "status": 4
        },
        {
            "id": "7213fea8e94b4a5534ggsd237e5a555b"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/sapi/v1/capital/withdraw/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let result = client.list_withdraws(&WithdrawHistoryRequest::new()).await;

    assert!(matches!(result, Err(BinanceError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_rate_limit_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sapi/v1/capital/withdraw/history"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "30")
                .set_body_json(serde_json::json!({"code": -1003, "msg": "Too many requests."})),
        )
        .mount(&server)
        .await;

    let client = build_client(&server);
    let result = client.list_withdraws(&WithdrawHistoryRequest::new()).await;

    match result {
        Err(BinanceError::RateLimitExceeded { retry_after_ms }) => {
            assert_eq!(retry_after_ms, Some(30_000));
        }
        other => panic!("expected RateLimitExceeded error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_time_range_checked_before_dispatch() {
    let server = MockServer::start().await;

    // No mock mounted: a request reaching the server would 404 into an
    // HttpStatus error rather than InvalidRequest.
    let client = build_client(&server);
    let result = client
        .list_deposits(&DepositHistoryRequest::new().start_time(1_508_198_532_000))
        .await;

    assert!(matches!(result, Err(BinanceError::InvalidRequest(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_credentials() {
    let server = MockServer::start().await;

    let client = RestClient::builder().base_url(server.uri()).build();
    let result = client
        .get_deposit_address(&DepositAddressRequest::new("BTC"))
        .await;

    assert!(matches!(result, Err(BinanceError::MissingCredentials)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cancelled_dispatch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sapi/v1/capital/withdraw/history"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let client = build_client(&server);
    let (handle, registration) = AbortHandle::new_pair();

    let request = Request::new(
        Method::GET,
        "/sapi/v1/capital/withdraw/history",
        SecurityType::Signed,
    );
    let task = tokio::spawn(async move {
        client
            .dispatch_abortable::<serde_json::Value>(request, registration)
            .await
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.abort();

    let result = task.await.unwrap();
    assert!(matches!(result, Err(BinanceError::Cancelled)));
}
