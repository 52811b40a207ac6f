//! HMAC-SHA256 signature generation for Binance API authentication.
//!
//! Binance signed endpoints require a signature computed as:
//! ```text
//! HMAC-SHA256(totalParams, api_secret)
//! ```
//! where `totalParams` is the urlencoded query string (GET/DELETE) or request
//! body (POST/PUT) including the `timestamp` parameter. The signature is
//! hex-encoded and appended as the final `signature` parameter.
//!
//! The digest must cover the exact bytes that are transmitted. Re-encoding or
//! re-ordering parameters between signing and sending invalidates the
//! signature, so callers sign the already-encoded payload string and append
//! `&signature=<hex>` to that same string.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::Credentials;
use crate::error::BinanceError;

type HmacSha256 = Hmac<Sha256>;

/// Sign a request payload for Binance's signed endpoints.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the secret
/// * `payload` - The urlencoded query string or POST body, exactly as it
///   will be transmitted (timestamp and recvWindow already included)
///
/// # Returns
///
/// Lowercase hex-encoded HMAC-SHA256 signature.
///
/// # Example
///
/// ```rust
/// use binance_api_client::auth::{Credentials, sign_request};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("api_key", "api_secret");
/// let signature = sign_request(&credentials, "coin=BTC&timestamp=1499827319559")?;
/// assert_eq!(signature.len(), 64);
/// # Ok(())
/// # }
/// ```
pub fn sign_request(credentials: &Credentials, payload: &str) -> Result<String, BinanceError> {
    let secret = credentials.expose_secret();
    if secret.is_empty() {
        return Err(BinanceError::Auth(
            "API secret must not be empty for signed requests.".to_string(),
        ));
    }

    let mut hmac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| BinanceError::Auth(format!("Invalid HMAC key: {e}")))?;
    hmac.update(payload.as_bytes());
    let hmac_result = hmac.finalize().into_bytes();

    Ok(hex::encode(hmac_result))
}
