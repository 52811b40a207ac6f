//! Request descriptors for REST API calls.

use reqwest::Method;

use crate::rest::params::ParameterSet;

/// Security classification of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityType {
    /// Public endpoint, no authentication.
    None,
    /// Requires the `X-MBX-APIKEY` header but no signature.
    ApiKey,
    /// Requires the API key header plus a signed query string with
    /// timestamp (and optional recvWindow).
    Signed,
}

/// An immutable description of one API call.
///
/// Created per call by an endpoint builder and consumed exactly once by the
/// dispatcher. GET/DELETE requests carry their parameters in the query
/// string; POST/PUT requests carry them form-encoded in the body.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Endpoint path, e.g. `/sapi/v1/capital/deposit/address`.
    pub endpoint: String,
    /// Security classification.
    pub security: SecurityType,
    /// Request parameters.
    pub params: ParameterSet,
}

impl Request {
    /// Create a request descriptor with an empty parameter set.
    pub fn new(method: Method, endpoint: impl Into<String>, security: SecurityType) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            security,
            params: ParameterSet::new(),
        }
    }

    /// Attach a parameter set to the descriptor.
    pub fn with_params(mut self, params: ParameterSet) -> Self {
        self.params = params;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_construction() {
        let mut params = ParameterSet::new();
        params.set("coin", "BTC");

        let request = Request::new(Method::GET, "/sapi/v1/capital/deposit/address", SecurityType::Signed)
            .with_params(params);

        assert_eq!(request.method, Method::GET);
        assert_eq!(request.endpoint, "/sapi/v1/capital/deposit/address");
        assert_eq!(request.security, SecurityType::Signed);
        assert_eq!(request.params.encode(), "coin=BTC");
    }
}
