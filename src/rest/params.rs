//! Ordered request parameter sets.
//!
//! Binance signs the urlencoded parameter string byte-for-byte, so the
//! encoding must be deterministic and must match what is transmitted.
//! [`ParameterSet`] keeps parameters in insertion order and encodes them the
//! same way every time.

use std::fmt;

use rust_decimal::Decimal;

/// A single parameter value.
///
/// Only the primitive shapes Binance accepts on the wire: strings, integers,
/// floats, booleans, and exact decimals for monetary amounts.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// String value
    Str(String),
    /// Signed integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value, encoded as `true`/`false`
    Bool(bool),
    /// Exact decimal value (amounts, fees)
    Decimal(Decimal),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(i) => write!(f, "{i}"),
            ParamValue::Float(x) => write!(f, "{x}"),
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Decimal(d) => write!(f, "{d}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        ParamValue::Decimal(value)
    }
}

/// An ordered mapping from parameter names to values.
///
/// Keys are unique; setting an existing key overwrites its value in place so
/// the encoding order stays stable. Only parameters explicitly set by the
/// caller are present - optional fields that were never set do not appear in
/// the wire format at all.
///
/// # Example
///
/// ```rust
/// use binance_api_client::rest::ParameterSet;
///
/// let mut params = ParameterSet::new();
/// params.set("coin", "ETH");
/// params.set("status", 0);
/// params.set_if_present("network", None::<&str>);
///
/// assert_eq!(params.encode(), "coin=ETH&status=0");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    entries: Vec<(String, ParamValue)>,
}

impl ParameterSet {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, overwriting in place if the key already exists.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Insert a parameter only when the value is present.
    ///
    /// A `None` leaves the set untouched, so unset optional fields never
    /// reach the wire format with a sentinel default.
    pub fn set_if_present<V>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self
    where
        V: Into<ParamValue>,
    {
        if let Some(value) = value {
            self.set(key, value);
        }
        self
    }

    /// Combine two sets, with `other` winning on key collision.
    pub fn merge(&mut self, other: ParameterSet) -> &mut Self {
        for (key, value) in other.entries {
            self.set(key, value);
        }
        self
    }

    /// Look up a parameter by key.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Number of parameters in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set contains no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode as a `key1=val1&key2=val2` urlencoded string in insertion order.
    ///
    /// The output is deterministic: encoding an unmodified set twice yields
    /// identical bytes. Signatures are computed over this exact string.
    pub fn encode(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.entries {
            serializer.append_pair(key, &value.to_string());
        }
        serializer.finish()
    }
}
