//! Filter instance and configuration binding.
//!
//! A filter is created unconfigured by its plugin, has its options bound onto
//! its configuration object, and is then initialized exactly once. After that
//! it is shared read-only by the chain.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::filter::error::BoxError;

/// Raw options attached to a filter descriptor.
pub type FilterOptions = serde_json::Map<String, Value>;

/// A pluggable unit of request processing.
///
/// Implementations must be safe to share between request workers once
/// initialized; the chain itself never mutates a filter after [`Filter::init`].
pub trait Filter: Send + Sync {
    /// The mutable configuration object options are bound onto.
    fn config(&mut self) -> &mut dyn FilterConfig;

    /// Validate the bound configuration and perform one-time setup.
    fn init(&mut self) -> Result<(), BoxError>;
}

/// A configuration structure that accepts raw options.
///
/// Implemented for every serde-compatible type. Binding is structural:
/// - keys the structure does not have are ignored (unless it denies unknown fields)
/// - keys missing from the options keep their current value, at any depth
/// - a value of the wrong type fails the whole bind and leaves `self` untouched
pub trait FilterConfig {
    fn bind(&mut self, options: &FilterOptions) -> Result<(), serde_json::Error>;
}

impl<T> FilterConfig for T
where
    T: Serialize + DeserializeOwned,
{
    fn bind(&mut self, options: &FilterOptions) -> Result<(), serde_json::Error> {
        let mut current = serde_json::to_value(&*self)?;
        // Non-struct configs (e.g. `()`) have no fields to bind.
        if let Value::Object(fields) = &mut current {
            merge_fields(fields, options);
        }
        *self = serde_json::from_value(current)?;
        Ok(())
    }
}

fn merge_fields(fields: &mut serde_json::Map<String, Value>, options: &FilterOptions) {
    for (key, value) in options {
        match fields.get_mut(key) {
            Some(slot) => merge_value(slot, value),
            None => {
                fields.insert(key.clone(), value.clone());
            }
        }
    }
}

fn merge_value(slot: &mut Value, value: &Value) {
    if let (Value::Object(fields), Value::Object(options)) = (&mut *slot, value) {
        merge_fields(fields, options);
        return;
    }
    *slot = value.clone();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct HeaderConfig {
        header: String,
        max_len: u32,
        strip: Option<bool>,
    }

    impl Default for HeaderConfig {
        fn default() -> Self {
            Self {
                header: "x-request-id".to_string(),
                max_len: 64,
                strip: None,
            }
        }
    }

    fn options(value: Value) -> FilterOptions {
        match value {
            Value::Object(map) => map,
            _ => panic!("options must be an object"),
        }
    }

    #[test]
    fn test_bind_overrides_present_keys_only() {
        let mut config = HeaderConfig::default();
        config.bind(&options(json!({ "max_len": 128 }))).unwrap();

        assert_eq!(config.max_len, 128);
        assert_eq!(config.header, "x-request-id");
    }

    #[test]
    fn test_bind_ignores_unknown_keys() {
        let mut config = HeaderConfig::default();
        config
            .bind(&options(json!({ "header": "x-trace", "unknown": [1, 2, 3] })))
            .unwrap();

        assert_eq!(config.header, "x-trace");
    }

    #[test]
    fn test_bind_fills_optional_fields() {
        let mut config = HeaderConfig::default();
        config.bind(&options(json!({ "strip": true }))).unwrap();
        assert_eq!(config.strip, Some(true));
    }

    #[test]
    fn test_bind_type_mismatch_fails_and_keeps_state() {
        let mut config = HeaderConfig::default();
        let result = config.bind(&options(json!({ "header": "x-a", "max_len": "big" })));

        assert!(result.is_err());
        assert_eq!(config, HeaderConfig::default());
    }

    #[test]
    fn test_bind_empty_options_is_noop() {
        let mut config = HeaderConfig::default();
        config.bind(&FilterOptions::new()).unwrap();
        assert_eq!(config, HeaderConfig::default());
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TlsConfig {
        cert: String,
        key: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct UpstreamConfig {
        name: String,
        tls: TlsConfig,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sni: Option<String>,
    }

    impl Default for UpstreamConfig {
        fn default() -> Self {
            Self {
                name: "origin".to_string(),
                tls: TlsConfig {
                    cert: "c.pem".to_string(),
                    key: "k.pem".to_string(),
                },
                sni: None,
            }
        }
    }

    #[test]
    fn test_bind_partial_nested_keeps_defaults() {
        let mut config = UpstreamConfig::default();
        config.bind(&options(json!({ "tls": { "cert": "new.pem" } }))).unwrap();

        assert_eq!(config.tls.cert, "new.pem");
        assert_eq!(config.tls.key, "k.pem");
        assert_eq!(config.name, "origin");
    }

    #[test]
    fn test_bind_nested_type_mismatch_fails() {
        let mut config = UpstreamConfig::default();
        assert!(config.bind(&options(json!({ "tls": { "key": 7 } }))).is_err());
        assert_eq!(config, UpstreamConfig::default());
    }

    #[test]
    fn test_bind_sets_field_skipped_when_none() {
        let mut config = UpstreamConfig::default();
        config.bind(&options(json!({ "sni": "api.internal" }))).unwrap();
        assert_eq!(config.sni.as_deref(), Some("api.internal"));
    }

    #[test]
    fn test_unit_config_accepts_anything() {
        let mut config = ();
        config.bind(&options(json!({ "anything": 1 }))).unwrap();
    }
}
