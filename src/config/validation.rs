//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject descriptors that can never resolve (blank names)
//! - Validate value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Plugin existence is not checked here; that is a per-reload build failure
//! - Duplicate filter names are allowed: a chain may run one plugin twice

use thiserror::Error;

use crate::config::schema::GatewayConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("filter #{index} has an empty name")]
    EmptyFilterName { index: usize },

    #[error("reload.poll_interval_secs must be greater than zero")]
    ZeroPollInterval,
}

pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors: Vec<ValidationError> = config
        .filters
        .iter()
        .enumerate()
        .filter(|(_, descriptor)| descriptor.name.trim().is_empty())
        .map(|(index, _)| ValidationError::EmptyFilterName { index })
        .collect();

    if config.reload.poll_interval_secs == 0 {
        errors.push(ValidationError::ZeroPollInterval);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::FilterDescriptor;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = GatewayConfig::default();
        config.filters = vec![
            FilterDescriptor::new("cors"),
            FilterDescriptor::new(""),
            FilterDescriptor::new(" "),
        ];
        config.reload.poll_interval_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyFilterName { index: 1 },
                ValidationError::EmptyFilterName { index: 2 },
                ValidationError::ZeroPollInterval,
            ]
        );
    }

    #[test]
    fn test_duplicate_names_allowed() {
        let mut config = GatewayConfig::default();
        config.filters = vec![FilterDescriptor::new("log"), FilterDescriptor::new("log")];
        assert!(validate_config(&config).is_ok());
    }
}
