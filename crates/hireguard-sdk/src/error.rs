//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Storage collaborator failure during an analysis
    #[error("Storage error: {0}")]
    StorageError(#[from] hireguard_runtime::StorageError),

    /// Rule table error
    #[error("Rule error: {0}")]
    RuleError(#[from] hireguard_core::CoreError),

    /// Builder was finished without a store
    #[error("No risk store configured")]
    MissingStore,
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;
    use hireguard_runtime::StorageError;

    #[test]
    fn test_config_error() {
        let error = SdkError::ConfigError("Invalid configuration".to_string());
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_storage_error_conversion() {
        let error: SdkError = StorageError::Unavailable("connection refused".to_string()).into();
        assert!(matches!(error, SdkError::StorageError(StorageError::Unavailable(_))));
        assert!(error.to_string().contains("connection refused"));
    }

    #[test]
    fn test_missing_store() {
        assert_eq!(SdkError::MissingStore.to_string(), "No risk store configured");
    }

    #[test]
    fn test_rule_error_conversion() {
        let yaml_error = hireguard_core::RuleTableConfig::from_yaml("disposable_domains: 5")
            .unwrap_err();
        let error: SdkError = yaml_error.into();
        assert!(error.to_string().contains("Rule error"));
    }

    #[test]
    fn test_error_debug_format() {
        let error = SdkError::ConfigError("test".to_string());
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("ConfigError"));
    }
}
