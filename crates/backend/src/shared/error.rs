use thiserror::Error;

/// Ошибки конфигурации и согласованности датасета
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetError {
    #[error("record count must be positive, got {0}")]
    InvalidRecordCount(i64),

    #[error("domain `{0}` has no values")]
    EmptyDomain(&'static str),

    #[error("domain `{domain}` lists `{value}` more than once")]
    DuplicateDomainValue { domain: &'static str, value: String },

    #[error("product category `{0}` has no ad budget entry")]
    MissingAdBudget(String),

    #[error("loyalty tiers must be member tiers only, found `{0}`")]
    InvalidLoyaltyTiers(String),

    #[error("store prefix must not be blank")]
    InvalidStorePrefix,
}
