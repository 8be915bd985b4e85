pub mod aggregate;
pub mod catalog;

pub use aggregate::{LoyaltyTier, RetailTransaction, COLUMNS};
pub use catalog::DatasetCatalog;
