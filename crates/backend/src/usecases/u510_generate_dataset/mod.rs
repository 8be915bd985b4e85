pub mod executor;
pub mod package;

pub use executor::GenerateExecutor;
