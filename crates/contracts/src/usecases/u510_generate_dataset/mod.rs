pub mod request;
pub mod response;

pub use request::GenerateDatasetRequest;
pub use response::{DatasetSummary, GenerateDatasetResponse};

use crate::usecases::common::UseCaseMetadata;

pub struct GenerateDataset;

impl UseCaseMetadata for GenerateDataset {
    fn usecase_index() -> &'static str {
        "u510"
    }

    fn usecase_name() -> &'static str {
        "generate_dataset"
    }

    fn display_name() -> &'static str {
        "Synthetic sales dataset"
    }

    fn description() -> &'static str {
        "Генерация синтетических транзакций Lulu UAE, выгрузка CSV и сборка пакета дашборда"
    }
}
