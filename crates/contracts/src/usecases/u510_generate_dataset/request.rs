use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Запрос на генерацию датасета
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateDatasetRequest {
    /// Количество транзакций. Значения <= 0 отклоняются до начала генерации
    #[serde(rename = "recordCount", default = "default_record_count")]
    pub record_count: i64,

    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Опорная дата, от которой отсчитываются дни назад (по умолчанию — сегодня)
    #[serde(rename = "referenceDate", default)]
    pub reference_date: Option<NaiveDate>,

    /// Каталог, в который пишутся CSV, сводка и пакет
    #[serde(rename = "outputDir")]
    pub output_dir: String,

    /// Имя папки проекта и zip-архива
    #[serde(rename = "projectName", default = "default_project_name")]
    pub project_name: String,

    /// Собрать zip-архив проекта
    #[serde(rename = "createPackage", default)]
    pub create_package: bool,
}

fn default_record_count() -> i64 {
    100
}

fn default_seed() -> u64 {
    42
}

fn default_project_name() -> String {
    "lulu_sales_dashboard".to_string()
}
