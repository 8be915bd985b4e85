use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Сводка по сгенерированному датасету
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    #[serde(rename = "totalTransactions")]
    pub total_transactions: usize,

    /// Сумма Final_Amount (AED)
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,

    #[serde(rename = "dateFrom")]
    pub date_from: NaiveDate,

    #[serde(rename = "dateTo")]
    pub date_to: NaiveDate,

    #[serde(rename = "cityCount")]
    pub city_count: usize,

    #[serde(rename = "categoryCount")]
    pub category_count: usize,
}

/// Результат генерации
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateDatasetResponse {
    pub summary: DatasetSummary,

    #[serde(rename = "csvPath")]
    pub csv_path: String,

    #[serde(rename = "summaryPath")]
    pub summary_path: String,

    /// Путь к zip-архиву, если пакет собирался
    #[serde(rename = "packagePath")]
    pub package_path: Option<String>,
}
