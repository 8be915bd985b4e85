use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use contracts::dashboards::d402_retail_sales::SalesFilter;
use contracts::domain::a030_retail_transaction::{DatasetCatalog, RetailTransaction};
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u510_generate_dataset::{
    DatasetSummary, GenerateDataset, GenerateDatasetRequest, GenerateDatasetResponse,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::path::Path;

use super::package;
use crate::dashboards::d402_retail_sales::service::build_dashboard;
use crate::domain::a030_retail_transaction::{csv_repository, generator};
use crate::shared::error::DatasetError;
use crate::shared::format::{format_money, round2};

/// Executor для UseCase генерации датасета
pub struct GenerateExecutor<'a> {
    catalog: &'a DatasetCatalog,
}

/// Everything the run produces, before anything touches the disk
pub struct GeneratedDataset {
    pub records: Vec<RetailTransaction>,
    pub summary: DatasetSummary,
    pub entries: Vec<package::PackageEntry>,
}

impl<'a> GenerateExecutor<'a> {
    pub fn new(catalog: &'a DatasetCatalog) -> Self {
        Self { catalog }
    }

    /// Generate the table and render every output file in memory.
    ///
    /// The generator validates the catalog before a single record is sampled.
    pub fn build(&self, request: &GenerateDatasetRequest, now: NaiveDateTime) -> Result<GeneratedDataset> {
        if request.record_count <= 0 {
            return Err(DatasetError::InvalidRecordCount(request.record_count).into());
        }

        let start = std::time::Instant::now();
        let rng = StdRng::seed_from_u64(request.seed);
        let records = generator::generate_dataset(self.catalog, rng, now, request.record_count)?;
        tracing::info!(
            "Generated {} transactions in {}ms (seed {})",
            records.len(),
            start.elapsed().as_millis(),
            request.seed
        );

        let summary = summarize(&records)?;
        tracing::info!("Total revenue: {}", format_money(summary.total_revenue));

        let csv = csv_repository::to_csv_bytes(&records)?;
        let dashboard = build_dashboard(&records, &SalesFilter::default());
        let summary_json =
            serde_json::to_vec_pretty(&dashboard).context("failed to serialize dashboard summary")?;
        let entries = package::package_entries(csv, summary_json, &summary);

        Ok(GeneratedDataset {
            records,
            summary,
            entries,
        })
    }

    /// Run the whole use case: generate, write files, optionally zip them
    pub fn execute(&self, request: &GenerateDatasetRequest) -> Result<GenerateDatasetResponse> {
        let now = match request.reference_date {
            Some(date) => date.and_time(Local::now().time()),
            None => Local::now().naive_local(),
        };
        self.execute_at(request, now)
    }

    pub fn execute_at(
        &self,
        request: &GenerateDatasetRequest,
        now: NaiveDateTime,
    ) -> Result<GenerateDatasetResponse> {
        tracing::info!(
            "Starting {} ({}): {} records",
            GenerateDataset::full_name(),
            GenerateDataset::display_name(),
            request.record_count
        );

        let generated = self.build(request, now)?;

        let output_dir = Path::new(&request.output_dir);
        let written = package::write_entries(output_dir, &generated.entries)?;
        for path in &written {
            tracing::info!("Wrote {}", path.display());
        }

        let package_path = if request.create_package {
            let zip_path = output_dir.join(format!("{}.zip", request.project_name));
            package::write_zip_file(&zip_path, &request.project_name, &generated.entries)?;
            Some(zip_path.display().to_string())
        } else {
            None
        };

        Ok(GenerateDatasetResponse {
            summary: generated.summary,
            csv_path: output_dir.join(package::CSV_FILE).display().to_string(),
            summary_path: output_dir.join(package::SUMMARY_FILE).display().to_string(),
            package_path,
        })
    }
}

pub fn summarize(records: &[RetailTransaction]) -> Result<DatasetSummary> {
    let date_from = records
        .iter()
        .map(|r| r.transaction_date)
        .min()
        .context("cannot summarize an empty dataset")?;
    let date_to = records
        .iter()
        .map(|r| r.transaction_date)
        .max()
        .context("cannot summarize an empty dataset")?;

    Ok(DatasetSummary {
        total_transactions: records.len(),
        total_revenue: round2(records.iter().map(|r| r.final_amount).sum()),
        date_from,
        date_to,
        city_count: records.iter().map(|r| &r.city).collect::<HashSet<_>>().len(),
        category_count: records
            .iter()
            .map(|r| &r.product_category)
            .collect::<HashSet<_>>()
            .len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::default_config;
    use chrono::NaiveDate;
    use std::io::Read;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 30)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn request(output_dir: &str, record_count: i64) -> GenerateDatasetRequest {
        GenerateDatasetRequest {
            record_count,
            seed: 42,
            reference_date: None,
            output_dir: output_dir.to_string(),
            project_name: "lulu_sales_dashboard".to_string(),
            create_package: true,
        }
    }

    #[test]
    fn test_build_is_reproducible() {
        let catalog = default_config().unwrap().catalog;
        let executor = GenerateExecutor::new(&catalog);
        let first = executor.build(&request("unused", 100), now()).unwrap();
        let second = executor.build(&request("unused", 100), now()).unwrap();
        assert_eq!(first.records, second.records);
        assert_eq!(first.entries, second.entries);
        assert_eq!(first.summary.total_transactions, 100);
    }

    #[test]
    fn test_zero_count_fails_without_output() {
        let catalog = default_config().unwrap().catalog;
        let dir = std::env::temp_dir().join(format!("lulu-sales-zero-{}", std::process::id()));
        let result = GenerateExecutor::new(&catalog).execute_at(&request(dir.to_str().unwrap(), 0), now());

        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::InvalidRecordCount(0))
        );
        assert!(!dir.exists());
    }

    #[test]
    fn test_missing_budget_aborts_run() {
        let mut catalog = default_config().unwrap().catalog;
        catalog.ad_budgets.remove("Toys & Games");
        let err = GenerateExecutor::new(&catalog)
            .build(&request("unused", 10), now())
            .err()
            .unwrap();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::MissingAdBudget("Toys & Games".to_string()))
        );
    }

    #[test]
    fn test_summary() {
        let catalog = default_config().unwrap().catalog;
        let generated = GenerateExecutor::new(&catalog)
            .build(&request("unused", 100), now())
            .unwrap();
        let summary = &generated.summary;
        let expected: f64 = generated.records.iter().map(|r| r.final_amount).sum();
        assert_eq!(summary.total_revenue, round2(expected));
        assert!(summary.date_from <= summary.date_to);
        assert!(summary.date_to <= now().date());
        assert!(summary.city_count <= 7);
        assert!(summary.category_count <= 8);
    }

    #[test]
    fn test_execute_writes_files_and_package() {
        let catalog = default_config().unwrap().catalog;
        let dir = std::env::temp_dir().join(format!("lulu-sales-run-{}", std::process::id()));
        let response = GenerateExecutor::new(&catalog)
            .execute_at(&request(dir.to_str().unwrap(), 25), now())
            .unwrap();

        let records = csv_repository::read_csv_file(Path::new(&response.csv_path)).unwrap();
        assert_eq!(records.len(), 25);
        assert!(dir.join(package::README_FILE).exists());
        assert!(dir.join(package::GITIGNORE_FILE).exists());

        let summary_text = std::fs::read_to_string(&response.summary_path).unwrap();
        let dashboard: serde_json::Value = serde_json::from_str(&summary_text).unwrap();
        assert_eq!(dashboard["kpis"]["transaction_count"], 25);

        let zip_path = response.package_path.unwrap();
        let file = std::fs::File::open(&zip_path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut csv = String::new();
        archive
            .by_name("lulu_sales_dashboard/lulu_sales_data.csv")
            .unwrap()
            .read_to_string(&mut csv)
            .unwrap();
        assert_eq!(csv, std::fs::read_to_string(&response.csv_path).unwrap());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
