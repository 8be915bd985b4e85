use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use contracts::dashboards::d402_retail_sales::SalesFilter;
use contracts::domain::a030_retail_transaction::LoyaltyTier;
use contracts::usecases::u510_generate_dataset::GenerateDatasetRequest;
use std::path::{Path, PathBuf};

use lulu_sales::dashboards::d402_retail_sales::service::{build_dashboard, filter_options};
use lulu_sales::domain::a030_retail_transaction::{csv_repository, service};
use lulu_sales::shared::config::{self, Config};
use lulu_sales::shared::logging::init_tracing;
use lulu_sales::usecases::u510_generate_dataset::GenerateExecutor;

#[derive(Parser)]
#[command(name = "lulu-sales")]
#[command(about = "Synthetic Lulu UAE sales dataset and dashboard aggregates")]
struct Cli {
    /// Path to config.toml (defaults to the file next to the executable)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the dataset and write the CSV with its companion files;
    /// zips them only when `output.create_package` is set
    Generate {
        #[arg(long, allow_negative_numbers = true)]
        count: Option<i64>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        out: Option<String>,
        /// Anchor date for the trailing window (YYYY-MM-DD)
        #[arg(long)]
        reference_date: Option<NaiveDate>,
    },
    /// Filter an existing CSV and print the dashboard aggregates as JSON
    Dashboard {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long)]
        city: Vec<String>,
        #[arg(long)]
        store: Vec<String>,
        #[arg(long)]
        category: Vec<String>,
        #[arg(long)]
        tier: Vec<LoyaltyTier>,
        #[arg(long)]
        gender: Vec<String>,
        #[arg(long)]
        age_group: Vec<String>,
        #[arg(long)]
        nationality: Vec<String>,
        /// true for loyalty members only, false for non-members only
        #[arg(long, action = clap::ArgAction::Set)]
        member: Option<bool>,
        /// Print the available filter values instead of the dashboard
        #[arg(long, default_value_t = false)]
        options: bool,
    },
    /// Force package: same as `generate`, but always builds the zip
    /// regardless of `output.create_package`
    Package {
        #[arg(long)]
        out: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing(&Path::new("target").join("logs"))?;

    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate {
            count,
            seed,
            out,
            reference_date,
        } => {
            let mut request = base_request(&config, out)?;
            if let Some(count) = count {
                request.record_count = count;
            }
            if let Some(seed) = seed {
                request.seed = seed;
            }
            if reference_date.is_some() {
                request.reference_date = reference_date;
            }
            run_generate(&config, &request)
        }
        Commands::Package { out } => {
            let mut request = base_request(&config, out)?;
            request.create_package = true;
            run_generate(&config, &request)
        }
        Commands::Dashboard {
            csv,
            from,
            to,
            city,
            store,
            category,
            tier,
            gender,
            age_group,
            nationality,
            member,
            options,
        } => {
            let records = csv_repository::read_csv_file(&csv)?;
            let inconsistent = records
                .iter()
                .filter(|r| !service::record_violations(r).is_empty())
                .count();
            if inconsistent > 0 {
                tracing::warn!("{} records have inconsistent derived fields", inconsistent);
            }

            let json = if options {
                serde_json::to_string_pretty(&filter_options(&records))?
            } else {
                let filter = SalesFilter {
                    date_from: from,
                    date_to: to,
                    cities: city,
                    store_locations: store,
                    product_categories: category,
                    loyalty_tiers: tier,
                    genders: gender,
                    age_groups: age_group,
                    nationalities: nationality,
                    loyalty_member: member,
                };
                serde_json::to_string_pretty(&build_dashboard(&records, &filter))?
            };
            println!("{}", json);
            Ok(())
        }
    }
}

fn base_request(config: &Config, out: Option<String>) -> anyhow::Result<GenerateDatasetRequest> {
    let dir = out.unwrap_or_else(|| config.output.dir.clone());
    let output_dir = config::resolve_output_dir(&dir)?;
    Ok(GenerateDatasetRequest {
        record_count: config.generator.record_count,
        seed: config.generator.seed,
        reference_date: config.generator.reference_date,
        output_dir: output_dir.display().to_string(),
        project_name: config.output.project_name.clone(),
        create_package: config.output.create_package,
    })
}

fn run_generate(config: &Config, request: &GenerateDatasetRequest) -> anyhow::Result<()> {
    let response = GenerateExecutor::new(&config.catalog)
        .execute(request)
        .context("dataset generation failed")?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
