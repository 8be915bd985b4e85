use anyhow::Context;
use chrono::NaiveDate;
use contracts::domain::a030_retail_transaction::DatasetCatalog;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub output: OutputConfig,
    pub catalog: DatasetCatalog,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneratorConfig {
    /// Signed so that zero and negative counts reach validation instead of failing in the parser
    pub record_count: i64,
    pub seed: u64,
    /// Anchor date for the days-ago offsets; today when absent
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    pub dir: String,
    #[serde(default = "default_project_name")]
    pub project_name: String,
    #[serde(default)]
    pub create_package: bool,
}

fn default_project_name() -> String {
    "lulu_sales_dashboard".to_string()
}

/// Default configuration embedded in the binary
pub const DEFAULT_CONFIG: &str = r#"
[generator]
record_count = 100
seed = 42

[output]
dir = "target/lulu_sales_dashboard"
project_name = "lulu_sales_dashboard"
create_package = true

[catalog]
store_prefix = "Lulu"
cities = ["Dubai", "Abu Dhabi", "Sharjah", "Ajman", "Ras Al Khaimah", "Fujairah", "Umm Al Quwain"]
nationalities = ["UAE National", "Indian", "Pakistani", "Filipino", "Egyptian", "Jordanian", "British", "American"]
age_groups = ["18-25", "26-35", "36-45", "46-55", "56+"]
genders = ["Male", "Female"]
income_brackets = ["Low (< 5000 AED)", "Medium (5000-15000 AED)", "High (15000-30000 AED)", "Very High (> 30000 AED)"]
product_categories = ["Groceries", "Electronics", "Clothing", "Home & Kitchen", "Personal Care", "Toys & Games", "Sports", "Books & Stationery"]
loyalty_tiers = ["Bronze", "Silver", "Gold", "Platinum"]

[catalog.ad_budgets]
"Groceries" = 50000
"Electronics" = 80000
"Clothing" = 60000
"Home & Kitchen" = 45000
"Personal Care" = 40000
"Toys & Games" = 35000
"Sports" = 30000
"Books & Stationery" = 25000
"#;

/// Load configuration
///
/// Search order:
/// 1. Explicit path (`--config`), which must exist
/// 2. config.toml next to the executable
/// 3. Falls back to embedded default config
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        tracing::info!("Loading config from: {}", path.display());
        return read_config_file(path);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                return read_config_file(&config_path);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    default_config()
}

pub fn default_config() -> anyhow::Result<Config> {
    toml::from_str(DEFAULT_CONFIG).context("embedded default config is malformed")
}

fn read_config_file(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
}

/// Resolve the output directory; relative paths are taken from the current directory
pub fn resolve_output_dir(dir: &str) -> anyhow::Result<PathBuf> {
    let path = Path::new(dir);
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a030_retail_transaction::LoyaltyTier;

    #[test]
    fn test_default_config_loads() {
        let config = default_config().unwrap();
        assert_eq!(config.generator.record_count, 100);
        assert_eq!(config.generator.seed, 42);
        assert!(config.generator.reference_date.is_none());
        assert_eq!(config.output.project_name, "lulu_sales_dashboard");
    }

    #[test]
    fn test_default_catalog_domains() {
        let catalog = default_config().unwrap().catalog;
        assert_eq!(catalog.cities.len(), 7);
        assert_eq!(catalog.nationalities.len(), 8);
        assert_eq!(catalog.age_groups.len(), 5);
        assert_eq!(catalog.genders.len(), 2);
        assert_eq!(catalog.income_brackets.len(), 4);
        assert_eq!(catalog.product_categories.len(), 8);
        assert_eq!(catalog.loyalty_tiers, LoyaltyTier::MEMBER_TIERS.to_vec());
        assert_eq!(catalog.ad_budget_for("Electronics"), Some(80000));
        assert_eq!(catalog.ad_budget_for("Books & Stationery"), Some(25000));
        assert_eq!(catalog.store_location("Abu Dhabi"), "Lulu Abu Dhabi");
    }

    #[test]
    fn test_negative_seed_is_rejected() {
        let broken = DEFAULT_CONFIG.replace("seed = 42", "seed = -1");
        assert!(toml::from_str::<Config>(&broken).is_err());
    }

    fn write_temp_config(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lulu-sales-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_explicit_config_file() {
        let contents = DEFAULT_CONFIG
            .replace("record_count = 100", "record_count = 5")
            .replace("seed = 42", "seed = 7\nreference_date = \"2025-06-30\"");
        let path = write_temp_config("explicit.toml", &contents);

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.generator.record_count, 5);
        assert_eq!(config.generator.seed, 7);
        assert_eq!(
            config.generator.reference_date,
            NaiveDate::from_ymd_opt(2025, 6, 30)
        );
        assert_eq!(config.catalog, default_config().unwrap().catalog);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let path = std::env::temp_dir().join("lulu-sales-no-such-config.toml");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().starts_with("failed to read"), "{}", err);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let path = write_temp_config("malformed.toml", "[generator]\nrecord_count = \"many\"\n");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().starts_with("failed to parse"), "{}", err);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_shipped_config_matches_embedded_default() {
        let shipped = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.toml");
        let config = read_config_file(&shipped).unwrap();
        let default = default_config().unwrap();
        assert_eq!(config.catalog, default.catalog);
        assert_eq!(config.generator.record_count, default.generator.record_count);
        assert_eq!(config.generator.seed, default.generator.seed);
        assert_eq!(config.output.dir, default.output.dir);
        assert_eq!(config.output.create_package, default.output.create_package);
    }

    #[test]
    fn test_resolve_output_dir_keeps_absolute() {
        let abs = std::env::temp_dir().join("lulu-out");
        let resolved = resolve_output_dir(abs.to_str().unwrap()).unwrap();
        assert_eq!(resolved, abs);
    }
}
