use anyhow::{Context, Result};
use contracts::domain::a030_retail_transaction::COLUMNS;
use contracts::usecases::u510_generate_dataset::DatasetSummary;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::shared::format::format_money;

pub const CSV_FILE: &str = "lulu_sales_data.csv";
pub const SUMMARY_FILE: &str = "dashboard_summary.json";
pub const README_FILE: &str = "README.md";
pub const GITIGNORE_FILE: &str = ".gitignore";

const GITIGNORE: &str = "\
# Rust
/target/
**/*.rs.bk

# Logs
*.log

# IDEs
.vscode/
.idea/
*.swp

# OS
.DS_Store
Thumbs.db

# Environment
.env
";

/// One file of the project package, already rendered
#[derive(Debug, Clone, PartialEq)]
pub struct PackageEntry {
    pub name: &'static str,
    pub contents: Vec<u8>,
}

/// Files in the order they are written to disk and to the archive
pub fn package_entries(
    csv: Vec<u8>,
    summary_json: Vec<u8>,
    summary: &DatasetSummary,
) -> Vec<PackageEntry> {
    vec![
        PackageEntry {
            name: CSV_FILE,
            contents: csv,
        },
        PackageEntry {
            name: SUMMARY_FILE,
            contents: summary_json,
        },
        PackageEntry {
            name: README_FILE,
            contents: render_readme(summary).into_bytes(),
        },
        PackageEntry {
            name: GITIGNORE_FILE,
            contents: GITIGNORE.as_bytes().to_vec(),
        },
    ]
}

pub fn render_readme(summary: &DatasetSummary) -> String {
    let columns = COLUMNS
        .iter()
        .map(|c| format!("- `{}`", c))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "# Lulu Hypermarket UAE - Sales Analytics Dashboard\n\
\n\
Synthetic retail transactions for Lulu stores in the UAE, with the aggregates\n\
a sales dashboard renders.\n\
\n\
## Dataset\n\
\n\
- Transactions: {total}\n\
- Total revenue: {revenue}\n\
- Date range: {from} to {to}\n\
- Cities: {cities}\n\
- Product categories: {categories}\n\
\n\
## Columns\n\
\n\
{columns}\n\
\n\
## Dashboard\n\
\n\
`{summary_file}` holds the unfiltered dashboard: KPIs (total revenue, transactions,\n\
average transaction, loyalty member share, total discounts), sales by category,\n\
city, age group and gender, loyalty tier, income bracket, ad budget vs sales,\n\
nationality distribution and the daily trend.\n\
\n\
## Usage\n\
\n\
```bash\n\
lulu-sales generate --count 100 --seed 42 --out lulu_sales_dashboard\n\
lulu-sales dashboard --csv lulu_sales_dashboard/{csv_file} --city Dubai --tier Gold\n\
lulu-sales package --out lulu_sales_dashboard\n\
```\n\
\n\
This dataset is synthetic and intended for demonstration only.\n",
        total = summary.total_transactions,
        revenue = format_money(summary.total_revenue),
        from = summary.date_from,
        to = summary.date_to,
        cities = summary.city_count,
        categories = summary.category_count,
        columns = columns,
        summary_file = SUMMARY_FILE,
        csv_file = CSV_FILE,
    )
}

/// Write the entries as plain files into `dir`
pub fn write_entries(dir: &Path, entries: &[PackageEntry]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let mut written = Vec::with_capacity(entries.len());
    for entry in entries {
        let path = dir.join(entry.name);
        std::fs::write(&path, &entry.contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

/// Deflate every entry under `<project_name>/` into a zip archive
pub fn write_zip<W: Write + Seek>(writer: W, project_name: &str, entries: &[PackageEntry]) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in entries {
        let arcname = format!("{}/{}", project_name, entry.name);
        zip.start_file(arcname.as_str(), options)
            .with_context(|| format!("failed to start zip entry {}", arcname))?;
        zip.write_all(&entry.contents)?;
        tracing::debug!("Added: {}", arcname);
    }

    let writer = zip.finish().context("failed to finish zip archive")?;
    Ok(writer)
}

pub fn write_zip_file(path: &Path, project_name: &str, entries: &[PackageEntry]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_zip(file, project_name, entries)?;
    tracing::info!("Created package {} ({} files)", path.display(), entries.len());
    Ok(())
}
