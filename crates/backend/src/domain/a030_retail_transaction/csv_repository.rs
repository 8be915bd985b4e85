use anyhow::{Context, Result};
use contracts::domain::a030_retail_transaction::{RetailTransaction, COLUMNS};
use std::io::{Read, Write};
use std::path::Path;

/// Write the table as CSV: header row in the fixed column order, one row per record.
pub fn write_csv<W: Write>(records: &[RetailTransaction], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer
            .serialize(record)
            .with_context(|| format!("failed to serialize {}", record.transaction_id))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn to_csv_bytes(records: &[RetailTransaction]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    Ok(buf)
}

/// Read a table written by [`write_csv`]. The header must match the fixed column order.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RetailTransaction>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .context("Failed to read CSV headers")?
        .clone();
    let found: Vec<&str> = headers.iter().map(|h| h.trim_start_matches('\u{FEFF}')).collect();
    if found != COLUMNS {
        anyhow::bail!("Unexpected CSV header: {:?}", found);
    }

    let mut records = Vec::new();
    for (i, row) in csv_reader.deserialize::<RetailTransaction>().enumerate() {
        // +2: header line and 1-based numbering
        let record = row.with_context(|| format!("malformed CSV record on line {}", i + 2))?;
        records.push(record);
    }
    Ok(records)
}

pub fn write_csv_file(records: &[RetailTransaction], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_csv(records, std::io::BufWriter::new(file))?;
    tracing::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

pub fn read_csv_file(path: &Path) -> Result<Vec<RetailTransaction>> {
    let file =
        std::fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let records = read_csv(std::io::BufReader::new(file))?;
    tracing::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
