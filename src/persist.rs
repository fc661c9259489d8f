use std::fs;
use std::path::Path;

use crate::models::ListingRecord;
use crate::utils::error::Result;

pub const DEFAULT_BASE_NAME: &str = "olx_car_cover_results";

const FIELD_NAMES: [&str; 5] = ["title", "price", "location", "url", "image"];

/// Writes `<base_name>.csv` and `<base_name>.json` next to each other and
/// prints the confirmation line. Write failures abort the run; there is no
/// staging or partial-write recovery.
pub fn persist(records: &[ListingRecord], base_name: &str) -> Result<()> {
    let csv_path = format!("{}.csv", base_name);
    let json_path = format!("{}.json", base_name);

    write_csv(records, Path::new(&csv_path))?;
    write_json(records, Path::new(&json_path))?;

    println!(
        "Wrote {} results to {} and {}",
        records.len(),
        csv_path,
        json_path
    );
    Ok(())
}

/// CSV with the fixed column order title,price,location,url,image; missing
/// fields become empty cells. The header is written explicitly so that an
/// empty result set still produces one.
pub fn write_csv(records: &[ListingRecord], path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(FIELD_NAMES)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Pretty-printed JSON array with missing fields as null and non-ASCII text
/// kept literal.
pub fn write_json(records: &[ListingRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    Ok(())
}
