use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::{Record, Result};

/// Where `write_all` put the results. `csv` is `None` when there was nothing to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub csv: Option<PathBuf>,
    pub json: PathBuf,
}

/// Creates `output_dir` if needed and writes `<file_stem>.csv` and `<file_stem>.json`,
/// overwriting older files.
pub async fn write_all(records: &[Record], output_dir: &Path, file_stem: &str) -> Result<Written> {
    fs::create_dir_all(output_dir).await?;

    let csv_path = output_dir.join(format!("{file_stem}.csv"));
    let json_path = output_dir.join(format!("{file_stem}.json"));

    let csv = write_csv(records, &csv_path).await?.then_some(csv_path);
    write_json(records, &json_path).await?;

    Ok(Written {
        csv,
        json: json_path,
    })
}

/// Writes a header row plus one row per record.
/// For an empty slice no file is written and a CSV left over from an earlier run is removed,
/// the return value says whether a file was produced.
pub async fn write_csv(records: &[Record], path: &Path) -> Result<bool> {
    if records.is_empty() {
        match fs::remove_file(path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => return Err(e.into()),
            _ => return Ok(false),
        }
    }

    let mut wtr = csv::Writer::from_writer(Vec::new());
    for record in records {
        wtr.serialize(record)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    fs::write(path, bytes).await?;
    Ok(true)
}

/// Writes the records as a pretty-printed JSON array, `[]` when there are none.
pub async fn write_json(records: &[Record], path: &Path) -> Result<()> {
    let mut bytes = serde_json::to_vec_pretty(records)?;
    bytes.push(b'\n');
    fs::write(path, bytes).await?;
    Ok(())
}
