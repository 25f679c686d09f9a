use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::Path;

pub(crate) fn create_dir_all(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match std::fs::create_dir_all(path) {
        Ok(_) => Ok(()),
        Err(e) => match e.kind() {
            ErrorKind::AlreadyExists => Ok(()),
            _ => Err(e).context(format!("Unable to create directory {}", path.display())),
        },
    }
}

/// Creates the parent directory of `path` if it has one.
pub(crate) fn create_parent(path: impl AsRef<Path>) -> Result<()> {
    match path.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => create_dir_all(parent),
        _ => Ok(()),
    }
}

pub(crate) fn write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, contents).context(format!("Unable to write to {}", path.display()))
}

pub(crate) fn read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).context(format!("Unable to read file {}", path.display()))
}

/// Reads every row of a CSV file with a header row into `T`.
pub(crate) fn read_csv<T>(path: impl AsRef<Path>) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context(format!("Unable to open CSV file {}", path.display()))?;
    let mut rows = Vec::new();
    for (ix, result) in rdr.deserialize().enumerate() {
        // Row 1 is the header
        let row: T =
            result.with_context(|| format!("Bad row {} in {}", ix + 2, path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Replaces the contents of `path` with a header row followed by one row per item. The header is
/// written even when there are no rows.
pub(crate) fn write_csv<'a, T>(
    path: impl AsRef<Path>,
    headers: &[&str],
    rows: impl IntoIterator<Item = &'a T>,
) -> Result<()>
where
    T: Serialize + 'a,
{
    let path = path.as_ref();
    create_parent(path)?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .context(format!("Unable to create CSV file {}", path.display()))?;
    wtr.write_record(headers)
        .context(format!("Unable to write header to {}", path.display()))?;
    for row in rows {
        wtr.serialize(row)
            .context(format!("Unable to write row to {}", path.display()))?;
    }
    wtr.flush()
        .context(format!("Unable to flush {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct Row {
        name: String,
        count: u32,
    }

    #[test]
    fn test_write_csv_empty_has_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("rows.csv");
        write_csv::<Row>(&path, &["Name", "Count"], &[]).unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "Name,Count\n");
        let rows: Vec<Row> = read_csv(&path).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rows.csv");
        let rows = vec![
            Row {
                name: "a, with comma".to_string(),
                count: 1,
            },
            Row {
                name: "b".to_string(),
                count: 2,
            },
        ];
        write_csv(&path, &["Name", "Count"], &rows).unwrap();
        let back: Vec<Row> = read_csv(&path).unwrap();
        assert_eq!(back, rows);
    }

    #[test]
    fn test_read_csv_reports_bad_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rows.csv");
        write(&path, "Name,Count\na,1\nb,many\n").unwrap();
        let err = read_csv::<Row>(&path).unwrap_err();
        assert!(err.to_string().contains("Bad row 3"));
    }

    #[test]
    fn test_create_dir_all_twice() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b");
        create_dir_all(&path).unwrap();
        create_dir_all(&path).unwrap();
        assert!(path.is_dir());
    }
}
