//! CSV export of the result history.

use crate::{ResultRecord, Result};
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    created_at: String,
    display_date: &'a str,
    name: &'a str,
    age: u32,
    gender: String,
    weight_kg: f64,
    height_cm: f64,
    bmi: f64,
    category: &'static str,
    ideal_weight: &'a str,
}

impl<'a> From<&'a ResultRecord> for CsvRow<'a> {
    fn from(record: &'a ResultRecord) -> Self {
        CsvRow {
            id: &record.id,
            created_at: record.created_at.to_rfc3339(),
            display_date: &record.display_date,
            name: record.input.name.as_deref().unwrap_or(""),
            age: record.input.age,
            gender: record.input.gender.to_string(),
            weight_kg: record.input.weight_kg,
            height_cm: record.input.height_cm,
            bmi: record.bmi,
            category: record.category.label(),
            ideal_weight: &record.ideal_weight_label,
        }
    }
}

/// Write records to a CSV file, replacing any existing file
///
/// Rows keep the order given (newest first for a history).
/// Returns the number of rows written.
pub fn write_history_csv(records: &[ResultRecord], csv_path: &Path) -> Result<usize> {
    if let Some(parent) = csv_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(csv_path)?;

    for record in records {
        writer.serialize(CsvRow::from(record))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    file.sync_all()?;

    tracing::info!("Exported {} records to {:?}", records.len(), csv_path);
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, Gender, MeasurementInput};
    use chrono::Utc;

    fn create_test_record(id: &str, name: Option<&str>) -> ResultRecord {
        ResultRecord {
            id: id.into(),
            input: MeasurementInput {
                name: name.map(String::from),
                age: 25,
                gender: Gender::Female,
                weight_kg: 60.0,
                height_cm: 170.0,
            },
            bmi: 20.8,
            category: Category::Normal,
            ideal_weight_label: "61.4 kg".into(),
            created_at: Utc::now(),
            display_date: "18 Oct 2026, 09:55".into(),
        }
    }

    #[test]
    fn test_export_writes_header_and_rows_in_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("out").join("history.csv");
        let records = vec![
            create_test_record("b", Some("Ayu")),
            create_test_record("a", None),
        ];

        let count = write_history_csv(&records, &csv_path).unwrap();
        assert_eq!(count, 2);

        let content = std::fs::read_to_string(&csv_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,created_at,display_date,name,age,gender"));
        assert!(lines[1].starts_with("b,"));
        assert!(lines[1].contains("Ayu"));
        assert!(lines[1].contains("Normal weight"));
        assert!(lines[2].starts_with("a,"));
    }

    #[test]
    fn test_export_replaces_existing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("history.csv");

        write_history_csv(&[create_test_record("a", None)], &csv_path).unwrap();
        write_history_csv(&[create_test_record("b", None)], &csv_path).unwrap();

        let content = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(!content.contains("\na,"));
    }
}
