//! CSV output and a quick look back at what was written.

use crate::{ExtractorError, Record};
use std::fmt;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkOutcome {
    Written { rows: usize },
    /// Nothing to write; the target file was left untouched.
    NoData,
}

/// Write `headers` and then one row per record to `path`, creating parent
/// directories as needed.
pub fn write<R: Record>(
    records: &[R],
    path: &Path,
    headers: &[&str],
) -> Result<SinkOutcome, ExtractorError> {
    if records.is_empty() {
        return Ok(SinkOutcome::NoData);
    }
    if headers.len() != R::HEADERS.len() {
        return Err(ExtractorError::HeaderMismatch {
            headers: headers.len(),
            fields: R::HEADERS.len(),
        });
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(headers)?;
    for record in records {
        writer.write_record(record.fields())?;
    }
    writer.flush()?;

    Ok(SinkOutcome::Written {
        rows: records.len(),
    })
}

const HEAD_ROWS: usize = 5;

/// Shape of a CSV file: dimensions, a few leading rows and how many cells of
/// each column are empty.
#[derive(Debug, PartialEq, Eq)]
pub struct DatasetSummary {
    pub headers: Vec<String>,
    pub rows: usize,
    pub head: Vec<Vec<String>>,
    pub missing: Vec<usize>,
}

impl DatasetSummary {
    pub fn columns(&self) -> usize {
        self.headers.len()
    }
}

pub fn explore(path: &Path) -> Result<DatasetSummary, ExtractorError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(ToString::to_string).collect();

    let mut missing = vec![0; headers.len()];
    let mut head = vec![];
    let mut rows = 0;
    for row in reader.records() {
        let row = row?;
        for (i, count) in missing.iter_mut().enumerate() {
            if row.get(i).map_or(true, |cell| cell.trim().is_empty()) {
                *count += 1;
            }
        }
        if head.len() < HEAD_ROWS {
            head.push(row.iter().map(ToString::to_string).collect());
        }
        rows += 1;
    }

    Ok(DatasetSummary {
        headers,
        rows,
        head,
        missing,
    })
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- First Few Records ---")?;
        writeln!(f, "{}", self.headers.join(" | "))?;
        for row in &self.head {
            writeln!(f, "{}", row.join(" | "))?;
        }
        writeln!(f)?;
        writeln!(f, "--- Dataset Size and Dimensions ---")?;
        writeln!(f, "Rows: {}, Columns: {}", self.rows, self.columns())?;
        writeln!(f)?;
        writeln!(f, "--- Missing Data ---")?;
        for (header, count) in self.headers.iter().zip(&self.missing) {
            writeln!(f, "{:<16} {}", header, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnbc::{MarketRecord, NewsRecord};
    use pretty_assertions::assert_eq;

    fn news(timestamp: &str, title: &str, link: &str) -> NewsRecord {
        NewsRecord {
            timestamp: timestamp.to_string(),
            title: title.to_string(),
            link: link.to_string(),
        }
    }

    #[test]
    fn test_empty_records_leave_file_untouched() {
        let dir = tempfile::tempdir().expect("No temp dir");
        let path = dir.path().join("processed_data").join("news_data.csv");

        let outcome = write::<NewsRecord>(&[], &path, NewsRecord::HEADERS).expect("Sink failed");
        assert_eq!(outcome, SinkOutcome::NoData);
        assert!(!path.exists());

        std::fs::create_dir_all(path.parent().expect("No parent")).expect("No dir");
        std::fs::write(&path, "previous run\n").expect("Write failed");
        write::<NewsRecord>(&[], &path, NewsRecord::HEADERS).expect("Sink failed");
        assert_eq!(
            std::fs::read_to_string(&path).expect("Read failed"),
            "previous run\n"
        );
    }

    #[test]
    fn test_round_trip_through_csv_reader() {
        let dir = tempfile::tempdir().expect("No temp dir");
        let path = dir.path().join("nested").join("news_data.csv");
        let records = vec![
            news("10:32 AM", "Markets rally", "/x"),
            news("", "Oil, gold and \"soft landing\" odds", "/oil"),
            news("9:00 AM", "Line\nbreak", ""),
        ];

        let outcome = write(&records, &path, NewsRecord::HEADERS).expect("Sink failed");
        assert_eq!(outcome, SinkOutcome::Written { rows: 3 });

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .expect("Read failed");
        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.expect("Bad row").iter().map(ToString::to_string).collect())
            .collect();

        let mut expected = vec![NewsRecord::HEADERS
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()];
        expected.extend(
            records
                .iter()
                .map(|r| r.fields().into_iter().map(ToString::to_string).collect()),
        );
        assert_eq!(rows, expected);
    }

    #[test]
    fn test_header_width_must_match() {
        let dir = tempfile::tempdir().expect("No temp dir");
        let path = dir.path().join("market_data.csv");
        let records = vec![MarketRecord::default()];

        let err = write(&records, &path, &["Symbol", "Value"]);
        assert!(matches!(
            err,
            Err(ExtractorError::HeaderMismatch {
                headers: 2,
                fields: 3
            })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_target_is_an_error() {
        let dir = tempfile::tempdir().expect("No temp dir");
        let blocker = dir.path().join("processed_data");
        std::fs::write(&blocker, "not a directory").expect("Write failed");

        let records = vec![MarketRecord::default()];
        let err = write(&records, &blocker.join("market_data.csv"), MarketRecord::HEADERS);
        assert!(err.is_err());
    }

    #[test]
    fn test_explore_counts_missing_cells() {
        let dir = tempfile::tempdir().expect("No temp dir");
        let path = dir.path().join("card_data.csv");
        std::fs::write(
            &path,
            "Title,Link\n3 Days in Lisbon,/lisbon\n,/kyoto\nWeekend in Porto,\n",
        )
        .expect("Write failed");

        let summary = explore(&path).expect("Explore failed");
        assert_eq!(summary.headers, vec!["Title", "Link"]);
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.columns(), 2);
        assert_eq!(summary.missing, vec![1, 1]);
        assert_eq!(summary.head.len(), 3);

        let report = summary.to_string();
        assert!(report.contains("Rows: 3, Columns: 2"));
    }
}
