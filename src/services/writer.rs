//! Output writers for the selected customers.
//!
//! Two files are produced side by side:
//! - `output.txt`, one JSON object per customer, keys and values exactly as
//!   they were read (whitespace is not kept)
//! - `output.csv`, user id and name per customer

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::models::CustomerRecord;

pub const TEXT_FILE_NAME: &str = "output.txt";
pub const CSV_FILE_NAME: &str = "output.csv";

/// Header row of the CSV output; the empty third column keeps the trailing comma
const CSV_HEADER: [&str; 3] = ["User ID", " Name", ""];

/// Errors that can occur during write operations
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create output directory '{path}': {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to create file '{path}': {source}")]
    CreateFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Locations of the files written by [`write_outputs`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub text: PathBuf,
    pub csv: PathBuf,
}

/// Write both output files into `output_dir`, creating it if needed
pub fn write_outputs(
    output_dir: &Path,
    customers: &[&CustomerRecord],
) -> Result<OutputPaths, WriteError> {
    if !output_dir.as_os_str().is_empty() && !output_dir.exists() {
        fs::create_dir_all(output_dir).map_err(|e| WriteError::CreateDirectory {
            path: output_dir.display().to_string(),
            source: e,
        })?;
    }

    let paths = OutputPaths {
        text: output_dir.join(TEXT_FILE_NAME),
        csv: output_dir.join(CSV_FILE_NAME),
    };

    write_text(create_file(&paths.text)?, customers)?;
    write_csv(create_file(&paths.csv)?, customers)?;

    debug!("Wrote {} customers to {} and {}", customers.len(), paths.text.display(), paths.csv.display());

    Ok(paths)
}

fn create_file(path: &Path) -> Result<BufWriter<File>, WriteError> {
    let file = File::create(path).map_err(|e| WriteError::CreateFile {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(BufWriter::new(file))
}

/// One compact JSON object per line, in the given order
pub fn write_text<W: Write>(mut writer: W, customers: &[&CustomerRecord]) -> Result<(), WriteError> {
    for customer in customers {
        serde_json::to_writer(&mut writer, customer)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// `User ID, Name,` header followed by `user_id,name,` rows
pub fn write_csv<W: Write>(writer: W, customers: &[&CustomerRecord]) -> Result<(), WriteError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;
    for customer in customers {
        let user_id = customer.user_id().to_string();
        let name = customer.display_name();
        csv_writer.write_record([user_id.as_str(), name.as_ref(), ""])?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_customers() -> Vec<CustomerRecord> {
        vec![
            CustomerRecord::new(4, "Ian Kehoe", "53.2451022", "-6.238335"),
            CustomerRecord::new(5, "Nora Dempsey", "53.1302756", "-6.2397222"),
            CustomerRecord::new(6, "Theresa Enright", "53.1229599", "-6.2705202"),
        ]
    }

    #[test]
    fn test_text_output() {
        let customers = sorted_customers();
        let refs: Vec<&CustomerRecord> = customers.iter().collect();
        let mut buffer = Vec::new();

        write_text(&mut buffer, &refs).unwrap();

        let expected = concat!(
            r#"{"user_id":4,"name":"Ian Kehoe","latitude":"53.2451022","longitude":"-6.238335"}"#,
            "\n",
            r#"{"user_id":5,"name":"Nora Dempsey","latitude":"53.1302756","longitude":"-6.2397222"}"#,
            "\n",
            r#"{"user_id":6,"name":"Theresa Enright","latitude":"53.1229599","longitude":"-6.2705202"}"#,
            "\n",
        );
        assert_eq!(String::from_utf8(buffer).unwrap(), expected);
    }

    #[test]
    fn test_csv_output() {
        let customers = sorted_customers();
        let refs: Vec<&CustomerRecord> = customers.iter().collect();
        let mut buffer = Vec::new();

        write_csv(&mut buffer, &refs).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "User ID, Name,\n4,Ian Kehoe,\n5,Nora Dempsey,\n6,Theresa Enright,\n"
        );
    }

    #[test]
    fn test_csv_quotes_names_with_commas() {
        let customer = CustomerRecord::new(7, "Kehoe, Ian", "53.2451022", "-6.238335");
        let mut buffer = Vec::new();

        write_csv(&mut buffer, &[&customer]).unwrap();

        assert_eq!(String::from_utf8(buffer).unwrap(), "User ID, Name,\n7,\"Kehoe, Ian\",\n");
    }

    #[test]
    fn test_text_output_keeps_source_fields() {
        let line = r#"{"b": 2, "user_id": 5, "a": 1, "latitude": 53, "longitude": "-6.2", "name": 7}"#;
        let customer: CustomerRecord = serde_json::from_str(line).unwrap();
        let mut buffer = Vec::new();

        write_text(&mut buffer, &[&customer]).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "{\"b\":2,\"user_id\":5,\"a\":1,\"latitude\":53,\"longitude\":\"-6.2\",\"name\":7}\n"
        );
    }

    #[test]
    fn test_csv_renders_non_string_names() {
        let line = r#"{"user_id": 3, "latitude": 53.3, "longitude": -6.2, "name": 7}"#;
        let numbered: CustomerRecord = serde_json::from_str(line).unwrap();
        let unnamed: CustomerRecord =
            serde_json::from_str(r#"{"user_id": 9, "latitude": 53.3, "longitude": -6.2}"#).unwrap();
        let mut buffer = Vec::new();

        write_csv(&mut buffer, &[&numbered, &unnamed]).unwrap();

        assert_eq!(String::from_utf8(buffer).unwrap(), "User ID, Name,\n3,7,\n9,,\n");
    }

    #[test]
    fn test_empty_selection_writes_header_only() {
        let mut text = Vec::new();
        let mut csv = Vec::new();

        write_text(&mut text, &[]).unwrap();
        write_csv(&mut csv, &[]).unwrap();

        assert!(text.is_empty());
        assert_eq!(String::from_utf8(csv).unwrap(), "User ID, Name,\n");
    }
}
