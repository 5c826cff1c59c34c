//! Line-delimited JSON customer loader.
//!
//! Each line of the source holds one customer object. Lines that do not
//! parse as a customer, including lines that are not valid UTF-8, are
//! logged and skipped; the rest are returned in source order.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use thiserror::Error;
use tracing::{trace, warn};

use crate::models::CustomerRecord;

/// Errors that can occur while loading customer data
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read customer data: {0}")]
    Read(#[from] io::Error),

    #[error("customer data source is empty")]
    EmptySource,
}

/// Customers read from a source plus the number of lines thrown away
#[derive(Debug, Default)]
pub struct LoadReport {
    pub customers: Vec<CustomerRecord>,
    pub skipped_lines: usize,
}

/// Load customers from a file on disk
///
/// A zero-byte file is reported as [`LoadError::EmptySource`] before any
/// parsing happens.
pub fn load_customers_from_path(path: &Path) -> Result<LoadReport, LoadError> {
    let open_error = |source: io::Error| LoadError::Open {
        path: path.display().to_string(),
        source,
    };

    let metadata = fs::metadata(path).map_err(open_error)?;
    if metadata.len() == 0 {
        return Err(LoadError::EmptySource);
    }

    let file = File::open(path).map_err(open_error)?;
    load_customers(BufReader::new(file))
}

/// Load customers from any buffered reader
pub fn load_customers<R: BufRead>(reader: R) -> Result<LoadReport, LoadError> {
    let mut report = LoadReport::default();
    let mut saw_line = false;

    // Split on raw bytes so a badly encoded line is skipped like any other
    // undecodable line instead of failing the read
    for (index, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let line_number = index + 1;
        saw_line = true;

        if line.iter().all(u8::is_ascii_whitespace) {
            trace!("Line {} is blank", line_number);
            continue;
        }

        match serde_json::from_slice::<CustomerRecord>(&line) {
            Ok(customer) => report.customers.push(customer),
            Err(e) => {
                warn!(
                    "Decoding JSON failed on line {} ({}), skipping: {}",
                    line_number,
                    e,
                    String::from_utf8_lossy(&line)
                );
                report.skipped_lines += 1;
            }
        }
    }

    if !saw_line {
        return Err(LoadError::EmptySource);
    }

    Ok(report)
}
