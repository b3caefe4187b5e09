use std::fs::File;
use std::path::Path;

use log::debug;

use crate::error::{Result, TraceError};
use crate::trace::Trace;

/// Reads a trace from a CSV file with a header row, taking x and y from the
/// columns named `x_header` and `y_header`.
///
/// Unlike the whitespace reader nothing is skipped: a missing header or an
/// unparsable field is a `MalformedRecord` (line 1 is the header row).
pub fn read_csv_trace<P: AsRef<Path>>(path: P, x_header: &str, y_header: &str) -> Result<Trace> {
    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);

    let headers = rdr.headers()?.clone();
    let column_of = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| TraceError::MalformedRecord {
                line: 1,
                reason: format!("no column named '{}'", name),
            })
    };
    let x_index = column_of(x_header)?;
    let y_index = column_of(y_header)?;

    let mut x = Vec::new();
    let mut y = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        let line = row + 2;
        x.push(parse_field(&record, x_index, line)?);
        y.push(parse_field(&record, y_index, line)?);
    }
    debug!("read {} samples from csv", x.len());

    Trace::new(x, y)
}

fn parse_field(record: &csv::StringRecord, index: usize, line: usize) -> Result<f64> {
    let field = record.get(index).ok_or_else(|| TraceError::MalformedRecord {
        line,
        reason: format!("missing column {}", index),
    })?;
    field.trim().parse::<f64>().map_err(|e| TraceError::MalformedRecord {
        line,
        reason: format!("'{}': {}", field, e),
    })
}

/// Writes a trace as two CSV columns under the given headers.
pub fn write_csv_trace<P: AsRef<Path>>(
    trace: &Trace,
    path: P,
    x_header: &str,
    y_header: &str,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record([x_header, y_header])?;
    for (x, y) in trace.iter() {
        wtr.write_record([x.to_string(), y.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}
