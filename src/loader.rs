use crate::{Dataset, Error, LabeledExample, Result};
use alloc::{string::String, vec::Vec};
use serde::Deserialize;
use std::{fs::File, io, path::Path, string::ToString};

/// Reads a comma separated matrix of real numbers, one example per line.
///
/// Every token must parse as a finite number; the first one that doesn't fails the load with
/// [`Error::Parse`] carrying its 1-based row and column. Blank lines are skipped and do not
/// count as rows, so `row` numbers records the same way [`Dataset::new`] does. Rows of
/// differing width are rejected. Nothing is returned unless every row is valid.
pub fn load_rows<R: io::Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| Error::Csv(e.to_string()))?;
        let row = index + 1;
        let values = record
            .iter()
            .enumerate()
            .map(|(column, token)| match token.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(value),
                _ => Err(Error::Parse {
                    row,
                    column: column + 1,
                    token: token.to_string(),
                }),
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(values);
    }

    let dataset = Dataset::new(rows)?;
    tracing::debug!(
        rows = dataset.len(),
        columns = dataset.width(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Opens `path` and reads it with [`load_rows`].
pub fn load_rows_from_path(path: impl AsRef<Path>) -> Result<Dataset> {
    load_rows(io::BufReader::new(File::open(path)?))
}

#[derive(Deserialize)]
struct SequenceRecord {
    #[serde(rename = "SequenceName")]
    name: String,
    #[serde(rename = "SequenceData")]
    data: Vec<f64>,
}

/// Reads a JSON array of named sequences, labeling each sequence with its name.
///
/// ```json
/// [{ "SequenceName": "S1", "SequenceData": [8039, 8738, 9334] }]
/// ```
pub fn load_sequences<R: io::Read>(reader: R) -> Result<Vec<LabeledExample<String>>> {
    let records: Vec<SequenceRecord> =
        serde_json::from_reader(reader).map_err(|e| Error::Json(e.to_string()))?;
    tracing::debug!(sequences = records.len(), "loaded sequences");
    Ok(records
        .into_iter()
        .map(|SequenceRecord { name, data }| LabeledExample::new(data, name))
        .collect())
}

/// Opens `path` and reads it with [`load_sequences`].
pub fn load_sequences_from_path(path: impl AsRef<Path>) -> Result<Vec<LabeledExample<String>>> {
    load_sequences(io::BufReader::new(File::open(path)?))
}
