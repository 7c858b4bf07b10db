//! Import of numeric data from a simple csv format.

#[cfg(test)]
#[path = "../../tests/unit/extensions/import_test.rs"]
mod import_test;

pub use self::actual::read_csv_matrix;

#[cfg(feature = "csv-format")]
mod actual {
    extern crate csv;

    use clustering_core::prelude::{Float, Matrix};
    use std::io::{BufReader, Read};

    /// Reads a matrix from csv where each record is a row of numeric features.
    /// When `has_header` is not specified, the first record is treated as a header if any of
    /// its fields is not a number.
    pub fn read_csv_matrix<R: Read>(reader: BufReader<R>, has_header: Option<bool>) -> Result<Matrix, String> {
        let mut reader =
            csv::ReaderBuilder::new().has_headers(false).trim(csv::Trim::All).flexible(true).from_reader(reader);

        let mut rows: Vec<Vec<Float>> = vec![];
        for (idx, record) in reader.records().enumerate() {
            let record = record.map_err(|err| format!("cannot read csv record: '{err}'"))?;

            if idx == 0 && has_header.unwrap_or_else(|| !is_numeric_record(&record)) {
                continue;
            }

            let row = record
                .iter()
                .enumerate()
                .map(|(column, field)| {
                    field.parse::<Float>().map_err(|err| {
                        format!("cannot parse value '{field}' at record {}, column {}: '{err}'", idx + 1, column + 1)
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            rows.push(row);
        }

        if rows.is_empty() {
            return Err("csv has no data records".to_string());
        }

        Matrix::from_rows(rows).map_err(|err| format!("cannot create matrix from csv: '{err}'"))
    }

    fn is_numeric_record(record: &csv::StringRecord) -> bool {
        record.iter().all(|field| field.parse::<Float>().is_ok())
    }
}

#[cfg(not(feature = "csv-format"))]
mod actual {
    use clustering_core::prelude::Matrix;
    use std::io::{BufReader, Read};

    /// A stub method for reading matrix from csv format.
    pub fn read_csv_matrix<R: Read>(_reader: BufReader<R>, _has_header: Option<bool>) -> Result<Matrix, String> {
        unreachable!("csv-format feature is not included")
    }
}
