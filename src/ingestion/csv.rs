//! CSV ingestion implementation.

use std::path::Path;

use crate::dataset::{PICKING_PRIORITY, TEXT_COLUMNS};
use crate::error::{DashboardError, DashboardResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Ingest a CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - CSV must have headers.
/// - With `schema = Some(..)`, headers must contain all schema fields (order can differ) and each
///   value is parsed according to its field type.
/// - With `schema = None`, every header becomes a field and its type is inferred from the data
///   (see [`infer_schema`]).
pub fn ingest_csv_from_path(path: impl AsRef<Path>, schema: Option<&Schema>) -> DashboardResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr, schema)
}

/// Ingest CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    schema: Option<&Schema>,
) -> DashboardResult<DataSet> {
    let headers = rdr.headers()?.clone();
    let records = rdr.records().collect::<Result<Vec<_>, _>>()?;

    let schema = match schema {
        Some(s) => s.clone(),
        None => infer_schema(&headers, &records),
    };

    // Map schema fields -> CSV column indexes (allows re-ordered CSV columns).
    let mut col_idxs = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        match headers.iter().position(|h| h == field.name) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(DashboardError::SchemaMismatch {
                    message: format!(
                        "missing required column '{field}'. headers={:?}",
                        headers.iter().collect::<Vec<_>>(),
                        field = field.name
                    ),
                });
            }
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(records.len());
    for (row_idx0, record) in records.iter().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (field, &csv_idx) in schema.fields.iter().zip(col_idxs.iter()) {
            let raw = record.get(csv_idx).unwrap_or("");
            row.push(parse_typed_value(user_row, &field.name, &field.data_type, raw)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema, rows))
}

/// Cells read as missing (`Value::Null`) in every column, matched after trimming.
///
/// The usual spreadsheet and dataframe markers for "no value".
pub const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// True for empty or whitespace-only cells and for [`MISSING_MARKERS`].
pub fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || MISSING_MARKERS.contains(&trimmed)
}

/// Infer a schema from headers and raw records.
///
/// Per column, over cells that are not missing (see [`is_missing`]): `Int64` if all parse as
/// integers, otherwise `Float64` if all parse as finite floats, otherwise `Utf8`. The KFH text
/// columns are always `Utf8`. A column without any values is `Utf8`, except `PickingPriority`,
/// which is `Float64`.
pub fn infer_schema(headers: &csv::StringRecord, records: &[csv::StringRecord]) -> Schema {
    let fields = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let data_type = if TEXT_COLUMNS.contains(&name) {
                DataType::Utf8
            } else {
                match infer_column_type(records.iter().map(|r| r.get(idx).unwrap_or(""))) {
                    Some(t) => t,
                    None if name == PICKING_PRIORITY => DataType::Float64,
                    None => DataType::Utf8,
                }
            };
            Field::new(name, data_type)
        })
        .collect();
    Schema::new(fields)
}

/// `None` when the column has no non-empty cells.
fn infer_column_type<'a>(cells: impl Iterator<Item = &'a str>) -> Option<DataType> {
    let mut all_int = true;
    let mut all_float = true;
    let mut any = false;

    for cell in cells.filter(|c| !is_missing(c)).map(str::trim) {
        any = true;
        if all_int && cell.parse::<i64>().is_err() {
            all_int = false;
        }
        if parse_finite(cell).is_err() {
            all_float = false;
            break;
        }
    }

    match (any, all_int, all_float) {
        (false, _, _) => None,
        (true, true, _) => Some(DataType::Int64),
        (true, false, true) => Some(DataType::Float64),
        _ => Some(DataType::Utf8),
    }
}

fn parse_typed_value(
    row: usize,
    column: &str,
    data_type: &DataType,
    raw: &str,
) -> DashboardResult<Value> {
    if is_missing(raw) {
        return Ok(Value::Null);
    }
    let trimmed = raw.trim();

    let parse_error = |message: String| DashboardError::ParseError {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message,
    };

    match data_type {
        // Text keeps surrounding whitespace; "Milk" and "Milk " are different products.
        DataType::Utf8 => Ok(Value::Utf8(raw.to_owned())),
        DataType::Int64 => trimmed
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|e| parse_error(e.to_string())),
        DataType::Float64 => parse_finite(trimmed).map(Value::Float64).map_err(parse_error),
        DataType::Bool => parse_bool(trimmed).map(Value::Bool).map_err(parse_error),
    }
}

/// Infinite values count as unparseable; NaN spellings never get here (see [`MISSING_MARKERS`]).
fn parse_finite(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(v) => Err(format!("expected a finite number, got {v}")),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/1/0/yes/no)".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::ingest_csv_from_reader;
    use crate::error::DashboardError;
    use crate::types::{DataType, Field, Schema, Value};

    fn read(input: &str) -> crate::error::DashboardResult<crate::types::DataSet> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(input.as_bytes());
        ingest_csv_from_reader(&mut rdr, None)
    }

    #[test]
    fn infers_int_float_and_text_columns() {
        let ds = read("a,b,c,d\n1,1.5,x,\n2,3,y,\n").unwrap();
        let types: Vec<_> = ds.schema.fields.iter().map(|f| f.data_type).collect();
        assert_eq!(
            types,
            vec![DataType::Int64, DataType::Float64, DataType::Utf8, DataType::Utf8]
        );
        assert_eq!(ds.rows[1][1], Value::Float64(3.0));
        assert_eq!(ds.rows[0][3], Value::Null);
    }

    #[test]
    fn kfh_text_columns_stay_text_even_when_numeric() {
        let ds = read("RackName,PickingPriority\n12,3\n").unwrap();
        assert_eq!(ds.schema.fields[0].data_type, DataType::Utf8);
        assert_eq!(ds.rows[0][0], Value::Utf8("12".to_string()));
        assert_eq!(ds.rows[0][1], Value::Int64(3));
    }

    #[test]
    fn ragged_rows_are_csv_errors() {
        let err = read("a,b\n1,2\n3\n").unwrap_err();
        assert!(err.to_string().starts_with("csv error"));
    }

    #[test]
    fn numbers_are_trimmed_but_text_is_kept_verbatim() {
        let ds = read("name,n\n  Ada ,  7 \n").unwrap();
        assert_eq!(ds.rows[0], vec![Value::Utf8("  Ada ".to_string()), Value::Int64(7)]);
    }

    #[test]
    fn missing_markers_load_as_null() {
        let ds = read("PickingPriority,ProductName\n2,NA\nNaN,Milk\n N/A ,null\n4.5,#N/A\n").unwrap();
        assert_eq!(ds.schema.fields[0].data_type, DataType::Float64);
        let priorities: Vec<_> = ds.rows.iter().map(|r| r[0].clone()).collect();
        assert_eq!(
            priorities,
            vec![Value::Float64(2.0), Value::Null, Value::Null, Value::Float64(4.5)]
        );
        assert_eq!(ds.rows[0][1], Value::Null);
        assert_eq!(ds.rows[1][1], Value::Utf8("Milk".to_string()));
        assert_eq!(ds.rows[2][1], Value::Null);
    }

    #[test]
    fn only_missing_markers_still_infers_float_priority() {
        let ds = read("PickingPriority\nNA\nnan\n").unwrap();
        assert_eq!(ds.schema.fields[0].data_type, DataType::Float64);
        assert!(ds.rows.iter().all(|r| r[0] == Value::Null));
    }

    #[test]
    fn infinite_values_are_not_numbers() {
        let ds = read("score\n1.5\ninf\n").unwrap();
        assert_eq!(ds.schema.fields[0].data_type, DataType::Utf8);

        let schema = Schema::new(vec![Field::new("score", DataType::Float64)]);
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader("score\n-inf\n".as_bytes());
        let err = ingest_csv_from_reader(&mut rdr, Some(&schema)).unwrap_err();
        match err {
            DashboardError::ParseError { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "score");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
