use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Date32Type, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type,
};
use arrow::temporal_conversions::date32_to_datetime;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{FieldValue, Sighting, SightingCollection};

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// The only column every source must carry.
pub const DATE_COLUMN: &str = "Date";

// Aliases are tried in order; the first present column wins and any later
// alias stays in `Sighting::extra`.
const TOWN_COLUMNS: &[&str] = &["Town"];
const REGION_COLUMNS: &[&str] = &["State/Province", "State"];
const LATITUDE_COLUMNS: &[&str] = &["Latitude"];
const LONGITUDE_COLUMNS: &[&str] = &["Longitude"];
const COUNT_COLUMNS: &[&str] = &["Count", "Number"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure to turn a source into a [`SightingCollection`]. Loading is
/// all-or-nothing: no partial collection is ever returned.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be opened or is not valid tabular data.
    #[error("source unreadable: {context}")]
    SourceUnreadable {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    /// A `Date` cell could not be parsed; `row` is 1-based over data rows.
    #[error("row {row}: cannot parse date '{value}'")]
    DateFormat { row: usize, value: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

impl LoadError {
    fn unreadable(
        context: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        LoadError::SourceUnreadable {
            context: context.into(),
            source: source.into(),
        }
    }
}

pub type LoadResult<T> = Result<T, LoadError>;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a sightings file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one sighting per line (the usual export)
/// * `.parquet` – `Date` as a date, timestamp or string column
/// * `.json`    – `[{ "Date": "...", "Town": "...", ... }, ...]`
pub fn load_file(path: &Path) -> LoadResult<SightingCollection> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let collection = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .map_err(|e| LoadError::unreadable(format!("opening {}", path.display()), e))?;
            load_csv_reader(file)?
        }
        "parquet" | "pq" => load_parquet(path)?,
        "json" => load_json(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} sightings from {} (columns {:?})",
        collection.len(),
        path.display(),
        collection.column_names
    );
    Ok(collection)
}

/// Parse CSV text from any reader.  The header row is required.
pub fn load_csv_reader<R: Read>(reader: R) -> LoadResult<SightingCollection> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::unreadable("reading CSV headers", e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let date_idx = headers
        .iter()
        .position(|h| h == DATE_COLUMN)
        .ok_or_else(|| LoadError::MissingColumn(DATE_COLUMN.to_string()))?;

    let mut sightings = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = row_no + 1;
        let record = result.map_err(|e| LoadError::unreadable(format!("CSV row {row}"), e))?;

        let raw_date = record.get(date_idx).unwrap_or("");
        let date = parse_date(raw_date).ok_or_else(|| LoadError::DateFormat {
            row,
            value: raw_date.to_string(),
        })?;

        let fields = record
            .iter()
            .enumerate()
            .filter(|(col_idx, _)| *col_idx != date_idx)
            .map(|(col_idx, cell)| {
                let name = &headers[col_idx];
                let value = if is_text_column(name) {
                    FieldValue::String(cell.trim().to_string())
                } else {
                    FieldValue::guess(cell)
                };
                (name.clone(), value)
            })
            .collect();

        sightings.push(assemble_sighting(date, fields));
    }

    Ok(SightingCollection::new(sightings, headers))
}

// ---------------------------------------------------------------------------
// Date parsing
// ---------------------------------------------------------------------------

// Order matters: `%Y` happily consumes "4" or "23" as a year, so the
// US month-first forms (two-digit year first) go before `%Y/%m/%d`.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// Parse a calendar date, dropping any time-of-day component.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

// ---------------------------------------------------------------------------
// Row assembly
// ---------------------------------------------------------------------------

fn is_text_column(name: &str) -> bool {
    TOWN_COLUMNS.contains(&name) || REGION_COLUMNS.contains(&name)
}

fn take_first(fields: &mut BTreeMap<String, FieldValue>, aliases: &[&str]) -> Option<FieldValue> {
    aliases.iter().find_map(|alias| fields.remove(*alias))
}

/// Split the known columns out of a row; the rest pass through untouched.
fn assemble_sighting(date: NaiveDate, fields: BTreeMap<String, FieldValue>) -> Sighting {
    let mut extra = fields;
    let town = take_first(&mut extra, TOWN_COLUMNS)
        .map(|v| v.to_string())
        .unwrap_or_default();
    let region = take_first(&mut extra, REGION_COLUMNS)
        .map(|v| v.to_string())
        .unwrap_or_default();
    let latitude = take_first(&mut extra, LATITUDE_COLUMNS).and_then(|v| v.as_f64());
    let longitude = take_first(&mut extra, LONGITUDE_COLUMNS).and_then(|v| v.as_f64());
    let count = take_first(&mut extra, COUNT_COLUMNS).and_then(|v| v.as_f64());

    Sighting {
        date,
        town,
        region,
        latitude,
        longitude,
        count,
        extra,
    }
}

/// Text of one source column for a loaded sighting, for raw-table display.
pub fn display_cell(sighting: &Sighting, column: &str) -> String {
    if let Some(value) = sighting.extra.get(column) {
        return value.to_string();
    }
    let opt = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
    if column == DATE_COLUMN {
        sighting.date.to_string()
    } else if TOWN_COLUMNS.contains(&column) {
        sighting.town.clone()
    } else if REGION_COLUMNS.contains(&column) {
        sighting.region.clone()
    } else if LATITUDE_COLUMNS.contains(&column) {
        opt(sighting.latitude)
    } else if LONGITUDE_COLUMNS.contains(&column) {
        opt(sighting.longitude)
    } else if COUNT_COLUMNS.contains(&column) {
        opt(sighting.count)
    } else {
        String::new()
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`
/// with ISO dates):
///
/// ```json
/// [
///   { "Date": "2023-04-12", "Town": "Austin", "State/Province": "TX", "Count": 3 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> LoadResult<SightingCollection> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| LoadError::unreadable(format!("reading {}", path.display()), e))?;
    load_json_str(&text)
}

fn load_json_str(text: &str) -> LoadResult<SightingCollection> {
    let root: JsonValue =
        serde_json::from_str(text).map_err(|e| LoadError::unreadable("parsing JSON", e))?;

    let records = root.as_array().ok_or_else(|| {
        LoadError::unreadable("parsing JSON", "expected a top-level array of records")
    })?;

    let mut column_names: Vec<String> = Vec::new();
    let mut sightings = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let row = i + 1;
        let obj = rec.as_object().ok_or_else(|| {
            LoadError::unreadable(format!("JSON row {row}"), "record is not an object")
        })?;

        for key in obj.keys() {
            if !column_names.contains(key) {
                column_names.push(key.clone());
            }
        }

        let raw_date = obj
            .get(DATE_COLUMN)
            .ok_or_else(|| LoadError::MissingColumn(DATE_COLUMN.to_string()))?;
        let date = raw_date
            .as_str()
            .and_then(parse_date)
            .ok_or_else(|| LoadError::DateFormat {
                row,
                value: raw_date.to_string(),
            })?;

        let fields = obj
            .iter()
            .filter(|(key, _)| key.as_str() != DATE_COLUMN)
            .map(|(key, val)| (key.clone(), json_to_field(val)))
            .collect();

        sightings.push(assemble_sighting(date, fields));
    }

    Ok(SightingCollection::new(sightings, column_names))
}

fn json_to_field(val: &JsonValue) -> FieldValue {
    match val {
        JsonValue::String(s) => FieldValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                FieldValue::Float(f)
            } else {
                FieldValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => FieldValue::Bool(*b),
        JsonValue::Null => FieldValue::Null,
        other => FieldValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of sightings.
///
/// The `Date` column may be `Date32`, `Date64`, a timestamp, or a string
/// column in one of the formats [`parse_date`] accepts.  Everything else is
/// read cell by cell into [`FieldValue`]s.
fn load_parquet(path: &Path) -> LoadResult<SightingCollection> {
    let file = std::fs::File::open(path)
        .map_err(|e| LoadError::unreadable(format!("opening {}", path.display()), e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| LoadError::unreadable("reading parquet metadata", e))?;
    let column_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder
        .build()
        .map_err(|e| LoadError::unreadable("building parquet reader", e))?;

    let mut sightings = Vec::new();

    for batch_result in reader {
        let batch =
            batch_result.map_err(|e| LoadError::unreadable("reading parquet record batch", e))?;
        let schema = batch.schema();

        let date_idx = schema
            .index_of(DATE_COLUMN)
            .map_err(|_| LoadError::MissingColumn(DATE_COLUMN.to_string()))?;
        let dates = date_column(batch.column(date_idx), sightings.len())?;

        let other_cols: Vec<(usize, String)> = schema
            .fields()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != date_idx)
            .map(|(i, f)| (i, f.name().clone()))
            .collect();

        for (row, date) in dates.into_iter().enumerate() {
            let fields = other_cols
                .iter()
                .map(|(col_idx, name)| {
                    (name.clone(), extract_field_value(batch.column(*col_idx), row))
                })
                .collect();
            sightings.push(assemble_sighting(date, fields));
        }
    }

    Ok(SightingCollection::new(sightings, column_names))
}

// -- Parquet / Arrow helpers --

/// Convert the `Date` column of one batch; `offset` is the number of rows
/// already read from earlier batches, for error messages.
fn date_column(col: &ArrayRef, offset: usize) -> LoadResult<Vec<NaiveDate>> {
    let bad = |row: usize, value: String| LoadError::DateFormat {
        row: offset + row + 1,
        value,
    };

    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
            let options = FormatOptions::default();
            let formatter = ArrayFormatter::try_new(col.as_ref(), &options)
                .map_err(|e| LoadError::unreadable("formatting Date column", e))?;
            (0..col.len())
                .map(|row| {
                    if col.is_null(row) {
                        return Err(bad(row, "<null>".to_string()));
                    }
                    let text = formatter.value(row).to_string();
                    parse_date(&text).ok_or_else(|| bad(row, text))
                })
                .collect()
        }
        _ => {
            let days = arrow::compute::cast(col.as_ref(), &DataType::Date32)
                .map_err(|e| LoadError::unreadable("casting Date column", e))?;
            let days = days.as_primitive::<Date32Type>();
            (0..days.len())
                .map(|row| {
                    if days.is_null(row) {
                        return Err(bad(row, "<null>".to_string()));
                    }
                    let v = days.value(row);
                    date32_to_datetime(v)
                        .map(|dt| dt.date())
                        .ok_or_else(|| bad(row, v.to_string()))
                })
                .collect()
        }
    }
}

/// Extract a single pass-through value from an Arrow column at a given row.
fn extract_field_value(col: &ArrayRef, row: usize) -> FieldValue {
    if col.is_null(row) {
        return FieldValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => FieldValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => FieldValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int16 => FieldValue::Integer(col.as_primitive::<Int16Type>().value(row) as i64),
        DataType::Int32 => FieldValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => FieldValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => FieldValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => FieldValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => FieldValue::Bool(col.as_boolean().value(row)),
        _ => {
            let options = FormatOptions::default();
            match ArrayFormatter::try_new(col.as_ref(), &options) {
                Ok(formatter) => FieldValue::String(formatter.value(row).to_string()),
                Err(_) => FieldValue::String(format!("{:?}", col.data_type())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use arrow::array::{
        BooleanArray, Date32Array, Float64Array, Int64Array, StringArray,
        TimestampMillisecondArray,
    };
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const SAMPLE: &str = "\
Date,Town,State/Province,Latitude,Longitude,Count,Stage
2023-01-01,Austin,TX,30.27,-97.74,3,adult
2023-01-01,Austin,TX,,,,egg
02/01/2023,Houston,TX,29.76,-95.37,1,adult
\"Mar 01, 2023\",Reno,NV,39.53,-119.81,12,larva
";

    #[test]
    fn loads_every_row_with_typed_dates() {
        let c = load_csv_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(c.len(), 4);
        assert_eq!(
            c.column_names,
            vec!["Date", "Town", "State/Province", "Latitude", "Longitude", "Count", "Stage"]
        );

        let dates: Vec<NaiveDate> = c.iter().map(|s| s.date).collect();
        assert_eq!(
            dates,
            vec![day(2023, 1, 1), day(2023, 1, 1), day(2023, 2, 1), day(2023, 3, 1)]
        );

        let first = &c.sightings[0];
        assert_eq!(first.town, "Austin");
        assert_eq!(first.region, "TX");
        assert_eq!(first.coordinates(), Some((30.27, -97.74)));
        assert_eq!(first.count, Some(3.0));
        assert_eq!(
            first.extra.get("Stage"),
            Some(&FieldValue::String("adult".to_string()))
        );
        assert!(!first.extra.contains_key("Town"));

        let second = &c.sightings[1];
        assert_eq!(second.coordinates(), None);
        assert_eq!(second.count, None);
    }

    #[test]
    fn display_cells_follow_source_columns() {
        let csv = "Date,Town,State,State/Province,Count\n4/12/2023,Austin,Texas,TX,\n";
        let c = load_csv_reader(csv.as_bytes()).unwrap();
        let s = &c.sightings[0];
        assert_eq!(s.region, "TX");
        let cells: Vec<String> = c.column_names.iter().map(|col| display_cell(s, col)).collect();
        assert_eq!(cells, vec!["2023-04-12", "Austin", "Texas", "TX", ""]);
    }

    #[test]
    fn bad_date_fails_the_whole_load() {
        let csv = "Date,Town,State/Province\n2023-01-01,Austin,TX\n2023-02-30,Austin,TX\n";
        match load_csv_reader(csv.as_bytes()) {
            Err(LoadError::DateFormat { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "2023-02-30");
            }
            other => panic!("expected DateFormat error, got {other:?}"),
        }
    }

    #[test]
    fn empty_date_is_a_date_error() {
        let csv = "Date,Town\n,Austin\n";
        assert!(matches!(
            load_csv_reader(csv.as_bytes()),
            Err(LoadError::DateFormat { row: 1, .. })
        ));
    }

    #[test]
    fn missing_date_column() {
        let csv = "Day,Town\n2023-01-01,Austin\n";
        assert!(matches!(
            load_csv_reader(csv.as_bytes()),
            Err(LoadError::MissingColumn(col)) if col == "Date"
        ));
    }

    #[test]
    fn ragged_rows_are_unreadable() {
        let csv = "Date,Town,State/Province\n2023-01-01,Austin\n";
        assert!(matches!(
            load_csv_reader(csv.as_bytes()),
            Err(LoadError::SourceUnreadable { .. })
        ));
    }

    #[test]
    fn non_finite_numbers_load_as_missing() {
        let csv = "Date,Town,State/Province,Latitude,Longitude,Count\n2023-01-01,A,TX,NaN,nan,inf\n";
        let c = load_csv_reader(csv.as_bytes()).unwrap();
        let s = &c.sightings[0];
        assert_eq!(s.count, None);
        assert_eq!(s.latitude, None);
        assert_eq!(s.longitude, None);
        assert_eq!(s.coordinates(), None);
        assert_eq!(s.individuals(), 1.0);
    }

    #[test]
    fn header_only_source_is_empty() {
        let c = load_csv_reader("Date,Town,State/Province\n".as_bytes()).unwrap();
        assert!(c.is_empty());
    }

    #[test]
    fn state_alias_and_text_towns() {
        let csv = "Date,Town,State,Number\n2023-05-04,007,QC,2\n";
        let c = load_csv_reader(csv.as_bytes()).unwrap();
        let s = &c.sightings[0];
        assert_eq!(s.town, "007");
        assert_eq!(s.region, "QC");
        assert_eq!(s.count, Some(2.0));
    }

    #[test]
    fn date_formats() {
        assert_eq!(parse_date("2023-04-12"), Some(day(2023, 4, 12)));
        assert_eq!(parse_date(" 2023/04/12 "), Some(day(2023, 4, 12)));
        assert_eq!(parse_date("4/12/2023"), Some(day(2023, 4, 12)));
        assert_eq!(parse_date("4/12/23"), Some(day(2023, 4, 12)));
        assert_eq!(parse_date("12-Apr-2023"), Some(day(2023, 4, 12)));
        assert_eq!(parse_date("April 12, 2023"), Some(day(2023, 4, 12)));
        assert_eq!(parse_date("2023-04-12 08:30:00"), Some(day(2023, 4, 12)));
        assert_eq!(parse_date("2023-04-12T08:30:00"), Some(day(2023, 4, 12)));
        assert_eq!(parse_date("2023-04-12T08:30:00-05:00"), Some(day(2023, 4, 12)));
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn json_records() {
        let json = r#"[
            {"Date": "2023-01-01", "Town": "Austin", "State/Province": "TX", "Count": 4},
            {"Date": "2023-03-01", "Town": "Reno", "State/Province": "NV", "Note": null}
        ]"#;
        let c = load_json_str(json).unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(
            c.column_names,
            vec!["Date", "Town", "State/Province", "Count", "Note"]
        );
        assert_eq!(c.sightings[0].count, Some(4.0));
        assert_eq!(c.sightings[1].region, "NV");
        assert_eq!(c.sightings[1].extra.get("Note"), Some(&FieldValue::Null));
        assert!(c.column_names.contains(&"Note".to_string()));
    }

    #[test]
    fn json_columns_keep_source_order() {
        let json = r#"[{"Town": "Austin", "State/Province": "TX", "Date": "2023-01-01", "Count": 1}]"#;
        let c = load_json_str(json).unwrap();
        assert_eq!(c.column_names, vec!["Town", "State/Province", "Date", "Count"]);
    }

    #[test]
    fn json_bad_date() {
        let json = r#"[{"Date": 20230101, "Town": "Austin"}]"#;
        assert!(matches!(
            load_json_str(json),
            Err(LoadError::DateFormat { row: 1, .. })
        ));
    }

    // -- Parquet --

    fn epoch_days(d: NaiveDate) -> i32 {
        (d - day(1970, 1, 1)).num_days() as i32
    }

    /// Write a three-column sightings file whose `Date` column is `dates`.
    fn write_parquet(dir: &tempfile::TempDir, dates: ArrayRef) -> std::path::PathBuf {
        let n = dates.len();
        let schema = Arc::new(Schema::new(vec![
            Field::new("Town", DataType::Utf8, false),
            Field::new("Date", dates.data_type().clone(), true),
            Field::new("State/Province", DataType::Utf8, false),
            Field::new("Count", DataType::Int64, true),
            Field::new("Latitude", DataType::Float64, true),
            Field::new("Verified", DataType::Boolean, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Austin"; n])),
                dates,
                Arc::new(StringArray::from(vec!["TX"; n])),
                Arc::new(Int64Array::from((1..=n as i64).collect::<Vec<_>>())),
                Arc::new(Float64Array::from(vec![Some(30.27); n])),
                Arc::new(BooleanArray::from(vec![Some(true); n])),
            ],
        )
        .unwrap();

        let path = dir.path().join("sightings.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        path
    }

    #[test]
    fn parquet_date32_column() {
        let dir = tempfile::tempdir().unwrap();
        let dates = Date32Array::from(vec![
            epoch_days(day(2023, 1, 1)),
            epoch_days(day(2023, 2, 1)),
        ]);
        let path = write_parquet(&dir, Arc::new(dates));

        let c = load_file(&path).unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(
            c.column_names,
            vec!["Town", "Date", "State/Province", "Count", "Latitude", "Verified"]
        );
        let s = &c.sightings[1];
        assert_eq!(s.date, day(2023, 2, 1));
        assert_eq!(s.town, "Austin");
        assert_eq!(s.region, "TX");
        assert_eq!(s.count, Some(2.0));
        assert_eq!(s.latitude, Some(30.27));
        assert_eq!(s.extra.get("Verified"), Some(&FieldValue::Bool(true)));
    }

    #[test]
    fn parquet_timestamp_column_keeps_the_date() {
        let dir = tempfile::tempdir().unwrap();
        let ms = |d: NaiveDate| d.and_hms_opt(8, 30, 0).unwrap().and_utc().timestamp_millis();
        let dates = TimestampMillisecondArray::from(vec![ms(day(2023, 4, 12)), ms(day(2023, 9, 30))]);
        let path = write_parquet(&dir, Arc::new(dates));

        let c = load_file(&path).unwrap();
        let dates: Vec<NaiveDate> = c.iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![day(2023, 4, 12), day(2023, 9, 30)]);
    }

    #[test]
    fn parquet_null_date_is_a_date_error() {
        let dir = tempfile::tempdir().unwrap();
        let dates = Date32Array::from(vec![Some(epoch_days(day(2023, 1, 1))), None]);
        let path = write_parquet(&dir, Arc::new(dates));

        match load_file(&path) {
            Err(LoadError::DateFormat { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "<null>");
            }
            other => panic!("expected DateFormat error, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_extension() {
        assert!(matches!(
            load_file(Path::new("sightings.xlsx")),
            Err(LoadError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn missing_file_is_unreadable() {
        assert!(matches!(
            load_file(Path::new("/nonexistent/sightings.csv")),
            Err(LoadError::SourceUnreadable { .. })
        ));
    }
}
