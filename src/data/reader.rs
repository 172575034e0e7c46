//! JSON dataset reader.

use super::{Dataset, FieldMapping, Record};
use crate::error::{Result, ScatterError};
use serde_json::{Map, Value};
use std::path::Path;

/// Bundled price vs. distance-to-CBD sample.
const SAMPLE_CBD: &str = include_str!("../../assets/price_cbd.json");
/// Bundled price vs. land size sample.
const SAMPLE_LANDSIZE: &str = include_str!("../../assets/price_landsize.json");

/// JSON dataset reader.
#[derive(Debug)]
pub struct DataReader;

impl DataReader {
    /// Read a dataset from a JSON file.
    pub fn read_file(path: &Path, mapping: &FieldMapping) -> Result<Dataset> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ScatterError::file_open(path.to_path_buf(), e))?;
        let dataset = Self::parse(&text, mapping)?;
        tracing::info!(
            "Read {} records from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Parse a dataset from JSON text.
    ///
    /// The top-level value must be an array of objects; each object must carry
    /// numeric values for the mapped x, y and cluster fields.
    pub fn parse(text: &str, mapping: &FieldMapping) -> Result<Dataset> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value, mapping)
    }

    /// Project an already-parsed JSON value onto a field mapping.
    pub fn from_value(value: &Value, mapping: &FieldMapping) -> Result<Dataset> {
        let rows = value
            .as_array()
            .ok_or_else(|| ScatterError::malformed(format!("expected an array, found {}", kind(value))))?;

        let records = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let obj = row.as_object().ok_or_else(|| {
                    ScatterError::malformed(format!("row {} is {}, not an object", i, kind(row)))
                })?;
                Self::read_record(i, obj, mapping)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Dataset::new(
            mapping.x_field.clone(),
            mapping.y_field.clone(),
            records,
        ))
    }

    /// Bundled sample for the CBD distance configuration.
    pub fn sample_cbd() -> Result<Dataset> {
        Self::parse(SAMPLE_CBD, &FieldMapping::new("CBD Distance", "Price"))
    }

    /// Bundled sample for the land size configuration.
    pub fn sample_landsize() -> Result<Dataset> {
        Self::parse(SAMPLE_LANDSIZE, &FieldMapping::new("Landsize", "Price"))
    }

    fn read_record(index: usize, obj: &Map<String, Value>, mapping: &FieldMapping) -> Result<Record> {
        let x = number_field(index, obj, &mapping.x_field)?;
        let y = number_field(index, obj, &mapping.y_field)?;
        let cluster = obj
            .get(&mapping.cluster_field)
            .and_then(Value::as_i64)
            .and_then(|c| i32::try_from(c).ok())
            .ok_or_else(|| {
                ScatterError::malformed(format!(
                    "row {} has no integer field '{}'",
                    index, mapping.cluster_field
                ))
            })?;
        Ok(Record::new(x, y, cluster))
    }
}

fn number_field(index: usize, obj: &Map<String, Value>, field: &str) -> Result<f64> {
    obj.get(field).and_then(Value::as_f64).ok_or_else(|| {
        ScatterError::malformed(format!("row {} has no numeric field '{}'", index, field))
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> FieldMapping {
        FieldMapping::new("CBD Distance", "Price")
    }

    #[test]
    fn parses_array_of_objects() {
        let json = r#"[
            {"CBD Distance": 2, "Price": 300000, "kmeans_3": 0, "Suburb": "Abbotsford"},
            {"CBD Distance": 5.5, "Price": 450000, "kmeans_3": 1}
        ]"#;
        let dataset = DataReader::parse(json, &mapping()).unwrap();
        assert_eq!(dataset.x_field, "CBD Distance");
        assert_eq!(dataset.y_field, "Price");
        assert_eq!(
            dataset.records,
            vec![Record::new(2.0, 300000.0, 0), Record::new(5.5, 450000.0, 1)]
        );
    }

    #[test]
    fn rejects_non_array_input() {
        let err = DataReader::parse(r#"{"CBD Distance": 2}"#, &mapping()).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("expected an array, found an object"));
    }

    #[test]
    fn rejects_missing_field() {
        let json = r#"[{"CBD Distance": 2, "kmeans_3": 0}]"#;
        let err = DataReader::parse(json, &mapping()).unwrap_err();
        assert!(err.to_string().contains("row 0 has no numeric field 'Price'"));
    }

    #[test]
    fn rejects_non_integer_cluster() {
        let json = r#"[{"CBD Distance": 2, "Price": 1, "kmeans_3": "a"}]"#;
        let err = DataReader::parse(json, &mapping()).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn invalid_json_is_a_json_error() {
        let err = DataReader::parse("[{", &mapping()).unwrap_err();
        assert!(matches!(err, ScatterError::Json(_)));
    }

    #[test]
    fn custom_cluster_field() {
        let json = r#"[{"Landsize": 400, "Price": 1, "group": 2}]"#;
        let mapping = FieldMapping::new("Landsize", "Price").with_cluster_field("group");
        let dataset = DataReader::parse(json, &mapping).unwrap();
        assert_eq!(dataset.records[0].cluster, 2);
    }

    #[test]
    fn bundled_samples_load() {
        let cbd = DataReader::sample_cbd().unwrap();
        let land = DataReader::sample_landsize().unwrap();
        assert!(!cbd.is_empty());
        assert!(!land.is_empty());
        assert_ne!(cbd.len(), land.len());
        assert_eq!(land.x_field, "Landsize");
    }

    #[test]
    fn missing_file_is_file_open_error() {
        let err = DataReader::read_file(Path::new("/nonexistent/prices.json"), &mapping())
            .unwrap_err();
        assert!(matches!(err, ScatterError::FileOpen { .. }));
    }
}
