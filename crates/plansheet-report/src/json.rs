use std::path::Path;

use plansheet_core::ProductReport;

use crate::error::ReportError;

/// Writes `reports` as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`ReportError::Json`] on serialization failure or
/// [`ReportError::Io`] if the file cannot be written.
pub fn write_json(path: &Path, reports: &[ProductReport]) -> Result<(), ReportError> {
    let contents = serde_json::to_string_pretty(reports)?;
    std::fs::write(path, contents).map_err(|source| ReportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), rows = reports.len(), "JSON report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use plansheet_core::ProductSummary;

    #[test]
    fn writes_flattened_rows_with_null_slots() {
        let path = std::env::temp_dir().join(format!("plansheet-json-{}.json", std::process::id()));
        let report = ProductReport::assemble(
            ProductSummary::new("https://www.amazon.in", "B0C2NHPZJF", "Godrej Kettle"),
            Vec::new(),
        );
        write_json(&path, &[report]).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(value[0]["asin"], "B0C2NHPZJF");
        assert_eq!(value[0]["link"], "https://www.amazon.in/dp/B0C2NHPZJF");
        assert_eq!(value[0]["plans"], serde_json::json!([null, null, null]));
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let path = std::env::temp_dir()
            .join("plansheet-no-such-dir")
            .join("nested")
            .join("out.json");
        assert!(matches!(write_json(&path, &[]), Err(ReportError::Io { .. })));
    }
}
