//! Output formatting for CLI display.

use crate::model::PositionRecord;

use super::OutputFormat;

/// Render a record in the requested output format.
pub(super) fn render_record(record: &PositionRecord, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Text => Ok(record.to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(record)
            .map_err(|e| format!("failed to serialize record: {e}")),
    }
}
