use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

use super::AnalysisRecord;

#[derive(Debug, Serialize)]
struct HistoryEntry {
    id: i64,
    exchange_id: String,
    timestamp: String,
    mode: String,
    model: String,
    redacted_headers: String,
    truncated: bool,
    result: String,
}

impl From<&AnalysisRecord> for HistoryEntry {
    fn from(record: &AnalysisRecord) -> Self {
        HistoryEntry {
            id: record.id.unwrap_or(0),
            exchange_id: record.exchange_id.clone(),
            timestamp: record.timestamp.clone(),
            mode: record.mode.clone(),
            model: record.model.clone(),
            redacted_headers: record.redacted_headers.clone(),
            truncated: record.truncated,
            result: record.result.clone(),
        }
    }
}

/// Export all records as a JSON string.
pub fn export_json(conn: &Connection) -> Result<String> {
    let records = super::query_all(conn)?;
    let entries: Vec<HistoryEntry> = records.iter().map(HistoryEntry::from).collect();
    let json = serde_json::to_string_pretty(&entries)?;
    Ok(json)
}

/// Export all records as a CSV string. Multi-line reply text is flattened
/// and quoted so each record stays on one row.
pub fn export_csv(conn: &Connection) -> Result<String> {
    let records = super::query_all(conn)?;
    let mut output =
        String::from("id,exchange_id,timestamp,mode,model,redacted_headers,truncated,result\n");
    for record in &records {
        output.push_str(&format!(
            "{},{},{},{},{},\"{}\",{},\"{}\"\n",
            record.id.unwrap_or(0),
            record.exchange_id,
            record.timestamp,
            record.mode,
            record.model,
            record.redacted_headers,
            record.truncated,
            record.result.replace('\n', " ").replace('"', "\"\""),
        ));
    }
    Ok(output)
}
