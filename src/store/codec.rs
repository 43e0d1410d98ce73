use crate::models::health_log::{HealthEntry, HealthLog, COLUMNS};

use super::StoreError;

/// Serialize a whole log. The header row is always written, so an empty
/// log still produces a valid file.
pub fn encode(log: &HealthLog) -> Result<Vec<u8>, StoreError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(COLUMNS)?;
    for entry in log.entries() {
        writer.serialize(entry)?;
    }

    writer
        .into_inner()
        .map_err(|e| StoreError::Csv(e.into_error().into()))
}

/// Parse a stored log. Columns are matched by header name: unknown columns
/// are ignored and missing ones load as empty.
pub fn decode(bytes: &[u8]) -> Result<HealthLog, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    let mut entries = Vec::new();
    for (index, record) in reader.deserialize::<HealthEntry>().enumerate() {
        let entry = record.map_err(|e| StoreError::Malformed {
            row: index + 1,
            reason: e.to_string(),
        })?;
        entries.push(entry);
    }

    Ok(HealthLog::from_entries(entries))
}
