//! Id and timestamp helpers.

use chrono::Utc;

/// Generate an 8-character hex id for entities created on this client.
///
/// The server may replace it on create; entities created offline keep it.
pub fn generate_entity_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let timestamp = (duration.as_secs() as u32) ^ (duration.subsec_nanos());
    format!("{:08x}", timestamp)
}

/// Current datetime as an opaque display string.
pub fn current_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
