use super::parser::{COMMENT, SEPARATOR};
use crate::domain::{Task, TaskCollection, Timestamp};
use chrono::SecondsFormat;

/// Serialize a collection into `.srs` file contents.
///
/// The output starts with a generated "last updated" comment followed by
/// one record per task in collection order.
pub fn encode_collection(collection: &TaskCollection, now: Timestamp) -> String {
    let mut output = String::new();

    output.push_str(&format!("{} last updated: {}\n", COMMENT, format_timestamp(&now)));
    for task in collection.tasks() {
        output.push_str(&encode_line(task));
        output.push('\n');
    }

    output
}

/// Serialize a single task: `create|update|interval|subject|name`
pub fn encode_line(task: &Task) -> String {
    format!(
        "{create}{sep}{update}{sep}{interval}{sep}{subject}{sep}{name}",
        create = format_timestamp(&task.create_time),
        update = format_timestamp(&task.update_time),
        interval = task.interval,
        subject = task.subject,
        name = task.name,
        sep = SEPARATOR,
    )
}

/// RFC 3339 with `Z` for UTC and sub-second digits only when present
fn format_timestamp(timestamp: &Timestamp) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
