use crate::domain::{Interval, Task, TaskCollection, Timestamp};
use crate::error::{RecordError, StoreError};
use chrono::DateTime;

/// Field separator in `.srs` records
pub const SEPARATOR: char = '|';

/// Lines starting with this character are comments
pub const COMMENT: char = '#';

/// Result of decoding a whole `.srs` file
#[derive(Debug, Clone, Default)]
pub struct Decoded {
    pub tasks: TaskCollection,
    /// Comment lines in file order, trimmed. Shown to the user, never written back.
    pub comments: Vec<String>,
}

/// Decode a `.srs` file.
///
/// Blank and `#` lines are skipped. The first record that fails to decode
/// aborts the whole file; no partial collection is returned.
pub fn decode_collection(content: &str) -> Result<Decoded, StoreError> {
    let mut decoded = Decoded::default();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();

        // Skip empty lines and keep comments aside
        if line.is_empty() {
            continue;
        }
        if line.starts_with(COMMENT) {
            decoded.comments.push(line.to_string());
            continue;
        }

        let task = decode_line(line).map_err(|source| StoreError::Decode {
            line: index + 1,
            source,
        })?;
        decoded.tasks.push(task);
    }

    Ok(decoded)
}

/// Decode one record: `create|update|interval|subject|name`
pub fn decode_line(line: &str) -> Result<Task, RecordError> {
    let fields: Vec<&str> = line.split(SEPARATOR).collect();
    let [create, update, interval, subject, name] = fields[..] else {
        return Err(RecordError::MalformedRecord { fields: fields.len() });
    };

    Ok(Task {
        create_time: parse_timestamp("create", create)?,
        update_time: parse_timestamp("update", update)?,
        interval: interval.parse::<Interval>()?,
        subject: subject.to_string(),
        name: name.to_string(),
    })
}

fn parse_timestamp(field: &'static str, value: &str) -> Result<Timestamp, RecordError> {
    DateTime::parse_from_rfc3339(value).map_err(|e| RecordError::InvalidTimestamp {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
