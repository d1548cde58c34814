use chrono::{DateTime, Utc};

/// One stream entry as delivered, before the handler decodes it
#[derive(Debug, Clone, PartialEq)]
pub struct StreamEvent {
    /// Entry ID, `"<millis>-<seq>"`
    pub stream_id: String,
    /// Raw value of the `job` field
    pub payload: String,
    /// Taken from the millisecond part of the ID
    pub timestamp: DateTime<Utc>,
}

impl StreamEvent {
    pub fn new(stream_id: impl Into<String>, payload: impl Into<String>) -> Self {
        let stream_id = stream_id.into();
        let timestamp = parse_timestamp(&stream_id);
        Self {
            stream_id,
            payload: payload.into(),
            timestamp,
        }
    }
}

fn parse_timestamp(stream_id: &str) -> DateTime<Utc> {
    stream_id
        .split('-')
        .next()
        .and_then(|ms| ms.parse::<i64>().ok())
        .and_then(DateTime::from_timestamp_millis)
        .unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_from_stream_id() {
        let event = StreamEvent::new("1700000000123-0", "{}");
        assert_eq!(event.timestamp.timestamp_millis(), 1_700_000_000_123);
    }

    #[test]
    fn test_unparseable_id_falls_back_to_now() {
        let before = Utc::now();
        let event = StreamEvent::new("not-an-id", "{}");
        assert!(event.timestamp >= before);
    }
}
