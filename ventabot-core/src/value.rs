/// Metadata values are arbitrary JSON, same as the wire formats we speak.
pub type Value = serde_json::Value;
