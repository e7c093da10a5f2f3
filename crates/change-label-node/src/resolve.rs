//! Label resolution.
//!
//! Maps a configuration and an incoming message to the new label:
//! - STATIC: the configured literal
//! - MESSAGE_METADATA: metadata value under `labelNameOrPattern`
//! - MESSAGE_DATA: top-level payload field under `labelNameOrPattern`

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{ChangeLabelConfig, LabelSource};
use crate::error::LabelError;
use crate::message::RuleMessage;

/// Determine the new label for `message`.
///
/// Blank results (empty or whitespace only) are rejected with
/// [`LabelError::EmptyLabel`].
pub fn resolve_label(config: &ChangeLabelConfig, message: &RuleMessage) -> Result<String, LabelError> {
    let key = config.label_name_or_pattern.as_deref().unwrap_or("");

    let label = match config.label_source.as_ref() {
        Some(LabelSource::Static) => config.static_label_value.clone().unwrap_or_default(),
        Some(LabelSource::MessageMetadata) => message
            .metadata
            .get(key)
            .cloned()
            .ok_or_else(|| LabelError::MissingMetadataKey(key.to_string()))?,
        Some(LabelSource::MessageData) => label_from_data(&message.data, key)?,
        Some(LabelSource::Unknown(other)) => {
            warn!("[{}] unknown label source: {}", message.originator, other);
            return Err(LabelError::UnknownSource(other.clone()));
        }
        None => return Err(LabelError::MissingSource),
    };

    if label.trim().is_empty() {
        return Err(LabelError::EmptyLabel);
    }

    debug!("[{}] determined new label: '{}'", message.originator, label);
    Ok(label)
}

fn label_from_data(data: &str, key: &str) -> Result<String, LabelError> {
    let payload: Value =
        serde_json::from_str(data).map_err(|e| LabelError::InvalidData(e.to_string()))?;

    let field = payload
        .as_object()
        .and_then(|obj| obj.get(key))
        .ok_or_else(|| LabelError::MissingDataKey(key.to_string()))?;

    // Containers have no text form and resolve to an empty label.
    Ok(match field {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => String::new(),
    })
}
