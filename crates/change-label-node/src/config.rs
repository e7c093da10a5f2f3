//! Node configuration record.
//!
//! This is the record the rule chain editor persists for the node and hands
//! to the configuration control. Unknown keys ride along in `extra` so a
//! round trip through the editor never drops them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Where the new label comes from.
///
/// Values outside the three known sources are kept verbatim in
/// [`LabelSource::Unknown`] so they survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LabelSource {
    /// Label is a fixed string
    Static,
    /// Label is read from message metadata
    MessageMetadata,
    /// Label is read from a field of the JSON message payload
    MessageData,
    /// Any other wire value
    Unknown(String),
}

impl LabelSource {
    pub const STATIC: &'static str = "STATIC";
    pub const MESSAGE_METADATA: &'static str = "MESSAGE_METADATA";
    pub const MESSAGE_DATA: &'static str = "MESSAGE_DATA";

    /// Wire name of this source.
    pub fn as_str(&self) -> &str {
        match self {
            LabelSource::Static => Self::STATIC,
            LabelSource::MessageMetadata => Self::MESSAGE_METADATA,
            LabelSource::MessageData => Self::MESSAGE_DATA,
            LabelSource::Unknown(s) => s,
        }
    }

    /// Returns true for the three sources the node knows how to resolve.
    pub fn is_known(&self) -> bool {
        !matches!(self, LabelSource::Unknown(_))
    }
}

impl From<String> for LabelSource {
    fn from(s: String) -> Self {
        match s.as_str() {
            Self::STATIC => LabelSource::Static,
            Self::MESSAGE_METADATA => LabelSource::MessageMetadata,
            Self::MESSAGE_DATA => LabelSource::MessageData,
            _ => LabelSource::Unknown(s),
        }
    }
}

impl From<&str> for LabelSource {
    fn from(s: &str) -> Self {
        LabelSource::from(s.to_string())
    }
}

impl From<LabelSource> for String {
    fn from(source: LabelSource) -> Self {
        match source {
            LabelSource::Unknown(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for LabelSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(LabelSource::from(s))
    }
}

impl fmt::Display for LabelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration of the Change Entity Label node.
///
/// Every field is optional on the wire. Missing or malformed values load as
/// `None` instead of failing, the editor decides what is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLabelConfig {
    /// Discriminant: where the label comes from
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub label_source: Option<LabelSource>,

    /// Literal label, used when the source is STATIC
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub static_label_value: Option<String>,

    /// Metadata key or payload field name, used for MESSAGE_METADATA and MESSAGE_DATA
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub label_name_or_pattern: Option<String>,

    /// Entity type hint ("DEVICE", "ASSET", ...), informational only
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub target_entity_type: Option<String>,

    /// Keys this node does not interpret, preserved as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChangeLabelConfig {
    /// The configuration a freshly dropped node starts with.
    pub fn default_configuration() -> Self {
        Self {
            label_source: Some(LabelSource::Static),
            static_label_value: Some("NewLabel".to_string()),
            label_name_or_pattern: Some(String::new()),
            target_entity_type: Some(String::new()),
            extra: Map::new(),
        }
    }

    /// Parse from a JSON value, tolerating missing fields.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Convert to a JSON value for the host.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Accept any JSON scalar for a string-like field.
///
/// Strings pass through, numbers and booleans keep their text, null and
/// containers load as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(T::from(s)),
        Some(Value::Bool(b)) => Some(T::from(b.to_string())),
        Some(Value::Number(n)) => Some(T::from(n.to_string())),
        Some(other) => {
            warn!("ignoring non-scalar configuration value: {}", other);
            None
        }
    })
}
