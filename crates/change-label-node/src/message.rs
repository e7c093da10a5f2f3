//! Rule engine message types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::NodeError;

/// Type of the entity a message originates from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityType {
    Device,
    Asset,
    Customer,
    Other(String),
}

impl EntityType {
    pub fn as_str(&self) -> &str {
        match self {
            EntityType::Device => "DEVICE",
            EntityType::Asset => "ASSET",
            EntityType::Customer => "CUSTOMER",
            EntityType::Other(s) => s,
        }
    }
}

impl From<String> for EntityType {
    fn from(s: String) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "DEVICE" => EntityType::Device,
            "ASSET" => EntityType::Asset,
            "CUSTOMER" => EntityType::Customer,
            _ => EntityType::Other(s),
        }
    }
}

impl From<EntityType> for String {
    fn from(entity_type: EntityType) -> Self {
        entity_type.as_str().to_string()
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed entity identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId {
    pub entity_type: EntityType,
    pub id: String,
}

impl EntityId {
    pub fn new(entity_type: EntityType, id: impl Into<String>) -> Self {
        Self {
            entity_type,
            id: id.into(),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.entity_type, self.id)
    }
}

impl FromStr for EntityId {
    type Err = NodeError;

    /// Parse `TYPE:ID`, e.g. `DEVICE:7f3c`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((entity_type, id)) if !entity_type.is_empty() && !id.is_empty() => {
                Ok(EntityId::new(EntityType::from(entity_type.to_string()), id))
            }
            _ => Err(NodeError::InvalidEntityId(s.to_string())),
        }
    }
}

/// A message flowing through the rule chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleMessage {
    /// Entity that produced the message
    pub originator: EntityId,

    /// String key/value metadata
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,

    /// Raw payload, normally a JSON document
    #[serde(default)]
    pub data: String,
}

impl RuleMessage {
    pub fn new(originator: EntityId, data: impl Into<String>) -> Self {
        Self {
            originator,
            metadata: BTreeMap::new(),
            data: data.into(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entity_id() {
        let id: EntityId = "DEVICE:abc-123".parse().unwrap();
        assert_eq!(id.entity_type, EntityType::Device);
        assert_eq!(id.id, "abc-123");
        assert_eq!(id.to_string(), "DEVICE:abc-123");
    }

    #[test]
    fn test_parse_entity_id_lowercase_type() {
        let id: EntityId = "asset:a1".parse().unwrap();
        assert_eq!(id.entity_type, EntityType::Asset);
    }

    #[test]
    fn test_parse_entity_id_rejects_missing_parts() {
        assert!("DEVICE".parse::<EntityId>().is_err());
        assert!(":abc".parse::<EntityId>().is_err());
        assert!("DEVICE:".parse::<EntityId>().is_err());
    }

    #[test]
    fn test_other_entity_type_kept() {
        let id: EntityId = "DASHBOARD:d1".parse().unwrap();
        assert_eq!(id.entity_type, EntityType::Other("DASHBOARD".to_string()));
    }
}
