//! Error types for label resolution and node processing.

use crate::message::{EntityId, EntityType};

/// Why a label could not be determined from a message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelError {
    #[error("label source is not set")]
    MissingSource,

    #[error("unknown label source: {0}")]
    UnknownSource(String),

    #[error("metadata key '{0}' not found")]
    MissingMetadataKey(String),

    #[error("data key '{0}' not found in message payload")]
    MissingDataKey(String),

    #[error("message payload is not valid JSON: {0}")]
    InvalidData(String),

    #[error("new label could not be determined or is empty")]
    EmptyLabel,
}

/// Entity store failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store is read-only")]
    ReadOnly,

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Everything that routes a message to the Failure relation.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error(transparent)]
    Label(#[from] LabelError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("unsupported entity type: {0}")]
    UnsupportedEntityType(EntityType),

    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    #[error("invalid entity id '{0}', expected TYPE:ID")]
    InvalidEntityId(String),

    #[error("invalid node configuration: {0}")]
    InvalidConfiguration(#[from] serde_json::Error),
}
