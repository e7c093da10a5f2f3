//! The Change Entity Label node.
//!
//! Resolves a label from each message and renames the originator. Devices
//! and assets get a new name, customers a new title. Anything that goes
//! wrong routes the message to `Failure` with the cause attached.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

use crate::config::ChangeLabelConfig;
use crate::error::NodeError;
use crate::message::{EntityType, RuleMessage};
use crate::resolve::resolve_label;
use crate::store::EntityStore;

/// Outgoing relation of the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    Success,
    Failure,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Success => f.write_str("Success"),
            Relation::Failure => f.write_str("Failure"),
        }
    }
}

/// Result of processing one message.
#[derive(Debug)]
pub struct NodeOutcome {
    pub relation: Relation,
    /// Label applied to the originator (Success only)
    pub label: Option<String>,
    /// Cause of a Failure
    pub error: Option<NodeError>,
}

impl NodeOutcome {
    fn success(label: String) -> Self {
        Self {
            relation: Relation::Success,
            label: Some(label),
            error: None,
        }
    }

    fn failure(error: NodeError) -> Self {
        Self {
            relation: Relation::Failure,
            label: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.relation == Relation::Success
    }
}

#[derive(Debug, Clone)]
pub struct ChangeLabelNode {
    config: ChangeLabelConfig,
}

impl ChangeLabelNode {
    pub fn new(config: ChangeLabelConfig) -> Self {
        Self { config }
    }

    /// Initialize from the raw configuration the rule chain stores.
    pub fn from_value(value: Value) -> Result<Self, NodeError> {
        Ok(Self::new(ChangeLabelConfig::from_value(value)?))
    }

    pub fn config(&self) -> &ChangeLabelConfig {
        &self.config
    }

    /// Process a message against `store`.
    pub fn on_msg<S: EntityStore + ?Sized>(&self, message: &RuleMessage, store: &mut S) -> NodeOutcome {
        match self.apply(message, store) {
            Ok(label) => NodeOutcome::success(label),
            Err(e) => {
                warn!("[{}] routing to Failure: {}", message.originator, e);
                NodeOutcome::failure(e)
            }
        }
    }

    fn apply<S: EntityStore + ?Sized>(&self, message: &RuleMessage, store: &mut S) -> Result<String, NodeError> {
        let originator = &message.originator;
        let label = resolve_label(&self.config, message)?;

        match originator.entity_type {
            EntityType::Device | EntityType::Asset | EntityType::Customer => {}
            ref other => return Err(NodeError::UnsupportedEntityType(other.clone())),
        }

        let mut entity = store
            .find(originator)?
            .ok_or_else(|| NodeError::EntityNotFound(originator.clone()))?;
        entity.label = label.clone();
        let attribute = entity.label_attribute();
        store.save(entity)?;

        debug!("[{}] updated {} to '{}'", originator, attribute, label);
        Ok(label)
    }
}
