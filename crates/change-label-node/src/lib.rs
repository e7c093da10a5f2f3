//! Change Entity Label rule node.
//!
//! Holds the node's configuration record (the shape the editor control
//! reads and writes) and the runtime half of the node: resolving the new
//! label from an incoming message and renaming the originator entity.

mod config;
mod error;
mod message;
mod node;
mod resolve;
mod store;

pub use config::{ChangeLabelConfig, LabelSource};
pub use error::{LabelError, NodeError, StoreError};
pub use message::{EntityId, EntityType, RuleMessage};
pub use node::{ChangeLabelNode, NodeOutcome, Relation};
pub use resolve::resolve_label;
pub use store::{Entity, EntityStore, InMemoryEntityStore};
