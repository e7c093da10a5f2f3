//! Editor control for the node configuration.
//!
//! [`ConfigBridge`] sits between the host editor's form-control contract
//! and the four rendered fields. The host pushes a configuration in with
//! `set_external_value`, user edits come back out through the registered
//! change listener.

mod bridge;
mod field;
mod rules;
mod state;
mod values;

pub use bridge::{ChangeListener, ConfigBridge, TouchListener};
pub use field::{FieldState, FieldValue};
pub use rules::{requirement_for, Requirement};
pub use state::{EditableFormState, FieldView, FormStatus};
pub use values::{FieldName, FormError, FormValues};
