//! Change Label node configuration editor.
//!
//! The editor control for the Change Entity Label rule node. A host editor
//! hands the control a configuration record, the control projects it into
//! form fields, writes user edits back into the record and switches which
//! fields are required from the chosen label source.

pub mod config;
pub mod form;
pub mod logging;

pub use change_label_node::{ChangeLabelConfig, LabelSource};
pub use config::{load_config, ConfigError, LoadedConfig};
pub use form::{ConfigBridge, EditableFormState, FieldName, FormStatus, FormValues};
