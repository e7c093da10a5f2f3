//! Two-way bridge between the host's configuration record and the form.
//!
//! Inbound, `set_external_value` projects a record into the fields without
//! going through the change stream. Outbound, every field change is merged
//! into a copy of the held record and handed to the change listener. After
//! either direction the required-field rules run again for the current
//! label source.

use change_label_node::ChangeLabelConfig;
use std::fmt;
use tracing::{debug, warn};

use super::rules::requirement_for;
use super::state::{EditableFormState, FormStatus};
use super::values::FormValues;
use crate::config::merge_values;

/// Receives the full record after every accepted edit.
pub type ChangeListener = Box<dyn FnMut(&ChangeLabelConfig)>;

/// Focus/blur port. Installed by the host, never fired by this control.
pub type TouchListener = Box<dyn FnMut()>;

/// The form's change-stream subscription.
#[derive(Debug, Default)]
struct Subscription {
    closed: bool,
}

impl Subscription {
    /// Returns true the first time only.
    fn unsubscribe(&mut self) -> bool {
        !std::mem::replace(&mut self.closed, true)
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Editor control for one node's configuration.
///
/// Owns the form state and the record last loaded or emitted. One bridge
/// per mounted control; dropping it releases the change subscription.
pub struct ConfigBridge {
    form: EditableFormState,
    config: Option<ChangeLabelConfig>,
    on_change: ChangeListener,
    #[allow(dead_code)]
    on_touch: TouchListener,
    subscription: Subscription,
}

impl ConfigBridge {
    /// Build the fields, project `initial` when present and subscribe to
    /// field changes.
    pub fn mount(initial: Option<ChangeLabelConfig>) -> Self {
        let mut bridge = Self {
            form: EditableFormState::new(),
            config: None,
            on_change: Box::new(|_| {}),
            on_touch: Box::new(|| {}),
            subscription: Subscription::default(),
        };
        bridge.set_external_value(initial);
        bridge
    }

    /// Load a record pushed by the host.
    ///
    /// `None` is ignored: the form keeps whatever it showed before.
    pub fn set_external_value(&mut self, config: Option<ChangeLabelConfig>) {
        let Some(config) = config else {
            debug!("ignoring empty external value");
            return;
        };

        self.form.project(&config);
        self.update_required_fields(&config);
        debug!(
            "projected external value, label source {:?}",
            config.label_source.as_ref().map(|s| s.as_str())
        );
        self.config = Some(config);
    }

    /// Merge a field change into the held record and notify the listener.
    ///
    /// No-op without a held record, without values, or after teardown.
    pub fn on_form_changed(&mut self, values: Option<FormValues>) {
        self.apply_change(values);
    }

    /// User input: patch the fields, then deliver the form's value through
    /// the change stream.
    ///
    /// Returns true when the change reached the listener. Input is refused
    /// while the field group is disabled.
    pub fn edit(&mut self, values: FormValues) -> bool {
        if !self.form.is_enabled() {
            debug!("refusing input while disabled: {:?}", values.fields());
            return false;
        }

        self.form.patch(&values);
        if self.subscription.is_closed() {
            return false;
        }
        let current = self.form.value();
        self.apply_change(Some(current))
    }

    pub fn register_change_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&ChangeLabelConfig) + 'static,
    {
        self.on_change = Box::new(listener);
    }

    pub fn register_touch_listener<F>(&mut self, listener: F)
    where
        F: FnMut() + 'static,
    {
        self.on_touch = Box::new(listener);
    }

    /// Enable or disable all four fields together. Emits nothing.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.form.set_enabled(enabled);
    }

    /// Release the change-stream subscription. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if self.subscription.unsubscribe() {
            debug!("change subscription released");
        }
    }

    pub fn is_mounted(&self) -> bool {
        !self.subscription.is_closed()
    }

    pub fn form(&self) -> &EditableFormState {
        &self.form
    }

    /// The record as last loaded or emitted.
    pub fn value(&self) -> Option<&ChangeLabelConfig> {
        self.config.as_ref()
    }

    pub fn status(&self) -> FormStatus {
        self.form.status()
    }

    pub fn is_valid(&self) -> bool {
        self.status() == FormStatus::Valid
    }

    fn apply_change(&mut self, values: Option<FormValues>) -> bool {
        if self.subscription.is_closed() {
            warn!("field change after teardown dropped");
            return false;
        }
        let (Some(held), Some(values)) = (self.config.as_ref(), values) else {
            debug!("field change without a held configuration dropped");
            return false;
        };

        let merged = merge_values(held, &values);
        self.update_required_fields(&merged);
        let config = self.config.insert(merged);
        (self.on_change)(config);
        true
    }

    fn update_required_fields(&mut self, config: &ChangeLabelConfig) {
        self.form
            .apply_requirement(requirement_for(config.label_source.as_ref()));
    }
}

impl Drop for ConfigBridge {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for ConfigBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigBridge")
            .field("form", &self.form)
            .field("config", &self.config)
            .field("subscription", &self.subscription)
            .finish_non_exhaustive()
    }
}
