//! Editable form state.
//!
//! Mirror of the configuration record's four fields that the UI renders
//! against. `labelSource` is always required; the two source-dependent
//! fields get their required flag from [`super::rules`].

use change_label_node::{ChangeLabelConfig, LabelSource};
use serde::{Deserialize, Serialize};

use super::field::FieldState;
use super::rules::Requirement;
use super::values::{FieldName, FormValues};

/// Validity signal reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormStatus {
    /// Every required field holds a value
    Valid,
    /// At least one required field is blank
    Invalid,
    /// Field group is read-only
    Disabled,
}

/// Flat, serializable view of one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldView {
    pub name: FieldName,
    pub value: Option<String>,
    pub required: bool,
    pub enabled: bool,
    pub valid: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditableFormState {
    label_source: FieldState<LabelSource>,
    static_label_value: FieldState<String>,
    label_name_or_pattern: FieldState<String>,
    target_entity_type: FieldState<String>,
}

impl Default for EditableFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditableFormState {
    pub fn new() -> Self {
        Self {
            label_source: FieldState::new(true),
            static_label_value: FieldState::new(false),
            label_name_or_pattern: FieldState::new(false),
            target_entity_type: FieldState::new(false),
        }
    }

    pub fn label_source(&self) -> &FieldState<LabelSource> {
        &self.label_source
    }

    pub fn static_label_value(&self) -> &FieldState<String> {
        &self.static_label_value
    }

    pub fn label_name_or_pattern(&self) -> &FieldState<String> {
        &self.label_name_or_pattern
    }

    pub fn target_entity_type(&self) -> &FieldState<String> {
        &self.target_entity_type
    }

    /// The fields toggle as one group, so any field answers for all four.
    pub fn is_enabled(&self) -> bool {
        self.label_source.is_enabled()
    }

    pub fn status(&self) -> FormStatus {
        if !self.is_enabled() {
            FormStatus::Disabled
        } else if self.invalid_fields().is_empty() {
            FormStatus::Valid
        } else {
            FormStatus::Invalid
        }
    }

    pub fn required_fields(&self) -> Vec<FieldName> {
        self.views()
            .into_iter()
            .filter(|view| view.required)
            .map(|view| view.name)
            .collect()
    }

    pub fn invalid_fields(&self) -> Vec<FieldName> {
        self.views()
            .into_iter()
            .filter(|view| !view.valid)
            .map(|view| view.name)
            .collect()
    }

    /// Current values of all four fields.
    pub fn value(&self) -> FormValues {
        FormValues {
            label_source: self.label_source.value().cloned(),
            static_label_value: self.static_label_value.value().cloned(),
            label_name_or_pattern: self.label_name_or_pattern.value().cloned(),
            target_entity_type: self.target_entity_type.value().cloned(),
            ..FormValues::default()
        }
    }

    pub fn views(&self) -> Vec<FieldView> {
        vec![
            Self::view(FieldName::LabelSource, &self.label_source, |s| s.to_string()),
            Self::view(FieldName::StaticLabelValue, &self.static_label_value, String::clone),
            Self::view(FieldName::LabelNameOrPattern, &self.label_name_or_pattern, String::clone),
            Self::view(FieldName::TargetEntityType, &self.target_entity_type, String::clone),
        ]
    }

    fn view<T: super::FieldValue>(
        name: FieldName,
        field: &FieldState<T>,
        text: impl Fn(&T) -> String,
    ) -> FieldView {
        FieldView {
            name,
            value: field.value().map(text),
            required: field.is_required(),
            enabled: field.is_enabled(),
            valid: field.is_valid(),
        }
    }

    /// Overwrite all four fields from a configuration record.
    pub(crate) fn project(&mut self, config: &ChangeLabelConfig) {
        self.label_source.set_value(config.label_source.clone());
        self.static_label_value.set_value(config.static_label_value.clone());
        self.label_name_or_pattern.set_value(config.label_name_or_pattern.clone());
        self.target_entity_type.set_value(config.target_entity_type.clone());
    }

    /// Overwrite only the fields present in `values`.
    pub(crate) fn patch(&mut self, values: &FormValues) {
        if let Some(source) = &values.label_source {
            self.label_source.set_value(Some(source.clone()));
        }
        if let Some(value) = &values.static_label_value {
            self.static_label_value.set_value(Some(value.clone()));
        }
        if let Some(value) = &values.label_name_or_pattern {
            self.label_name_or_pattern.set_value(Some(value.clone()));
        }
        if let Some(value) = &values.target_entity_type {
            self.target_entity_type.set_value(Some(value.clone()));
        }
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.label_source.set_enabled(enabled);
        self.static_label_value.set_enabled(enabled);
        self.label_name_or_pattern.set_enabled(enabled);
        self.target_entity_type.set_enabled(enabled);
    }

    /// Apply required flags, then re-evaluate both dependent fields.
    pub(crate) fn apply_requirement(&mut self, requirement: Requirement) {
        self.static_label_value.set_required(requirement.static_label_value);
        self.label_name_or_pattern.set_required(requirement.label_name_or_pattern);
        self.static_label_value.update_validity();
        self.label_name_or_pattern.update_validity();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_form_requires_label_source() {
        let form = EditableFormState::new();
        assert_eq!(form.required_fields(), vec![FieldName::LabelSource]);
        assert_eq!(form.invalid_fields(), vec![FieldName::LabelSource]);
        assert_eq!(form.status(), FormStatus::Invalid);
    }

    #[test]
    fn test_patch_leaves_absent_fields() {
        let mut form = EditableFormState::new();
        form.project(&ChangeLabelConfig::default_configuration());

        form.patch(&FormValues::new().target_entity_type("ASSET"));

        assert_eq!(form.static_label_value().value().map(String::as_str), Some("NewLabel"));
        assert_eq!(form.target_entity_type().value().map(String::as_str), Some("ASSET"));
    }

    #[test]
    fn test_disabled_status() {
        let mut form = EditableFormState::new();
        form.set_enabled(false);
        assert_eq!(form.status(), FormStatus::Disabled);
        assert!(form.views().iter().all(|view| !view.enabled));
    }

    #[test]
    fn test_views_render_values() {
        let mut form = EditableFormState::new();
        form.project(&ChangeLabelConfig::default_configuration());

        let views = form.views();
        assert_eq!(views.len(), 4);
        assert_eq!(views[0].value.as_deref(), Some("STATIC"));
        assert_eq!(views[1].value.as_deref(), Some("NewLabel"));
    }
}
