//! Field names and change payloads.

use change_label_node::LabelSource;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// The four editable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    LabelSource,
    StaticLabelValue,
    LabelNameOrPattern,
    TargetEntityType,
}

impl FieldName {
    pub const ALL: [FieldName; 4] = [
        FieldName::LabelSource,
        FieldName::StaticLabelValue,
        FieldName::LabelNameOrPattern,
        FieldName::TargetEntityType,
    ];

    /// Key of the field in the configuration record.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::LabelSource => "labelSource",
            FieldName::StaticLabelValue => "staticLabelValue",
            FieldName::LabelNameOrPattern => "labelNameOrPattern",
            FieldName::TargetEntityType => "targetEntityType",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("expected field=value, got '{0}'")]
    InvalidAssignment(String),
}

/// A field change event.
///
/// Present fields override the held configuration, absent fields keep
/// their previous value. Keys without a field of their own go to `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_source: Option<LabelSource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_label_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_name_or_pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_entity_type: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label_source(mut self, source: impl Into<LabelSource>) -> Self {
        self.label_source = Some(source.into());
        self
    }

    pub fn static_label_value(mut self, value: impl Into<String>) -> Self {
        self.static_label_value = Some(value.into());
        self
    }

    pub fn label_name_or_pattern(mut self, value: impl Into<String>) -> Self {
        self.label_name_or_pattern = Some(value.into());
        self
    }

    pub fn target_entity_type(mut self, value: impl Into<String>) -> Self {
        self.target_entity_type = Some(value.into());
        self
    }

    /// Set one field from its text form.
    pub fn set(&mut self, field: FieldName, value: &str) {
        match field {
            FieldName::LabelSource => self.label_source = Some(LabelSource::from(value)),
            FieldName::StaticLabelValue => self.static_label_value = Some(value.to_string()),
            FieldName::LabelNameOrPattern => self.label_name_or_pattern = Some(value.to_string()),
            FieldName::TargetEntityType => self.target_entity_type = Some(value.to_string()),
        }
    }

    /// Build a single-field change from `field=value`.
    pub fn from_assignment(assignment: &str) -> Result<Self, FormError> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| FormError::InvalidAssignment(assignment.to_string()))?;
        let field: FieldName = key.trim().parse()?;

        let mut values = Self::new();
        values.set(field, value);
        Ok(values)
    }

    /// Names of the fields this change carries.
    pub fn fields(&self) -> Vec<FieldName> {
        FieldName::ALL
            .into_iter()
            .filter(|field| match field {
                FieldName::LabelSource => self.label_source.is_some(),
                FieldName::StaticLabelValue => self.static_label_value.is_some(),
                FieldName::LabelNameOrPattern => self.label_name_or_pattern.is_some(),
                FieldName::TargetEntityType => self.target_entity_type.is_some(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty() && self.extra.is_empty()
    }
}
