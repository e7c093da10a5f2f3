//! Single form field state.

use change_label_node::LabelSource;

/// Values a field can hold.
pub trait FieldValue {
    /// Blank values fail a required constraint.
    fn is_blank(&self) -> bool;
}

impl FieldValue for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl FieldValue for LabelSource {
    fn is_blank(&self) -> bool {
        self.as_str().is_empty()
    }
}

/// Value plus required/enabled/valid flags for one field.
///
/// Changing the value re-evaluates validity. Changing the required flag does
/// not; the caller decides when to re-evaluate.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState<T> {
    value: Option<T>,
    required: bool,
    enabled: bool,
    valid: bool,
}

impl<T: FieldValue> FieldState<T> {
    pub(crate) fn new(required: bool) -> Self {
        let mut field = Self {
            value: None,
            required,
            enabled: true,
            valid: true,
        };
        field.update_validity();
        field
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub(crate) fn set_value(&mut self, value: Option<T>) {
        self.value = value;
        self.update_validity();
    }

    pub(crate) fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub(crate) fn update_validity(&mut self) {
        let blank = self.value.as_ref().map_or(true, FieldValue::is_blank);
        self.valid = !(self.required && blank);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_empty_is_invalid() {
        let mut field: FieldState<String> = FieldState::new(true);
        assert!(!field.is_valid());

        field.set_value(Some(String::new()));
        assert!(!field.is_valid());

        field.set_value(Some("x".to_string()));
        assert!(field.is_valid());
    }

    #[test]
    fn test_whitespace_satisfies_required() {
        let mut field: FieldState<String> = FieldState::new(true);
        field.set_value(Some(" ".to_string()));
        assert!(field.is_valid());
    }

    #[test]
    fn test_required_change_waits_for_update() {
        let mut field: FieldState<String> = FieldState::new(false);
        field.set_required(true);
        assert!(field.is_valid());

        field.update_validity();
        assert!(!field.is_valid());
    }

    #[test]
    fn test_blank_label_source() {
        let mut field: FieldState<LabelSource> = FieldState::new(true);
        field.set_value(Some(LabelSource::from("")));
        assert!(!field.is_valid());

        field.set_value(Some(LabelSource::Static));
        assert!(field.is_valid());
    }
}
