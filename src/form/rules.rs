//! Required-field rules.
//!
//! Which dependent field must be filled in is decided by the label source
//! alone. `REQUIREMENTS` is the only place that mapping lives; a source
//! that is not listed (including an unset one) requires neither field.

use change_label_node::LabelSource;

/// Required flags for the two source-dependent fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Requirement {
    pub static_label_value: bool,
    pub label_name_or_pattern: bool,
}

impl Requirement {
    pub const NONE: Requirement = Requirement {
        static_label_value: false,
        label_name_or_pattern: false,
    };

    const LITERAL: Requirement = Requirement {
        static_label_value: true,
        label_name_or_pattern: false,
    };

    const LOOKUP: Requirement = Requirement {
        static_label_value: false,
        label_name_or_pattern: true,
    };
}

/// Rule table keyed by label source wire name.
const REQUIREMENTS: &[(&str, Requirement)] = &[
    (LabelSource::STATIC, Requirement::LITERAL),
    (LabelSource::MESSAGE_METADATA, Requirement::LOOKUP),
    (LabelSource::MESSAGE_DATA, Requirement::LOOKUP),
];

/// Look up the requirement for a label source.
pub fn requirement_for(source: Option<&LabelSource>) -> Requirement {
    source
        .and_then(|source| {
            REQUIREMENTS
                .iter()
                .find(|(name, _)| *name == source.as_str())
        })
        .map(|(_, requirement)| *requirement)
        .unwrap_or(Requirement::NONE)
}
