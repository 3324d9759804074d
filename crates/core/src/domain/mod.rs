pub mod client;
pub mod contract;
pub mod product;
pub mod profile;
pub mod recommendation;
pub mod simulation;

/// A stored or transmitted label that does not name any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} label: {label:?}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub label: String,
}

impl UnknownLabel {
    pub(crate) fn new(kind: &'static str, label: &str) -> Self {
        Self {
            kind,
            label: label.to_string(),
        }
    }
}

/// Labels are matched case-insensitively, ignoring surrounding whitespace.
pub(crate) fn normalize_label(label: &str) -> String {
    label.trim().to_ascii_uppercase()
}
