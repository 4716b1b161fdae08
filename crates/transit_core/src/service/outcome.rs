//! Result envelopes handed to the presentation layer.

/// Boolean/message pair returned by service mutations.
///
/// Repository errors stop here; nothing below this type reaches the caller
/// as an error value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Key of the affected row on success.
    pub key: Option<String>,
    /// Human-readable result message.
    pub message: String,
}

impl ActionOutcome {
    pub(crate) fn success(message: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            ok: true,
            key: Some(key.into()),
            message: message.into(),
        }
    }

    pub(crate) fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            key: None,
            message: message.into(),
        }
    }
}

/// Typed picker entry. Callers keep `id` and show `label`; the id is never
/// parsed back out of display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOption<K> {
    pub id: K,
    pub label: String,
}

impl<K> PickerOption<K> {
    pub fn new(id: K, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}
