//! Selectable entities shared by the pick list and the remote search widgets.
//!
//! Upstream services return loosely shaped JSON objects. [`SelectOption`]
//! keeps the handful of fields the widgets care about (`id`, `value`,
//! `label`) and carries everything else through untouched so that callers
//! can read provider specific attributes such as `audience_size`.

mod format;
mod multi;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use format::{compact_count, entity_name, format_audience_row};
pub use multi::MultiSelection;

/// An entry that can be shown in a selection list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectOption {
    /// A bare string option.
    Plain(String),
    /// An object-shaped option.
    Record(OptionRecord),
}

/// Object-shaped option payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Which part of an option determines its identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Identity<'a> {
    Value(&'a Value),
    Id(&'a Value),
    Whole(&'a SelectOption),
}

impl OptionRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<Value>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    fn display_label(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        let nested = self
            .value
            .as_ref()
            .and_then(|value| value.get("label"))
            .and_then(Value::as_str);
        if let Some(label) = nested {
            return label.to_string();
        }
        if let Some(text) = self.value.as_ref().and_then(scalar_text) {
            return text;
        }
        if let Some(text) = self.id.as_ref().and_then(scalar_text) {
            return text;
        }
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl SelectOption {
    /// Build a plain string option.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    /// Text shown for this option when no custom formatter is supplied.
    #[must_use]
    pub fn display_label(&self) -> String {
        match self {
            Self::Plain(text) => text.clone(),
            Self::Record(record) => record.display_label(),
        }
    }

    /// Identity used to decide whether two options refer to the same entity.
    ///
    /// Records prefer `value`, then `id`. Options without either are their
    /// own identity.
    #[must_use]
    pub fn identity(&self) -> Identity<'_> {
        match self {
            Self::Record(OptionRecord {
                value: Some(value), ..
            }) => Identity::Value(value),
            Self::Record(OptionRecord { id: Some(id), .. }) => Identity::Id(id),
            other => Identity::Whole(other),
        }
    }

    #[must_use]
    pub fn as_record(&self) -> Option<&OptionRecord> {
        match self {
            Self::Record(record) => Some(record),
            Self::Plain(_) => None,
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.as_record().and_then(|record| record.id.as_ref())
    }

    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.as_record().and_then(|record| record.value.as_ref())
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.as_record().and_then(|record| record.label.as_deref())
    }

    /// Look up a provider field that is not one of `id`, `value` or `label`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_record().and_then(|record| record.extra.get(name))
    }

    #[must_use]
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }
}

impl From<OptionRecord> for SelectOption {
    fn from(record: OptionRecord) -> Self {
        Self::Record(record)
    }
}

impl From<&str> for SelectOption {
    fn from(text: &str) -> Self {
        Self::Plain(text.to_string())
    }
}

/// Whether `candidate` should be rendered as the current selection.
///
/// Two records match when their `value` fields are equal or their `id`
/// fields are equal. Missing fields compare equal to each other, so two
/// records that both lack a `value` always match. Anything else falls back
/// to structural equality.
#[must_use]
pub fn matches_selection(candidate: &SelectOption, current: &SelectOption) -> bool {
    match (candidate, current) {
        (SelectOption::Record(left), SelectOption::Record(right)) => {
            left.value == right.value || left.id == right.id
        }
        _ => candidate == current,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
