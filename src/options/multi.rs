use serde::Serialize;
use serde_json::Value;

use super::SelectOption;

/// Ordered set of options collected across repeated searches.
///
/// Entries are unique by `id`. Options without an `id` are deduplicated by
/// structural equality instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MultiSelection {
    entries: Vec<SelectOption>,
}

impl MultiSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `option` unless an entry with the same id is already present.
    ///
    /// Returns `true` when the option was added.
    pub fn add(&mut self, option: SelectOption) -> bool {
        let duplicate = match option.id() {
            Some(id) => self.contains_id(id),
            None => self.entries.contains(&option),
        };
        if duplicate {
            return false;
        }
        self.entries.push(option);
        true
    }

    /// Remove the entry with the given id. Unknown ids are ignored.
    pub fn remove_by_id(&mut self, id: &Value) -> Option<SelectOption> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.id() == Some(id))?;
        Some(self.entries.remove(index))
    }

    /// Remove `option`, matched by id when it has one.
    pub fn remove(&mut self, option: &SelectOption) -> Option<SelectOption> {
        if let Some(id) = option.id() {
            return self.remove_by_id(id);
        }
        let index = self.entries.iter().position(|entry| entry == option)?;
        Some(self.entries.remove(index))
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SelectOption> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn contains_id(&self, id: &Value) -> bool {
        self.entries.iter().any(|entry| entry.id() == Some(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().filter_map(SelectOption::id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectOption> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a MultiSelection {
    type Item = &'a SelectOption;
    type IntoIter = std::slice::Iter<'a, SelectOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
