use crate::RunState;
use crate::RunStateError;
use std::collections::BTreeMap;

/// Run state kept in memory, visible to every later `get` of the same value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryRunState {
    entries: BTreeMap<String, String>,
}

impl InMemoryRunState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InMemoryRunState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl RunState for InMemoryRunState {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), RunStateError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_what_was_set() {
        let mut state = InMemoryRunState::new();

        state.set("path", "/tmp/file").unwrap();

        assert_eq!(state.get("path").as_deref(), Some("/tmp/file"));
        assert_eq!(state.get("isPost"), None);
    }

    #[test]
    fn overwrites_previous_values() {
        let mut state: InMemoryRunState = [("path", "/tmp/old")].into_iter().collect();

        state.set("path", "/tmp/new").unwrap();

        assert_eq!(state.get("path").as_deref(), Some("/tmp/new"));
    }
}
