use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::tuple::{Tuple, Value};

/// The values of a tuple's key attributes, in key order.
///
/// Compared lexicographically, value by value, each value by its own
/// domain's ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyValue(pub Vec<Value>);

impl KeyValue {
    pub fn new(values: Vec<Value>) -> KeyValue {
        KeyValue(values)
    }

    pub(crate) fn of(tuple: &Tuple, key_positions: &[usize]) -> KeyValue {
        KeyValue(tuple.pick(key_positions))
    }
}

impl From<Vec<Value>> for KeyValue {
    fn from(values: Vec<Value>) -> Self {
        KeyValue(values)
    }
}

impl Display for KeyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key: Vec<String> = self.0.iter().map(|value| value.to_string()).collect();
        write!(f, "KeyValue({})", key.join(", "))
    }
}

/// Build a [`KeyValue`] from literals, converting each through [`Value::from`].
#[macro_export]
macro_rules! key {
    ($($value:expr),* $(,)?) => {
        $crate::persistence::KeyValue::new(vec![$($crate::persistence::Value::from($value)),*])
    };
}

/// The primary-key index of a [`super::Table`]: an ordered map from
/// [`KeyValue`] to the position of a row in the table's tuple list.
///
/// Inserting a key that is already present overwrites the entry, so the
/// index always points at the most recently inserted row for that key while
/// the tuple list keeps every row.
///
/// # Issues
/// - The index is NOT multi-thread compatible.
#[derive(Debug, Clone, Default)]
pub(crate) struct KeyIndex {
    key_index_map: BTreeMap<KeyValue, usize>,
}

impl KeyIndex {
    pub fn new() -> KeyIndex {
        KeyIndex {
            key_index_map: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: KeyValue, row_index: usize) -> Option<usize> {
        //! Point `key` at `row_index`.
        //!
        //! Returns the row the key pointed at before, if it was already taken.

        self.key_index_map.insert(key, row_index)
    }

    pub fn lookup(&self, key: &KeyValue) -> impl Iterator<Item = usize> {
        //! Every row position stored under `key`, found through the map's
        //! ordered range search rather than a scan of the whole index.

        self.key_index_map
            .range(key.clone()..=key.clone())
            .map(|(_, &row_index)| row_index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KeyValue, usize)> {
        self.key_index_map.iter().map(|(key, &row_index)| (key, row_index))
    }

    pub fn len(&self) -> usize {
        self.key_index_map.len()
    }
}
