//! Dynamic result rows.

use rusqlite::types::Value;

/// One result row as an ordered column-name/value mapping.
///
/// Column order matches the select list of the executed statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pairs: Vec<(String, Value)>,
}

impl Row {
    pub(crate) fn from_rusqlite(
        row: &rusqlite::Row<'_>,
        columns: &[String],
    ) -> rusqlite::Result<Self> {
        let mut pairs = Vec::with_capacity(columns.len());
        for (index, name) in columns.iter().enumerate() {
            pairs.push((name.clone(), row.get::<_, Value>(index)?));
        }
        Ok(Self { pairs })
    }

    /// Value of the given column, if the row has one.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.pairs
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Column names in select-list order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl IntoIterator for Row {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}
