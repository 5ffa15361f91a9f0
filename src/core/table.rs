use indexmap::IndexMap;
use serde::Serialize;

use crate::core::config::RowOrder;
use crate::parsing::ParseError;
use crate::utils::validation::check_row_limit;

/// Whether a row holds column labels or allele sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// Column labels derived from a block header line
    Header,
    /// Sequence tokens for one allele
    Allele,
}

/// A single accumulated row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub kind: RowKind,
    pub tokens: Vec<String>,
}

impl Row {
    /// All tokens joined with no delimiter
    #[must_use]
    pub fn concatenated(&self) -> String {
        crate::output::concat_tokens(self.tokens.as_slice())
    }
}

/// Insertion-ordered mapping from row key to the tokens appended for it.
///
/// Keys are compared exactly. A key keeps the position of its first
/// appearance no matter how many blocks later append to it.
#[derive(Debug, Default, Clone)]
pub struct RowTable {
    rows: IndexMap<String, Row>,
}

impl RowTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `tokens` to the row for `key`, creating an empty row first if needed.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::RowKindConflict` if `key` already names a row of the
    /// other kind, or `ParseError::TooManyRows` if a new row would exceed the limit.
    pub fn accumulate<I>(&mut self, key: &str, kind: RowKind, tokens: I) -> Result<(), ParseError>
    where
        I: IntoIterator<Item = String>,
    {
        if let Some(row) = self.rows.get_mut(key) {
            if row.kind != kind {
                return Err(ParseError::RowKindConflict {
                    row: key.to_string(),
                });
            }
            row.tokens.extend(tokens);
            return Ok(());
        }

        if check_row_limit(self.rows.len()).is_some() {
            return Err(ParseError::TooManyRows(self.rows.len()));
        }

        self.rows.insert(
            key.to_string(),
            Row {
                kind,
                tokens: tokens.into_iter().collect(),
            },
        );
        Ok(())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Row> {
        self.rows.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in first-appearance order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Row)> {
        self.rows.iter().map(|(key, row)| (key.as_str(), row))
    }

    /// Number of allele rows
    #[must_use]
    pub fn allele_count(&self) -> usize {
        self.rows
            .values()
            .filter(|row| row.kind == RowKind::Allele)
            .count()
    }

    /// Token count of the first allele row (every allele row has the same count)
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows
            .values()
            .find(|row| row.kind == RowKind::Allele)
            .map_or(0, |row| row.tokens.len())
    }

    /// Rows in the requested output order
    #[must_use]
    pub fn ordered(&self, order: RowOrder) -> Vec<(&str, &Row)> {
        let mut rows: Vec<(&str, &Row)> = self.iter().collect();
        if order == RowOrder::Sorted {
            rows.sort_by(|a, b| a.0.cmp(b.0));
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_accumulate_appends_in_order() {
        let mut table = RowTable::new();
        table
            .accumulate("A*01:01", RowKind::Allele, strings(&["AC", "GT"]))
            .unwrap();
        table
            .accumulate("A*01:01", RowKind::Allele, strings(&["TT"]))
            .unwrap();

        let row = table.get("A*01:01").unwrap();
        assert_eq!(row.tokens, strings(&["AC", "GT", "TT"]));
        assert_eq!(row.concatenated(), "ACGTTT");
    }

    #[test]
    fn test_first_appearance_order_is_kept() {
        let mut table = RowTable::new();
        for key in ["B*07:02", "A*01:01", "C*01:02"] {
            table.accumulate(key, RowKind::Allele, strings(&["x"])).unwrap();
        }
        table
            .accumulate("A*01:01", RowKind::Allele, strings(&["y"]))
            .unwrap();

        let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["B*07:02", "A*01:01", "C*01:02"]);

        let sorted: Vec<&str> = table
            .ordered(RowOrder::Sorted)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(sorted, vec!["A*01:01", "B*07:02", "C*01:02"]);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let mut table = RowTable::new();
        table.accumulate("a", RowKind::Allele, strings(&["1"])).unwrap();
        table.accumulate("A", RowKind::Allele, strings(&["2"])).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_kind_conflict_is_rejected() {
        let mut table = RowTable::new();
        table.accumulate("Prot", RowKind::Header, strings(&["1"])).unwrap();
        let err = table
            .accumulate("Prot", RowKind::Allele, strings(&["A"]))
            .unwrap_err();
        assert!(matches!(err, ParseError::RowKindConflict { .. }));
    }

    #[test]
    fn test_counts() {
        let mut table = RowTable::new();
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 0);

        table.accumulate("cDNA", RowKind::Header, strings(&["1", "2"])).unwrap();
        table.accumulate("A*01", RowKind::Allele, strings(&["A", "C"])).unwrap();
        table.accumulate("A*02", RowKind::Allele, strings(&["-", "-"])).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.allele_count(), 2);
        assert_eq!(table.column_count(), 2);
    }
}
