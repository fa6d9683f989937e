//! # Declared Tabular Schemas
//!
//! Each input relation (assignment table, question catalog, auditor
//! registry) has a fixed, declared set of required columns. Validation
//! happens exactly once, when a table is ingested; every later read goes
//! through the resolved column indices.
//!
//! A missing column fails fast with a structured error naming the relation
//! and the column, instead of best-effort substring matching at every read
//! site. The failure is fatal for the current load only; the caller may
//! retry with a corrected source.

use std::collections::HashMap;

use thiserror::Error;

use aflow_core::AflowError;

/// Error raised while ingesting a tabular relation.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A required column is absent from the table header.
    #[error("relation '{relation}' is missing required column '{column}'")]
    MissingColumn {
        /// The declared relation name.
        relation: &'static str,
        /// The absent column.
        column: &'static str,
    },

    /// A required cell is empty or the row is too short.
    #[error("relation '{relation}', row {row}: column '{column}' is empty")]
    MissingValue {
        /// The declared relation name.
        relation: &'static str,
        /// Zero-based data row index (header excluded).
        row: usize,
        /// The column whose value is missing.
        column: &'static str,
    },

    /// A cell value failed core-type validation (e.g. a blank identifier).
    #[error("relation '{relation}', row {row}: {source}")]
    InvalidValue {
        /// The declared relation name.
        relation: &'static str,
        /// Zero-based data row index (header excluded).
        row: usize,
        /// The underlying validation failure.
        source: AflowError,
    },
}

/// A declared schema for one tabular relation.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    /// The relation's name, used in error messages.
    pub relation: &'static str,
    /// Required column names, exact match.
    pub columns: &'static [&'static str],
}

/// The employee/standard assignment relation.
pub const ASSIGNMENT_SCHEMA: TableSchema = TableSchema {
    relation: "assignments",
    columns: &["employee_id", "employee_name", "branch", "standard_code"],
};

/// The standard/question catalog relation.
pub const QUESTION_SCHEMA: TableSchema = TableSchema {
    relation: "questions",
    columns: &["standard_code", "standard_name", "question_text"],
};

/// The optional auditor registry relation.
pub const REGISTRY_SCHEMA: TableSchema = TableSchema {
    relation: "auditors",
    columns: &[
        "auditor_id",
        "auditor_name",
        "profile",
        "allowed_branches",
        "allowed_standards",
    ],
};

impl TableSchema {
    /// Validate a header row against this schema, resolving every declared
    /// column to its index. The one-time validating adapter: call this at
    /// ingestion, then read cells through the returned map.
    ///
    /// # Errors
    ///
    /// `CatalogError::MissingColumn` for the first declared column absent
    /// from the header.
    pub fn column_map<S: AsRef<str>>(&self, header: &[S]) -> Result<ColumnMap, CatalogError> {
        let positions: HashMap<&str, usize> = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_ref().trim(), i))
            .collect();

        let mut indices = HashMap::with_capacity(self.columns.len());
        for &column in self.columns {
            match positions.get(column) {
                Some(&i) => {
                    indices.insert(column, i);
                }
                None => {
                    return Err(CatalogError::MissingColumn {
                        relation: self.relation,
                        column,
                    })
                }
            }
        }
        Ok(ColumnMap {
            relation: self.relation,
            indices,
        })
    }
}

/// Resolved column positions for one validated table.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    relation: &'static str,
    indices: HashMap<&'static str, usize>,
}

impl ColumnMap {
    /// The relation this map was validated for.
    pub fn relation(&self) -> &'static str {
        self.relation
    }

    /// Read a required cell, trimmed. Empty cells and short rows are
    /// structured errors.
    pub fn cell<'a, S: AsRef<str>>(
        &self,
        row: &'a [S],
        row_index: usize,
        column: &'static str,
    ) -> Result<&'a str, CatalogError> {
        let missing = || CatalogError::MissingValue {
            relation: self.relation,
            row: row_index,
            column,
        };
        let &i = self.indices.get(column).ok_or_else(missing)?;
        let value = row.get(i).map(|s| s.as_ref().trim()).ok_or_else(missing)?;
        if value.is_empty() {
            return Err(missing());
        }
        Ok(value)
    }

    /// Read an optional cell, trimmed; absent or empty yields `None`.
    pub fn cell_opt<'a, S: AsRef<str>>(&self, row: &'a [S], column: &'static str) -> Option<&'a str> {
        let &i = self.indices.get(column)?;
        let value = row.get(i)?.as_ref().trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Wrap a core validation failure with relation/row context.
    pub fn invalid(&self, row_index: usize, source: AflowError) -> CatalogError {
        CatalogError::InvalidValue {
            relation: self.relation,
            row: row_index,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_map_resolves_indices() {
        let header = ["branch", "employee_id", "standard_code", "employee_name"];
        let map = ASSIGNMENT_SCHEMA.column_map(&header).unwrap();
        let row = ["Filial A", "E1", "S1", "Maria"];
        assert_eq!(map.cell(&row, 0, "employee_id").unwrap(), "E1");
        assert_eq!(map.cell(&row, 0, "branch").unwrap(), "Filial A");
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let header = ["employee_id", "employee_name", "branch"];
        let err = ASSIGNMENT_SCHEMA.column_map(&header).unwrap_err();
        match err {
            CatalogError::MissingColumn { relation, column } => {
                assert_eq!(relation, "assignments");
                assert_eq!(column, "standard_code");
            }
            other => panic!("expected MissingColumn, got: {other:?}"),
        }
    }

    #[test]
    fn test_header_whitespace_tolerated() {
        let header = [" employee_id ", "employee_name", "branch", "standard_code"];
        assert!(ASSIGNMENT_SCHEMA.column_map(&header).is_ok());
    }

    #[test]
    fn test_exact_match_no_sniffing() {
        // Case variants are not matched; the schema is declared, not sniffed.
        let header = ["Employee_Id", "employee_name", "branch", "standard_code"];
        assert!(ASSIGNMENT_SCHEMA.column_map(&header).is_err());
    }

    #[test]
    fn test_empty_cell_reports_row_and_column() {
        let header = ["standard_code", "standard_name", "question_text"];
        let map = QUESTION_SCHEMA.column_map(&header).unwrap();
        let row = ["S1", "", "Uses PPE?"];
        let err = map.cell(&row, 3, "standard_name").unwrap_err();
        match err {
            CatalogError::MissingValue { relation, row, column } => {
                assert_eq!(relation, "questions");
                assert_eq!(row, 3);
                assert_eq!(column, "standard_name");
            }
            other => panic!("expected MissingValue, got: {other:?}"),
        }
    }

    #[test]
    fn test_short_row_is_missing_value() {
        let header = ["standard_code", "standard_name", "question_text"];
        let map = QUESTION_SCHEMA.column_map(&header).unwrap();
        let row = ["S1"];
        assert!(map.cell(&row, 0, "question_text").is_err());
    }

    #[test]
    fn test_cell_opt_absent_is_none() {
        let header = REGISTRY_SCHEMA.columns.to_vec();
        let map = REGISTRY_SCHEMA.column_map(&header).unwrap();
        let row = ["AUD-1", "Ana", "auditor", "", "ALL"];
        assert_eq!(map.cell_opt(&row, "allowed_branches"), None);
        assert_eq!(map.cell_opt(&row, "allowed_standards"), Some("ALL"));
    }
}
