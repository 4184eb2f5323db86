//! Column specification types.
//!
//! These types describe the desired shape of a table change. They are the
//! input side of the generator: an adapter (CLI, config file) produces a
//! [`MigrationIntent`] and the generator turns it into statements.
//!
//! Serde field names follow the keys the generator has always accepted
//! (`type`, `is_foreign_key`, `allowed_values`, ...), so existing spec
//! files keep working.

use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, Result};

/// One column to add to the target table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name. Must be non-empty.
    pub name: String,
    /// Blueprint method selector, e.g. `string`, `integer`, `enum`.
    /// Passed through verbatim; no whitelist is enforced.
    #[serde(rename = "type")]
    pub column_type: String,
    /// Whether to chain a `nullable()` modifier.
    #[serde(default)]
    pub nullable: bool,
    /// Default value literal; chained as `default('...')` when present
    /// and non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Whether to chain an `unsigned()` modifier.
    #[serde(default)]
    pub unsigned: bool,
    /// Whether this column carries a foreign key constraint.
    #[serde(default)]
    pub is_foreign_key: bool,
    /// Allowed values for `enum` columns. Absent means an empty array is
    /// emitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
    /// Foreign key details; required when `is_foreign_key` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<ForeignKeySpec>,
}

impl ColumnSpec {
    /// Creates a plain, non-nullable column.
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            nullable: false,
            default: None,
            unsigned: false,
            is_foreign_key: false,
            allowed_values: None,
            foreign_key: None,
        }
    }

    /// Marks the column nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Sets the default value literal.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Marks the column unsigned.
    #[must_use]
    pub fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    /// Sets the allowed values for an `enum` column.
    #[must_use]
    pub fn allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Attaches a foreign key constraint to the column.
    #[must_use]
    pub fn foreign_key(mut self, spec: ForeignKeySpec) -> Self {
        self.is_foreign_key = true;
        self.foreign_key = Some(spec);
        self
    }
}

/// Foreign key details for a column flagged with `is_foreign_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeySpec {
    /// Referenced column; `id` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,
    /// Referenced table.
    pub references: String,
    /// ON UPDATE action keyword, e.g. `cascade`.
    pub on_update: String,
    /// ON DELETE action keyword, e.g. `cascade`.
    pub on_delete: String,
}

impl ForeignKeySpec {
    /// Creates a foreign key referencing `references.id`.
    #[must_use]
    pub fn new(
        references: impl Into<String>,
        on_update: impl Into<String>,
        on_delete: impl Into<String>,
    ) -> Self {
        Self {
            column_name: None,
            references: references.into(),
            on_update: on_update.into(),
            on_delete: on_delete.into(),
        }
    }

    /// Overrides the referenced column.
    #[must_use]
    pub fn column(mut self, column_name: impl Into<String>) -> Self {
        self.column_name = Some(column_name.into());
        self
    }

    /// The referenced column, defaulting to `id`.
    #[must_use]
    pub fn referenced_column(&self) -> &str {
        self.column_name.as_deref().unwrap_or("id")
    }
}

/// A complete generation request: which table, which columns, and whether
/// the table is being created or modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationIntent {
    /// Migration name, e.g. `create_users_table`. Drives the class and
    /// file names.
    pub migration_name: String,
    /// Target table name.
    pub table_name: String,
    /// `true` to create the table, `false` to modify an existing one.
    #[serde(default = "default_creating")]
    pub creating: bool,
    /// Columns to add, in the order they should appear in the table.
    pub columns: Vec<ColumnSpec>,
}

const fn default_creating() -> bool {
    true
}

impl MigrationIntent {
    /// Creates a create-table intent.
    #[must_use]
    pub fn create(
        migration_name: impl Into<String>,
        table_name: impl Into<String>,
        columns: Vec<ColumnSpec>,
    ) -> Self {
        Self {
            migration_name: migration_name.into(),
            table_name: table_name.into(),
            creating: true,
            columns,
        }
    }

    /// Creates a modify-table intent.
    #[must_use]
    pub fn modify(
        migration_name: impl Into<String>,
        table_name: impl Into<String>,
        columns: Vec<ColumnSpec>,
    ) -> Self {
        Self {
            migration_name: migration_name.into(),
            table_name: table_name.into(),
            creating: false,
            columns,
        }
    }

    /// Checks every column for the fields generation cannot do without.
    ///
    /// Duplicate column names are deliberately not rejected; they pass
    /// through to the generated file uninterpreted.
    ///
    /// # Errors
    ///
    /// Returns the first [`GenerateError`] found, scanning columns in
    /// input order.
    pub fn validate(&self) -> Result<()> {
        for (index, column) in self.columns.iter().enumerate() {
            if column.name.is_empty() {
                return Err(GenerateError::MissingColumnName { index });
            }
            if column.column_type.is_empty() {
                return Err(GenerateError::MissingColumnType {
                    column: column.name.clone(),
                });
            }
            if column.is_foreign_key {
                let Some(fk) = &column.foreign_key else {
                    return Err(GenerateError::MissingForeignKey {
                        column: column.name.clone(),
                    });
                };
                for (field, value) in [
                    ("references", &fk.references),
                    ("on_update", &fk.on_update),
                    ("on_delete", &fk.on_delete),
                ] {
                    if value.is_empty() {
                        return Err(GenerateError::MissingForeignKeyField {
                            column: column.name.clone(),
                            field,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
