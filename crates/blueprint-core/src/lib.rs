//! # blueprint-core
//!
//! Generates Laravel schema migrations from declarative column
//! specifications.
//!
//! The crate is split along a deliberately narrow seam:
//!
//! - **Specs** - [`MigrationIntent`] and [`ColumnSpec`] describe the table
//!   change to make
//! - **Generator** - [`StatementGenerator`] turns an intent into paired
//!   `up()`/`down()` statement sequences
//! - **AST** - [`Expr`] is the statement model the generator emits, with no
//!   knowledge of how it is printed
//! - **Printer** - renders expression trees (and whole migration files) as
//!   PHP source
//!
//! Generation is pure and fail-fast: an invalid column spec produces a
//! [`GenerateError`] before any statement is emitted, and identical intents
//! always yield identical output.
//!
//! # Example
//!
//! ```rust
//! use blueprint_core::{ColumnSpec, MigrationIntent, render_migration};
//!
//! let intent = MigrationIntent::create(
//!     "create_users_table",
//!     "users",
//!     vec![
//!         ColumnSpec::new("first_name", "string"),
//!         ColumnSpec::new("nickname", "string").nullable(),
//!     ],
//! );
//!
//! let migration = render_migration(&intent).unwrap();
//! assert!(migration.contains("Schema::create('users',"));
//! assert!(migration.contains("$table->string('nickname')->nullable();"));
//! ```

pub mod ast;
pub mod error;
pub mod generator;
pub mod printer;
pub mod spec;

pub use ast::{ClosureParam, Expr};
pub use error::{GenerateError, Result};
pub use generator::StatementGenerator;
pub use printer::{render_expr, render_migration, snake_case, studly_case};
pub use spec::{ColumnSpec, ForeignKeySpec, MigrationIntent};
