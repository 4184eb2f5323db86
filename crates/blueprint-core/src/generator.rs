//! Statement generation.
//!
//! Turns a [`MigrationIntent`] into the paired statement sequences behind a
//! migration's `up()` and `down()` methods. Generation is a pure function of
//! the intent: no I/O, no state, identical input gives identical output.
//!
//! The two directions are asymmetric. Applying always walks the column list;
//! reverting depends on the mode. A freshly created table is reverted by
//! dropping the whole table, while a modified table is reverted by dropping
//! exactly the columns that were added, in the order they were added.

use crate::ast::{ClosureParam, Expr};
use crate::error::{GenerateError, Result};
use crate::spec::{ColumnSpec, ForeignKeySpec, MigrationIntent};

/// Name of the blueprint variable inside the schema closure.
const TABLE_VAR: &str = "table";

/// Laravel's table builder class, used as the closure parameter type hint.
const BLUEPRINT_CLASS: &str = "Blueprint";

/// The schema facade that migration bodies call into.
const SCHEMA_FACADE: &str = "Schema";

/// Builds the statement sequences for one migration.
#[derive(Debug, Clone, Copy)]
pub struct StatementGenerator<'a> {
    intent: &'a MigrationIntent,
}

impl<'a> StatementGenerator<'a> {
    /// Creates a generator over the given intent.
    #[must_use]
    pub const fn new(intent: &'a MigrationIntent) -> Self {
        Self { intent }
    }

    /// Builds the statements inside the apply-direction schema closure:
    /// one column statement per spec (plus a trailing foreign key
    /// statement for foreign key columns), and a `timestamps()` call when
    /// creating a table.
    ///
    /// # Errors
    ///
    /// Fails fast with a [`GenerateError`] if any column is missing a
    /// required field; no partial sequence is returned.
    pub fn apply_statements(&self) -> Result<Vec<Expr>> {
        self.intent.validate()?;

        let mut statements = Vec::new();
        for column in &self.intent.columns {
            statements.push(self.column_statement(column));
            if column.is_foreign_key {
                let fk = column
                    .foreign_key
                    .as_ref()
                    .ok_or_else(|| GenerateError::MissingForeignKey {
                        column: column.name.clone(),
                    })?;
                statements.push(self.foreign_key_statement(&column.name, fk));
            }
        }
        if self.intent.creating {
            statements.push(self.table_call("timestamps", vec![]));
        }
        Ok(statements)
    }

    /// Builds the statements that undo this migration.
    ///
    /// Create mode yields a single `Schema::dropIfExists(...)` call;
    /// modify mode yields a single `dropColumn([...])` listing every
    /// column name in input order.
    ///
    /// # Errors
    ///
    /// Fails fast with a [`GenerateError`] on invalid column specs.
    pub fn revert_statements(&self) -> Result<Vec<Expr>> {
        self.intent.validate()?;

        if self.intent.creating {
            return Ok(vec![self.drop_table_statement()]);
        }
        let names = Expr::str_array(self.intent.columns.iter().map(|c| c.name.as_str()));
        Ok(vec![self.table_call("dropColumn", vec![names])])
    }

    /// The single statement forming the body of `up()`: the apply
    /// statements wrapped in a schema block.
    ///
    /// # Errors
    ///
    /// Fails fast with a [`GenerateError`] on invalid column specs.
    pub fn up_statement(&self) -> Result<Expr> {
        Ok(self.schema_block(self.apply_statements()?))
    }

    /// The single statement forming the body of `down()`.
    ///
    /// In modify mode the drop-column statement is wrapped in a schema
    /// block like any other table change; in create mode the bare
    /// `Schema::dropIfExists(...)` call stands on its own.
    ///
    /// # Errors
    ///
    /// Fails fast with a [`GenerateError`] on invalid column specs.
    pub fn down_statement(&self) -> Result<Expr> {
        self.intent.validate()?;

        if self.intent.creating {
            return Ok(self.drop_table_statement());
        }
        Ok(self.schema_block(self.revert_statements()?))
    }

    /// Wraps `body` in a `Schema::create(...)` or `Schema::table(...)`
    /// call depending on the mode, with the conventional
    /// `Blueprint $table` closure parameter.
    #[must_use]
    pub fn schema_block(&self, body: Vec<Expr>) -> Expr {
        let method = if self.intent.creating { "create" } else { "table" };
        let closure = Expr::closure(
            vec![ClosureParam::typed(TABLE_VAR, BLUEPRINT_CLASS)],
            body,
        );
        Expr::static_call(
            SCHEMA_FACADE,
            method,
            vec![Expr::str(&self.intent.table_name), closure],
        )
    }

    /// The column definition statement, with modifiers folded onto it in
    /// fixed order: nullable, then default, then unsigned.
    fn column_statement(&self, column: &ColumnSpec) -> Expr {
        let mut args = vec![Expr::str(&column.name)];
        if column.column_type == "enum" {
            // An absent value list still emits an empty array argument.
            let values = column.allowed_values.clone().unwrap_or_default();
            args.push(Expr::str_array(values));
        }
        let base = self.table_call(&column.column_type, args);

        Self::modifiers(column)
            .into_iter()
            .fold(base, |statement, (method, args)| {
                Expr::method(statement, method, args)
            })
    }

    /// The modifier calls a column statement should chain, in order.
    fn modifiers(column: &ColumnSpec) -> Vec<(&'static str, Vec<Expr>)> {
        let mut modifiers = Vec::new();
        if column.nullable {
            modifiers.push(("nullable", vec![]));
        }
        if let Some(default) = &column.default {
            if !default.is_empty() {
                modifiers.push(("default", vec![Expr::str(default)]));
            }
        }
        if column.unsigned {
            modifiers.push(("unsigned", vec![]));
        }
        modifiers
    }

    /// The five-step foreign key chain:
    /// `foreign(name)->references(column)->on(table)->onUpdate(..)->onDelete(..)`.
    fn foreign_key_statement(&self, column_name: &str, fk: &ForeignKeySpec) -> Expr {
        let foreign = self.table_call("foreign", vec![Expr::str(column_name)]);
        let references = Expr::method(foreign, "references", vec![Expr::str(fk.referenced_column())]);
        let on = Expr::method(references, "on", vec![Expr::str(&fk.references)]);
        let on_update = Expr::method(on, "onUpdate", vec![Expr::str(&fk.on_update)]);
        Expr::method(on_update, "onDelete", vec![Expr::str(&fk.on_delete)])
    }

    fn drop_table_statement(&self) -> Expr {
        Expr::static_call(
            SCHEMA_FACADE,
            "dropIfExists",
            vec![Expr::str(&self.intent.table_name)],
        )
    }

    fn table_call(&self, method: &str, args: Vec<Expr>) -> Expr {
        Expr::method(Expr::var(TABLE_VAR), method, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{ColumnSpec, ForeignKeySpec, MigrationIntent};

    fn users_intent(creating: bool) -> MigrationIntent {
        let columns = vec![ColumnSpec::new("first_name", "string")];
        if creating {
            MigrationIntent::create("create_users_table", "users", columns)
        } else {
            MigrationIntent::modify("add_first_name_to_users_table", "users", columns)
        }
    }

    fn table_call(method: &str, args: Vec<Expr>) -> Expr {
        Expr::method(Expr::var("table"), method, args)
    }

    #[test]
    fn test_create_mode_wraps_with_create() {
        let intent = users_intent(true);
        let generator = StatementGenerator::new(&intent);

        let up = generator.up_statement().unwrap();
        match up {
            Expr::StaticCall { class, method, args } => {
                assert_eq!(class, "Schema");
                assert_eq!(method, "create");
                assert_eq!(args[0], Expr::str("users"));
            }
            other => panic!("Expected StaticCall, got {other:?}"),
        }
    }

    #[test]
    fn test_modify_mode_wraps_with_table() {
        let intent = users_intent(false);
        let generator = StatementGenerator::new(&intent);

        let up = generator.up_statement().unwrap();
        match up {
            Expr::StaticCall { method, .. } => assert_eq!(method, "table"),
            other => panic!("Expected StaticCall, got {other:?}"),
        }
    }

    #[test]
    fn test_create_mode_appends_timestamps() {
        let intent = users_intent(true);
        let statements = StatementGenerator::new(&intent).apply_statements().unwrap();

        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0], table_call("string", vec![Expr::str("first_name")]));
        assert_eq!(statements[1], table_call("timestamps", vec![]));
    }

    #[test]
    fn test_modify_mode_has_no_timestamps() {
        let intent = users_intent(false);
        let statements = StatementGenerator::new(&intent).apply_statements().unwrap();

        assert_eq!(
            statements,
            vec![table_call("string", vec![Expr::str("first_name")])]
        );
    }

    #[test]
    fn test_create_mode_revert_is_drop_if_exists() {
        let intent = users_intent(true);
        let statements = StatementGenerator::new(&intent).revert_statements().unwrap();

        assert_eq!(
            statements,
            vec![Expr::static_call("Schema", "dropIfExists", vec![Expr::str("users")])]
        );
    }

    #[test]
    fn test_create_mode_revert_ignores_column_content() {
        let intent = MigrationIntent::create(
            "create_orders_table",
            "orders",
            vec![
                ColumnSpec::new("total", "integer").unsigned(),
                ColumnSpec::new("user_id", "integer")
                    .foreign_key(ForeignKeySpec::new("users", "cascade", "cascade")),
            ],
        );
        let statements = StatementGenerator::new(&intent).revert_statements().unwrap();

        assert_eq!(statements.len(), 1);
        assert_eq!(
            statements[0],
            Expr::static_call("Schema", "dropIfExists", vec![Expr::str("orders")])
        );
    }

    #[test]
    fn test_modify_mode_revert_drops_columns_in_input_order() {
        let intent = MigrationIntent::modify(
            "add_name_fields_to_users_table",
            "users",
            vec![
                ColumnSpec::new("first_name", "string"),
                ColumnSpec::new("last_name", "string"),
                ColumnSpec::new("nickname", "string"),
            ],
        );
        let statements = StatementGenerator::new(&intent).revert_statements().unwrap();

        assert_eq!(
            statements,
            vec![table_call(
                "dropColumn",
                vec![Expr::str_array(["first_name", "last_name", "nickname"])]
            )]
        );
    }

    #[test]
    fn test_modify_mode_down_statement_is_wrapped() {
        let intent = users_intent(false);
        let down = StatementGenerator::new(&intent).down_statement().unwrap();

        match down {
            Expr::StaticCall { method, args, .. } => {
                assert_eq!(method, "table");
                assert!(matches!(args[1], Expr::Closure { .. }));
            }
            other => panic!("Expected StaticCall, got {other:?}"),
        }
    }

    #[test]
    fn test_create_mode_down_statement_is_bare() {
        let intent = users_intent(true);
        let down = StatementGenerator::new(&intent).down_statement().unwrap();

        assert_eq!(
            down,
            Expr::static_call("Schema", "dropIfExists", vec![Expr::str("users")])
        );
    }

    #[test]
    fn test_enum_column_carries_value_array() {
        let intent = MigrationIntent::create(
            "create_payments_table",
            "payments",
            vec![ColumnSpec::new("payment_method", "enum")
                .allowed_values(["card", "paypal", "applepay"])],
        );
        let statements = StatementGenerator::new(&intent).apply_statements().unwrap();

        assert_eq!(
            statements[0],
            table_call(
                "enum",
                vec![
                    Expr::str("payment_method"),
                    Expr::str_array(["card", "paypal", "applepay"]),
                ]
            )
        );
    }

    #[test]
    fn test_enum_column_without_values_gets_empty_array() {
        let intent = MigrationIntent::create(
            "create_payments_table",
            "payments",
            vec![ColumnSpec::new("payment_method", "enum")],
        );
        let statements = StatementGenerator::new(&intent).apply_statements().unwrap();

        assert_eq!(
            statements[0],
            table_call(
                "enum",
                vec![Expr::str("payment_method"), Expr::Array(vec![])]
            )
        );
    }

    #[test]
    fn test_modifiers_chain_in_fixed_order() {
        let intent = MigrationIntent::modify(
            "add_score_to_players_table",
            "players",
            vec![ColumnSpec::new("score", "integer")
                .nullable()
                .default_value("0")
                .unsigned()],
        );
        let statements = StatementGenerator::new(&intent).apply_statements().unwrap();

        let base = table_call("integer", vec![Expr::str("score")]);
        let nullable = Expr::method(base, "nullable", vec![]);
        let default = Expr::method(nullable, "default", vec![Expr::str("0")]);
        let unsigned = Expr::method(default, "unsigned", vec![]);
        assert_eq!(statements, vec![unsigned]);
    }

    #[test]
    fn test_empty_default_is_not_chained() {
        let intent = MigrationIntent::modify(
            "add_bio_to_users_table",
            "users",
            vec![ColumnSpec::new("bio", "text").default_value("")],
        );
        let statements = StatementGenerator::new(&intent).apply_statements().unwrap();

        assert_eq!(statements, vec![table_call("text", vec![Expr::str("bio")])]);
    }

    #[test]
    fn test_foreign_key_emits_five_step_chain() {
        let intent = MigrationIntent::modify(
            "add_user_id_to_posts_table",
            "posts",
            vec![ColumnSpec::new("user_id", "integer")
                .unsigned()
                .foreign_key(ForeignKeySpec::new("users", "cascade", "cascade"))],
        );
        let statements = StatementGenerator::new(&intent).apply_statements().unwrap();

        assert_eq!(statements.len(), 2);
        assert_eq!(
            statements[0],
            Expr::method(
                table_call("integer", vec![Expr::str("user_id")]),
                "unsigned",
                vec![]
            )
        );

        let foreign = table_call("foreign", vec![Expr::str("user_id")]);
        let references = Expr::method(foreign, "references", vec![Expr::str("id")]);
        let on = Expr::method(references, "on", vec![Expr::str("users")]);
        let on_update = Expr::method(on, "onUpdate", vec![Expr::str("cascade")]);
        let on_delete = Expr::method(on_update, "onDelete", vec![Expr::str("cascade")]);
        assert_eq!(statements[1], on_delete);
    }

    #[test]
    fn test_foreign_key_respects_explicit_column() {
        let intent = MigrationIntent::modify(
            "add_author_to_posts_table",
            "posts",
            vec![ColumnSpec::new("author_uuid", "uuid").foreign_key(
                ForeignKeySpec::new("users", "cascade", "restrict").column("uuid"),
            )],
        );
        let statements = StatementGenerator::new(&intent).apply_statements().unwrap();

        let Expr::MethodCall { receiver, .. } = &statements[1] else {
            panic!("Expected MethodCall");
        };
        let Expr::MethodCall { receiver, .. } = receiver.as_ref() else {
            panic!("Expected MethodCall");
        };
        let Expr::MethodCall { receiver, .. } = receiver.as_ref() else {
            panic!("Expected MethodCall");
        };
        let Expr::MethodCall { method, args, .. } = receiver.as_ref() else {
            panic!("Expected MethodCall");
        };
        assert_eq!(method, "references");
        assert_eq!(args, &vec![Expr::str("uuid")]);
    }

    #[test]
    fn test_empty_column_list_create_mode() {
        let intent = MigrationIntent::create("create_logs_table", "logs", vec![]);
        let generator = StatementGenerator::new(&intent);

        assert_eq!(
            generator.apply_statements().unwrap(),
            vec![table_call("timestamps", vec![])]
        );
        assert_eq!(
            generator.revert_statements().unwrap(),
            vec![Expr::static_call("Schema", "dropIfExists", vec![Expr::str("logs")])]
        );
    }

    #[test]
    fn test_empty_column_list_modify_mode() {
        let intent = MigrationIntent::modify("touch_logs_table", "logs", vec![]);
        let generator = StatementGenerator::new(&intent);

        assert_eq!(generator.apply_statements().unwrap(), vec![]);
        assert_eq!(
            generator.revert_statements().unwrap(),
            vec![table_call("dropColumn", vec![Expr::Array(vec![])])]
        );
    }

    #[test]
    fn test_invalid_column_fails_before_any_output() {
        let intent = MigrationIntent::create(
            "create_users_table",
            "users",
            vec![
                ColumnSpec::new("first_name", "string"),
                ColumnSpec::new("", "string"),
            ],
        );
        let generator = StatementGenerator::new(&intent);

        assert_eq!(
            generator.apply_statements(),
            Err(GenerateError::MissingColumnName { index: 1 })
        );
        assert_eq!(
            generator.revert_statements(),
            Err(GenerateError::MissingColumnName { index: 1 })
        );
    }

    #[test]
    fn test_generation_is_idempotent() {
        let intent = MigrationIntent::create(
            "create_payments_table",
            "payments",
            vec![
                ColumnSpec::new("payment_method", "enum").allowed_values(["card", "paypal"]),
                ColumnSpec::new("user_id", "integer")
                    .unsigned()
                    .foreign_key(ForeignKeySpec::new("users", "cascade", "cascade")),
            ],
        );
        let generator = StatementGenerator::new(&intent);

        assert_eq!(
            generator.apply_statements().unwrap(),
            generator.apply_statements().unwrap()
        );
        assert_eq!(
            generator.revert_statements().unwrap(),
            generator.revert_statements().unwrap()
        );
    }
}
