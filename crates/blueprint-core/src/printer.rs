//! PHP rendering.
//!
//! Serializes [`Expr`] trees into Laravel migration source, and renders the
//! complete migration file (imports, class declaration, `up()`/`down()`).
//! Rendering is a pure function of the tree; all semantic decisions happen
//! in the generator.

use crate::ast::{ClosureParam, Expr};
use crate::error::Result;
use crate::generator::StatementGenerator;
use crate::spec::MigrationIntent;

/// Four-space indentation, matching Laravel's published migration stubs.
const INDENT: &str = "    ";

/// Renders a complete migration file for the given intent.
///
/// # Errors
///
/// Returns a [`GenerateError`] if the intent fails validation; nothing is
/// rendered in that case.
///
/// [`GenerateError`]: crate::error::GenerateError
pub fn render_migration(intent: &MigrationIntent) -> Result<String> {
    let generator = StatementGenerator::new(intent);
    let up = generator.up_statement()?;
    let down = generator.down_statement()?;
    let class_name = studly_case(&intent.migration_name);

    let mut out = String::from("<?php\n\n");
    out.push_str("use Illuminate\\Support\\Facades\\Schema;\n");
    out.push_str("use Illuminate\\Database\\Schema\\Blueprint;\n");
    out.push_str("use Illuminate\\Database\\Migrations\\Migration;\n\n");
    out.push_str(&format!("class {class_name} extends Migration\n{{\n"));
    out.push_str(&render_method("up", &up));
    out.push('\n');
    out.push_str(&render_method("down", &down));
    out.push_str("}\n");
    Ok(out)
}

/// Renders one public method whose body is a single statement.
fn render_method(name: &str, body: &Expr) -> String {
    format!(
        "{INDENT}public function {name}()\n\
         {INDENT}{{\n\
         {INDENT}{INDENT}{};\n\
         {INDENT}}}\n",
        render_expr_at(body, 2)
    )
}

/// Renders a single expression with no surrounding indentation.
#[must_use]
pub fn render_expr(expr: &Expr) -> String {
    render_expr_at(expr, 0)
}

/// Renders an expression whose closing braces sit at `indent` levels.
fn render_expr_at(expr: &Expr, indent: usize) -> String {
    match expr {
        Expr::Variable(name) => format!("${name}"),
        Expr::Str(value) => format!("'{}'", escape_single_quoted(value)),
        Expr::Array(elements) => {
            let rendered: Vec<String> =
                elements.iter().map(|e| render_expr_at(e, indent)).collect();
            format!("[{}]", rendered.join(", "))
        }
        Expr::MethodCall {
            receiver,
            method,
            args,
        } => format!(
            "{}->{method}({})",
            render_expr_at(receiver, indent),
            render_args(args, indent)
        ),
        Expr::StaticCall {
            class,
            method,
            args,
        } => format!("{class}::{method}({})", render_args(args, indent)),
        Expr::Closure { params, body } => render_closure(params, body, indent),
    }
}

fn render_args(args: &[Expr], indent: usize) -> String {
    let rendered: Vec<String> = args.iter().map(|a| render_expr_at(a, indent)).collect();
    rendered.join(", ")
}

fn render_closure(params: &[ClosureParam], body: &[Expr], indent: usize) -> String {
    let rendered_params: Vec<String> = params
        .iter()
        .map(|p| match &p.type_hint {
            Some(hint) => format!("{hint} ${}", p.name),
            None => format!("${}", p.name),
        })
        .collect();

    let mut out = format!("function ({}) {{\n", rendered_params.join(", "));
    let body_pad = INDENT.repeat(indent + 1);
    for statement in body {
        out.push_str(&body_pad);
        out.push_str(&render_expr_at(statement, indent + 1));
        out.push_str(";\n");
    }
    out.push_str(&INDENT.repeat(indent));
    out.push('}');
    out
}

/// Escapes a string for a single-quoted PHP literal. Only backslash and
/// the quote itself are special.
fn escape_single_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Converts a migration name like `create_users_table` into a class name
/// like `CreateUsersTable`.
#[must_use]
pub fn studly_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut capitalize_next = true;
    for ch in name.chars() {
        if ch == '_' || ch == '-' || ch == ' ' {
            capitalize_next = true;
        } else if capitalize_next {
            result.extend(ch.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(ch);
        }
    }
    result
}

/// Converts a name like `CreateUsersTable` into `create_users_table`.
/// Already-snake input passes through unchanged.
#[must_use]
pub fn snake_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch == '-' || ch == ' ' {
            result.push('_');
            prev_lower = false;
        } else if ch.is_uppercase() {
            if prev_lower {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
            prev_lower = false;
        } else {
            result.push(ch);
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        }
    }
    result
}
