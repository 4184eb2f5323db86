//! PHP expression tree.
//!
//! A small statement model covering exactly what Laravel migration bodies
//! need: string literals, short-syntax arrays, fluent method chains, static
//! calls on facades, and closures. The generator builds these trees and the
//! printer serializes them; neither knows about the other's internals.

/// A PHP expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A variable reference, e.g. `$table`.
    Variable(String),
    /// A single-quoted string literal.
    Str(String),
    /// A short-syntax array literal, e.g. `['card', 'paypal']`.
    Array(Vec<Expr>),
    /// A method call on a receiver expression; chains nest through the
    /// receiver, so `$t->string('a')->nullable()` is a `MethodCall` whose
    /// receiver is another `MethodCall`.
    MethodCall {
        /// The expression the method is invoked on.
        receiver: Box<Expr>,
        /// Method name.
        method: String,
        /// Argument expressions, in call order.
        args: Vec<Expr>,
    },
    /// A static call on a class or facade, e.g. `Schema::create(...)`.
    StaticCall {
        /// Class or facade name.
        class: String,
        /// Method name.
        method: String,
        /// Argument expressions, in call order.
        args: Vec<Expr>,
    },
    /// An anonymous function, e.g. `function (Blueprint $table) { ... }`.
    Closure {
        /// Parameters, in declaration order.
        params: Vec<ClosureParam>,
        /// Body statements, one expression per statement.
        body: Vec<Expr>,
    },
}

impl Expr {
    /// Creates a variable reference.
    #[must_use]
    pub fn var(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Creates a string literal.
    #[must_use]
    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    /// Creates an array literal of string elements.
    #[must_use]
    pub fn str_array<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Array(values.into_iter().map(Self::str).collect())
    }

    /// Creates a method call on `receiver`.
    #[must_use]
    pub fn method(receiver: Self, method: impl Into<String>, args: Vec<Self>) -> Self {
        Self::MethodCall {
            receiver: Box::new(receiver),
            method: method.into(),
            args,
        }
    }

    /// Creates a static call on a class or facade.
    #[must_use]
    pub fn static_call(
        class: impl Into<String>,
        method: impl Into<String>,
        args: Vec<Self>,
    ) -> Self {
        Self::StaticCall {
            class: class.into(),
            method: method.into(),
            args,
        }
    }

    /// Creates a closure with a single typed parameter.
    #[must_use]
    pub fn closure(params: Vec<ClosureParam>, body: Vec<Self>) -> Self {
        Self::Closure { params, body }
    }
}

/// A closure parameter with an optional type hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosureParam {
    /// Parameter name, without the `$` sigil.
    pub name: String,
    /// Type hint, e.g. `Blueprint`.
    pub type_hint: Option<String>,
}

impl ClosureParam {
    /// Creates a type-hinted parameter.
    #[must_use]
    pub fn typed(name: impl Into<String>, type_hint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_hint: Some(type_hint.into()),
        }
    }
}
