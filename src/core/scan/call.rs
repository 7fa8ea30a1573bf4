//! Call expression records produced by the scanner.
//!
//! A `CallExpression` is transient: it is created per matched call site and
//! consumed immediately by the classifier. Arguments are modelled as a closed
//! enum so that classification is an exhaustive `match` over argument kinds.

/// A literal value as written in source code.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// String literal, or a template literal. Substitutions in a template are
    /// kept in their `${...}` form so they can be recognised as dynamic.
    Str(String),
    Num(f64),
    Bool(bool),
    /// `null` or `undefined`.
    Null,
}

impl Literal {
    /// The string value, if this is a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// A property of an object literal argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: String,
    pub value: Argument,
}

/// One argument of a call, classified by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// `'app.title'`, `` `app.title` ``, `3`, `true`, `null`
    Literal(Literal),
    /// A variable reference: `key`, `labels.title`
    Identifier(String),
    /// `['a', 'b']`; holes and spread elements are dropped.
    Array(Vec<Argument>),
    /// `{ type: 'ordinal' }`; spread and computed properties are dropped.
    Object(Vec<Property>),
    /// A nested call: `getKey()`, `new Foo()`
    Call,
    /// Any other expression shape (arrow functions, binary expressions, ...).
    Unsupported,
}

impl Argument {
    /// True for identifiers and calls, the two kinds whose value is only
    /// known at runtime.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Argument::Identifier(_) | Argument::Call)
    }

    /// The string value, if this is a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Argument::Literal(literal) => literal.as_str(),
            _ => None,
        }
    }
}

/// A call made through a translation function alias.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    /// Local name the function was called through (e.g. `t`).
    pub callee: String,
    /// 1-based line of the call in its source file.
    pub line: usize,
    pub arguments: Vec<Argument>,
}

impl CallExpression {
    /// Argument at `index`, if present.
    pub fn argument(&self, index: usize) -> Option<&Argument> {
        self.arguments.get(index)
    }
}
