//! Syntax tree definitions for the Mamba statement subset.
//!
//! The tree is deliberately closed: two statement shapes are understood (annotated assignment and a bare call), and
//! everything else is carried as an `Unsupported` variant that remembers its kind name for diagnostics.

use std::fmt;

/// Identifier (variable, function or type name).
pub type Ident = String;

/// A module is the ordered sequence of top-level statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    pub body: Vec<Stmt>,
}

impl Module {
    pub fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }
}

/// Top-level statements
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `target: annotation = value`
    AnnAssign(AnnAssign),
    /// A bare expression statement, e.g. `print(x)`
    Expr(Expr),
    /// Any other statement kind (`If`, `FunctionDef`, ...)
    Unsupported { kind: String },
}

impl Stmt {
    /// Build `target: annotation = <literal>`.
    pub fn ann_assign(target: impl Into<Ident>, annotation: impl Into<Ident>, value: Literal) -> Self {
        Stmt::AnnAssign(AnnAssign {
            target: target.into(),
            annotation: annotation.into(),
            value: Some(Expr::Constant(value)),
        })
    }

    /// Build the expression statement `func(args...)`.
    pub fn call<I, S>(func: impl Into<Ident>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Ident>,
    {
        Stmt::Expr(Expr::Call(Call {
            func: func.into(),
            args: args.into_iter().map(Into::into).collect(),
        }))
    }

    pub fn unsupported(kind: impl Into<String>) -> Self {
        Stmt::Unsupported { kind: kind.into() }
    }

    /// Node kind name, as spelled by the front-end.
    pub fn kind(&self) -> &str {
        match self {
            Stmt::AnnAssign(_) => "AnnAssign",
            Stmt::Expr(_) => "Expr",
            Stmt::Unsupported { kind } => kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnAssign {
    pub target: Ident,
    /// Source type name, e.g. `int`
    pub annotation: Ident,
    /// `None` for a bare declaration such as `x: int`
    pub value: Option<Expr>,
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(Literal),
    Name(Ident),
    Call(Call),
    /// Any other expression kind (`BinOp`, `List`, ...)
    Other { kind: String },
}

impl Expr {
    pub fn kind(&self) -> &str {
        match self {
            Expr::Constant(_) => "Constant",
            Expr::Name(_) => "Name",
            Expr::Call(_) => "Call",
            Expr::Other { kind } => kind,
        }
    }
}

/// A call whose callee and arguments are plain names.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub func: Ident,
    pub args: Vec<Ident>,
}

/// Constant literal values
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    /// Integer outside the `i64` range, kept as its exact decimal text
    BigInt(String),
    Float(f64),
    Str(String),
}

/// Renders the literal the way the source language prints it (`True`, `None`, `1.0`, raw string contents).
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::None => write!(f, "None"),
            Literal::Bool(true) => write!(f, "True"),
            Literal::Bool(false) => write!(f, "False"),
            Literal::Int(n) => write!(f, "{}", n),
            Literal::BigInt(digits) => write!(f, "{}", digits),
            Literal::Float(x) => fmt_float(*x, f),
            Literal::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Shortest round-trip digits, positional for decimal exponents in `-4..16` and `1e+16` style outside it.
fn fmt_float(x: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if x.is_nan() {
        return write!(f, "nan");
    }
    if x.is_infinite() {
        return write!(f, "{}", if x > 0.0 { "inf" } else { "-inf" });
    }

    let scientific = format!("{:e}", x);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return write!(f, "{}e{}{:02}", mantissa, sign, exponent.unsigned_abs());
    }

    let positional = x.to_string();
    if positional.contains('.') {
        write!(f, "{}", positional)
    } else {
        write!(f, "{}.0", positional)
    }
}
