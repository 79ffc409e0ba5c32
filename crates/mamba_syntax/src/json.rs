//! Load a syntax tree from its JSON wire form.
//!
//! The wire form mirrors Python's `ast` module: every node is an object with a `kind` discriminant and the fields of
//! that kind. Identifiers may be written either as bare strings or as `Name` nodes.
//!
//! ```json
//! { "body": [
//!   { "kind": "AnnAssign", "target": "x", "annotation": "int",
//!     "value": { "kind": "Constant", "value": 1 } },
//!   { "kind": "Expr", "value": { "kind": "Call", "func": "foo",
//!     "args": [ { "kind": "Name", "id": "x" } ] } }
//! ] }
//! ```
//!
//! ## Notes
//! - Unknown statement kinds load as [`Stmt::Unsupported`] and unknown expression kinds as [`Expr::Other`]; they are
//!   the emitter's business, not the loader's.
//! - Call arguments must be names. Anything else is a [`LoadError::InvalidArgument`].

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::ast::{AnnAssign, Call, Expr, Ident, Literal, Module, Stmt};

/// Errors raised while loading a tree.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed tree JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{context}: node has no `kind` discriminant")]
    MissingKind { context: String },

    #[error("{context}: {source}")]
    InvalidNode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{context}: call arguments must be names, found `{kind}`")]
    InvalidArgument { context: String, kind: String },

    #[error("{context}: constant must be null, a boolean, a number or a string")]
    InvalidConstant { context: String },
}

#[derive(Deserialize)]
struct RawModule {
    body: Vec<Value>,
}

/// An identifier written as `"x"` or as `{"kind": "Name", "id": "x"}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawIdent {
    Bare(Ident),
    Name { id: Ident },
}

impl From<RawIdent> for Ident {
    fn from(raw: RawIdent) -> Self {
        match raw {
            RawIdent::Bare(id) | RawIdent::Name { id } => id,
        }
    }
}

#[derive(Deserialize)]
struct RawAnnAssign {
    target: RawIdent,
    annotation: RawIdent,
    #[serde(default)]
    value: Option<Value>,
}

#[derive(Deserialize)]
struct RawExprStmt {
    value: Value,
}

#[derive(Deserialize)]
struct RawCall {
    func: RawIdent,
    #[serde(default)]
    args: Vec<Value>,
}

#[derive(Deserialize)]
struct RawName {
    id: Ident,
}

#[derive(Deserialize)]
struct RawConstant {
    value: Value,
}

/// Load a module from JSON text.
#[tracing::instrument(skip_all, fields(input_len = json.len()))]
pub fn from_str(json: &str) -> Result<Module, LoadError> {
    let value: Value = serde_json::from_str(json)?;
    from_value(value)
}

/// Load a module from an already-parsed JSON value.
pub fn from_value(value: Value) -> Result<Module, LoadError> {
    let raw: RawModule = serde_json::from_value(value)?;
    let body = raw
        .body
        .into_iter()
        .enumerate()
        .map(|(i, node)| stmt_from_value(node, &format!("body[{}]", i)))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(stmt_count = body.len(), "loaded tree");
    Ok(Module::new(body))
}

fn stmt_from_value(node: Value, context: &str) -> Result<Stmt, LoadError> {
    let kind = kind_of(&node, context)?;
    match kind.as_str() {
        "AnnAssign" => {
            let raw: RawAnnAssign = decode(node, context)?;
            let value = raw
                .value
                .filter(|v| !v.is_null())
                .map(|v| expr_from_value(v, &format!("{}.value", context)))
                .transpose()?;
            Ok(Stmt::AnnAssign(AnnAssign {
                target: raw.target.into(),
                annotation: raw.annotation.into(),
                value,
            }))
        }
        "Expr" => {
            let raw: RawExprStmt = decode(node, context)?;
            Ok(Stmt::Expr(expr_from_value(raw.value, &format!("{}.value", context))?))
        }
        _ => Ok(Stmt::Unsupported { kind }),
    }
}

fn expr_from_value(node: Value, context: &str) -> Result<Expr, LoadError> {
    let kind = kind_of(&node, context)?;
    match kind.as_str() {
        "Constant" => {
            let raw: RawConstant = decode(node, context)?;
            Ok(Expr::Constant(literal_from_value(raw.value, context)?))
        }
        "Name" => {
            let raw: RawName = decode(node, context)?;
            Ok(Expr::Name(raw.id))
        }
        "Call" => {
            let raw: RawCall = decode(node, context)?;
            let args = raw
                .args
                .into_iter()
                .enumerate()
                .map(|(i, arg)| arg_from_value(arg, &format!("{}.args[{}]", context, i)))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Expr::Call(Call {
                func: raw.func.into(),
                args,
            }))
        }
        _ => Ok(Expr::Other { kind }),
    }
}

fn arg_from_value(arg: Value, context: &str) -> Result<Ident, LoadError> {
    if let Value::String(id) = arg {
        return Ok(id);
    }
    match expr_from_value(arg, context)? {
        Expr::Name(id) => Ok(id),
        other => Err(LoadError::InvalidArgument {
            context: context.to_string(),
            kind: other.kind().to_string(),
        }),
    }
}

fn literal_from_value(value: Value, context: &str) -> Result<Literal, LoadError> {
    match value {
        Value::Null => Ok(Literal::None),
        Value::Bool(b) => Ok(Literal::Bool(b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(Literal::Int(i));
            }
            // Numbers keep their source text, so integers past `i64` stay exact.
            let text = n.to_string();
            if !text.contains(['.', 'e', 'E']) {
                return Ok(Literal::BigInt(text));
            }
            n.as_f64().map(Literal::Float).ok_or_else(|| LoadError::InvalidConstant {
                context: context.to_string(),
            })
        }
        Value::String(s) => Ok(Literal::Str(s)),
        Value::Array(_) | Value::Object(_) => Err(LoadError::InvalidConstant {
            context: context.to_string(),
        }),
    }
}

fn kind_of(node: &Value, context: &str) -> Result<String, LoadError> {
    node.get("kind")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| LoadError::MissingKind {
            context: context.to_string(),
        })
}

fn decode<T: for<'de> Deserialize<'de>>(node: Value, context: &str) -> Result<T, LoadError> {
    serde_json::from_value(node).map_err(|source| LoadError::InvalidNode {
        context: context.to_string(),
        source,
    })
}
