//! AST dumps for downstream stages
//!
//! The JSON document is an array of node objects. Every node carries a
//! `"type"` tag (`"FuncDefNode"`, `"AddNode"`, ...) and an `"fp"` position
//! object, followed by its own fields:
//!
//! ```text
//! {"type":"ReturnNode","value":{"type":"IntNode","token":{...},"fp":{...}},"fp":{...}}
//! ```
//!
//! Field order is part of the format and is written explicitly below.

use crate::parser::ast::{Expr, Program, SourceLocation, Stmt, TypeNode, TypedDecl};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::io::Write;

/// Render `program` as a single-line JSON array.
pub fn to_json(program: &Program) -> serde_json::Result<String> {
    serde_json::to_string(program)
}

/// Write `program` as JSON to `writer`.
pub fn write_json<W: Write>(writer: W, program: &Program) -> serde_json::Result<()> {
    serde_json::to_writer(writer, program)
}

/// Render `program` as one compact tree per line.
pub fn to_tree(program: &Program) -> String {
    program
        .statements
        .iter()
        .map(|stmt| format!("{stmt}\n"))
        .collect()
}

/// Write one node object: the `"type"` tag, the node's own fields, then `"fp"`.
fn node<S, F>(
    serializer: S,
    tag: &str,
    location: &SourceLocation,
    fields: F,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    F: FnOnce(&mut S::SerializeMap) -> Result<(), S::Error>,
{
    let mut map = serializer.serialize_map(None)?;
    map.serialize_entry("type", tag)?;
    fields(&mut map)?;
    map.serialize_entry("fp", location)?;
    map.end()
}

impl Serialize for TypeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        node(serializer, "TypeNode", self.location(), |map| {
            map.serialize_entry("token", &self.token)
        })
    }
}

impl Serialize for TypedDecl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        node(serializer, "TypedDeclNode", self.location(), |map| {
            map.serialize_entry("target", &self.target)?;
            map.serialize_entry("valueType", &self.value_type)
        })
    }
}

impl Serialize for Stmt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Stmt::FuncDef {
                target,
                return_type,
                params,
                body,
                location,
            } => node(serializer, "FuncDefNode", location, |map| {
                map.serialize_entry("target", target)?;
                map.serialize_entry("valueType", return_type)?;
                map.serialize_entry("params", params)?;
                map.serialize_entry("body", body)
            }),
            Stmt::VarDecl {
                target,
                value_type,
                location,
            } => node(serializer, "VarDeclNode", location, |map| {
                map.serialize_entry("target", target)?;
                map.serialize_entry("valueType", value_type)
            }),
            Stmt::VarInit {
                target,
                value_type,
                value,
                location,
            } => node(serializer, "VarInitNode", location, |map| {
                map.serialize_entry("target", target)?;
                map.serialize_entry("valueType", value_type)?;
                map.serialize_entry("value", value)
            }),
            Stmt::Return { value, location } => node(serializer, "ReturnNode", location, |map| {
                map.serialize_entry("value", value)
            }),
            Stmt::If {
                condition,
                body,
                location,
            } => node(serializer, "IfNode", location, |map| {
                map.serialize_entry("condition", condition)?;
                map.serialize_entry("body", body)
            }),
            Stmt::IfElse {
                condition,
                truthy,
                falsy,
                location,
            } => node(serializer, "IfElseNode", location, |map| {
                map.serialize_entry("condition", condition)?;
                map.serialize_entry("truthy", truthy)?;
                map.serialize_entry("falsy", falsy)
            }),
            Stmt::While {
                condition,
                body,
                location,
            } => node(serializer, "WhileNode", location, |map| {
                map.serialize_entry("condition", condition)?;
                map.serialize_entry("body", body)
            }),
            Stmt::Expr(expr) => expr.serialize(serializer),
        }
    }
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let location = self.location();

        match self {
            Expr::Assign { target, value } => node(serializer, "AssignNode", location, |map| {
                map.serialize_entry("target", target)?;
                map.serialize_entry("value", value)
            }),
            Expr::Binary { op, left, right } => {
                let tag = format!("{}Node", op.node_name());
                node(serializer, &tag, location, |map| {
                    map.serialize_entry("left", left)?;
                    map.serialize_entry("right", right)
                })
            }
            Expr::FuncCall { target, args } => node(serializer, "FuncCallNode", location, |map| {
                map.serialize_entry("target", target)?;
                map.serialize_entry("args", args)
            }),
            Expr::Int { token } => node(serializer, "IntNode", location, |map| {
                map.serialize_entry("token", token)
            }),
            Expr::Var { token } => node(serializer, "VarNode", location, |map| {
                map.serialize_entry("token", token)
            }),
        }
    }
}
