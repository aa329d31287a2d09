//! Nested naming structure.
//!
//! A naming file is a YAML mapping whose keys are either group names or
//! anchor coordinates. Groups map to further mappings; anchors map to a
//! leaf name. This module turns the untyped YAML into a tagged tree and
//! rejects anything that doesn't fit that shape.

use serde_yaml::{Mapping, Value};

use crate::error::{Result, SplitError};
use crate::types::Point;

/// A key in the naming structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamingKey {
    /// A directory-like group name.
    Group(String),
    /// The anchor coordinate of a component.
    Anchor(Point),
}

/// A node in the naming structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamingNode {
    /// Named children, in file order.
    Group(Vec<(NamingKey, NamingNode)>),
    /// A leaf path for one anchor.
    Leaf(String),
}

impl NamingNode {
    /// Parse a naming structure from YAML source.
    pub fn parse(source: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(source).map_err(|e| SplitError::Parse {
            message: format!("Invalid naming table: {}", e),
            help: Some("Check the naming file's YAML syntax".to_string()),
        })?;

        match value {
            // An empty document names nothing.
            Value::Null => Ok(NamingNode::Group(Vec::new())),
            Value::Mapping(map) => group_from_mapping(&map, "<root>"),
            other => Err(structure_error(
                format!("Top level must be a mapping, found {}", kind_of(&other)),
                None,
            )),
        }
    }
}

fn group_from_mapping(map: &Mapping, context: &str) -> Result<NamingNode> {
    let mut children = Vec::with_capacity(map.len());

    for (key, value) in map {
        let key = parse_key(key, context)?;
        let node = match (&key, value) {
            (NamingKey::Group(name), Value::Mapping(inner)) => group_from_mapping(inner, name)?,
            (NamingKey::Group(name), other) => {
                return Err(structure_error(
                    format!(
                        "Group '{}' in '{}' must map to a nested mapping, found {}",
                        name,
                        context,
                        kind_of(other)
                    ),
                    Some("Anchors are written as \"row,col\" or [row, col]".to_string()),
                ))
            }
            (NamingKey::Anchor(point), value) => NamingNode::Leaf(leaf_name(value, *point, context)?),
        };
        children.push((key, node));
    }

    Ok(NamingNode::Group(children))
}

fn parse_key(key: &Value, context: &str) -> Result<NamingKey> {
    match key {
        Value::String(s) => Ok(match parse_anchor(s) {
            Some(point) => NamingKey::Anchor(point),
            None if s.trim().is_empty() => {
                return Err(structure_error(
                    format!("Empty group name in '{}'", context),
                    None,
                ))
            }
            None => NamingKey::Group(s.clone()),
        }),
        Value::Sequence(seq) => anchor_from_sequence(seq).map(NamingKey::Anchor).ok_or_else(|| {
            structure_error(
                format!("Invalid anchor key in '{}': expected [row, col]", context),
                None,
            )
        }),
        other => Err(structure_error(
            format!(
                "Key in '{}' must be a group name or an anchor, found {}",
                context,
                kind_of(other)
            ),
            Some("Quote numeric group names".to_string()),
        )),
    }
}

/// Parse `row,col`, optionally wrapped in parentheses.
fn parse_anchor(s: &str) -> Option<Point> {
    let s = s.trim();
    let s = s
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(s);
    let (row, col) = s.split_once(',')?;
    Some(Point::new(row.trim().parse().ok()?, col.trim().parse().ok()?))
}

fn anchor_from_sequence(seq: &[Value]) -> Option<Point> {
    match seq {
        [row, col] => {
            let row = u32::try_from(row.as_u64()?).ok()?;
            let col = u32::try_from(col.as_u64()?).ok()?;
            Some(Point::new(row, col))
        }
        _ => None,
    }
}

fn leaf_name(value: &Value, anchor: Point, context: &str) -> Result<String> {
    let name = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => {
            return Err(structure_error(
                format!(
                    "Anchor {} in '{}' must map to a name, found {}",
                    anchor,
                    context,
                    kind_of(other)
                ),
                None,
            ))
        }
    };

    if name.trim().is_empty() {
        return Err(structure_error(
            format!("Anchor {} in '{}' has an empty name", anchor, context),
            None,
        ));
    }

    Ok(name)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "nothing",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

pub(super) fn structure_error(message: String, help: Option<String>) -> SplitError {
    SplitError::Structure { message, help }
}
