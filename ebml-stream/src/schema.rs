// ebml-stream
// Copyright (c) 2026 The Project ebml-stream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `schema` module holds the in-memory representation of a DocType:
//! the set of element definitions the decoder reconciles the element
//! stream against.
//!
//! A [`Schema`] is compiled from a parsed schema document (see
//! [`xml`]) and is immutable afterwards. Definitions live in one vector
//! and are referenced by index; lookups go through an ID map and a
//! per-parent-path child list.

pub mod xml;

use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::path::PathPattern;

/// The payload type of an element.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// Contains child elements.
    Master,
    /// Signed big-endian integer, zero to eight octets.
    Integer,
    /// Unsigned big-endian integer, zero to eight octets.
    Uinteger,
    /// IEEE 754 float of zero, four, or eight octets.
    Float,
    /// Printable ASCII, possibly zero padded.
    String,
    /// UTF-8, possibly zero padded.
    Utf8,
    /// Signed nanoseconds since 2001-01-01T00:00:00 UTC.
    Date,
    /// Opaque bytes.
    Binary,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Master => "master",
            ElementKind::Integer => "integer",
            ElementKind::Uinteger => "uinteger",
            ElementKind::Float => "float",
            ElementKind::String => "string",
            ElementKind::Utf8 => "utf-8",
            ElementKind::Date => "date",
            ElementKind::Binary => "binary",
        }
    }

    pub(crate) fn from_name(name: &str) -> Option<ElementKind> {
        match name {
            "master" => Some(ElementKind::Master),
            "integer" => Some(ElementKind::Integer),
            "uinteger" => Some(ElementKind::Uinteger),
            "float" => Some(ElementKind::Float),
            "string" => Some(ElementKind::String),
            "utf-8" => Some(ElementKind::Utf8),
            "date" => Some(ElementKind::Date),
            "binary" => Some(ElementKind::Binary),
            _ => None,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        out.write_str(self.as_str())
    }
}

/// A parsed default value, typed per the element's payload kind.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Uinteger(u64),
    Integer(i64),
    Float(f64),
    String(String),
}

/// One element definition of a schema.
#[derive(Debug, Clone)]
pub struct ElementDef {
    pub id: u64,
    pub name: String,
    /// The element's path expression, e.g. `\Segment\Info`.
    pub path: String,
    pub kind: ElementKind,
    pub min_occurs: u64,
    /// `None` means unbounded.
    pub max_occurs: Option<u64>,
    pub default: Option<DefaultValue>,
    pub unknown_size_allowed: bool,
    pub recursive: bool,
    pub recurring: bool,
    pub min_ver: u32,
    /// Global elements (Void, CRC-32) may appear under any master.
    pub global: bool,
    depth: u32,
}

impl ElementDef {
    fn from_desc(desc: xml::ElementDesc) -> Result<ElementDef> {
        let global = desc.path.starts_with("\\(");
        let depth = concrete_depth(&desc.path);
        let last = last_segment(&desc.path);
        if last != desc.name {
            return Err(Error::InvalidSchema(format!(
                "path `{}` does not end in element name `{}`",
                desc.path, desc.name
            )));
        }
        let default = match &desc.default {
            Some(raw) => Some(parse_default(desc.kind, raw)?),
            None => None,
        };
        if desc.kind == ElementKind::Master && default.is_some() {
            return Err(Error::InvalidSchema(format!("master element `{}` declares a default", desc.name)));
        }
        Ok(ElementDef {
            id: desc.id,
            name: desc.name,
            path: desc.path,
            kind: desc.kind,
            min_occurs: desc.min_occurs,
            max_occurs: desc.max_occurs,
            default,
            unknown_size_allowed: desc.unknown_size_allowed,
            recursive: desc.recursive,
            recurring: desc.recurring,
            min_ver: desc.min_ver,
            global,
            depth,
        })
    }
}

/// Number of concrete name segments in a path expression; placeholder
/// tokens do not count.
fn concrete_depth(path: &str) -> u32 {
    let mut depth = 0;
    for token in path.split('\\').skip(1) {
        if token.starts_with('(') {
            continue;
        }
        depth += 1;
    }
    depth
}

/// The final name segment of a path expression, without markers.
fn last_segment(path: &str) -> &str {
    let last = path.rsplit('\\').next().unwrap_or(path);
    let last = last.strip_prefix(')').unwrap_or(last);
    last.strip_prefix('+').unwrap_or(last)
}

fn parse_default(kind: ElementKind, raw: &str) -> Result<DefaultValue> {
    let bad = || Error::InvalidSchema(format!("bad {} default `{}`", kind, raw));
    match kind {
        ElementKind::Uinteger => raw.parse().map(DefaultValue::Uinteger).map_err(|_| bad()),
        ElementKind::Integer => raw.parse().map(DefaultValue::Integer).map_err(|_| bad()),
        ElementKind::Float => parse_float(raw).map(DefaultValue::Float).ok_or_else(bad),
        ElementKind::String | ElementKind::Utf8 => Ok(DefaultValue::String(raw.to_string())),
        _ => Err(Error::InvalidSchema(format!("{} elements cannot declare a default", kind))),
    }
}

/// Parses a decimal float, or the C99 hexadecimal form (`0x1.f4p+12`)
/// the published Matroska schema uses for its defaults.
fn parse_float(raw: &str) -> Option<f64> {
    let (negative, raw) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let magnitude = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        None => raw.parse::<f64>().ok()?,
        Some(body) => {
            let split = body.split_once('p').or_else(|| body.split_once('P'));
            let (mantissa, exponent) = match split {
                Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().ok()?),
                None => (body, 0),
            };
            let (whole, fraction) = match mantissa.split_once('.') {
                Some(parts) => parts,
                None => (mantissa, ""),
            };
            if whole.is_empty() && fraction.is_empty() {
                return None;
            }
            let mut value = if whole.is_empty() {
                0.0
            }
            else {
                u64::from_str_radix(whole, 16).ok()? as f64
            };
            let mut scale = 1.0 / 16.0;
            for digit in fraction.chars() {
                value += digit.to_digit(16)? as f64 * scale;
                scale /= 16.0;
            }
            value * (exponent as f64).exp2()
        }
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// An immutable, compiled DocType schema.
#[derive(Debug, Clone)]
pub struct Schema {
    doc_type: String,
    elems: Vec<ElementDef>,
    by_id: HashMap<u64, usize>,
    /// Parent path pattern to the non-master leaves underneath it; used
    /// to enumerate defaults when a master begins.
    children: Vec<(PathPattern, Vec<usize>)>,
    root: usize,
}

impl Schema {
    /// Compiles a parsed schema document, merging the built-in header
    /// and global element definitions into the ID map.
    pub fn new(doc: xml::SchemaDoc) -> Result<Schema> {
        Schema::compile(doc, true)
    }

    /// Compiles without merging the built-in header elements; used to
    /// bootstrap the header schema itself.
    pub(crate) fn without_header(doc: xml::SchemaDoc) -> Result<Schema> {
        Schema::compile(doc, false)
    }

    fn compile(doc: xml::SchemaDoc, merge_header: bool) -> Result<Schema> {
        if doc.doc_type.is_empty() {
            return Err(Error::InvalidSchema("schema carries no docType".to_string()));
        }
        let mut elems = Vec::with_capacity(doc.elements.len());
        for desc in doc.elements {
            elems.push(ElementDef::from_desc(desc)?);
        }

        // The body root must exist before foreign definitions join the
        // ID map: exactly one non-global element at depth one.
        let mut roots = elems.iter().enumerate().filter(|(_, def)| def.depth == 1 && !def.global);
        let root = match (roots.next(), roots.next()) {
            (Some((index, _)), None) => index,
            (None, _) => return Err(Error::InvalidSchema("schema has no root element".to_string())),
            (Some(_), Some(_)) => {
                return Err(Error::InvalidSchema("schema has more than one root element".to_string()));
            }
        };

        if merge_header {
            for def in &crate::header::header_schema().elems {
                if !elems.iter().any(|have| have.id == def.id) {
                    elems.push(def.clone());
                }
            }
        }

        let mut by_id = HashMap::with_capacity(elems.len());
        for (index, def) in elems.iter().enumerate() {
            if by_id.insert(def.id, index).is_some() {
                return Err(Error::InvalidSchema(format!("duplicate element id 0x{:x}", def.id)));
            }
        }

        let mut parents: Vec<(String, Vec<usize>)> = Vec::new();
        for (index, def) in elems.iter().enumerate() {
            if def.kind == ElementKind::Master || def.global || def.depth < 2 {
                continue;
            }
            let parent = match def.path.rsplit_once('\\') {
                Some((parent, _)) => parent,
                None => continue,
            };
            match parents.iter_mut().find(|(path, _)| path == parent) {
                Some((_, children)) => children.push(index),
                None => parents.push((parent.to_string(), vec![index])),
            }
        }
        let mut children = Vec::with_capacity(parents.len());
        for (pattern, indices) in parents {
            children.push((PathPattern::compile(&pattern)?, indices));
        }

        Ok(Schema { doc_type: doc.doc_type, elems, by_id, children, root })
    }

    pub fn doc_type(&self) -> &str {
        &self.doc_type
    }

    /// A copy of this schema registered under another DocType name, e.g.
    /// `webm` for the Matroska definitions.
    pub fn with_doc_type(&self, doc_type: &str) -> Schema {
        let mut copy = self.clone();
        copy.doc_type = doc_type.to_string();
        copy
    }

    /// Looks up a definition by element ID.
    pub fn get(&self, id: u64) -> Option<&ElementDef> {
        self.by_id.get(&id).map(|&index| &self.elems[index])
    }

    /// The body root: the single non-global element at path depth one.
    pub fn root(&self) -> &ElementDef {
        &self.elems[self.root]
    }

    /// The non-master leaves whose parent path matches `path`; the
    /// decoder walks these to apply defaults.
    pub fn children_of<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ElementDef> {
        self.children
            .iter()
            .filter(move |(pattern, _)| pattern.matches(path))
            .flat_map(move |(_, indices)| indices.iter().map(move |&index| &self.elems[index]))
    }

    /// True when `child` may occur inside `parent` according to the path
    /// tree. Global elements descend from anything; a recursive element
    /// descends from itself.
    pub fn is_descendant(&self, child: &ElementDef, parent: &ElementDef) -> bool {
        if child.global {
            return true;
        }
        if parent.recursive && child.id == parent.id {
            return true;
        }
        child.path.len() > parent.path.len()
            && child.path.starts_with(parent.path.as_str())
            && child.path.as_bytes()[parent.path.len()] == b'\\'
    }
}
