// ebml-stream
// Copyright (c) 2026 The Project ebml-stream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `path` module compiles and matches EBML path expressions.
//!
//! A path expression is a backslash-separated sequence of element names
//! rooted at the document root, e.g. `\Segment\Info\TimestampScale`. Two
//! extensions appear in schemas: a `+` name prefix marks a recursive
//! segment that may repeat, and a `(min-max\)` placeholder stands for a
//! run of arbitrary segments, as in the global `\(1-\)CRC-32`.

use crate::error::{Error, Result};

/// Joins a parent path and an element name with a backslash.
pub fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        format!("\\{}", name)
    }
    else {
        format!("{}\\{}", parent, name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Segment { name: String, recursive: bool },
    Placeholder { min: u32, max: Option<u32> },
}

/// A compiled path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    nodes: Vec<Node>,
}

impl PathPattern {
    pub fn compile(pattern: &str) -> Result<PathPattern> {
        if !pattern.starts_with('\\') {
            return Err(Error::InvalidSchema(format!("path `{}` does not start with `\\`", pattern)));
        }
        let mut nodes = Vec::new();
        let mut tokens = pattern.split('\\').skip(1);
        while let Some(token) = tokens.next() {
            if let Some(body) = token.strip_prefix('(') {
                // `(min-max\)` terminates with an escaped parenthesis, so
                // splitting on `\` leaves the `)` glued onto the next
                // token, which carries the anchoring segment name.
                let (min, max) = match body.split_once('-') {
                    Some(bounds) => bounds,
                    None => {
                        return Err(Error::InvalidSchema(format!("malformed placeholder in `{}`", pattern)));
                    }
                };
                let min = parse_bound(min, pattern)?.unwrap_or(0);
                let max = parse_bound(max, pattern)?;
                nodes.push(Node::Placeholder { min, max });
                let name = match tokens.next().and_then(|next| next.strip_prefix(')')) {
                    Some(name) if !name.is_empty() => name,
                    _ => {
                        return Err(Error::InvalidSchema(format!(
                            "placeholder in `{}` is not followed by a segment",
                            pattern
                        )));
                    }
                };
                nodes.push(segment(name));
            }
            else if token.is_empty() {
                return Err(Error::InvalidSchema(format!("empty segment in `{}`", pattern)));
            }
            else {
                nodes.push(segment(token));
            }
        }
        match nodes.last() {
            None => Err(Error::InvalidSchema("empty path".to_string())),
            Some(Node::Placeholder { .. }) => {
                Err(Error::InvalidSchema(format!("path `{}` ends with a placeholder", pattern)))
            }
            Some(Node::Segment { .. }) => Ok(PathPattern { nodes }),
        }
    }

    /// Matches a concrete (marker-free) element path.
    pub fn matches(&self, path: &str) -> bool {
        if !path.starts_with('\\') {
            return false;
        }
        let segments: Vec<&str> = path.split('\\').skip(1).collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return false;
        }
        match_nodes(&self.nodes, &segments)
    }
}

fn segment(name: &str) -> Node {
    match name.strip_prefix('+') {
        Some(name) => Node::Segment { name: name.to_string(), recursive: true },
        None => Node::Segment { name: name.to_string(), recursive: false },
    }
}

fn parse_bound(bound: &str, pattern: &str) -> Result<Option<u32>> {
    if bound.is_empty() {
        return Ok(None);
    }
    bound
        .parse()
        .map(Some)
        .map_err(|_| Error::InvalidSchema(format!("bad placeholder bound in `{}`", pattern)))
}

fn match_nodes(nodes: &[Node], segments: &[&str]) -> bool {
    let node = match nodes.first() {
        Some(node) => node,
        None => return segments.is_empty(),
    };
    match node {
        Node::Segment { name, recursive } => {
            if segments.first() != Some(&name.as_str()) {
                return false;
            }
            if !recursive {
                return match_nodes(&nodes[1..], &segments[1..]);
            }
            // A recursive segment consumes one or more equal consecutive
            // segments; backtrack from the longest run.
            let mut run = 1;
            while run < segments.len() && segments[run] == name {
                run += 1;
            }
            for take in (1..=run).rev() {
                if match_nodes(&nodes[1..], &segments[take..]) {
                    return true;
                }
            }
            false
        }
        Node::Placeholder { min, max } => {
            let limit = match max {
                Some(max) => (*max as usize).min(segments.len()),
                None => segments.len(),
            };
            let min = *min as usize;
            if min > limit {
                return false;
            }
            for take in min..=limit {
                if match_nodes(&nodes[1..], &segments[take..]) {
                    return true;
                }
            }
            false
        }
    }
}

/// Compiles `pattern` and matches `path` against it. Invalid patterns
/// match nothing.
pub fn matches(pattern: &str, path: &str) -> bool {
    PathPattern::compile(pattern).map(|compiled| compiled.matches(path)).unwrap_or(false)
}
