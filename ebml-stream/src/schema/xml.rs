// ebml-stream
// Copyright (c) 2026 The Project ebml-stream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `xml` module reads schema documents of the EBMLSchema shape into
//! descriptor structs, ready to be compiled by [`Schema::new`].
//!
//! [`Schema::new`]: super::Schema::new

use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::schema::ElementKind;

/// A parsed `<EBMLSchema>` document.
#[derive(Debug, Clone, Default)]
pub struct SchemaDoc {
    pub doc_type: String,
    pub version: Option<String>,
    pub elements: Vec<ElementDesc>,
}

/// A parsed `<element>` entry. Attribute defaults follow EBMLSchema.xsd:
/// `minOccurs` 0, `maxOccurs` unbounded, `minver` 1, flags false.
#[derive(Debug, Clone)]
pub struct ElementDesc {
    pub name: String,
    pub path: String,
    pub id: u64,
    pub kind: ElementKind,
    pub min_occurs: u64,
    pub max_occurs: Option<u64>,
    pub default: Option<String>,
    pub unknown_size_allowed: bool,
    pub recursive: bool,
    pub recurring: bool,
    pub min_ver: u32,
    pub documentation: Vec<String>,
    pub enums: Vec<EnumEntry>,
}

/// One `<restriction>/<enum>` entry.
#[derive(Debug, Clone)]
pub struct EnumEntry {
    pub label: String,
    pub value: String,
}

fn xml_error(err: quick_xml::Error) -> Error {
    Error::InvalidSchema(format!("schema xml: {}", err))
}

fn attr_value(attr: &Attribute<'_>) -> Result<String> {
    let value = attr.unescape_value().map_err(xml_error)?;
    Ok(value.into_owned())
}

/// Parses a schema document.
pub fn parse(xml: &str) -> Result<SchemaDoc> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut doc = SchemaDoc::default();
    let mut current: Option<ElementDesc> = None;
    let mut in_documentation = false;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Eof => break,
            Event::Start(tag) => match tag.name().as_ref() {
                b"EBMLSchema" => read_doc_attrs(&tag, &mut doc)?,
                b"element" => current = Some(read_element(&tag)?),
                b"documentation" => in_documentation = true,
                b"enum" => {
                    if let Some(element) = current.as_mut() {
                        element.enums.push(read_enum(&tag)?);
                    }
                }
                // Accepted but not modelled.
                b"restriction" | b"implementation_note" | b"extension" => (),
                _ => (),
            },
            Event::Empty(tag) => match tag.name().as_ref() {
                b"EBMLSchema" => read_doc_attrs(&tag, &mut doc)?,
                b"element" => doc.elements.push(read_element(&tag)?),
                b"enum" => {
                    if let Some(element) = current.as_mut() {
                        element.enums.push(read_enum(&tag)?);
                    }
                }
                _ => (),
            },
            Event::End(tag) => match tag.name().as_ref() {
                b"element" => {
                    if let Some(element) = current.take() {
                        doc.elements.push(element);
                    }
                }
                b"documentation" => in_documentation = false,
                _ => (),
            },
            Event::Text(text) => {
                if in_documentation {
                    if let Some(element) = current.as_mut() {
                        let text = text.unescape().map_err(xml_error)?;
                        element.documentation.push(text.into_owned());
                    }
                }
            }
            _ => (),
        }
    }

    if doc.doc_type.is_empty() {
        return Err(Error::InvalidSchema("schema carries no docType".to_string()));
    }
    Ok(doc)
}

fn read_doc_attrs(tag: &BytesStart<'_>, doc: &mut SchemaDoc) -> Result<()> {
    for attr in tag.attributes() {
        let attr = attr.map_err(|err| Error::InvalidSchema(format!("schema xml: {}", err)))?;
        match attr.key.as_ref() {
            b"docType" => doc.doc_type = attr_value(&attr)?,
            b"version" => doc.version = Some(attr_value(&attr)?),
            _ => (),
        }
    }
    Ok(())
}

fn read_enum(tag: &BytesStart<'_>) -> Result<EnumEntry> {
    let mut entry = EnumEntry { label: String::new(), value: String::new() };
    for attr in tag.attributes() {
        let attr = attr.map_err(|err| Error::InvalidSchema(format!("schema xml: {}", err)))?;
        match attr.key.as_ref() {
            b"label" => entry.label = attr_value(&attr)?,
            b"value" => entry.value = attr_value(&attr)?,
            _ => (),
        }
    }
    Ok(entry)
}

fn read_element(tag: &BytesStart<'_>) -> Result<ElementDesc> {
    let mut name = None;
    let mut path = None;
    let mut id = None;
    let mut kind = None;
    let mut element = ElementDesc {
        name: String::new(),
        path: String::new(),
        id: 0,
        kind: ElementKind::Binary,
        min_occurs: 0,
        max_occurs: None,
        default: None,
        unknown_size_allowed: false,
        recursive: false,
        recurring: false,
        min_ver: 1,
        documentation: Vec::new(),
        enums: Vec::new(),
    };

    for attr in tag.attributes() {
        let attr = attr.map_err(|err| Error::InvalidSchema(format!("schema xml: {}", err)))?;
        let value = attr_value(&attr)?;
        match attr.key.as_ref() {
            b"name" => name = Some(value),
            b"path" => path = Some(value),
            b"id" => id = Some(parse_id(&value)?),
            b"type" => {
                kind = Some(ElementKind::from_name(&value).ok_or_else(|| {
                    Error::InvalidSchema(format!("unknown element type `{}`", value))
                })?);
            }
            b"minOccurs" => {
                element.min_occurs = value
                    .parse()
                    .map_err(|_| Error::InvalidSchema(format!("bad minOccurs `{}`", value)))?;
            }
            b"maxOccurs" => {
                element.max_occurs = if value == "unbounded" {
                    None
                }
                else {
                    Some(value.parse().map_err(|_| {
                        Error::InvalidSchema(format!("bad maxOccurs `{}`", value))
                    })?)
                };
            }
            b"default" => element.default = Some(value),
            b"unknownsizeallowed" => element.unknown_size_allowed = parse_bool(&value)?,
            b"recursive" => element.recursive = parse_bool(&value)?,
            b"recurring" => element.recurring = parse_bool(&value)?,
            b"minver" => {
                element.min_ver = value
                    .parse()
                    .map_err(|_| Error::InvalidSchema(format!("bad minver `{}`", value)))?;
            }
            _ => (),
        }
    }

    element.name = name.ok_or_else(|| Error::InvalidSchema("element without a name".to_string()))?;
    element.path = path
        .ok_or_else(|| Error::InvalidSchema(format!("element `{}` has no path", element.name)))?;
    element.id =
        id.ok_or_else(|| Error::InvalidSchema(format!("element `{}` has no id", element.name)))?;
    element.kind = kind
        .ok_or_else(|| Error::InvalidSchema(format!("element `{}` has no type", element.name)))?;
    Ok(element)
}

fn parse_id(raw: &str) -> Result<u64> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .ok_or_else(|| Error::InvalidSchema(format!("bad element id `{}`", raw)))?;
    u64::from_str_radix(digits, 16)
        .map_err(|_| Error::InvalidSchema(format!("bad element id `{}`", raw)))
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(Error::InvalidSchema(format!("bad boolean attribute `{}`", raw))),
    }
}
