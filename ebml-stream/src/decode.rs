// ebml-stream
// Copyright (c) 2026 The Project ebml-stream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `decode` module drives the element cursor against a schema and a
//! target model.
//!
//! [`Decoder::decode_header`] consumes the `\EBML` header, switches the
//! active schema to the one registered for the document's DocType, and
//! installs the header's ID and size width limits.
//! [`Decoder::decode_body`] then walks the body root into a caller
//! supplied [`Record`].

use std::io::Read;
use std::time::Duration;

use crate::cursor::{DataSize, ElementCursor, ElementHeader, NextOf};
use crate::error::{Error, Result};
use crate::header::{EbmlHeader, EBML_ID};
use crate::path;
use crate::primitive;
use crate::registry;
use crate::schema::{DefaultValue, ElementDef, ElementKind, Schema};
use crate::target::{self, Record, Slot, TypeInfoCache};

/// Initial cap on a single payload allocation step; proven-large
/// payloads double it.
const ALLOC_WINDOW_START: u64 = 16 * 1024 * 1024 - 1;

/// Decoder knobs.
#[derive(Debug, Copy, Clone, Default)]
pub struct DecoderOptions {
    /// Extend `integer` payloads from the top bit of their first octet.
    /// Off by default: octets accumulate as if unsigned, which is exact
    /// for the eight octet payloads real documents carry.
    pub sign_extend_integers: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    AwaitHeader,
    AwaitBody,
    Done,
}

/// A schema-driven decoder over a byte source.
pub struct Decoder<R: Read> {
    cursor: ElementCursor<R>,
    state: State,
    info: TypeInfoCache,
    payload: Vec<u8>,
    alloc_window: u64,
    overflow: Option<Error>,
    opts: DecoderOptions,
}

impl<R: Read> Decoder<R> {
    pub fn new(src: R) -> Decoder<R> {
        Decoder::with_options(src, DecoderOptions::default())
    }

    pub fn with_options(src: R, opts: DecoderOptions) -> Decoder<R> {
        Decoder {
            cursor: ElementCursor::new(src, crate::header::header_schema()),
            state: State::AwaitHeader,
            info: TypeInfoCache::default(),
            payload: Vec::new(),
            alloc_window: ALLOC_WINDOW_START,
            overflow: None,
            opts,
        }
    }

    /// Reads the next element header; see [`ElementCursor::next`].
    pub fn next(&mut self) -> Result<Option<ElementHeader>> {
        self.cursor.next()
    }

    /// Reads the next child of `parent`; see [`ElementCursor::next_of`].
    pub fn next_of(&mut self, parent: &ElementHeader, offset: u64) -> Result<NextOf> {
        self.cursor.next_of(parent, offset)
    }

    /// Discards `count` payload bytes.
    pub fn skip(&mut self, count: u64) -> Result<()> {
        self.cursor.skip(count)
    }

    /// Logical stream position.
    pub fn pos(&self) -> u64 {
        self.cursor.pos()
    }

    /// Reads root-level elements until the `\EBML` header, decodes it,
    /// and installs the schema registered for its DocType along with its
    /// width limits.
    pub fn decode_header(&mut self) -> Result<EbmlHeader> {
        if self.state != State::AwaitHeader {
            return Err(Error::DecodeError("the header has already been decoded"));
        }
        loop {
            let header = match self.cursor.next()? {
                Some(header) => header,
                None => return Err(Error::DecodeError("end of input before the EBML header")),
            };
            if header.id == EBML_ID {
                let schema = crate::header::header_schema();
                let mut out = EbmlHeader::default();
                self.decode_master(&schema, &header, Slot::Record(&mut out), "\\EBML")?;
                let body = registry::definition(&out.doc_type)?;
                self.cursor.set_schema(body);
                self.cursor.set_limits(out.max_id_length, out.max_size_length);
                self.state = State::AwaitBody;
                log::debug!("doc type `{}`, version {}", out.doc_type, out.doc_type_version);
                if let Some(err) = self.overflow.take() {
                    return Err(err);
                }
                return Ok(out);
            }
            match header.size {
                DataSize::Known(len) => {
                    log::debug!("skipping element 0x{:x} before the EBML header", header.id);
                    self.cursor.skip(len)?;
                }
                DataSize::Unknown => {
                    return Err(Error::UnknownMaster { id: header.id, offset: header.pos });
                }
            }
        }
    }

    /// Reads root-level elements until the body root, then decodes the
    /// root master into `target`. A deferred overflow, if any, surfaces
    /// once decoding completes.
    pub fn decode_body(&mut self, target: &mut dyn Record) -> Result<()> {
        if self.state != State::AwaitBody {
            return Err(Error::DecodeError("decode_header must run before decode_body"));
        }
        let schema = self.cursor.schema().clone();
        let root_id = schema.root().id;
        loop {
            let header = match self.cursor.next()? {
                Some(header) => header,
                None => {
                    self.state = State::Done;
                    return Ok(());
                }
            };
            if header.id == root_id {
                let root_path = schema.root().path.clone();
                self.decode_master(&schema, &header, Slot::Record(target), &root_path)?;
                self.state = State::Done;
                if let Some(err) = self.overflow.take() {
                    return Err(err);
                }
                return Ok(());
            }
            match header.size {
                DataSize::Known(len) => {
                    log::debug!("skipping element 0x{:x} before the body root", header.id);
                    self.cursor.skip(len)?;
                }
                DataSize::Unknown => {
                    return Err(Error::UnknownMaster { id: header.id, offset: header.pos });
                }
            }
        }
    }

    /// Decodes the children of a master element into the record behind
    /// `target`.
    fn decode_master(
        &mut self,
        schema: &Schema,
        parent: &ElementHeader,
        target: Slot<'_>,
        path: &str,
    ) -> Result<()> {
        let record: &mut dyn Record = match target {
            Slot::Record(record) => record,
            Slot::Seq(seq) => match seq.grow() {
                Slot::Record(record) => record,
                other => {
                    return Err(Error::TypeMismatch {
                        element: ElementKind::Master,
                        target: other.target_name(),
                        path: path.to_string(),
                        offset: parent.pos,
                    });
                }
            },
            other => {
                return Err(Error::TypeMismatch {
                    element: ElementKind::Master,
                    target: other.target_name(),
                    path: path.to_string(),
                    offset: parent.pos,
                });
            }
        };
        let info = self.info.info(&mut *record);

        // Defaults go in first so present children overwrite them.
        for def in schema.children_of(path) {
            let value = match &def.default {
                Some(value) => value,
                None => continue,
            };
            if let Some(field) = info.lookup(&def.name) {
                let slot = target::slot_at(&mut *record, &field.index_path);
                apply_default(slot, value, def, path, parent.pos)?;
            }
        }

        let mut offset = 0u64;
        loop {
            let mut child = match self.cursor.next_of(parent, offset) {
                Ok(NextOf::End) => break,
                Ok(NextOf::Child(header)) => header,
                Ok(NextOf::Overflow { excess }) => {
                    if self.overflow.is_none() {
                        self.overflow =
                            Some(Error::ElementOverflow { path: path.to_string(), excess });
                    }
                    break;
                }
                Err(Error::InvalidVintWidth { offset: at }) => {
                    log::warn!("invalid VINT width at offset {}; skipping one byte", at);
                    self.cursor.skip(1)?;
                    offset += 1;
                    continue;
                }
                Err(err) => return Err(err.at_path(path)),
            };
            offset += u64::from(child.header_len);

            // Children claiming more than the parent has left get
            // clamped; the overflow surfaces after decoding completes.
            if let (Some(parent_size), Some(child_size)) = (parent.size.known(), child.size.known())
            {
                let remaining = parent_size.saturating_sub(offset);
                if child_size > remaining {
                    let name =
                        schema.get(child.id).map(|def| def.name.as_str()).unwrap_or("unknown");
                    log::warn!(
                        "element `{}` of {} bytes exceeds the {} remaining in `{}`",
                        name,
                        child_size,
                        remaining,
                        path
                    );
                    if self.overflow.is_none() {
                        self.overflow = Some(Error::ElementOverflow {
                            path: path::join(path, name),
                            excess: child_size - remaining,
                        });
                    }
                    child.size = DataSize::Known(remaining);
                }
            }

            let def = schema.get(child.id);
            let field = def.and_then(|def| info.lookup(&def.name));
            match (def, field) {
                (Some(def), Some(field)) => {
                    let child_path = path::join(path, &def.name);
                    let start = self.cursor.pos();
                    let slot = target::slot_at(&mut *record, &field.index_path);
                    self.decode_single(schema, &child, def, slot, &child_path)?;
                    offset += self.cursor.pos() - start;
                }
                (def, None) => match child.size {
                    DataSize::Known(len) => {
                        log::debug!("skipping element 0x{:x} under `{}`", child.id, path);
                        self.cursor.skip(len)?;
                        offset += len;
                    }
                    DataSize::Unknown => match def {
                        Some(def) if def.kind == ElementKind::Master => {
                            // No matching field: flatten the nested
                            // unknown-size master onto the current
                            // record.
                            let child_path = path::join(path, &def.name);
                            let start = self.cursor.pos();
                            self.decode_master(
                                schema,
                                &child,
                                Slot::Record(&mut *record),
                                &child_path,
                            )?;
                            offset += self.cursor.pos() - start;
                        }
                        _ => {
                            return Err(Error::UnknownMaster { id: child.id, offset: child.pos });
                        }
                    },
                },
                (None, Some(_)) => unreachable!("field lookup requires a resolved def"),
            }
        }

        if let Some(size) = parent.size.known() {
            if offset < size {
                return Err(Error::UnexpectedEnd { path: path.to_string(), missing: size - offset });
            }
        }
        Ok(())
    }

    /// Decodes one element into one target slot.
    fn decode_single(
        &mut self,
        schema: &Schema,
        element: &ElementHeader,
        def: &ElementDef,
        slot: Slot<'_>,
        path: &str,
    ) -> Result<()> {
        let slot = match slot {
            Slot::Seq(seq) => seq.grow(),
            other => other,
        };
        if def.kind == ElementKind::Master {
            return self.decode_master(schema, element, slot, path);
        }
        let len = match element.size.known() {
            Some(len) => len,
            None => {
                return Err(Error::InvalidPayload {
                    element: def.kind,
                    path: path.to_string(),
                    reason: "only master elements may have an unknown size",
                });
            }
        };
        self.read_payload(len)?;
        let sign_extend = self.opts.sign_extend_integers;
        let data = &self.payload[..];
        match (def.kind, slot) {
            (ElementKind::Uinteger, Slot::Uint(value)) => {
                *value = primitive::read_uint(data).map_err(|err| err.at_path(path))?;
            }
            (ElementKind::Uinteger, Slot::Uint32(value)) => {
                let full = primitive::read_uint(data).map_err(|err| err.at_path(path))?;
                *value = u32::try_from(full).map_err(|_| Error::InvalidPayload {
                    element: def.kind,
                    path: path.to_string(),
                    reason: "value does not fit the 32-bit target",
                })?;
            }
            (ElementKind::Uinteger, Slot::Span(value)) => {
                let ns = primitive::read_uint(data).map_err(|err| err.at_path(path))?;
                *value = Duration::from_nanos(ns);
            }
            (ElementKind::Integer, Slot::Int(value)) => {
                *value = primitive::read_int(data, sign_extend).map_err(|err| err.at_path(path))?;
            }
            (ElementKind::Integer, Slot::Int32(value)) => {
                let full =
                    primitive::read_int(data, sign_extend).map_err(|err| err.at_path(path))?;
                *value = i32::try_from(full).map_err(|_| Error::InvalidPayload {
                    element: def.kind,
                    path: path.to_string(),
                    reason: "value does not fit the 32-bit target",
                })?;
            }
            (ElementKind::Float, Slot::Float(value)) => {
                *value = primitive::read_float(data).map_err(|err| err.at_path(path))?;
            }
            (ElementKind::Float, Slot::Float32(value)) => {
                *value = primitive::read_float(data).map_err(|err| err.at_path(path))? as f32;
            }
            (ElementKind::String, Slot::Str(value)) | (ElementKind::Utf8, Slot::Str(value)) => {
                *value = primitive::read_string(data).map_err(|err| err.at_path(path))?;
            }
            (ElementKind::Date, Slot::Date(value)) => {
                *value = primitive::read_date(data, sign_extend).map_err(|err| err.at_path(path))?;
            }
            (ElementKind::Binary, Slot::Bytes(value)) => {
                value.clear();
                value.extend_from_slice(data);
            }
            (kind, other) => {
                return Err(Error::TypeMismatch {
                    element: kind,
                    target: other.target_name(),
                    path: path.to_string(),
                    offset: element.data_pos(),
                });
            }
        }
        Ok(())
    }

    /// Reads `len` payload bytes into the reusable buffer. Allocation
    /// happens in steps bounded by a window that doubles as larger
    /// payloads prove themselves real, so a corrupt size cannot demand
    /// the whole allocation up front.
    fn read_payload(&mut self, len: u64) -> Result<()> {
        self.payload.clear();
        let mut remaining = len;
        while remaining > 0 {
            let step = remaining.min(self.alloc_window) as usize;
            let start = self.payload.len();
            self.payload.resize(start + step, 0);
            self.cursor.read_exact(&mut self.payload[start..])?;
            remaining -= step as u64;
            if remaining > 0 {
                self.alloc_window = self.alloc_window.saturating_mul(2);
            }
        }
        Ok(())
    }
}

/// Applies a schema default to a scalar slot. Sequence and record slots
/// have nothing sensible to default and are left alone.
fn apply_default(
    slot: Slot<'_>,
    value: &DefaultValue,
    def: &ElementDef,
    parent_path: &str,
    offset: u64,
) -> Result<()> {
    match (value, slot) {
        (DefaultValue::Uinteger(x), Slot::Uint(value)) => *value = *x,
        (DefaultValue::Uinteger(x), Slot::Uint32(value)) => {
            *value = u32::try_from(*x).map_err(|_| Error::InvalidPayload {
                element: def.kind,
                path: path::join(parent_path, &def.name),
                reason: "default does not fit the 32-bit target",
            })?;
        }
        (DefaultValue::Uinteger(x), Slot::Span(value)) => *value = Duration::from_nanos(*x),
        (DefaultValue::Integer(x), Slot::Int(value)) => *value = *x,
        (DefaultValue::Integer(x), Slot::Int32(value)) => {
            *value = i32::try_from(*x).map_err(|_| Error::InvalidPayload {
                element: def.kind,
                path: path::join(parent_path, &def.name),
                reason: "default does not fit the 32-bit target",
            })?;
        }
        (DefaultValue::Float(x), Slot::Float(value)) => *value = *x,
        (DefaultValue::Float(x), Slot::Float32(value)) => *value = *x as f32,
        (DefaultValue::String(x), Slot::Str(value)) => *value = x.clone(),
        (_, Slot::Seq(_)) | (_, Slot::Record(_)) => (),
        (_, other) => {
            return Err(Error::TypeMismatch {
                element: def.kind,
                target: other.target_name(),
                path: path::join(parent_path, &def.name),
                offset,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ebml_record;
    use crate::target::Date;
    use crate::{registry, schema, vint};
    use std::io::Cursor;
    use std::sync::Once;

    const DOC_TYPE: &str = "decoder-test";

    const TEST_SCHEMA: &str = r#"
        <EBMLSchema xmlns="urn:ietf:rfc:8794" docType="decoder-test" version="1">
          <element name="Top" path="\Top" id="0x18538067" type="master" unknownsizeallowed="1"/>
          <element name="Meta" path="\Top\Meta" id="0x4D45" type="master"/>
          <element name="Scale" path="\Top\Meta\Scale" id="0x5343" type="uinteger" default="1000000"/>
          <element name="Name" path="\Top\Meta\Name" id="0x4E41" type="utf-8"/>
          <element name="Stamp" path="\Top\Meta\Stamp" id="0x5354" type="date"/>
          <element name="Gain" path="\Top\Meta\Gain" id="0x4741" type="float"/>
          <element name="Item" path="\Top\Item" id="0x4954" type="master"/>
          <element name="Count" path="\Top\Item\Count" id="0x434F" type="uinteger"/>
          <element name="Data" path="\Top\Item\Data" id="0x4441" type="binary"/>
          <element name="Shift" path="\Top\Item\Shift" id="0x4F46" type="integer"/>
          <element name="Wait" path="\Top\Item\Wait" id="0x5741" type="uinteger"/>
          <element name="Extra" path="\Top\Extra" id="0x4558" type="master" unknownsizeallowed="1"/>
        </EBMLSchema>
    "#;

    ebml_record! {
        struct Top {
            "Meta" => meta: Meta,
            "Item" => items: Vec<Item>,
        }
    }

    ebml_record! {
        struct Meta {
            "Scale" => scale: u64,
            "Name" => name: String,
            "Stamp" => stamp: Date,
            "Gain" => gain: f64,
        }
    }

    ebml_record! {
        struct Item {
            "Count" => count: u64,
            "Data" => data: Vec<u8>,
            "Shift" => shift: i64,
            "Wait" => wait: Duration,
        }
    }

    ebml_record! {
        struct BadTop {
            "Meta" => meta: BadMeta,
        }
    }

    ebml_record! {
        struct BadMeta {
            "Scale" => scale: String,
        }
    }

    fn setup() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let doc = schema::xml::parse(TEST_SCHEMA).unwrap();
            registry::register(DOC_TYPE, schema::Schema::new(doc).unwrap());
        });
    }

    fn elem(buf: &mut Vec<u8>, id: u64, payload: &[u8]) {
        vint::append_id(buf, id);
        vint::append_vint_data(buf, payload.len() as u64, 0);
        buf.extend_from_slice(payload);
    }

    fn uint_elem(buf: &mut Vec<u8>, id: u64, value: u64) {
        let mut payload = Vec::new();
        crate::primitive::append_uint(&mut payload, value);
        elem(buf, id, &payload);
    }

    fn str_elem(buf: &mut Vec<u8>, id: u64, value: &str) {
        elem(buf, id, value.as_bytes());
    }

    fn header_bytes() -> Vec<u8> {
        let mut doc_type = Vec::new();
        str_elem(&mut doc_type, 0x4282, DOC_TYPE);
        let mut buf = Vec::new();
        elem(&mut buf, EBML_ID, &doc_type);
        buf
    }

    fn decoder(bytes: Vec<u8>) -> Decoder<Cursor<Vec<u8>>> {
        setup();
        Decoder::new(Cursor::new(bytes))
    }

    #[test]
    fn header_applies_defaults() {
        let mut dec = decoder(header_bytes());
        let header = dec.decode_header().unwrap();
        assert_eq!(header.doc_type, DOC_TYPE);
        assert_eq!(header.version, 1);
        assert_eq!(header.read_version, 1);
        assert_eq!(header.max_id_length, 4);
        assert_eq!(header.max_size_length, 8);
        assert_eq!(header.doc_type_version, 1);
        assert_eq!(header.doc_type_read_version, 1);
    }

    #[test]
    fn body_defaults_and_overrides() {
        // Meta without a Scale takes the schema default.
        let mut bytes = header_bytes();
        let mut meta = Vec::new();
        str_elem(&mut meta, 0x4e41, "first");
        let mut top = Vec::new();
        elem(&mut top, 0x4d45, &meta);
        elem(&mut bytes, 0x18538067, &top);

        let mut dec = decoder(bytes);
        dec.decode_header().unwrap();
        let mut out = Top::default();
        dec.decode_body(&mut out).unwrap();
        assert_eq!(out.meta.scale, 1_000_000);
        assert_eq!(out.meta.name, "first");

        // An explicit Scale overwrites the default.
        let mut bytes = header_bytes();
        let mut meta = Vec::new();
        uint_elem(&mut meta, 0x5343, 500_000);
        let mut top = Vec::new();
        elem(&mut top, 0x4d45, &meta);
        elem(&mut bytes, 0x18538067, &top);

        let mut dec = decoder(bytes);
        dec.decode_header().unwrap();
        let mut out = Top::default();
        dec.decode_body(&mut out).unwrap();
        assert_eq!(out.meta.scale, 500_000);
    }

    #[test]
    fn unknown_size_root_with_sequences() {
        let mut bytes = header_bytes();
        // Top with an unknown size runs to the end of input.
        vint::append_id(&mut bytes, 0x18538067);
        bytes.push(0xff);
        let mut item = Vec::new();
        uint_elem(&mut item, 0x434f, 1);
        elem(&mut item, 0x4441, &[0xde, 0xad]);
        elem(&mut bytes, 0x4954, &item);
        let mut item = Vec::new();
        uint_elem(&mut item, 0x434f, 2);
        uint_elem(&mut item, 0x5741, 33_366_667);
        elem(&mut bytes, 0x4954, &item);

        let mut dec = decoder(bytes);
        dec.decode_header().unwrap();
        let mut out = Top::default();
        dec.decode_body(&mut out).unwrap();
        assert_eq!(out.items.len(), 2);
        assert_eq!(out.items[0].count, 1);
        assert_eq!(out.items[0].data, vec![0xde, 0xad]);
        assert_eq!(out.items[1].count, 2);
        assert_eq!(out.items[1].wait, Duration::from_nanos(33_366_667));
    }

    #[test]
    fn date_and_float_payloads() {
        let mut bytes = header_bytes();
        let mut meta = Vec::new();
        elem(&mut meta, 0x5354, &[0u8; 8]);
        elem(&mut meta, 0x4741, &2.5f64.to_be_bytes());
        let mut top = Vec::new();
        elem(&mut top, 0x4d45, &meta);
        elem(&mut bytes, 0x18538067, &top);

        let mut dec = decoder(bytes);
        dec.decode_header().unwrap();
        let mut out = Top::default();
        dec.decode_body(&mut out).unwrap();
        assert_eq!(out.meta.stamp, Date::default());
        assert_eq!(out.meta.gain, 2.5);
    }

    #[test]
    fn unknown_elements_are_skipped() {
        let mut bytes = header_bytes();
        let mut meta = Vec::new();
        elem(&mut meta, 0x7741, &[1, 2, 3]); // not in the schema
        str_elem(&mut meta, 0x4e41, "kept");
        let mut top = Vec::new();
        elem(&mut top, 0x4d45, &meta);
        elem(&mut bytes, 0x18538067, &top);

        let mut dec = decoder(bytes);
        dec.decode_header().unwrap();
        let mut out = Top::default();
        dec.decode_body(&mut out).unwrap();
        assert_eq!(out.meta.name, "kept");
    }

    #[test]
    fn unknown_size_master_without_field_is_flattened() {
        let mut bytes = header_bytes();
        vint::append_id(&mut bytes, 0x18538067);
        bytes.push(0xff);
        // Extra has no field on Top; its unknown size region ends at
        // Item, which must still land in the sequence.
        vint::append_id(&mut bytes, 0x4558);
        bytes.push(0xff);
        let mut item = Vec::new();
        uint_elem(&mut item, 0x434f, 9);
        elem(&mut bytes, 0x4954, &item);

        let mut dec = decoder(bytes);
        dec.decode_header().unwrap();
        let mut out = Top::default();
        dec.decode_body(&mut out).unwrap();
        assert_eq!(out.items.len(), 1);
        assert_eq!(out.items[0].count, 9);
    }

    #[test]
    fn resynchronises_after_garbage() {
        let mut bytes = header_bytes();
        let mut meta = Vec::new();
        meta.extend_from_slice(&[0x00; 5]); // garbage inside Meta
        str_elem(&mut meta, 0x4e41, "after");
        let mut top = Vec::new();
        elem(&mut top, 0x4d45, &meta);
        elem(&mut bytes, 0x18538067, &top);

        let mut dec = decoder(bytes);
        dec.decode_header().unwrap();
        let mut out = Top::default();
        dec.decode_body(&mut out).unwrap();
        assert_eq!(out.meta.name, "after");
    }

    #[test]
    fn overflowing_child_is_clamped_and_deferred() {
        let mut bytes = header_bytes();
        vint::append_id(&mut bytes, 0x18538067);
        bytes.push(0xff);
        // Meta declares four bytes; its Scale child claims five bytes of
        // payload with only one remaining.
        let meta = [0x53, 0x43, 0x85, 0x07];
        elem(&mut bytes, 0x4d45, &meta);

        let mut dec = decoder(bytes);
        dec.decode_header().unwrap();
        let mut out = Top::default();
        let err = dec.decode_body(&mut out).unwrap_err();
        match err {
            Error::ElementOverflow { path, excess } => {
                assert_eq!(path, "\\Top\\Meta\\Scale");
                assert_eq!(excess, 4);
            }
            other => panic!("expected a deferred overflow, got {:?}", other),
        }
        // The clamped payload still decoded.
        assert_eq!(out.meta.scale, 7);
    }

    #[test]
    fn truncated_master_reports_unexpected_end() {
        let mut bytes = header_bytes();
        vint::append_id(&mut bytes, 0x18538067);
        bytes.push(0xff);
        // Meta declares ten bytes but the input ends after one child.
        vint::append_id(&mut bytes, 0x4d45);
        bytes.push(0x8a);
        uint_elem(&mut bytes, 0x5343, 2);

        let mut dec = decoder(bytes);
        dec.decode_header().unwrap();
        let mut out = Top::default();
        let err = dec.decode_body(&mut out).unwrap_err();
        match err {
            Error::UnexpectedEnd { path, missing } => {
                assert_eq!(path, "\\Top\\Meta");
                assert_eq!(missing, 6);
            }
            other => panic!("expected an unexpected-end error, got {:?}", other),
        }
    }

    #[test]
    fn unknown_size_leaf_is_rejected() {
        let mut bytes = header_bytes();
        vint::append_id(&mut bytes, 0x18538067);
        bytes.push(0xff);
        // Item holds a Count whose size claims to be unknown.
        let item = [0x43, 0x4f, 0xff];
        elem(&mut bytes, 0x4954, &item);

        let mut dec = decoder(bytes);
        dec.decode_header().unwrap();
        let mut out = Top::default();
        let err = dec.decode_body(&mut out).unwrap_err();
        assert!(matches!(err, Error::InvalidPayload { .. }), "got {:?}", err);
    }

    #[test]
    fn type_mismatch_carries_the_path() {
        let mut bytes = header_bytes();
        let mut meta = Vec::new();
        uint_elem(&mut meta, 0x5343, 3);
        let mut top = Vec::new();
        elem(&mut top, 0x4d45, &meta);
        elem(&mut bytes, 0x18538067, &top);

        let mut dec = decoder(bytes);
        dec.decode_header().unwrap();
        let mut out = BadTop::default();
        let err = dec.decode_body(&mut out).unwrap_err();
        match err {
            Error::TypeMismatch { element, target, path, .. } => {
                assert_eq!(element, ElementKind::Uinteger);
                assert_eq!(target, "string");
                assert_eq!(path, "\\Top\\Meta\\Scale");
            }
            other => panic!("expected a type mismatch, got {:?}", other),
        }
    }

    #[test]
    fn integer_sign_extension_is_opt_in() {
        let stream = || {
            let mut bytes = header_bytes();
            vint::append_id(&mut bytes, 0x18538067);
            bytes.push(0xff);
            let mut item = Vec::new();
            elem(&mut item, 0x4f46, &[0xfe, 0xd4]); // Shift
            elem(&mut bytes, 0x4954, &item);
            bytes
        };

        setup();
        let mut plain = Decoder::new(Cursor::new(stream()));
        plain.decode_header().unwrap();
        let mut out = Top::default();
        plain.decode_body(&mut out).unwrap();
        assert_eq!(out.items[0].shift, 0xfed4);

        let opts = DecoderOptions { sign_extend_integers: true };
        let mut extended = Decoder::with_options(Cursor::new(stream()), opts);
        extended.decode_header().unwrap();
        let mut out = Top::default();
        extended.decode_body(&mut out).unwrap();
        assert_eq!(out.items[0].shift, -300);
    }

    #[test]
    fn body_requires_header_first() {
        let mut dec = decoder(header_bytes());
        let mut out = Top::default();
        assert!(matches!(dec.decode_body(&mut out), Err(Error::DecodeError(_))));
    }

    #[test]
    fn header_requires_registered_doc_type() {
        setup();
        let mut doc_type = Vec::new();
        str_elem(&mut doc_type, 0x4282, "decoder-unregistered");
        let mut bytes = Vec::new();
        elem(&mut bytes, EBML_ID, &doc_type);

        let mut dec = Decoder::new(Cursor::new(bytes));
        assert!(matches!(dec.decode_header(), Err(Error::UnknownDocType(_))));
    }
}
