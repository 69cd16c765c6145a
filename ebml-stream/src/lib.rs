// ebml-stream
// Copyright (c) 2026 The Project ebml-stream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A streaming parser for EBML (Extensible Binary Meta Language,
//! RFC 8794) documents, with schema-driven decoding into application
//! data structures.
//!
//! EBML is the self-describing binary container format underlying
//! Matroska and WebM: a size-prefixed tree of elements whose meaning is
//! fixed by an external schema, the *DocType*. This crate reads bytes
//! from any [`std::io::Read`] source and populates a caller-supplied
//! data model:
//!
//!  * [`vint`] codes the variable-width integers every element ID and
//!    data size is made of.
//!  * [`io::SourceWindow`] buffers the source behind a sliding window so
//!    headers can be read with lookahead and committed only once they
//!    validate.
//!  * [`ElementCursor`] turns the window into a stream of
//!    `(ID, DataSize)` headers, detecting the end of both known-size and
//!    unknown-size master elements.
//!  * [`Schema`] is the compiled form of a DocType, loaded from an
//!    EBMLSchema XML document and registered process-wide with
//!    [`register`].
//!  * [`Decoder`] reconciles the element stream with the schema and a
//!    target [`Record`], applying declared defaults, skipping unknown
//!    regions, and recovering from corrupt headers.
//!
//! Target models are ordinary structs declared with [`ebml_record!`]:
//!
//! ```no_run
//! use ebml_stream::{ebml_record, Decoder};
//!
//! ebml_record! {
//!     pub struct File {
//!         "FileName" => pub name: String,
//!         "Data" => pub data: Vec<u8>,
//!     }
//! }
//!
//! ebml_record! {
//!     pub struct Files {
//!         "File" => pub files: Vec<File>,
//!     }
//! }
//!
//! # fn run() -> ebml_stream::Result<()> {
//! let source = std::fs::File::open("archive.ebml")?;
//! let mut decoder = Decoder::new(source);
//! let header = decoder.decode_header()?;
//! println!("doc type: {}", header.doc_type);
//!
//! let mut files = Files::default();
//! decoder.decode_body(&mut files)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod io;
pub mod path;
pub mod primitive;
pub mod schema;
pub mod vint;

mod cursor;
mod decode;
mod header;
mod registry;
mod target;

pub use cursor::{DataSize, ElementCursor, ElementHeader, NextOf};
pub use decode::{Decoder, DecoderOptions};
pub use error::{Error, Result};
pub use header::{DocTypeExtension, EbmlHeader, CRC32_ID, EBML_ID, VOID_ID};
pub use registry::{definition, doc_types, register};
pub use schema::{DefaultValue, ElementDef, ElementKind, Schema};
pub use target::{Date, FieldDef, Record, Sequence, Slot, SlotValue};
