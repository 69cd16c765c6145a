// ebml-stream
// Copyright (c) 2026 The Project ebml-stream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Matroska and WebM DocType support for `ebml-stream`.
//!
//! The crate carries the Matroska schema and a data model mirroring it,
//! one record per master element. Call [`register`] once during start
//! up, then decode:
//!
//! ```no_run
//! use ebml_stream::Decoder;
//! use ebml_stream_matroska::Segment;
//!
//! # fn run() -> ebml_stream::Result<()> {
//! ebml_stream_matroska::register();
//!
//! let source = std::fs::File::open("movie.mkv")?;
//! let mut decoder = Decoder::new(source);
//! let header = decoder.decode_header()?;
//! log::info!("doc type {} v{}", header.doc_type, header.doc_type_version);
//!
//! let mut segment = Segment::default();
//! decoder.decode_body(&mut segment)?;
//! println!("timestamp scale: {}", segment.info.timestamp_scale);
//! # Ok(())
//! # }
//! ```

mod model;

pub use model::*;

use std::sync::Once;

use ebml_stream::schema::{xml, Schema};

/// The Matroska schema document, as shipped.
const MATROSKA_XML: &str = include_str!("matroska.xml");

/// Registers the `matroska` and `webm` DocTypes. Safe to call more than
/// once; only the first call registers.
pub fn register() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let doc = xml::parse(MATROSKA_XML).expect("matroska schema parses");
        let schema = Schema::new(doc).expect("matroska schema compiles");
        ebml_stream::register("webm", schema.with_doc_type("webm"));
        ebml_stream::register("matroska", schema);
    });
}
