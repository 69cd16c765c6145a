// ebml-stream
// Copyright (c) 2026 The Project ebml-stream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `header` module holds the built-in EBML header DocType and the
//! record it decodes into.

use std::sync::Arc;

use lazy_static::lazy_static;

use crate::ebml_record;
use crate::schema::{xml, Schema};

/// Element ID of the EBML header master.
pub const EBML_ID: u64 = 0x1A45DFA3;
/// Element ID of the global Void element.
pub const VOID_ID: u64 = 0xEC;
/// Element ID of the global CRC-32 element.
pub const CRC32_ID: u64 = 0xBF;

lazy_static! {
    static ref HEADER_SCHEMA: Arc<Schema> = {
        let doc = xml::parse(include_str!("ebml.xml")).expect("built-in header schema parses");
        Arc::new(Schema::without_header(doc).expect("built-in header schema compiles"))
    };
}

/// The schema of the EBML header itself: the `\EBML` tree plus the
/// global Void and CRC-32 elements. Every registered schema merges these
/// definitions into its ID map.
pub(crate) fn header_schema() -> Arc<Schema> {
    Arc::clone(&HEADER_SCHEMA)
}

ebml_record! {
    /// A decoded `\EBML` header.
    ///
    /// Absent children come back at their schema defaults, so a header
    /// that only names a DocType still reports version 1 and the 4/8
    /// octet ID and size length limits.
    pub struct EbmlHeader {
        "EBMLVersion" => pub version: u64,
        "EBMLReadVersion" => pub read_version: u64,
        "EBMLMaxIDLength" => pub max_id_length: u64,
        "EBMLMaxSizeLength" => pub max_size_length: u64,
        "DocType" => pub doc_type: String,
        "DocTypeVersion" => pub doc_type_version: u64,
        "DocTypeReadVersion" => pub doc_type_read_version: u64,
        "DocTypeExtension" => pub extensions: Vec<DocTypeExtension>,
    }
}

ebml_record! {
    /// One `DocTypeExtension` entry of an EBML header.
    pub struct DocTypeExtension {
        "DocTypeExtensionName" => pub name: String,
        "DocTypeExtensionVersion" => pub version: u64,
    }
}
