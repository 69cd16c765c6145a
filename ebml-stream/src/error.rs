// ebml-stream
// Copyright (c) 2026 The Project ebml-stream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `error` module defines the common error type.

use std::io;

use thiserror::Error;

use crate::schema::ElementKind;

/// `Error` enumerates all errors reported while reading an EBML document.
///
/// Offsets are absolute byte positions in the input stream. Paths are the
/// backslash-separated element paths of the document location where the
/// error was detected; they are filled in by the decoder as errors
/// propagate upwards.
#[derive(Debug, Error)]
pub enum Error {
    /// An IO error occurred while reading the underlying source.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The first octet of a VINT declares a width above the configured
    /// maximum. Recoverable by skipping a single byte.
    #[error("invalid VINT width descriptor at offset {offset}")]
    InvalidVintWidth { offset: u64 },

    /// The input ended in the middle of a VINT.
    #[error("input ended inside a VINT at offset {offset}")]
    ShortBuffer { offset: u64 },

    /// An element ID carried the reserved all-ones VINT_DATA.
    #[error("element id VINT_DATA is all ones at offset {offset}")]
    AllOnesVintData { offset: u64 },

    /// An element ID carried the forbidden all-zeros VINT_DATA.
    #[error("element id VINT_DATA is all zeros at offset {offset}")]
    AllZerosVintData { offset: u64 },

    /// An element ID used more octets than its VINT_DATA requires.
    #[error("element id 0x{id:x} at offset {offset} has a shorter encoding available")]
    NonMinimalId { id: u64, offset: u64 },

    /// No schema is registered for the document's DocType.
    #[error("unknown doc type `{0}`")]
    UnknownDocType(String),

    /// An element ID has no definition in the active schema.
    #[error("element 0x{id:x} at offset {offset} is not defined by the active schema")]
    UnknownElement { id: u64, offset: u64 },

    /// An element without a usable master definition declared an unknown
    /// data size.
    #[error("unknown element 0x{id:x} of unknown size at offset {offset}")]
    UnknownMaster { id: u64, offset: u64 },

    /// A child element's declared size exceeded what remains of its
    /// known-size parent. The child is clamped and decoding carries on;
    /// the error surfaces once the document has been decoded.
    #[error("element `{path}` overflows its parent by {excess} bytes")]
    ElementOverflow { path: String, excess: u64 },

    /// A known-size master ran out of input before its declared size.
    #[error("master `{path}` ended {missing} bytes short of its declared size")]
    UnexpectedEnd { path: String, missing: u64 },

    /// The element's payload type cannot populate the target field.
    #[error("cannot decode {element} element `{path}` at offset {offset} into {target}")]
    TypeMismatch { element: ElementKind, target: &'static str, path: String, offset: u64 },

    /// The payload length violates the constraints of its type.
    #[error("invalid {element} payload for `{path}`: {reason}")]
    InvalidPayload { element: ElementKind, path: String, reason: &'static str },

    /// A schema document or compiled schema is malformed. Registration
    /// turns this into a panic; it is a programmer error, not a data
    /// error.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// The stream contained malformed data not covered by a more
    /// specific variant, or the decoder was driven out of order.
    #[error("{0}")]
    DecodeError(&'static str),
}

impl Error {
    /// Fills in the element path on variants that carry one but were
    /// raised below the level where the path was known.
    pub(crate) fn at_path(mut self, at: &str) -> Error {
        match &mut self {
            Error::ElementOverflow { path, .. }
            | Error::UnexpectedEnd { path, .. }
            | Error::TypeMismatch { path, .. }
            | Error::InvalidPayload { path, .. } => {
                if path.is_empty() {
                    *path = at.to_string();
                }
            }
            _ => (),
        }
        self
    }
}

pub type Result<T> = std::result::Result<T, Error>;
