// ebml-stream
// Copyright (c) 2026 The Project ebml-stream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `cursor` module produces a stream of `(ID, DataSize)` element
//! headers from a byte source.
//!
//! The cursor reads VINTs out of the window with lookahead and releases
//! their bytes only once they validate, so a failed read leaves the
//! stream positioned for a one-byte resynchronisation skip. A one-slot
//! unread cache lets the caller push a header back, which is how
//! unknown-size masters hand their terminating element to the enclosing
//! level.

use std::io::{Read, Seek, SeekFrom};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::io::SourceWindow;
use crate::schema::Schema;
use crate::vint::{self, VintError};

/// The declared payload length of an element.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DataSize {
    Known(u64),
    /// All-ones data size VINT; the element runs until an element that
    /// is not its descendant begins.
    Unknown,
}

impl DataSize {
    #[inline]
    pub fn known(self) -> Option<u64> {
        match self {
            DataSize::Known(size) => Some(size),
            DataSize::Unknown => None,
        }
    }

    #[inline]
    pub fn is_unknown(self) -> bool {
        matches!(self, DataSize::Unknown)
    }
}

/// A wire-level element header.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ElementHeader {
    /// The element ID, marker octet included, as read from the stream.
    pub id: u64,
    pub size: DataSize,
    /// Stream offset of the first ID octet.
    pub pos: u64,
    /// Octets occupied by the ID and data size VINTs together.
    pub header_len: u32,
}

impl ElementHeader {
    /// Stream offset of the first payload octet.
    pub fn data_pos(&self) -> u64 {
        self.pos + u64::from(self.header_len)
    }
}

/// Outcome of [`ElementCursor::next_of`].
#[derive(Debug)]
pub enum NextOf {
    /// The next child of the parent.
    Child(ElementHeader),
    /// The parent has ended; for unknown-size parents the terminating
    /// header is cached and will be returned by the next read.
    End,
    /// A known-size parent was overrun by `excess` bytes.
    Overflow { excess: u64 },
}

/// A pull-based reader of element headers.
pub struct ElementCursor<R> {
    win: SourceWindow<R>,
    schema: Arc<Schema>,
    max_id_len: u32,
    max_size_len: u32,
    unread: Option<ElementHeader>,
}

impl<R: Read> ElementCursor<R> {
    pub fn new(src: R, schema: Arc<Schema>) -> ElementCursor<R> {
        ElementCursor {
            win: SourceWindow::new(src),
            schema,
            max_id_len: 4,
            max_size_len: 8,
            unread: None,
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub(crate) fn set_schema(&mut self, schema: Arc<Schema>) {
        self.schema = schema;
    }

    /// Installs the document's EBMLMaxIDLength and EBMLMaxSizeLength,
    /// clamped to eight octets.
    pub fn set_limits(&mut self, max_id_len: u64, max_size_len: u64) {
        self.max_id_len = max_id_len.clamp(1, 8) as u32;
        self.max_size_len = max_size_len.clamp(1, 8) as u32;
    }

    /// Logical stream position. A cached unread header counts as not yet
    /// consumed.
    pub fn pos(&self) -> u64 {
        match &self.unread {
            Some(header) => header.pos,
            None => self.win.pos(),
        }
    }

    /// Pushes a header back; the next read returns it again. The cache
    /// holds a single header.
    pub fn unread(&mut self, header: ElementHeader) {
        debug_assert!(self.unread.is_none(), "unread cache already occupied");
        self.unread = Some(header);
    }

    /// Returns the next header without consuming it.
    pub fn peek(&mut self) -> Result<Option<ElementHeader>> {
        if self.unread.is_none() {
            self.unread = self.next()?;
        }
        Ok(self.unread)
    }

    /// Reads the next element header. Returns `None` at a clean end of
    /// input. The header's `header_len` reports the bytes consumed.
    pub fn next(&mut self) -> Result<Option<ElementHeader>> {
        if let Some(header) = self.unread.take() {
            return Ok(Some(header));
        }
        let pos = self.win.pos();
        let (id, id_len) = match self.read_id()? {
            Some(id) => id,
            None => return Ok(None),
        };
        let (size, size_len) = self.read_size()?;
        let header = ElementHeader { id, size, pos, header_len: id_len + size_len };
        log::debug!("element 0x{:x} at offset {} ({:?})", id, pos, size);
        Ok(Some(header))
    }

    /// Reads and validates an element ID VINT. `None` means the input
    /// ended cleanly before the first octet.
    fn read_id(&mut self) -> Result<Option<(u64, u32)>> {
        loop {
            match vint::read_vint(self.win.window(), self.max_id_len) {
                Ok((id, width)) => {
                    let offset = self.win.pos();
                    let data = id ^ (1u64 << (7 * width));
                    if data == 0 {
                        return Err(Error::AllZerosVintData { offset });
                    }
                    if vint::all_ones(data, width) {
                        return Err(Error::AllOnesVintData { offset });
                    }
                    if vint::shorter_available(data, width) {
                        return Err(Error::NonMinimalId { id, offset });
                    }
                    self.win.release(width as usize);
                    return Ok(Some((id, width)));
                }
                Err(VintError::ShortBuffer) => {
                    if self.win.extend()? == 0 {
                        if self.win.window().is_empty() {
                            return Ok(None);
                        }
                        return Err(Error::ShortBuffer { offset: self.win.pos() });
                    }
                }
                Err(VintError::InvalidWidth(_)) => {
                    return Err(Error::InvalidVintWidth { offset: self.win.pos() });
                }
            }
        }
    }

    /// Reads a data size VINT; all-ones VINT_DATA becomes the unknown
    /// sentinel.
    fn read_size(&mut self) -> Result<(DataSize, u32)> {
        loop {
            match vint::read_vint_data(self.win.window(), self.max_size_len) {
                Ok((data, width)) => {
                    self.win.release(width as usize);
                    let size = if vint::all_ones(data, width) {
                        DataSize::Unknown
                    }
                    else {
                        DataSize::Known(data)
                    };
                    return Ok((size, width));
                }
                Err(VintError::ShortBuffer) => {
                    if self.win.extend()? == 0 {
                        return Err(Error::ShortBuffer { offset: self.win.pos() });
                    }
                }
                Err(VintError::InvalidWidth(_)) => {
                    return Err(Error::InvalidVintWidth { offset: self.win.pos() });
                }
            }
        }
    }

    /// Reads the next child of `parent`, `offset` bytes into its
    /// payload.
    ///
    /// A known-size parent ends when its payload is exhausted. An
    /// unknown-size parent ends when the next element is not one of its
    /// descendants in the schema path tree; that element stays available
    /// through the unread cache. End of input also ends an unknown-size
    /// parent.
    pub fn next_of(&mut self, parent: &ElementHeader, offset: u64) -> Result<NextOf> {
        match parent.size {
            DataSize::Known(size) => {
                if offset > size {
                    return Ok(NextOf::Overflow { excess: offset - size });
                }
                if offset == size {
                    return Ok(NextOf::End);
                }
                match self.next()? {
                    Some(header) => Ok(NextOf::Child(header)),
                    None => Ok(NextOf::End),
                }
            }
            DataSize::Unknown => {
                let header = match self.next()? {
                    Some(header) => header,
                    None => return Ok(NextOf::End),
                };
                let descends = match (self.schema.get(parent.id), self.schema.get(header.id)) {
                    (Some(parent_def), Some(child_def)) => {
                        self.schema.is_descendant(child_def, parent_def)
                    }
                    // An element the schema does not know cannot descend
                    // from the parent; it terminates the region.
                    _ => false,
                };
                if descends {
                    Ok(NextOf::Child(header))
                }
                else {
                    log::debug!(
                        "element 0x{:x} ends unknown-size element 0x{:x}",
                        header.id,
                        parent.id
                    );
                    self.unread(header);
                    Ok(NextOf::End)
                }
            }
        }
    }

    /// Discards `count` payload bytes.
    pub fn skip(&mut self, count: u64) -> Result<()> {
        debug_assert!(self.unread.is_none(), "skipping with an unread header cached");
        let mut remaining = count;
        while remaining > 0 {
            let buffered = self.win.window().len();
            if buffered == 0 {
                if self.win.extend()? == 0 {
                    return Err(Error::ShortBuffer { offset: self.win.pos() });
                }
                continue;
            }
            let take = remaining.min(buffered as u64) as usize;
            self.win.release(take);
            remaining -= take as u64;
        }
        Ok(())
    }

    /// Fills `out` from the stream.
    pub(crate) fn read_exact(&mut self, out: &mut [u8]) -> Result<()> {
        self.win.read_exact(out)?;
        Ok(())
    }
}

impl<R: Read + Seek> ElementCursor<R> {
    /// Repositions the stream, dropping any cached header.
    pub fn seek(&mut self, target: SeekFrom) -> Result<u64> {
        self.unread = None;
        Ok(self.win.seek(target)?)
    }
}
