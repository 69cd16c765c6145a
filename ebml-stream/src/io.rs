// ebml-stream
// Copyright (c) 2026 The Project ebml-stream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `io` module implements the sliding-window reader the element
//! cursor pulls bytes through.
//!
//! [`SourceWindow`] buffers the unread portion of an underlying byte
//! source and exposes it as one contiguous slice. The cursor reads VINTs
//! out of the window with lookahead and *commits* them by releasing
//! their bytes only once they validate; on failure a single byte can be
//! released to resynchronise without touching the source again.

use std::cmp;
use std::io;
use std::io::{Read, Seek, SeekFrom};

/// Minimum number of bytes [`SourceWindow::extend`] tries to add.
pub const MIN_READ: usize = 16;

/// Initial window buffer size; growth doubles from here.
const MIN_BUF_LEN: usize = 1024;

/// A sliding window over an underlying byte source.
pub struct SourceWindow<R> {
    src: R,
    buf: Vec<u8>,
    head: usize,
    tail: usize,
    pos: u64,
    pending: Option<io::Error>,
}

impl<R: Read> SourceWindow<R> {
    pub fn new(src: R) -> SourceWindow<R> {
        SourceWindow { src, buf: Vec::new(), head: 0, tail: 0, pos: 0, pending: None }
    }

    /// Absolute stream position of the first unreleased byte.
    #[inline]
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// The currently buffered, unreleased bytes.
    #[inline]
    pub fn window(&self) -> &[u8] {
        &self.buf[self.head..self.tail]
    }

    /// Appends at least [`MIN_READ`] bytes to the window when the source
    /// can still produce them, growing or compacting the buffer as
    /// needed. Returns the number of bytes added; zero means end of
    /// input. A read error hit after a partial refill is latched and
    /// returned by the next call.
    pub fn extend(&mut self) -> io::Result<usize> {
        if let Some(err) = self.pending.take() {
            return Err(err);
        }
        self.make_room(MIN_READ);
        let mut added = 0;
        while added < MIN_READ {
            match self.src.read(&mut self.buf[self.tail..]) {
                Ok(0) => break,
                Ok(count) => {
                    self.tail += count;
                    added += count;
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => (),
                Err(err) => {
                    if added == 0 {
                        return Err(err);
                    }
                    self.pending = Some(err);
                    break;
                }
            }
        }
        Ok(added)
    }

    /// Advances the read cursor past `count` bytes of the window without
    /// touching the source's own cursor.
    pub fn release(&mut self, count: usize) {
        assert!(count <= self.tail - self.head, "released past the window");
        self.head += count;
        self.pos += count as u64;
    }

    /// Ensures at least `need` writable bytes follow the window,
    /// compacting the live region first and doubling the buffer when
    /// compaction is not enough.
    fn make_room(&mut self, need: usize) {
        if self.buf.len() - self.tail >= need {
            return;
        }
        if self.head > 0 {
            self.buf.copy_within(self.head..self.tail, 0);
            self.tail -= self.head;
            self.head = 0;
        }
        if self.buf.len() - self.tail < need {
            let len = cmp::max(cmp::max(self.buf.len() * 2, MIN_BUF_LEN), self.tail + need);
            self.buf.resize(len, 0);
        }
    }
}

impl<R: Read> Read for SourceWindow<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let window = self.window();
        if !window.is_empty() {
            let count = cmp::min(window.len(), out.len());
            out[..count].copy_from_slice(&window[..count]);
            self.release(count);
            return Ok(count);
        }
        let count = self.src.read(out)?;
        self.pos += count as u64;
        Ok(count)
    }
}

impl<R: Read + Seek> Seek for SourceWindow<R> {
    fn seek(&mut self, target: SeekFrom) -> io::Result<u64> {
        if let SeekFrom::Current(delta) = target {
            // Forward relative targets inside the window resolve by
            // releasing buffered bytes.
            if delta >= 0 && delta as u64 <= (self.tail - self.head) as u64 {
                self.release(delta as usize);
                return Ok(self.pos);
            }
        }
        // The source's cursor sits ahead of the logical position by the
        // number of buffered bytes.
        let buffered = (self.tail - self.head) as i64;
        let pos = match target {
            SeekFrom::Current(delta) => self.src.seek(SeekFrom::Current(delta - buffered))?,
            other => self.src.seek(other)?,
        };
        self.head = 0;
        self.tail = 0;
        self.pos = pos;
        Ok(pos)
    }
}
