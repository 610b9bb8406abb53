// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `error` module defines the terminal error type returned by pull
//! stages. Per-pixel, per-record, and per-event diagnostics are *not*
//! represented here: those stay as bitmasks on the data model so that a
//! malformed record or event never interrupts the pipeline (see
//! `Record::flags`, `Pixel::error`, `RocEvent::error`, `Event::error`).

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::result;

/// `StreamError` enumerates the terminal conditions a `Source` (and, by
/// propagation, every stage pulling from it) may raise. All variants are
/// unrecoverable for the current pipeline instance; the caller is
/// responsible for tearing it down (closing the source, dropping the
/// scanner/decoder chain).
#[derive(Debug)]
pub enum StreamError {
    /// The source is closed or was never successfully opened against the
    /// DTB/FIFO.
    NoDtbAccess,
    /// A non-`endless` source ran out of data.
    Empty,
    /// The hardware FIFO or host memory buffer overran before any data
    /// could be returned.
    BufferOverflow,
    /// An I/O error occurred reading a `FileSource`'s backing file.
    Io(io::Error),
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::NoDtbAccess => write!(f, "source is not open against the DTB"),
            StreamError::Empty => write!(f, "source exhausted"),
            StreamError::BufferOverflow => write!(f, "FIFO or memory overflow"),
            StreamError::Io(err) => write!(f, "io error: {}", err),
        }
    }
}

impl StdError for StreamError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            StreamError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for StreamError {
    fn from(err: io::Error) -> Self {
        StreamError::Io(err)
    }
}

pub type Result<T> = result::Result<T, StreamError>;

/// Convenience constructor for a closed/never-opened source.
pub fn no_dtb_access_error<T>() -> Result<T> {
    Err(StreamError::NoDtbAccess)
}

/// Convenience constructor for an exhausted source.
pub fn empty_error<T>() -> Result<T> {
    Err(StreamError::Empty)
}

/// Convenience constructor for a FIFO/memory overrun.
pub fn buffer_overflow_error<T>() -> Result<T> {
    Err(StreamError::BufferOverflow)
}
