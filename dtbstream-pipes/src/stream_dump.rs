// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `StreamDump` (spec §4.9): hex-dumps every raw sample, 16 per line, to a
//! writer, and otherwise passes the stream through unchanged.

use std::io::Write;

use dtbstream_core::{Result, Source};
use log::warn;

/// Wraps a `Source` and writes each sample as 4-digit hex to `out`, 16
/// samples per line.
pub struct StreamDump<S, W> {
    source: S,
    out: W,
    column: usize,
}

impl<S: Source, W: Write> StreamDump<S, W> {
    pub fn new(source: S, out: W) -> Self {
        StreamDump { source, out, column: 0 }
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: Source, W: Write> Source for StreamDump<S, W> {
    fn get(&mut self) -> Result<u16> {
        let sym = self.source.get()?;
        let sep = if self.column == 0 { "" } else { " " };
        if let Err(err) = write!(self.out, "{}{:04x}", sep, sym) {
            warn!("stream dump: write failed: {}", err);
        }
        self.column += 1;
        if self.column == 16 {
            let _ = writeln!(self.out);
            self.column = 0;
        }
        Ok(sym)
    }
}
