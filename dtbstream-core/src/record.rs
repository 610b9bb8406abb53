// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Framed records: the output of a `RecordScanner`.

use bitflags::bitflags;
use log::warn;

/// The hard cap on the number of payload symbols a single record may hold.
/// Exceeding it sets [`RecordFlags::OVERFLOW`] and drops further symbols
/// until the end marker is seen.
pub const MAX_RECORD_SYMBOLS: usize = 40_000;

bitflags! {
    /// Per-record diagnostic flags. `OK` (the zero value) means the record
    /// framed cleanly between a start and an end marker with no truncation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct RecordFlags: u8 {
        /// A new start marker was seen before the expected end marker; the
        /// record was truncated and returned early. The next record begins
        /// from the marker that triggered this.
        const END_ERROR = 0x01;
        /// The payload reached [`MAX_RECORD_SYMBOLS`]; further symbols were
        /// dropped until the end marker.
        const OVERFLOW = 0x02;
    }
}

/// A framed burst of the raw 12-bit payload stream, one per trigger.
///
/// Like [`crate::Event`], a `Record` is an arena-style scratch buffer: the
/// `RecordScanner` that produced it reuses its backing storage on every
/// pull, so a borrowed `&Record` is only valid until the next call to
/// `RecordReader::read` on that same scanner.
#[derive(Debug, Clone, Default)]
pub struct Record {
    pub record_nr: u32,
    pub flags: RecordFlags,
    pub symbols: Vec<u16>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self, record_nr: u32) {
        self.record_nr = record_nr;
        self.flags = RecordFlags::empty();
        self.symbols.clear();
    }

    /// Pushes a payload symbol (already masked to its 12-bit width), unless
    /// the record has already hit [`MAX_RECORD_SYMBOLS`], in which case
    /// [`RecordFlags::OVERFLOW`] is set and the symbol is dropped.
    pub fn push(&mut self, symbol: u16) {
        if self.symbols.len() >= MAX_RECORD_SYMBOLS {
            if !self.flags.contains(RecordFlags::OVERFLOW) {
                warn!(
                    "record {} exceeded {} symbols, dropping the rest",
                    self.record_nr, MAX_RECORD_SYMBOLS
                );
            }
            self.flags.insert(RecordFlags::OVERFLOW);
            return;
        }
        self.symbols.push(symbol);
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_past_cap_sets_overflow_and_drops() {
        let mut rec = Record::new();
        rec.clear(0);
        for i in 0..MAX_RECORD_SYMBOLS {
            rec.push((i & 0x0FFF) as u16);
        }
        assert!(!rec.flags.contains(RecordFlags::OVERFLOW));
        rec.push(0x42);
        assert!(rec.flags.contains(RecordFlags::OVERFLOW));
        assert_eq!(rec.len(), MAX_RECORD_SYMBOLS);
    }

    #[test]
    fn clear_resets_flags_and_symbols() {
        let mut rec = Record::new();
        rec.clear(3);
        rec.push(1);
        rec.flags.insert(RecordFlags::END_ERROR);
        rec.clear(4);
        assert_eq!(rec.record_nr, 4);
        assert!(rec.is_empty());
        assert_eq!(rec.flags, RecordFlags::empty());
    }
}
