// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The record-framing engine shared by both dialects (spec §4.4/§4.5).

use std::marker::PhantomData;

use dtbstream_core::{Record, RecordFlags, RecordReader, Result, Source, MAX_RECORD_SYMBOLS};
use log::{debug, warn};

use crate::dialect::{FrameDialect, ModDialect, RocDialect};

/// Frames a raw `u16` symbol stream from an upstream `Source` into
/// variable-length `Record`s, per the marker scheme defined by `D`.
///
/// `recordNr` increments monotonically from zero across the scanner's
/// lifetime (spec invariant: emitted records form a contiguous `0, 1, 2, ...`
/// sequence).
pub struct RecordScanner<S, D> {
    source: S,
    record: Record,
    next_record_nr: u32,
    /// A start marker observed while searching for the *previous* record's
    /// end marker; consumed as the next record's first payload symbol
    /// instead of being re-read from the source.
    pending_start: Option<u16>,
    _dialect: PhantomData<D>,
}

/// A `RecordScanner` driving the ROC bit-tagged dialect.
pub type RocRecordScanner<S> = RecordScanner<S, RocDialect>;

/// A `RecordScanner` driving the module nibble-tagged dialect.
pub type ModRecordScanner<S> = RecordScanner<S, ModDialect>;

impl<S: Source, D: FrameDialect> RecordScanner<S, D> {
    pub fn new(source: S) -> Self {
        RecordScanner {
            source,
            record: Record::new(),
            next_record_nr: 0,
            pending_start: None,
            _dialect: PhantomData,
        }
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: Source, D: FrameDialect> RecordReader for RecordScanner<S, D> {
    fn read(&mut self) -> Result<&Record> {
        let start_payload = match self.pending_start.take() {
            Some(payload) => payload,
            None => loop {
                let sym = self.source.get()?;
                if D::is_start(sym) {
                    break D::payload(sym);
                }
            },
        };

        let record_nr = self.next_record_nr;
        self.next_record_nr += 1;
        self.record.clear(record_nr);
        self.record.push(start_payload);

        loop {
            let sym = self.source.get()?;
            if D::is_end(sym) {
                self.record.push(D::payload(sym));
                break;
            } else if D::is_start(sym) {
                self.record.flags.insert(RecordFlags::END_ERROR);
                self.pending_start = Some(D::payload(sym));
                warn!(
                    "record {}: new start marker before end marker, truncated at {} symbols",
                    record_nr,
                    self.record.len()
                );
                break;
            } else {
                self.record.push(D::payload(sym));
            }
        }

        if self.record.flags.contains(RecordFlags::OVERFLOW) {
            warn!("record {}: overflowed the {}-symbol cap", record_nr, MAX_RECORD_SYMBOLS);
        }
        debug!("record {}: {} symbols, flags {:?}", record_nr, self.record.len(), self.record.flags);
        Ok(&self.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct VecSource(VecDeque<u16>);

    impl VecSource {
        fn new(symbols: &[u16]) -> Self {
            VecSource(symbols.iter().copied().collect())
        }
    }

    impl Source for VecSource {
        fn get(&mut self) -> Result<u16> {
            self.0.pop_front().ok_or_else(|| unreachable!("test stream exhausted"))
        }
    }

    // S1 as literally written in the spec: note that `0x4567`'s top nibble
    // (`0100`) sets the end-of-record bit (bit 14) under the ROC dialect's
    // own marker rule, so a byte-exact reading of the algorithm ends the
    // record there rather than at the trailing `0xC000`. This is a property
    // of the literal bytes chosen for the illustration, not a deviation
    // from §4.4: the record's masked payload still decodes to the expected
    // header/pixel values (see `dtbstream-codec`'s S1 test, which avoids the
    // nibble collision).
    #[test]
    fn s1_literal_bytes_end_at_first_symbol_with_end_bit_set() {
        let src = VecSource::new(&[0x8ABC, 0x0123, 0x4567, 0xC000]);
        let mut scanner = RocRecordScanner::new(src);
        let rec = scanner.read().unwrap();
        assert_eq!(rec.record_nr, 0);
        assert_eq!(rec.symbols, vec![0x0ABC, 0x0123, 0x0567]);
        assert_eq!(rec.flags, RecordFlags::empty());
    }

    #[test]
    fn s2_end_error_recovery() {
        let src = VecSource::new(&[0x8AAA, 0x0111, 0x8BBB, 0x0222, 0xC000]);
        let mut scanner = RocRecordScanner::new(src);

        let rec0 = scanner.read().unwrap();
        assert_eq!(rec0.record_nr, 0);
        assert_eq!(rec0.symbols, vec![0x0AAA, 0x0111]);
        assert!(rec0.flags.contains(RecordFlags::END_ERROR));

        let rec1 = scanner.read().unwrap();
        assert_eq!(rec1.record_nr, 1);
        assert_eq!(rec1.symbols, vec![0x0BBB, 0x0222, 0x0000]);
        assert_eq!(rec1.flags, RecordFlags::empty());
    }

    #[test]
    fn record_nr_is_contiguous() {
        // Three clean back-to-back records using payload words with a zero
        // top nibble so no word accidentally carries a marker bit.
        let src = VecSource::new(&[
            0x8001, 0xC002, 0x8003, 0xC004, 0x8005, 0xC006,
        ]);
        let mut scanner = RocRecordScanner::new(src);
        for expected_nr in 0..3 {
            let rec = scanner.read().unwrap();
            assert_eq!(rec.record_nr, expected_nr);
        }
    }

    #[test]
    fn overflow_caps_payload_and_drops_rest() {
        let mut symbols = vec![0x8000u16];
        symbols.extend(std::iter::repeat(0x0001u16).take(dtbstream_core::MAX_RECORD_SYMBOLS + 5 - 1));
        symbols.push(0xC000);
        let src = VecSource::new(&symbols);
        let mut scanner = RocRecordScanner::new(src);
        let rec = scanner.read().unwrap();
        assert!(rec.flags.contains(RecordFlags::OVERFLOW));
        assert_eq!(rec.len(), dtbstream_core::MAX_RECORD_SYMBOLS);
    }

    #[test]
    fn module_dialect_s3_minimal_header_and_trailer() {
        // Header tags 0x80,0x90,0xA0,0xB0 (low nibbles 1,2,3,4); no ROC
        // blocks; trailer tags 0xC0,0xD0,0xE0,0xF0 (low nibbles 5,6,7,8).
        let src = VecSource::new(&[
            0x0081, 0x0092, 0x00A3, 0x00B4, 0x00C5, 0x00D6, 0x00E7, 0x00F8,
        ]);
        let mut scanner = ModRecordScanner::new(src);
        let rec = scanner.read().unwrap();
        assert_eq!(
            rec.symbols,
            vec![0x081, 0x092, 0x0A3, 0x0B4, 0x0C5, 0x0D6, 0x0E7, 0x0F8]
        );
        assert_eq!(rec.flags, RecordFlags::empty());
    }
}
