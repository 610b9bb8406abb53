// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! TBM module decoder (spec §4.8): header, a run of ROC blocks each holding
//! six-symbols-per-pixel groups, and a trailer. The trickiest piece is the
//! abort path, which reuses an already-consumed symbol as the first
//! trailer candidate (spec §9, "Open question" on single-symbol lookahead).

use log::warn;

use dtbstream_core::{DeviceType, Event, EventDecoder, Pixel, RecordReader, Result};

use crate::raw::decode_raw;
use crate::tags::{self, DATA_MASK, HEADER_TAGS, MISSING_SYMBOL, ROC_HEADER_TAG, TRAILER_TAGS};

/// A record, fully materialized as `Vec<u16>`, read with an internal
/// cursor rather than a second pull-based layer: unlike the `RecordScanner`
/// (which must frame a truly unbounded stream), `Record.symbols` is already
/// entirely in memory by the time it reaches this decoder.
struct SymbolCursor<'a> {
    symbols: &'a [u16],
    pos: usize,
}

impl<'a> SymbolCursor<'a> {
    fn new(symbols: &'a [u16]) -> Self {
        SymbolCursor { symbols, pos: 0 }
    }

    /// Returns the next symbol, or the synthesized missing-symbol sentinel
    /// once the record is exhausted.
    fn next(&mut self) -> u16 {
        let sym = self.symbols.get(self.pos).copied().unwrap_or(MISSING_SYMBOL);
        self.pos += 1;
        sym
    }

    /// Un-reads the last symbol returned by `next`, so it is served again
    /// by the following call.
    fn unread(&mut self) {
        self.pos -= 1;
    }
}

fn packed_nibbles(nibbles: [u16; 4]) -> u32 {
    ((nibbles[0] as u32) << 12) | ((nibbles[1] as u32) << 8) | ((nibbles[2] as u32) << 4) | nibbles[3] as u32
}

/// Decodes TBM-framed module records into multi-ROC events.
pub struct ModDigDecoder<R> {
    reader: R,
    event: Event,
}

impl<R: RecordReader> ModDigDecoder<R> {
    pub fn new(reader: R) -> Self {
        ModDigDecoder { reader, event: Event::new() }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: RecordReader> EventDecoder for ModDigDecoder<R> {
    fn read(&mut self) -> Result<&Event> {
        let record = self.reader.read()?;
        self.event.clear();
        self.event.record_nr = record.record_nr;
        self.event.device_type = Some(DeviceType::ModDig);

        let mut cursor = SymbolCursor::new(&record.symbols);
        let mut event_error = 0u16;

        let mut header_nibbles = [0u16; 4];
        for (slot, &(expected_tag, err_bit)) in HEADER_TAGS.iter().enumerate() {
            let sym = cursor.next();
            if sym & tags::TAG_MASK != expected_tag {
                warn!(
                    "record {}: header slot {} tag mismatch, expected {:#06x} got {:#06x}",
                    record.record_nr,
                    slot,
                    expected_tag,
                    sym & tags::TAG_MASK
                );
                event_error |= err_bit;
            }
            header_nibbles[slot] = sym & DATA_MASK;
        }
        self.event.header = packed_nibbles(header_nibbles);

        // ROC blocks, until we see something other than a ROC-header tag.
        loop {
            let sym = cursor.next();
            if sym & tags::TAG_MASK != ROC_HEADER_TAG {
                cursor.unread();
                break;
            }

            let roc = self.event.push_roc();
            roc.header = (sym & DATA_MASK) as i32;

            let mut aborted = false;
            loop {
                let first = cursor.next();
                let first_idx = tags::tag_nibble(first);
                if !(1..=6).contains(&first_idx) {
                    cursor.unread();
                    break;
                }

                let mut raw = 0u32;
                let mut px_error = 0u16;
                let mut symbol = first;
                for i in 1..=6u16 {
                    if i > 1 {
                        symbol = cursor.next();
                    }
                    if symbol & tags::ABORT_BIT != 0 {
                        warn!(
                            "record {}: abort bit set mid-pixel at symbol slot {}, jumping to trailer",
                            record.record_nr, i
                        );
                        let pixel = Pixel { raw, error: 0x1FFF, ..Pixel::default() };
                        roc.pixels.push(pixel);
                        roc.error |= 0x0001;
                        cursor.unread();
                        aborted = true;
                        break;
                    }
                    if tags::tag_nibble(symbol) != i {
                        warn!(
                            "record {}: pixel symbol slot {} tag mismatch, expected {} got {}",
                            record.record_nr,
                            i,
                            i,
                            tags::tag_nibble(symbol)
                        );
                        px_error |= 1u16 << i;
                    }
                    raw = (raw << 4) | (symbol & DATA_MASK) as u32;
                }
                if aborted {
                    break;
                }
                let mut pixel = decode_raw(raw);
                pixel.error |= px_error;
                roc.pixels.push(pixel);
            }

            if roc.pixels.iter().any(|p| p.error != 0) {
                roc.error |= 0x0001;
            }
            if aborted {
                break;
            }
        }

        let mut trailer_nibbles = [0u16; 4];
        for (slot, &(expected_tag, err_bit)) in TRAILER_TAGS.iter().enumerate() {
            let sym = cursor.next();
            if sym & tags::TAG_MASK != expected_tag {
                warn!(
                    "record {}: trailer slot {} tag mismatch, expected {:#06x} got {:#06x}",
                    record.record_nr,
                    slot,
                    expected_tag,
                    sym & tags::TAG_MASK
                );
                event_error |= err_bit;
            }
            trailer_nibbles[slot] = sym & DATA_MASK;
        }
        self.event.trailer = packed_nibbles(trailer_nibbles);

        if self.event.rocs.iter().any(|r| r.error != 0) {
            event_error |= 0x0001;
        }
        self.event.error = event_error;

        Ok(&self.event)
    }
}
