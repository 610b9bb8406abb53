// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `ReadBack` (spec §4.9): recovers a 16-bit serial side-channel smuggled
//! one bit per record into ROC record headers.

use dtbstream_core::{Record, RecordReader, Result};

const HEADER_MASK: u16 = 0x0FFC;
const HEADER_PATTERN: u16 = 0x07F8;
const FRAME_START_BIT: u16 = 0x0002;
const DATA_BIT: u16 = 0x0001;

/// Recovered shift-register state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadBackState {
    shift: u16,
    bits_shifted: u8,
    /// A full 16-bit word has been shifted in at least once.
    pub valid: bool,
    /// `data` changed on the most recently read record.
    pub updated: bool,
    /// The most recently completed 16-bit word.
    pub data: u16,
}

/// Wraps a `RecordReader`, recovering a serial side-channel from headers
/// matching mask `0x0FFC == 0x07F8` (bit 0 is data, bit 1 is frame start).
pub struct ReadBack<R> {
    reader: R,
    state: ReadBackState,
}

impl<R: RecordReader> ReadBack<R> {
    pub fn new(reader: R) -> Self {
        ReadBack { reader, state: ReadBackState::default() }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    pub fn state(&self) -> &ReadBackState {
        &self.state
    }
}

impl<R: RecordReader> RecordReader for ReadBack<R> {
    fn read(&mut self) -> Result<&Record> {
        let record = self.reader.read()?;
        self.state.updated = false;

        if let Some(&header) = record.symbols.first() {
            if header & HEADER_MASK == HEADER_PATTERN {
                let frame_start = header & FRAME_START_BIT != 0;
                let bit = header & DATA_BIT;
                if frame_start {
                    self.state.shift = bit;
                    self.state.bits_shifted = 1;
                } else {
                    self.state.shift = (self.state.shift << 1) | bit;
                    self.state.bits_shifted = self.state.bits_shifted.saturating_add(1);
                }
                if self.state.bits_shifted >= 16 {
                    self.state.data = self.state.shift;
                    self.state.valid = true;
                    self.state.updated = true;
                }
            }
        }

        Ok(record)
    }
}
