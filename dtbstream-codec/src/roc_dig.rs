// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Digital ROC decoder (spec §4.6): one record, one `RocEvent`, pixels in
//! pairs of 12-bit symbols.

use log::debug;

use dtbstream_core::{DeviceType, Event, EventDecoder, RecordReader, Result};

use crate::raw::decode_raw;

/// Decodes digital-ROC records (no TBM) into single-ROC events.
pub struct RocDigDecoder<R> {
    reader: R,
    event: Event,
}

impl<R: RecordReader> RocDigDecoder<R> {
    pub fn new(reader: R) -> Self {
        RocDigDecoder { reader, event: Event::new() }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: RecordReader> EventDecoder for RocDigDecoder<R> {
    fn read(&mut self) -> Result<&Event> {
        let record = self.reader.read()?;
        self.event.clear();
        self.event.record_nr = record.record_nr;
        self.event.device_type = Some(DeviceType::RocDig);

        let symbols = &record.symbols;
        let roc = self.event.push_roc();
        if let Some(&header) = symbols.first() {
            roc.header = header as i32;
        }

        let mut pairs = symbols.get(1..).unwrap_or(&[]).chunks_exact(2);
        for pair in &mut pairs {
            let raw = ((pair[0] as u32) << 12) | pair[1] as u32;
            roc.pixels.push(decode_raw(raw));
        }
        if !pairs.remainder().is_empty() {
            debug!(
                "record {}: trailing odd symbol after pixel pairs, dropped",
                self.event.record_nr
            );
        }

        Ok(&self.event)
    }
}
