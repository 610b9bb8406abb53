// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Analog ROC decoder (spec §4.7): one record, one `RocEvent`, pixels in
//! groups of six calibrated samples.

use log::{debug, warn};

use dtbstream_core::{AnalogLevelDecoder, DeviceType, Event, EventDecoder, RecordReader, Result};

use crate::raw::decode_ana;

/// Decodes analog-ROC records into single-ROC events using a calibrated
/// [`AnalogLevelDecoder`] supplied at construction time.
pub struct RocAnaDecoder<R> {
    reader: R,
    level: AnalogLevelDecoder,
    event: Event,
}

impl<R: RecordReader> RocAnaDecoder<R> {
    pub fn new(reader: R, level: AnalogLevelDecoder) -> Self {
        RocAnaDecoder { reader, level, event: Event::new() }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: RecordReader> EventDecoder for RocAnaDecoder<R> {
    fn read(&mut self) -> Result<&Event> {
        let record = self.reader.read()?;
        self.event.clear();
        self.event.record_nr = record.record_nr;
        self.event.device_type = Some(DeviceType::RocAna);

        let roc = self.event.push_roc();
        if record.symbols.len() >= 3 {
            roc.header = self.level.correct_offset(record.symbols[2]);
            let mut groups = record.symbols[3..].chunks_exact(6);
            for group in &mut groups {
                let v: [u16; 6] = group.try_into().expect("chunks_exact(6)");
                roc.pixels.push(decode_ana(&v, &self.level));
            }
            if !groups.remainder().is_empty() {
                debug!(
                    "record {}: trailing incomplete sample group, dropped",
                    record.record_nr
                );
            }
        } else {
            warn!(
                "record {}: too short for an analog ROC header ({} symbols)",
                record.record_nr,
                record.symbols.len()
            );
        }

        Ok(&self.event)
    }
}
