// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `RawDataPrinter` (spec §4.9): dumps each record's number, size, and
//! payload (sign-expanded for analog sources, hex for digital ones).

use std::io::Write;

use dtbstream_core::{AnalogLevelDecoder, Record, RecordReader, Result};
use log::warn;

/// How a record's payload should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// 12-bit hex, one word per symbol.
    Digital,
    /// Sign-expanded decimal, as produced by an analog ROC.
    Analog,
}

/// Wraps a `RecordReader` and writes a line per record to `out`.
pub struct RawDataPrinter<R, W> {
    reader: R,
    out: W,
    mode: PrintMode,
}

impl<R: RecordReader, W: Write> RawDataPrinter<R, W> {
    pub fn new(reader: R, out: W, mode: PrintMode) -> Self {
        RawDataPrinter { reader, out, mode }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: RecordReader, W: Write> RecordReader for RawDataPrinter<R, W> {
    fn read(&mut self) -> Result<&Record> {
        let mode = self.mode;
        let record = self.reader.read()?;

        let body = match mode {
            PrintMode::Digital => {
                record.symbols.iter().map(|s| format!("{:03x}", s)).collect::<Vec<_>>().join(" ")
            }
            PrintMode::Analog => {
                let level = AnalogLevelDecoder::new();
                record
                    .symbols
                    .iter()
                    .map(|s| level.correct_offset(*s).to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        };
        if let Err(err) =
            writeln!(self.out, "record {} ({} symbols): {}", record.record_nr, record.len(), body)
        {
            warn!("raw data printer: write failed: {}", err);
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtbstream_core::RecordFlags;
    use std::collections::VecDeque;

    struct VecRecords(VecDeque<Vec<u16>>, Record);

    impl VecRecords {
        fn new(records: Vec<Vec<u16>>) -> Self {
            VecRecords(records.into_iter().collect(), Record::new())
        }
    }

    impl RecordReader for VecRecords {
        fn read(&mut self) -> Result<&Record> {
            let symbols = self.0.pop_front().expect("test record stream exhausted");
            self.1.clear(0);
            for s in symbols {
                self.1.push(s);
            }
            Ok(&self.1)
        }
    }

    #[test]
    fn digital_mode_prints_hex_and_passes_record_through() {
        let mut buf = Vec::new();
        let mut printer =
            RawDataPrinter::new(VecRecords::new(vec![vec![0x001, 0x002]]), &mut buf, PrintMode::Digital);
        let record = printer.read().unwrap();
        assert_eq!(record.symbols, vec![0x001, 0x002]);
        assert_eq!(record.flags, RecordFlags::empty());
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("001 002"));
    }

    #[test]
    fn analog_mode_prints_sign_expanded_values() {
        let mut buf = Vec::new();
        let mut printer =
            RawDataPrinter::new(VecRecords::new(vec![vec![0xFFF]]), &mut buf, PrintMode::Analog);
        printer.read().unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("-1"));
    }
}
