// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `LevelHistogram` (spec §4.9): accumulates sign-expanded sample levels
//! from analog records, skipping the pulse-height slot every sixth sample.

use std::collections::HashMap;

use dtbstream_core::{AnalogLevelDecoder, Record, RecordReader, Result};

/// Wraps a `RecordReader`, tallying every non-pulse-height sample's
/// sign-expanded level.
pub struct LevelHistogram<R> {
    reader: R,
    level: AnalogLevelDecoder,
    counts: HashMap<i32, u64>,
}

impl<R: RecordReader> LevelHistogram<R> {
    pub fn new(reader: R) -> Self {
        LevelHistogram { reader, level: AnalogLevelDecoder::new(), counts: HashMap::new() }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    pub fn counts(&self) -> &HashMap<i32, u64> {
        &self.counts
    }

    pub fn total_samples(&self) -> u64 {
        self.counts.values().sum()
    }
}

impl<R: RecordReader> RecordReader for LevelHistogram<R> {
    fn read(&mut self) -> Result<&Record> {
        let record = self.reader.read()?;
        for (i, &sym) in record.symbols.iter().enumerate() {
            if i % 6 == 5 {
                continue;
            }
            *self.counts.entry(self.level.correct_offset(sym)).or_insert(0) += 1;
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn skips_every_sixth_sample() {
        let symbols: Vec<u16> = (0..12).collect();
        let mut hist = LevelHistogram::new(VecRecords::new(vec![symbols]));
        hist.read().unwrap();
        // 12 samples, positions 5 and 11 skipped: 10 counted.
        assert_eq!(hist.total_samples(), 10);
        assert!(!hist.counts().contains_key(&5));
        assert!(!hist.counts().contains_key(&11));
    }

    #[test]
    fn passes_record_through_unchanged() {
        let mut hist = LevelHistogram::new(VecRecords::new(vec![vec![1, 2, 3]]));
        let record = hist.read().unwrap();
        assert_eq!(record.symbols, vec![1, 2, 3]);
    }
}
