// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `StreamErrorDump` (spec §4.9): tracks runs of "good" vs "bad" raw
//! samples (bad = reserved bits `0x3000` set) and logs each transition
//! with the length of the run it ended.

use dtbstream_core::{Result, Source};
use log::info;

/// Clean samples required before a bad run is considered to have ended.
const GOOD_HYSTERESIS: u32 = 3;

const BAD_MASK: u16 = 0x3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Good,
    Bad,
}

/// Wraps a `Source`, logging transitions between clean and bad runs of raw
/// samples. Passes every sample through unchanged.
pub struct StreamErrorDump<S> {
    source: S,
    state: State,
    run_len: u64,
    clean_run: u32,
}

impl<S: Source> StreamErrorDump<S> {
    pub fn new(source: S) -> Self {
        StreamErrorDump { source, state: State::Good, run_len: 0, clean_run: 0 }
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    fn observe(&mut self, sym: u16) {
        let bad = sym & BAD_MASK != 0;
        match self.state {
            State::Good if bad => {
                info!("stream: {} clean samples, transitioning to bad", self.run_len);
                self.state = State::Bad;
                self.run_len = 1;
                self.clean_run = 0;
            }
            State::Good => {
                self.run_len += 1;
            }
            State::Bad if bad => {
                self.run_len += 1;
                self.clean_run = 0;
            }
            State::Bad => {
                self.clean_run += 1;
                if self.clean_run >= GOOD_HYSTERESIS {
                    info!("stream: {} bad samples, transitioning to clean", self.run_len);
                    self.state = State::Good;
                    self.run_len = self.clean_run as u64;
                    self.clean_run = 0;
                }
            }
        }
    }
}

impl<S: Source> Source for StreamErrorDump<S> {
    fn get(&mut self) -> Result<u16> {
        let sym = self.source.get()?;
        self.observe(sym);
        Ok(sym)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct VecSource(VecDeque<u16>);

    impl Source for VecSource {
        fn get(&mut self) -> Result<u16> {
            self.0.pop_front().ok_or_else(|| unreachable!("test stream exhausted"))
        }
    }

    #[test]
    fn stays_good_for_clean_samples() {
        let mut dump = StreamErrorDump::new(VecSource(VecDeque::from([0x0001, 0x0002, 0x0003])));
        for _ in 0..3 {
            dump.get().unwrap();
        }
        assert_eq!(dump.state, State::Good);
        assert_eq!(dump.run_len, 3);
    }

    #[test]
    fn one_bad_sample_flips_state_immediately() {
        let mut dump = StreamErrorDump::new(VecSource(VecDeque::from([0x0001, 0x3000])));
        dump.get().unwrap();
        dump.get().unwrap();
        assert_eq!(dump.state, State::Bad);
    }

    #[test]
    fn requires_three_clean_samples_to_recover() {
        let mut dump = StreamErrorDump::new(VecSource(VecDeque::from([
            0x3000, 0x0001, 0x0002, 0x0003,
        ])));
        for _ in 0..3 {
            dump.get().unwrap();
            assert_eq!(dump.state, State::Bad);
        }
        dump.get().unwrap();
        assert_eq!(dump.state, State::Good);
    }
}
