// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The DTB driver capability boundary (spec §6): raw FIFO reads, ADC
//! configuration, and deserializer selection, modeled as an opaque trait so
//! this crate (and its tests) do not depend on real hardware or a vendor
//! driver binding.

/// Outcome of a single `Daq_Read` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DaqReadOutcome {
    /// Number of `u16` words written into the caller's buffer.
    pub words_read: usize,
    /// Words still queued in the device after this read.
    pub remaining: u32,
    /// `DAQ_FIFO_OVFL` was set in the returned state flags.
    pub fifo_overflow: bool,
    /// `DAQ_MEM_OVFL` was set in the returned state flags.
    pub mem_overflow: bool,
}

/// A DTB (Digital Test Board) handle: the hardware driver capabilities a
/// `DtbSource` needs. A real implementation wraps the vendor USB/PCI driver;
/// tests use an in-memory stub.
pub trait DtbHandle {
    /// `Daq_Open`: reserves `fifo_bytes` of on-board FIFO for `channel`.
    /// Returns `true` on success.
    fn daq_open(&mut self, fifo_bytes: u32, channel: u8) -> bool;

    /// `Daq_Close`. Must be idempotent.
    fn daq_close(&mut self, channel: u8);

    /// `Daq_Start`.
    fn daq_start(&mut self, channel: u8);

    /// `Daq_Stop`.
    fn daq_stop(&mut self, channel: u8);

    /// `Daq_Read`: fills as much of `out` as is available.
    fn daq_read(&mut self, channel: u8, out: &mut [u16]) -> DaqReadOutcome;

    /// `Daq_Select_ADC`: selects the ADC source with an acquisition timeout
    /// in device ticks (`1..=65535`) and `tin`/`tout` delays (`0..=63`).
    fn select_adc(&mut self, channel: u8, timeout: u16, tin_delay: u8, tout_delay: u8);

    /// `Daq_Select_Deser160`: selects the 160 Mbit/s deserializer with a
    /// `0..=7` phase adjustment.
    fn select_deser160(&mut self, channel: u8, phase: u8);

    /// `Daq_Select_Deser400`: selects the 400 Mbit/s deserializer.
    fn select_deser400(&mut self, channel: u8);

    /// `Daq_Select_Datagenerator`: selects the on-board pattern generator.
    fn select_datagenerator(&mut self, channel: u8);

    /// `SignalProbeADC`: routes the analog probe to the given channel with
    /// the given gain.
    fn signal_probe_adc(&mut self, channel: u8, gain: u8);

    /// `uDelay`: busy-waits for the given number of microseconds.
    fn u_delay(&mut self, micros: u32);
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::collections::VecDeque;

    /// An in-memory `DtbHandle` double: replays a fixed sequence of
    /// pre-scripted `DaqReadOutcome`-producing chunks, then reports either
    /// empty reads or a scripted overflow.
    #[derive(Default)]
    pub struct StubDtbHandle {
        pub opened: bool,
        pub started: bool,
        pub chunks: VecDeque<Vec<u16>>,
        pub overflow_after_empty: bool,
        pub open_succeeds: bool,
        pub select_calls: Vec<&'static str>,
    }

    impl StubDtbHandle {
        pub fn new() -> Self {
            Self { open_succeeds: true, ..Default::default() }
        }
    }

    impl DtbHandle for StubDtbHandle {
        fn daq_open(&mut self, _fifo_bytes: u32, _channel: u8) -> bool {
            self.opened = self.open_succeeds;
            self.opened
        }

        fn daq_close(&mut self, _channel: u8) {
            self.opened = false;
        }

        fn daq_start(&mut self, _channel: u8) {
            self.started = true;
        }

        fn daq_stop(&mut self, _channel: u8) {
            self.started = false;
        }

        fn daq_read(&mut self, _channel: u8, out: &mut [u16]) -> DaqReadOutcome {
            if let Some(chunk) = self.chunks.pop_front() {
                let n = chunk.len().min(out.len());
                out[..n].copy_from_slice(&chunk[..n]);
                return DaqReadOutcome { words_read: n, remaining: 0, ..Default::default() };
            }
            DaqReadOutcome {
                words_read: 0,
                remaining: 0,
                fifo_overflow: self.overflow_after_empty,
                mem_overflow: false,
            }
        }

        fn select_adc(&mut self, _channel: u8, _timeout: u16, _tin_delay: u8, _tout_delay: u8) {
            self.select_calls.push("adc");
        }

        fn select_deser160(&mut self, _channel: u8, _phase: u8) {
            self.select_calls.push("deser160");
        }

        fn select_deser400(&mut self, _channel: u8) {
            self.select_calls.push("deser400");
        }

        fn select_datagenerator(&mut self, _channel: u8) {
            self.select_calls.push("datagenerator");
        }

        fn signal_probe_adc(&mut self, _channel: u8, _gain: u8) {
            self.select_calls.push("probe_adc");
        }

        fn u_delay(&mut self, _micros: u32) {}
    }
}
