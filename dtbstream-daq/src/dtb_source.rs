// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `DtbSource`: a `Source` backed by a live DTB FIFO channel.

use std::collections::VecDeque;

use dtbstream_core::{buffer_overflow_error, empty_error, no_dtb_access_error, Result, Source};
use log::{debug, warn};

use crate::dtb_handle::DtbHandle;
use crate::BLOCK_SIZE;

/// Settling time the analog probe needs after being enabled, per spec §4.3.
const ADC_SETTLE_MICROS: u32 = 800;

/// A `Source` reading from one channel (`0..8`) of a DTB FIFO.
///
/// Construct with one of the `open_*` associated functions, which
/// pre-configure the DTB deserializer/ADC for the flavor of chip under test,
/// then drive it through `Enable` -> repeated `Read` -> `Disable` -> `Close`
/// (spec §5).
pub struct DtbSource<H: DtbHandle> {
    handle: H,
    channel: u8,
    endless: bool,
    open: bool,
    buffer: VecDeque<u16>,
    scratch: Vec<u16>,
}

impl<H: DtbHandle> DtbSource<H> {
    fn new(mut handle: H, channel: u8, fifo_bytes: u32, endless: bool) -> Result<Self> {
        let open = handle.daq_open(fifo_bytes, channel);
        if !open {
            return no_dtb_access_error();
        }
        Ok(DtbSource {
            handle,
            channel,
            endless,
            open,
            buffer: VecDeque::new(),
            scratch: vec![0u16; BLOCK_SIZE],
        })
    }

    /// Opens against an analog ROC: selects the ADC source with the given
    /// acquisition `timeout` (`1..=65535` device ticks) and `tin`/`tout`
    /// delays (`0..=63`), enables the analog probe at `gain`, and waits for
    /// the ADC to settle.
    #[allow(clippy::too_many_arguments)]
    pub fn open_roc_ana(
        mut handle: H,
        channel: u8,
        fifo_bytes: u32,
        endless: bool,
        timeout: u16,
        tin_delay: u8,
        tout_delay: u8,
        gain: u8,
    ) -> Result<Self> {
        handle.select_adc(channel, timeout, tin_delay, tout_delay);
        handle.signal_probe_adc(channel, gain);
        handle.u_delay(ADC_SETTLE_MICROS);
        Self::new(handle, channel, fifo_bytes, endless)
    }

    /// Opens against a digital ROC: selects the 160 Mbit/s deserializer
    /// with a `0..=7` phase adjustment.
    pub fn open_roc_dig(
        mut handle: H,
        channel: u8,
        fifo_bytes: u32,
        endless: bool,
        phase: u8,
    ) -> Result<Self> {
        handle.select_deser160(channel, phase);
        Self::new(handle, channel, fifo_bytes, endless)
    }

    /// Opens against a digital module (TBM-framed): selects the 400 Mbit/s
    /// deserializer.
    pub fn open_mod_dig(
        mut handle: H,
        channel: u8,
        fifo_bytes: u32,
        endless: bool,
    ) -> Result<Self> {
        handle.select_deser400(channel);
        Self::new(handle, channel, fifo_bytes, endless)
    }

    /// Opens against the on-board pattern generator, for bring-up without a
    /// chip attached.
    pub fn open_simulator(
        mut handle: H,
        channel: u8,
        fifo_bytes: u32,
        endless: bool,
    ) -> Result<Self> {
        handle.select_datagenerator(channel);
        Self::new(handle, channel, fifo_bytes, endless)
    }

    pub fn enable(&mut self) {
        self.handle.daq_start(self.channel);
    }

    pub fn disable(&mut self) {
        self.handle.daq_stop(self.channel);
    }

    /// Idempotent: releases the DAQ channel even if called more than once
    /// or after an error.
    pub fn close(&mut self) {
        if self.open {
            self.handle.daq_close(self.channel);
            self.open = false;
        }
    }

    fn fill_buffer(&mut self) -> Result<()> {
        if !self.open {
            return no_dtb_access_error();
        }
        loop {
            let outcome = self.handle.daq_read(self.channel, &mut self.scratch);
            if outcome.words_read > 0 {
                self.buffer.extend(self.scratch[..outcome.words_read].iter().copied());
                debug!(
                    "dtb channel {}: filled {} samples, {} remaining in FIFO",
                    self.channel, outcome.words_read, outcome.remaining
                );
                return Ok(());
            }
            if outcome.fifo_overflow || outcome.mem_overflow {
                warn!("dtb channel {}: FIFO/memory overflow with empty read", self.channel);
                return buffer_overflow_error();
            }
            if !self.endless {
                return empty_error();
            }
            // `endless` mode: spin until data or a terminal condition.
        }
    }
}

impl<H: DtbHandle> Source for DtbSource<H> {
    fn get(&mut self) -> Result<u16> {
        if self.buffer.is_empty() {
            self.fill_buffer()?;
        }
        // `fill_buffer` only returns `Ok` once at least one sample is queued.
        Ok(self.buffer.pop_front().expect("fill_buffer guarantees a sample"))
    }
}

impl<H: DtbHandle> Drop for DtbSource<H> {
    fn drop(&mut self) {
        self.close();
    }
}
