// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `EventPrinter` (spec §4.9): pretty-prints decoded events, optionally
//! restricted to ones carrying an error.

use std::io::Write;

use dtbstream_core::{Event, EventDecoder, Result};
use log::warn;

/// Wraps an `EventDecoder` and writes a formatted dump of each event to
/// `out`.
pub struct EventPrinter<D, W> {
    decoder: D,
    out: W,
    errors_only: bool,
}

impl<D: EventDecoder, W: Write> EventPrinter<D, W> {
    pub fn new(decoder: D, out: W, errors_only: bool) -> Self {
        EventPrinter { decoder, out, errors_only }
    }

    pub fn into_inner(self) -> D {
        self.decoder
    }
}

impl<D: EventDecoder, W: Write> EventDecoder for EventPrinter<D, W> {
    fn read(&mut self) -> Result<&Event> {
        let errors_only = self.errors_only;
        let event = self.decoder.read()?;

        if !errors_only || event.error != 0 {
            let result = writeln!(
                self.out,
                "event record={} device={:?} error={:#06x} rocs={}",
                event.record_nr,
                event.device_type,
                event.error,
                event.rocs.len()
            )
            .and_then(|_| {
                for (i, roc) in event.rocs.iter().enumerate() {
                    writeln!(
                        self.out,
                        "  roc[{}] header={:#x} error={:#06x} pixels={}",
                        i,
                        roc.header,
                        roc.error,
                        roc.pixels.len()
                    )?;
                }
                Ok(())
            });
            if let Err(err) = result {
                warn!("event printer: write failed: {}", err);
            }
        }

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtbstream_core::DeviceType;

    struct OneEvent(Event, bool);

    impl EventDecoder for OneEvent {
        fn read(&mut self) -> Result<&Event> {
            Ok(&self.0)
        }
    }

    fn sample_event(error: u16) -> Event {
        let mut event = Event::new();
        event.record_nr = 3;
        event.device_type = Some(DeviceType::RocDig);
        event.error = error;
        event
    }

    #[test]
    fn prints_clean_events_by_default() {
        let mut buf = Vec::new();
        let mut printer = EventPrinter::new(OneEvent(sample_event(0), false), &mut buf, false);
        printer.read().unwrap();
        assert!(!buf.is_empty());
    }

    #[test]
    fn errors_only_suppresses_clean_events() {
        let mut buf = Vec::new();
        let mut printer = EventPrinter::new(OneEvent(sample_event(0), false), &mut buf, true);
        printer.read().unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn errors_only_still_prints_errored_events() {
        let mut buf = Vec::new();
        let mut printer = EventPrinter::new(OneEvent(sample_event(1), false), &mut buf, true);
        printer.read().unwrap();
        assert!(!buf.is_empty());
    }
}
