// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoded events: the structured, typed output of an `EventDecoder`.

use crate::pixel::Pixel;

/// Which of the three wire dialects an `Event` was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    /// Analog ROC: six-sample base-6 encoding.
    RocAna,
    /// Digital ROC: 12-bit-per-word encoding.
    RocDig,
    /// Digital module with TBM: nibble-tagged framing.
    ModDig,
}

/// One ROC's worth of decoded pixels within an `Event`.
///
/// Owned by the `Event` that contains it; mutated only by the decoder that
/// produced it.
#[derive(Debug, Clone, Default)]
pub struct RocEvent {
    /// The ROC header word (digital/analog: a single sample; module: a
    /// nibble).
    pub header: i32,
    /// Error bitmask, see [`crate::pixel::error_bits`] plus, for module
    /// decodes, bit `0x0001` set when any contained pixel reported an
    /// error.
    pub error: u16,
    pub pixels: Vec<Pixel>,
}

/// A decoded event: one record's worth of typed ROC/pixel content.
///
/// `Event`s are arena-style scratch buffers reused across successive pulls
/// from the same `EventDecoder`: a non-owning view is only valid until the
/// next call to `EventDecoder::read`. Callers that need to retain data must
/// copy it out.
#[derive(Debug, Clone, Default)]
pub struct Event {
    /// The `recordNr` of the source record this event was decoded from.
    pub record_nr: u32,
    pub device_type: Option<DeviceType>,
    /// TBM header, packed `(H1.low << 12) | (H2.low << 8) | (H3.low << 4) | H4.low`.
    /// Zero for the ROC-only dialects.
    pub header: u32,
    /// TBM trailer, packed the same way as `header`. Zero for the ROC-only
    /// dialects.
    pub trailer: u32,
    /// Error bitmask. Bit `0x0001` is set (module dialect only) when any
    /// contained `RocEvent` reported an error.
    pub error: u16,
    pub rocs: Vec<RocEvent>,
}

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the event to an empty state, ready to be repopulated by a
    /// decoder. Reuses the `Vec` allocations of both the event and its ROCs
    /// where possible.
    pub fn clear(&mut self) {
        self.record_nr = 0;
        self.device_type = None;
        self.header = 0;
        self.trailer = 0;
        self.error = 0;
        self.rocs.clear();
    }

    /// Pushes a new, empty `RocEvent` onto the end and returns a mutable
    /// reference to it, reusing a previously-allocated slot when the
    /// backing `Vec`'s capacity allows it.
    pub fn push_roc(&mut self) -> &mut RocEvent {
        self.rocs.push(RocEvent::default());
        self.rocs.last_mut().expect("just pushed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_all_fields() {
        let mut ev = Event::new();
        ev.record_nr = 7;
        ev.device_type = Some(DeviceType::RocDig);
        ev.error = 0xBEEF;
        ev.push_roc().header = 3;
        ev.clear();
        assert_eq!(ev.record_nr, 0);
        assert!(ev.device_type.is_none());
        assert_eq!(ev.error, 0);
        assert!(ev.rocs.is_empty());
    }

    #[test]
    fn roc_event_default_is_empty() {
        let roc = RocEvent::default();
        assert_eq!(roc.header, 0);
        assert!(roc.pixels.is_empty());
    }
}
