// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pixel raw decoding (spec §4.2): the shared base-6 address arithmetic
//! both the digital and analog decoders bottom out in.

use dtbstream_core::{error_bits, AnalogLevelDecoder, Pixel};

fn compose(c1: i32, c0: i32, r2: i32, r1: i32, r0: i32, ph: i16) -> Pixel {
    let mut error = 0u16;
    if r0 >= 6 {
        error |= error_bits::R0;
    }
    if r1 >= 6 {
        error |= error_bits::R1;
    }
    if r2 >= 6 {
        error |= error_bits::R2;
    }
    if c0 >= 6 {
        error |= error_bits::C0;
    }
    if c1 >= 6 {
        error |= error_bits::C1;
    }
    let c = 6 * c1 + c0;
    let r = 36 * r2 + 6 * r1 + r0;
    let y = 80 - r / 2;
    let x = 2 * c + (r & 1);
    if !(0..80).contains(&y) {
        error |= error_bits::Y_RANGE;
    }
    if !(0..52).contains(&x) {
        error |= error_bits::X_RANGE;
    }
    Pixel { raw: 0, x: x as i16, y: y as i16, ph, error }
}

/// Decodes one digital pixel hit from a 24-bit packed word (spec §4.2).
pub fn decode_raw(raw: u32) -> Pixel {
    let ph = ((raw & 0x0F) | ((raw >> 1) & 0xF0)) as i16;
    let mut error = 0u16;
    if raw & 0x10 != 0 {
        error |= error_bits::PH_TRIGGER;
    }
    let c1 = ((raw >> 21) & 0x7) as i32;
    let c0 = ((raw >> 18) & 0x7) as i32;
    let r2 = ((raw >> 15) & 0x7) as i32;
    let r1 = ((raw >> 12) & 0x7) as i32;
    let r0 = ((raw >> 9) & 0x7) as i32;
    let mut pixel = compose(c1, c0, r2, r1, r0, ph);
    pixel.raw = raw;
    pixel.error |= error;
    pixel
}

/// Decodes one analog pixel hit from six consecutive calibrated ADC samples
/// (spec §4.2). `v[0..4]` carry the base-6 address digits in the same order
/// as the digital encoding (`c1, c0, r2, r1, r0`); `v[5]` is the pulse
/// height, corrected but not quantized.
pub fn decode_ana(v: &[u16; 6], level: &AnalogLevelDecoder) -> Pixel {
    let c1 = level.translate(v[0]);
    let c0 = level.translate(v[1]);
    let r2 = level.translate(v[2]);
    let r1 = level.translate(v[3]);
    let r0 = level.translate(v[4]);
    let ph = level.correct_offset(v[5]) as i16;
    let mut pixel = compose(c1, c0, r2, r1, r0, ph);
    // There's no single-word packed form for an analog decode; stash the
    // reconstructed digit layout in the same bit positions `decode_raw`
    // would read them from, so a raw dump tool can treat both uniformly.
    let digit = |d: i32| (d.clamp(0, 7) as u32) & 0x7;
    pixel.raw = (digit(c1) << 21) | (digit(c0) << 18) | (digit(r2) << 15) | (digit(r1) << 12) | (digit(r0) << 9);
    pixel
}
