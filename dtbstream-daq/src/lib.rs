// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! `Source` implementations: [`DtbSource`] against a live test-board FIFO
//! (behind the opaque [`DtbHandle`] capability), and [`FileSource`] replaying
//! a raw little-endian `u16` capture file.

mod dtb_handle;
mod dtb_source;
mod file_source;

pub use dtb_handle::{DaqReadOutcome, DtbHandle};
pub use dtb_source::DtbSource;
pub use file_source::FileSource;

/// Number of `u16` samples read from the DTB FIFO per `FillBuffer` call.
/// A few thousand samples trades per-call latency against syscall overhead;
/// this matches the order of magnitude the original DTB driver uses.
pub const BLOCK_SIZE: usize = 4096;
