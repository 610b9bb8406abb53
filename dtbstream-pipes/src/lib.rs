// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Instrumentation pipes (spec §4.9): stages that wrap an upstream
//! `Source`/`RecordReader`/`EventDecoder`, observe the data flowing
//! through, and forward it unchanged.

mod event_printer;
mod level_histogram;
mod raw_data_printer;
mod read_back;
mod stream_dump;
mod stream_error_dump;

pub use event_printer::EventPrinter;
pub use level_histogram::LevelHistogram;
pub use raw_data_printer::{PrintMode, RawDataPrinter};
pub use read_back::{ReadBack, ReadBackState};
pub use stream_dump::StreamDump;
pub use stream_error_dump::StreamErrorDump;
