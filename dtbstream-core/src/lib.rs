// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Shared data model and pull-stream traits for decoding the raw 16-bit sample
//! stream produced by a pixel-detector test board (DTB) into typed events.
//!
//! The pipeline is a linear pull chain:
//!
//! ```text
//! Source(u16) -> RecordReader(Record) -> EventDecoder(Event) -> sink
//! ```
//!
//! This crate defines the three stage traits, the data model they produce
//! (`Record`, `Event`, `RocEvent`, `Pixel`), the `AnalogLevelDecoder` leaf
//! utility, and the terminal `StreamError` type. Concrete sources live in
//! `dtbstream-daq`, framers in `dtbstream-format`, and decoders in
//! `dtbstream-codec`.

mod error;
mod event;
mod level;
mod pipe;
mod pixel;
mod record;

pub use error::{Result, StreamError};
pub use event::{DeviceType, Event, RocEvent};
pub use level::AnalogLevelDecoder;
pub use pipe::{EventDecoder, RecordReader, Source};
pub use pixel::{error_bits, Pixel};
pub use record::{Record, RecordFlags};
