// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The three pull-stage traits the pipeline is built from. Each trait is
//! object-safe so a binary assembling a pipeline at runtime (picking a
//! device type from a CLI flag, say) can hold `Box<dyn Source>`,
//! `Box<dyn RecordReader>`, or `Box<dyn EventDecoder>`; concrete stage
//! structs are also generic over their upstream so a fully static pipeline
//! pays no dynamic dispatch cost.

use crate::error::Result;
use crate::event::Event;
use crate::record::Record;

/// A `u16` sample producer. An empty internal buffer triggers a refill from
/// hardware or a file; a terminal condition (`StreamError`) unwinds through
/// every downstream stage to the sink.
pub trait Source {
    /// Returns the next raw sample.
    fn get(&mut self) -> Result<u16>;
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn get(&mut self) -> Result<u16> {
        (**self).get()
    }
}

/// A framer: pulls raw samples from an upstream `Source` and yields
/// variable-length `Record`s.
///
/// The returned reference is valid only until the next call to `read` on
/// the same scanner (see [`crate::Record`]'s scratch-buffer contract).
pub trait RecordReader {
    fn read(&mut self) -> Result<&Record>;
}

impl<R: RecordReader + ?Sized> RecordReader for Box<R> {
    fn read(&mut self) -> Result<&Record> {
        (**self).read()
    }
}

/// A decoder: pulls `Record`s from an upstream `RecordReader` and yields
/// structured `Event`s.
///
/// Same scratch-buffer contract as `RecordReader::read`.
pub trait EventDecoder {
    fn read(&mut self) -> Result<&Event>;
}

impl<D: EventDecoder + ?Sized> EventDecoder for Box<D> {
    fn read(&mut self) -> Result<&Event> {
        (**self).read()
    }
}
