// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `FileSource`: replays a raw little-endian `u16` capture file.

use std::collections::VecDeque;
use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};
use dtbstream_core::{empty_error, Result, Source};

use crate::BLOCK_SIZE;

/// A `Source` reading raw little-endian `u16` samples from any
/// `std::io::Read`, in blocks of [`BLOCK_SIZE`].
///
/// Per spec §4.3/§8 (S6), exhaustion is reported through the same
/// `StreamError::Empty` a `DtbSource` would raise in non-`endless` mode —
/// there is no separate file-specific error variant.
pub struct FileSource<R: Read> {
    reader: R,
    buffer: VecDeque<u16>,
}

impl<R: Read> FileSource<R> {
    pub fn new(reader: R) -> Self {
        FileSource { reader, buffer: VecDeque::new() }
    }

    fn fill_buffer(&mut self) -> Result<()> {
        for _ in 0..BLOCK_SIZE {
            match self.reader.read_u16::<LittleEndian>() {
                Ok(sample) => self.buffer.push_back(sample),
                Err(err) if err.kind() == std::io::ErrorKind::UnexpectedEof => break,
                Err(err) => return Err(err.into()),
            }
        }
        if self.buffer.is_empty() {
            return empty_error();
        }
        Ok(())
    }
}

impl<R: Read> Source for FileSource<R> {
    fn get(&mut self) -> Result<u16> {
        if self.buffer.is_empty() {
            self.fill_buffer()?;
        }
        Ok(self.buffer.pop_front().expect("fill_buffer guarantees a sample"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;
    use dtbstream_core::StreamError;
    use std::io::Cursor;

    fn raw_samples(samples: &[u16]) -> Cursor<Vec<u8>> {
        let mut buf = Vec::new();
        for &s in samples {
            buf.write_u16::<LittleEndian>(s).unwrap();
        }
        Cursor::new(buf)
    }

    #[test]
    fn reads_samples_in_order() {
        let mut src = FileSource::new(raw_samples(&[0x1234, 0xABCD, 0x0001]));
        assert_eq!(src.get().unwrap(), 0x1234);
        assert_eq!(src.get().unwrap(), 0xABCD);
        assert_eq!(src.get().unwrap(), 0x0001);
    }

    #[test]
    fn empty_file_raises_empty_on_first_read() {
        let mut src = FileSource::new(raw_samples(&[]));
        assert!(matches!(src.get(), Err(StreamError::Empty)));
    }

    #[test]
    fn exhaustion_after_data_also_raises_empty() {
        let mut src = FileSource::new(raw_samples(&[7]));
        assert_eq!(src.get().unwrap(), 7);
        assert!(matches!(src.get(), Err(StreamError::Empty)));
    }
}
