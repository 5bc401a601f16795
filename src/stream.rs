/*
    lzss_tree

    Copyright 2024 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    src/stream.rs

    A reader/writer pair opened for either compression or decompression.
*/

use std::io::{Read, Write};

use strum::Display;

use crate::{settings::LzssSettings, Decoder, Encoder, LzssError};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
pub enum Mode {
    #[strum(serialize = "compression")]
    Compress,
    #[strum(serialize = "decompression")]
    Decompress,
}

/// Owns a source and a sink for the duration of a single compression or decompression.
/// Calling the operation the stream was not opened for returns [`LzssError::InvalidMode`].
pub struct LzssStream<R: Read, W: Write> {
    reader: R,
    writer: W,
    mode: Mode,
    settings: LzssSettings,
}

impl<R: Read, W: Write> LzssStream<R, W> {
    pub fn new(reader: R, writer: W, mode: Mode, settings: &LzssSettings) -> Result<Self, LzssError> {
        settings.validate()?;
        Ok(Self {
            reader,
            writer,
            mode,
            settings: settings.clone(),
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn require(&self, expected: Mode) -> Result<(), LzssError> {
        match self.mode == expected {
            true => Ok(()),
            false => Err(LzssError::InvalidMode {
                expected,
                actual: self.mode,
            }),
        }
    }

    /// Compress the remaining input into the output. Returns (in_size, out_size).
    pub fn compress(&mut self) -> Result<(u64, u64), LzssError> {
        self.require(Mode::Compress)?;
        Encoder::new(&self.settings)?.encode(&mut self.reader, &mut self.writer)
    }

    /// Expand the remaining input into the output. Returns (in_size, out_size).
    pub fn decompress(&mut self) -> Result<(u64, u64), LzssError> {
        self.require(Mode::Decompress)?;
        Decoder::new(&self.settings)?.decode(&mut self.reader, &mut self.writer)
    }

    /// Give back the reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}
