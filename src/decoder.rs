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

    src/decoder.rs

    Replay an LZSS token stream into the sliding window.
*/

use std::io::{Read, Write};

use crate::{settings::LzssSettings, window::Window, LzssError};

pub struct Decoder {
    settings: LzssSettings,
    window: Window,
    run: Vec<u8>,
}

impl Decoder {
    /// Create a decoder, validating the settings.
    pub fn new(settings: &LzssSettings) -> Result<Self, LzssError> {
        settings.validate()?;
        Ok(Self {
            settings: settings.clone(),
            window: Window::create(settings),
            run: Vec::with_capacity(settings.max_match_length),
        })
    }

    pub fn settings(&self) -> &LzssSettings {
        &self.settings
    }

    /// Expand everything `reader` yields into `writer`. Returns (in_size, out_size).
    ///
    /// Running out of input is always treated as the end of the stream, even in the middle
    /// of a token; whatever was decoded up to that point is kept.
    pub fn decode<R, W>(&mut self, reader: &mut R, writer: &mut W) -> Result<(u64, u64), LzssError>
    where
        R: Read,
        W: Write,
    {
        self.window = Window::create(&self.settings);

        let threshold = self.settings.min_match_length;
        let mut bytes = reader.bytes().fuse();
        let mut in_size = 0u64;
        let mut out_size = 0u64;
        let mut r = self.settings.frame_init_pos;
        // the high byte counts off the eight flags of a group
        let mut flags: u32 = 0;

        loop {
            flags >>= 1;
            if flags & 0x100 == 0 {
                match bytes.next().transpose()? {
                    Some(c) => flags = c as u32 | 0xFF00,
                    None => break,
                }
                in_size += 1;
            }

            if flags & 1 != 0 {
                let c = match bytes.next().transpose()? {
                    Some(c) => c,
                    None => {
                        log::warn!("Decoder::decode(): stream ended before a literal");
                        break;
                    }
                };
                in_size += 1;
                writer.write_all(&[c])?;
                self.window.write(r, c);
                r = self.window.advance(r);
                out_size += 1;
            } else {
                // Unused flag bits of the final group are 0, so running out of input here
                // is the normal way for a stream to end.
                let lo = match bytes.next().transpose()? {
                    Some(c) => c as usize,
                    None => break,
                };
                let hi = match bytes.next().transpose()? {
                    Some(c) => c as usize,
                    None => {
                        log::warn!("Decoder::decode(): stream ended inside a match token");
                        break;
                    }
                };
                in_size += 2;

                let position = lo | ((hi & 0xF0) << 4);
                let length = (hi & 0x0F) + threshold;

                self.run.clear();
                for k in 0..=length {
                    let c = self.window.read(self.window.wrap(position + k));
                    self.run.push(c);
                    self.window.write(r, c);
                    r = self.window.advance(r);
                }
                writer.write_all(&self.run)?;
                out_size += self.run.len() as u64;
            }
        }

        writer.flush()?;
        log::debug!("Decoder::decode(): {} bytes -> {} bytes", in_size, out_size);
        Ok((in_size, out_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn decode_with(settings: &LzssSettings, stream: &[u8]) -> Vec<u8> {
        let mut decoder = Decoder::new(settings).unwrap();
        let mut out = Vec::new();
        let (in_size, out_size) = decoder.decode(&mut Cursor::new(stream), &mut out).unwrap();
        assert_eq!(in_size, stream.len() as u64);
        assert_eq!(out_size, out.len() as u64);
        out
    }

    #[test]
    fn shortest_match() {
        // three literals, then a match of min_match_length + 1 bytes with a length field of 0
        let out = decode_with(&LzssSettings::default(), &hex::decode("07616263EEF0").unwrap());
        assert_eq!(out, b"abcabc");
    }

    #[test]
    fn longest_match() {
        // one literal, then a match of min_match_length + 16 bytes with a length field of 15
        let out = decode_with(&LzssSettings::default(), &hex::decode("0141EEFF").unwrap());
        assert_eq!(out, vec![b'A'; 19]);
    }

    #[test]
    fn match_against_fill() {
        // a match at position 0 before anything was written there copies fill bytes
        let settings = LzssSettings::default().with_frame_fill(b' ');
        let out = decode_with(&settings, &[0x00, 0x00, 0x05]);
        assert_eq!(out, b"        ");
    }

    #[test]
    fn truncation_is_end_of_stream() {
        let settings = LzssSettings::default();
        // flag byte only
        assert!(decode_with(&settings, &[0xFF]).is_empty());
        // literal, then half of a match token
        let mut decoder = Decoder::new(&settings).unwrap();
        let mut out = Vec::new();
        let (in_size, _) = decoder.decode(&mut Cursor::new(&[0x01, 0x41, 0xEE]), &mut out).unwrap();
        assert_eq!(out, b"A");
        assert_eq!(in_size, 2);
    }

    #[test]
    fn decoder_is_reusable() {
        let settings = LzssSettings::default();
        let stream = hex::decode("17010203EEF304").unwrap();
        let mut decoder = Decoder::new(&settings).unwrap();
        for _ in 0..2 {
            let mut out = Vec::new();
            decoder.decode(&mut Cursor::new(&stream), &mut out).unwrap();
            assert_eq!(out, vec![1, 2, 3, 1, 2, 3, 1, 2, 3, 4]);
        }
    }
}
