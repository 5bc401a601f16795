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

    src/encoder.rs

    Greedy LZSS parse and token packing.

    It is assumed that if a BufReader or BufWriter is required, the caller will
    provide such.
*/

use std::io::{Read, Write};

use crate::{
    match_tree::{MatchTree, TreeStats},
    settings::LzssSettings,
    window::Window,
    LzssError,
};

/// Up to eight tokens behind their flag byte.
/// `buf[0]` holds the flags, "1" representing an unencoded literal (1 byte) and "0" a
/// position-and-length pair (2 bytes). Thus eight tokens require at most 16 bytes.
struct TokenGroup {
    buf: [u8; 17],
    len: usize,
    mask: u8,
}

impl TokenGroup {
    fn new() -> Self {
        Self {
            buf: [0; 17],
            len: 1,
            mask: 1,
        }
    }

    fn push_literal(&mut self, c: u8) {
        self.buf[0] |= self.mask;
        self.buf[self.len] = c;
        self.len += 1;
        self.mask <<= 1;
    }

    /// Push a match token. The 12-bit position is split across both bytes, the upper
    /// nibble of the second byte holding bits 8..12 and the lower nibble the length field.
    fn push_match(&mut self, position: usize, length_field: usize) {
        self.buf[self.len] = (position & 0xFF) as u8;
        self.buf[self.len + 1] = (((position >> 4) & 0xF0) | length_field) as u8;
        self.len += 2;
        self.mask <<= 1;
    }

    fn is_full(&self) -> bool {
        self.mask == 0
    }

    fn is_empty(&self) -> bool {
        self.len == 1
    }

    /// Write out the group and start a new one. Returns the number of bytes written.
    fn flush<W: Write>(&mut self, writer: &mut W) -> Result<u64, LzssError> {
        writer.write_all(&self.buf[..self.len])?;
        log::trace!("TokenGroup::flush(): flags: {:08b} bytes: {}", self.buf[0], self.len);
        let written = self.len as u64;
        self.buf[0] = 0;
        self.len = 1;
        self.mask = 1;
        Ok(written)
    }
}

/// Structure to perform LZSS compression.
/// This maintains two components. First a sliding window containing the symbols in the
/// order encountered, and second a tree structure whose nodes point at window positions
/// where matches may be found.
pub struct Encoder {
    settings: LzssSettings,
    window: Window,
    index: MatchTree,
}

impl Encoder {
    /// Create an encoder, validating the settings.
    pub fn new(settings: &LzssSettings) -> Result<Self, LzssError> {
        settings.validate()?;
        Ok(Self {
            settings: settings.clone(),
            window: Window::create(settings),
            index: MatchTree::create(settings.frame_size),
        })
    }

    pub fn settings(&self) -> &LzssSettings {
        &self.settings
    }

    /// Statistics for the match tree of the most recent call to [`Encoder::encode`].
    pub fn tree_stats(&self) -> TreeStats {
        self.index.stats()
    }

    /// Compress everything `reader` yields into `writer`.
    /// Returns (in_size, out_size). An empty input produces no output.
    pub fn encode<R, W>(&mut self, reader: &mut R, writer: &mut W) -> Result<(u64, u64), LzssError>
    where
        R: Read,
        W: Write,
    {
        // start from a freshly filled window and an empty index
        self.window = Window::create(&self.settings);
        self.index = MatchTree::create(self.settings.frame_size);

        let n = self.settings.frame_size;
        let f = self.settings.max_match_length;
        let threshold = self.settings.min_match_length;

        let mut bytes = reader.bytes().fuse();
        let mut group = TokenGroup::new();
        let mut in_size = 0u64;
        let mut out_size = 0u64;

        let mut r = self.settings.frame_init_pos;
        // the trailing cursor stays one lookahead ahead of r, around the ring
        let mut s = self.window.wrap(r + f);

        // Read up to F bytes into the lookahead.
        let mut len = 0;
        while len < f {
            match bytes.next().transpose()? {
                Some(c) => {
                    let pos = self.window.wrap(r + len);
                    self.window.write(pos, c);
                    len += 1;
                }
                None => break,
            }
        }
        if len == 0 {
            log::debug!("Encoder::encode(): empty input");
            return Ok((0, 0));
        }
        in_size += len as u64;

        // Insert the F strings before r, each of which begins with one or more fill bytes.
        // Note the order, nearest first.
        for i in 1..=f {
            let pos = self.window.wrap(r + n - i);
            self.index.insert(&self.window, pos);
        }
        // Finally, insert the whole string just read, which primes the first match.
        let mut best = self.index.insert(&self.window, r);

        loop {
            // the match may run past the end of the input
            if best.length > len {
                best.length = len;
            }

            let step = if best.length <= threshold {
                group.push_literal(self.window.read(r));
                1
            } else {
                group.push_match(best.position, best.length - (threshold + 1));
                best.length
            };

            if group.is_full() {
                out_size += group.flush(writer)?;
            }

            let mut i = 0;
            while i < step {
                let c = match bytes.next().transpose()? {
                    Some(c) => c,
                    None => break,
                };
                self.index.delete(s);
                self.window.write(s, c);
                s = self.window.advance(s);
                r = self.window.advance(r);
                best = self.index.insert(&self.window, r);
                in_size += 1;
                i += 1;
            }

            // After the end of input there is nothing to read, but the lookahead drains.
            while i < step {
                self.index.delete(s);
                s = self.window.advance(s);
                r = self.window.advance(r);
                len -= 1;
                if len != 0 {
                    best = self.index.insert(&self.window, r);
                }
                i += 1;
            }

            if len == 0 {
                break;
            }
        }

        if !group.is_empty() {
            out_size += group.flush(writer)?;
        }
        writer.flush()?;

        let stats = self.index.stats();
        log::debug!(
            "Encoder::encode(): {} bytes -> {} bytes, {} insertions, {} splices, max depth {}",
            in_size,
            out_size,
            stats.insertions,
            stats.splices,
            stats.max_depth
        );
        Ok((in_size, out_size))
    }
}
