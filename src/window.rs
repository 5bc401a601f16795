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

    src/window.rs

    Sliding window for LZSS compression.
*/

//! The window is a ring of `frame_size` bytes followed by a mirror of the first
//! `max_match_length - 1` bytes of the ring. The mirror lets the match finder
//! compare a full lookahead starting anywhere in the ring without wrapping.

use crate::settings::LzssSettings;

pub(crate) struct Window {
    buf: Vec<u8>,
    /// ring size, a power of two
    n: usize,
    /// maximum match length
    f: usize,
}

impl Window {
    /// Create a window for validated settings. The whole buffer, mirror included,
    /// is pre-filled with the fill byte so the mirror agrees with the ring.
    pub fn create(settings: &LzssSettings) -> Self {
        let n = settings.frame_size;
        let f = settings.max_match_length;
        Self {
            buf: vec![settings.frame_fill; n + f - 1],
            n,
            f,
        }
    }

    #[inline]
    pub fn read(&self, pos: usize) -> u8 {
        self.buf[pos]
    }

    /// Write a byte into the ring, keeping the mirror in sync.
    #[inline]
    pub fn write(&mut self, pos: usize, val: u8) {
        self.buf[pos] = val;
        if pos < self.f - 1 {
            self.buf[pos + self.n] = val;
        }
    }

    #[inline]
    pub fn advance(&self, pos: usize) -> usize {
        (pos + 1) & (self.n - 1)
    }

    #[inline]
    pub fn wrap(&self, pos: usize) -> usize {
        pos & (self.n - 1)
    }

    #[cfg(test)]
    pub fn frame_size(&self) -> usize {
        self.n
    }

    pub fn max_match_length(&self) -> usize {
        self.f
    }
}
