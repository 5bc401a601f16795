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
*/

//! # lzss_tree
//!
//! LZSS compression in the style of Haruhiko Okumura's `LZSS.C`, using a binary search
//! tree over the sliding window to find the longest match for each position.
//!
//! The compressed stream is a sequence of groups. Each group is a flag byte followed by
//! up to eight tokens; flag bit `i` (LSB first) is 1 if token `i` is a literal byte and 0
//! if it is a two byte match reference. There is no header, so the same [`LzssSettings`]
//! must be used to compress and decompress.
//!
//! ```
//! use lzss_tree::{compress, decompress, LzssSettings};
//!
//! let settings = LzssSettings::default();
//! let data = b"I am Sam. Sam I am. I do not like this Sam I am.\n";
//! let packed = compress(data, &settings).unwrap();
//! assert!(packed.len() < data.len());
//! assert_eq!(decompress(&packed, &settings).unwrap(), data);
//! ```

mod decoder;
mod encoder;
mod match_tree;
mod settings;
mod stream;
mod window;

use std::io::Cursor;

use thiserror::Error;

pub use crate::decoder::Decoder;
pub use crate::encoder::Encoder;
pub use crate::match_tree::TreeStats;
pub use crate::settings::{ConfigError, LzssSettings, SettingsPreset, MAX_FRAME_SIZE, MAX_LENGTH_FIELD};
pub use crate::stream::{LzssStream, Mode};

pub mod prelude {
    pub use crate::{
        compress,
        decompress,
        Decoder,
        Encoder,
        LzssError,
        LzssSettings,
        LzssStream,
        Mode,
        SettingsPreset,
    };
}

#[derive(Debug, Error)]
pub enum LzssError {
    #[error("An IO error occurred reading or writing the stream: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid compression settings: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Operation requires a stream opened for {expected}, but it was opened for {actual}")]
    InvalidMode { expected: Mode, actual: Mode },
}

/// Compress a slice with the given settings, returning the compressed bytes.
/// An empty slice compresses to an empty stream.
pub fn compress(bytes: &[u8], settings: &LzssSettings) -> Result<Vec<u8>, LzssError> {
    let mut encoder = Encoder::new(settings)?;
    let mut src = Cursor::new(bytes);
    let mut ans = Vec::new();
    encoder.encode(&mut src, &mut ans)?;
    Ok(ans)
}

/// Expand a slice compressed with the same settings, returning the original bytes.
/// A truncated stream expands to as much data as could be recovered.
pub fn decompress(bytes: &[u8], settings: &LzssSettings) -> Result<Vec<u8>, LzssError> {
    let mut decoder = Decoder::new(settings)?;
    let mut src = Cursor::new(bytes);
    let mut ans = Vec::new();
    decoder.decode(&mut src, &mut ans)?;
    Ok(ans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_in_empty_out() {
        let settings = LzssSettings::default();
        assert!(compress(&[], &settings).unwrap().is_empty());
        assert!(decompress(&[], &settings).unwrap().is_empty());
    }

    #[test]
    fn invalid_settings_are_rejected_up_front() {
        let settings = LzssSettings::default().with_frame_size(1000);
        match compress(b"abc", &settings) {
            Err(LzssError::ConfigError(ConfigError::FrameSizeNotPowerOfTwo(1000))) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        match decompress(b"abc", &settings) {
            Err(LzssError::ConfigError(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn single_byte() {
        let settings = LzssSettings::default();
        let packed = compress(&[0x42], &settings).unwrap();
        assert_eq!(packed, vec![0x01, 0x42]);
        assert_eq!(decompress(&packed, &settings).unwrap(), vec![0x42]);
    }
}
