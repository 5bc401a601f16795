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

    src/settings.rs

    Window and match parameters shared by the encoder and decoder.
*/

use strum::{Display, EnumIter, EnumString};

/// The largest window we can address with the 12-bit position field of a match token.
pub const MAX_FRAME_SIZE: usize = 0x1000;
/// The length field of a match token is 4 bits wide.
pub const MAX_LENGTH_FIELD: usize = 0x0F;

/// Configuration Errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("frame size {0} is not a power of two")]
    FrameSizeNotPowerOfTwo(usize),
    #[error("frame size {0} exceeds the maximum of 4096")]
    FrameSizeTooLarge(usize),
    #[error("minimum match length must be at least 1")]
    MinMatchLengthZero,
    #[error("minimum match length {min} must be less than maximum match length {max}")]
    MatchLengthOrder { min: usize, max: usize },
    #[error("match lengths {min}..={max} do not fit the 4-bit length field")]
    MatchLengthRange { min: usize, max: usize },
    #[error("frame size {frame_size} must be at least twice the maximum match length {max}")]
    FrameSizeTooSmall { frame_size: usize, max: usize },
    #[error("initial frame position {pos} is outside of frame size {frame_size}")]
    InitPosOutOfRange { pos: usize, frame_size: usize },
}

/// Named parameter sets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, EnumIter, EnumString, Display)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SettingsPreset {
    /// Zero-filled 4K window, 18 byte lookahead, threshold of 2.
    #[default]
    #[strum(serialize = "standard")]
    Standard,
    /// The geometry of Okumura's LZSS.C with its window pre-filled with spaces.
    #[strum(serialize = "classic")]
    Classic,
}

/// Settings controlling compression and decompression.
///
/// The format carries no header, so a stream can only be expanded with the same
/// settings that were used to compress it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LzssSettings {
    /// size of the sliding window, must be a power of two
    pub frame_size: usize,
    /// value used to pre-fill the sliding window
    pub frame_fill: u8,
    /// initial write position within the sliding window
    pub frame_init_pos: usize,
    /// upper limit of a match length, also the lookahead size
    pub max_match_length: usize,
    /// matches of this length or shorter are sent as literals
    pub min_match_length: usize,
}

impl Default for LzssSettings {
    fn default() -> Self {
        LzssSettings::from(SettingsPreset::Standard)
    }
}

impl From<SettingsPreset> for LzssSettings {
    fn from(preset: SettingsPreset) -> LzssSettings {
        match preset {
            SettingsPreset::Standard => LzssSettings {
                frame_size: 0x1000,
                frame_fill: 0,
                frame_init_pos: 0x1000 - 0x12,
                max_match_length: 0x12,
                min_match_length: 2,
            },
            SettingsPreset::Classic => LzssSettings {
                frame_size: 0x1000,
                frame_fill: b' ',
                frame_init_pos: 0x1000 - 0x12,
                max_match_length: 0x12,
                min_match_length: 2,
            },
        }
    }
}

impl LzssSettings {
    pub fn with_frame_size(mut self, frame_size: usize) -> Self {
        self.frame_size = frame_size;
        self
    }

    pub fn with_frame_fill(mut self, frame_fill: u8) -> Self {
        self.frame_fill = frame_fill;
        self
    }

    pub fn with_frame_init_pos(mut self, frame_init_pos: usize) -> Self {
        self.frame_init_pos = frame_init_pos;
        self
    }

    pub fn with_max_match_length(mut self, max_match_length: usize) -> Self {
        self.max_match_length = max_match_length;
        self
    }

    pub fn with_min_match_length(mut self, min_match_length: usize) -> Self {
        self.min_match_length = min_match_length;
        self
    }

    /// Return the conventional initial position for the current frame size and
    /// maximum match length, placing the first lookahead at the very end of the ring.
    pub fn conventional_init_pos(&self) -> usize {
        self.frame_size.saturating_sub(self.max_match_length)
    }

    /// Check that these settings describe a window and token layout we can encode.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.frame_size.is_power_of_two() {
            return Err(ConfigError::FrameSizeNotPowerOfTwo(self.frame_size));
        }
        if self.frame_size > MAX_FRAME_SIZE {
            return Err(ConfigError::FrameSizeTooLarge(self.frame_size));
        }
        if self.min_match_length == 0 {
            return Err(ConfigError::MinMatchLengthZero);
        }
        if self.min_match_length >= self.max_match_length {
            return Err(ConfigError::MatchLengthOrder {
                min: self.min_match_length,
                max: self.max_match_length,
            });
        }
        if self.max_match_length - (self.min_match_length + 1) > MAX_LENGTH_FIELD {
            return Err(ConfigError::MatchLengthRange {
                min: self.min_match_length + 1,
                max: self.max_match_length,
            });
        }
        // the lookahead and the F strings inserted behind it must not overlap
        if self.frame_size < 2 * self.max_match_length {
            return Err(ConfigError::FrameSizeTooSmall {
                frame_size: self.frame_size,
                max: self.max_match_length,
            });
        }
        if self.frame_init_pos >= self.frame_size {
            return Err(ConfigError::InitPosOutOfRange {
                pos: self.frame_init_pos,
                frame_size: self.frame_size,
            });
        }
        Ok(())
    }
}
