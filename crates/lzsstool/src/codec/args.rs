/*
    lzsstool

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

    src/codec/args.rs

    Arguments shared by the compress and decompress commands.
*/

use crate::args::*;
use bpaf::{construct, long, Parser};
use lzss_tree::{LzssSettings, SettingsPreset};
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub(crate) struct CodecParams {
    pub(crate) in_file: PathBuf,
    pub(crate) out_file: Option<PathBuf>,
    pub(crate) settings: SettingsParams,
}

/// Overrides applied on top of a preset.
#[derive(Clone, Debug, Default)]
pub(crate) struct SettingsParams {
    pub(crate) preset: SettingsPreset,
    pub(crate) frame_size: Option<usize>,
    pub(crate) fill: Option<u8>,
    pub(crate) init_pos: Option<usize>,
    pub(crate) max_match: Option<usize>,
    pub(crate) min_match: Option<usize>,
}

impl SettingsParams {
    /// Resolve the overrides into settings. If the geometry changed and no initial position
    /// was given, the conventional position for the new geometry is used.
    pub(crate) fn to_settings(&self) -> LzssSettings {
        let mut settings = LzssSettings::from(self.preset);
        if let Some(frame_size) = self.frame_size {
            settings = settings.with_frame_size(frame_size);
        }
        if let Some(fill) = self.fill {
            settings = settings.with_frame_fill(fill);
        }
        if let Some(max_match) = self.max_match {
            settings = settings.with_max_match_length(max_match);
        }
        if let Some(min_match) = self.min_match {
            settings = settings.with_min_match_length(min_match);
        }
        let init_pos = self.init_pos.unwrap_or(settings.conventional_init_pos());
        settings.with_frame_init_pos(init_pos)
    }
}

fn settings_parser() -> impl Parser<SettingsParams> {
    let preset = long("preset")
        .argument::<SettingsPreset>("PRESET")
        .help("Parameter preset: 'standard' or 'classic'")
        .fallback(SettingsPreset::Standard);
    let frame_size = long("frame-size")
        .argument::<usize>("BYTES")
        .help("Size of the sliding window, a power of two up to 4096")
        .optional();
    let fill = long("fill")
        .argument::<u8>("BYTE")
        .help("Value used to pre-fill the sliding window")
        .optional();
    let init_pos = long("init-pos")
        .argument::<usize>("POS")
        .help("Initial write position within the sliding window")
        .optional();
    let max_match = long("max-match")
        .argument::<usize>("LEN")
        .help("Longest match length")
        .optional();
    let min_match = long("min-match")
        .argument::<usize>("LEN")
        .help("Matches of this length or shorter are sent as literals")
        .optional();

    construct!(SettingsParams {
        preset,
        frame_size,
        fill,
        init_pos,
        max_match,
        min_match,
    })
}

pub(crate) fn codec_parser() -> impl Parser<CodecParams> {
    let in_file = in_file_parser();
    let out_file = out_file_parser();
    let settings = settings_parser();

    construct!(CodecParams {
        in_file,
        out_file,
        settings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_only() {
        let params = SettingsParams {
            preset: SettingsPreset::Classic,
            ..Default::default()
        };
        assert_eq!(params.to_settings(), LzssSettings::from(SettingsPreset::Classic));
    }

    #[test]
    fn geometry_moves_init_pos() {
        let params = SettingsParams {
            frame_size: Some(256),
            max_match: Some(10),
            min_match: Some(1),
            ..Default::default()
        };
        let settings = params.to_settings();
        assert_eq!(settings.frame_init_pos, 246);
        assert!(settings.validate().is_ok());

        let params = SettingsParams {
            init_pos: Some(0),
            ..params
        };
        assert_eq!(params.to_settings().frame_init_pos, 0);
    }
}
