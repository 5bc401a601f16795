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

    src/codec/mod.rs

    Compress or expand a file.
*/

pub mod args;

use crate::args::GlobalOptions;
use anyhow::{Context, Error};
use lzss_tree::{LzssStream, Mode};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

pub(crate) const COMPRESSED_EXT: &str = "lzss";

/// Name the output after the input: append `.lzss` when compressing; when expanding, strip
/// a trailing `.lzss` or else append `.decompressed`.
pub(crate) fn default_out_file(in_file: &Path, mode: Mode) -> PathBuf {
    let mut name = in_file.as_os_str().to_owned();
    match mode {
        Mode::Compress => {
            name.push(".");
            name.push(COMPRESSED_EXT);
            PathBuf::from(name)
        }
        Mode::Decompress => match in_file.extension() {
            Some(ext) if ext == COMPRESSED_EXT => in_file.with_extension(""),
            _ => {
                name.push(".decompressed");
                PathBuf::from(name)
            }
        },
    }
}

pub(crate) fn run(global: &GlobalOptions, params: &args::CodecParams, mode: Mode) -> Result<(), Error> {
    let settings = params.settings.to_settings();
    settings.validate().context("Invalid settings")?;

    let out_file = match &params.out_file {
        Some(path) => path.clone(),
        None => default_out_file(&params.in_file, mode),
    };
    log::debug!("run(): {} {} -> {}", mode, params.in_file.display(), out_file.display());

    let reader = File::open(&params.in_file)
        .with_context(|| format!("Error opening input file {}", params.in_file.display()))?;
    let writer = File::create(&out_file)
        .with_context(|| format!("Error creating output file {}", out_file.display()))?;

    let mut stream = LzssStream::new(BufReader::new(reader), BufWriter::new(writer), mode, &settings)?;
    let (in_size, out_size) = match mode {
        Mode::Compress => stream.compress(),
        Mode::Decompress => stream.decompress(),
    }
    .with_context(|| format!("Error during {} of {}", mode, params.in_file.display()))?;

    if !global.silent {
        println!("{}: {} bytes -> {}: {} bytes", params.in_file.display(), in_size, out_file.display(), out_size);
        let (original, packed) = match mode {
            Mode::Compress => (in_size, out_size),
            Mode::Decompress => (out_size, in_size),
        };
        if original > 0 {
            println!("Ratio: {:.2}%", packed as f64 * 100.0 / original as f64);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{args::*, *};

    #[test]
    fn output_names() {
        assert_eq!(default_out_file(Path::new("a/b.txt"), Mode::Compress), PathBuf::from("a/b.txt.lzss"));
        assert_eq!(default_out_file(Path::new("a/b.txt.lzss"), Mode::Decompress), PathBuf::from("a/b.txt"));
        assert_eq!(default_out_file(Path::new("b.bin"), Mode::Decompress), PathBuf::from("b.bin.decompressed"));
        assert_eq!(default_out_file(Path::new("b"), Mode::Decompress), PathBuf::from("b.decompressed"));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let original = dir.path().join("data.txt");
        let data = b"It was the best of times, it was the worst of times.\n".repeat(50);
        std::fs::write(&original, &data).unwrap();

        let global = GlobalOptions { silent: true };
        let settings = SettingsParams {
            fill: Some(b' '),
            ..Default::default()
        };

        let params = CodecParams {
            in_file: original.clone(),
            out_file: None,
            settings: settings.clone(),
        };
        run(&global, &params, Mode::Compress).unwrap();
        let packed = dir.path().join("data.txt.lzss");
        assert!(std::fs::metadata(&packed).unwrap().len() < data.len() as u64);

        let expanded = dir.path().join("expanded.txt");
        let params = CodecParams {
            in_file: packed,
            out_file: Some(expanded.clone()),
            settings,
        };
        run(&global, &params, Mode::Decompress).unwrap();
        assert_eq!(std::fs::read(&expanded).unwrap(), data);
    }

    #[test]
    fn invalid_settings_fail() {
        let dir = tempfile::tempdir().unwrap();
        let params = CodecParams {
            in_file: dir.path().join("missing"),
            out_file: None,
            settings: SettingsParams {
                frame_size: Some(1000),
                ..Default::default()
            },
        };
        let global = GlobalOptions { silent: true };
        assert!(run(&global, &params, Mode::Compress).is_err());
        // nothing was created
        assert!(!dir.path().join("missing.lzss").exists());
    }
}
