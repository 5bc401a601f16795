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

    src/args.rs

    Command line argument parsing.
*/

use bpaf::*;
use std::path::PathBuf;
use strum::Display;

use crate::codec::args::{codec_parser, CodecParams};

#[derive(Clone, Debug, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Command {
    Version,
    Compress(CodecParams),
    Decompress(CodecParams),
}

#[derive(Debug)]
pub struct AppParams {
    pub global: GlobalOptions,
    pub command: Command,
}

#[derive(Debug)]
pub struct GlobalOptions {
    pub silent: bool,
}

pub fn global_options_parser() -> impl Parser<GlobalOptions> {
    let silent = long("silent")
        .help("Suppress all output except required output")
        .switch();

    construct!(GlobalOptions { silent })
}

pub(crate) fn in_file_parser() -> impl Parser<PathBuf> {
    long("in_file")
        .short('i')
        .argument::<PathBuf>("IN_FILE")
        .help("Path to input file")
}

pub(crate) fn out_file_parser() -> impl Parser<Option<PathBuf>> {
    long("out_file")
        .short('o')
        .argument::<PathBuf>("OUT_FILE")
        .help("Path to output file")
        .optional()
}

pub(crate) fn command_parser() -> impl Parser<AppParams> {
    let global = global_options_parser();

    let version = pure(Command::Version)
        .to_options()
        .command("version")
        .help("Display version information and exit");

    let compress = construct!(Command::Compress(codec_parser()))
        .to_options()
        .command("compress")
        .help("Compress a file");
    let decompress = construct!(Command::Decompress(codec_parser()))
        .to_options()
        .command("decompress")
        .help("Expand a compressed file");

    let command = construct!([version, compress, decompress]);

    construct!(AppParams { global, command })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lzss_tree::SettingsPreset;

    fn parse(args: &[&str]) -> AppParams {
        command_parser().to_options().run_inner(args).unwrap()
    }

    #[test]
    fn parses_compress() {
        let params = parse(&["--silent", "compress", "-i", "in.bin", "--preset", "classic"]);
        assert!(params.global.silent);
        match params.command {
            Command::Compress(p) => {
                assert_eq!(p.in_file, PathBuf::from("in.bin"));
                assert!(p.out_file.is_none());
                assert_eq!(p.settings.preset, SettingsPreset::Classic);
            }
            other => panic!("unexpected command: {}", other),
        }
    }

    #[test]
    fn parses_decompress_with_output() {
        let params = parse(&["decompress", "-i", "in.lzss", "-o", "out.bin", "--min-match", "1"]);
        assert!(!params.global.silent);
        match params.command {
            Command::Decompress(p) => {
                assert_eq!(p.out_file, Some(PathBuf::from("out.bin")));
                assert_eq!(p.settings.min_match, Some(1));
            }
            other => panic!("unexpected command: {}", other),
        }
    }

    #[test]
    fn command_names() {
        assert_eq!(Command::Version.to_string(), "version");
        assert_eq!(parse(&["version"]).command.to_string(), "version");
    }
}
