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

    tests/common/mod.rs

    Common support routines for tests
*/
#![allow(dead_code)]

use hex::encode;
use lzss_tree::{compress, decompress, LzssSettings};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sha1::{Digest, Sha1};

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn compute_slice_hash(slice: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(slice);
    let result = hasher.finalize();

    encode(result)
}

/// A decoded token, for inspecting compressed streams.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Literal(u8),
    Match { position: usize, length: usize },
}

/// Split a compressed stream into tokens. Stops quietly at a truncated token, like the decoder.
pub fn parse_tokens(stream: &[u8], settings: &LzssSettings) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < stream.len() {
        let flags = stream[i];
        i += 1;
        for bit in 0..8 {
            if flags & (1 << bit) != 0 {
                match stream.get(i) {
                    Some(&c) => tokens.push(Token::Literal(c)),
                    None => return tokens,
                }
                i += 1;
            } else {
                if i + 1 >= stream.len() {
                    return tokens;
                }
                let (lo, hi) = (stream[i] as usize, stream[i + 1] as usize);
                tokens.push(Token::Match {
                    position: lo | ((hi & 0xF0) << 4),
                    length: (hi & 0x0F) + settings.min_match_length + 1,
                });
                i += 2;
            }
        }
    }
    tokens
}

pub fn random_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut buf = vec![0u8; len];
    rng.fill(&mut buf[..]);
    buf
}

/// Text-like data drawn from a small alphabet, so it is full of short matches.
pub fn small_alphabet_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let alphabet = b"etaoin shrdlu";
    (0..len).map(|_| alphabet[rng.gen_range(0..alphabet.len())]).collect()
}

/// A block of `period` pseudo-random bytes repeated out to `len` bytes.
/// Uses a fixed linear congruential generator so the layout of matches is stable.
pub fn periodic_bytes(seed: u32, period: usize, len: usize) -> Vec<u8> {
    let mut x = seed;
    let block: Vec<u8> = (0..period)
        .map(|_| {
            x = x.wrapping_mul(1103515245).wrapping_add(12345) & 0x7FFF_FFFF;
            (x >> 16) as u8
        })
        .collect();
    block.iter().copied().cycle().take(len).collect()
}

/// Compress and expand `data`, asserting the result is identical. Returns the compressed stream.
pub fn assert_round_trip(data: &[u8], settings: &LzssSettings) -> Vec<u8> {
    let compressed = compress(data, settings).unwrap();
    let expanded = decompress(&compressed, settings).unwrap();

    if expanded.len() != data.len() {
        eprintln!("Length mismatch: expected {} bytes, got {} bytes.", data.len(), expanded.len());
    }
    assert_eq!(compute_slice_hash(data), compute_slice_hash(&expanded));
    compressed
}
