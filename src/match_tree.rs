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

    src/match_tree.rs

    Binary search tree indexing the sliding window.
*/

//! Index-backed Binary Search Tree
//!
//! This is a binary tree tuned for the task of indexing an LZSS window.
//! Every ring position is also a node, so the node value, the index into the link
//! arrays, and the window position it points at are all one and the same.
//!
//! * There are 256 roots, one for each possible leading symbol. They occupy the
//!   reserved slots `N+1 ..= N+256` and only ever use their right link.
//! * Slot `N` is the NIL sentinel. Links to NIL are written through freely, so the
//!   sentinel slot holds garbage and must never be read as a real node.
//! * A position is in the tree iff its parent link is not NIL.

use crate::window::Window;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left = 0,
    Right = 1,
}

/// The longest match found while inserting a position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Match {
    /// number of matching bytes, 0 if the bucket was empty
    pub length: usize,
    /// ring position of the match
    pub position: usize,
}

/// Counters describing the work done by a [`MatchTree`] over its lifetime.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// positions inserted
    pub insertions: u64,
    /// positions removed by an explicit delete (no-op deletes are not counted)
    pub deletions: u64,
    /// insertions that replaced a byte-identical node in place
    pub splices: u64,
    /// nodes compared against across all insertions
    pub visits: u64,
    /// most nodes compared against by a single insertion
    pub max_depth: usize,
}

pub(crate) struct MatchTree {
    /// child links [left, right], each sized to cover the root slots
    down: [Vec<usize>; 2],
    /// parent links, sized to cover ring positions and the NIL slot
    up: Vec<usize>,
    nil: usize,
    stats: TreeStats,
}

impl MatchTree {
    /// Create an empty tree for a ring of `n` positions.
    pub fn create(n: usize) -> Self {
        Self {
            down: [vec![n; n + 257], vec![n; n + 257]],
            up: vec![n; n + 1],
            nil: n,
            stats: TreeStats::default(),
        }
    }

    pub fn stats(&self) -> TreeStats {
        self.stats
    }

    #[inline]
    fn root(&self, symbol: u8) -> usize {
        self.nil + 1 + symbol as usize
    }

    #[inline]
    fn side_of(&self, parent: usize, node: usize) -> Side {
        match self.down[Side::Right as usize][parent] == node {
            true => Side::Right,
            false => Side::Left,
        }
    }

    /// Point whatever linked down to `old` at `new` instead.
    #[inline]
    fn relink_parent(&mut self, old: usize, new: usize) {
        let parent = self.up[old];
        let side = self.side_of(parent, old);
        self.down[side as usize][parent] = new;
    }

    pub fn contains(&self, pos: usize) -> bool {
        self.up[pos] != self.nil
    }

    /// Insert the string of `max_match_length` bytes starting at window position `r`
    /// into the tree for its leading symbol, returning the longest match found along the way.
    ///
    /// If a node matching the full length is found, `r` takes over its place in the tree
    /// and the old node, which would leave the window first, is detached.
    pub fn insert(&mut self, window: &Window, r: usize) -> Match {
        let f = window.max_match_length();
        let mut best = Match::default();
        let mut p = self.root(window.read(r));
        let mut cmp: i32 = 1;
        let mut depth = 0;

        self.down[Side::Left as usize][r] = self.nil;
        self.down[Side::Right as usize][r] = self.nil;
        self.stats.insertions += 1;

        loop {
            let side = match cmp >= 0 {
                true => Side::Right,
                false => Side::Left,
            };
            let next = self.down[side as usize][p];
            if next == self.nil {
                // no further candidates, this position becomes a new leaf
                self.down[side as usize][p] = r;
                self.up[r] = p;
                self.stats.max_depth = self.stats.max_depth.max(depth);
                return best;
            }
            p = next;
            depth += 1;
            self.stats.visits += 1;

            // upon exiting this loop, `i` will have the number of matched symbols,
            // and `cmp` will have the difference in first mismatched symbol values.
            let mut i = 1;
            while i < f {
                cmp = window.read(r + i) as i32 - window.read(p + i) as i32;
                if cmp != 0 {
                    break;
                }
                i += 1;
            }

            if i > best.length {
                best = Match { length: i, position: p };
                if i >= f {
                    break;
                }
            }
        }

        // `p` is byte-identical to `r` over the full lookahead, hand its slot to `r`
        let (left, right) = (self.down[Side::Left as usize][p], self.down[Side::Right as usize][p]);
        self.up[r] = self.up[p];
        self.down[Side::Left as usize][r] = left;
        self.down[Side::Right as usize][r] = right;
        self.up[left] = r;
        self.up[right] = r;
        self.relink_parent(p, r);
        self.up[p] = self.nil;

        self.stats.splices += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        best
    }

    /// Remove position `p` from the tree. Does nothing if `p` is not in the tree.
    pub fn delete(&mut self, p: usize) {
        if !self.contains(p) {
            return;
        }
        let nil = self.nil;
        let (left, right) = (self.down[Side::Left as usize][p], self.down[Side::Right as usize][p]);

        // assemble the node that will replace p
        let replacement = if right == nil {
            left
        } else if left == nil {
            right
        } else {
            // Two branches. The in-order predecessor, the right terminus of the left
            // branch, is brought up to replace p.
            let mut q = left;
            if self.down[Side::Right as usize][q] != nil {
                while self.down[Side::Right as usize][q] != nil {
                    q = self.down[Side::Right as usize][q];
                }
                // a right terminus may still have a left branch; it takes q's former spot
                let q_dad = self.up[q];
                let q_left = self.down[Side::Left as usize][q];
                self.down[Side::Right as usize][q_dad] = q_left;
                self.up[q_left] = q_dad;

                self.down[Side::Left as usize][q] = left;
                self.up[left] = q;
            }
            self.down[Side::Right as usize][q] = right;
            self.up[right] = q;
            q
        };

        self.up[replacement] = self.up[p];
        self.relink_parent(p, replacement);
        self.up[p] = nil;
        self.stats.deletions += 1;
    }
}
