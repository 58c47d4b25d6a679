// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// `MovOptions` is the set of options used when parsing a QuickTime movie.
#[derive(Copy, Clone, Debug)]
pub struct MovOptions {
    /// The position of the movie within the stream when the movie is embedded in a larger file.
    /// Subtracted from every chunk offset. Default: `0`.
    pub begin_offset: u32,
    /// Merge adjacent edits that are both empty, or both non-empty, after parsing. Default:
    /// `false`.
    pub flatten_edit_lists: bool,
}

impl Default for MovOptions {
    fn default() -> Self {
        MovOptions { begin_offset: 0, flatten_edit_lists: false }
    }
}
