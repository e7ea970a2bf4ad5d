// Copyright (c) 2022 RBB S.r.l
// opensource@mintlayer.org
// SPDX-License-Identifier: MIT
// Licensed under the MIT License;
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// 	http://spdx.org/licenses/MIT
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serialization::{Decode, Encode};

/// The position of a block within the chain, counting the genesis block as height 0.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode)]
pub struct BlockHeight(u32);

impl BlockHeight {
    pub const ZERO: BlockHeight = BlockHeight(0);

    pub const fn new(height: u32) -> Self {
        BlockHeight(height)
    }

    pub const fn into_int(self) -> u32 {
        self.0
    }

    /// Number of blocks between `self` and an earlier height, or `None` if `other` is
    /// not actually earlier (the depth of a block below its own height is zero, not
    /// negative).
    pub fn distance_since(self, other: BlockHeight) -> Option<u32> {
        self.0.checked_sub(other.0)
    }

    pub fn next_height(self) -> BlockHeight {
        BlockHeight(self.0 + 1)
    }
}

impl std::fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for BlockHeight {
    fn from(height: u32) -> Self {
        BlockHeight(height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_since_earlier_height() {
        assert_eq!(
            BlockHeight::new(100).distance_since(BlockHeight::new(40)),
            Some(60)
        );
    }

    #[test]
    fn distance_since_later_height_is_none() {
        assert_eq!(BlockHeight::new(10).distance_since(BlockHeight::new(20)), None);
    }

    #[test]
    fn distance_since_self_is_zero() {
        assert_eq!(
            BlockHeight::new(10).distance_since(BlockHeight::new(10)),
            Some(0)
        );
    }
}
