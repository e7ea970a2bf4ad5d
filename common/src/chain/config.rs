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

use std::collections::BTreeMap;

use crate::chain::block::timestamp::BlockTimestamp;
use crate::primitives::{Amount, BlockHeight, Id, H256};
use crate::chain::Block;

/// Network-wide consensus parameters (C1) plus a network tag. Built once per process
/// and shared by `Arc` rather than threaded through every call as loose constants, so
/// a unit-test configuration with deliberately small constants can exist side by
/// side with a production-shaped one.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    network_name: String,
    max_money: Amount,
    max_block_sigops: u32,
    spendable_coinbase_depth: u32,
    bip16_enforce_time: u32,
    subsidy_halving_interval: u32,
    initial_subsidy: Amount,
    checkpoints: BTreeMap<BlockHeight, Id<Block>>,
}

impl ChainConfig {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        network_name: impl Into<String>,
        max_money: Amount,
        max_block_sigops: u32,
        spendable_coinbase_depth: u32,
        bip16_enforce_time: u32,
        subsidy_halving_interval: u32,
        initial_subsidy: Amount,
        checkpoints: BTreeMap<BlockHeight, Id<Block>>,
    ) -> Self {
        ChainConfig {
            network_name: network_name.into(),
            max_money,
            max_block_sigops,
            spendable_coinbase_depth,
            bip16_enforce_time,
            subsidy_halving_interval,
            initial_subsidy,
            checkpoints,
        }
    }

    /// Mainnet-shaped defaults: Bitcoin's own constants, with no checkpoints
    /// (callers that want checkpoint enforcement supply their own via [`Self::new`]).
    pub fn mainnet() -> Self {
        ChainConfig {
            network_name: "mainnet".to_owned(),
            max_money: Amount::from_atoms(21_000_000 * 100_000_000),
            max_block_sigops: 20_000,
            spendable_coinbase_depth: 100,
            bip16_enforce_time: 1_333_238_400,
            subsidy_halving_interval: 210_000,
            initial_subsidy: Amount::from_atoms(50 * 100_000_000),
            checkpoints: BTreeMap::new(),
        }
    }

    /// A configuration for unit/integration tests: the same shape as [`Self::mainnet`]
    /// but with small constants so maturity and halving can be exercised without
    /// connecting thousands of blocks.
    pub fn for_unit_tests() -> Self {
        ChainConfig {
            network_name: "unit-test".to_owned(),
            max_money: Amount::from_atoms(21_000_000 * 100_000_000),
            max_block_sigops: 20_000,
            spendable_coinbase_depth: 100,
            bip16_enforce_time: 0,
            subsidy_halving_interval: 210_000,
            initial_subsidy: Amount::from_atoms(50 * 100_000_000),
            checkpoints: BTreeMap::new(),
        }
    }

    pub fn network_name(&self) -> &str {
        &self.network_name
    }

    pub fn max_money(&self) -> Amount {
        self.max_money
    }

    pub fn max_block_sigops(&self) -> u32 {
        self.max_block_sigops
    }

    pub fn spendable_coinbase_depth(&self) -> u32 {
        self.spendable_coinbase_depth
    }

    pub fn bip16_enforce_time(&self) -> u32 {
        self.bip16_enforce_time
    }

    pub fn enforce_p2sh(&self, block_time: BlockTimestamp) -> bool {
        block_time.as_int_seconds() >= self.bip16_enforce_time
    }

    /// `subsidy(h) = INITIAL_SUBSIDY >> (h / SUBSIDY_HALVING_INTERVAL)`, saturating to
    /// zero once the shift would be undefined (`h / interval >= 64`), per §9.
    pub fn subsidy(&self, height: BlockHeight) -> Amount {
        let halvings = height.into_int() / self.subsidy_halving_interval;
        if halvings >= 64 {
            return Amount::ZERO;
        }
        Amount::from_atoms(self.initial_subsidy.into_atoms() >> halvings)
    }

    pub fn checkpoint(&self, height: BlockHeight) -> Option<Id<Block>> {
        self.checkpoints.get(&height).copied()
    }

    pub fn is_checkpoint(&self, height: BlockHeight) -> bool {
        self.checkpoints.contains_key(&height)
    }

    /// `passes(height, hash) = checkpoints[height] in {absent, hash}`.
    pub fn passes_checkpoint(&self, height: BlockHeight, hash: Id<Block>) -> bool {
        match self.checkpoint(height) {
            Some(expected) => expected == hash,
            None => true,
        }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 50_0000_0000)]
    #[case(209_999, 50_0000_0000)]
    #[case(210_000, 25_0000_0000)]
    #[case(420_000, 12_5000_0000)]
    #[case(64 * 210_000, 0)]
    #[case(100 * 210_000, 0)]
    fn subsidy_schedule(#[case] height: u32, #[case] expected: u64) {
        let config = ChainConfig::mainnet();
        assert_eq!(
            config.subsidy(BlockHeight::new(height)),
            Amount::from_atoms(expected)
        );
    }

    #[test]
    fn checkpoint_absent_passes_any_hash() {
        let config = ChainConfig::mainnet();
        let id = Id::new(&H256::ZERO);
        assert!(config.passes_checkpoint(BlockHeight::new(1), id));
        assert!(!config.is_checkpoint(BlockHeight::new(1)));
    }

    #[test]
    fn checkpoint_present_rejects_mismatch() {
        let pinned = Id::new(&H256::from([1u8; 32]));
        let mut checkpoints = BTreeMap::new();
        checkpoints.insert(BlockHeight::new(10), pinned);
        let config = ChainConfig::new(
            "test",
            Amount::from_atoms(u64::MAX),
            20_000,
            100,
            0,
            210_000,
            Amount::from_atoms(50_0000_0000),
            checkpoints,
        );
        assert!(config.is_checkpoint(BlockHeight::new(10)));
        assert!(config.passes_checkpoint(BlockHeight::new(10), pinned));
        assert!(!config.passes_checkpoint(BlockHeight::new(10), Id::new(&H256::ZERO)));
    }
}
