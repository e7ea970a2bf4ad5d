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

pub mod timestamp;

use serialization::{Decode, Encode};

use self::timestamp::BlockTimestamp;
use crate::chain::Transaction;
use crate::primitives::{hash_encoded, Id, Idable, H256};

/// A block header. Header-chain selection (which branch has the most work, how
/// headers are linked and validated against `bits`/`nonce`) lives outside this
/// engine (§1 non-goals); the connect/disconnect engine only reads `time` (for the
/// BIP16 activation gate) and relies on the block's id for checkpoint/undo lookups.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct BlockHeader {
    previous_block_hash: H256,
    merkle_root: H256,
    time: BlockTimestamp,
    bits: u32,
    nonce: u32,
}

impl BlockHeader {
    pub fn new(
        previous_block_hash: H256,
        merkle_root: H256,
        time: BlockTimestamp,
        bits: u32,
        nonce: u32,
    ) -> Self {
        BlockHeader {
            previous_block_hash,
            merkle_root,
            time,
            bits,
            nonce,
        }
    }

    pub fn previous_block_hash(&self) -> H256 {
        self.previous_block_hash
    }

    pub fn merkle_root(&self) -> H256 {
        self.merkle_root
    }

    pub fn time(&self) -> BlockTimestamp {
        self.time
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn nonce(&self) -> u32 {
        self.nonce
    }
}

/// A full block: header plus its ordered transactions. Identified by the hash of its
/// header alone, matching Bitcoin-style block identification.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Block {
    header: BlockHeader,
    transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(header: BlockHeader, transactions: Vec<Transaction>) -> Self {
        Block {
            header,
            transactions,
        }
    }

    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

impl Idable<Block> for Block {
    fn get_id(&self) -> Id<Block> {
        Id::new(&H256::from(hash_encoded(&self.header)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(nonce: u32) -> BlockHeader {
        BlockHeader::new(
            H256::ZERO,
            H256::ZERO,
            BlockTimestamp::from_int_seconds(0),
            0,
            nonce,
        )
    }

    #[test]
    fn block_id_depends_only_on_header() {
        let a = Block::new(header(1), vec![]);
        let b = Block::new(header(1), vec![]);
        assert_eq!(a.get_id(), b.get_id());
    }

    #[test]
    fn different_header_different_id() {
        let a = Block::new(header(1), vec![]);
        let b = Block::new(header(2), vec![]);
        assert_ne!(a.get_id(), b.get_id());
    }
}
