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

use common::chain::{Block, BlockHeader};
use common::primitives::{BlockHeight, Id};
use serialization::{Decode, Encode};

use crate::stored_output::StoredOutput;

/// Same content as [`common::chain::Transaction`] (§3): the distinction exists
/// because a stored transaction is always read back alongside the height of the
/// block that created it (carried on [`StoredUndoableBlock::Full`], not per
/// transaction), not because its own shape differs.
pub type StoredTransaction = common::chain::Transaction;

/// An undo delta (§3): outputs a block created and outputs it spent, in no
/// particular order. Replaying `created` as inserts and `spent` as removals over
/// the pre-block UTXO set reproduces the post-block set; the inverse reverses it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Encode, Decode)]
pub struct TxOutputChanges {
    created: Vec<StoredOutput>,
    spent: Vec<StoredOutput>,
}

impl TxOutputChanges {
    pub fn new(created: Vec<StoredOutput>, spent: Vec<StoredOutput>) -> Self {
        TxOutputChanges { created, spent }
    }

    pub fn created(&self) -> &[StoredOutput] {
        &self.created
    }

    pub fn spent(&self) -> &[StoredOutput] {
        &self.spent
    }
}

/// Header, height and (eventually) cumulative work of a block, as maintained by the
/// header chain (out of scope here, §1) and handed to this engine by the chain
/// selector when it archives a block's undo record.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct StoredBlock {
    header: BlockHeader,
    height: BlockHeight,
}

impl StoredBlock {
    pub fn new(header: BlockHeader, height: BlockHeight) -> Self {
        StoredBlock { header, height }
    }

    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn height(&self) -> BlockHeight {
        self.height
    }
}

/// The undoable record kept for a block (§3, resolved open question §9): either the
/// full transaction list (recent blocks, enabling re-verification on replay) or only
/// the delta (pruned blocks, trusted as-is on replay). Modeled as an exclusive
/// two-variant enum rather than an optional-field struct so a store cannot represent
/// "both" or "neither" by accident.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub enum StoredUndoableBlock {
    #[codec(index = 0)]
    Full { transactions: Vec<StoredTransaction> },
    #[codec(index = 1)]
    Pruned { changes: TxOutputChanges },
}

impl StoredUndoableBlock {
    pub fn transactions(&self) -> Option<&[StoredTransaction]> {
        match self {
            StoredUndoableBlock::Full { transactions } => Some(transactions),
            StoredUndoableBlock::Pruned { .. } => None,
        }
    }

    pub fn changes(&self) -> Option<&TxOutputChanges> {
        match self {
            StoredUndoableBlock::Full { .. } => None,
            StoredUndoableBlock::Pruned { changes } => Some(changes),
        }
    }
}

/// A block hash, used to key undo records. A thin alias so call sites read `BlockHash`
/// rather than the more general `Id<Block>`.
pub type BlockHash = Id<Block>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pruned_variant_exposes_changes_not_transactions() {
        let block = StoredUndoableBlock::Pruned {
            changes: TxOutputChanges::default(),
        };
        assert!(block.transactions().is_none());
        assert!(block.changes().is_some());
    }

    #[test]
    fn full_variant_exposes_transactions_not_changes() {
        let block = StoredUndoableBlock::Full {
            transactions: vec![],
        };
        assert!(block.transactions().is_some());
        assert!(block.changes().is_none());
    }
}
