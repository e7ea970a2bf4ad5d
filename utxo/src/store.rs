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

//! The UTXO store interface (C2, §4.1) and an in-memory implementation of it.
//! On-disk page layout is explicitly out of scope (§1); the traits are still split
//! from the backend so a persistent implementation could be dropped in later without
//! touching the connect/disconnect engine.

use std::collections::BTreeMap;

use common::chain::{OutPoint, Transaction};
use common::primitives::Id;
use storage::{Backend, MapRead, MapWrite};
use thiserror::Error;

use crate::stored_output::StoredOutput;
use crate::undo::{BlockHash, StoredBlock, StoredUndoableBlock};

/// A storage fault: I/O, corruption, or a call that violates the store's own
/// transactional discipline. Opaque to the engine (§7) beyond its message; every
/// occurrence is followed by `abort_batch()` at the call site.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("begin_batch() called while a batch was already open")]
    BatchAlreadyOpen,
    #[error("store operation attempted outside an open batch")]
    NoOpenBatch,
    #[error("duplicate unspent output key ({0:?}, {1})")]
    DuplicateOutput(Id<Transaction>, u32),
}

/// Read access to the current UTXO set and the undo archive, reflecting in-batch
/// writes.
pub trait UtxosStorageRead {
    fn get_output(&self, txid: Id<Transaction>, index: u32) -> Option<StoredOutput>;
    fn has_unspent_outputs(&self, txid: Id<Transaction>, expected_count: u32) -> bool;
    fn get_undo(&self, block_hash: BlockHash) -> Option<StoredUndoableBlock>;
}

/// Mutating access, only valid while a batch is open (§4.1).
pub trait UtxosStorageWrite: UtxosStorageRead {
    fn begin_batch(&mut self) -> Result<(), StoreError>;
    fn commit_batch(&mut self) -> Result<(), StoreError>;
    fn abort_batch(&mut self);

    fn add_unspent_output(&mut self, output: StoredOutput) -> Result<(), StoreError>;
    fn remove_unspent_output(&mut self, output: &StoredOutput) -> Result<(), StoreError>;
    fn put_undo(&mut self, block_hash: BlockHash, stored_block: StoredBlock, undo: StoredUndoableBlock);
}

/// Buffered writes accumulated since `begin_batch()`, not yet visible to anyone but
/// reads issued through the same store (§4.1: "reflecting in-batch writes").
#[derive(Default)]
struct PendingBatch {
    outputs: BTreeMap<OutPoint, Option<StoredOutput>>,
    txid_counts: BTreeMap<Id<Transaction>, i64>,
    undo: BTreeMap<BlockHash, (StoredBlock, StoredUndoableBlock)>,
}

/// An in-memory, process-lifetime UTXO store. Holds the committed state in three
/// [`storage::Backend`]s (outputs, a per-txid unspent-output counter used only for
/// the BIP30 existence check, and the undo archive) plus at most one open
/// [`PendingBatch`] of uncommitted writes.
pub struct InMemoryUtxoStore {
    outputs: Backend<OutPoint, StoredOutput>,
    txid_counts: Backend<Id<Transaction>, i64>,
    undo: Backend<BlockHash, (StoredBlock, StoredUndoableBlock)>,
    pending: Option<PendingBatch>,
}

impl InMemoryUtxoStore {
    pub fn new() -> Self {
        Self {
            outputs: Backend::new(),
            txid_counts: Backend::new(),
            undo: Backend::new(),
            pending: None,
        }
    }

    fn pending_mut(&mut self) -> Result<&mut PendingBatch, StoreError> {
        self.pending.as_mut().ok_or(StoreError::NoOpenBatch)
    }
}

impl UtxosStorageRead for InMemoryUtxoStore {
    fn get_output(&self, txid: Id<Transaction>, index: u32) -> Option<StoredOutput> {
        let outpoint = OutPoint::new(txid, index);
        if let Some(pending) = &self.pending {
            if let Some(overlay) = pending.outputs.get(&outpoint) {
                return overlay.clone();
            }
        }
        self.outputs.get(&outpoint)
    }

    fn has_unspent_outputs(&self, txid: Id<Transaction>, _expected_count: u32) -> bool {
        let base = self.txid_counts.get(&txid).unwrap_or(0);
        let delta = self
            .pending
            .as_ref()
            .and_then(|p| p.txid_counts.get(&txid).copied())
            .unwrap_or(0);
        base + delta > 0
    }

    fn get_undo(&self, block_hash: BlockHash) -> Option<StoredUndoableBlock> {
        if let Some(pending) = &self.pending {
            if let Some((_, undo)) = pending.undo.get(&block_hash) {
                return Some(undo.clone());
            }
        }
        self.undo.get(&block_hash).map(|(_, undo)| undo)
    }
}

impl UtxosStorageWrite for InMemoryUtxoStore {
    fn begin_batch(&mut self) -> Result<(), StoreError> {
        if self.pending.is_some() {
            return Err(StoreError::BatchAlreadyOpen);
        }
        self.pending = Some(PendingBatch::default());
        Ok(())
    }

    fn commit_batch(&mut self) -> Result<(), StoreError> {
        let pending = self.pending.take().ok_or(StoreError::NoOpenBatch)?;
        let mut outputs_tx = self.outputs.transaction_rw();
        for (outpoint, value) in pending.outputs {
            match value {
                Some(output) => outputs_tx.put(outpoint, output),
                None => outputs_tx.del(&outpoint),
            }
        }
        outputs_tx.commit();

        let mut counts_tx = self.txid_counts.transaction_rw();
        for (txid, delta) in pending.txid_counts {
            let updated = counts_tx.get(&txid).unwrap_or(0) + delta;
            counts_tx.put(txid, updated);
        }
        counts_tx.commit();

        let mut undo_tx = self.undo.transaction_rw();
        for (block_hash, entry) in pending.undo {
            undo_tx.put(block_hash, entry);
        }
        undo_tx.commit();

        Ok(())
    }

    fn abort_batch(&mut self) {
        self.pending = None;
    }

    fn add_unspent_output(&mut self, output: StoredOutput) -> Result<(), StoreError> {
        let outpoint = output.outpoint();
        if self.get_output(output.txid(), output.index()).is_some() {
            return Err(StoreError::DuplicateOutput(output.txid(), output.index()));
        }
        let txid = output.txid();
        let pending = self.pending_mut()?;
        pending.outputs.insert(outpoint, Some(output));
        *pending.txid_counts.entry(txid).or_insert(0) += 1;
        Ok(())
    }

    fn remove_unspent_output(&mut self, output: &StoredOutput) -> Result<(), StoreError> {
        let outpoint = output.outpoint();
        let txid = output.txid();
        let pending = self.pending_mut()?;
        pending.outputs.insert(outpoint, None);
        *pending.txid_counts.entry(txid).or_insert(0) -= 1;
        Ok(())
    }

    fn put_undo(&mut self, block_hash: BlockHash, stored_block: StoredBlock, undo: StoredUndoableBlock) {
        if let Ok(pending) = self.pending_mut() {
            pending.undo.insert(block_hash, (stored_block, undo));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::chain::Block;
    use common::chain::BlockHeader;
    use common::chain::BlockTimestamp;
    use common::primitives::{Amount, BlockHeight, H256};

    fn txid(byte: u8) -> Id<Transaction> {
        Id::new(&H256::from([byte; 32]))
    }

    fn output(byte: u8, index: u32) -> StoredOutput {
        StoredOutput::new(
            txid(byte),
            index,
            Amount::from_atoms(1),
            vec![],
            BlockHeight::new(0),
            false,
        )
    }

    #[test]
    fn reads_outside_batch_see_committed_state_only() {
        let mut store = InMemoryUtxoStore::new();
        store.begin_batch().unwrap();
        store.add_unspent_output(output(1, 0)).unwrap();
        assert!(store.get_output(txid(1), 0).is_some());
        store.commit_batch().unwrap();
        assert!(store.get_output(txid(1), 0).is_some());
    }

    #[test]
    fn abort_discards_pending_writes() {
        let mut store = InMemoryUtxoStore::new();
        store.begin_batch().unwrap();
        store.add_unspent_output(output(1, 0)).unwrap();
        store.abort_batch();
        assert!(store.get_output(txid(1), 0).is_none());
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let mut store = InMemoryUtxoStore::new();
        store.begin_batch().unwrap();
        store.add_unspent_output(output(1, 0)).unwrap();
        store.commit_batch().unwrap();

        store.begin_batch().unwrap();
        assert_eq!(
            store.add_unspent_output(output(1, 0)),
            Err(StoreError::DuplicateOutput(txid(1), 0))
        );
    }

    #[test]
    fn has_unspent_outputs_tracks_spends_across_batches() {
        let mut store = InMemoryUtxoStore::new();
        store.begin_batch().unwrap();
        store.add_unspent_output(output(1, 0)).unwrap();
        store.commit_batch().unwrap();
        assert!(store.has_unspent_outputs(txid(1), 1));

        store.begin_batch().unwrap();
        store.remove_unspent_output(&output(1, 0)).unwrap();
        store.commit_batch().unwrap();
        assert!(!store.has_unspent_outputs(txid(1), 1));
    }

    #[test]
    fn put_and_get_undo_round_trips() {
        let mut store = InMemoryUtxoStore::new();
        let header = BlockHeader::new(H256::ZERO, H256::ZERO, BlockTimestamp::from_int_seconds(0), 0, 0);
        let block: Block = Block::new(header, vec![]);
        let hash: BlockHash = common::primitives::Idable::get_id(&block);

        store.begin_batch().unwrap();
        store.put_undo(
            hash,
            StoredBlock::new(block.header().clone(), BlockHeight::new(1)),
            StoredUndoableBlock::Pruned {
                changes: crate::undo::TxOutputChanges::default(),
            },
        );
        store.commit_batch().unwrap();

        assert!(store.get_undo(hash).is_some());
    }
}
