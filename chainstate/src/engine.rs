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

//! The `ChainEngine` capability trait (§6, §9): the seam a generic chain selector
//! binds against instead of inheriting from this engine. `UtxoChainEngine` is the
//! implementation this crate ships, generic over any [`UtxosStorageWrite`] backend.

use std::sync::Arc;

use common::chain::{Block, BlockHeader, ChainConfig};
use common::primitives::{hash_encoded, BlockHeight, H256, Id, Idable};
use utxo::{BatchGuard, BlockHash, StoredBlock, StoredTransaction, StoredUndoableBlock, TxOutputChanges, UtxosStorageWrite};

use crate::error::{ConnectError, DisconnectError, PrunedError, ReplayError};
use crate::verify::verify_transactions;
use utils::tap_error_log::LogError;

fn header_hash(header: &BlockHeader) -> Id<Block> {
    Id::new(&H256::from(hash_encoded(header)))
}

/// The seven hooks a chain selector drives this engine through (§6). Named
/// distinctly per call shape rather than overloaded on argument type, since Rust has
/// no such overloading.
pub trait ChainEngine {
    fn add_to_store_with_undo(
        &mut self,
        prev: &StoredBlock,
        header: BlockHeader,
        delta: TxOutputChanges,
    ) -> Result<StoredBlock, utxo::StoreError>;

    fn add_to_store_full(
        &mut self,
        prev: &StoredBlock,
        block: &Block,
    ) -> Result<StoredBlock, utxo::StoreError>;

    fn should_verify_transactions(&self) -> bool;

    fn connect_transactions(
        &mut self,
        height: BlockHeight,
        block: &Block,
    ) -> Result<TxOutputChanges, ConnectError>;

    fn connect_transactions_stored(
        &mut self,
        stored_block: &StoredBlock,
    ) -> Result<TxOutputChanges, ReplayError>;

    fn disconnect_transactions(&mut self, old_block_hash: BlockHash) -> Result<(), DisconnectError>;

    fn pre_set_chain_head(&mut self) -> Result<(), utxo::StoreError>;

    fn not_setting_chain_head(&mut self);
}

/// The shipped `ChainEngine` implementation: a UTXO store plus the shared chain
/// configuration. Holds no open batch between calls — every hook that mutates the
/// store opens its own [`BatchGuard`], and either commits immediately (the two
/// archive-only hooks) or hands the open batch to the store's own pending state via
/// [`BatchGuard::keep_open`] for `pre_set_chain_head`/`not_setting_chain_head` to
/// later settle (§5, §9).
pub struct UtxoChainEngine<S> {
    store: S,
    config: Arc<ChainConfig>,
}

impl<S: UtxosStorageWrite> UtxoChainEngine<S> {
    pub fn new(store: S, config: Arc<ChainConfig>) -> Self {
        UtxoChainEngine { store, config }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn checkpoint_check(&self, height: BlockHeight, hash: Id<Block>) -> Result<(), crate::error::VerificationError> {
        if !self.config.passes_checkpoint(height, hash) {
            let expected = self
                .config
                .checkpoint(height)
                .expect("passes_checkpoint only fails when a checkpoint is present");
            return Err(crate::error::VerificationError::CheckpointMismatch { height, expected });
        }
        Ok(())
    }
}

impl<S: UtxosStorageWrite> ChainEngine for UtxoChainEngine<S> {
    fn add_to_store_with_undo(
        &mut self,
        prev: &StoredBlock,
        header: BlockHeader,
        delta: TxOutputChanges,
    ) -> Result<StoredBlock, utxo::StoreError> {
        let height = prev.height().next_height();
        let block_hash = header_hash(&header);
        let stored_block = StoredBlock::new(header, height);

        let mut guard = BatchGuard::begin(&mut self.store)?;
        guard
            .store_mut()
            .put_undo(block_hash, stored_block.clone(), StoredUndoableBlock::Pruned { changes: delta });
        guard.commit()?;
        Ok(stored_block)
    }

    fn add_to_store_full(&mut self, prev: &StoredBlock, block: &Block) -> Result<StoredBlock, utxo::StoreError> {
        let height = prev.height().next_height();
        let stored_block = StoredBlock::new(block.header().clone(), height);
        let block_hash = block.get_id();
        let transactions: Vec<StoredTransaction> = block.transactions().to_vec();

        let mut guard = BatchGuard::begin(&mut self.store)?;
        guard
            .store_mut()
            .put_undo(block_hash, stored_block.clone(), StoredUndoableBlock::Full { transactions });
        guard.commit()?;
        Ok(stored_block)
    }

    fn should_verify_transactions(&self) -> bool {
        true
    }

    fn connect_transactions(&mut self, height: BlockHeight, block: &Block) -> Result<TxOutputChanges, ConnectError> {
        let block_hash = block.get_id();
        logging::log::debug!("connecting block {} at height {}", block_hash, height);
        self.connect_transactions_impl(height, block).log_err()
    }

    fn connect_transactions_stored(&mut self, stored_block: &StoredBlock) -> Result<TxOutputChanges, ReplayError> {
        let block_hash = header_hash(stored_block.header());
        logging::log::debug!("replaying stored block {} at height {}", block_hash, stored_block.height());
        self.connect_transactions_stored_impl(stored_block).log_err()
    }

    fn disconnect_transactions(&mut self, old_block_hash: BlockHash) -> Result<(), DisconnectError> {
        logging::log::debug!("disconnecting block {}", old_block_hash);
        self.disconnect_transactions_impl(old_block_hash).log_err()
    }

    fn pre_set_chain_head(&mut self) -> Result<(), utxo::StoreError> {
        self.store.commit_batch()
    }

    fn not_setting_chain_head(&mut self) {
        self.store.abort_batch();
    }
}

impl<S: UtxosStorageWrite> UtxoChainEngine<S> {
    fn connect_transactions_impl(&mut self, height: BlockHeight, block: &Block) -> Result<TxOutputChanges, ConnectError> {
        utils::ensure!(
            !block.transactions().is_empty(),
            crate::error::VerificationError::MissingTransactions
        );

        let block_hash = block.get_id();
        self.checkpoint_check(height, block_hash)?;

        let mut guard = BatchGuard::begin(&mut self.store)?;
        let is_checkpoint = self.config.is_checkpoint(height);
        let changes = verify_transactions(
            guard.store_mut(),
            &self.config,
            height,
            block.header().time(),
            is_checkpoint,
            block.transactions(),
        )?;

        let stored_block = StoredBlock::new(block.header().clone(), height);
        guard.store_mut().put_undo(
            block_hash,
            stored_block,
            StoredUndoableBlock::Pruned { changes: changes.clone() },
        );

        guard.keep_open();
        Ok(changes)
    }

    fn connect_transactions_stored_impl(&mut self, stored_block: &StoredBlock) -> Result<TxOutputChanges, ReplayError> {
        let height = stored_block.height();
        let block_hash = header_hash(stored_block.header());
        self.checkpoint_check(height, block_hash)?;

        let mut guard = BatchGuard::begin(&mut self.store)?;
        let undo = guard.store_mut().get_undo(block_hash).ok_or(PrunedError(block_hash))?;

        let is_checkpoint = self.config.is_checkpoint(height);
        let changes = match undo.transactions() {
            Some(transactions) => {
                let changes = verify_transactions(
                    guard.store_mut(),
                    &self.config,
                    height,
                    stored_block.header().time(),
                    is_checkpoint,
                    transactions,
                )?;
                // The full transaction list has now been re-verified: its delta is
                // known, so the archived record is refreshed to the cheaper Pruned
                // form a later disconnect of this (now active) block can act on.
                guard.store_mut().put_undo(
                    block_hash,
                    stored_block.clone(),
                    StoredUndoableBlock::Pruned { changes: changes.clone() },
                );
                changes
            }
            None => {
                let changes = undo.changes().expect("Pruned variant always carries changes").clone();
                if !is_checkpoint {
                    for out in changes.created() {
                        let exists = guard.store().get_output(out.txid(), out.index()).is_some();
                        utils::ensure!(
                            !exists,
                            ReplayError::Verification(crate::error::VerificationError::Bip30Duplicate(out.txid()))
                        );
                    }
                }
                for out in changes.created() {
                    guard.store_mut().add_unspent_output(out.clone())?;
                }
                for out in changes.spent() {
                    guard.store_mut().remove_unspent_output(out)?;
                }
                changes
            }
        };

        guard.keep_open();
        Ok(changes)
    }

    fn disconnect_transactions_impl(&mut self, old_block_hash: BlockHash) -> Result<(), DisconnectError> {
        let mut guard = BatchGuard::begin(&mut self.store)?;
        let undo = guard.store_mut().get_undo(old_block_hash).ok_or(PrunedError(old_block_hash))?;

        // A `Full` record here means this block was archived but never actually
        // connected/replayed through this engine, so no delta was ever computed for
        // it; that is equivalent to the delta having been pruned away (§4.4 known
        // limitation: disconnect only ever acts on a delta).
        let changes = undo.changes().cloned().ok_or(PrunedError(old_block_hash))?;

        for out in changes.spent() {
            guard.store_mut().add_unspent_output(out.clone())?;
        }
        for out in changes.created() {
            guard.store_mut().remove_unspent_output(out)?;
        }

        guard.keep_open();
        Ok(())
    }
}
