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

//! End-to-end scenarios, literally as listed in the design document: genesis
//! connect, coinbase maturity, BIP30, over-claiming coinbase, a two-block reorg, and
//! a pruned-reorg replay.

use std::sync::Arc;

use chainstate::{ChainEngine, ConnectError, PrunedError, ReplayError, UtxoChainEngine, VerificationError};
use common::chain::{Block, BlockHeader, BlockTimestamp, ChainConfig, OutPoint, Transaction, TxInput, TxOutput};
use common::primitives::{Amount, BlockHeight, Idable};
use utxo::{InMemoryUtxoStore, StoredBlock, UtxosStorageRead};

const SUBSIDY: u64 = 50_0000_0000;

fn coinbase(value: u64, nonce: u32) -> Transaction {
    Transaction::new(
        vec![TxInput::new(OutPoint::null(), vec![nonce as u8])],
        vec![TxOutput::new(Amount::from_atoms(value), vec![])],
    )
}

fn spend(prev: &Transaction, value: u64) -> Transaction {
    Transaction::new(
        vec![TxInput::new(OutPoint::new(prev.get_id(), 0), vec![])],
        vec![TxOutput::new(Amount::from_atoms(value), vec![])],
    )
}

fn header(nonce: u32) -> BlockHeader {
    BlockHeader::new(common::primitives::H256::ZERO, common::primitives::H256::ZERO, BlockTimestamp::from_int_seconds(0), 0, nonce)
}

fn engine() -> UtxoChainEngine<InMemoryUtxoStore> {
    UtxoChainEngine::new(InMemoryUtxoStore::new(), Arc::new(ChainConfig::for_unit_tests()))
}

#[test]
fn genesis_plus_one() {
    let mut engine = engine();

    let genesis = Block::new(header(0), vec![coinbase(SUBSIDY, 0)]);
    engine.connect_transactions(BlockHeight::new(0), &genesis).unwrap();
    engine.pre_set_chain_head().unwrap();

    let genesis_txid = genesis.transactions()[0].get_id();
    assert!(engine.store().get_output(genesis_txid, 0).is_some());

    let block_one = Block::new(header(1), vec![coinbase(SUBSIDY, 1)]);
    engine.connect_transactions(BlockHeight::new(1), &block_one).unwrap();
    engine.pre_set_chain_head().unwrap();

    assert!(engine.store().get_output(genesis_txid, 0).is_some());
    let one_txid = block_one.transactions()[0].get_id();
    assert!(engine.store().get_output(one_txid, 0).is_some());
}

#[test]
fn spend_of_coinbase_immature() {
    let mut engine = engine();
    let genesis = Block::new(header(0), vec![coinbase(SUBSIDY, 0)]);
    engine.connect_transactions(BlockHeight::new(0), &genesis).unwrap();
    engine.pre_set_chain_head().unwrap();
    let genesis_tx = genesis.transactions()[0].clone();

    let spending_block = Block::new(header(50), vec![coinbase(SUBSIDY, 50), spend(&genesis_tx, SUBSIDY)]);
    let err = engine.connect_transactions(BlockHeight::new(50), &spending_block).unwrap_err();
    assert!(matches!(err, ConnectError::Verification(VerificationError::ImmatureCoinbase)));
    engine.not_setting_chain_head();

    assert!(engine.store().get_output(genesis_tx.get_id(), 0).is_some());
}

#[test]
fn spend_of_coinbase_mature() {
    let mut engine = engine();
    let genesis = Block::new(header(0), vec![coinbase(SUBSIDY, 0)]);
    engine.connect_transactions(BlockHeight::new(0), &genesis).unwrap();
    engine.pre_set_chain_head().unwrap();
    let genesis_tx = genesis.transactions()[0].clone();

    let spending_block = Block::new(header(100), vec![coinbase(SUBSIDY, 100), spend(&genesis_tx, SUBSIDY)]);
    let changes = engine.connect_transactions(BlockHeight::new(100), &spending_block).unwrap();
    engine.pre_set_chain_head().unwrap();

    assert_eq!(changes.spent().len(), 1);
    assert!(engine.store().get_output(genesis_tx.get_id(), 0).is_none());
    let spend_txid = spending_block.transactions()[1].get_id();
    assert!(engine.store().get_output(spend_txid, 0).is_some());
}

#[test]
fn bip30_duplicate_coinbase_rejected() {
    let mut engine = engine();
    let genesis = Block::new(header(0), vec![coinbase(SUBSIDY, 0)]);
    engine.connect_transactions(BlockHeight::new(0), &genesis).unwrap();
    engine.pre_set_chain_head().unwrap();

    // Same nonce => identical coinbase transaction => identical txid, at a
    // non-checkpoint height, while the original output is still unspent.
    let duplicate = Block::new(header(1), vec![coinbase(SUBSIDY, 0)]);
    let err = engine.connect_transactions(BlockHeight::new(1), &duplicate).unwrap_err();
    assert!(matches!(err, ConnectError::Verification(VerificationError::Bip30Duplicate(_))));
    engine.not_setting_chain_head();
}

#[test]
fn over_claim_coinbase_rejected() {
    let mut engine = engine();
    let genesis = Block::new(header(0), vec![coinbase(SUBSIDY + 1, 0)]);

    let err = engine.connect_transactions(BlockHeight::new(0), &genesis).unwrap_err();
    assert!(matches!(err, ConnectError::Verification(VerificationError::FeesOutOfRange)));
    engine.not_setting_chain_head();
}

#[test]
fn reorg_across_two_blocks() {
    let mut engine = engine();

    let block_a = Block::new(header(0), vec![coinbase(SUBSIDY, 0)]);
    engine.connect_transactions(BlockHeight::new(0), &block_a).unwrap();
    engine.pre_set_chain_head().unwrap();

    let block_b = Block::new(header(1), vec![coinbase(SUBSIDY, 1)]);
    engine.connect_transactions(BlockHeight::new(1), &block_b).unwrap();
    engine.pre_set_chain_head().unwrap();

    engine.disconnect_transactions(block_b.get_id()).unwrap();
    engine.pre_set_chain_head().unwrap();
    engine.disconnect_transactions(block_a.get_id()).unwrap();
    engine.pre_set_chain_head().unwrap();

    assert!(engine
        .store()
        .get_output(block_a.transactions()[0].get_id(), 0)
        .is_none());
    assert!(engine
        .store()
        .get_output(block_b.transactions()[0].get_id(), 0)
        .is_none());

    // A sibling of B (same height, different coinbase), archived header-first via the
    // full-transaction side-branch path, then replayed with full re-verification.
    let sibling_b = Block::new(header(3), vec![coinbase(SUBSIDY, 3)]);
    let prev_stored = StoredBlock::new(block_a.header().clone(), BlockHeight::new(0));
    let archived = engine.add_to_store_full(&prev_stored, &sibling_b).unwrap();

    let changes = engine.connect_transactions_stored(&archived).unwrap();
    engine.pre_set_chain_head().unwrap();

    assert_eq!(changes.created().len(), 1);
    assert!(engine
        .store()
        .get_output(sibling_b.transactions()[0].get_id(), 0)
        .is_some());
}

#[test]
fn pruned_reorg_replays_from_delta() {
    let mut engine = engine();
    let prev = StoredBlock::new(header(u32::MAX), BlockHeight::new(u32::MAX - 1));

    let side_block = Block::new(header(7), vec![coinbase(SUBSIDY, 7)]);
    let side_txid = side_block.transactions()[0].get_id();
    let delta = utxo::TxOutputChanges::new(
        vec![utxo::StoredOutput::new(side_txid, 0, Amount::from_atoms(SUBSIDY), vec![], BlockHeight::ZERO, true)],
        vec![],
    );
    let archived = engine
        .add_to_store_with_undo(&prev, side_block.header().clone(), delta.clone())
        .unwrap();

    let changes = engine.connect_transactions_stored(&archived).unwrap();
    engine.pre_set_chain_head().unwrap();
    assert_eq!(changes, delta);
    assert!(engine.store().get_output(side_txid, 0).is_some());
}

#[test]
fn replay_of_unarchived_block_is_a_pruned_error() {
    let mut engine = engine();
    // Never archived via `add_to_store_with_undo`/`add_to_store_full`: the store has
    // no undo record at all for this header, the same observable state as one whose
    // record has been pruned past the reorg horizon.
    let orphan_header = header(99);
    let stored_block = StoredBlock::new(orphan_header, BlockHeight::new(1));

    let err = engine.connect_transactions_stored(&stored_block).unwrap_err();
    assert!(matches!(err, ReplayError::Pruned(PrunedError(_))));

    let block_hash = common::primitives::Id::new(&common::primitives::H256::from(common::primitives::hash_encoded(
        stored_block.header(),
    )));
    let err = engine.disconnect_transactions(block_hash).unwrap_err();
    assert!(matches!(err, chainstate::DisconnectError::Pruned(PrunedError(_))));
}
