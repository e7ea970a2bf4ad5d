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

//! The forward-verification routine shared by block-connect (§4.2 steps 4-8) and
//! reorg replay's re-verify path (§4.3 step 4), factored once per §9 rather than
//! duplicated between the two call sites.

use common::chain::{BlockTimestamp, ChainConfig, Transaction};
use common::primitives::{Amount, BlockHeight, Idable};
use utils::ensure;
use utxo::{StoredOutput, TxOutputChanges, UtxosStorageWrite};

use crate::error::{VerificationError, VerifyError};

/// Applies `transactions` to `store` in block order, performing every consensus
/// check from §4.2 steps 4-8, and returns the resulting undo delta. `is_checkpoint`
/// grandfathers the block out of the BIP30 duplicate-coinbase check (§4.2 step 5).
pub(crate) fn verify_transactions<S: UtxosStorageWrite>(
    store: &mut S,
    config: &ChainConfig,
    height: BlockHeight,
    block_time: BlockTimestamp,
    is_checkpoint: bool,
    transactions: &[Transaction],
) -> Result<TxOutputChanges, VerifyError> {
    ensure!(!transactions.is_empty(), VerificationError::MissingTransactions);

    let enforce_p2sh = config.enforce_p2sh(block_time);
    let mut sig_ops: u32 = 0;
    let mut created = Vec::new();
    let mut spent = Vec::new();
    let mut total_fees = Amount::ZERO;
    let mut coinbase_value = Amount::ZERO;

    if !is_checkpoint {
        for tx in transactions {
            let tx_id = tx.get_id();
            ensure!(
                !store.has_unspent_outputs(tx_id, tx.outputs().len() as u32),
                VerificationError::Bip30Duplicate(tx_id)
            );
        }
    }

    for (tx_index, tx) in transactions.iter().enumerate() {
        let is_coinbase = tx_index == 0;
        let tx_id = tx.get_id();

        let mut value_in = Amount::ZERO;
        if !is_coinbase {
            if enforce_p2sh {
                sig_ops += tx.sig_op_count();
                ensure!(sig_ops <= config.max_block_sigops(), VerificationError::SigopsExceeded);
            }

            for input in tx.inputs() {
                let outpoint = input.outpoint();
                let prev = store
                    .get_output(outpoint.tx_id(), outpoint.output_index())
                    .ok_or(VerificationError::MissingOutput)?;

                if prev.is_coinbase() {
                    let depth = height.distance_since(prev.height()).unwrap_or(0);
                    ensure!(
                        depth >= config.spendable_coinbase_depth(),
                        VerificationError::ImmatureCoinbase
                    );
                }

                value_in = value_in
                    .checked_add(prev.value())
                    .ok_or(VerificationError::ValueOutOfRange)?;

                if enforce_p2sh && script::is_p2sh(prev.script()) {
                    sig_ops += script::p2sh_sig_op_count(input.unlocking_script());
                    ensure!(sig_ops <= config.max_block_sigops(), VerificationError::SigopsExceeded);
                }

                ensure!(
                    script::verify(input.unlocking_script(), prev.script()),
                    VerificationError::ScriptError
                );

                store.remove_unspent_output(&prev)?;
                spent.push(prev);
            }
        }

        let mut value_out = Amount::ZERO;
        for (out_index, out) in tx.outputs().iter().enumerate() {
            value_out = value_out
                .checked_add(out.value())
                .ok_or(VerificationError::ValueOutOfRange)?;
            let stored = StoredOutput::new(
                tx_id,
                out_index as u32,
                out.value(),
                out.locking_script().to_vec(),
                height,
                is_coinbase,
            );
            store.add_unspent_output(stored.clone())?;
            created.push(stored);
        }
        ensure!(value_out <= config.max_money(), VerificationError::ValueOutOfRange);

        if is_coinbase {
            coinbase_value = value_out;
        } else {
            ensure!(value_in >= value_out, VerificationError::ValueOutOfRange);
            ensure!(value_in <= config.max_money(), VerificationError::ValueOutOfRange);
            let fee = value_in
                .checked_sub(value_out)
                .ok_or(VerificationError::ValueOutOfRange)?;
            total_fees = total_fees.checked_add(fee).ok_or(VerificationError::FeesOutOfRange)?;
        }
    }

    ensure!(total_fees <= config.max_money(), VerificationError::FeesOutOfRange);
    let subsidy = config.subsidy(height);
    let allowed = subsidy
        .checked_add(total_fees)
        .ok_or(VerificationError::FeesOutOfRange)?;
    ensure!(coinbase_value <= allowed, VerificationError::FeesOutOfRange);

    Ok(TxOutputChanges::new(created, spent))
}
