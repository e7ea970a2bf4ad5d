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

pub mod input;
pub mod output;

pub use input::{OutPoint, TxInput};
pub use output::TxOutput;
use serialization::{Decode, Encode};

use crate::primitives::{hash_encoded, Id, Idable, H256};

/// A transaction as delivered in a candidate block: ordered inputs and ordered
/// outputs. A transaction is a *coinbase* iff it is the first transaction of its
/// block; that is a property of where a transaction sits, not of the type itself,
/// so it is never stored as a flag on `Transaction` — callers determine it from
/// position in the block.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Transaction {
    inputs: Vec<TxInput>,
    outputs: Vec<TxOutput>,
}

impl Transaction {
    pub fn new(inputs: Vec<TxInput>, outputs: Vec<TxOutput>) -> Self {
        Transaction { inputs, outputs }
    }

    pub fn inputs(&self) -> &[TxInput] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[TxOutput] {
        &self.outputs
    }

    /// Intrinsic (non-P2SH-redeem) signature operation count: every CHECKSIG/
    /// CHECKMULTISIG family opcode across this transaction's scriptSigs and
    /// scriptPubKeys, counted the legacy (pre-P2SH-redeem) way.
    pub fn sig_op_count(&self) -> u32 {
        let inputs: u32 =
            self.inputs.iter().map(|i| script::sig_op_count(i.unlocking_script())).sum();
        let outputs: u32 =
            self.outputs.iter().map(|o| script::sig_op_count(o.locking_script())).sum();
        inputs + outputs
    }
}

impl Idable<Transaction> for Transaction {
    fn get_id(&self) -> Id<Transaction> {
        Id::new(&H256::from(hash_encoded(self)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(value: u64) -> TxOutput {
        TxOutput::new(crate::primitives::Amount::from_atoms(value), vec![])
    }

    #[test]
    fn id_is_stable_and_content_dependent() {
        let a = Transaction::new(vec![TxInput::new(OutPoint::null(), vec![])], vec![output(5)]);
        let b = Transaction::new(vec![TxInput::new(OutPoint::null(), vec![])], vec![output(5)]);
        let c = Transaction::new(vec![TxInput::new(OutPoint::null(), vec![])], vec![output(6)]);
        assert_eq!(a.get_id(), b.get_id());
        assert_ne!(a.get_id(), c.get_id());
    }
}
