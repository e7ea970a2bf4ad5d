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

use super::Transaction;
use crate::primitives::{Id, H256};

/// Identifies a single output of a transaction: which transaction, and which of its
/// outputs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode)]
pub struct OutPoint {
    tx_id: Id<Transaction>,
    output_index: u32,
}

impl OutPoint {
    pub fn new(tx_id: Id<Transaction>, output_index: u32) -> Self {
        OutPoint { tx_id, output_index }
    }

    /// The reserved outpoint a coinbase's single input must carry: an all-zero txid
    /// paired with `u32::MAX`, matching it consumes no real UTXO.
    pub fn null() -> Self {
        OutPoint {
            tx_id: Id::new(&H256::ZERO),
            output_index: u32::MAX,
        }
    }

    pub fn is_null(&self) -> bool {
        *self == Self::null()
    }

    pub fn tx_id(&self) -> Id<Transaction> {
        self.tx_id
    }

    pub fn output_index(&self) -> u32 {
        self.output_index
    }
}

/// A transaction input: the output it spends, plus the unlocking script (scriptSig)
/// that is supposed to satisfy that output's locking script.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct TxInput {
    outpoint: OutPoint,
    unlocking_script: Vec<u8>,
}

impl TxInput {
    pub fn new(outpoint: OutPoint, unlocking_script: Vec<u8>) -> Self {
        TxInput {
            outpoint,
            unlocking_script,
        }
    }

    pub fn outpoint(&self) -> &OutPoint {
        &self.outpoint
    }

    pub fn unlocking_script(&self) -> &[u8] {
        &self.unlocking_script
    }
}
