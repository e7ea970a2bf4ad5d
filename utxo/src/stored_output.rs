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

use common::chain::Transaction;
use common::primitives::{Amount, BlockHeight, Id};
use serialization::{Decode, Encode};

/// The persistent form of a transaction output (§3): everything the UTXO set needs
/// to remember about it once the transaction that created it is no longer kept
/// around in full. Round-trips bit-for-bit through undo records (§8 property 1).
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct StoredOutput {
    txid: Id<Transaction>,
    index: u32,
    value: Amount,
    script: Vec<u8>,
    height: BlockHeight,
    is_coinbase: bool,
}

impl StoredOutput {
    pub fn new(
        txid: Id<Transaction>,
        index: u32,
        value: Amount,
        script: Vec<u8>,
        height: BlockHeight,
        is_coinbase: bool,
    ) -> Self {
        StoredOutput {
            txid,
            index,
            value,
            script,
            height,
            is_coinbase,
        }
    }

    pub fn txid(&self) -> Id<Transaction> {
        self.txid
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn value(&self) -> Amount {
        self.value
    }

    pub fn script(&self) -> &[u8] {
        &self.script
    }

    pub fn height(&self) -> BlockHeight {
        self.height
    }

    pub fn is_coinbase(&self) -> bool {
        self.is_coinbase
    }

    pub fn outpoint(&self) -> common::chain::OutPoint {
        common::chain::OutPoint::new(self.txid, self.index)
    }
}
