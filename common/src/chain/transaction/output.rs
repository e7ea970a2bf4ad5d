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

use crate::primitives::Amount;

/// A transaction output: a value locked behind a script that a later input's
/// unlocking script must satisfy to spend it.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct TxOutput {
    value: Amount,
    locking_script: Vec<u8>,
}

impl TxOutput {
    pub fn new(value: Amount, locking_script: Vec<u8>) -> Self {
        TxOutput {
            value,
            locking_script,
        }
    }

    pub fn value(&self) -> Amount {
        self.value
    }

    pub fn locking_script(&self) -> &[u8] {
        &self.locking_script
    }
}
