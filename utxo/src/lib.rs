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

//! The UTXO set: its persistent shape, the undo records that let a block's effect be
//! reversed, and the transactional store the connect/disconnect engine drives them
//! through (C2/C3, §3-§4.1).

pub mod batch;
pub mod store;
pub mod stored_output;
pub mod undo;

pub use batch::BatchGuard;
pub use store::{InMemoryUtxoStore, StoreError, UtxosStorageRead, UtxosStorageWrite};
pub use stored_output::StoredOutput;
pub use undo::{BlockHash, StoredBlock, StoredTransaction, StoredUndoableBlock, TxOutputChanges};
