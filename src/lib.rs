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

//! Facade crate: re-exports the public surface of the connector so a caller depends
//! on `utxo-connector` alone rather than reaching into `chainstate`/`utxo` directly.

pub use chainstate::{
    ChainEngine, ConnectError, DisconnectError, PrunedError, ReplayError, UtxoChainEngine,
    VerificationError,
};
pub use common::chain::ChainConfig;
pub use storage::{Backend, MapRead, MapWrite, Transaction};
pub use utxo::{
    BatchGuard, BlockHash, InMemoryUtxoStore, StoreError, StoredBlock, StoredOutput,
    StoredTransaction, StoredUndoableBlock, TxOutputChanges, UtxosStorageRead, UtxosStorageWrite,
};

/// Installs the process-wide logging subscriber. Safe to call more than once.
pub fn init_logging() {
    logging::init();
}
