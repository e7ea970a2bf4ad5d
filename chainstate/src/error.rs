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

//! Error kinds (§7): `VerificationError` names the consensus rule that was broken,
//! `PrunedError` signals missing undo data distinctly from a genuine storage fault,
//! and `StoreError` (re-exported from `utxo`) is opaque storage trouble. The
//! top-level `ConnectError`/`ReplayError`/`DisconnectError` wrap exactly the subset
//! each operation can raise.

use common::primitives::{BlockHeight, Id};
use common::chain::{Block, Transaction};
use thiserror::Error;
pub use utxo::StoreError;

/// A consensus rule broken while validating a block's transactions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerificationError {
    #[error("block at height {height} disagrees with checkpoint {expected}")]
    CheckpointMismatch {
        height: BlockHeight,
        expected: Id<Block>,
    },
    #[error("transaction {0} duplicates an existing txid with unspent outputs (BIP30)")]
    Bip30Duplicate(Id<Transaction>),
    #[error("input spends an output that does not exist or was already spent")]
    MissingOutput,
    #[error("input spends a coinbase output before it reaches spendable depth")]
    ImmatureCoinbase,
    #[error("input's unlocking script does not satisfy the output's locking script")]
    ScriptError,
    #[error("block exceeds the maximum signature operation budget")]
    SigopsExceeded,
    #[error("transaction output value is negative or exceeds the maximum money supply")]
    ValueOutOfRange,
    #[error("coinbase claims more than the subsidy plus collected fees")]
    FeesOutOfRange,
    #[error("block carries no transactions")]
    MissingTransactions,
}

/// Undo data required for the operation has been pruned from the store.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("undo data for block {0} has been pruned")]
pub struct PrunedError(pub Id<Block>);

/// Internal error shared by the forward-verification routine (§9): not part of the
/// public surface, folded into `ConnectError`/`ReplayError` at the call site.
#[derive(Debug, Error)]
pub(crate) enum VerifyError {
    #[error(transparent)]
    Verification(#[from] VerificationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Everything `connect_transactions` (§4.2) can raise.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error(transparent)]
    Verification(#[from] VerificationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<VerifyError> for ConnectError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::Verification(e) => ConnectError::Verification(e),
            VerifyError::Store(e) => ConnectError::Store(e),
        }
    }
}

/// Everything `connect_transactions_stored` (§4.3) can raise.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Verification(#[from] VerificationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Pruned(#[from] PrunedError),
}

impl From<VerifyError> for ReplayError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::Verification(e) => ReplayError::Verification(e),
            VerifyError::Store(e) => ReplayError::Store(e),
        }
    }
}

/// Everything `disconnect_transactions` (§4.4) can raise.
#[derive(Debug, Error)]
pub enum DisconnectError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Pruned(#[from] PrunedError),
}
