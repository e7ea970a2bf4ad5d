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

//! The block-connect / block-disconnect engine (C4-C6): transactional application of
//! a block's effect on the UTXO set, the consensus checks performed while doing so,
//! and the symmetric undo logic that powers chain reorganizations. Peer-to-peer
//! networking, header-chain selection, script interpretation internals, and on-disk
//! page layout live outside this crate (§1); it exposes only the `ChainEngine`
//! capability a chain selector binds against (§6).

pub mod engine;
pub mod error;
mod verify;

pub use engine::{ChainEngine, UtxoChainEngine};
pub use error::{ConnectError, DisconnectError, PrunedError, ReplayError, VerificationError};
