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

//! The batch guard (§4.1, §6 hook sequence): every connect/replay/disconnect call
//! opens one batch and must either commit or abandon it before the store is touched
//! again. Modeled as an RAII guard rather than a raw `begin_batch`/`commit_batch` pair
//! so an early return via `?` can't leave a batch open by accident.

use crate::store::{StoreError, UtxosStorageWrite};

/// Borrows a store for the lifetime of one connect/replay/disconnect call. Opens a
/// batch on construction; aborts it on drop unless [`BatchGuard::keep_open`] has been
/// called, which is how the engine hands a committed batch over to the chain
/// selector's `pre_set_chain_head`/`not_setting_chain_head` hooks (§6) without this
/// guard itself having to outlive the call that created it.
pub struct BatchGuard<'a, S: UtxosStorageWrite> {
    store: &'a mut S,
    armed: bool,
}

impl<'a, S: UtxosStorageWrite> BatchGuard<'a, S> {
    pub fn begin(store: &'a mut S) -> Result<Self, StoreError> {
        store.begin_batch()?;
        Ok(BatchGuard { store, armed: false })
    }

    pub fn store(&self) -> &S {
        self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        self.store
    }

    /// Publish the batch immediately and consume the guard.
    pub fn commit(mut self) -> Result<(), StoreError> {
        self.armed = true;
        self.store.commit_batch()
    }

    /// Leave the batch open and consume the guard without aborting it. The caller
    /// takes over responsibility for eventually committing or aborting through the
    /// store directly (used when a later, separate hook decides the batch's fate).
    pub fn keep_open(mut self) {
        self.armed = true;
    }
}

impl<S: UtxosStorageWrite> Drop for BatchGuard<'_, S> {
    fn drop(&mut self) {
        if !self.armed {
            self.store.abort_batch();
        }
    }
}
