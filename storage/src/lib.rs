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

//! Backend-agnostic transactional key-value abstraction. On-disk page layout is out
//! of scope for this workspace, so the only backend provided is in-memory; the traits
//! are still split from the backend so a persistent backend could be dropped in later
//! without touching callers.

use std::collections::BTreeMap;

/// Read access to a key-value map.
pub trait MapRead<K, V> {
    fn get(&self, key: &K) -> Option<V>;
}

/// Read-write access to a key-value map.
pub trait MapWrite<K, V>: MapRead<K, V> {
    fn put(&mut self, key: K, value: V);
    fn del(&mut self, key: &K);
}

/// A durable (for the lifetime of the process) in-memory backend.
#[derive(Debug)]
pub struct Backend<K, V> {
    data: BTreeMap<K, V>,
}

impl<K: Ord + Clone, V: Clone> Backend<K, V> {
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    /// Start a read-write transaction. Its writes are invisible to the backend, and
    /// to any other in-flight transaction, until `commit()` is called explicitly;
    /// dropping the transaction without committing discards them.
    pub fn transaction_rw(&mut self) -> Transaction<'_, K, V> {
        Transaction {
            backend: self,
            writes: BTreeMap::new(),
            committed: false,
        }
    }
}

impl<K: Ord, V: Clone> MapRead<K, V> for Backend<K, V> {
    fn get(&self, key: &K) -> Option<V> {
        self.data.get(key).cloned()
    }
}

/// A buffered read-write transaction over a [`Backend`]. Acts as the RAII batch
/// guard: `commit()` must be called explicitly to publish the buffered writes;
/// anything else (an early return via `?`, a panic unwind) drops the transaction and
/// its writes vanish, leaving the backend exactly as it was before the transaction
/// began.
pub struct Transaction<'a, K, V> {
    backend: &'a mut Backend<K, V>,
    writes: BTreeMap<K, Option<V>>,
    committed: bool,
}

impl<K: Ord + Clone, V: Clone> MapRead<K, V> for Transaction<'_, K, V> {
    fn get(&self, key: &K) -> Option<V> {
        match self.writes.get(key) {
            Some(Some(v)) => Some(v.clone()),
            Some(None) => None,
            None => self.backend.get(key),
        }
    }
}

impl<K: Ord + Clone, V: Clone> MapWrite<K, V> for Transaction<'_, K, V> {
    fn put(&mut self, key: K, value: V) {
        self.writes.insert(key, Some(value));
    }

    fn del(&mut self, key: &K) {
        self.writes.insert(key.clone(), None);
    }
}

impl<K: Ord + Clone, V: Clone> Transaction<'_, K, V> {
    /// Publish all buffered writes into the backend.
    pub fn commit(mut self) {
        for (key, value) in std::mem::take(&mut self.writes) {
            match value {
                Some(v) => {
                    self.backend.data.insert(key, v);
                }
                None => {
                    self.backend.data.remove(&key);
                }
            }
        }
        self.committed = true;
    }

    /// Explicitly discard the buffered writes. Equivalent to dropping the
    /// transaction, spelled out for call sites that want to be explicit about it.
    pub fn abort(self) {
        drop(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_publishes_writes() {
        let mut backend: Backend<u32, u32> = Backend::new();
        let mut tx = backend.transaction_rw();
        tx.put(1, 100);
        tx.commit();
        assert_eq!(backend.get(&1), Some(100));
    }

    #[test]
    fn drop_without_commit_discards_writes() {
        let mut backend: Backend<u32, u32> = Backend::new();
        {
            let mut tx = backend.transaction_rw();
            tx.put(1, 100);
            // tx dropped here without commit()
        }
        assert_eq!(backend.get(&1), None);
    }

    #[test]
    fn transaction_sees_its_own_writes_before_commit() {
        let mut backend: Backend<u32, u32> = Backend::new();
        let mut tx = backend.transaction_rw();
        tx.put(1, 100);
        assert_eq!(tx.get(&1), Some(100));
        tx.abort();
    }

    #[test]
    fn delete_within_transaction() {
        let mut backend: Backend<u32, u32> = Backend::new();
        let mut tx = backend.transaction_rw();
        tx.put(1, 100);
        tx.commit();

        let mut tx = backend.transaction_rw();
        tx.del(&1);
        assert_eq!(tx.get(&1), None);
        tx.commit();
        assert_eq!(backend.get(&1), None);
    }
}
