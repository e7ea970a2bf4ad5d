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

use std::marker::PhantomData;

use crypto::hash::{DefaultHashAlgoStream, StreamHasher};
use serialization::{Decode, Encode};

/// A 256-bit opaque identifier, used as the underlying bytes of both transaction ids
/// and block ids.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode)]
pub struct H256([u8; 32]);

impl H256 {
    pub const ZERO: H256 = H256([0u8; 32]);

    pub const fn new(bytes: [u8; 32]) -> Self {
        H256(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for H256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl std::fmt::Display for H256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for H256 {
    fn from(bytes: [u8; 32]) -> Self {
        H256(bytes)
    }
}

/// A content-addressed identifier of a `T` (a transaction or a block). Carries no
/// data of its own beyond the hash; the `PhantomData` only disambiguates at the type
/// level so a transaction id can't be passed where a block id is expected.
#[derive(Encode, Decode)]
pub struct Id<T>(H256, PhantomData<T>);

impl<T> Id<T> {
    pub fn new(hash: &H256) -> Self {
        Id(*hash, PhantomData)
    }

    pub fn hash(&self) -> H256 {
        self.0
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Id<T> {}
impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<T> Eq for Id<T> {}
impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}
impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}
impl<T> std::fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
impl<T> std::fmt::Display for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Implemented by anything that has a content-derived id (transactions, blocks).
pub trait Idable<T> {
    fn get_id(&self) -> Id<T>;
}

/// Feed an `Encode`-able value's bytes into a running hash stream.
pub fn hash_encoded_to<V: serialization::Encode>(value: &V, stream: &mut DefaultHashAlgoStream) {
    stream.write(&value.encode());
}

/// Hash a single `Encode`-able value on its own, yielding the raw 32-byte digest.
pub fn hash_encoded<V: serialization::Encode>(value: &V) -> [u8; 32] {
    let mut stream = DefaultHashAlgoStream::new();
    hash_encoded_to(value, &mut stream);
    stream.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_encoded_is_deterministic() {
        let a = hash_encoded(&42u32);
        let b = hash_encoded(&42u32);
        assert_eq!(a, b);
    }

    #[test]
    fn hash_encoded_differs_for_different_values() {
        assert_ne!(hash_encoded(&1u32), hash_encoded(&2u32));
    }
}
