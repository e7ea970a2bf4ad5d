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

//! Streaming hash used to derive content ids for transactions and blocks.

use sha2::{Digest, Sha256};

/// A streaming hasher that ids are derived from. Kept as a trait so the concrete
/// algorithm can be swapped without touching callers.
pub trait StreamHasher {
    fn new() -> Self;
    fn write(&mut self, bytes: &[u8]);
    fn finalize(self) -> [u8; 32];
}

/// Double-SHA256, matching Bitcoin-style txid/block-hash derivation.
#[derive(Clone)]
pub struct DefaultHashAlgoStream {
    inner: Sha256,
}

impl StreamHasher for DefaultHashAlgoStream {
    fn new() -> Self {
        Self {
            inner: Sha256::new(),
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        self.inner.update(bytes);
    }

    fn finalize(self) -> [u8; 32] {
        let first = self.inner.finalize();
        let second = Sha256::digest(first);
        second.into()
    }
}
