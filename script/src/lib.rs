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

//! Opaque script collaborator. The block-connect engine treats script execution as a
//! pure function it does not implement; this crate is that function's home, not a
//! Bitcoin Script interpreter. Opcode values below are the real Bitcoin ones so the
//! sigop/P2SH-template logic means what it says, but no actual stack machine exists.

const OP_HASH160: u8 = 0xa9;
const OP_EQUAL: u8 = 0x87;
const OP_CHECKSIG: u8 = 0xac;
const OP_CHECKSIGVERIFY: u8 = 0xad;
const OP_CHECKMULTISIG: u8 = 0xae;
const OP_CHECKMULTISIGVERIFY: u8 = 0xaf;
const OP_PUSHDATA1: u8 = 0x4c;
const OP_PUSHDATA2: u8 = 0x4d;
const OP_PUSHDATA4: u8 = 0x4e;

/// Verify that `unlocking` satisfies `locking`. Opaque by design (§4.6 of the design
/// doc): real signature/script verification is out of scope for this engine.
/// `AnyoneCanSpend`-shaped locking scripts (empty) always pass; otherwise the
/// unlocking script must be non-empty.
pub fn verify(unlocking: &[u8], locking: &[u8]) -> bool {
    locking.is_empty() || !unlocking.is_empty()
}

/// Pay-to-Script-Hash template: `OP_HASH160 <20 bytes> OP_EQUAL`.
pub fn is_p2sh(locking: &[u8]) -> bool {
    locking.len() == 23
        && locking[0] == OP_HASH160
        && locking[1] == 0x14
        && locking[22] == OP_EQUAL
}

/// Legacy (non-accurate) sigop count: CHECKMULTISIG(VERIFY) counts as 20, every
/// other CHECKSIG-family opcode counts as 1, matching Bitcoin's original (not the
/// post-segwit accurate) counting rule.
pub fn sig_op_count(script: &[u8]) -> u32 {
    let mut count = 0u32;
    let mut i = 0usize;
    while i < script.len() {
        let op = script[i];
        match op {
            OP_CHECKSIG | OP_CHECKSIGVERIFY => {
                count += 1;
                i += 1;
            }
            OP_CHECKMULTISIG | OP_CHECKMULTISIGVERIFY => {
                count += 20;
                i += 1;
            }
            0x01..=0x4b => i += 1 + op as usize,
            OP_PUSHDATA1 => {
                let len = script.get(i + 1).copied().unwrap_or(0) as usize;
                i += 2 + len;
            }
            OP_PUSHDATA2 => {
                let len = script
                    .get(i + 1..i + 3)
                    .map(|b| u16::from_le_bytes([b[0], b[1]]) as usize)
                    .unwrap_or(0);
                i += 3 + len;
            }
            OP_PUSHDATA4 => {
                let len = script
                    .get(i + 1..i + 5)
                    .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]) as usize)
                    .unwrap_or(0);
                i += 5 + len;
            }
            _ => i += 1,
        }
    }
    count
}

/// Extracts the last pushed data item of a scriptSig (the redeem script, by P2SH
/// convention) and counts sigops within it. Returns 0 if no push is found.
pub fn p2sh_sig_op_count(unlocking: &[u8]) -> u32 {
    let mut last_push: Option<&[u8]> = None;
    let mut i = 0usize;
    while i < unlocking.len() {
        let op = unlocking[i];
        let (len, header) = match op {
            0x01..=0x4b => (op as usize, 1usize),
            OP_PUSHDATA1 => (unlocking.get(i + 1).copied().unwrap_or(0) as usize, 2),
            OP_PUSHDATA2 => (
                unlocking
                    .get(i + 1..i + 3)
                    .map(|b| u16::from_le_bytes([b[0], b[1]]) as usize)
                    .unwrap_or(0),
                3,
            ),
            OP_PUSHDATA4 => (
                unlocking
                    .get(i + 1..i + 5)
                    .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]) as usize)
                    .unwrap_or(0),
                5,
            ),
            _ => {
                i += 1;
                continue;
            }
        };
        let data_start = i + header;
        let data_end = data_start + len;
        if data_end > unlocking.len() {
            break;
        }
        last_push = Some(&unlocking[data_start..data_end]);
        i = data_end;
    }
    last_push.map(sig_op_count).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anyone_can_spend_locking_always_verifies() {
        assert!(verify(&[], &[]));
        assert!(verify(&[1, 2, 3], &[]));
    }

    #[test]
    fn empty_unlocking_fails_nonempty_locking() {
        assert!(!verify(&[], &[OP_CHECKSIG]));
    }

    #[test]
    fn detects_p2sh_template() {
        let mut script = vec![OP_HASH160, 0x14];
        script.extend_from_slice(&[0u8; 20]);
        script.push(OP_EQUAL);
        assert!(is_p2sh(&script));
        assert!(!is_p2sh(&[OP_CHECKSIG]));
    }

    #[test]
    fn counts_checksig_and_multisig() {
        assert_eq!(sig_op_count(&[OP_CHECKSIG]), 1);
        assert_eq!(sig_op_count(&[OP_CHECKMULTISIG]), 20);
        assert_eq!(sig_op_count(&[OP_CHECKSIG, OP_CHECKSIG]), 2);
        assert_eq!(sig_op_count(&[]), 0);
    }

    #[test]
    fn p2sh_sig_op_count_reads_redeem_script() {
        let redeem = vec![OP_CHECKMULTISIG];
        let mut scriptsig = vec![redeem.len() as u8];
        scriptsig.extend_from_slice(&redeem);
        assert_eq!(p2sh_sig_op_count(&scriptsig), 20);
    }
}
