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

pub mod tap_error_log;

/// Like `assert!`, but returns `Err(err)` from the enclosing function instead of panicking.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn ensure_passes_through_ok() {
        fn check(x: i32) -> Result<(), String> {
            ensure!(x > 0, "not positive".to_string());
            Ok(())
        }
        assert!(check(1).is_ok());
        assert_eq!(check(-1), Err("not positive".to_string()));
    }
}
