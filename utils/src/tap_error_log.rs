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

//! Log-and-pass-through helper for `Result`s at error boundaries.

/// Adds `.log_err()` to any `Result`, logging the error (via `logging::log::error!`)
/// before returning the `Result` unchanged, so error propagation doesn't require a
/// separate logging statement at every call site.
pub trait LogError<T, E> {
    fn log_err(self) -> Result<T, E>;
}

impl<T, E: std::fmt::Display> LogError<T, E> for Result<T, E> {
    fn log_err(self) -> Result<T, E> {
        if let Err(ref e) = self {
            logging::log::error!("{}", e);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_passes_through_untouched() {
        let r: Result<i32, String> = Ok(5);
        assert_eq!(r.log_err(), Ok(5));
    }

    #[test]
    fn err_is_logged_and_returned() {
        let r: Result<i32, String> = Err("boom".to_string());
        assert_eq!(r.log_err(), Err("boom".to_string()));
    }
}
