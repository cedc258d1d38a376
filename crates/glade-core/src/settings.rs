// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Diagnostics policy applied after every wrapped native call.

/// Default cap, in bytes, on compiler and linker logs carried by errors.
pub const DEFAULT_SHADER_LOG_MAX_LENGTH: usize = 1024;

/// Controls how [`GlDevice`](crate::GlDevice) checks and reports failures.
///
/// The [`Default`] value follows the cargo features of this crate
/// (`check-errors`, `log-errors`, `abort-on-error`), so a build can pick its
/// policy once and still override it at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiagnosticsSettings {
    /// Poll the native error flag after each call.
    pub check_errors: bool,
    /// Report failures through the `log` facade.
    pub log_errors: bool,
    /// Abort the process once a hard failure has been reported.
    pub abort_on_error: bool,
    /// Maximum number of bytes kept from shader compiler and linker logs.
    pub shader_log_max_length: usize,
}

impl DiagnosticsSettings {
    /// No checking, no logging, no aborting. Every wrapper is a bare passthrough.
    pub fn unchecked() -> Self {
        Self {
            check_errors: false,
            log_errors: false,
            abort_on_error: false,
            shader_log_max_length: DEFAULT_SHADER_LOG_MAX_LENGTH,
        }
    }

    /// Check and log every call, never abort.
    pub fn verbose() -> Self {
        Self {
            check_errors: true,
            log_errors: true,
            abort_on_error: false,
            shader_log_max_length: DEFAULT_SHADER_LOG_MAX_LENGTH,
        }
    }

    /// Cuts `log` down to at most `shader_log_max_length` bytes on a char boundary.
    pub fn truncate_log(&self, mut log: String) -> String {
        if log.len() > self.shader_log_max_length {
            let mut end = self.shader_log_max_length;
            while !log.is_char_boundary(end) {
                end -= 1;
            }
            log.truncate(end);
        }
        log
    }
}

impl Default for DiagnosticsSettings {
    fn default() -> Self {
        Self {
            check_errors: cfg!(feature = "check-errors"),
            log_errors: cfg!(feature = "log-errors"),
            abort_on_error: cfg!(feature = "abort-on-error"),
            shader_log_max_length: DEFAULT_SHADER_LOG_MAX_LENGTH,
        }
    }
}
