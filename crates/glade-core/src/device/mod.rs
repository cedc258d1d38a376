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

//! [`GlDevice`]: every wrapped native call plus its diagnostics.
//!
//! The operations are split by object kind, one `impl` block per module.

mod framebuffer;
mod shader;
mod state;
mod texture;
mod vertex;

use std::borrow::Cow;

use crate::error::ResourceError;
use crate::settings::DiagnosticsSettings;
use crate::traits::NativeGl;

/// Upper bound on error flags drained after a failed call; some drivers keep
/// reporting `ContextLost` forever.
const MAX_DRAINED_ERRORS: usize = 16;

/// Checked access to a native backend.
///
/// Each method performs the native call(s) it names, then applies the
/// [`DiagnosticsSettings`]: poll the native error flag, log the failure,
/// abort if asked to, and otherwise hand the error back to the caller.
#[derive(Debug)]
pub struct GlDevice<G: NativeGl> {
    gl: G,
    settings: DiagnosticsSettings,
}

impl<G: NativeGl> GlDevice<G> {
    /// Wraps a backend with the default (feature-selected) diagnostics.
    pub fn new(gl: G) -> Self {
        Self::with_settings(gl, DiagnosticsSettings::default())
    }

    /// Wraps a backend with explicit diagnostics.
    pub fn with_settings(gl: G, settings: DiagnosticsSettings) -> Self {
        log::debug!("GlDevice: Created with diagnostics {settings:?}");
        Self { gl, settings }
    }

    /// The active diagnostics.
    pub fn settings(&self) -> &DiagnosticsSettings {
        &self.settings
    }

    /// Replaces the diagnostics.
    pub fn set_settings(&mut self, settings: DiagnosticsSettings) {
        self.settings = settings;
    }

    /// The wrapped backend, for calls this crate does not cover.
    pub fn native(&self) -> &G {
        &self.gl
    }

    /// Unwraps the backend.
    pub fn into_native(self) -> G {
        self.gl
    }

    /// Polls the native error flag after `operation`, if checking is enabled.
    pub(crate) fn check(&self, operation: &'static str) -> Result<(), ResourceError> {
        self.check_with(|| Cow::Borrowed(operation))
    }

    /// Like [`check`](Self::check), building the operation name only on failure.
    pub(crate) fn check_with(
        &self,
        operation: impl FnOnce() -> Cow<'static, str>,
    ) -> Result<(), ResourceError> {
        if !self.settings.check_errors {
            return Ok(());
        }
        let Some(kind) = self.gl.get_error() else {
            return Ok(());
        };
        for _ in 0..MAX_DRAINED_ERRORS {
            if self.gl.get_error().is_none() {
                break;
            }
        }
        Err(self.fail(ResourceError::Backend {
            operation: operation(),
            kind,
        }))
    }

    /// Converts `value` to the native signed integer type, reporting
    /// [`ResourceError::ValueOutOfRange`] when it does not fit.
    pub(crate) fn native_int<T>(
        &self,
        parameter: &'static str,
        value: T,
    ) -> Result<i32, ResourceError>
    where
        T: Copy + TryInto<i32> + TryInto<u64>,
    {
        TryInto::<i32>::try_into(value).map_err(|_| {
            self.fail(ResourceError::ValueOutOfRange {
                parameter,
                value: TryInto::<u64>::try_into(value).unwrap_or(u64::MAX),
            })
        })
    }

    /// Reports `err` according to the diagnostics and returns it.
    ///
    /// Warnings are logged at `warn` level and never abort.
    pub(crate) fn fail(&self, err: impl Into<ResourceError>) -> ResourceError {
        let err = err.into();
        let warning = err.is_warning();
        if self.settings.log_errors {
            if warning {
                log::warn!("GlDevice: {err}");
            } else {
                log::error!("GlDevice: {err}");
            }
        }
        if self.settings.abort_on_error && !warning {
            std::process::abort();
        }
        err
    }
}
