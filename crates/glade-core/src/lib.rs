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

//! # Glade Core
//!
//! Thin, checked wrappers over native OpenGL objects: textures, framebuffers,
//! vertex buffers, vertex arrays, shader programs and global rasterizer state.
//!
//! This crate defines the 'what': typed descriptors, the error hierarchy, the
//! [`NativeGl`] seam listing every native entry point, and [`GlDevice`], which
//! performs each wrapped call followed by the diagnostics configured in
//! [`DiagnosticsSettings`]. The 'how' lives in `glade-infra`, which implements
//! [`NativeGl`] on top of a real OpenGL context.

#![warn(missing_docs)]

pub mod api;
pub mod device;
pub mod error;
pub mod settings;
pub mod traits;

pub use self::api::*;
pub use self::device::GlDevice;
pub use self::error::{GlErrorKind, ObjectKind, ResourceError, ShaderError, VertexDataError};
pub use self::settings::DiagnosticsSettings;
pub use self::traits::NativeGl;
