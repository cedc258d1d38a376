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

//! Backend-agnostic descriptions of native objects and state.
//!
//! Organized by the kind of native object each type mirrors:
//!
//! - **[`texture`]**: 2D textures and their sampling parameters.
//! - **[`framebuffer`]**: render targets and clear masks.
//! - **[`vertex`]**: vertex buffers (with the push accumulator) and vertex arrays.
//! - **[`shader`]**: shader sources, programs, attributes and primitives.
//! - **[`state`]**: global rasterizer state (blending, culling, depth, ...).

pub mod framebuffer;
pub mod shader;
pub mod state;
pub mod texture;
pub mod vertex;

pub use self::framebuffer::*;
pub use self::shader::*;
pub use self::state::*;
pub use self::texture::*;
pub use self::vertex::*;
