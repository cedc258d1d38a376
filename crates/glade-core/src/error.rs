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

//! Defines the hierarchy of error types returned by the wrapped native calls.

use std::borrow::Cow;
use std::fmt;

use thiserror::Error;

use crate::api::framebuffer::FramebufferStatus;
use crate::api::shader::ShaderStage;

/// An error flag raised by the native API, as reported by its error query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlErrorKind {
    /// An enumeration argument was out of range.
    InvalidEnum,
    /// A numeric argument was out of range.
    InvalidValue,
    /// The operation is not allowed in the current state.
    InvalidOperation,
    /// The bound framebuffer is not complete.
    InvalidFramebufferOperation,
    /// There is not enough memory left to execute the command.
    OutOfMemory,
    /// An internal stack would underflow.
    StackUnderflow,
    /// An internal stack would overflow.
    StackOverflow,
    /// The context was lost (e.g. after a GPU reset).
    ContextLost,
    /// A code this crate does not know about.
    Unknown(u32),
}

impl fmt::Display for GlErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlErrorKind::InvalidEnum => write!(f, "invalid enum"),
            GlErrorKind::InvalidValue => write!(f, "invalid value"),
            GlErrorKind::InvalidOperation => write!(f, "invalid operation"),
            GlErrorKind::InvalidFramebufferOperation => {
                write!(f, "invalid framebuffer operation")
            }
            GlErrorKind::OutOfMemory => write!(f, "out of memory"),
            GlErrorKind::StackUnderflow => write!(f, "stack underflow"),
            GlErrorKind::StackOverflow => write!(f, "stack overflow"),
            GlErrorKind::ContextLost => write!(f, "context lost"),
            GlErrorKind::Unknown(code) => write!(f, "unknown error 0x{code:04X}"),
        }
    }
}

/// The kind of native object an operation was acting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// A 2D texture.
    Texture,
    /// A framebuffer object.
    Framebuffer,
    /// A vertex buffer object.
    Buffer,
    /// A vertex array object.
    VertexArray,
    /// A single shader stage object.
    Shader,
    /// A linked shader program.
    Program,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectKind::Texture => "texture",
            ObjectKind::Framebuffer => "framebuffer",
            ObjectKind::Buffer => "vertex buffer",
            ObjectKind::VertexArray => "vertex array",
            ObjectKind::Shader => "shader",
            ObjectKind::Program => "shader program",
        };
        f.write_str(name)
    }
}

/// An error related to compiling, linking or introspecting a shader program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShaderError {
    /// A stage failed to compile; `log` holds the (truncated) compiler output.
    #[error("{stage} shader failed to compile:\n{log}")]
    Compilation {
        /// The stage that failed.
        stage: ShaderStage,
        /// The compiler info log.
        log: String,
    },
    /// The program failed to link; `log` holds the (truncated) linker output.
    #[error("shader program failed to link:\n{log}")]
    Link {
        /// The linker info log.
        log: String,
    },
    /// The program has no active vertex attribute with this name.
    #[error("shader program has no active attribute named '{name}'")]
    AttributeNotFound {
        /// The requested attribute name.
        name: String,
    },
}

/// An error related to mapping or filling a vertex buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VertexDataError {
    /// The buffer is not the one bound to the array-buffer target.
    #[error("vertex data must be bound to the array-buffer target")]
    NotBound,
    /// The buffer is not currently mapped.
    #[error("vertex data is not mapped")]
    NotMapped,
    /// The buffer is already mapped.
    #[error("vertex data is already mapped")]
    AlreadyMapped,
    /// Neither read nor write access was requested.
    #[error("vertex data cannot be mapped without read or write access")]
    NoAccess,
    /// The native API returned no pointer for the mapping.
    #[error("the native API returned no mapping for vertex data")]
    MapFailed,
    /// The requested range does not fit in the buffer.
    #[error("range {offset}+{length} exceeds vertex data size {size}")]
    RangeOutOfBounds {
        /// Start of the requested range in bytes.
        offset: usize,
        /// Length of the requested range in bytes.
        length: usize,
        /// Allocated size of the buffer in bytes.
        size: usize,
    },
    /// A byte count or offset exceeds what the native API can address.
    #[error("{value} bytes exceed the native vertex data limit of {max}")]
    TooLarge {
        /// The rejected size, offset or length.
        value: usize,
        /// The largest accepted value.
        max: usize,
    },
    /// A push did not fit in the remaining mapped range.
    #[error("not enough space in vertex data: {requested} bytes requested, {available} available")]
    Overflow {
        /// Number of bytes that were pushed.
        requested: usize,
        /// Number of bytes left before the end of the mapped range.
        available: usize,
    },
}

/// An error related to the creation or use of a native object or state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResourceError {
    /// The native error query reported a failure after `operation`.
    #[error("failed to {operation}: {kind}")]
    Backend {
        /// What was being attempted, in imperative form.
        operation: Cow<'static, str>,
        /// The flag reported by the native API.
        kind: GlErrorKind,
    },
    /// The native API refused to generate a new object name.
    #[error("failed to generate {object}: {reason}")]
    CreationFailed {
        /// The kind of object being generated.
        object: ObjectKind,
        /// The reason given by the backend.
        reason: String,
    },
    /// The handle does not name a live object of the expected kind.
    #[error("invalid {object}")]
    InvalidObject {
        /// The kind of object expected.
        object: ObjectKind,
    },
    /// A texture unit index was beyond the supported range.
    #[error("texture unit {index} is out of range (maximum is {max})")]
    TextureUnitOutOfRange {
        /// The requested unit.
        index: u32,
        /// The highest valid unit.
        max: u32,
    },
    /// A clip distance index was beyond the supported range.
    #[error("clip distance {index} is out of range (maximum is {max})")]
    ClipDistanceOutOfRange {
        /// The requested clip plane.
        index: u32,
        /// The highest valid clip plane.
        max: u32,
    },
    /// A numeric argument does not fit the native integer type.
    #[error("{parameter} {value} is out of the native integer range")]
    ValueOutOfRange {
        /// The argument that was rejected.
        parameter: &'static str,
        /// Its value, saturated to `u64`.
        value: u64,
    },
    /// A pixel region holds more bytes than can be addressed.
    #[error("a {width}x{height} pixel region is too large")]
    RegionTooLarge {
        /// Width of the region in pixels.
        width: u32,
        /// Height of the region in pixels.
        height: u32,
    },
    /// The pixel data is shorter than the region it should cover.
    #[error("pixel data holds {actual} bytes but {expected} are required")]
    PixelDataTooShort {
        /// Bytes required by the region.
        expected: usize,
        /// Bytes actually provided.
        actual: usize,
    },
    /// The framebuffer did not reach the complete status.
    #[error("framebuffer is not complete: {0}")]
    FramebufferIncomplete(FramebufferStatus),
    /// A shader-specific error occurred.
    #[error(transparent)]
    Shader(#[from] ShaderError),
    /// A vertex-data-specific error occurred.
    #[error(transparent)]
    VertexData(#[from] VertexDataError),
}

impl ResourceError {
    /// Whether the diagnostics policy treats this as a warning rather than a
    /// hard failure.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            ResourceError::VertexData(VertexDataError::Overflow { .. })
        )
    }
}
