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


//! Conversions between `glade-core` types and OpenGL enumerants.

use glade_core::{
    AttributeType, BlendEquation, BlendFactor, Capability, ClearMask, CullFaceMode,
    DepthFunction, FilterKind, FramebufferStatus, FrontFace, GlErrorKind, LogicOperation,
    MapAccess, PixelFormat, Primitive, ShaderStage, TextureFilter, TextureWrap,
    VertexDataUsage, WrapAxis,
};

/// A local extension trait to convert our types into OpenGL enumerants.
/// This avoids Rust's orphan rules while keeping an idiomatic `.into_gl()` syntax.
pub trait IntoGl {
    /// Consumes self and converts it into the matching `GLenum` (or bitfield).
    fn into_gl(self) -> u32;
}

// --- Textures ---

impl IntoGl for TextureWrap {
    fn into_gl(self) -> u32 {
        match self {
            TextureWrap::Repeat => glow::REPEAT,
            TextureWrap::ClampToEdge => glow::CLAMP_TO_EDGE,
            TextureWrap::ClampToBorder => glow::CLAMP_TO_BORDER,
            TextureWrap::MirroredRepeat => glow::MIRRORED_REPEAT,
        }
    }
}

impl IntoGl for TextureFilter {
    fn into_gl(self) -> u32 {
        match self {
            TextureFilter::Nearest => glow::NEAREST,
            TextureFilter::Linear => glow::LINEAR,
        }
    }
}

impl IntoGl for WrapAxis {
    fn into_gl(self) -> u32 {
        match self {
            WrapAxis::Horizontal => glow::TEXTURE_WRAP_S,
            WrapAxis::Vertical => glow::TEXTURE_WRAP_T,
        }
    }
}

impl IntoGl for FilterKind {
    fn into_gl(self) -> u32 {
        match self {
            FilterKind::Magnification => glow::TEXTURE_MAG_FILTER,
            FilterKind::Minification => glow::TEXTURE_MIN_FILTER,
        }
    }
}

/// Client-side pixel layout (`format`) of the data uploaded for `format`.
impl IntoGl for PixelFormat {
    fn into_gl(self) -> u32 {
        match self {
            PixelFormat::Rgb => glow::RGB,
            PixelFormat::Rgba => glow::RGBA,
            PixelFormat::Palette => glow::RED,
        }
    }
}

/// Sized internal format used to store textures of `format`.
pub fn internal_format(format: PixelFormat) -> i32 {
    let internal = match format {
        PixelFormat::Rgb => glow::RGB8,
        PixelFormat::Rgba => glow::RGBA8,
        PixelFormat::Palette => glow::R8,
    };
    internal as i32
}

// --- Framebuffers and buffers ---

impl IntoGl for ClearMask {
    fn into_gl(self) -> u32 {
        let mut bits = 0;
        if self.contains(ClearMask::COLOR) {
            bits |= glow::COLOR_BUFFER_BIT;
        }
        if self.contains(ClearMask::DEPTH) {
            bits |= glow::DEPTH_BUFFER_BIT;
        }
        bits
    }
}

impl IntoGl for VertexDataUsage {
    fn into_gl(self) -> u32 {
        match self {
            VertexDataUsage::Static => glow::STATIC_DRAW,
            VertexDataUsage::Dynamic => glow::DYNAMIC_DRAW,
        }
    }
}

impl IntoGl for MapAccess {
    fn into_gl(self) -> u32 {
        let mut bits = 0;
        if self.contains(MapAccess::READ) {
            bits |= glow::MAP_READ_BIT;
        }
        if self.contains(MapAccess::WRITE) {
            bits |= glow::MAP_WRITE_BIT;
        }
        bits
    }
}

// --- Shaders and draws ---

impl IntoGl for ShaderStage {
    fn into_gl(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Geometry => glow::GEOMETRY_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl IntoGl for Primitive {
    fn into_gl(self) -> u32 {
        match self {
            Primitive::Triangles => glow::TRIANGLES,
            Primitive::Lines => glow::LINES,
            Primitive::LineStrip => glow::LINE_STRIP,
            Primitive::Points => glow::POINTS,
        }
    }
}

impl IntoGl for AttributeType {
    fn into_gl(self) -> u32 {
        match self {
            AttributeType::Byte => glow::BYTE,
            AttributeType::UnsignedByte => glow::UNSIGNED_BYTE,
            AttributeType::Short => glow::SHORT,
            AttributeType::UnsignedShort => glow::UNSIGNED_SHORT,
            AttributeType::Int => glow::INT,
            AttributeType::UnsignedInt => glow::UNSIGNED_INT,
            AttributeType::HalfFloat => glow::HALF_FLOAT,
            AttributeType::Float => glow::FLOAT,
            AttributeType::Double => glow::DOUBLE,
        }
    }
}

// --- Rasterizer state ---

impl IntoGl for Capability {
    fn into_gl(self) -> u32 {
        match self {
            Capability::Blend => glow::BLEND,
            Capability::ClipDistance(index) => glow::CLIP_DISTANCE0 + index,
            Capability::ColorLogicOp => glow::COLOR_LOGIC_OP,
            Capability::CullFace => glow::CULL_FACE,
            Capability::DepthClamp => glow::DEPTH_CLAMP,
            Capability::DepthTest => glow::DEPTH_TEST,
            Capability::Dither => glow::DITHER,
            Capability::LineSmooth => glow::LINE_SMOOTH,
        }
    }
}

impl IntoGl for BlendFactor {
    fn into_gl(self) -> u32 {
        match self {
            BlendFactor::Zero => glow::ZERO,
            BlendFactor::One => glow::ONE,
            BlendFactor::SrcColor => glow::SRC_COLOR,
            BlendFactor::OneMinusSrcColor => glow::ONE_MINUS_SRC_COLOR,
            BlendFactor::DstColor => glow::DST_COLOR,
            BlendFactor::OneMinusDstColor => glow::ONE_MINUS_DST_COLOR,
            BlendFactor::SrcAlpha => glow::SRC_ALPHA,
            BlendFactor::OneMinusSrcAlpha => glow::ONE_MINUS_SRC_ALPHA,
            BlendFactor::DstAlpha => glow::DST_ALPHA,
            BlendFactor::OneMinusDstAlpha => glow::ONE_MINUS_DST_ALPHA,
            BlendFactor::ConstantColor => glow::CONSTANT_COLOR,
            BlendFactor::OneMinusConstantColor => glow::ONE_MINUS_CONSTANT_COLOR,
            BlendFactor::ConstantAlpha => glow::CONSTANT_ALPHA,
            BlendFactor::OneMinusConstantAlpha => glow::ONE_MINUS_CONSTANT_ALPHA,
            BlendFactor::SrcAlphaSaturate => glow::SRC_ALPHA_SATURATE,
            BlendFactor::Src1Color => glow::SRC1_COLOR,
            BlendFactor::OneMinusSrc1Color => glow::ONE_MINUS_SRC1_COLOR,
            BlendFactor::Src1Alpha => glow::SRC1_ALPHA,
            BlendFactor::OneMinusSrc1Alpha => glow::ONE_MINUS_SRC1_ALPHA,
        }
    }
}

impl IntoGl for BlendEquation {
    fn into_gl(self) -> u32 {
        match self {
            BlendEquation::Add => glow::FUNC_ADD,
            BlendEquation::Subtract => glow::FUNC_SUBTRACT,
            BlendEquation::ReverseSubtract => glow::FUNC_REVERSE_SUBTRACT,
            BlendEquation::Min => glow::MIN,
            BlendEquation::Max => glow::MAX,
        }
    }
}

impl IntoGl for LogicOperation {
    fn into_gl(self) -> u32 {
        match self {
            LogicOperation::Clear => glow::CLEAR,
            LogicOperation::Set => glow::SET,
            LogicOperation::Copy => glow::COPY,
            LogicOperation::CopyInverted => glow::COPY_INVERTED,
            LogicOperation::NoOperation => glow::NOOP,
            LogicOperation::Invert => glow::INVERT,
            LogicOperation::And => glow::AND,
            LogicOperation::NotAnd => glow::NAND,
            LogicOperation::Or => glow::OR,
            LogicOperation::NotOr => glow::NOR,
            LogicOperation::ExclusiveOr => glow::XOR,
            LogicOperation::Equivalent => glow::EQUIV,
            LogicOperation::AndReverse => glow::AND_REVERSE,
            LogicOperation::AndInverted => glow::AND_INVERTED,
            LogicOperation::OrReverse => glow::OR_REVERSE,
            LogicOperation::OrInverted => glow::OR_INVERTED,
        }
    }
}

impl IntoGl for CullFaceMode {
    fn into_gl(self) -> u32 {
        match self {
            CullFaceMode::Front => glow::FRONT,
            CullFaceMode::Back => glow::BACK,
            CullFaceMode::FrontAndBack => glow::FRONT_AND_BACK,
        }
    }
}

impl IntoGl for FrontFace {
    fn into_gl(self) -> u32 {
        match self {
            FrontFace::Cw => glow::CW,
            FrontFace::Ccw => glow::CCW,
        }
    }
}

impl IntoGl for DepthFunction {
    fn into_gl(self) -> u32 {
        match self {
            DepthFunction::Never => glow::NEVER,
            DepthFunction::Less => glow::LESS,
            DepthFunction::Equal => glow::EQUAL,
            DepthFunction::LessOrEqual => glow::LEQUAL,
            DepthFunction::Greater => glow::GREATER,
            DepthFunction::NotEqual => glow::NOTEQUAL,
            DepthFunction::GreaterOrEqual => glow::GEQUAL,
            DepthFunction::Always => glow::ALWAYS,
        }
    }
}

// --- From OpenGL ---

/// Decodes a `glGetError` result. `NO_ERROR` yields `None`.
pub fn gl_error_kind(code: u32) -> Option<GlErrorKind> {
    let kind = match code {
        glow::NO_ERROR => return None,
        glow::INVALID_ENUM => GlErrorKind::InvalidEnum,
        glow::INVALID_VALUE => GlErrorKind::InvalidValue,
        glow::INVALID_OPERATION => GlErrorKind::InvalidOperation,
        glow::INVALID_FRAMEBUFFER_OPERATION => GlErrorKind::InvalidFramebufferOperation,
        glow::OUT_OF_MEMORY => GlErrorKind::OutOfMemory,
        glow::STACK_UNDERFLOW => GlErrorKind::StackUnderflow,
        glow::STACK_OVERFLOW => GlErrorKind::StackOverflow,
        glow::CONTEXT_LOST => GlErrorKind::ContextLost,
        other => GlErrorKind::Unknown(other),
    };
    Some(kind)
}

/// Decodes a `glCheckFramebufferStatus` result.
pub fn framebuffer_status(code: u32) -> FramebufferStatus {
    match code {
        glow::FRAMEBUFFER_COMPLETE => FramebufferStatus::Complete,
        glow::FRAMEBUFFER_UNDEFINED => FramebufferStatus::Undefined,
        glow::FRAMEBUFFER_INCOMPLETE_ATTACHMENT => FramebufferStatus::IncompleteAttachment,
        glow::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => FramebufferStatus::MissingAttachment,
        glow::FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER => FramebufferStatus::IncompleteDrawBuffer,
        glow::FRAMEBUFFER_INCOMPLETE_READ_BUFFER => FramebufferStatus::IncompleteReadBuffer,
        glow::FRAMEBUFFER_UNSUPPORTED => FramebufferStatus::Unsupported,
        glow::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE => FramebufferStatus::IncompleteMultisample,
        glow::FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS => FramebufferStatus::IncompleteLayerTargets,
        other => FramebufferStatus::Unknown(other),
    }
}
