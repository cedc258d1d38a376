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

//! Global rasterizer state: capabilities, blending, logic ops, culling, depth.

use std::fmt;

/// Number of user clip planes addressable through [`Capability::ClipDistance`].
pub const MAX_CLIP_DISTANCES: u32 = 8;

/// A global switch of the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Blend fragment colors with the framebuffer.
    Blend,
    /// Clip against user clip plane `i`.
    ClipDistance(u32),
    /// Combine fragment colors with a bitwise logic operation.
    ColorLogicOp,
    /// Discard faces selected by the cull face mode.
    CullFace,
    /// Clamp depth instead of clipping against near/far planes.
    DepthClamp,
    /// Compare fragment depth against the depth buffer.
    DepthTest,
    /// Dither colors before writing them.
    Dither,
    /// Antialias lines.
    LineSmooth,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Blend => write!(f, "blending"),
            Capability::ClipDistance(i) => write!(f, "clip distance {i}"),
            Capability::ColorLogicOp => write!(f, "color logic operation"),
            Capability::CullFace => write!(f, "face culling"),
            Capability::DepthClamp => write!(f, "depth clamp"),
            Capability::DepthTest => write!(f, "depth test"),
            Capability::Dither => write!(f, "dithering"),
            Capability::LineSmooth => write!(f, "line smoothing"),
        }
    }
}

/// A multiplier applied to the source or destination color during blending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlendFactor {
    /// `0`
    Zero,
    /// `1`
    One,
    /// `src.rgb`
    SrcColor,
    /// `1 - src.rgb`
    OneMinusSrcColor,
    /// `dst.rgb`
    DstColor,
    /// `1 - dst.rgb`
    OneMinusDstColor,
    /// `src.a`
    SrcAlpha,
    /// `1 - src.a`
    OneMinusSrcAlpha,
    /// `dst.a`
    DstAlpha,
    /// `1 - dst.a`
    OneMinusDstAlpha,
    /// The constant blend color.
    ConstantColor,
    /// One minus the constant blend color.
    OneMinusConstantColor,
    /// The constant blend alpha.
    ConstantAlpha,
    /// One minus the constant blend alpha.
    OneMinusConstantAlpha,
    /// `min(src.a, 1 - dst.a)`
    SrcAlphaSaturate,
    /// Second fragment output color (dual-source blending).
    Src1Color,
    /// One minus the second fragment output color.
    OneMinusSrc1Color,
    /// Second fragment output alpha.
    Src1Alpha,
    /// One minus the second fragment output alpha.
    OneMinusSrc1Alpha,
}

/// How weighted source and destination colors are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlendEquation {
    /// `src + dst`
    Add,
    /// `src - dst`
    Subtract,
    /// `dst - src`
    ReverseSubtract,
    /// `min(src, dst)`
    Min,
    /// `max(src, dst)`
    Max,
}

/// A bitwise operation between the fragment color (`s`) and the framebuffer (`d`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogicOperation {
    /// `0`
    Clear,
    /// `1`
    Set,
    /// `s`
    Copy,
    /// `!s`
    CopyInverted,
    /// `d`
    NoOperation,
    /// `!d`
    Invert,
    /// `s & d`
    And,
    /// `!(s & d)`
    NotAnd,
    /// `s | d`
    Or,
    /// `!(s | d)`
    NotOr,
    /// `s ^ d`
    ExclusiveOr,
    /// `!(s ^ d)`
    Equivalent,
    /// `s & !d`
    AndReverse,
    /// `!s & d`
    AndInverted,
    /// `s | !d`
    OrReverse,
    /// `!s | d`
    OrInverted,
}

/// The faces discarded when face culling is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CullFaceMode {
    /// Cull front-facing polygons.
    Front,
    /// Cull back-facing polygons.
    Back,
    /// Cull every polygon (points and lines still draw).
    FrontAndBack,
}

/// The winding order that makes a polygon front-facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrontFace {
    /// Clockwise.
    Cw,
    /// Counter-clockwise (the native default).
    Ccw,
}

/// The comparison a fragment's depth must pass against the depth buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DepthFunction {
    /// Never passes.
    Never,
    /// Passes if the incoming depth is less than the stored depth.
    Less,
    /// Passes if equal.
    Equal,
    /// Passes if less than or equal.
    LessOrEqual,
    /// Passes if greater.
    Greater,
    /// Passes if not equal.
    NotEqual,
    /// Passes if greater than or equal.
    GreaterOrEqual,
    /// Always passes.
    Always,
}
