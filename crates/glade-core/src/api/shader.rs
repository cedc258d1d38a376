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

//! Shader sources, program handles, vertex attributes and draw primitives.

use std::fmt;

/// A programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Runs once per vertex.
    Vertex,
    /// Runs once per primitive, between the vertex and fragment stages.
    Geometry,
    /// Runs once per fragment.
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Geometry => write!(f, "geometry"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// GLSL sources for every stage of a program. The geometry stage is optional.
#[derive(Debug, Clone, Copy)]
pub struct ShaderSources<'a> {
    /// Vertex stage source.
    pub vertex: &'a str,
    /// Geometry stage source, if any.
    pub geometry: Option<&'a str>,
    /// Fragment stage source.
    pub fragment: &'a str,
}

impl<'a> ShaderSources<'a> {
    /// Sources for a vertex + fragment program.
    pub fn new(vertex: &'a str, fragment: &'a str) -> Self {
        Self {
            vertex,
            geometry: None,
            fragment,
        }
    }

    /// Adds a geometry stage.
    pub fn with_geometry(mut self, geometry: &'a str) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Every present stage with its source, in pipeline order.
    pub fn stages(&self) -> impl Iterator<Item = (ShaderStage, &'a str)> {
        [
            Some((ShaderStage::Vertex, self.vertex)),
            self.geometry.map(|source| (ShaderStage::Geometry, source)),
            Some((ShaderStage::Fragment, self.fragment)),
        ]
        .into_iter()
        .flatten()
    }
}

/// A live, linked shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shader<P> {
    pub(crate) handle: P,
}

impl<P: Copy> Shader<P> {
    /// The backend handle.
    pub fn handle(&self) -> P {
        self.handle
    }
}

/// How consecutive vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Every three vertices form a triangle.
    Triangles,
    /// Every two vertices form a line.
    Lines,
    /// Vertices form a connected line strip.
    LineStrip,
    /// Every vertex is a point.
    Points,
}

/// Component type of a vertex attribute as stored in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    /// Signed 8-bit integer.
    Byte,
    /// Unsigned 8-bit integer.
    UnsignedByte,
    /// Signed 16-bit integer.
    Short,
    /// Unsigned 16-bit integer.
    UnsignedShort,
    /// Signed 32-bit integer.
    Int,
    /// Unsigned 32-bit integer.
    UnsignedInt,
    /// 16-bit float.
    HalfFloat,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
}

impl AttributeType {
    /// Size of one component in bytes.
    pub fn size_in_bytes(self) -> usize {
        match self {
            AttributeType::Byte | AttributeType::UnsignedByte => 1,
            AttributeType::Short | AttributeType::UnsignedShort | AttributeType::HalfFloat => 2,
            AttributeType::Int | AttributeType::UnsignedInt | AttributeType::Float => 4,
            AttributeType::Double => 8,
        }
    }
}

/// Where and how one vertex attribute is read from the bound vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attribute {
    /// Shader input location.
    pub location: u32,
    /// Component type.
    pub ty: AttributeType,
    /// Number of components (1 to 4).
    pub count: u32,
    /// Map integer components to `[0, 1]` / `[-1, 1]`.
    pub normalize: bool,
    /// Byte distance between consecutive vertices (0 means tightly packed).
    pub stride: usize,
    /// Byte offset of the first component in the buffer.
    pub offset: usize,
}

impl Attribute {
    /// A non-normalized float attribute.
    pub fn float(location: u32, count: u32, stride: usize, offset: usize) -> Self {
        Self {
            location,
            ty: AttributeType::Float,
            count,
            normalize: false,
            stride,
            offset,
        }
    }

    /// Size of one attribute value in bytes.
    pub fn size_in_bytes(&self) -> usize {
        self.ty.size_in_bytes() * self.count as usize
    }
}
