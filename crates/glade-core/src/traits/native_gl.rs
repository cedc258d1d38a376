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

use std::fmt::Debug;

use crate::api::*;
use crate::error::GlErrorKind;

/// The native entry points wrapped by [`GlDevice`](crate::GlDevice).
///
/// Every method maps to a single native call. Implementations must only be
/// constructed while their context is current on the calling thread; the
/// safe methods are then fine to call in any order (the native API
/// reports misuse through [`get_error`](Self::get_error)).
///
/// Array-buffer methods always act on the array-buffer binding point and
/// texture methods on the 2D texture binding point of the active unit.
///
/// # Safety
///
/// [`VertexData`] writes through the pointer returned by
/// [`map_array_buffer_range`](Self::map_array_buffer_range), so implementors
/// must guarantee that:
///
/// - a non-null mapping is valid for reads and writes of `length` bytes until
///   the buffer is unmapped, reallocated or deleted;
/// - [`bound_array_buffer`](Self::bound_array_buffer) reports the buffer the
///   array-buffer methods actually act on;
/// - only the `unsafe` buffer methods below unmap or invalidate a mapping, and
///   only for the buffer they name or the bound one.
pub unsafe trait NativeGl {
    /// Name of a texture object.
    type Texture: Copy + PartialEq + Debug;
    /// Name of a framebuffer object.
    type Framebuffer: Copy + PartialEq + Debug;
    /// Name of a buffer object.
    type Buffer: Copy + PartialEq + Debug;
    /// Name of a vertex array object.
    type VertexArray: Copy + PartialEq + Debug;
    /// Name of a linked program.
    type Program: Copy + PartialEq + Debug;
    /// Name of a single shader stage.
    type Shader: Copy + PartialEq + Debug;
    /// Location of a uniform inside a program.
    type UniformLocation: Clone + Debug;

    /// Pops the oldest pending error flag, or `None` when no error is pending.
    fn get_error(&self) -> Option<GlErrorKind>;

    // --- Textures ---

    /// Generates a texture name.
    fn create_texture(&self) -> Result<Self::Texture, String>;
    /// Deletes a texture.
    fn delete_texture(&self, texture: Self::Texture);
    /// Whether `texture` names a live texture.
    fn is_texture(&self, texture: Self::Texture) -> bool;
    /// Binds (or with `None`, unbinds) the 2D texture of the active unit.
    fn bind_texture(&self, texture: Option<Self::Texture>);
    /// Selects the texture unit subsequent binds apply to.
    fn active_texture(&self, unit: u32);
    /// Sets the wrap mode of the bound texture along one axis.
    fn tex_parameter_wrap(&self, axis: WrapAxis, wrap: TextureWrap);
    /// Sets a filter of the bound texture.
    fn tex_parameter_filter(&self, kind: FilterKind, filter: TextureFilter);
    /// Allocates level 0 of the bound texture, optionally uploading pixels.
    fn tex_image_2d(&self, format: PixelFormat, width: u32, height: u32, data: Option<&[u8]>);
    /// Overwrites a region of level 0 of the bound texture.
    fn tex_sub_image_2d(
        &self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        format: PixelFormat,
        data: &[u8],
    );

    // --- Framebuffers ---

    /// Generates a framebuffer name.
    fn create_framebuffer(&self) -> Result<Self::Framebuffer, String>;
    /// Deletes a framebuffer.
    fn delete_framebuffer(&self, framebuffer: Self::Framebuffer);
    /// Whether `framebuffer` names a live framebuffer.
    fn is_framebuffer(&self, framebuffer: Self::Framebuffer) -> bool;
    /// Binds a framebuffer, or the default one with `None`.
    fn bind_framebuffer(&self, framebuffer: Option<Self::Framebuffer>);
    /// Attaches level 0 of `texture` as color attachment 0 of the bound framebuffer.
    fn framebuffer_texture(&self, texture: Option<Self::Texture>);
    /// Completeness of the bound framebuffer.
    fn check_framebuffer_status(&self) -> FramebufferStatus;
    /// Sets the color used by color clears.
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    /// Sets the value used by depth clears.
    fn clear_depth(&self, depth: f32);
    /// Clears the selected buffers of the bound framebuffer.
    fn clear(&self, mask: ClearMask);

    // --- Buffers ---

    /// Generates a buffer name.
    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    /// Deletes a buffer.
    ///
    /// # Safety
    ///
    /// No [`VertexData`] may still hold a mapping of `buffer`.
    unsafe fn delete_buffer(&self, buffer: Self::Buffer);
    /// Binds (or with `None`, unbinds) the array buffer.
    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>);
    /// The buffer currently bound to the array-buffer target.
    fn bound_array_buffer(&self) -> Option<Self::Buffer>;
    /// Allocates `size` uninitialized bytes for the bound array buffer.
    ///
    /// # Safety
    ///
    /// No [`VertexData`] may still hold a mapping of the bound buffer.
    unsafe fn array_buffer_data_size(&self, size: usize, usage: VertexDataUsage);
    /// Maps a byte range of the bound array buffer. Null on failure, including
    /// when `offset` or `length` exceed what the native API can address.
    fn map_array_buffer_range(&self, offset: usize, length: usize, access: MapAccess) -> *mut u8;
    /// Releases the mapping of the bound array buffer.
    ///
    /// # Safety
    ///
    /// No [`VertexData`] may still hold a mapping of the bound buffer.
    unsafe fn unmap_array_buffer(&self);

    // --- Vertex arrays ---

    /// Generates a vertex array name.
    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    /// Deletes a vertex array.
    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);
    /// Binds (or with `None`, unbinds) a vertex array.
    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>);

    // --- Shaders and programs ---

    /// Creates an empty shader object for `stage`.
    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    /// Replaces the source of a shader.
    fn shader_source(&self, shader: Self::Shader, source: &str);
    /// Compiles a shader.
    fn compile_shader(&self, shader: Self::Shader);
    /// Whether the last compilation succeeded.
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    /// The compiler log of a shader.
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    /// Deletes a shader object.
    fn delete_shader(&self, shader: Self::Shader);
    /// Creates an empty program.
    fn create_program(&self) -> Result<Self::Program, String>;
    /// Attaches a shader to a program.
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    /// Detaches a shader from a program.
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    /// Links a program.
    fn link_program(&self, program: Self::Program);
    /// Whether the last link succeeded.
    fn program_link_status(&self, program: Self::Program) -> bool;
    /// The linker log of a program.
    fn program_info_log(&self, program: Self::Program) -> String;
    /// Deletes a program.
    fn delete_program(&self, program: Self::Program);
    /// Installs a program for rendering, or none with `None`.
    fn use_program(&self, program: Option<Self::Program>);
    /// Location of an active uniform.
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;
    /// Location of an active vertex attribute.
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    /// Sets a `mat4` uniform of the current program from 16 column-major floats.
    fn uniform_matrix_4(&self, location: &Self::UniformLocation, transpose: bool, value: &[f32]);
    /// Sets a `mat3` uniform of the current program from 9 column-major floats.
    fn uniform_matrix_3(&self, location: &Self::UniformLocation, transpose: bool, value: &[f32]);
    /// Sets a `float` uniform.
    fn uniform_f32(&self, location: &Self::UniformLocation, value: f32);
    /// Sets a `float[]` uniform.
    fn uniform_f32_slice(&self, location: &Self::UniformLocation, values: &[f32]);
    /// Sets an `int` (or sampler) uniform.
    fn uniform_i32(&self, location: &Self::UniformLocation, value: i32);
    /// Sets an `int[]` uniform.
    fn uniform_i32_slice(&self, location: &Self::UniformLocation, values: &[i32]);
    /// Sets a `uint` uniform.
    fn uniform_u32(&self, location: &Self::UniformLocation, value: u32);
    /// Sets a `uint[]` uniform.
    fn uniform_u32_slice(&self, location: &Self::UniformLocation, values: &[u32]);
    /// Enables a vertex attribute array.
    fn enable_vertex_attrib_array(&self, location: u32);
    /// Disables a vertex attribute array.
    fn disable_vertex_attrib_array(&self, location: u32);
    /// Describes where an attribute is read from in the bound array buffer.
    fn vertex_attrib_pointer(
        &self,
        location: u32,
        count: i32,
        ty: AttributeType,
        normalize: bool,
        stride: i32,
        offset: i32,
    );
    /// Draws `count` vertices starting at `first`.
    fn draw_arrays(&self, primitive: Primitive, first: i32, count: i32);

    // --- Global state ---

    /// Sets the viewport rectangle.
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    /// Turns a capability on.
    fn enable(&self, capability: Capability);
    /// Turns a capability off.
    fn disable(&self, capability: Capability);
    /// Sets the RGB and alpha blend equations.
    fn blend_equation_separate(&self, rgb: BlendEquation, alpha: BlendEquation);
    /// Sets the blend factors for all channels.
    fn blend_func(&self, source: BlendFactor, destination: BlendFactor);
    /// Sets the blend factors separately for RGB and alpha.
    fn blend_func_separate(
        &self,
        source_rgb: BlendFactor,
        destination_rgb: BlendFactor,
        source_alpha: BlendFactor,
        destination_alpha: BlendFactor,
    );
    /// Sets the constant blend color.
    fn blend_color(&self, r: f32, g: f32, b: f32, a: f32);
    /// Sets the color logic operation.
    fn logic_op(&self, operation: LogicOperation);
    /// Selects the faces culled.
    fn cull_face(&self, mode: CullFaceMode);
    /// Selects the front-facing winding order.
    fn front_face(&self, front_face: FrontFace);
    /// Sets the depth comparison.
    fn depth_func(&self, function: DepthFunction);
    /// Maps normalized device depth to window depth.
    fn depth_range(&self, near: f32, far: f32);
    /// Sets the rasterized point diameter.
    fn point_size(&self, size: f32);
    /// Sets the rasterized line width.
    fn line_width(&self, width: f32);
}
