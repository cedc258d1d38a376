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


//! [`NativeGl`] over a `glow` context.
//!
//! Every method forwards to one `glow::HasContext` call. The context must be
//! current on the calling thread, which [`GlowBackend::from_context`] makes
//! the caller promise once instead of at each call site.

use std::ffi::{c_void, CStr};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use glow::HasContext;

use glade_core::{
    AttributeType, BlendEquation, BlendFactor, Capability, ClearMask, CullFaceMode,
    DepthFunction, FilterKind, FramebufferStatus, FrontFace, GlErrorKind, LogicOperation,
    MapAccess, NativeGl, PixelFormat, Primitive, ShaderStage, TextureFilter, TextureWrap,
    VertexDataUsage, WrapAxis,
};

use super::conversions::{framebuffer_status, gl_error_kind, internal_format, IntoGl};

type LogicOpFn = unsafe extern "system" fn(u32);
type PointSizeFn = unsafe extern "system" fn(f32);

/// Compatibility-profile entry points `glow` does not expose.
#[derive(Debug, Default, Clone, Copy)]
struct LegacyEntryPoints {
    logic_op: Option<LogicOpFn>,
    point_size: Option<PointSizeFn>,
}

impl LegacyEntryPoints {
    /// # Safety
    ///
    /// `loader` must resolve symbols of the context the pointers will be
    /// called on.
    unsafe fn load(loader: &dyn Fn(&CStr) -> *const c_void) -> Self {
        let logic_op = loader(c"glLogicOp");
        let point_size = loader(c"glPointSize");
        Self {
            logic_op: (!logic_op.is_null())
                .then(|| std::mem::transmute::<*const c_void, LogicOpFn>(logic_op)),
            point_size: (!point_size.is_null())
                .then(|| std::mem::transmute::<*const c_void, PointSizeFn>(point_size)),
        }
    }
}

/// An OpenGL context driven through `glow`.
pub struct GlowBackend {
    gl: Arc<glow::Context>,
    legacy: LegacyEntryPoints,
    // Error raised by the backend itself, reported before the context's own.
    pending_error: AtomicU32,
}

impl std::fmt::Debug for GlowBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlowBackend")
            .field("legacy", &self.legacy)
            .finish_non_exhaustive()
    }
}

impl GlowBackend {
    /// Wraps a shared `glow` context.
    ///
    /// `get_proc_address` resolves the entry points `glow` lacks
    /// (`glLogicOp`, `glPointSize`); without it those calls fail with
    /// [`GlErrorKind::InvalidOperation`].
    ///
    /// # Safety
    ///
    /// `gl` must be the current context of the thread calling any method of
    /// the returned backend, and `get_proc_address` must belong to it.
    pub unsafe fn from_context(
        gl: Arc<glow::Context>,
        get_proc_address: Option<&dyn Fn(&CStr) -> *const c_void>,
    ) -> Self {
        let legacy = get_proc_address
            .map(|loader| LegacyEntryPoints::load(loader))
            .unwrap_or_default();
        let version = gl.version();
        log::info!(
            "GlowBackend: OpenGL {}.{} ({}), logic op: {}, point size: {}",
            version.major,
            version.minor,
            if version.is_embedded { "ES" } else { "desktop" },
            legacy.logic_op.is_some(),
            legacy.point_size.is_some(),
        );
        Self {
            gl,
            legacy,
            pending_error: AtomicU32::new(glow::NO_ERROR),
        }
    }

    /// The wrapped context.
    pub fn context(&self) -> &Arc<glow::Context> {
        &self.gl
    }

    /// Converts a size to the native `GLint`/`GLsizei`, raising
    /// `INVALID_VALUE` and returning `None` when it does not fit.
    fn gl_int<T: TryInto<i32>>(&self, value: T) -> Option<i32> {
        let converted = value.try_into().ok();
        if converted.is_none() {
            self.pending_error.store(glow::INVALID_VALUE, Ordering::Relaxed);
        }
        converted
    }

    fn missing_entry_point(&self, name: &str) {
        log::warn!("GlowBackend: {name} is not available in this context");
        self.pending_error
            .store(glow::INVALID_OPERATION, Ordering::Relaxed);
    }
}

// SAFETY: `map_buffer_range` pointers stay valid until the driver unmaps,
// orphans or deletes the buffer, which only the `unsafe` methods do.
// Oversized ranges are refused before reaching the driver.
unsafe impl NativeGl for GlowBackend {
    type Texture = glow::Texture;
    type Framebuffer = glow::Framebuffer;
    type Buffer = glow::Buffer;
    type VertexArray = glow::VertexArray;
    type Program = glow::Program;
    type Shader = glow::Shader;
    type UniformLocation = glow::UniformLocation;

    fn get_error(&self) -> Option<GlErrorKind> {
        let pending = self.pending_error.swap(glow::NO_ERROR, Ordering::Relaxed);
        if pending != glow::NO_ERROR {
            return gl_error_kind(pending);
        }
        gl_error_kind(unsafe { self.gl.get_error() })
    }

    // --- Textures ---

    fn create_texture(&self) -> Result<glow::Texture, String> {
        unsafe { self.gl.create_texture() }
    }

    fn delete_texture(&self, texture: glow::Texture) {
        unsafe { self.gl.delete_texture(texture) }
    }

    fn is_texture(&self, texture: glow::Texture) -> bool {
        unsafe { self.gl.is_texture(texture) }
    }

    fn bind_texture(&self, texture: Option<glow::Texture>) {
        unsafe { self.gl.bind_texture(glow::TEXTURE_2D, texture) }
    }

    fn active_texture(&self, unit: u32) {
        unsafe { self.gl.active_texture(glow::TEXTURE0 + unit) }
    }

    fn tex_parameter_wrap(&self, axis: WrapAxis, wrap: TextureWrap) {
        unsafe {
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, axis.into_gl(), wrap.into_gl() as i32)
        }
    }

    fn tex_parameter_filter(&self, kind: FilterKind, filter: TextureFilter) {
        unsafe {
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, kind.into_gl(), filter.into_gl() as i32)
        }
    }

    fn tex_image_2d(&self, format: PixelFormat, width: u32, height: u32, data: Option<&[u8]>) {
        let (Some(width), Some(height)) = (self.gl_int(width), self.gl_int(height)) else {
            return;
        };
        unsafe {
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                internal_format(format),
                width,
                height,
                0,
                format.into_gl(),
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(data),
            )
        }
    }

    fn tex_sub_image_2d(
        &self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        format: PixelFormat,
        data: &[u8],
    ) {
        let (Some(width), Some(height)) = (self.gl_int(width), self.gl_int(height)) else {
            return;
        };
        unsafe {
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            self.gl.tex_sub_image_2d(
                glow::TEXTURE_2D,
                0,
                x,
                y,
                width,
                height,
                format.into_gl(),
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(data)),
            )
        }
    }

    // --- Framebuffers ---

    fn create_framebuffer(&self) -> Result<glow::Framebuffer, String> {
        unsafe { self.gl.create_framebuffer() }
    }

    fn delete_framebuffer(&self, framebuffer: glow::Framebuffer) {
        unsafe { self.gl.delete_framebuffer(framebuffer) }
    }

    fn is_framebuffer(&self, framebuffer: glow::Framebuffer) -> bool {
        unsafe { self.gl.is_framebuffer(framebuffer) }
    }

    fn bind_framebuffer(&self, framebuffer: Option<glow::Framebuffer>) {
        unsafe { self.gl.bind_framebuffer(glow::FRAMEBUFFER, framebuffer) }
    }

    fn framebuffer_texture(&self, texture: Option<glow::Texture>) {
        unsafe {
            self.gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                texture,
                0,
            )
        }
    }

    fn check_framebuffer_status(&self) -> FramebufferStatus {
        framebuffer_status(unsafe { self.gl.check_framebuffer_status(glow::FRAMEBUFFER) })
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { self.gl.clear_color(r, g, b, a) }
    }

    fn clear_depth(&self, depth: f32) {
        unsafe { self.gl.clear_depth_f32(depth) }
    }

    fn clear(&self, mask: ClearMask) {
        unsafe { self.gl.clear(mask.into_gl()) }
    }

    // --- Buffers ---

    fn create_buffer(&self) -> Result<glow::Buffer, String> {
        unsafe { self.gl.create_buffer() }
    }

    unsafe fn delete_buffer(&self, buffer: glow::Buffer) {
        unsafe { self.gl.delete_buffer(buffer) }
    }

    fn bind_array_buffer(&self, buffer: Option<glow::Buffer>) {
        unsafe { self.gl.bind_buffer(glow::ARRAY_BUFFER, buffer) }
    }

    fn bound_array_buffer(&self) -> Option<glow::Buffer> {
        unsafe { self.gl.get_parameter_buffer(glow::ARRAY_BUFFER_BINDING) }
    }

    unsafe fn array_buffer_data_size(&self, size: usize, usage: VertexDataUsage) {
        let Some(size) = self.gl_int(size) else {
            return;
        };
        unsafe {
            self.gl
                .buffer_data_size(glow::ARRAY_BUFFER, size, usage.into_gl())
        }
    }

    fn map_array_buffer_range(&self, offset: usize, length: usize, access: MapAccess) -> *mut u8 {
        let (Some(offset), Some(length)) = (self.gl_int(offset), self.gl_int(length)) else {
            return std::ptr::null_mut();
        };
        unsafe {
            self.gl
                .map_buffer_range(glow::ARRAY_BUFFER, offset, length, access.into_gl())
        }
    }

    unsafe fn unmap_array_buffer(&self) {
        unsafe { self.gl.unmap_buffer(glow::ARRAY_BUFFER) }
    }

    // --- Vertex arrays ---

    fn create_vertex_array(&self) -> Result<glow::VertexArray, String> {
        unsafe { self.gl.create_vertex_array() }
    }

    fn delete_vertex_array(&self, vertex_array: glow::VertexArray) {
        unsafe { self.gl.delete_vertex_array(vertex_array) }
    }

    fn bind_vertex_array(&self, vertex_array: Option<glow::VertexArray>) {
        unsafe { self.gl.bind_vertex_array(vertex_array) }
    }

    // --- Shaders ---

    fn create_shader(&self, stage: ShaderStage) -> Result<glow::Shader, String> {
        unsafe { self.gl.create_shader(stage.into_gl()) }
    }

    fn shader_source(&self, shader: glow::Shader, source: &str) {
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&self, shader: glow::Shader) {
        unsafe { self.gl.compile_shader(shader) }
    }

    fn shader_compile_status(&self, shader: glow::Shader) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: glow::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: glow::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn create_program(&self) -> Result<glow::Program, String> {
        unsafe { self.gl.create_program() }
    }

    fn attach_shader(&self, program: glow::Program, shader: glow::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn detach_shader(&self, program: glow::Program, shader: glow::Shader) {
        unsafe { self.gl.detach_shader(program, shader) }
    }

    fn link_program(&self, program: glow::Program) {
        unsafe { self.gl.link_program(program) }
    }

    fn program_link_status(&self, program: glow::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: glow::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn delete_program(&self, program: glow::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn use_program(&self, program: Option<glow::Program>) {
        unsafe { self.gl.use_program(program) }
    }

    fn uniform_location(&self, program: glow::Program, name: &str) -> Option<glow::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn attrib_location(&self, program: glow::Program, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    // --- Uniforms ---

    fn uniform_matrix_4(&self, location: &glow::UniformLocation, transpose: bool, value: &[f32]) {
        unsafe {
            self.gl
                .uniform_matrix_4_f32_slice(Some(location), transpose, value)
        }
    }

    fn uniform_matrix_3(&self, location: &glow::UniformLocation, transpose: bool, value: &[f32]) {
        unsafe {
            self.gl
                .uniform_matrix_3_f32_slice(Some(location), transpose, value)
        }
    }

    fn uniform_f32(&self, location: &glow::UniformLocation, value: f32) {
        unsafe { self.gl.uniform_1_f32(Some(location), value) }
    }

    fn uniform_f32_slice(&self, location: &glow::UniformLocation, values: &[f32]) {
        unsafe { self.gl.uniform_1_f32_slice(Some(location), values) }
    }

    fn uniform_i32(&self, location: &glow::UniformLocation, value: i32) {
        unsafe { self.gl.uniform_1_i32(Some(location), value) }
    }

    fn uniform_i32_slice(&self, location: &glow::UniformLocation, values: &[i32]) {
        unsafe { self.gl.uniform_1_i32_slice(Some(location), values) }
    }

    fn uniform_u32(&self, location: &glow::UniformLocation, value: u32) {
        unsafe { self.gl.uniform_1_u32(Some(location), value) }
    }

    fn uniform_u32_slice(&self, location: &glow::UniformLocation, values: &[u32]) {
        unsafe { self.gl.uniform_1_u32_slice(Some(location), values) }
    }

    // --- Attributes and draws ---

    fn enable_vertex_attrib_array(&self, location: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(location) }
    }

    fn disable_vertex_attrib_array(&self, location: u32) {
        unsafe { self.gl.disable_vertex_attrib_array(location) }
    }

    fn vertex_attrib_pointer(
        &self,
        location: u32,
        count: i32,
        ty: AttributeType,
        normalize: bool,
        stride: i32,
        offset: i32,
    ) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(location, count, ty.into_gl(), normalize, stride, offset)
        }
    }

    fn draw_arrays(&self, primitive: Primitive, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(primitive.into_gl(), first, count) }
    }

    // --- Rasterizer state ---

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn enable(&self, capability: Capability) {
        unsafe { self.gl.enable(capability.into_gl()) }
    }

    fn disable(&self, capability: Capability) {
        unsafe { self.gl.disable(capability.into_gl()) }
    }

    fn blend_equation_separate(&self, rgb: BlendEquation, alpha: BlendEquation) {
        unsafe {
            self.gl
                .blend_equation_separate(rgb.into_gl(), alpha.into_gl())
        }
    }

    fn blend_func(&self, source: BlendFactor, destination: BlendFactor) {
        unsafe { self.gl.blend_func(source.into_gl(), destination.into_gl()) }
    }

    fn blend_func_separate(
        &self,
        source_rgb: BlendFactor,
        destination_rgb: BlendFactor,
        source_alpha: BlendFactor,
        destination_alpha: BlendFactor,
    ) {
        unsafe {
            self.gl.blend_func_separate(
                source_rgb.into_gl(),
                destination_rgb.into_gl(),
                source_alpha.into_gl(),
                destination_alpha.into_gl(),
            )
        }
    }

    fn blend_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { self.gl.blend_color(r, g, b, a) }
    }

    fn logic_op(&self, operation: LogicOperation) {
        match self.legacy.logic_op {
            Some(logic_op) => unsafe { logic_op(operation.into_gl()) },
            None => self.missing_entry_point("glLogicOp"),
        }
    }

    fn cull_face(&self, mode: CullFaceMode) {
        unsafe { self.gl.cull_face(mode.into_gl()) }
    }

    fn front_face(&self, front_face: FrontFace) {
        unsafe { self.gl.front_face(front_face.into_gl()) }
    }

    fn depth_func(&self, function: DepthFunction) {
        unsafe { self.gl.depth_func(function.into_gl()) }
    }

    fn depth_range(&self, near: f32, far: f32) {
        unsafe { self.gl.depth_range_f32(near, far) }
    }

    fn point_size(&self, size: f32) {
        match self.legacy.point_size {
            Some(point_size) => unsafe { point_size(size) },
            None => self.missing_entry_point("glPointSize"),
        }
    }

    fn line_width(&self, width: f32) {
        unsafe { self.gl.line_width(width) }
    }
}
