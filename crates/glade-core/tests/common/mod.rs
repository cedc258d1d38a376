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

//! A recording, in-memory stand-in for a native context.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};

use glade_core::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateTexture(u32),
    DeleteTexture(u32),
    BindTexture(Option<u32>),
    ActiveTexture(u32),
    TexParameterWrap(WrapAxis, TextureWrap),
    TexParameterFilter(FilterKind, TextureFilter),
    TexImage2d(PixelFormat, u32, u32, Option<Vec<u8>>),
    TexSubImage2d(i32, i32, u32, u32, PixelFormat, Vec<u8>),
    CreateFramebuffer(u32),
    DeleteFramebuffer(u32),
    BindFramebuffer(Option<u32>),
    FramebufferTexture(Option<u32>),
    ClearColor(f32, f32, f32, f32),
    ClearDepth(f32),
    Clear(ClearMask),
    CreateBuffer(u32),
    DeleteBuffer(u32),
    BindArrayBuffer(Option<u32>),
    ArrayBufferDataSize(usize, VertexDataUsage),
    MapArrayBufferRange(usize, usize, MapAccess),
    UnmapArrayBuffer,
    CreateVertexArray(u32),
    DeleteVertexArray(u32),
    BindVertexArray(Option<u32>),
    CreateShader(ShaderStage, u32),
    ShaderSource(u32, String),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(Option<u32>),
    UniformMatrix4(i32, bool, Vec<f32>),
    UniformMatrix3(i32, bool, Vec<f32>),
    UniformF32(i32, f32),
    UniformF32Slice(i32, Vec<f32>),
    UniformI32(i32, i32),
    UniformI32Slice(i32, Vec<i32>),
    UniformU32(i32, u32),
    UniformU32Slice(i32, Vec<u32>),
    EnableVertexAttribArray(u32),
    DisableVertexAttribArray(u32),
    VertexAttribPointer(u32, i32, AttributeType, bool, i32, i32),
    DrawArrays(Primitive, i32, i32),
    Viewport(i32, i32, i32, i32),
    Enable(Capability),
    Disable(Capability),
    BlendEquationSeparate(BlendEquation, BlendEquation),
    BlendFunc(BlendFactor, BlendFactor),
    BlendFuncSeparate(BlendFactor, BlendFactor, BlendFactor, BlendFactor),
    BlendColor(f32, f32, f32, f32),
    LogicOp(LogicOperation),
    CullFace(CullFaceMode),
    FrontFace(FrontFace),
    DepthFunc(DepthFunction),
    DepthRange(f32, f32),
    PointSize(f32),
    LineWidth(f32),
}

/// Records every native call and lets tests script failures.
pub struct RecordingGl {
    calls: RefCell<Vec<Call>>,
    errors: RefCell<VecDeque<GlErrorKind>>,
    fail_on: RefCell<Option<(fn(&Call) -> bool, GlErrorKind)>>,
    next_name: Cell<u32>,
    textures: RefCell<HashSet<u32>>,
    framebuffers: RefCell<HashSet<u32>>,
    bound_buffer: Cell<Option<u32>>,
    storage: RefCell<HashMap<u32, Box<[u8]>>>,
    pub framebuffer_status: Cell<FramebufferStatus>,
    pub compile_ok: Cell<bool>,
    pub link_ok: Cell<bool>,
    pub info_log: RefCell<String>,
    pub refuse_names: Cell<bool>,
    pub null_mappings: Cell<bool>,
}

impl Default for RecordingGl {
    fn default() -> Self {
        Self {
            calls: RefCell::default(),
            errors: RefCell::default(),
            fail_on: RefCell::default(),
            next_name: Cell::new(1),
            textures: RefCell::default(),
            framebuffers: RefCell::default(),
            bound_buffer: Cell::new(None),
            storage: RefCell::default(),
            framebuffer_status: Cell::new(FramebufferStatus::Complete),
            compile_ok: Cell::new(true),
            link_ok: Cell::new(true),
            info_log: RefCell::default(),
            refuse_names: Cell::new(false),
            null_mappings: Cell::new(false),
        }
    }
}

impl RecordingGl {
    /// A device that checks every call but neither logs nor aborts.
    pub fn device() -> GlDevice<RecordingGl> {
        GlDevice::with_settings(
            RecordingGl::default(),
            DiagnosticsSettings {
                log_errors: false,
                ..DiagnosticsSettings::verbose()
            },
        )
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Raises `kind` right after the first call matching `matcher`.
    pub fn fail_on(&self, matcher: fn(&Call) -> bool, kind: GlErrorKind) {
        *self.fail_on.borrow_mut() = Some((matcher, kind));
    }

    /// Queues raw error flags, as if earlier calls had failed.
    pub fn queue_errors(&self, kinds: &[GlErrorKind]) {
        self.errors.borrow_mut().extend(kinds.iter().copied());
    }

    pub fn pending_errors(&self) -> usize {
        self.errors.borrow().len()
    }

    pub fn buffer_contents(&self, buffer: u32) -> Vec<u8> {
        self.storage.borrow()[&buffer].to_vec()
    }

    pub fn is_live_texture(&self, texture: u32) -> bool {
        self.textures.borrow().contains(&texture)
    }

    fn record(&self, call: Call) {
        let mut fail_on = self.fail_on.borrow_mut();
        if let Some((matcher, kind)) = *fail_on {
            if matcher(&call) {
                self.errors.borrow_mut().push_back(kind);
                *fail_on = None;
            }
        }
        self.calls.borrow_mut().push(call);
    }

    fn name(&self) -> Result<u32, String> {
        if self.refuse_names.get() {
            return Err("no names left".to_string());
        }
        let name = self.next_name.get();
        self.next_name.set(name + 1);
        Ok(name)
    }
}

// SAFETY: mappings point into boxed storage that is only dropped by
// `delete_buffer` or replaced by `array_buffer_data_size`.
unsafe impl NativeGl for RecordingGl {
    type Texture = u32;
    type Framebuffer = u32;
    type Buffer = u32;
    type VertexArray = u32;
    type Program = u32;
    type Shader = u32;
    type UniformLocation = i32;

    fn get_error(&self) -> Option<GlErrorKind> {
        self.errors.borrow_mut().pop_front()
    }

    fn create_texture(&self) -> Result<u32, String> {
        let name = self.name()?;
        self.textures.borrow_mut().insert(name);
        self.record(Call::CreateTexture(name));
        Ok(name)
    }

    fn delete_texture(&self, texture: u32) {
        self.textures.borrow_mut().remove(&texture);
        self.record(Call::DeleteTexture(texture));
    }

    fn is_texture(&self, texture: u32) -> bool {
        self.textures.borrow().contains(&texture)
    }

    fn bind_texture(&self, texture: Option<u32>) {
        self.record(Call::BindTexture(texture));
    }

    fn active_texture(&self, unit: u32) {
        self.record(Call::ActiveTexture(unit));
    }

    fn tex_parameter_wrap(&self, axis: WrapAxis, wrap: TextureWrap) {
        self.record(Call::TexParameterWrap(axis, wrap));
    }

    fn tex_parameter_filter(&self, kind: FilterKind, filter: TextureFilter) {
        self.record(Call::TexParameterFilter(kind, filter));
    }

    fn tex_image_2d(&self, format: PixelFormat, width: u32, height: u32, data: Option<&[u8]>) {
        self.record(Call::TexImage2d(format, width, height, data.map(<[u8]>::to_vec)));
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
        self.record(Call::TexSubImage2d(x, y, width, height, format, data.to_vec()));
    }

    fn create_framebuffer(&self) -> Result<u32, String> {
        let name = self.name()?;
        self.framebuffers.borrow_mut().insert(name);
        self.record(Call::CreateFramebuffer(name));
        Ok(name)
    }

    fn delete_framebuffer(&self, framebuffer: u32) {
        self.framebuffers.borrow_mut().remove(&framebuffer);
        self.record(Call::DeleteFramebuffer(framebuffer));
    }

    fn is_framebuffer(&self, framebuffer: u32) -> bool {
        self.framebuffers.borrow().contains(&framebuffer)
    }

    fn bind_framebuffer(&self, framebuffer: Option<u32>) {
        self.record(Call::BindFramebuffer(framebuffer));
    }

    fn framebuffer_texture(&self, texture: Option<u32>) {
        self.record(Call::FramebufferTexture(texture));
    }

    fn check_framebuffer_status(&self) -> FramebufferStatus {
        self.framebuffer_status.get()
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(Call::ClearColor(r, g, b, a));
    }

    fn clear_depth(&self, depth: f32) {
        self.record(Call::ClearDepth(depth));
    }

    fn clear(&self, mask: ClearMask) {
        self.record(Call::Clear(mask));
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let name = self.name()?;
        self.record(Call::CreateBuffer(name));
        Ok(name)
    }

    unsafe fn delete_buffer(&self, buffer: u32) {
        self.storage.borrow_mut().remove(&buffer);
        if self.bound_buffer.get() == Some(buffer) {
            self.bound_buffer.set(None);
        }
        self.record(Call::DeleteBuffer(buffer));
    }

    fn bind_array_buffer(&self, buffer: Option<u32>) {
        self.bound_buffer.set(buffer);
        self.record(Call::BindArrayBuffer(buffer));
    }

    fn bound_array_buffer(&self) -> Option<u32> {
        self.bound_buffer.get()
    }

    unsafe fn array_buffer_data_size(&self, size: usize, usage: VertexDataUsage) {
        if let Some(buffer) = self.bound_buffer.get() {
            self.storage
                .borrow_mut()
                .insert(buffer, vec![0u8; size].into_boxed_slice());
        }
        self.record(Call::ArrayBufferDataSize(size, usage));
    }

    fn map_array_buffer_range(&self, offset: usize, length: usize, access: MapAccess) -> *mut u8 {
        self.record(Call::MapArrayBufferRange(offset, length, access));
        if self.null_mappings.get() {
            return std::ptr::null_mut();
        }
        let Some(buffer) = self.bound_buffer.get() else {
            return std::ptr::null_mut();
        };
        let mut storage = self.storage.borrow_mut();
        match storage.get_mut(&buffer) {
            Some(bytes) if offset.checked_add(length).is_some_and(|end| end <= bytes.len()) => {
                bytes[offset..].as_mut_ptr()
            }
            _ => std::ptr::null_mut(),
        }
    }

    unsafe fn unmap_array_buffer(&self) {
        self.record(Call::UnmapArrayBuffer);
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let name = self.name()?;
        self.record(Call::CreateVertexArray(name));
        Ok(name)
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.record(Call::DeleteVertexArray(vertex_array));
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let name = self.name()?;
        self.record(Call::CreateShader(stage, name));
        Ok(name)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.record(Call::ShaderSource(shader, source.to_string()));
    }

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, _shader: u32) -> bool {
        self.compile_ok.get()
    }

    fn shader_info_log(&self, _shader: u32) -> String {
        self.info_log.borrow().clone()
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let name = self.name()?;
        self.record(Call::CreateProgram(name));
        Ok(name)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.record(Call::DetachShader(program, shader));
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }

    fn program_link_status(&self, _program: u32) -> bool {
        self.link_ok.get()
    }

    fn program_info_log(&self, _program: u32) -> String {
        self.info_log.borrow().clone()
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn uniform_location(&self, _program: u32, name: &str) -> Option<i32> {
        (!name.starts_with("unused")).then(|| name.len() as i32)
    }

    fn attrib_location(&self, _program: u32, name: &str) -> Option<u32> {
        match name {
            "position" => Some(0),
            "color" => Some(1),
            _ => None,
        }
    }

    fn uniform_matrix_4(&self, location: &i32, transpose: bool, value: &[f32]) {
        self.record(Call::UniformMatrix4(*location, transpose, value.to_vec()));
    }

    fn uniform_matrix_3(&self, location: &i32, transpose: bool, value: &[f32]) {
        self.record(Call::UniformMatrix3(*location, transpose, value.to_vec()));
    }

    fn uniform_f32(&self, location: &i32, value: f32) {
        self.record(Call::UniformF32(*location, value));
    }

    fn uniform_f32_slice(&self, location: &i32, values: &[f32]) {
        self.record(Call::UniformF32Slice(*location, values.to_vec()));
    }

    fn uniform_i32(&self, location: &i32, value: i32) {
        self.record(Call::UniformI32(*location, value));
    }

    fn uniform_i32_slice(&self, location: &i32, values: &[i32]) {
        self.record(Call::UniformI32Slice(*location, values.to_vec()));
    }

    fn uniform_u32(&self, location: &i32, value: u32) {
        self.record(Call::UniformU32(*location, value));
    }

    fn uniform_u32_slice(&self, location: &i32, values: &[u32]) {
        self.record(Call::UniformU32Slice(*location, values.to_vec()));
    }

    fn enable_vertex_attrib_array(&self, location: u32) {
        self.record(Call::EnableVertexAttribArray(location));
    }

    fn disable_vertex_attrib_array(&self, location: u32) {
        self.record(Call::DisableVertexAttribArray(location));
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
        self.record(Call::VertexAttribPointer(
            location, count, ty, normalize, stride, offset,
        ));
    }

    fn draw_arrays(&self, primitive: Primitive, first: i32, count: i32) {
        self.record(Call::DrawArrays(primitive, first, count));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn enable(&self, capability: Capability) {
        self.record(Call::Enable(capability));
    }

    fn disable(&self, capability: Capability) {
        self.record(Call::Disable(capability));
    }

    fn blend_equation_separate(&self, rgb: BlendEquation, alpha: BlendEquation) {
        self.record(Call::BlendEquationSeparate(rgb, alpha));
    }

    fn blend_func(&self, source: BlendFactor, destination: BlendFactor) {
        self.record(Call::BlendFunc(source, destination));
    }

    fn blend_func_separate(
        &self,
        source_rgb: BlendFactor,
        destination_rgb: BlendFactor,
        source_alpha: BlendFactor,
        destination_alpha: BlendFactor,
    ) {
        self.record(Call::BlendFuncSeparate(
            source_rgb,
            destination_rgb,
            source_alpha,
            destination_alpha,
        ));
    }

    fn blend_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(Call::BlendColor(r, g, b, a));
    }

    fn logic_op(&self, operation: LogicOperation) {
        self.record(Call::LogicOp(operation));
    }

    fn cull_face(&self, mode: CullFaceMode) {
        self.record(Call::CullFace(mode));
    }

    fn front_face(&self, front_face: FrontFace) {
        self.record(Call::FrontFace(front_face));
    }

    fn depth_func(&self, function: DepthFunction) {
        self.record(Call::DepthFunc(function));
    }

    fn depth_range(&self, near: f32, far: f32) {
        self.record(Call::DepthRange(near, far));
    }

    fn point_size(&self, size: f32) {
        self.record(Call::PointSize(size));
    }

    fn line_width(&self, width: f32) {
        self.record(Call::LineWidth(width));
    }
}
