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

use crate::api::shader::*;
use crate::device::GlDevice;
use crate::error::{ObjectKind, ResourceError, ShaderError};
use crate::traits::NativeGl;

impl<G: NativeGl> GlDevice<G> {
    /// Compiles every stage in `sources` and links them into a program.
    ///
    /// Compiler and linker logs are truncated to
    /// [`shader_log_max_length`](crate::DiagnosticsSettings::shader_log_max_length).
    /// The stage objects never outlive this call, whatever the outcome.
    pub fn create_shader(
        &self,
        sources: &ShaderSources<'_>,
    ) -> Result<Shader<G::Program>, ResourceError> {
        let mut stages = Vec::with_capacity(3);
        let linked = self.build_program(sources, &mut stages);

        match linked {
            Ok(program) => {
                for &shader in &stages {
                    self.gl.detach_shader(program, shader);
                    self.gl.delete_shader(shader);
                }
                if let Err(err) = self.check("detach and delete shader stages") {
                    self.gl.delete_program(program);
                    return Err(err);
                }
                log::debug!(
                    "GlDevice: Created shader program {program:?} from {} stages",
                    stages.len()
                );
                Ok(Shader { handle: program })
            }
            Err(err) => {
                for shader in stages {
                    self.gl.delete_shader(shader);
                }
                Err(err)
            }
        }
    }

    fn build_program(
        &self,
        sources: &ShaderSources<'_>,
        stages: &mut Vec<G::Shader>,
    ) -> Result<G::Program, ResourceError> {
        for (stage, source) in sources.stages() {
            stages.push(self.compile_stage(stage, source)?);
        }

        let program = self.gl.create_program().map_err(|reason| {
            self.fail(ResourceError::CreationFailed {
                object: ObjectKind::Program,
                reason,
            })
        })?;

        if let Err(err) = self.link_stages(program, stages) {
            self.gl.delete_program(program);
            return Err(err);
        }
        Ok(program)
    }

    fn link_stages(&self, program: G::Program, stages: &[G::Shader]) -> Result<(), ResourceError> {
        self.check("create shader program")?;
        for &shader in stages {
            self.gl.attach_shader(program, shader);
            self.check("attach shader")?;
        }
        self.gl.link_program(program);
        self.check("link shader program")?;
        if !self.gl.program_link_status(program) {
            let log = self.settings.truncate_log(self.gl.program_info_log(program));
            return Err(self.fail(ShaderError::Link { log }));
        }
        Ok(())
    }

    fn compile_stage(&self, stage: ShaderStage, source: &str) -> Result<G::Shader, ResourceError> {
        let shader = self.gl.create_shader(stage).map_err(|reason| {
            self.fail(ResourceError::CreationFailed {
                object: ObjectKind::Shader,
                reason,
            })
        })?;

        let compiled = self
            .check_with(|| format!("create {stage} shader").into())
            .and_then(|()| {
                self.gl.shader_source(shader, source);
                self.check_with(|| format!("set {stage} shader source").into())?;
                self.gl.compile_shader(shader);
                self.check_with(|| format!("compile {stage} shader").into())?;
                if !self.gl.shader_compile_status(shader) {
                    let log = self.settings.truncate_log(self.gl.shader_info_log(shader));
                    return Err(self.fail(ShaderError::Compilation { stage, log }));
                }
                Ok(())
            });

        match compiled {
            Ok(()) => Ok(shader),
            Err(err) => {
                self.gl.delete_shader(shader);
                Err(err)
            }
        }
    }

    /// Deletes a program.
    pub fn free_shader(&self, shader: Shader<G::Program>) -> Result<(), ResourceError> {
        self.gl.delete_program(shader.handle);
        self.check("delete shader program")?;
        log::debug!("GlDevice: Destroyed shader program {:?}", shader.handle);
        Ok(())
    }

    /// Installs a program for subsequent draws and uniform updates.
    pub fn use_shader(&self, shader: &Shader<G::Program>) -> Result<(), ResourceError> {
        self.gl.use_program(Some(shader.handle));
        self.check("use shader")
    }

    /// Location of an active uniform, or `None` if the program has no active
    /// uniform with that name (e.g. it was optimized out).
    pub fn uniform_location(
        &self,
        shader: &Shader<G::Program>,
        name: &str,
    ) -> Result<Option<G::UniformLocation>, ResourceError> {
        let location = self.gl.uniform_location(shader.handle, name);
        self.check("get uniform location")?;
        Ok(location)
    }

    /// Location of an active vertex attribute.
    pub fn attribute_location(
        &self,
        shader: &Shader<G::Program>,
        name: &str,
    ) -> Result<u32, ResourceError> {
        let location = self.gl.attrib_location(shader.handle, name);
        self.check("get shader attribute location")?;
        location.ok_or_else(|| {
            self.fail(ShaderError::AttributeNotFound {
                name: name.to_string(),
            })
        })
    }

    /// Sets a `mat4` uniform of the current program (column-major).
    pub fn set_uniform_mat4(
        &self,
        location: &G::UniformLocation,
        transpose: bool,
        matrix: &[f32; 16],
    ) -> Result<(), ResourceError> {
        self.gl.uniform_matrix_4(location, transpose, matrix);
        self.check("set 4x4 matrix uniform variable")
    }

    /// Sets a `mat3` uniform of the current program (column-major).
    pub fn set_uniform_mat3(
        &self,
        location: &G::UniformLocation,
        transpose: bool,
        matrix: &[f32; 9],
    ) -> Result<(), ResourceError> {
        self.gl.uniform_matrix_3(location, transpose, matrix);
        self.check("set 3x3 matrix uniform variable")
    }

    /// Sets a `float` uniform of the current program.
    pub fn set_uniform_f32(&self, location: &G::UniformLocation, value: f32) -> Result<(), ResourceError> {
        self.gl.uniform_f32(location, value);
        self.check("set floating-point uniform variable")
    }

    /// Sets a `float[]` uniform of the current program.
    pub fn set_uniform_f32_slice(
        &self,
        location: &G::UniformLocation,
        values: &[f32],
    ) -> Result<(), ResourceError> {
        self.gl.uniform_f32_slice(location, values);
        self.check("set floating-point uniform array")
    }

    /// Sets an `int` (or sampler) uniform of the current program.
    pub fn set_uniform_i32(&self, location: &G::UniformLocation, value: i32) -> Result<(), ResourceError> {
        self.gl.uniform_i32(location, value);
        self.check("set integer uniform variable")
    }

    /// Sets an `int[]` uniform of the current program.
    pub fn set_uniform_i32_slice(
        &self,
        location: &G::UniformLocation,
        values: &[i32],
    ) -> Result<(), ResourceError> {
        self.gl.uniform_i32_slice(location, values);
        self.check("set integer uniform array")
    }

    /// Sets a `uint` uniform of the current program.
    pub fn set_uniform_u32(&self, location: &G::UniformLocation, value: u32) -> Result<(), ResourceError> {
        self.gl.uniform_u32(location, value);
        self.check("set unsigned integer uniform variable")
    }

    /// Sets a `uint[]` uniform of the current program.
    pub fn set_uniform_u32_slice(
        &self,
        location: &G::UniformLocation,
        values: &[u32],
    ) -> Result<(), ResourceError> {
        self.gl.uniform_u32_slice(location, values);
        self.check("set unsigned integer uniform array")
    }

    /// Draws `count` vertices starting at `first` with the current program,
    /// reading `attributes` from the bound vertex buffer.
    ///
    /// Every count, stride and offset must fit the native integer type; the
    /// first one that does not is reported before any native call. The
    /// attribute arrays are enabled for the draw only and are disabled again
    /// even when the draw fails.
    pub fn draw_range(
        &self,
        attributes: &[Attribute],
        primitive: Primitive,
        first: usize,
        count: usize,
    ) -> Result<(), ResourceError> {
        let first = self.native_int("first vertex", first)?;
        let count = self.native_int("vertex count", count)?;
        let layouts = attributes
            .iter()
            .map(|attribute| {
                Ok::<_, ResourceError>((
                    attribute,
                    self.native_int("attribute component count", attribute.count)?,
                    self.native_int("attribute stride", attribute.stride)?,
                    self.native_int("attribute offset", attribute.offset)?,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for &(attribute, components, stride, offset) in &layouts {
            self.gl.enable_vertex_attrib_array(attribute.location);
            self.gl.vertex_attrib_pointer(
                attribute.location,
                components,
                attribute.ty,
                attribute.normalize,
                stride,
                offset,
            );
        }
        let drawn = self.check("describe vertex attributes").and_then(|()| {
            self.gl.draw_arrays(primitive, first, count);
            self.check("draw arrays")
        });
        for attribute in attributes {
            self.gl.disable_vertex_attrib_array(attribute.location);
        }
        drawn?;
        self.check("disable vertex attributes")
    }
}
