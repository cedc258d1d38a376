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


//! GPU resources of the sandbox and the two render passes that use them.

use std::mem;

use anyhow::Result;
use eframe::epaint::ViewportInPixels;
use eframe::glow;
use glade_core::*;
use glade_infra::GlowBackend;

type Gl = GlowBackend;

const OFFSCREEN_SIZE: u32 = 256;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
    color: [f32; 3],
}

impl Vertex {
    fn attributes(position: u32, color: u32) -> [Attribute; 2] {
        let stride = mem::size_of::<Vertex>();
        [
            Attribute::float(position, 3, stride, 0),
            Attribute::float(color, 3, stride, mem::size_of::<[f32; 3]>()),
        ]
    }
}

const VERTICES: &[Vertex] = &[
    Vertex {
        position: [0.0, 0.5, 0.0],
        color: [1.0, 0.0, 0.0],
    },
    Vertex {
        position: [-0.5, -0.5, 0.0],
        color: [0.0, 1.0, 0.0],
    },
    Vertex {
        position: [0.5, -0.5, 0.0],
        color: [0.0, 0.0, 1.0],
    },
];

const VERTEX_SHADER: &str = r#"#version 330 core
in vec3 position;
in vec3 color;
uniform float u_angle;
uniform mat4 u_transform;
out vec3 v_color;
void main() {
    float c = cos(u_angle);
    float s = sin(u_angle);
    vec3 p = vec3(c * position.x - s * position.y, s * position.x + c * position.y, position.z);
    gl_Position = u_transform * vec4(p, 1.0);
    v_color = color;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 330 core
in vec3 v_color;
out vec4 out_color;
void main() {
    out_color = vec4(v_color, 1.0);
}
"#;

#[rustfmt::skip]
const IDENTITY: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

pub struct Scene {
    device: GlDevice<Gl>,
    shader: Shader<glow::Program>,
    angle: Option<glow::UniformLocation>,
    transform: Option<glow::UniformLocation>,
    attributes: [Attribute; 2],
    vertex_data: VertexData<glow::Buffer>,
    vertex_state: VertexState<glow::VertexArray>,
    target: Texture<glow::Texture>,
    framebuffer: Framebuffer<glow::Framebuffer, glow::Texture>,
}

impl Scene {
    pub fn new(backend: Gl) -> Result<Self> {
        let device = GlDevice::new(backend);

        let shader = device.create_shader(&ShaderSources::new(VERTEX_SHADER, FRAGMENT_SHADER))?;
        let attributes = Vertex::attributes(
            device.attribute_location(&shader, "position")?,
            device.attribute_location(&shader, "color")?,
        );
        let angle = device.uniform_location(&shader, "u_angle")?;
        let transform = device.uniform_location(&shader, "u_transform")?;

        let mut vertex_data =
            device.create_vertex_data(mem::size_of_val(VERTICES), VertexDataUsage::Static)?;
        device.bind_vertex_data(&vertex_data)?;
        device.map_vertex_data(&mut vertex_data, MapAccess::WRITE)?;
        device.push_vertex_pod(&mut vertex_data, VERTICES)?;
        device.unmap_vertex_data(&mut vertex_data)?;
        device.unbind_vertex_data()?;

        let vertex_state = device.create_vertex_state()?;

        let target = device.create_texture(
            &TextureDescriptor::new(PixelFormat::Rgba, OFFSCREEN_SIZE, OFFSCREEN_SIZE)
                .with_filter(TextureFilter::Nearest),
        )?;
        // Mark the corner so the target is recognisable in a capture tool.
        device.put_subimage(&target, 0, 0, &[255; 8 * 8 * 4], 8, 8)?;
        let framebuffer = device.create_framebuffer(Some(&target))?;

        log::info!("Sandbox: scene ready ({} vertices)", VERTICES.len());
        Ok(Self {
            device,
            shader,
            angle,
            transform,
            attributes,
            vertex_data,
            vertex_state,
            target,
            framebuffer,
        })
    }

    /// Draws the triangle offscreen, then into `viewport` of the default framebuffer.
    pub fn render(&self, angle: f32, viewport: ViewportInPixels) -> Result<(), ResourceError> {
        let device = &self.device;
        device.disable_blend()?;
        device.disable_cull_face()?;
        device.use_shader(&self.shader)?;
        if let Some(location) = &self.angle {
            device.set_uniform_f32(location, angle)?;
        }
        if let Some(location) = &self.transform {
            device.set_uniform_mat4(location, false, &IDENTITY)?;
        }
        device.bind_vertex_state(&self.vertex_state)?;
        device.bind_vertex_data(&self.vertex_data)?;

        device.bind_framebuffer(&self.framebuffer)?;
        let target = self.framebuffer.texture().unwrap_or(&self.target);
        device.set_viewport(0, 0, target.width(), target.height())?;
        device.set_clear_color(0.1, 0.1, 0.12, 1.0)?;
        device.clear_targets(true, false)?;
        device.draw_range(&self.attributes, Primitive::Triangles, 0, VERTICES.len())?;
        device.unbind_framebuffer()?;

        device.set_viewport(
            viewport.left_px,
            viewport.from_bottom_px,
            viewport.width_px.max(0) as u32,
            viewport.height_px.max(0) as u32,
        )?;
        device.draw_range(&self.attributes, Primitive::Triangles, 0, VERTICES.len())?;

        device.unbind_vertex_data()?;
        device.unbind_vertex_state()
    }

    /// Releases every GPU object, framebuffer before its texture.
    pub fn destroy(self) -> Result<(), ResourceError> {
        let device = self.device;
        device.free_framebuffer(self.framebuffer)?;
        device.free_texture(self.target)?;
        device.free_vertex_state(self.vertex_state)?;
        device.free_vertex_data(self.vertex_data)?;
        device.free_shader(self.shader)?;
        log::info!("Sandbox: scene released");
        Ok(())
    }
}
