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

use crate::api::state::*;
use crate::device::GlDevice;
use crate::error::ResourceError;
use crate::traits::NativeGl;

impl<G: NativeGl> GlDevice<G> {
    /// Sets the viewport rectangle in window pixels.
    pub fn set_viewport(&self, x: i32, y: i32, width: u32, height: u32) -> Result<(), ResourceError> {
        let width = self.native_int("viewport width", width)?;
        let height = self.native_int("viewport height", height)?;
        self.gl.viewport(x, y, width, height);
        self.check("set viewport")
    }

    /// Turns a rasterizer capability on.
    pub fn enable(&self, capability: Capability) -> Result<(), ResourceError> {
        self.validate_capability(capability)?;
        self.gl.enable(capability);
        self.check_with(|| format!("enable {capability}").into())
    }

    /// Turns a rasterizer capability off.
    pub fn disable(&self, capability: Capability) -> Result<(), ResourceError> {
        self.validate_capability(capability)?;
        self.gl.disable(capability);
        self.check_with(|| format!("disable {capability}").into())
    }

    fn validate_capability(&self, capability: Capability) -> Result<(), ResourceError> {
        match capability {
            Capability::ClipDistance(index) if index >= MAX_CLIP_DISTANCES => {
                Err(self.fail(ResourceError::ClipDistanceOutOfRange {
                    index,
                    max: MAX_CLIP_DISTANCES - 1,
                }))
            }
            _ => Ok(()),
        }
    }

    /// Enables blending.
    pub fn enable_blend(&self) -> Result<(), ResourceError> {
        self.enable(Capability::Blend)
    }

    /// Disables blending.
    pub fn disable_blend(&self) -> Result<(), ResourceError> {
        self.disable(Capability::Blend)
    }

    /// Enables user clip plane `index`.
    pub fn enable_clip_distance(&self, index: u32) -> Result<(), ResourceError> {
        self.enable(Capability::ClipDistance(index))
    }

    /// Disables user clip plane `index`.
    pub fn disable_clip_distance(&self, index: u32) -> Result<(), ResourceError> {
        self.disable(Capability::ClipDistance(index))
    }

    /// Enables the color logic operation.
    pub fn enable_color_logic_operation(&self) -> Result<(), ResourceError> {
        self.enable(Capability::ColorLogicOp)
    }

    /// Disables the color logic operation.
    pub fn disable_color_logic_operation(&self) -> Result<(), ResourceError> {
        self.disable(Capability::ColorLogicOp)
    }

    /// Enables face culling.
    pub fn enable_cull_face(&self) -> Result<(), ResourceError> {
        self.enable(Capability::CullFace)
    }

    /// Disables face culling.
    pub fn disable_cull_face(&self) -> Result<(), ResourceError> {
        self.disable(Capability::CullFace)
    }

    /// Enables depth clamping.
    pub fn enable_depth_clamp(&self) -> Result<(), ResourceError> {
        self.enable(Capability::DepthClamp)
    }

    /// Disables depth clamping.
    pub fn disable_depth_clamp(&self) -> Result<(), ResourceError> {
        self.disable(Capability::DepthClamp)
    }

    /// Enables the depth test.
    pub fn enable_depth_test(&self) -> Result<(), ResourceError> {
        self.enable(Capability::DepthTest)
    }

    /// Disables the depth test.
    pub fn disable_depth_test(&self) -> Result<(), ResourceError> {
        self.disable(Capability::DepthTest)
    }

    /// Enables dithering.
    pub fn enable_dither(&self) -> Result<(), ResourceError> {
        self.enable(Capability::Dither)
    }

    /// Disables dithering.
    pub fn disable_dither(&self) -> Result<(), ResourceError> {
        self.disable(Capability::Dither)
    }

    /// Enables line antialiasing.
    pub fn enable_line_smooth(&self) -> Result<(), ResourceError> {
        self.enable(Capability::LineSmooth)
    }

    /// Disables line antialiasing.
    pub fn disable_line_smooth(&self) -> Result<(), ResourceError> {
        self.disable(Capability::LineSmooth)
    }

    /// Sets the RGB and alpha blend equations.
    pub fn set_blend_equation(
        &self,
        rgb: BlendEquation,
        alpha: BlendEquation,
    ) -> Result<(), ResourceError> {
        self.gl.blend_equation_separate(rgb, alpha);
        self.check("set blend equation")
    }

    /// Sets the blend factors for all channels.
    pub fn set_blend_function(
        &self,
        source: BlendFactor,
        destination: BlendFactor,
    ) -> Result<(), ResourceError> {
        self.gl.blend_func(source, destination);
        self.check("set blend function")
    }

    /// Sets the blend factors separately for RGB and alpha.
    pub fn set_blend_function_separate(
        &self,
        source_rgb: BlendFactor,
        destination_rgb: BlendFactor,
        source_alpha: BlendFactor,
        destination_alpha: BlendFactor,
    ) -> Result<(), ResourceError> {
        self.gl
            .blend_func_separate(source_rgb, destination_rgb, source_alpha, destination_alpha);
        self.check("set blend functions")
    }

    /// Sets the constant blend color.
    pub fn set_blend_color(&self, r: f32, g: f32, b: f32, a: f32) -> Result<(), ResourceError> {
        self.gl.blend_color(r, g, b, a);
        self.check("set blending color")
    }

    /// Sets the color logic operation.
    pub fn set_color_logic_operation(&self, operation: LogicOperation) -> Result<(), ResourceError> {
        self.gl.logic_op(operation);
        self.check("set color logic operation")
    }

    /// Selects which faces are culled.
    pub fn set_cull_face_mode(&self, mode: CullFaceMode) -> Result<(), ResourceError> {
        self.gl.cull_face(mode);
        self.check("set cull face mode")
    }

    /// Selects the front-facing winding order.
    pub fn set_front_face(&self, front_face: FrontFace) -> Result<(), ResourceError> {
        self.gl.front_face(front_face);
        self.check("set face culling front face")
    }

    /// Sets the depth comparison.
    pub fn set_depth_test_function(&self, function: DepthFunction) -> Result<(), ResourceError> {
        self.gl.depth_func(function);
        self.check("set depth function")
    }

    /// Maps normalized device depth to `[near, far]`.
    pub fn set_depth_range(&self, near: f32, far: f32) -> Result<(), ResourceError> {
        self.gl.depth_range(near, far);
        self.check("set depth range")
    }

    /// Sets the rasterized point diameter.
    pub fn set_point_size(&self, size: f32) -> Result<(), ResourceError> {
        self.gl.point_size(size);
        self.check("set point size")
    }

    /// Sets the rasterized line width.
    pub fn set_line_width(&self, width: f32) -> Result<(), ResourceError> {
        self.gl.line_width(width);
        self.check("set line width")
    }
}
