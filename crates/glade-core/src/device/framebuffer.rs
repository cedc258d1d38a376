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

use crate::api::framebuffer::*;
use crate::api::texture::Texture;
use crate::device::GlDevice;
use crate::error::{ObjectKind, ResourceError};
use crate::traits::NativeGl;

impl<G: NativeGl> GlDevice<G> {
    /// Sets the color used by [`clear`](Self::clear).
    pub fn set_clear_color(&self, r: f32, g: f32, b: f32, a: f32) -> Result<(), ResourceError> {
        self.gl.clear_color(r, g, b, a);
        self.check("set clear color value")
    }

    /// Sets the depth used by [`clear`](Self::clear).
    pub fn set_clear_depth(&self, depth: f32) -> Result<(), ResourceError> {
        self.gl.clear_depth(depth);
        self.check("set clear depth value")
    }

    /// Clears the selected buffers of the bound framebuffer.
    pub fn clear(&self, mask: ClearMask) -> Result<(), ResourceError> {
        self.gl.clear(mask);
        self.check("clear framebuffer")
    }

    /// Clears color and/or depth of the bound framebuffer.
    pub fn clear_targets(&self, color: bool, depth: bool) -> Result<(), ResourceError> {
        self.clear(ClearMask::from_targets(color, depth))
    }

    /// Binds the default framebuffer.
    pub fn unbind_framebuffer(&self) -> Result<(), ResourceError> {
        self.gl.bind_framebuffer(None);
        self.check("unbind framebuffer")
    }

    /// Binds a framebuffer for drawing and reading.
    pub fn bind_framebuffer(
        &self,
        framebuffer: &Framebuffer<G::Framebuffer, G::Texture>,
    ) -> Result<(), ResourceError> {
        self.gl.bind_framebuffer(Some(framebuffer.handle));
        self.check("bind framebuffer")
    }

    /// Deletes a framebuffer. The attached texture is left alive.
    pub fn free_framebuffer(
        &self,
        framebuffer: Framebuffer<G::Framebuffer, G::Texture>,
    ) -> Result<(), ResourceError> {
        if self.settings.check_errors && !self.gl.is_framebuffer(framebuffer.handle) {
            return Err(self.fail(ResourceError::InvalidObject {
                object: ObjectKind::Framebuffer,
            }));
        }
        self.gl.delete_framebuffer(framebuffer.handle);
        self.check("delete framebuffer")?;
        log::debug!("GlDevice: Destroyed framebuffer {:?}", framebuffer.handle);
        Ok(())
    }

    /// Creates a framebuffer rendering into `texture` (as color attachment 0).
    ///
    /// The framebuffer must be complete. Leaves the default framebuffer and
    /// no texture bound. On failure the generated name is released.
    pub fn create_framebuffer(
        &self,
        texture: Option<&Texture<G::Texture>>,
    ) -> Result<Framebuffer<G::Framebuffer, G::Texture>, ResourceError> {
        let handle = self.gl.create_framebuffer().map_err(|reason| {
            self.fail(ResourceError::CreationFailed {
                object: ObjectKind::Framebuffer,
                reason,
            })
        })?;

        if let Err(err) = self.configure_framebuffer(handle, texture) {
            self.gl.bind_texture(None);
            self.gl.bind_framebuffer(None);
            self.gl.delete_framebuffer(handle);
            return Err(err);
        }

        log::debug!(
            "GlDevice: Created framebuffer {handle:?} (color target: {:?})",
            texture.map(|t| t.handle)
        );
        Ok(Framebuffer {
            handle,
            texture: texture.copied(),
        })
    }

    fn configure_framebuffer(
        &self,
        handle: G::Framebuffer,
        texture: Option<&Texture<G::Texture>>,
    ) -> Result<(), ResourceError> {
        self.check("generate framebuffer")?;
        self.gl.bind_framebuffer(Some(handle));
        self.check("bind framebuffer")?;
        if let Some(texture) = texture {
            self.gl.bind_texture(Some(texture.handle));
            self.check("bind texture for framebuffer")?;
            self.gl.framebuffer_texture(Some(texture.handle));
            self.check("set framebuffer texture")?;
            self.gl.bind_texture(None);
            self.check("unbind texture")?;
        }
        let status = self.gl.check_framebuffer_status();
        if status != FramebufferStatus::Complete {
            return Err(self.fail(ResourceError::FramebufferIncomplete(status)));
        }
        self.gl.bind_framebuffer(None);
        self.check("unbind framebuffer")
    }
}
