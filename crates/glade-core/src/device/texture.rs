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

use crate::api::texture::*;
use crate::device::GlDevice;
use crate::error::{ObjectKind, ResourceError};
use crate::traits::NativeGl;

impl<G: NativeGl> GlDevice<G> {
    /// Creates a 2D texture, sets its sampling parameters and uploads level 0.
    ///
    /// Leaves no texture bound. On failure the generated name is released.
    pub fn create_texture(
        &self,
        descriptor: &TextureDescriptor<'_>,
    ) -> Result<Texture<G::Texture>, ResourceError> {
        let expected = self.pixel_region(
            descriptor.pixel_format,
            descriptor.width,
            descriptor.height,
        )?;
        if let Some(data) = descriptor.data {
            if data.len() < expected {
                return Err(self.fail(ResourceError::PixelDataTooShort {
                    expected,
                    actual: data.len(),
                }));
            }
        }

        let handle = self.gl.create_texture().map_err(|reason| {
            self.fail(ResourceError::CreationFailed {
                object: ObjectKind::Texture,
                reason,
            })
        })?;

        if let Err(err) = self.configure_texture(handle, descriptor) {
            self.gl.bind_texture(None);
            self.gl.delete_texture(handle);
            return Err(err);
        }

        log::debug!(
            "GlDevice: Created {}x{} {:?} texture {handle:?}",
            descriptor.width,
            descriptor.height,
            descriptor.pixel_format
        );
        Ok(Texture {
            handle,
            pixel_format: descriptor.pixel_format,
            width: descriptor.width,
            height: descriptor.height,
        })
    }

    /// Byte size of a `width` x `height` region, after checking both sides fit
    /// the native integer type.
    fn pixel_region(
        &self,
        format: PixelFormat,
        width: u32,
        height: u32,
    ) -> Result<usize, ResourceError> {
        self.native_int("texture width", width)?;
        self.native_int("texture height", height)?;
        format
            .region_size(width, height)
            .ok_or_else(|| self.fail(ResourceError::RegionTooLarge { width, height }))
    }

    fn configure_texture(
        &self,
        handle: G::Texture,
        descriptor: &TextureDescriptor<'_>,
    ) -> Result<(), ResourceError> {
        self.check("generate texture")?;
        self.gl.bind_texture(Some(handle));
        self.check("bind texture")?;
        self.gl
            .tex_parameter_wrap(WrapAxis::Horizontal, descriptor.horizontal_wrap);
        self.check("set texture wrap-s parameter")?;
        self.gl
            .tex_parameter_wrap(WrapAxis::Vertical, descriptor.vertical_wrap);
        self.check("set texture wrap-t parameter")?;
        self.gl
            .tex_parameter_filter(FilterKind::Magnification, descriptor.mag_filter);
        self.check("set texture mag-filter parameter")?;
        self.gl
            .tex_parameter_filter(FilterKind::Minification, descriptor.min_filter);
        self.check("set texture min-filter parameter")?;
        self.gl.tex_image_2d(
            descriptor.pixel_format,
            descriptor.width,
            descriptor.height,
            descriptor.data,
        );
        self.check("set texture image")?;
        if self.settings.check_errors && !self.gl.is_texture(handle) {
            return Err(self.fail(ResourceError::InvalidObject {
                object: ObjectKind::Texture,
            }));
        }
        self.gl.bind_texture(None);
        self.check("unbind texture")
    }

    /// Deletes a texture. Deleting a name that is not a live texture is
    /// reported as [`ResourceError::InvalidObject`].
    pub fn free_texture(&self, texture: Texture<G::Texture>) -> Result<(), ResourceError> {
        if self.settings.check_errors && !self.gl.is_texture(texture.handle) {
            return Err(self.fail(ResourceError::InvalidObject {
                object: ObjectKind::Texture,
            }));
        }
        self.gl.delete_texture(texture.handle);
        self.check("delete texture")?;
        log::debug!("GlDevice: Destroyed texture {:?}", texture.handle);
        Ok(())
    }

    /// Binds a texture to the 2D target of the active unit.
    pub fn bind_texture(&self, texture: &Texture<G::Texture>) -> Result<(), ResourceError> {
        self.gl.bind_texture(Some(texture.handle));
        self.check("bind texture")
    }

    /// Unbinds the 2D texture of the active unit.
    pub fn unbind_texture(&self) -> Result<(), ResourceError> {
        self.gl.bind_texture(None);
        self.check("unbind texture")
    }

    /// Selects the texture unit `index` (`0..MAX_TEXTURE_UNITS`).
    pub fn activate_texture_unit(&self, index: u32) -> Result<(), ResourceError> {
        if index >= MAX_TEXTURE_UNITS {
            return Err(self.fail(ResourceError::TextureUnitOutOfRange {
                index,
                max: MAX_TEXTURE_UNITS - 1,
            }));
        }
        self.gl.active_texture(index);
        self.check("activate texture unit")
    }

    /// Overwrites the `width` x `height` region at (`x`, `y`) of a texture
    /// with `data`, laid out in the texture's pixel format.
    ///
    /// Leaves no texture bound.
    pub fn put_subimage(
        &self,
        texture: &Texture<G::Texture>,
        x: i32,
        y: i32,
        data: &[u8],
        width: u32,
        height: u32,
    ) -> Result<(), ResourceError> {
        let expected = self.pixel_region(texture.pixel_format, width, height)?;
        if data.len() < expected {
            return Err(self.fail(ResourceError::PixelDataTooShort {
                expected,
                actual: data.len(),
            }));
        }
        self.gl.bind_texture(Some(texture.handle));
        self.check("bind texture")?;
        self.gl
            .tex_sub_image_2d(x, y, width, height, texture.pixel_format, data);
        let uploaded = self.check("set texture sub image");
        self.gl.bind_texture(None);
        uploaded?;
        self.check("unbind texture")
    }
}
