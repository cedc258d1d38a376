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

//! Texture handles, descriptors and sampling parameters.

/// Number of texture image units addressable through
/// [`GlDevice::activate_texture_unit`](crate::GlDevice::activate_texture_unit).
pub const MAX_TEXTURE_UNITS: u32 = 32;

/// How texture coordinates outside `[0, 1]` are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextureWrap {
    /// Coordinates wrap around. `1.1` becomes `0.1`.
    Repeat,
    /// Coordinates are clamped to the edge texel.
    ClampToEdge,
    /// Coordinates outside the range sample the border color.
    ClampToBorder,
    /// Coordinates wrap around, mirroring at each integer boundary.
    MirroredRepeat,
}

/// How texels are sampled when a texture is magnified or minified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextureFilter {
    /// Returns the value of the nearest texel.
    Nearest,
    /// Returns a weighted average of the four nearest texels.
    Linear,
}

/// Layout of the 8-bit-per-channel pixel data held by a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PixelFormat {
    /// Three channels: red, green, blue.
    Rgb,
    /// Four channels: red, green, blue, alpha.
    Rgba,
    /// One channel holding palette indices, stored in the red channel.
    Palette,
}

impl PixelFormat {
    /// Size of a single pixel in bytes.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
            PixelFormat::Palette => 1,
        }
    }

    /// Number of bytes covering a `width` x `height` region, or `None` when
    /// that count does not fit in `usize`.
    pub fn region_size(self, width: u32, height: u32) -> Option<usize> {
        usize::try_from(width)
            .ok()?
            .checked_mul(usize::try_from(height).ok()?)?
            .checked_mul(self.bytes_per_pixel())
    }
}

/// The texture coordinate a wrap mode applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapAxis {
    /// The horizontal (S) coordinate.
    Horizontal,
    /// The vertical (T) coordinate.
    Vertical,
}

/// The sampling situation a filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// The texture is larger on screen than its resolution.
    Magnification,
    /// The texture is smaller on screen than its resolution.
    Minification,
}

/// Everything needed to create a [`Texture`].
#[derive(Debug, Clone)]
pub struct TextureDescriptor<'a> {
    /// Layout of the pixel data.
    pub pixel_format: PixelFormat,
    /// Wrap mode for the horizontal coordinate.
    pub horizontal_wrap: TextureWrap,
    /// Wrap mode for the vertical coordinate.
    pub vertical_wrap: TextureWrap,
    /// Filter used when magnifying.
    pub mag_filter: TextureFilter,
    /// Filter used when minifying.
    pub min_filter: TextureFilter,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Initial contents, row by row from the bottom. `None` leaves the
    /// storage uninitialized (useful for render targets).
    pub data: Option<&'a [u8]>,
}

impl<'a> TextureDescriptor<'a> {
    /// A descriptor with clamp-to-edge wrapping, linear filtering and no data.
    pub fn new(pixel_format: PixelFormat, width: u32, height: u32) -> Self {
        Self {
            pixel_format,
            horizontal_wrap: TextureWrap::ClampToEdge,
            vertical_wrap: TextureWrap::ClampToEdge,
            mag_filter: TextureFilter::Linear,
            min_filter: TextureFilter::Linear,
            width,
            height,
            data: None,
        }
    }

    /// Sets the initial contents.
    pub fn with_data(mut self, data: &'a [u8]) -> Self {
        self.data = Some(data);
        self
    }

    /// Sets both wrap modes.
    pub fn with_wrap(mut self, wrap: TextureWrap) -> Self {
        self.horizontal_wrap = wrap;
        self.vertical_wrap = wrap;
        self
    }

    /// Sets both filters.
    pub fn with_filter(mut self, filter: TextureFilter) -> Self {
        self.mag_filter = filter;
        self.min_filter = filter;
        self
    }

    /// Number of bytes the initial contents must hold, or `None` when the
    /// texture is too large to address.
    pub fn required_bytes(&self) -> Option<usize> {
        self.pixel_format.region_size(self.width, self.height)
    }
}

/// A live 2D texture. `T` is the backend's texture handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture<T> {
    pub(crate) handle: T,
    pub(crate) pixel_format: PixelFormat,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl<T: Copy> Texture<T> {
    /// The backend handle.
    pub fn handle(&self) -> T {
        self.handle
    }

    /// Layout of the pixel data.
    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}
