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

//! Framebuffer handles, completeness status and clear masks.

use std::fmt;

use bitflags::bitflags;

use super::texture::Texture;

bitflags! {
    /// The buffers a clear operation writes to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearMask: u8 {
        /// The color attachment.
        const COLOR = 0b01;
        /// The depth attachment.
        const DEPTH = 0b10;
    }
}

impl ClearMask {
    /// Builds a mask from two switches.
    pub fn from_targets(color: bool, depth: bool) -> Self {
        let mut mask = ClearMask::empty();
        mask.set(ClearMask::COLOR, color);
        mask.set(ClearMask::DEPTH, depth);
        mask
    }
}

/// Result of a framebuffer completeness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FramebufferStatus {
    /// The framebuffer can be rendered to.
    Complete,
    /// The default framebuffer does not exist.
    Undefined,
    /// An attachment is not framebuffer-complete.
    IncompleteAttachment,
    /// No image is attached.
    MissingAttachment,
    /// A draw buffer names an attachment with no image.
    IncompleteDrawBuffer,
    /// The read buffer names an attachment with no image.
    IncompleteReadBuffer,
    /// The combination of internal formats is not supported.
    Unsupported,
    /// Attachments disagree on their sample counts.
    IncompleteMultisample,
    /// Attachments disagree on being layered.
    IncompleteLayerTargets,
    /// A status code this crate does not know about.
    Unknown(u32),
}

impl fmt::Display for FramebufferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FramebufferStatus::Complete => write!(f, "complete"),
            FramebufferStatus::Undefined => write!(f, "undefined"),
            FramebufferStatus::IncompleteAttachment => write!(f, "incomplete attachment"),
            FramebufferStatus::MissingAttachment => write!(f, "missing attachment"),
            FramebufferStatus::IncompleteDrawBuffer => write!(f, "incomplete draw buffer"),
            FramebufferStatus::IncompleteReadBuffer => write!(f, "incomplete read buffer"),
            FramebufferStatus::Unsupported => write!(f, "unsupported format combination"),
            FramebufferStatus::IncompleteMultisample => write!(f, "incomplete multisample"),
            FramebufferStatus::IncompleteLayerTargets => write!(f, "incomplete layer targets"),
            FramebufferStatus::Unknown(code) => write!(f, "unknown status 0x{code:04X}"),
        }
    }
}

/// A live framebuffer object.
///
/// Keeps a copy of the texture it renders into so callers can find the
/// color target (and its size) from the framebuffer alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Framebuffer<F, T> {
    pub(crate) handle: F,
    pub(crate) texture: Option<Texture<T>>,
}

impl<F: Copy, T: Copy> Framebuffer<F, T> {
    /// The backend handle.
    pub fn handle(&self) -> F {
        self.handle
    }

    /// The color attachment, if one was given at creation.
    pub fn texture(&self) -> Option<&Texture<T>> {
        self.texture.as_ref()
    }
}
