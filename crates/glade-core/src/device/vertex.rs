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

use std::ptr::NonNull;

use bytemuck::Pod;

use crate::api::vertex::*;
use crate::device::GlDevice;
use crate::error::{ObjectKind, ResourceError, VertexDataError};
use crate::traits::NativeGl;

impl<G: NativeGl> GlDevice<G> {
    // --- Vertex data ---

    /// Creates a vertex buffer of `size` uninitialized bytes, at most
    /// [`MAX_VERTEX_DATA_SIZE`].
    ///
    /// Leaves no array buffer bound. On failure the generated name is released.
    pub fn create_vertex_data(
        &self,
        size: usize,
        usage: VertexDataUsage,
    ) -> Result<VertexData<G::Buffer>, ResourceError> {
        self.validate_byte_count(size)?;
        let handle = self.gl.create_buffer().map_err(|reason| {
            self.fail(ResourceError::CreationFailed {
                object: ObjectKind::Buffer,
                reason,
            })
        })?;

        if let Err(err) = self.allocate_vertex_data(handle, size, usage) {
            self.gl.bind_array_buffer(None);
            // SAFETY: the buffer was generated above and was never mapped.
            unsafe { self.gl.delete_buffer(handle) };
            return Err(err);
        }

        log::debug!("GlDevice: Created {usage:?} vertex data {handle:?} of {size} bytes");
        Ok(VertexData::new(handle, size))
    }

    fn allocate_vertex_data(
        &self,
        handle: G::Buffer,
        size: usize,
        usage: VertexDataUsage,
    ) -> Result<(), ResourceError> {
        self.check("generate vertex buffer object for vertex data")?;
        self.gl.bind_array_buffer(Some(handle));
        self.check("bind vertex data")?;
        // SAFETY: `handle` is freshly generated, so no mapping of it exists.
        unsafe { self.gl.array_buffer_data_size(size, usage) };
        self.check("create buffer for vertex data")?;
        self.gl.bind_array_buffer(None);
        self.check("unbind vertex data buffer")
    }

    /// Deletes a vertex buffer, dropping any mapping it still has.
    pub fn free_vertex_data(
        &self,
        vertex_data: VertexData<G::Buffer>,
    ) -> Result<(), ResourceError> {
        // SAFETY: `vertex_data` is consumed, taking any live mapping with it.
        unsafe { self.gl.delete_buffer(vertex_data.handle) };
        self.check("delete buffer from vertex data")?;
        log::debug!("GlDevice: Destroyed vertex data {:?}", vertex_data.handle);
        Ok(())
    }

    /// Binds a vertex buffer to the array-buffer target.
    pub fn bind_vertex_data(
        &self,
        vertex_data: &VertexData<G::Buffer>,
    ) -> Result<(), ResourceError> {
        self.gl.bind_array_buffer(Some(vertex_data.handle));
        self.check("bind vertex data")
    }

    /// Unbinds the array-buffer target.
    pub fn unbind_vertex_data(&self) -> Result<(), ResourceError> {
        self.gl.bind_array_buffer(None);
        self.check("unbind vertex data")
    }

    /// Maps the whole (bound) vertex buffer and rewinds its cursor.
    pub fn map_vertex_data(
        &self,
        vertex_data: &mut VertexData<G::Buffer>,
        access: MapAccess,
    ) -> Result<(), ResourceError> {
        let size = vertex_data.size;
        self.map_vertex_data_inner(vertex_data, access, 0, size, "map vertex data")
    }

    /// Maps `length` bytes at `offset` of the (bound) vertex buffer and
    /// rewinds its cursor. The range must lie inside the buffer.
    pub fn map_vertex_data_range(
        &self,
        vertex_data: &mut VertexData<G::Buffer>,
        access: MapAccess,
        offset: usize,
        length: usize,
    ) -> Result<(), ResourceError> {
        self.validate_byte_count(offset)?;
        self.validate_byte_count(length)?;
        let fits = offset
            .checked_add(length)
            .is_some_and(|end| end <= vertex_data.size);
        if !fits {
            return Err(self.fail(VertexDataError::RangeOutOfBounds {
                offset,
                length,
                size: vertex_data.size,
            }));
        }
        self.map_vertex_data_inner(
            vertex_data,
            access,
            offset,
            length,
            "map vertex data with range",
        )
    }

    fn map_vertex_data_inner(
        &self,
        vertex_data: &mut VertexData<G::Buffer>,
        access: MapAccess,
        offset: usize,
        length: usize,
        operation: &'static str,
    ) -> Result<(), ResourceError> {
        if self.gl.bound_array_buffer() != Some(vertex_data.handle) {
            return Err(self.fail(VertexDataError::NotBound));
        }
        if access.is_empty() {
            return Err(self.fail(VertexDataError::NoAccess));
        }
        if vertex_data.is_mapped() {
            return Err(self.fail(VertexDataError::AlreadyMapped));
        }
        let mapped = self.gl.map_array_buffer_range(offset, length, access);
        self.check(operation)?;
        let Some(mapped) = NonNull::new(mapped) else {
            return Err(self.fail(VertexDataError::MapFailed));
        };
        vertex_data.attach_mapping(mapped, length);
        Ok(())
    }

    /// Releases the mapping of the (bound) vertex buffer.
    ///
    /// The native unmap acts on the array-buffer binding, so the buffer must
    /// still be the bound one; otherwise nothing is unmapped.
    pub fn unmap_vertex_data(
        &self,
        vertex_data: &mut VertexData<G::Buffer>,
    ) -> Result<(), ResourceError> {
        if !vertex_data.is_mapped() {
            return Err(self.fail(VertexDataError::NotMapped));
        }
        if self.gl.bound_array_buffer() != Some(vertex_data.handle) {
            return Err(self.fail(VertexDataError::NotBound));
        }
        // SAFETY: the bound buffer is `vertex_data`, whose pointer is dropped
        // right after.
        unsafe { self.gl.unmap_array_buffer() };
        vertex_data.detach_mapping();
        self.check("unmap vertex data")
    }

    /// Appends `bytes` to a mapped vertex buffer, reporting failures through
    /// the diagnostics. An overflow is a warning and never aborts.
    pub fn push_vertex_data(
        &self,
        vertex_data: &mut VertexData<G::Buffer>,
        bytes: &[u8],
    ) -> Result<(), ResourceError> {
        vertex_data.push(bytes).map_err(|err| self.fail(err))
    }

    /// Typed form of [`push_vertex_data`](Self::push_vertex_data).
    pub fn push_vertex_pod<T: Pod>(
        &self,
        vertex_data: &mut VertexData<G::Buffer>,
        values: &[T],
    ) -> Result<(), ResourceError> {
        self.push_vertex_data(vertex_data, bytemuck::cast_slice(values))
    }

    fn validate_byte_count(&self, value: usize) -> Result<(), ResourceError> {
        if value > MAX_VERTEX_DATA_SIZE {
            return Err(self.fail(VertexDataError::TooLarge {
                value,
                max: MAX_VERTEX_DATA_SIZE,
            }));
        }
        Ok(())
    }

    // --- Vertex state ---

    /// Creates a vertex array. Leaves no vertex array bound.
    pub fn create_vertex_state(&self) -> Result<VertexState<G::VertexArray>, ResourceError> {
        let handle = self.gl.create_vertex_array().map_err(|reason| {
            self.fail(ResourceError::CreationFailed {
                object: ObjectKind::VertexArray,
                reason,
            })
        })?;

        let configured = self.check("generate vertex array object for vertex state").and_then(|()| {
            self.gl.bind_vertex_array(Some(handle));
            self.check("bind vertex state")?;
            self.gl.bind_vertex_array(None);
            self.check("unbind vertex state")
        });
        if let Err(err) = configured {
            self.gl.bind_vertex_array(None);
            self.gl.delete_vertex_array(handle);
            return Err(err);
        }

        log::debug!("GlDevice: Created vertex state {handle:?}");
        Ok(VertexState { handle })
    }

    /// Deletes a vertex array.
    pub fn free_vertex_state(
        &self,
        vertex_state: VertexState<G::VertexArray>,
    ) -> Result<(), ResourceError> {
        self.gl.delete_vertex_array(vertex_state.handle);
        self.check("delete vertex state")?;
        log::debug!("GlDevice: Destroyed vertex state {:?}", vertex_state.handle);
        Ok(())
    }

    /// Binds a vertex array.
    pub fn bind_vertex_state(
        &self,
        vertex_state: &VertexState<G::VertexArray>,
    ) -> Result<(), ResourceError> {
        self.gl.bind_vertex_array(Some(vertex_state.handle));
        self.check("bind vertex state")
    }

    /// Unbinds the current vertex array.
    pub fn unbind_vertex_state(&self) -> Result<(), ResourceError> {
        self.gl.bind_vertex_array(None);
        self.check("unbind vertex state")
    }
}
