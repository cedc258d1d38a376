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

//! Vertex buffers, their mapped push accumulator, and vertex arrays.

use std::ptr::{self, NonNull};

use bitflags::bitflags;
use bytemuck::Pod;

use crate::error::VertexDataError;

/// Largest size, offset or length in bytes the native buffer calls accept.
pub const MAX_VERTEX_DATA_SIZE: usize = i32::MAX as usize;

/// Expected update frequency of a vertex buffer's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VertexDataUsage {
    /// Written once, drawn many times.
    Static,
    /// Rewritten often, drawn many times.
    Dynamic,
}

bitflags! {
    /// Access requested when mapping a vertex buffer into client memory.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MapAccess: u8 {
        /// The mapping will be read from.
        const READ = 0b01;
        /// The mapping will be written to.
        const WRITE = 0b10;
    }
}

impl MapAccess {
    /// Builds an access mask from two switches.
    pub fn from_flags(read: bool, write: bool) -> Self {
        let mut access = MapAccess::empty();
        access.set(MapAccess::READ, read);
        access.set(MapAccess::WRITE, write);
        access
    }
}

/// A vertex buffer object plus a cursor into its current mapping.
///
/// While mapped, [`push`](Self::push) appends bytes at the cursor and
/// [`clear`](Self::clear) zeroes the mapped range. `range` is the length of
/// the current mapping and `count` the number of bytes pushed into it.
#[derive(Debug)]
pub struct VertexData<B> {
    pub(crate) handle: B,
    pub(crate) size: usize,
    pub(crate) range: usize,
    pub(crate) count: usize,
    pub(crate) mapped: Option<NonNull<u8>>,
}

// SAFETY: the mapped pointer is only dereferenced through `&mut self` or
// `&self` methods, and the mapping itself is owned by the native context,
// not by the thread that created it.
unsafe impl<B: Send> Send for VertexData<B> {}

impl<B: Copy> VertexData<B> {
    pub(crate) fn new(handle: B, size: usize) -> Self {
        Self {
            handle,
            size,
            range: 0,
            count: 0,
            mapped: None,
        }
    }

    /// The backend handle.
    pub fn handle(&self) -> B {
        self.handle
    }

    /// Allocated size of the buffer in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Length of the current (or last) mapping in bytes.
    pub fn range(&self) -> usize {
        self.range
    }

    /// Bytes pushed since the buffer was last mapped or cleared.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Bytes left before the end of the mapped range.
    pub fn remaining(&self) -> usize {
        self.range - self.count
    }

    /// Whether the buffer is currently mapped.
    pub fn is_mapped(&self) -> bool {
        self.mapped.is_some()
    }

    /// Appends `bytes` at the cursor.
    ///
    /// Fails without writing anything if the bytes do not fit in the
    /// remaining mapped range. Nothing is logged here;
    /// [`GlDevice::push_vertex_data`](crate::GlDevice::push_vertex_data)
    /// reports failures through the device diagnostics.
    pub fn push(&mut self, bytes: &[u8]) -> Result<(), VertexDataError> {
        let Some(mapped) = self.mapped else {
            return Err(VertexDataError::NotMapped);
        };
        let available = self.remaining();
        if bytes.len() > available {
            return Err(VertexDataError::Overflow {
                requested: bytes.len(),
                available,
            });
        }
        // SAFETY: the mapping covers `range` bytes and `count + len <= range`.
        unsafe {
            ptr::copy_nonoverlapping(
                bytes.as_ptr(),
                mapped.as_ptr().add(self.count),
                bytes.len(),
            );
        }
        self.count += bytes.len();
        Ok(())
    }

    /// Appends a slice of plain-old-data values, e.g. vertex structs.
    pub fn push_pod<T: Pod>(&mut self, values: &[T]) -> Result<(), VertexDataError> {
        self.push(bytemuck::cast_slice(values))
    }

    /// Zeroes the whole mapped range and rewinds the cursor.
    pub fn clear(&mut self) -> Result<(), VertexDataError> {
        let Some(mapped) = self.mapped else {
            return Err(VertexDataError::NotMapped);
        };
        // SAFETY: the mapping covers `range` bytes.
        unsafe { ptr::write_bytes(mapped.as_ptr(), 0, self.range) };
        self.count = 0;
        Ok(())
    }

    /// The whole mapped range, or `None` when unmapped.
    pub fn mapped_bytes(&self) -> Option<&[u8]> {
        // SAFETY: the mapping covers `range` bytes and stays valid until
        // `unmap_vertex_data`, which needs `&mut self`.
        self.mapped
            .map(|mapped| unsafe { std::slice::from_raw_parts(mapped.as_ptr(), self.range) })
    }

    pub(crate) fn attach_mapping(&mut self, mapped: NonNull<u8>, range: usize) {
        self.mapped = Some(mapped);
        self.range = range;
        self.count = 0;
    }

    pub(crate) fn detach_mapping(&mut self) {
        self.mapped = None;
    }
}

/// A live vertex array object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexState<V> {
    pub(crate) handle: V,
}

impl<V: Copy> VertexState<V> {
    /// The backend handle.
    pub fn handle(&self) -> V {
        self.handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapped_over(storage: &mut [u8]) -> VertexData<u32> {
        let mut data = VertexData::new(1, storage.len());
        let mapped = NonNull::new(storage.as_mut_ptr()).unwrap();
        data.attach_mapping(mapped, storage.len());
        data
    }

    #[test]
    fn push_advances_cursor() {
        let mut storage = [0u8; 8];
        let mut data = mapped_over(&mut storage);
        data.push(&[1, 2, 3]).unwrap();
        data.push(&[4]).unwrap();
        assert_eq!(data.count(), 4);
        assert_eq!(data.remaining(), 4);
        assert_eq!(&data.mapped_bytes().unwrap()[..4], &[1, 2, 3, 4]);
    }

    #[test]
    fn push_exactly_to_the_end() {
        let mut storage = [0u8; 4];
        let mut data = mapped_over(&mut storage);
        data.push(&[9, 9, 9, 9]).unwrap();
        assert_eq!(data.remaining(), 0);
    }

    #[test]
    fn overflow_leaves_cursor_untouched() {
        let mut storage = [0u8; 4];
        let mut data = mapped_over(&mut storage);
        data.push(&[1, 2, 3]).unwrap();
        let err = data.push(&[4, 5]).unwrap_err();
        assert_eq!(
            err,
            VertexDataError::Overflow {
                requested: 2,
                available: 1
            }
        );
        assert_eq!(data.count(), 3);
        assert_eq!(data.mapped_bytes().unwrap(), &[1, 2, 3, 0]);
    }

    #[test]
    fn clear_zeroes_and_rewinds() {
        let mut storage = [0u8; 4];
        let mut data = mapped_over(&mut storage);
        data.push(&[7, 7, 7]).unwrap();
        data.clear().unwrap();
        assert_eq!(data.count(), 0);
        assert_eq!(data.mapped_bytes().unwrap(), &[0, 0, 0, 0]);
    }

    #[test]
    fn push_pod_writes_native_bytes() {
        let mut storage = [0u8; 8];
        let mut data = mapped_over(&mut storage);
        data.push_pod(&[1.0f32, -2.0]).unwrap();
        let expected: Vec<u8> = [1.0f32, -2.0]
            .iter()
            .flat_map(|v| v.to_ne_bytes())
            .collect();
        assert_eq!(data.mapped_bytes().unwrap(), expected.as_slice());
    }

    #[test]
    fn unmapped_buffer_rejects_writes() {
        let mut data = VertexData::new(1u32, 16);
        assert_eq!(data.push(&[1]), Err(VertexDataError::NotMapped));
        assert_eq!(data.clear(), Err(VertexDataError::NotMapped));
        assert!(data.mapped_bytes().is_none());
    }

    #[test]
    fn map_access_from_flags() {
        assert_eq!(MapAccess::from_flags(true, true), MapAccess::all());
        assert_eq!(MapAccess::from_flags(false, true), MapAccess::WRITE);
        assert!(MapAccess::from_flags(false, false).is_empty());
    }
}
