// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
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

//! Test fixtures for common test scenarios

use adscene::core::memory::RAM_SIZE;
use adscene::core::scene::SceneLayout;
use adscene::core::snapshot::{Snapshot, SNAPSHOT_SIZE};
use std::io::Write;
use tempfile::NamedTempFile;

/// Builder for synthetic snapshot files
///
/// Addresses are given the way the game sees them; the segment tag is
/// stripped before writing.
pub struct SnapshotBuilder {
    data: Vec<u8>,
}

#[allow(dead_code)]
impl SnapshotBuilder {
    pub fn new() -> Self {
        Self {
            data: vec![0u8; SNAPSHOT_SIZE],
        }
    }

    fn offset(address: u32) -> usize {
        let offset = (address & 0x00FF_FFFF) as usize;
        assert!(offset < RAM_SIZE as usize, "0x{:08X} is not a RAM address", address);
        offset
    }

    pub fn bytes(&mut self, address: u32, bytes: &[u8]) -> &mut Self {
        let offset = Self::offset(address);
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    pub fn u16(&mut self, address: u32, value: u16) -> &mut Self {
        self.bytes(address, &value.to_le_bytes())
    }

    pub fn u32(&mut self, address: u32, value: u32) -> &mut Self {
        self.bytes(address, &value.to_le_bytes())
    }

    /// Write the grid dimensions at the default header addresses
    pub fn grid(&mut self, log2_width: u16, log2_height: u16, max_x: i16, max_y: i16) -> &mut Self {
        let layout = SceneLayout::default();
        self.u16(layout.log2_width, log2_width)
            .u16(layout.log2_height, log2_height)
            .u16(layout.max_x, max_x as u16)
            .u16(layout.max_y, max_y as u16)
    }

    /// Write the three table pointers at the default header addresses
    pub fn tables(&mut self, voxels: u32, descriptor_pointers: u32, vertices: u32) -> &mut Self {
        let layout = SceneLayout::default();
        self.u32(layout.voxels_pointer, voxels)
            .u32(layout.polygon_descriptors_pointers, descriptor_pointers)
            .u32(layout.vertices_pointer, vertices)
    }

    /// Write a polygon descriptor record
    pub fn descriptor(
        &mut self,
        address: u32,
        vertices: [u16; 4],
        texture_page: u16,
        flags: u16,
    ) -> &mut Self {
        let mut record = [0u8; 24];
        for (i, index) in vertices.iter().enumerate() {
            record[i * 2..i * 2 + 2].copy_from_slice(&index.to_le_bytes());
        }
        record[0x0E..0x10].copy_from_slice(&texture_page.to_le_bytes());
        record[0x16..0x18].copy_from_slice(&flags.to_le_bytes());
        self.bytes(address, &record)
    }

    /// Write a vertex record
    pub fn vertex(&mut self, address: u32, x: i16, y: i16, z: i16) -> &mut Self {
        let mut record = [0u8; 8];
        record[0..2].copy_from_slice(&x.to_le_bytes());
        record[2..4].copy_from_slice(&y.to_le_bytes());
        record[4..6].copy_from_slice(&z.to_le_bytes());
        self.bytes(address, &record)
    }

    /// Fill VRAM with a recognizable pattern
    pub fn vram_pattern(&mut self) -> &mut Self {
        for (i, byte) in self.data[RAM_SIZE as usize..].iter_mut().enumerate() {
            *byte = (i % 251) as u8;
        }
        self
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn build(self) -> Snapshot {
        Snapshot::from_vec(self.data).expect("builder keeps the snapshot size")
    }

    /// Write the snapshot to a temporary file
    pub fn write_file(self) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(&self.data).expect("Failed to write snapshot");
        file
    }
}

/// Coordinates seeded by [`create_two_cell_snapshot`], by vertex index
#[allow(dead_code)]
pub const TWO_CELL_VERTICES: [(i16, i16, i16); 8] = [
    (0x0000, 0x0000, 0x0000),
    (0x1000, 0x0000, 0x0000),
    (0x0000, 0x1000, 0x0000),
    (0x1000, 0x1000, 0x0000),
    (-0x0800, 0x0400, 0x0200),
    (0x0800, 0x0400, 0x0200),
    (-0x0800, -0x0400, 0x7FFF),
    (0x0800, -0x0400, -0x8000),
];

/// Snapshot with a 2×1 grid, one quad per cell
///
/// Cell (0, 0) draws vertices 0-3 opaque without background; cell (1, 0)
/// draws vertices 4-7 semi-transparent with background.
#[allow(dead_code)]
pub fn create_two_cell_snapshot() -> SnapshotBuilder {
    let mut builder = SnapshotBuilder::new();
    builder
        .grid(1, 0, 1, 0)
        .tables(0x8009_0000, 0x8009_1000, 0x8009_2000)
        .u16(0x8009_0000, 0x0001)
        .u16(0x8009_0002, 0xC002)
        .u32(0x8009_1004, 0x8009_3000)
        .u32(0x8009_1008, 0x8009_3018)
        .descriptor(0x8009_3000, [0, 1, 2, 3], 0x0011, 0x8001)
        .descriptor(0x8009_3018, [4, 5, 6, 7], 0x0012, 0x8101)
        .vram_pattern();

    for (i, &(x, y, z)) in TWO_CELL_VERTICES.iter().enumerate() {
        builder.vertex(0x8009_2000 + i as u32 * 8, x, y, z);
    }
    builder
}
