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

//! Scene extraction from a RAM snapshot
//!
//! A scene is a 2D grid of cells ("voxels"), each holding the textured quads
//! drawn at that grid position, plus the shared vertex table those quads
//! index into and the raw VRAM image their textures live in.
//!
//! # Decoding
//!
//! 1. Read the grid dimensions and the three table pointers from the
//!    header addresses of a [`SceneLayout`].
//! 2. For every cell of every row, read its grid record. Non-empty cells
//!    look up their descriptor list pointer and walk the chain (see
//!    [`DescriptorChain`]), keeping the largest vertex index seen.
//! 3. Read `max vertex index + 1` vertices from the vertex table.
//!
//! Decoding is all-or-nothing: any out of bounds read fails the whole
//! decode and leaves a previously decoded scene untouched.
//!
//! # Example
//!
//! ```
//! use adscene::core::memory::PsxRam;
//! use adscene::core::scene::Scene;
//!
//! // An all-zero snapshot has null pointers; the vertex table at 0
//! // still holds the single vertex every scene has.
//! let ram = PsxRam::new();
//! let mut scene = Scene::new();
//! scene.read(&ram, &[]).unwrap();
//!
//! assert_eq!(scene.width(), 1);
//! assert_eq!(scene.height(), 1);
//! assert_eq!(scene.vertices().len(), 1);
//! ```

use crate::core::error::{Result, SceneError};
use crate::core::memory::{PsxRam, PsxRamAddress, RamRecord, RAM_SIZE};
use crate::core::snapshot::Snapshot;

mod chain;
mod layout;
mod records;

pub use chain::{DescriptorChain, MAX_CHAIN_RECORDS};
pub use layout::SceneLayout;
pub use records::{
    Point3D, PolygonAttributes, PolygonDescriptor, PolygonDescriptorFlags, VoxelFlags,
    VoxelRecord, FIXED_POINT_FRACTIONAL_BITS,
};

/// One decoded grid cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Voxel {
    /// Whether the cell's background layer should be drawn
    pub draw_background: bool,
    /// Accepted descriptors in chain order
    pub polygon_descriptors: Vec<PolygonDescriptor>,
}

impl Voxel {
    pub fn is_empty(&self) -> bool {
        self.polygon_descriptors.is_empty()
    }
}

/// Scene header values read from the layout addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SceneHeader {
    log2_width: u8,
    log2_height: u8,
    max_x: i16,
    max_y: i16,
    voxels: PsxRamAddress,
    descriptor_pointers: PsxRamAddress,
    vertices: PsxRamAddress,
}

impl SceneHeader {
    fn read(ram: &PsxRam, layout: &SceneLayout) -> Result<Self> {
        let header = Self {
            log2_width: (ram.read_u16(PsxRamAddress::new(layout.log2_width))? & 0x1F) as u8,
            log2_height: (ram.read_u16(PsxRamAddress::new(layout.log2_height))? & 0x1F) as u8,
            max_x: ram.read_i16(PsxRamAddress::new(layout.max_x))?,
            max_y: ram.read_i16(PsxRamAddress::new(layout.max_y))?,
            voxels: ram.read_address(PsxRamAddress::new(layout.voxels_pointer))?,
            descriptor_pointers: ram
                .read_address(PsxRamAddress::new(layout.polygon_descriptors_pointers))?,
            vertices: ram.read_address(PsxRamAddress::new(layout.vertices_pointer))?,
        };
        log::debug!(
            "Scene header: log2 size {}x{}, max ({}, {}), voxels {}, descriptors {}, vertices {}",
            header.log2_width,
            header.log2_height,
            header.max_x,
            header.max_y,
            header.voxels,
            header.descriptor_pointers,
            header.vertices
        );
        Ok(header)
    }
}

/// Decoded scene
///
/// Built wholesale by [`Scene::decode`]; the read methods replace the
/// whole scene only once decoding succeeded.
#[derive(Debug, Clone)]
pub struct Scene {
    layout: SceneLayout,
    min_x: i16,
    max_x: i16,
    min_y: i16,
    max_y: i16,
    log2_width: u8,
    log2_height: u8,
    voxels: Vec<Voxel>,
    vertices: Vec<Point3D>,
    vram: Vec<u8>,
}

impl Scene {
    /// Create an empty scene (no cells, no vertices)
    pub fn new() -> Self {
        Self {
            layout: SceneLayout::default(),
            min_x: 0,
            max_x: -1,
            min_y: 0,
            max_y: -1,
            log2_width: 0,
            log2_height: 0,
            voxels: Vec::new(),
            vertices: Vec::new(),
            vram: Vec::new(),
        }
    }

    /// Number of grid columns
    pub fn width(&self) -> u32 {
        span_length(self.min_x, self.max_x)
    }

    /// Number of grid rows
    pub fn height(&self) -> u32 {
        span_length(self.min_y, self.max_y)
    }

    pub fn log2_width(&self) -> u8 {
        self.log2_width
    }

    pub fn log2_height(&self) -> u8 {
        self.log2_height
    }

    /// Distance between two rows in the cell array
    pub fn row_stride(&self) -> usize {
        1usize << self.log2_width
    }

    /// Layout the scene was decoded with
    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    fn voxel_index(&self, x: u32, y: u32) -> usize {
        x as usize + ((y as usize) << self.log2_width)
    }

    /// Cells of row `y`, `width()` long
    pub fn row(&self, y: u32) -> Option<&[Voxel]> {
        if y >= self.height() {
            return None;
        }
        let start = self.voxel_index(0, y);
        self.voxels.get(start..start + self.width() as usize)
    }

    pub fn voxel(&self, x: u32, y: u32) -> Option<&Voxel> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.voxels.get(self.voxel_index(x, y))
    }

    /// Whole cell array, row-major with [`Scene::row_stride`] cells per row
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    pub fn vertex(&self, index: u16) -> Option<&Point3D> {
        self.vertices.get(usize::from(index))
    }

    pub fn vertices(&self) -> &[Point3D] {
        &self.vertices
    }

    /// Raw VRAM image, not decoded
    pub fn vram(&self) -> &[u8] {
        &self.vram
    }

    /// Total number of accepted descriptors over all cells
    pub fn descriptor_count(&self) -> usize {
        self.voxels.iter().map(|v| v.polygon_descriptors.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Replace this scene with one decoded from `ram` using the default layout
    ///
    /// # Errors
    ///
    /// On any error the current scene is left unchanged.
    pub fn read(&mut self, ram: &PsxRam, vram: &[u8]) -> Result<()> {
        self.read_with_layout(ram, vram, &SceneLayout::default())
    }

    pub fn read_with_layout(
        &mut self,
        ram: &PsxRam,
        vram: &[u8],
        layout: &SceneLayout,
    ) -> Result<()> {
        *self = Self::decode(ram, vram, layout)?;
        Ok(())
    }

    /// Replace this scene with one decoded from a whole snapshot
    pub fn read_snapshot(&mut self, snapshot: &Snapshot, layout: &SceneLayout) -> Result<()> {
        *self = Self::decode_snapshot(snapshot, layout)?;
        Ok(())
    }

    pub fn decode_snapshot(snapshot: &Snapshot, layout: &SceneLayout) -> Result<Self> {
        let ram = snapshot.to_ram()?;
        Self::decode(&ram, snapshot.vram(), layout)
    }

    /// Decode a scene
    ///
    /// # Arguments
    ///
    /// * `ram` - Loaded main RAM image
    /// * `vram` - Raw VRAM bytes, stored verbatim
    /// * `layout` - Header addresses
    pub fn decode(ram: &PsxRam, vram: &[u8], layout: &SceneLayout) -> Result<Self> {
        let header = SceneHeader::read(ram, layout)?;
        let (voxels, max_vertex_index) = Self::read_voxels(ram, &header)?;
        let vertices = Self::read_vertices(ram, &header, max_vertex_index)?;

        let scene = Self {
            layout: *layout,
            min_x: 0,
            max_x: header.max_x,
            min_y: 0,
            max_y: header.max_y,
            log2_width: header.log2_width,
            log2_height: header.log2_height,
            voxels,
            vertices,
            vram: vram.to_vec(),
        };
        log::debug!(
            "Decoded {}x{} scene: {} descriptors, {} vertices",
            scene.width(),
            scene.height(),
            scene.descriptor_count(),
            scene.vertices.len()
        );
        Ok(scene)
    }

    fn read_voxels(ram: &PsxRam, header: &SceneHeader) -> Result<(Vec<Voxel>, u16)> {
        let columns = span_length(0, header.max_x);
        let rows = span_length(0, header.max_y);
        let stride = 1u64 << header.log2_width;

        if u64::from(columns) > stride {
            return Err(SceneError::InvalidGrid(format!(
                "{} columns do not fit a row stride of {}",
                columns, stride
            )));
        }
        let voxel_count = u64::from(rows) << header.log2_width;
        if voxel_count * VoxelRecord::SIZE as u64 > u64::from(RAM_SIZE) {
            return Err(SceneError::InvalidGrid(format!(
                "{} grid cells do not fit in main RAM",
                voxel_count
            )));
        }
        if rows > (1u32 << header.log2_height) {
            log::warn!(
                "Grid has {} rows but log2 height is {}",
                rows,
                header.log2_height
            );
        }

        let mut voxels = vec![Voxel::default(); voxel_count as usize];
        let mut max_vertex_index = 0u16;

        for y in 0..rows {
            for x in 0..columns {
                let index = x + (y << header.log2_width);
                let record: VoxelRecord =
                    ram.read_as(header.voxels + index * VoxelRecord::SIZE as u32)?;
                if record.is_empty() {
                    continue;
                }

                let voxel = &mut voxels[index as usize];
                voxel.draw_background = record.draws_background();

                let list_address = ram.read_address(
                    header.descriptor_pointers
                        + u32::from(record.polygon_descriptors_index) * PsxRamAddress::SIZE as u32,
                )?;
                log::trace!(
                    "Cell ({}, {}): list {} at {}",
                    x,
                    y,
                    record.polygon_descriptors_index,
                    list_address
                );

                for descriptor in DescriptorChain::new(ram, list_address) {
                    let descriptor = descriptor?;
                    max_vertex_index = max_vertex_index.max(descriptor.max_vertex_index());
                    voxel.polygon_descriptors.push(descriptor);
                }
            }
        }

        Ok((voxels, max_vertex_index))
    }

    fn read_vertices(
        ram: &PsxRam,
        header: &SceneHeader,
        max_vertex_index: u16,
    ) -> Result<Vec<Point3D>> {
        ram.read_array(header.vertices, u32::from(max_vertex_index) + 1)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of integers in `[min, max]`, 0 when `max < min`
fn span_length(min: i16, max: i16) -> u32 {
    (i32::from(max) - i32::from(min) + 1).max(0) as u32
}

#[cfg(test)]
mod tests;
