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

//! Scene records as laid out in RAM
//!
//! All records are little-endian and packed. Sub-byte fields are unpacked
//! with explicit shifts and masks when the record is read; nothing outside
//! this module sees the packed form.
//!
//! # Grid Cell Record (2 bytes)
//!
//! ```text
//!   Bit 0-13:  Polygon descriptor list index (0 = empty cell)
//!   Bit 14-15: Cell flags
//! ```
//!
//! # Polygon Descriptor Record (24 bytes)
//!
//! ```text
//!   0x00: u16 vertex 1 index        0x0C: u16 texcoord 2
//!   0x02: u16 vertex 2 index        0x0E: u16 texture page
//!   0x04: u16 vertex 3 index        0x10: u16 normal vector index
//!   0x06: u16 vertex 4 index        0x12: u16 texcoord 3
//!   0x08: u16 texcoord 1            0x14: u16 texcoord 4
//!   0x0A: u16 CLUT                  0x16: u8  size / next offset
//!                                   0x17: u8  attribute flags
//! ```
//!
//! Texcoord 2 and the texture page form one 32-bit word; a zero word marks
//! a placeholder record without geometry.
//!
//! # Vertex Record (8 bytes)
//!
//! Three signed 16-bit coordinates with 12 fractional bits, then 16 bits of
//! padding.

use crate::core::gpu::{Clut, TexCoord, TexturePage};
use crate::core::memory::RamRecord;
use bitflags::bitflags;

fn u16_at(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn i16_at(bytes: &[u8], offset: usize) -> i16 {
    i16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

/// Grid cell flags (2 bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoxelFlags {
    DoNotDrawBackground = 0,
    Unknown1 = 1,
    Unknown2 = 2,
    DrawMonochromeOpaquePolygons = 3,
}

impl From<u8> for VoxelFlags {
    fn from(bits: u8) -> Self {
        match bits & 0x3 {
            0 => VoxelFlags::DoNotDrawBackground,
            1 => VoxelFlags::Unknown1,
            2 => VoxelFlags::Unknown2,
            _ => VoxelFlags::DrawMonochromeOpaquePolygons,
        }
    }
}

/// Grid cell record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoxelRecord {
    /// Index into the descriptor list pointer table (14 bits)
    pub polygon_descriptors_index: u16,
    pub flags: VoxelFlags,
}

impl VoxelRecord {
    pub fn is_empty(&self) -> bool {
        self.polygon_descriptors_index == 0
    }

    /// Whether the cell's background layer should be drawn
    pub fn draws_background(&self) -> bool {
        self.flags != VoxelFlags::DoNotDrawBackground
    }
}

impl RamRecord for VoxelRecord {
    const SIZE: usize = 2;

    fn from_le_bytes(bytes: &[u8]) -> Self {
        let raw = u16_at(bytes, 0);
        Self {
            polygon_descriptors_index: raw & 0x3FFF,
            flags: VoxelFlags::from((raw >> 14) as u8),
        }
    }
}

bitflags! {
    /// High byte of the polygon descriptor flags
    ///
    /// Bits 1-6 have no known meaning and are retained as-is.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PolygonAttributes: u8 {
        const SEMI_TRANSPARENT = 1 << 0;
        const LAST_POLYGON = 1 << 7;
    }
}

/// Trailing flags of a polygon descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolygonDescriptorFlags {
    /// Low nibble of the low byte
    pub some_size: u8,
    /// High nibble of the low byte
    pub next_polygon_offset: u8,
    pub attributes: PolygonAttributes,
}

impl PolygonDescriptorFlags {
    pub fn from_u16(value: u16) -> Self {
        let low = (value & 0xFF) as u8;
        Self {
            some_size: low & 0xF,
            next_polygon_offset: low >> 4,
            attributes: PolygonAttributes::from_bits_retain((value >> 8) as u8),
        }
    }

    /// Low byte with both nibbles packed back together
    pub fn low_byte(&self) -> u8 {
        (self.next_polygon_offset << 4) | (self.some_size & 0xF)
    }

    pub fn is_semi_transparent(&self) -> bool {
        self.attributes.contains(PolygonAttributes::SEMI_TRANSPARENT)
    }

    pub fn is_last_polygon(&self) -> bool {
        self.attributes.contains(PolygonAttributes::LAST_POLYGON)
    }

    /// Placeholder that closes the chain without geometry
    pub fn is_end_sentinel(&self) -> bool {
        self.low_byte() == 1 && self.is_last_polygon()
    }

    /// Descriptor after which no further record belongs to the chain
    pub fn ends_chain(&self) -> bool {
        self.some_size == 1 && self.is_last_polygon() && self.next_polygon_offset == 0
    }
}

/// Polygon descriptor record
///
/// Describes one textured quad of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolygonDescriptor {
    pub vertex_indices: [u16; 4],
    pub tex_coord1: TexCoord,
    pub clut: Clut,
    pub tex_coord2: TexCoord,
    pub texture_page: TexturePage,
    pub normal_vector_index: u16,
    pub tex_coord3: TexCoord,
    pub tex_coord4: TexCoord,
    pub flags: PolygonDescriptorFlags,
    /// Texcoord 2 and texture page as one word
    texture_word: u32,
}

impl PolygonDescriptor {
    /// Whether this record is a placeholder without geometry
    pub fn is_placeholder(&self) -> bool {
        self.texture_word == 0
    }

    pub fn texture_word(&self) -> u32 {
        self.texture_word
    }

    pub fn max_vertex_index(&self) -> u16 {
        self.vertex_indices.iter().copied().max().unwrap_or(0)
    }

    /// Texture coordinates in vertex order
    pub fn tex_coords(&self) -> [TexCoord; 4] {
        [
            self.tex_coord1,
            self.tex_coord2,
            self.tex_coord3,
            self.tex_coord4,
        ]
    }

    pub fn is_semi_transparent(&self) -> bool {
        self.flags.is_semi_transparent()
    }
}

impl RamRecord for PolygonDescriptor {
    const SIZE: usize = 24;

    fn from_le_bytes(bytes: &[u8]) -> Self {
        let tex_coord2 = u16_at(bytes, 0x0C);
        let texture_page = u16_at(bytes, 0x0E);
        Self {
            vertex_indices: [
                u16_at(bytes, 0x00),
                u16_at(bytes, 0x02),
                u16_at(bytes, 0x04),
                u16_at(bytes, 0x06),
            ],
            tex_coord1: TexCoord::from_u16(u16_at(bytes, 0x08)),
            clut: Clut::from_u16(u16_at(bytes, 0x0A)),
            tex_coord2: TexCoord::from_u16(tex_coord2),
            texture_page: TexturePage::from_u16(texture_page),
            normal_vector_index: u16_at(bytes, 0x10),
            tex_coord3: TexCoord::from_u16(u16_at(bytes, 0x12)),
            tex_coord4: TexCoord::from_u16(u16_at(bytes, 0x14)),
            flags: PolygonDescriptorFlags::from_u16(u16_at(bytes, 0x16)),
            texture_word: u32::from(tex_coord2) | (u32::from(texture_page) << 16),
        }
    }
}

/// Number of fractional bits in vertex coordinates
pub const FIXED_POINT_FRACTIONAL_BITS: u32 = 12;

const FIXED_POINT_ONE: f32 = (1 << FIXED_POINT_FRACTIONAL_BITS) as f32;

/// Vertex record in 4.12 fixed point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point3D {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl Point3D {
    pub fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Coordinates converted to real units
    ///
    /// # Examples
    ///
    /// ```
    /// use adscene::core::scene::Point3D;
    ///
    /// let point = Point3D::new(4096, -2048, 1024);
    /// assert_eq!(point.to_f32(), [1.0, -0.5, 0.25]);
    /// ```
    pub fn to_f32(&self) -> [f32; 3] {
        [
            f32::from(self.x) / FIXED_POINT_ONE,
            f32::from(self.y) / FIXED_POINT_ONE,
            f32::from(self.z) / FIXED_POINT_ONE,
        ]
    }

    /// Component-wise wrapping sum
    pub fn wrapping_add(&self, other: &Point3D) -> Point3D {
        Point3D {
            x: self.x.wrapping_add(other.x),
            y: self.y.wrapping_add(other.y),
            z: self.z.wrapping_add(other.z),
        }
    }
}

impl RamRecord for Point3D {
    const SIZE: usize = 8;

    fn from_le_bytes(bytes: &[u8]) -> Self {
        Self {
            x: i16_at(bytes, 0),
            y: i16_at(bytes, 2),
            z: i16_at(bytes, 4),
        }
    }
}
