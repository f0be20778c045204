// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Helper functions for scene tests

use super::*;

/// Descriptor flags: size 1, last polygon, no next offset
#[allow(dead_code)]
pub const FLAGS_LAST: u16 = 0x8001;

/// Descriptor flags: continue with the next record
#[allow(dead_code)]
pub const FLAGS_CONTINUE: u16 = 0x0000;

/// A non-zero texture word (texcoord 2 = (1, 0), page 1)
#[allow(dead_code)]
pub const TEXTURED: u32 = 0x0001_0001;

/// Writable RAM image addressed like the console would address it
pub struct RamImage {
    bytes: Vec<u8>,
}

#[allow(dead_code)]
impl RamImage {
    pub fn new() -> Self {
        Self {
            bytes: vec![0u8; RAM_SIZE as usize],
        }
    }

    fn offset(address: u32) -> usize {
        (address & 0x00FF_FFFF) as usize
    }

    pub fn write_bytes(&mut self, address: u32, bytes: &[u8]) {
        let offset = Self::offset(address);
        self.bytes[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    pub fn write_u16(&mut self, address: u32, value: u16) {
        self.write_bytes(address, &value.to_le_bytes());
    }

    pub fn write_u32(&mut self, address: u32, value: u32) {
        self.write_bytes(address, &value.to_le_bytes());
    }

    /// Write a 24-byte polygon descriptor
    pub fn write_descriptor(&mut self, address: u32, vertices: [u16; 4], texture_word: u32, flags: u16) {
        let mut record = [0u8; 24];
        for (i, index) in vertices.iter().enumerate() {
            record[i * 2..i * 2 + 2].copy_from_slice(&index.to_le_bytes());
        }
        record[0x0C..0x10].copy_from_slice(&texture_word.to_le_bytes());
        record[0x16..0x18].copy_from_slice(&flags.to_le_bytes());
        self.write_bytes(address, &record);
    }

    /// Write an 8-byte vertex record
    pub fn write_vertex(&mut self, address: u32, x: i16, y: i16, z: i16) {
        let mut record = [0u8; 8];
        record[0..2].copy_from_slice(&x.to_le_bytes());
        record[2..4].copy_from_slice(&y.to_le_bytes());
        record[4..6].copy_from_slice(&z.to_le_bytes());
        self.write_bytes(address, &record);
    }

    /// Write the scene header at the addresses of `layout`
    #[allow(clippy::too_many_arguments)]
    pub fn write_header(
        &mut self,
        layout: &SceneLayout,
        log2_width: u16,
        log2_height: u16,
        max_x: i16,
        max_y: i16,
        voxels: u32,
        descriptor_pointers: u32,
        vertices: u32,
    ) {
        self.write_u16(layout.log2_width, log2_width);
        self.write_u16(layout.log2_height, log2_height);
        self.write_u16(layout.max_x, max_x as u16);
        self.write_u16(layout.max_y, max_y as u16);
        self.write_u32(layout.voxels_pointer, voxels);
        self.write_u32(layout.polygon_descriptors_pointers, descriptor_pointers);
        self.write_u32(layout.vertices_pointer, vertices);
    }

    pub fn to_ram(&self) -> PsxRam {
        let mut ram = PsxRam::new();
        ram.load(&self.bytes).expect("image has the RAM size");
        ram
    }
}

/// Builds the two-cell scene used by several tests
///
/// Grid: 2×1 with a row stride of 2. Cell (0, 0) uses list 1 with one
/// opaque quad over vertices 0-3; cell (1, 0) uses list 2 with one
/// semi-transparent quad over vertices 4-7 and draws its background.
#[allow(dead_code)]
pub fn create_two_cell_image() -> RamImage {
    let layout = SceneLayout::default();
    let mut image = RamImage::new();
    image.write_header(&layout, 1, 0, 1, 0, 0x8001_0000, 0x8001_1000, 0x8001_2000);

    image.write_u16(0x8001_0000, 0x0001);
    image.write_u16(0x8001_0002, 0x4002);

    image.write_u32(0x8001_1004, 0x8001_3000);
    image.write_u32(0x8001_1008, 0x8001_3100);

    image.write_descriptor(0x8001_3000, [0, 1, 2, 3], TEXTURED, FLAGS_LAST);
    image.write_descriptor(0x8001_3100, [4, 5, 6, 7], TEXTURED, 0x8101);

    for i in 0..8i16 {
        image.write_vertex(0x8001_2000 + i as u32 * 8, i * 0x100, -i * 0x100, 0x1000);
    }
    image
}

/// Collects a whole chain, panicking on the first error
#[allow(dead_code)]
pub fn collect_chain(ram: &PsxRam, start: u32) -> Vec<PolygonDescriptor> {
    DescriptorChain::new(ram, PsxRamAddress::new(start))
        .collect::<Result<Vec<_>>>()
        .expect("chain decodes")
}
