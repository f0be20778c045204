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

//! Renderer-ready mesh building
//!
//! Flattens a decoded [`Scene`] into one vertex list and two index lists
//! (opaque and semi-transparent quads), ready for upload to a GPU.
//!
//! # Geometry
//!
//! Each quad contributes four vertices in record order and two triangles
//! `(0, 1, 2)` and `(2, 1, 3)`. Cell vertices are stored relative to their
//! cell, so each cell is translated by `0x40` fixed-point units per column
//! and row, with the grid centered on the origin.
//!
//! Positions are converted from the snapshot's axes to the renderer's
//! right-handed, Y-up axes: `(-x, -z, -y)`, in units of 4096.

use super::scene::{Point3D, PolygonDescriptor, Scene};
use crate::core::gpu::TexCoord;

/// Size of one grid cell in fixed-point units
pub const CELL_SIZE: i16 = 0x40;

/// Triangle indices of a quad, relative to its first vertex
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 1, 3];

/// One vertex of the output mesh
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeshVertex {
    pub position: [f32; 3],
    /// Texel coordinate inside the texture page
    pub tex_coord: [f32; 2],
    /// Texture page X, Y and raw depth
    pub texture_page: [f32; 3],
    /// CLUT X (16-pixel steps) and Y
    pub clut: [f32; 2],
}

/// Vertex and index buffers of a scene
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneMesh {
    pub vertices: Vec<MeshVertex>,
    pub opaque_indices: Vec<u32>,
    pub semi_transparent_indices: Vec<u32>,
}

impl SceneMesh {
    /// Build the mesh of a scene
    ///
    /// Quads referencing a vertex missing from the scene's vertex table are
    /// skipped with a warning.
    pub fn build(scene: &Scene) -> Self {
        let mut mesh = SceneMesh::default();

        let start_x = (scene.width() as i16).wrapping_mul(-(CELL_SIZE / 2));
        let start_y = (scene.height() as i16).wrapping_mul(-(CELL_SIZE / 2));
        let mut translation = Point3D::new(0, start_y, 0);

        for y in 0..scene.height() {
            translation.x = start_x;
            let Some(row) = scene.row(y) else {
                break;
            };
            for voxel in row {
                for descriptor in &voxel.polygon_descriptors {
                    mesh.push_quad(scene, descriptor, &translation);
                }
                translation.x = translation.x.wrapping_add(CELL_SIZE);
            }
            translation.y = translation.y.wrapping_add(CELL_SIZE);
        }

        log::debug!(
            "Built mesh: {} vertices, {} opaque / {} semi-transparent indices",
            mesh.vertices.len(),
            mesh.opaque_indices.len(),
            mesh.semi_transparent_indices.len()
        );
        mesh
    }

    /// Number of quads in the mesh
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    fn push_quad(&mut self, scene: &Scene, descriptor: &PolygonDescriptor, translation: &Point3D) {
        let mut corners = [Point3D::default(); 4];
        for (corner, &index) in corners.iter_mut().zip(descriptor.vertex_indices.iter()) {
            match scene.vertex(index) {
                Some(point) => *corner = point.wrapping_add(translation),
                None => {
                    log::warn!("Skipping quad with missing vertex {}", index);
                    return;
                }
            }
        }

        let first = self.vertices.len() as u32;
        for (corner, tex_coord) in corners.iter().zip(descriptor.tex_coords()) {
            self.vertices.push(to_vertex(descriptor, corner, tex_coord));
        }

        let indices = if descriptor.is_semi_transparent() {
            &mut self.semi_transparent_indices
        } else {
            &mut self.opaque_indices
        };
        indices.extend(QUAD_INDICES.iter().map(|i| first + i));
    }
}

/// Convert a fixed-point position to renderer axes
pub fn to_position(point: &Point3D) -> [f32; 3] {
    let [x, y, z] = point.to_f32();
    [-x, -z, -y]
}

fn to_vertex(descriptor: &PolygonDescriptor, point: &Point3D, tex_coord: TexCoord) -> MeshVertex {
    let page = &descriptor.texture_page;
    let clut = &descriptor.clut;
    MeshVertex {
        position: to_position(point),
        tex_coord: [f32::from(tex_coord.u), f32::from(tex_coord.v)],
        texture_page: [f32::from(page.x), f32::from(page.y), f32::from(page.depth)],
        clut: [f32::from(clut.x), f32::from(clut.y)],
    }
}
