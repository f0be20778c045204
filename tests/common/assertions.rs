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

//! Custom assertions for scene testing

use adscene::core::scene::Scene;

/// Assert a vertex has the expected fixed-point coordinates
#[allow(dead_code)]
pub fn assert_vertex(scene: &Scene, index: u16, expected: (i16, i16, i16)) {
    let vertex = scene
        .vertex(index)
        .unwrap_or_else(|| panic!("Vertex {} missing", index));
    assert_eq!(
        (vertex.x, vertex.y, vertex.z),
        expected,
        "Vertex {} mismatch",
        index
    );

    let [x, y, z] = vertex.to_f32();
    assert_eq!(
        [x, y, z],
        [
            f32::from(expected.0) / 4096.0,
            f32::from(expected.1) / 4096.0,
            f32::from(expected.2) / 4096.0
        ],
        "Vertex {} real coordinates mismatch",
        index
    );
}

/// Assert a cell holds descriptors with the given vertex indices, in order
#[allow(dead_code)]
pub fn assert_cell_quads(scene: &Scene, x: u32, y: u32, expected: &[[u16; 4]]) {
    let voxel = scene
        .voxel(x, y)
        .unwrap_or_else(|| panic!("Cell ({}, {}) out of range", x, y));
    let actual: Vec<[u16; 4]> = voxel
        .polygon_descriptors
        .iter()
        .map(|d| d.vertex_indices)
        .collect();
    assert_eq!(actual, expected, "Cell ({}, {}) quads mismatch", x, y);
}
