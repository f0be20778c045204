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

mod common;

use adscene::core::error::{Result, SceneError};
use adscene::core::gpu::VRAM_SIZE;
use adscene::core::snapshot::SNAPSHOT_SIZE;
use adscene::core::{Scene, SceneLayout, SceneMesh, SceneSummary, Snapshot};
use common::assertions::{assert_cell_quads, assert_vertex};
use common::fixtures::{create_two_cell_snapshot, SnapshotBuilder, TWO_CELL_VERTICES};

#[test]
fn test_two_cell_scene_from_file() -> Result<()> {
    let file = create_two_cell_snapshot().write_file();

    let snapshot = Snapshot::load(file.path())?;
    let scene = Scene::decode_snapshot(&snapshot, &SceneLayout::default())?;

    assert_eq!(scene.width(), 2);
    assert_eq!(scene.height(), 1);
    assert_eq!(scene.voxels().len(), 2);
    assert_cell_quads(&scene, 0, 0, &[[0, 1, 2, 3]]);
    assert_cell_quads(&scene, 1, 0, &[[4, 5, 6, 7]]);
    assert!(!scene.voxel(0, 0).unwrap().draw_background);
    assert!(scene.voxel(1, 0).unwrap().draw_background);

    assert_eq!(scene.vertices().len(), TWO_CELL_VERTICES.len());
    for (index, &expected) in TWO_CELL_VERTICES.iter().enumerate() {
        assert_vertex(&scene, index as u16, expected);
    }

    assert_eq!(scene.vram().len(), VRAM_SIZE);
    assert_eq!(scene.vram()[251], 0);
    assert_eq!(scene.vram()[252], 1);
    Ok(())
}

#[test]
fn test_row_access_matches_cells() {
    let scene = Scene::decode_snapshot(
        &create_two_cell_snapshot().build(),
        &SceneLayout::default(),
    )
    .unwrap();

    let row = scene.row(0).unwrap();
    assert_eq!(row.len(), 2);
    assert_eq!(Some(&row[1]), scene.voxel(1, 0));
    assert_eq!(row[1].polygon_descriptors[0].texture_page.x, 2);
}

#[test]
fn test_short_file_rejected() {
    let mut bytes = create_two_cell_snapshot().into_bytes();
    bytes.pop();
    assert!(matches!(
        Snapshot::from_vec(bytes),
        Err(SceneError::SizeMismatch { expected, got }) if expected == SNAPSHOT_SIZE && got == SNAPSHOT_SIZE - 1
    ));
}

#[test]
fn test_corrupt_chain_keeps_previous_scene() {
    let good = create_two_cell_snapshot().build();

    let mut corrupt = create_two_cell_snapshot();
    // Second descriptor now continues past the end of RAM
    corrupt.u32(0x8009_1008, 0x801F_FFE8);
    corrupt.descriptor(0x801F_FFE8, [4, 5, 6, 7], 0x0012, 0x0000);
    let corrupt = corrupt.build();

    let mut scene = Scene::new();
    scene.read_snapshot(&good, &SceneLayout::default()).unwrap();

    let err = scene
        .read_snapshot(&corrupt, &SceneLayout::default())
        .unwrap_err();
    assert!(matches!(
        err,
        SceneError::OutOfBounds {
            address: 0x8020_0000,
            size: 24
        }
    ));

    assert_eq!(scene.descriptor_count(), 2);
    assert_eq!(scene.vertices().len(), 8);
}

#[test]
fn test_custom_layout_file() {
    let mut layout_file = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(
        &mut layout_file,
        b"voxels_pointer = 0x80001000\npolygon_descriptors_pointers = 0x80001004\n",
    )
    .unwrap();
    let layout = SceneLayout::load(layout_file.path()).unwrap();

    let mut builder = create_two_cell_snapshot();
    builder.u32(0x8000_1000, 0x8009_0000).u32(0x8000_1004, 0x8009_1000);
    // The default pointer locations no longer matter
    builder.tables(0x8020_0000, 0x8020_0000, 0x8009_2000);

    let scene = Scene::decode_snapshot(&builder.build(), &layout).unwrap();
    assert_eq!(scene.descriptor_count(), 2);
}

#[test]
fn test_mesh_and_export() {
    let scene = Scene::decode_snapshot(
        &create_two_cell_snapshot().build(),
        &SceneLayout::default(),
    )
    .unwrap();

    let mesh = SceneMesh::build(&scene);
    assert_eq!(mesh.quad_count(), 2);
    assert_eq!(mesh.opaque_indices.len(), 6);
    assert_eq!(mesh.semi_transparent_indices.len(), 6);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.json");
    SceneSummary::from_scene(&scene, "two_cell.3dm").save(&path).unwrap();

    let summary = SceneSummary::load(&path).unwrap();
    assert_eq!(summary.width, 2);
    assert_eq!(summary.non_empty_voxels, 2);
    assert_eq!(summary.background_voxels, 1);
    assert_eq!(summary.semi_transparent_count, 1);
    assert_eq!(summary.vertex_count, 8);
}

#[test]
fn test_empty_builder_decodes() {
    let scene = Scene::decode_snapshot(&SnapshotBuilder::new().build(), &SceneLayout::default())
        .unwrap();
    assert_eq!(scene.vertices().len(), 1);
    assert_eq!(scene.descriptor_count(), 0);
}
