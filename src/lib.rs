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

//! PlayStation 1 scene extractor library
//!
//! This library decodes 3D scene data (a grid of textured quads, a shared
//! vertex table and the VRAM texture image) from a raw RAM + VRAM snapshot
//! of a running PlayStation 1 game.
//!
//! # Example
//!
//! ```no_run
//! use adscene::core::{Scene, SceneLayout, SceneMesh, Snapshot};
//!
//! let snapshot = Snapshot::load("level.3dm").unwrap();
//! let scene = Scene::decode_snapshot(&snapshot, &SceneLayout::default()).unwrap();
//!
//! let mesh = SceneMesh::build(&scene);
//! println!("{} quads", mesh.quad_count());
//! ```

pub mod core;
