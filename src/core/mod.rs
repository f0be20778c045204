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

//! Core scene extraction components
//!
//! This module contains everything needed to go from a snapshot file to a
//! renderable scene:
//! - Bounds-checked main RAM access
//! - Snapshot file loading
//! - Scene record decoding
//! - GPU texture addressing types
//! - Mesh building and summary export

pub mod error;
pub mod export;
pub mod gpu;
pub mod memory;
pub mod mesh;
pub mod scene;
pub mod snapshot;

// Re-export commonly used types
pub use error::{Result, SceneError};
pub use export::SceneSummary;
pub use memory::PsxRam;
pub use mesh::SceneMesh;
pub use scene::{Scene, SceneLayout};
pub use snapshot::Snapshot;
