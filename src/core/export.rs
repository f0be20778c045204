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

//! Scene summary export
//!
//! A [`SceneSummary`] records what a decode produced (grid size, descriptor
//! and vertex counts, the layout used) together with when and from which
//! snapshot. It can be written as pretty-printed JSON for inspection or as
//! a compact bincode file.
//!
//! # Version Compatibility
//!
//! Binary summaries carry a version number; loading a summary written with
//! a different version fails with an error.
//!
//! # Example
//!
//! ```
//! use adscene::core::export::SceneSummary;
//! use adscene::core::scene::Scene;
//!
//! let summary = SceneSummary::from_scene(&Scene::new(), "empty.3dm");
//! let bytes = summary.to_bytes().unwrap();
//! assert_eq!(SceneSummary::from_bytes(&bytes).unwrap(), summary);
//! ```

use super::error::{Result, SceneError};
use super::scene::{Scene, SceneLayout};
use bincode::{config, Decode, Encode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Summary format version
///
/// Incremented whenever the binary layout of [`SceneSummary`] changes.
pub const SUMMARY_VERSION: u32 = 1;

/// Statistics of a decoded scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
#[bincode(encode_bounds = "", decode_bounds = "")]
pub struct SceneSummary {
    /// Version number for compatibility checking
    pub version: u32,

    /// When the summary was created
    #[bincode(with_serde)]
    pub timestamp: DateTime<Utc>,

    /// Snapshot the scene was decoded from
    pub source: String,

    pub width: u32,
    pub height: u32,
    pub log2_width: u8,
    pub log2_height: u8,

    /// Cells in the grid array, including row padding
    pub voxel_count: u64,

    /// Cells with at least one descriptor
    pub non_empty_voxels: u64,

    /// Cells whose background layer is drawn
    pub background_voxels: u64,

    pub descriptor_count: u64,
    pub semi_transparent_count: u64,
    pub vertex_count: u64,

    /// Header addresses used for decoding
    pub layout: SceneLayout,
}

impl SceneSummary {
    /// Summarize a decoded scene
    pub fn from_scene(scene: &Scene, source: &str) -> Self {
        let voxels = scene.voxels();
        let semi_transparent_count = voxels
            .iter()
            .flat_map(|v| v.polygon_descriptors.iter())
            .filter(|d| d.is_semi_transparent())
            .count();

        Self {
            version: SUMMARY_VERSION,
            timestamp: Utc::now(),
            source: source.to_string(),
            width: scene.width(),
            height: scene.height(),
            log2_width: scene.log2_width(),
            log2_height: scene.log2_height(),
            voxel_count: voxels.len() as u64,
            non_empty_voxels: voxels.iter().filter(|v| !v.is_empty()).count() as u64,
            background_voxels: voxels.iter().filter(|v| v.draw_background).count() as u64,
            descriptor_count: scene.descriptor_count() as u64,
            semi_transparent_count: semi_transparent_count as u64,
            vertex_count: scene.vertices().len() as u64,
            layout: *scene.layout(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SceneError::Export(e.to_string()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| SceneError::Export(e.to_string()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::encode_to_vec(self, config::standard())
            .map_err(|e| SceneError::Export(e.to_string()))
    }

    /// Decode a binary summary and verify its version
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (summary, _): (SceneSummary, usize) =
            bincode::decode_from_slice(bytes, config::standard())
                .map_err(|e| SceneError::Export(e.to_string()))?;

        if summary.version != SUMMARY_VERSION {
            return Err(SceneError::Export(format!(
                "Incompatible summary version: expected {}, got {}",
                SUMMARY_VERSION, summary.version
            )));
        }
        Ok(summary)
    }

    /// Write the summary, as JSON for `.json` paths and bincode otherwise
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = if is_json_path(path) {
            self.to_json()?.into_bytes()
        } else {
            self.to_bytes()?
        };
        fs::write(path, bytes)?;
        log::info!("Wrote scene summary to {}", path.display());
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if is_json_path(path) {
            Self::from_json(&fs::read_to_string(path)?)
        } else {
            Self::from_bytes(&fs::read(path)?)
        }
    }
}

fn is_json_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
