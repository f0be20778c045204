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

//! Fixed RAM addresses of the scene header
//!
//! A scene is located through a handful of scalars and pointers stored at
//! fixed addresses. The defaults match the supported format revision; a
//! TOML file can override any subset of them for other revisions:
//!
//! ```toml
//! voxels_pointer = 0x8008333c
//! vertices_pointer = 0x80083344
//! ```

use crate::core::error::{Result, SceneError};
use crate::core::memory::{is_valid_address, PsxRamAddress};
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Header field addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
#[serde(default, deny_unknown_fields)]
pub struct SceneLayout {
    /// u16, low 5 bits: log2 of the grid row stride
    pub log2_width: u32,
    /// u16, low 5 bits: log2 of the grid height
    pub log2_height: u32,
    /// i16: last grid column
    pub max_x: u32,
    /// i16: last grid row
    pub max_y: u32,
    /// Pointer to the grid cell array
    pub voxels_pointer: u32,
    /// Pointer to the table of polygon descriptor list pointers
    pub polygon_descriptors_pointers: u32,
    /// Pointer to the vertex table
    pub vertices_pointer: u32,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            log2_width: 0x8008_3350,
            log2_height: 0x8008_3352,
            max_x: 0x8008_3354,
            max_y: 0x8008_3356,
            voxels_pointer: 0x8008_333C,
            polygon_descriptors_pointers: 0x8008_3340,
            vertices_pointer: 0x8008_3344,
        }
    }
}

impl SceneLayout {
    /// Parse a layout from TOML text
    ///
    /// Missing fields keep their default address.
    ///
    /// # Examples
    ///
    /// ```
    /// use adscene::core::scene::SceneLayout;
    ///
    /// let layout = SceneLayout::from_toml_str("max_x = 0x80090000").unwrap();
    /// assert_eq!(layout.max_x, 0x80090000);
    /// assert_eq!(layout.max_y, SceneLayout::default().max_y);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let layout: SceneLayout =
            toml::from_str(text).map_err(|e| SceneError::Layout(e.to_string()))?;
        layout.validate()?;
        Ok(layout)
    }

    /// Load a layout from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        log::debug!("Read scene layout from {}", path.as_ref().display());
        Self::from_toml_str(&text)
    }

    /// Check that every field names a main RAM address
    pub fn validate(&self) -> Result<()> {
        for (name, address) in self.fields() {
            if !is_valid_address(address) {
                return Err(SceneError::Layout(format!(
                    "{} address {} is outside main RAM",
                    name, address
                )));
            }
        }
        Ok(())
    }

    fn fields(&self) -> [(&'static str, PsxRamAddress); 7] {
        [
            ("log2_width", PsxRamAddress::new(self.log2_width)),
            ("log2_height", PsxRamAddress::new(self.log2_height)),
            ("max_x", PsxRamAddress::new(self.max_x)),
            ("max_y", PsxRamAddress::new(self.max_y)),
            ("voxels_pointer", PsxRamAddress::new(self.voxels_pointer)),
            (
                "polygon_descriptors_pointers",
                PsxRamAddress::new(self.polygon_descriptors_pointers),
            ),
            ("vertices_pointer", PsxRamAddress::new(self.vertices_pointer)),
        ]
    }
}
