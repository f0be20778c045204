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

//! Snapshot file loading
//!
//! A snapshot file is a raw dump of main RAM immediately followed by a raw
//! dump of VRAM:
//!
//! ```text
//! 0x000000-0x1FFFFF: Main RAM (2MB)
//! 0x200000-0x2FFFFF: VRAM (1MB, 1024×512 16-bit pixels)
//! ```
//!
//! Any other file size is rejected before anything is decoded.
//!
//! # Example
//!
//! ```no_run
//! use adscene::core::scene::{Scene, SceneLayout};
//! use adscene::core::snapshot::Snapshot;
//!
//! let snapshot = Snapshot::load("level.3dm").unwrap();
//! let scene = Scene::decode_snapshot(&snapshot, &SceneLayout::default()).unwrap();
//! println!("{}x{}", scene.width(), scene.height());
//! ```

use super::error::{Result, SceneError};
use super::gpu::VRAM_SIZE;
use super::memory::{PsxRam, RAM_SIZE};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Exact size of a snapshot file
pub const SNAPSHOT_SIZE: usize = RAM_SIZE as usize + VRAM_SIZE;

/// A size-checked RAM + VRAM snapshot
#[derive(Debug, Clone)]
pub struct Snapshot {
    data: Vec<u8>,
}

impl Snapshot {
    /// Take ownership of raw snapshot bytes
    ///
    /// # Errors
    ///
    /// `SceneError::SizeMismatch` unless `data` is exactly [`SNAPSHOT_SIZE`]
    /// bytes long.
    pub fn from_vec(data: Vec<u8>) -> Result<Self> {
        check_size(data.len())?;
        Ok(Self { data })
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        check_size(data.len())?;
        Ok(Self {
            data: data.to_vec(),
        })
    }

    /// Load a snapshot file
    ///
    /// The size is checked from file metadata before reading the contents.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)?;

        let metadata = file.metadata()?;
        check_file_size(metadata.len())?;

        let mut data = vec![0u8; SNAPSHOT_SIZE];
        file.read_exact(&mut data)?;
        log::info!("Loaded snapshot {}", path.display());

        Ok(Self { data })
    }

    /// Main RAM half
    pub fn ram(&self) -> &[u8] {
        &self.data[..RAM_SIZE as usize]
    }

    /// VRAM half
    pub fn vram(&self) -> &[u8] {
        &self.data[RAM_SIZE as usize..]
    }

    /// Build a loaded RAM image from the RAM half
    pub fn to_ram(&self) -> Result<PsxRam> {
        let mut ram = PsxRam::new();
        ram.load(self.ram())?;
        Ok(ram)
    }
}

/// Size check for a file length, which may not fit in `usize`
fn check_file_size(len: u64) -> Result<()> {
    check_size(usize::try_from(len).unwrap_or(usize::MAX))
}

fn check_size(got: usize) -> Result<()> {
    if got != SNAPSHOT_SIZE {
        return Err(SceneError::SizeMismatch {
            expected: SNAPSHOT_SIZE,
            got,
        });
    }
    Ok(())
}
