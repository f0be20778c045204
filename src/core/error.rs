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

/// Scene decoding error types
use thiserror::Error;

/// Result type for scene decoding operations
pub type Result<T> = std::result::Result<T, SceneError>;

/// Main error type for snapshot loading and scene decoding
#[derive(Error, Debug)]
pub enum SceneError {
    /// A read whose span is not fully inside physical RAM
    ///
    /// `address` is the address as requested (segment tag included),
    /// `size` the number of bytes the read needed.
    #[error("Read out of bounds (address: 0x{address:08X}, size: 0x{size:X})")]
    OutOfBounds { address: u32, size: u32 },

    #[error("Snapshot size {got} bytes is different than expected {expected}")]
    SizeMismatch { expected: usize, got: usize },

    #[error("Polygon descriptor chain at 0x{address:08X} exceeds {limit} records")]
    ChainTooLong { address: u32, limit: usize },

    #[error("Invalid grid header: {0}")]
    InvalidGrid(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl SceneError {
    /// Whether this error was caused by malformed snapshot contents
    /// rather than by the environment (file system, configuration).
    pub fn is_malformed_snapshot(&self) -> bool {
        matches!(
            self,
            SceneError::OutOfBounds { .. }
                | SceneError::SizeMismatch { .. }
                | SceneError::ChainTooLong { .. }
                | SceneError::InvalidGrid(_)
        )
    }
}
