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

//! GPU-side definitions shared with snapshot records
//!
//! The decoder never talks to a GPU. It only needs the VRAM geometry and the
//! packed texture attribute formats that polygon records embed, so that the
//! renderer on the other side of the scene can place textures correctly.
//!
//! # VRAM Layout
//!
//! VRAM is 1024×512 pixels of 16 bits each, stored line by line:
//!
//! | Quantity         | Value     |
//! |------------------|-----------|
//! | Bytes per line   | 2048      |
//! | Pixels per line  | 1024      |
//! | Lines            | 512       |
//! | Total size       | 1MB       |

pub mod types;

pub use types::{Clut, SemiTransparency, TexCoord, TextureDepth, TexturePage};

/// Bytes per VRAM pixel
pub const VRAM_PIXEL_SIZE: usize = 2;

/// VRAM line width in bytes
pub const VRAM_WIDTH: usize = 1 << 11;

/// VRAM line width in 16-bit pixels
pub const VRAM_PIXELS_PER_LINE: usize = VRAM_WIDTH / VRAM_PIXEL_SIZE;

/// Number of VRAM lines
pub const VRAM_HEIGHT: usize = 1 << 9;

/// Total VRAM size in bytes (1MB)
pub const VRAM_SIZE: usize = VRAM_WIDTH * VRAM_HEIGHT;

/// Side of a texture page in texels
pub const TEXTURE_PAGE_SIZE: u16 = 256;
