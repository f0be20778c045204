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

//! GPU type definitions used by snapshot records
//!
//! Polygon records in RAM carry texture coordinates, CLUT references and
//! texture page attributes in the same bit layout the GPU consumes in its
//! GP0 commands. These types unpack those fields into plain values.

/// Texture coordinate for textured primitives
///
/// Coordinates are in texel units within the texture page.
///
/// # Examples
///
/// ```
/// use adscene::core::gpu::TexCoord;
///
/// let texcoord = TexCoord::from_u16(0x4020);
/// assert_eq!(texcoord.u, 0x20);
/// assert_eq!(texcoord.v, 0x40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TexCoord {
    /// U coordinate (horizontal, 0-255)
    pub u: u8,
    /// V coordinate (vertical, 0-255)
    pub v: u8,
}

impl TexCoord {
    /// Create a TexCoord from a 16-bit word
    ///
    /// - Bits 0-7: U coordinate
    /// - Bits 8-15: V coordinate
    pub fn from_u16(value: u16) -> Self {
        Self {
            u: (value & 0xFF) as u8,
            v: ((value >> 8) & 0xFF) as u8,
        }
    }
}

/// Color Lookup Table reference
///
/// Selects the palette used by 4-bit and 8-bit textures.
///
/// ```text
///   Bit 0-5:   X coordinate X/16  (ie. in 16-halfword steps)
///   Bit 6-14:  Y coordinate 0-511 (ie. in 1-line steps)
///   Bit 15:    Unused (should be 0)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Clut {
    /// X position in 16-pixel steps (0-63)
    pub x: u8,
    /// Y position in lines (0-511)
    pub y: u16,
}

impl Clut {
    /// Shift converting the X field to VRAM pixels
    pub const X_SHIFT: u8 = 4;

    pub fn from_u16(value: u16) -> Self {
        Self {
            x: (value & 0x3F) as u8,
            y: (value >> 6) & 0x1FF,
        }
    }

    /// VRAM position of the first palette entry, in 16-bit pixels
    ///
    /// # Examples
    ///
    /// ```
    /// use adscene::core::gpu::Clut;
    ///
    /// // X=2 (2*16=32), Y=480
    /// let clut = Clut::from_u16((480 << 6) | 2);
    /// assert_eq!(clut.origin(), (32, 480));
    /// ```
    pub fn origin(&self) -> (u16, u16) {
        (u16::from(self.x) << Self::X_SHIFT, self.y)
    }
}

/// Texture color depth modes
///
/// - 4-bit: 16 colors using a 16-color CLUT
/// - 8-bit: 256 colors using a 256-color CLUT
/// - 15-bit: Direct color (no CLUT needed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureDepth {
    /// 4-bit indexed color (16 colors, uses CLUT)
    T4Bit,
    /// 8-bit indexed color (256 colors, uses CLUT)
    T8Bit,
    /// 15-bit direct color (no CLUT)
    T15Bit,
}

impl From<u8> for TextureDepth {
    /// Convert the 2-bit texture page depth field (0=4bit, 1=8bit, 2/3=15bit)
    fn from(value: u8) -> Self {
        match value & 0x3 {
            0 => TextureDepth::T4Bit,
            1 => TextureDepth::T8Bit,
            _ => TextureDepth::T15Bit,
        }
    }
}

impl TextureDepth {
    /// Width of a texture page in VRAM 16-bit pixels
    pub fn page_width(self) -> u16 {
        match self {
            TextureDepth::T4Bit => super::TEXTURE_PAGE_SIZE >> 2,
            TextureDepth::T8Bit => super::TEXTURE_PAGE_SIZE >> 1,
            TextureDepth::T15Bit => super::TEXTURE_PAGE_SIZE,
        }
    }

    /// Number of palette entries, or `None` for direct color
    pub fn clut_width(self) -> Option<u16> {
        match self {
            TextureDepth::T4Bit => Some(1 << 4),
            TextureDepth::T8Bit => Some(1 << 8),
            TextureDepth::T15Bit => None,
        }
    }
}

/// Semi-transparency blending modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemiTransparency {
    /// 0.5×B + 0.5×F
    Average,
    /// 1.0×B + 1.0×F
    Additive,
    /// 1.0×B - 1.0×F
    Subtractive,
    /// 1.0×B + 0.25×F
    AddQuarter,
}

impl From<u8> for SemiTransparency {
    fn from(bits: u8) -> Self {
        match bits & 0x3 {
            0 => SemiTransparency::Average,
            1 => SemiTransparency::Additive,
            2 => SemiTransparency::Subtractive,
            _ => SemiTransparency::AddQuarter,
        }
    }
}

/// Texture page attributes ("Texpage")
///
/// ```text
///   Bit 0-3:   Texture page X Base   (N*64)
///   Bit 4:     Texture page Y Base   (N*256, 0=0, 1=256)
///   Bit 5-6:   Semi Transparency     (0=B/2+F/2, 1=B+F, 2=B-F, 3=B+F/4)
///   Bit 7-8:   Texture page colors   (0=4bit, 1=8bit, 2=15bit, 3=15bit)
///   Bit 9-10:  Unused
///   Bit 11:    Texture disable       (0=Normal, 1=Disable)
///   Bit 12-15: Unused
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TexturePage {
    /// X base in 64-pixel steps (0-15)
    pub x: u8,
    /// Y base in 256-line steps (0-1)
    pub y: u8,
    /// Raw semi-transparency mode (0-3)
    pub semi_transparency: u8,
    /// Raw color depth field (0-3)
    pub depth: u8,
    pub texture_disable: bool,
}

impl TexturePage {
    pub const X_SHIFT: u8 = 6;
    pub const Y_SHIFT: u8 = 8;

    /// Decode a texture page word
    ///
    /// # Examples
    ///
    /// ```
    /// use adscene::core::gpu::{TexturePage, TextureDepth};
    ///
    /// // X=2 (2*64=128), Y=1 (1*256=256), 8-bit
    /// let page = TexturePage::from_u16(0x0092);
    /// assert_eq!(page.origin(), (128, 256));
    /// assert_eq!(page.texture_depth(), TextureDepth::T8Bit);
    /// ```
    pub fn from_u16(value: u16) -> Self {
        Self {
            x: (value & 0xF) as u8,
            y: ((value >> 4) & 1) as u8,
            semi_transparency: ((value >> 5) & 3) as u8,
            depth: ((value >> 7) & 3) as u8,
            texture_disable: ((value >> 11) & 1) != 0,
        }
    }

    pub fn texture_depth(&self) -> TextureDepth {
        TextureDepth::from(self.depth)
    }

    pub fn blend_mode(&self) -> SemiTransparency {
        SemiTransparency::from(self.semi_transparency)
    }

    /// VRAM position of the page's top-left corner, in 16-bit pixels
    pub fn origin(&self) -> (u16, u16) {
        (
            u16::from(self.x) << Self::X_SHIFT,
            u16::from(self.y) << Self::Y_SHIFT,
        )
    }
}
