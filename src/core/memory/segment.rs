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

//! Memory segment translation for main RAM addresses
//!
//! The PlayStation 1 uses MIPS memory segments that all mirror main RAM:
//! - KUSEG (0x00000000-): User space
//! - KSEG0 (0x80000000-): Kernel space, cached
//! - KSEG1 (0xA0000000-): Kernel space, uncached
//!
//! The segment is identified by the top byte of the address. The low 24 bits
//! hold the offset into physical RAM, which is only 2MB large.

use super::PsxRamAddress;

/// Main RAM size (2MB)
pub const RAM_SIZE: u32 = 0x20_0000;

/// Bits holding the physical offset
pub const ADDRESS_MASK: u32 = 0x00FF_FFFF;

/// Bits holding the segment tag
pub const SEGMENT_MASK: u32 = 0xFF00_0000;

/// One of the three views of main RAM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// User space (tag 0x00)
    Kuseg,
    /// Kernel space, cached (tag 0x80)
    Kseg0,
    /// Kernel space, uncached (tag 0xA0)
    Kseg1,
}

impl Segment {
    pub const KUSEG_BASE: u32 = 0x0000_0000;
    pub const KSEG0_BASE: u32 = 0x8000_0000;
    pub const KSEG1_BASE: u32 = 0xA000_0000;

    /// Base address (segment tag) of this segment
    pub const fn base(self) -> u32 {
        match self {
            Segment::Kuseg => Self::KUSEG_BASE,
            Segment::Kseg0 => Self::KSEG0_BASE,
            Segment::Kseg1 => Self::KSEG1_BASE,
        }
    }

    /// Identify the segment of an address
    ///
    /// # Returns
    ///
    /// `None` when the tag is not one of the three recognized tags
    ///
    /// # Example
    ///
    /// ```
    /// use adscene::core::memory::{PsxRamAddress, Segment};
    ///
    /// assert_eq!(Segment::of(PsxRamAddress::new(0x80083350)), Some(Segment::Kseg0));
    /// assert_eq!(Segment::of(PsxRamAddress::new(0x1F801000)), None);
    /// ```
    pub fn of(address: PsxRamAddress) -> Option<Segment> {
        match segment_tag(address) {
            Self::KUSEG_BASE => Some(Segment::Kuseg),
            Self::KSEG0_BASE => Some(Segment::Kseg0),
            Self::KSEG1_BASE => Some(Segment::Kseg1),
            _ => None,
        }
    }
}

/// Strip the segment tag, leaving the physical RAM offset
///
/// - 0x00001234 (KUSEG) → 0x00001234
/// - 0x80001234 (KSEG0) → 0x00001234
/// - 0xA0001234 (KSEG1) → 0x00001234
#[inline(always)]
pub fn to_canonical(address: PsxRamAddress) -> PsxRamAddress {
    address & ADDRESS_MASK
}

/// Segment tag bits of an address
#[inline(always)]
pub fn segment_tag(address: PsxRamAddress) -> u32 {
    address.raw() & SEGMENT_MASK
}

/// Re-tag an address into the given segment
pub fn to_segment(address: PsxRamAddress, segment: Segment) -> PsxRamAddress {
    to_canonical(address) | segment.base()
}

/// Check that an address names a byte of main RAM
///
/// The segment tag must be KUSEG, KSEG0 or KSEG1 and the stripped offset
/// must be below [`RAM_SIZE`].
///
/// # Example
///
/// ```
/// use adscene::core::memory::{is_valid_address, PsxRamAddress};
///
/// assert!(is_valid_address(PsxRamAddress::new(0x801FFFFF)));
/// assert!(!is_valid_address(PsxRamAddress::new(0x80200000)));
/// assert!(!is_valid_address(PsxRamAddress::new(0x1F000000)));
/// ```
pub fn is_valid_address(address: PsxRamAddress) -> bool {
    if Segment::of(address).is_none() {
        return false;
    }
    to_canonical(address).raw() < RAM_SIZE
}
