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

//! Bounds-checked main RAM image
//!
//! [`PsxRam`] holds a 2MB snapshot of PlayStation main RAM and serves typed,
//! little-endian reads from it. Every access translates the address through
//! the segment rules, then verifies that the whole accessed span lies inside
//! physical RAM. There is no unchecked access path: pointers recovered from
//! the snapshot itself go through the same gate as the fixed header
//! addresses.
//!
//! # Example
//!
//! ```
//! use adscene::core::memory::{PsxRam, PsxRamAddress, RAM_SIZE};
//!
//! let mut image = vec![0u8; RAM_SIZE as usize];
//! image[0x100..0x104].copy_from_slice(&0x12345678u32.to_le_bytes());
//!
//! let mut ram = PsxRam::new();
//! ram.load(&image).unwrap();
//!
//! // All three segments mirror the same byte
//! assert_eq!(ram.read_u32(PsxRamAddress::new(0x00000100)).unwrap(), 0x12345678);
//! assert_eq!(ram.read_u32(PsxRamAddress::new(0x80000100)).unwrap(), 0x12345678);
//! assert_eq!(ram.read_u32(PsxRamAddress::new(0xA0000100)).unwrap(), 0x12345678);
//!
//! // A read straddling the end of RAM fails
//! assert!(ram.read_u32(PsxRamAddress::new(0x801FFFFE)).is_err());
//! ```

use crate::core::error::{Result, SceneError};
use std::ops::Range;

mod address;
mod segment;

pub use address::{AddressWord, MemoryAddress, Region};
pub use segment::{
    is_valid_address, segment_tag, to_canonical, to_segment, Segment, ADDRESS_MASK, RAM_SIZE,
    SEGMENT_MASK,
};

/// 32-bit main RAM address
pub type PsxRamAddress = MemoryAddress<u32>;

/// Span of main RAM
pub type PsxRamRegion = Region<u32>;

/// A value with a fixed little-endian layout in RAM
///
/// `SIZE` is the number of bytes the value occupies; `from_le_bytes` is
/// only ever called with a slice of exactly that length.
pub trait RamRecord: Sized {
    const SIZE: usize;

    fn from_le_bytes(bytes: &[u8]) -> Self;
}

macro_rules! impl_ram_record_for_int {
    ($($ty:ty),*) => {
        $(
            impl RamRecord for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                #[inline(always)]
                fn from_le_bytes(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$ty>()];
                    buf.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(buf)
                }
            }
        )*
    };
}

impl_ram_record_for_int!(u8, i8, u16, i16, u32, i32);

impl RamRecord for PsxRamAddress {
    const SIZE: usize = 4;

    fn from_le_bytes(bytes: &[u8]) -> Self {
        PsxRamAddress::new(<u32 as RamRecord>::from_le_bytes(bytes))
    }
}

/// Main RAM snapshot with bounds-checked reads
///
/// The buffer is zeroed on creation and only ever replaced wholesale by
/// [`PsxRam::load`].
pub struct PsxRam {
    /// Main RAM (2MB)
    ///
    /// Physical address: 0x00000000-0x001FFFFF
    ram: Vec<u8>,
}

impl PsxRam {
    /// Create a RAM image filled with zeros
    pub fn new() -> Self {
        Self {
            ram: vec![0u8; RAM_SIZE as usize],
        }
    }

    /// Overwrite the whole RAM image
    ///
    /// # Arguments
    ///
    /// * `image` - Raw RAM bytes, exactly [`RAM_SIZE`] long
    ///
    /// # Errors
    ///
    /// Returns `SceneError::SizeMismatch` without touching the current
    /// contents if `image` has any other length.
    pub fn load(&mut self, image: &[u8]) -> Result<()> {
        if image.len() != self.ram.len() {
            return Err(SceneError::SizeMismatch {
                expected: self.ram.len(),
                got: image.len(),
            });
        }
        self.ram.copy_from_slice(image);
        log::debug!("Loaded {} bytes of main RAM", image.len());
        Ok(())
    }

    /// Size of the RAM image in bytes
    pub fn size(&self) -> usize {
        self.ram.len()
    }

    /// Whether a `size`-byte access at `address` stays inside RAM
    pub fn is_in_ram(&self, address: PsxRamAddress, size: u32) -> bool {
        Self::span(address, size).is_some()
    }

    /// Translate an access into a buffer range
    ///
    /// The canonical start and the canonical last byte must both be valid
    /// RAM addresses. `size` is capped at `RAM_SIZE` first so the end
    /// computation cannot wrap around.
    fn span(address: PsxRamAddress, size: u32) -> Option<Range<usize>> {
        if size > RAM_SIZE {
            return None;
        }
        let region = PsxRamRegion::new(to_canonical(address), size);
        if !is_valid_address(region.address) || !is_valid_address(region.end()) {
            return None;
        }
        let start = region.address.raw() as usize;
        Some(start..start + size as usize)
    }

    fn checked(&self, address: PsxRamAddress, size: u32) -> Result<&[u8]> {
        match Self::span(address, size) {
            Some(range) => Ok(&self.ram[range]),
            None => Err(SceneError::OutOfBounds {
                address: address.raw(),
                size,
            }),
        }
    }

    /// Read any fixed-layout value
    ///
    /// # Errors
    ///
    /// `SceneError::OutOfBounds` carrying the requested address and
    /// `T::SIZE` when the span leaves RAM.
    pub fn read_as<T: RamRecord>(&self, address: PsxRamAddress) -> Result<T> {
        let bytes = self.checked(address, T::SIZE as u32)?;
        Ok(T::from_le_bytes(bytes))
    }

    /// Read `count` consecutive fixed-layout values
    ///
    /// The whole span is checked before anything is decoded.
    pub fn read_array<T: RamRecord>(&self, address: PsxRamAddress, count: u32) -> Result<Vec<T>> {
        let size = (T::SIZE as u64) * u64::from(count);
        let size = u32::try_from(size).map_err(|_| SceneError::OutOfBounds {
            address: address.raw(),
            size: u32::MAX,
        })?;
        let bytes = self.checked(address, size)?;
        Ok(bytes.chunks_exact(T::SIZE).map(T::from_le_bytes).collect())
    }

    pub fn read_u8(&self, address: PsxRamAddress) -> Result<u8> {
        self.read_as(address)
    }

    pub fn read_i8(&self, address: PsxRamAddress) -> Result<i8> {
        self.read_as(address)
    }

    pub fn read_u16(&self, address: PsxRamAddress) -> Result<u16> {
        self.read_as(address)
    }

    pub fn read_i16(&self, address: PsxRamAddress) -> Result<i16> {
        self.read_as(address)
    }

    pub fn read_u32(&self, address: PsxRamAddress) -> Result<u32> {
        self.read_as(address)
    }

    pub fn read_i32(&self, address: PsxRamAddress) -> Result<i32> {
        self.read_as(address)
    }

    /// Read a 32-bit pointer stored in RAM
    pub fn read_address(&self, address: PsxRamAddress) -> Result<PsxRamAddress> {
        self.read_as(address)
    }

    /// Borrow the bytes of a whole region
    ///
    /// # Example
    ///
    /// ```
    /// use adscene::core::memory::{PsxRam, PsxRamAddress, PsxRamRegion};
    ///
    /// let ram = PsxRam::new();
    /// let region = PsxRamRegion::new(PsxRamAddress::new(0x80001000), 16);
    /// assert_eq!(ram.region_bytes(&region).unwrap().len(), 16);
    /// ```
    pub fn region_bytes(&self, region: &PsxRamRegion) -> Result<&[u8]> {
        self.checked(region.address, region.size)
    }

    /// Copy a whole region into `buffer`
    ///
    /// `buffer` must be at least `region.size` bytes long; the remainder is
    /// left untouched. A short buffer is reported as an out of bounds read
    /// of the region.
    pub fn read_region(&self, region: &PsxRamRegion, buffer: &mut [u8]) -> Result<()> {
        let bytes = self.region_bytes(region)?;
        match buffer.get_mut(..bytes.len()) {
            Some(dest) => {
                dest.copy_from_slice(bytes);
                Ok(())
            }
            None => Err(SceneError::OutOfBounds {
                address: region.address.raw(),
                size: region.size,
            }),
        }
    }
}

impl Default for PsxRam {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
