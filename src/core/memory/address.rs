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

//! Fixed-width memory addresses and address regions
//!
//! [`MemoryAddress`] wraps a raw unsigned word and provides the offset, mask
//! and shift arithmetic needed to walk pointers found inside a memory image.
//! [`Region`] pairs an address with a byte length so that bounds checks can
//! reason about whole spans instead of single points.
//!
//! All arithmetic wraps on overflow, matching the behavior of the address
//! bus being modelled.
//!
//! # Example
//!
//! ```
//! use adscene::core::memory::{MemoryAddress, Region};
//!
//! let base = MemoryAddress::new(0x8008_0000u32);
//! let region = Region::new(base, 0x10);
//!
//! assert_eq!(region.end().raw(), 0x8008_000F);
//! assert!(region.contains_address(base + 0x0Fu32));
//! assert!(!region.contains_address(base + 0x10u32));
//! ```

use num_traits::{PrimInt, WrappingAdd, WrappingSub};
use std::fmt;
use std::ops::{Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, Shl, Shr};

/// Raw word types usable as an address
///
/// Implemented for every primitive unsigned integer with wrapping arithmetic.
pub trait AddressWord:
    PrimInt + WrappingAdd + WrappingSub + fmt::UpperHex + fmt::Debug + Default
{
}

impl<T> AddressWord for T where
    T: PrimInt + WrappingAdd + WrappingSub + fmt::UpperHex + fmt::Debug + Default
{
}

/// A raw address of fixed width
///
/// Comparison operators compare the raw values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MemoryAddress<T: AddressWord> {
    raw: T,
}

impl<T: AddressWord> MemoryAddress<T> {
    /// Create an address from its raw value
    pub const fn new(raw: T) -> Self {
        Self { raw }
    }

    /// The null address (raw value 0)
    pub fn null() -> Self {
        Self::new(T::zero())
    }

    /// Raw address value
    #[inline(always)]
    pub fn raw(self) -> T {
        self.raw
    }

    pub fn is_null(self) -> bool {
        self.raw == T::zero()
    }

    /// Return this address moved forward by `offset` bytes
    #[inline(always)]
    pub fn offset(self, offset: T) -> Self {
        Self::new(self.raw.wrapping_add(&offset))
    }

    /// Move this address forward by `offset` bytes in place
    #[inline(always)]
    pub fn add_offset(&mut self, offset: T) {
        self.raw = self.raw.wrapping_add(&offset);
    }

    /// Set every bit of `mask` in this address
    pub fn add_mask(&mut self, mask: T) {
        self.raw = self.raw | mask;
    }

    /// Keep only the bits of `mask` in this address
    pub fn clear_mask(&mut self, mask: T) {
        self.raw = self.raw & mask;
    }

    /// Number of bytes from `self` up to `other` (wrapping)
    pub fn distance_to(self, other: Self) -> T {
        other.raw.wrapping_sub(&self.raw)
    }
}

impl<T: AddressWord> From<T> for MemoryAddress<T> {
    fn from(raw: T) -> Self {
        Self::new(raw)
    }
}

impl<T: AddressWord> Add<T> for MemoryAddress<T> {
    type Output = Self;

    fn add(self, offset: T) -> Self {
        self.offset(offset)
    }
}

impl<T: AddressWord> AddAssign<T> for MemoryAddress<T> {
    fn add_assign(&mut self, offset: T) {
        self.add_offset(offset);
    }
}

impl<T: AddressWord> BitOr<T> for MemoryAddress<T> {
    type Output = Self;

    fn bitor(mut self, mask: T) -> Self {
        self.add_mask(mask);
        self
    }
}

impl<T: AddressWord> BitOrAssign<T> for MemoryAddress<T> {
    fn bitor_assign(&mut self, mask: T) {
        self.add_mask(mask);
    }
}

impl<T: AddressWord> BitAnd<T> for MemoryAddress<T> {
    type Output = Self;

    fn bitand(mut self, mask: T) -> Self {
        self.clear_mask(mask);
        self
    }
}

impl<T: AddressWord> BitAndAssign<T> for MemoryAddress<T> {
    fn bitand_assign(&mut self, mask: T) {
        self.clear_mask(mask);
    }
}

impl<T: AddressWord> Shl<u8> for MemoryAddress<T> {
    type Output = Self;

    fn shl(self, shift: u8) -> Self {
        Self::new(self.raw << usize::from(shift))
    }
}

impl<T: AddressWord> Shr<u8> for MemoryAddress<T> {
    type Output = Self;

    fn shr(self, shift: u8) -> Self {
        Self::new(self.raw >> usize::from(shift))
    }
}

impl<T: AddressWord> fmt::Display for MemoryAddress<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = std::mem::size_of::<T>() * 2;
        write!(f, "0x{:0width$X}", self.raw, width = width)
    }
}

/// A span of `size` bytes starting at `address`
///
/// An empty region (`size == 0`) ends at its own start address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region<T: AddressWord> {
    pub address: MemoryAddress<T>,
    pub size: T,
}

impl<T: AddressWord> Region<T> {
    pub fn new(address: MemoryAddress<T>, size: T) -> Self {
        Self { address, size }
    }

    /// Address of the last byte of the region
    ///
    /// # Returns
    ///
    /// `address + size - 1` for a non-empty region, `address` otherwise
    pub fn end(&self) -> MemoryAddress<T> {
        if self.size > T::zero() {
            self.address.offset(self.size - T::one())
        } else {
            self.address
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size == T::zero()
    }

    /// Check whether `address` lies in `[self.address, self.end()]`
    pub fn is_in_region(&self, address: MemoryAddress<T>) -> bool {
        address >= self.address && address <= self.end()
    }

    pub fn contains_address(&self, address: MemoryAddress<T>) -> bool {
        self.is_in_region(address)
    }

    /// Check whether `other` lies fully inside this region
    pub fn contains_region(&self, other: &Region<T>) -> bool {
        other.address >= self.address && other.end() <= self.end()
    }

    /// Check whether either endpoint of `other` falls inside this region
    ///
    /// Note this is not symmetric: a region strictly containing `self`
    /// does not intersect it by this definition.
    pub fn intersects(&self, other: &Region<T>) -> bool {
        self.contains_address(other.address) || self.contains_address(other.end())
    }

    /// Check whether the two regions touch without a gap, in either order
    pub fn is_adjacent(&self, other: &Region<T>) -> bool {
        self.address == other.end().offset(T::one()) || self.end().offset(T::one()) == other.address
    }
}

impl<T: AddressWord> fmt::Display for Region<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..={}]", self.address, self.end())
    }
}
