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

//! Polygon descriptor chain walking
//!
//! A cell's descriptors are stored back to back, terminated by flag bit
//! patterns instead of a count. Placeholder records (zero texture word) may
//! appear anywhere in the chain and are skipped.
//!
//! ```text
//!            placeholder, not sentinel
//!              ┌────────┐
//!              ▼        │
//!   start ─► Scanning ──┘ ── end sentinel ──► Done
//!              │  ▲
//!   geometry   │  │ otherwise (advance one record)
//!              ▼  │
//!            Accepting ───── ends chain ──────► Done
//! ```

use super::records::PolygonDescriptor;
use crate::core::error::{Result, SceneError};
use crate::core::memory::{PsxRam, PsxRamAddress, RamRecord, RAM_SIZE};

/// Upper bound on records visited by one chain walk
///
/// No in-bounds chain can be longer than RAM holds records.
pub const MAX_CHAIN_RECORDS: usize = RAM_SIZE as usize / PolygonDescriptor::SIZE;

#[derive(Debug, Clone, Copy)]
enum ChainState {
    Scanning,
    Accepting(PolygonDescriptor),
    Done,
}

/// Iterator over the accepted descriptors of one chain
///
/// Yields each non-placeholder descriptor in chain order. Any read error
/// ends the iteration after being yielded once.
pub struct DescriptorChain<'a> {
    ram: &'a PsxRam,
    start: PsxRamAddress,
    cursor: PsxRamAddress,
    state: ChainState,
    visited: usize,
    limit: usize,
}

impl<'a> DescriptorChain<'a> {
    pub fn new(ram: &'a PsxRam, start: PsxRamAddress) -> Self {
        Self::with_limit(ram, start, MAX_CHAIN_RECORDS)
    }

    pub fn with_limit(ram: &'a PsxRam, start: PsxRamAddress, limit: usize) -> Self {
        Self {
            ram,
            start,
            cursor: start,
            state: ChainState::Scanning,
            visited: 0,
            limit,
        }
    }

    /// Number of records read so far
    pub fn records_read(&self) -> usize {
        self.visited
    }

    fn read_record(&mut self) -> Result<PolygonDescriptor> {
        if self.visited >= self.limit {
            return Err(SceneError::ChainTooLong {
                address: self.start.raw(),
                limit: self.limit,
            });
        }
        self.visited += 1;
        self.ram.read_as(self.cursor)
    }

    fn advance(&mut self) {
        self.cursor += PolygonDescriptor::SIZE as u32;
    }

    fn step(&mut self) -> Result<Option<PolygonDescriptor>> {
        loop {
            match self.state {
                ChainState::Done => return Ok(None),
                ChainState::Scanning => {
                    let descriptor = self.read_record()?;
                    if !descriptor.is_placeholder() {
                        self.state = ChainState::Accepting(descriptor);
                    } else if descriptor.flags.is_end_sentinel() {
                        log::trace!("Chain end sentinel at {}", self.cursor);
                        self.state = ChainState::Done;
                    } else {
                        self.advance();
                    }
                }
                ChainState::Accepting(descriptor) => {
                    if descriptor.flags.ends_chain() {
                        self.state = ChainState::Done;
                    } else {
                        self.advance();
                        self.state = ChainState::Scanning;
                    }
                    return Ok(Some(descriptor));
                }
            }
        }
    }
}

impl Iterator for DescriptorChain<'_> {
    type Item = Result<PolygonDescriptor>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Ok(Some(descriptor)) => Some(Ok(descriptor)),
            Ok(None) => None,
            Err(e) => {
                self.state = ChainState::Done;
                Some(Err(e))
            }
        }
    }
}
