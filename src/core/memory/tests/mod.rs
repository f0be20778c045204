// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Main RAM Tests
//!
//! This module contains tests for the bounds-checked RAM image,
//! organized into logical categories:
//!
//! - `address`: Address arithmetic and region predicates
//! - `segment`: Segment tags and canonical translation
//! - `reads`: Typed and bulk reads, including boundary conditions
//! - `properties`: Property tests over arbitrary addresses and sizes
//! - `helpers`: Common test utilities

use super::*;

mod helpers;
