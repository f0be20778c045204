// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Scene Tests
//!
//! This module contains tests for scene decoding, organized into logical
//! categories:
//!
//! - `records`: Unpacking of grid, descriptor and vertex records
//! - `chain`: Descriptor chain termination and placeholder handling
//! - `decode`: Whole-scene decoding, grid addressing and failure handling
//! - `layout`: Header layout defaults and TOML overrides
//! - `helpers`: Common test utilities

use super::*;

mod helpers;
