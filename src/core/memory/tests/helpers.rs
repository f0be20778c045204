// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Helper functions for memory tests

use super::*;

/// Creates a RAM image where each byte holds the low 8 bits of its offset
#[allow(dead_code)]
pub fn create_patterned_ram() -> PsxRam {
    let image: Vec<u8> = (0..RAM_SIZE).map(|offset| offset as u8).collect();
    let mut ram = PsxRam::new();
    ram.load(&image).expect("patterned image has the RAM size");
    ram
}

/// Creates a RAM image with `bytes` written at physical `offset`
#[allow(dead_code)]
pub fn create_ram_with(offset: usize, bytes: &[u8]) -> PsxRam {
    let mut image = vec![0u8; RAM_SIZE as usize];
    image[offset..offset + bytes.len()].copy_from_slice(bytes);
    let mut ram = PsxRam::new();
    ram.load(&image).expect("image has the RAM size");
    ram
}
