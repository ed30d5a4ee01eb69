//! Ordered variant pattern table
//!
//! Patterns overlap, so the table is scanned top to bottom and the first
//! match wins. Variant indices address frames of the element's sprite sheet:
//!
//! ```text
//!  0  1  2      top-left     top      top-right
//!  3  4  5      left         center   right
//!  6  7  8      bottom-left  bottom   bottom-right
//!  9 10 11 12   inner corners (one diagonal missing)
//! ```

use crate::neighbors::flags::*;

/// Variant assigned when no pattern matches (isolated tiles, thin strips)
pub const DEFAULT_VARIANT: u32 = 0;

/// Variant for a fully surrounded tile with no distinguishing diagonal
pub const SURROUNDED_VARIANT: u32 = 4;

/// A mask pattern: every `required` flag set, every `forbidden` flag clear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub required: u8,
    pub forbidden: u8,
    pub variant: u32,
}

impl Pattern {
    const fn new(required: u8, forbidden: u8, variant: u32) -> Self {
        Self {
            required,
            forbidden,
            variant,
        }
    }

    pub fn matches(&self, mask: u8) -> bool {
        mask & self.required == self.required && mask & self.forbidden == 0
    }
}

/// Cardinal patterns, in evaluation order
pub const CARDINAL_PATTERNS: [Pattern; 8] = [
    Pattern::new(E | S, W | N, 0),
    Pattern::new(E | W | S, N, 1),
    Pattern::new(W | S, E | N, 2),
    Pattern::new(E | N | S, W, 3),
    Pattern::new(W | N | S, E, 5),
    Pattern::new(E | N, W | S, 6),
    // West is left unconstrained; row 6 already claims the west-less case
    Pattern::new(E | N, S, 7),
    Pattern::new(W | N, E | S, 8),
];

/// Diagonal patterns, consulted only when all four cardinals are present
pub const DIAGONAL_PATTERNS: [Pattern; 4] = [
    Pattern::new(NW | SW | SE, NE, 9),
    Pattern::new(NE | SW | SE, NW, 10),
    Pattern::new(NW | NE | SW, SE, 11),
    Pattern::new(NW | NE | SE, SW, 12),
];

fn first_match(patterns: &[Pattern], mask: u8) -> Option<u32> {
    patterns
        .iter()
        .find(|pattern| pattern.matches(mask))
        .map(|pattern| pattern.variant)
}

/// Map an 8-neighbor mask to a variant index.
///
/// Pure: the same mask always yields the same variant.
pub fn variant_for_mask(mask: u8) -> u32 {
    if mask & CARDINAL == CARDINAL {
        return first_match(&DIAGONAL_PATTERNS, mask).unwrap_or(SURROUNDED_VARIANT);
    }
    first_match(&CARDINAL_PATTERNS, mask).unwrap_or(DEFAULT_VARIANT)
}
