//! 8-neighbor membership bitmask

use tilegrid_core::Cell;

/// Neighbor direction flags for bitmask calculation
pub mod flags {
    pub const N: u8 = 0b0000_0001; // North (up)
    pub const NE: u8 = 0b0000_0010; // Northeast (right-up)
    pub const E: u8 = 0b0000_0100; // East (right)
    pub const SE: u8 = 0b0000_1000; // Southeast (right-down)
    pub const S: u8 = 0b0001_0000; // South (down)
    pub const SW: u8 = 0b0010_0000; // Southwest (left-down)
    pub const W: u8 = 0b0100_0000; // West (left)
    pub const NW: u8 = 0b1000_0000; // Northwest (left-up)

    /// The four cardinal flags
    pub const CARDINAL: u8 = N | E | S | W;
    /// The four diagonal flags
    pub const DIAGONAL: u8 = NE | SE | SW | NW;
}

/// Offsets paired with their flag, clockwise from north. Y grows downward.
const OFFSETS: [((i32, i32), u8); 8] = [
    ((0, -1), flags::N),
    ((1, -1), flags::NE),
    ((1, 0), flags::E),
    ((1, 1), flags::SE),
    ((0, 1), flags::S),
    ((-1, 1), flags::SW),
    ((-1, 0), flags::W),
    ((-1, -1), flags::NW),
];

/// Calculate the neighbor bitmask for a cell.
///
/// `is_member` reports whether a neighboring cell counts as connected.
/// Corners are kept as-is: the variant table reads them directly.
pub fn calculate_bitmask<F>(cell: Cell, is_member: F) -> u8
where
    F: Fn(Cell) -> bool,
{
    OFFSETS
        .iter()
        .filter(|((dx, dy), _)| cell.checked_offset(*dx, *dy).is_some_and(&is_member))
        .fold(0u8, |mask, (_, flag)| mask | flag)
}

#[cfg(test)]
mod tests {
    use super::flags::*;
    use super::*;

    #[test]
    fn test_bitmask_isolated() {
        assert_eq!(calculate_bitmask(Cell::new(0, 0), |_| false), 0);
    }

    #[test]
    fn test_bitmask_surrounded() {
        assert_eq!(calculate_bitmask(Cell::new(3, 3), |_| true), 0xFF);
    }

    #[test]
    fn test_bitmask_directions() {
        let origin = Cell::new(10, 10);
        let above = calculate_bitmask(origin, |c| c == Cell::new(10, 9));
        assert_eq!(above, N);
        let right_down = calculate_bitmask(origin, |c| c == Cell::new(11, 11));
        assert_eq!(right_down, SE);
        let left_row = calculate_bitmask(origin, |c| c.x == 9);
        assert_eq!(left_row, NW | W | SW);
    }

    #[test]
    fn test_bitmask_at_coordinate_limit() {
        let edge = Cell::new(i32::MAX, 0);
        assert_eq!(calculate_bitmask(edge, |_| true), N | S | SW | W | NW);
    }
}
