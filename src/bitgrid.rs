//! Bit-packed 5x5 sprite grid
//!
//! A sprite is a single integer whose low `WIDTH * HEIGHT` bits encode the
//! painted cells, row-major: cell `(x, y)` lives at bit `x + y * WIDTH`.

/// Grid width in cells
pub const WIDTH: u32 = 5;

/// Grid height in cells
pub const HEIGHT: u32 = 5;

/// Number of meaningful bits in a sprite
pub const CELL_COUNT: u32 = WIDTH * HEIGHT;

/// Mask covering exactly the meaningful bits
pub const CELL_MASK: u32 = (1 << CELL_COUNT) - 1;

/// A 5x5 monochrome glyph packed into the low 25 bits of a `u32`.
///
/// Bits above the grid are always zero. `Sprite::EMPTY` doubles as the
/// erased state of the editor.
///
/// # Examples
///
/// ```
/// use sprite5::bitgrid::Sprite;
///
/// let dot = Sprite::EMPTY.with_bit(2, 2, true);
/// assert!(dot.get_bit(2, 2));
/// assert_eq!(dot.bits(), 1 << 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sprite(u32);

impl Sprite {
    /// The blank sprite
    pub const EMPTY: Sprite = Sprite(0);

    /// Build a sprite from raw bits, dropping anything outside the grid.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Sprite(bits & CELL_MASK)
    }

    /// Raw bitmask
    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of painted cells
    pub const fn count_on(self) -> u32 {
        self.0.count_ones()
    }

    /// Whether cell `(x, y)` is painted.
    pub fn get_bit(self, x: u32, y: u32) -> bool {
        get_bit(self, x, y)
    }

    /// Copy of this sprite with cell `(x, y)` forced to `state`.
    pub fn with_bit(self, x: u32, y: u32, state: bool) -> Self {
        set_bit(self, x, y, state)
    }

    /// Iterate every cell row-major as `(x, y, on)`.
    pub fn cells(self) -> impl Iterator<Item = (u32, u32, bool)> {
        (0..HEIGHT).flat_map(move |y| (0..WIDTH).map(move |x| (x, y, get_bit(self, x, y))))
    }
}

impl From<Sprite> for u32 {
    fn from(sprite: Sprite) -> u32 {
        sprite.0
    }
}

#[inline]
fn bit_index(x: u32, y: u32) -> u32 {
    debug_assert!(x < WIDTH && y < HEIGHT, "cell ({}, {}) outside {}x{} grid", x, y, WIDTH, HEIGHT);
    x + y * WIDTH
}

/// Whether the bit for cell `(x, y)` is set.
///
/// Coordinates must lie inside the grid; callers clip.
pub fn get_bit(sprite: Sprite, x: u32, y: u32) -> bool {
    (sprite.0 >> bit_index(x, y)) & 1 == 1
}

/// Return `sprite` with the bit for cell `(x, y)` forced to `state`.
///
/// Every other bit is left untouched. Coordinates must lie inside the grid.
pub fn set_bit(sprite: Sprite, x: u32, y: u32, state: bool) -> Sprite {
    let mask = 1u32 << bit_index(x, y);
    if state {
        Sprite(sprite.0 | mask)
    } else {
        Sprite(sprite.0 & !mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_mask_covers_grid() {
        assert_eq!(CELL_MASK, 0x1FF_FFFF);
        assert_eq!(CELL_MASK.count_ones(), 25);
    }

    #[test]
    fn test_linear_index_is_row_major() {
        let sprite = set_bit(Sprite::EMPTY, 1, 0, true);
        assert_eq!(sprite.bits(), 0b10);

        let sprite = set_bit(Sprite::EMPTY, 0, 1, true);
        assert_eq!(sprite.bits(), 1 << 5);

        let sprite = set_bit(Sprite::EMPTY, 4, 4, true);
        assert_eq!(sprite.bits(), 1 << 24);
    }

    #[test]
    fn test_set_then_get_every_cell() {
        let base = Sprite::from_bits_truncate(0x0155_AA55);
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                for state in [true, false] {
                    let changed = set_bit(base, x, y, state);
                    assert_eq!(get_bit(changed, x, y), state);

                    let untouched = !(1u32 << (x + y * WIDTH));
                    assert_eq!(
                        changed.bits() & untouched,
                        base.bits() & untouched,
                        "other bits changed at ({}, {})",
                        x,
                        y
                    );
                }
            }
        }
    }

    #[test]
    fn test_from_bits_truncate_drops_high_bits() {
        let sprite = Sprite::from_bits_truncate(0x7FFD_D7F1);
        assert_eq!(sprite.bits(), 0x7FFD_D7F1 & CELL_MASK);
        assert_eq!(sprite.bits() >> CELL_COUNT, 0);
    }

    #[test]
    fn test_cells_visits_all_in_order() {
        let sprite = Sprite::EMPTY.with_bit(3, 1, true);
        let cells: Vec<_> = sprite.cells().collect();
        assert_eq!(cells.len(), 25);
        assert_eq!(cells[0], (0, 0, false));
        assert_eq!(cells[8], (3, 1, true));
        assert_eq!(cells.iter().filter(|c| c.2).count(), 1);
    }

    #[test]
    fn test_count_on() {
        assert_eq!(Sprite::EMPTY.count_on(), 0);
        assert_eq!(Sprite::from_bits_truncate(CELL_MASK).count_on(), 25);
    }
}
