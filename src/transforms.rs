//! Sprite transforms: flips, inversion and random generation

use rand::Rng;

use crate::bitgrid::{get_bit, set_bit, Sprite, CELL_MASK, HEIGHT, WIDTH};

/// Probability that a cell is painted by [`random_sprite`]
pub const FILL_PROBABILITY: f64 = 0.3;

/// Probability of horizontal mirror symmetry
pub const MIRROR_X_PROBABILITY: f64 = 0.75;

/// Probability of vertical symmetry when horizontal symmetry was chosen
pub const MIRROR_Y_WITH_X_PROBABILITY: f64 = 0.25;

/// Probability of vertical symmetry when horizontal symmetry was not chosen
pub const MIRROR_Y_ALONE_PROBABILITY: f64 = 0.75;

/// Largest batch [`generate_random_sprites`] will produce
pub const MAX_RANDOM_COUNT: usize = 10_000;

/// Complement every cell of the grid.
///
/// ```
/// use sprite5::bitgrid::Sprite;
/// use sprite5::transforms::invert;
///
/// assert_eq!(invert(Sprite::EMPTY).count_on(), 25);
/// ```
pub fn invert(sprite: Sprite) -> Sprite {
    Sprite::from_bits_truncate(!sprite.bits() & CELL_MASK)
}

/// Mirror a sprite left-to-right (`horizontal`) or top-to-bottom.
pub fn flip(sprite: Sprite, horizontal: bool) -> Sprite {
    let mut out = Sprite::EMPTY;

    for x in 0..WIDTH {
        for y in 0..HEIGHT {
            if !get_bit(sprite, x, y) {
                continue;
            }
            out = if horizontal {
                set_bit(out, WIDTH - x - 1, y, true)
            } else {
                set_bit(out, x, HEIGHT - y - 1, true)
            };
        }
    }

    out
}

pub fn flip_horizontal(sprite: Sprite) -> Sprite {
    flip(sprite, true)
}

pub fn flip_vertical(sprite: Sprite) -> Sprite {
    flip(sprite, false)
}

/// Generate a random sprite, usually with some mirror symmetry.
///
/// Horizontal symmetry is picked three times out of four. Vertical symmetry
/// then follows with probability 0.25, or 0.75 when there is no horizontal
/// symmetry.
pub fn random_sprite<R: Rng + ?Sized>(rng: &mut R) -> Sprite {
    let mirror_x = rng.random_bool(MIRROR_X_PROBABILITY);
    let mirror_y = rng.random_bool(if mirror_x {
        MIRROR_Y_WITH_X_PROBABILITY
    } else {
        MIRROR_Y_ALONE_PROBABILITY
    });

    let mut sprite = Sprite::EMPTY;
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            if !rng.random_bool(FILL_PROBABILITY) {
                continue;
            }
            sprite = set_bit(sprite, x, y, true);
            if mirror_x {
                sprite = set_bit(sprite, WIDTH - x - 1, y, true);
            }
            if mirror_y {
                sprite = set_bit(sprite, x, HEIGHT - y - 1, true);
            }
        }
    }

    sprite
}

/// Generate `count` sprites as (sprite, inverse) pairs.
///
/// An odd `count` is rounded up so every sprite keeps its partner.
/// Counts above [`MAX_RANDOM_COUNT`] are clamped to it.
pub fn generate_random_sprites<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Sprite> {
    let pairs = count.min(MAX_RANDOM_COUNT).div_ceil(2);
    let mut sprites = Vec::with_capacity(pairs * 2);
    for _ in 0..pairs {
        let sprite = random_sprite(rng);
        sprites.push(sprite);
        sprites.push(invert(sprite));
    }
    sprites
}
