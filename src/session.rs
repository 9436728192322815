//! Edit session: pointer gestures to grid mutations
//!
//! A session remembers the sprite it was opened from ([`Origin`]) and owns
//! the live working value. Each gesture runs a small state machine:
//!
//! ```text
//!          down on empty cell            up / leave
//!   Idle ---------------------> Drawing ------------> Idle
//!     \                                                ^
//!      \  down on painted cell          up / leave     |
//!       --------------------> Erasing -----------------
//! ```
//!
//! Moves paint while drawing or erasing and pass through while idle.

use crate::bitgrid::{get_bit, set_bit, Sprite, HEIGHT, WIDTH};
use crate::store::Origin;

/// Gesture state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Drawing,
    Erasing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Leave,
}

/// A pointer event in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f64, y: f64) -> Self {
        Self { kind, x, y }
    }
}

/// Client-space rectangle of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// Scale client coordinates down to a grid cell.
///
/// Returns `None` for points that land outside the grid.
///
/// ```
/// use sprite5::session::{event_to_grid, Bounds};
///
/// let bounds = Bounds::new(10.0, 10.0, 100.0, 100.0);
/// assert_eq!(event_to_grid(&bounds, 10.0, 10.0), Some((0, 0)));
/// assert_eq!(event_to_grid(&bounds, 109.9, 55.0), Some((4, 2)));
/// assert_eq!(event_to_grid(&bounds, 5.0, 50.0), None);
/// ```
pub fn event_to_grid(bounds: &Bounds, x: f64, y: f64) -> Option<(u32, u32)> {
    if bounds.width <= 0.0 || bounds.height <= 0.0 {
        return None;
    }
    let gx = ((x - bounds.x) * WIDTH as f64 / bounds.width).floor();
    let gy = ((y - bounds.y) * HEIGHT as f64 / bounds.height).floor();
    if !gx.is_finite() || !gy.is_finite() || gx < 0.0 || gy < 0.0 || gx >= WIDTH as f64 || gy >= HEIGHT as f64 {
        return None;
    }
    Some((gx as u32, gy as u32))
}

/// Editing state for one open sprite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    original: Origin,
    working: Sprite,
    mode: Mode,
}

impl EditSession {
    /// Open a session on `sprite`; the empty sprite starts a new one.
    pub fn open(sprite: Sprite) -> Self {
        Self {
            original: Origin::from_sprite(sprite),
            working: sprite,
            mode: Mode::Idle,
        }
    }

    pub fn new_sprite() -> Self {
        Self::open(Sprite::EMPTY)
    }

    pub fn original(&self) -> Origin {
        self.original
    }

    pub fn working(&self) -> Sprite {
        self.working
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Replace the working value, e.g. with a flipped or inverted copy.
    pub fn set_working(&mut self, sprite: Sprite) {
        self.working = sprite;
    }

    /// Feed one pointer event; returns the working value afterwards.
    pub fn handle(&mut self, event: PointerEvent, bounds: &Bounds) -> Sprite {
        let cell = event_to_grid(bounds, event.x, event.y);
        match event.kind {
            PointerKind::Down => {
                if let Some((x, y)) = cell {
                    self.press_cell(x, y);
                }
            }
            PointerKind::Move => {
                if let Some((x, y)) = cell {
                    self.paint_cell(x, y);
                }
            }
            PointerKind::Up | PointerKind::Leave => self.release(),
        }
        self.working
    }

    /// Start a gesture on a cell and paint it.
    ///
    /// A painted cell starts an erase, an empty one starts a draw.
    pub fn press_cell(&mut self, x: u32, y: u32) {
        self.mode = if get_bit(self.working, x, y) {
            Mode::Erasing
        } else {
            Mode::Drawing
        };
        self.paint_cell(x, y);
    }

    /// Paint a cell according to the current mode.
    pub fn paint_cell(&mut self, x: u32, y: u32) {
        self.working = match self.mode {
            Mode::Idle => self.working,
            Mode::Drawing => set_bit(self.working, x, y, true),
            Mode::Erasing => set_bit(self.working, x, y, false),
        };
    }

    /// End the current gesture.
    pub fn release(&mut self) {
        self.mode = Mode::Idle;
    }

    /// Replay a stroke of grid cells as one gesture.
    pub fn stroke(&mut self, cells: &[(u32, u32)]) -> Sprite {
        if let Some((&(x, y), rest)) = cells.split_first() {
            self.press_cell(x, y);
            for &(x, y) in rest {
                self.paint_cell(x, y);
            }
            self.release();
        }
        self.working
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new_sprite()
    }
}
