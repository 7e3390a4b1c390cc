//! Grid Tanks - a grid-based multi-tank combat simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, world state)
//! - `input`: Key-to-command mapping and the narrow control surface
//! - `tuning`: Data-driven game balance
//!
//! Rendering, asset loading and window bootstrap live in a separate
//! frontend; the simulation never touches them.

pub mod input;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the render ticker)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Side length of one grid cell in world units
    pub const CELL_SIZE: f32 = 35.0;
    /// Grid extent in cells
    pub const GRID_COLS: u32 = 50;
    pub const GRID_ROWS: u32 = 50;
    /// World extent in world units
    pub const WORLD_WIDTH: f32 = CELL_SIZE * GRID_COLS as f32;
    pub const WORLD_HEIGHT: f32 = CELL_SIZE * GRID_ROWS as f32;

    /// Default viewport, matching the stock 1750x1750 canvas
    pub const VIEW_WIDTH: f32 = 1750.0;
    pub const VIEW_HEIGHT: f32 = 1750.0;

    /// Distance a tank covers per move step (intentionally smaller than a
    /// cell; committed positions are not grid-aligned after movement)
    pub const MOVE_STEP: f32 = 25.0;
    /// Committed steps before the camera follows the tank
    pub const CAMERA_STEP_THRESHOLD: u32 = 3;

    /// Minimum time between volleys, in seconds
    pub const FIRE_COOLDOWN: f32 = 0.5;
    /// Bullet speed in units/sec (5 units per 60 Hz frame)
    pub const BULLET_SPEED: f32 = 300.0;
    /// Spacing between the bullets of one volley, perpendicular to the
    /// heading axis
    pub const VOLLEY_SPACING: f32 = 10.0;

    /// Entity footprints (collision AABBs are centered on the position)
    pub const TANK_SIZE: f32 = 77.0;
    pub const BULLET_SIZE: f32 = 22.0;
    pub const HAY_SIZE: f32 = 44.0;
    pub const WALL_WIDTH: f32 = 44.0;
    pub const WALL_HEIGHT: f32 = 22.0;
}

/// Convert a grid cell to its world-space position
#[inline]
pub fn cell_to_world(col: u32, row: u32) -> Vec2 {
    Vec2::new(
        col as f32 * consts::CELL_SIZE,
        row as f32 * consts::CELL_SIZE,
    )
}
