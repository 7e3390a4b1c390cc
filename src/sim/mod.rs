//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable resolution order (collection order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::Bounds;
pub use state::{Bullet, Hay, Heading, Tank, TankColor, Wall, World, WorldEvent};
pub use tick::{TickInput, tick};
