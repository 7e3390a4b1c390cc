//! Data-driven game balance
//!
//! The defaults reproduce the stock arrangement: three tanks on the top
//! row, 50 walls, 25 hay bales of 100 health. A JSON document with the same
//! shape can override any of it.

use serde::{Deserialize, Serialize};

use crate::sim::TankColor;

/// Per-tank balance entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankTuning {
    pub color: TankColor,
    /// Damage per bullet
    pub damage: f32,
    /// Bullets per volley
    pub volley: u32,
    /// Starting grid cell (column, row)
    pub spawn_cell: (u32, u32),
}

/// World-level balance knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    /// Tank roster; the first entry is controlled at start
    pub roster: Vec<TankTuning>,
    pub wall_count: usize,
    pub hay_count: usize,
    pub hay_health: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            roster: vec![
                TankTuning {
                    color: TankColor::Red,
                    damage: 10.0,
                    volley: 2,
                    spawn_cell: (1, 1),
                },
                TankTuning {
                    color: TankColor::Blue,
                    damage: 20.0,
                    volley: 3,
                    spawn_cell: (3, 1),
                },
                TankTuning {
                    color: TankColor::Green,
                    damage: 25.0,
                    volley: 1,
                    spawn_cell: (5, 1),
                },
            ],
            wall_count: 50,
            hay_count: 25,
            hay_health: 100.0,
        }
    }
}

impl Tuning {
    /// Parse a tuning override from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Dump the active tuning, e.g. as a template for overrides
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
