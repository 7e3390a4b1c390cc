//! Key-to-command mapping for the input layer
//!
//! The platform frontend owns the actual event wiring; this module gives it
//! a remappable binding table, the preventDefault decision, and a narrow
//! view of the simulation through [`ControlSurface`] so it never holds a
//! full world handle.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sim::tick::TickInput;
use crate::sim::{Heading, Tank, World};

/// A discrete player command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move(Heading),
    Fire,
    SwitchTank,
}

impl Command {
    /// Merge this command into a per-frame input batch
    pub fn stage(self, input: &mut TickInput) {
        match self {
            Command::Move(heading) => input.move_to = Some(heading),
            Command::Fire => input.fire = true,
            Command::SwitchTank => input.switch_tank = true,
        }
    }
}

/// What the input wiring is allowed to see of the simulation
pub trait ControlSurface {
    /// While true, movement keys must not reach the default scroll handler
    fn scroll_suppressed(&self) -> bool;
    /// The tank currently receiving input
    fn active_tank(&self) -> &Tank;
}

impl ControlSurface for World {
    fn scroll_suppressed(&self) -> bool {
        World::scroll_suppressed(self)
    }

    fn active_tank(&self) -> &Tank {
        World::active_tank(self)
    }
}

/// Bindings from key code (`KeyboardEvent.code` names) to commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    bindings: HashMap<String, Command>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        bindings.insert("ArrowUp".to_owned(), Command::Move(Heading::Up));
        bindings.insert("ArrowDown".to_owned(), Command::Move(Heading::Down));
        bindings.insert("ArrowLeft".to_owned(), Command::Move(Heading::Left));
        bindings.insert("ArrowRight".to_owned(), Command::Move(Heading::Right));
        bindings.insert("Space".to_owned(), Command::Fire);
        bindings.insert("KeyT".to_owned(), Command::SwitchTank);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Command bound to a key, if any
    pub fn command_for(&self, code: &str) -> Option<Command> {
        self.bindings.get(code).copied()
    }

    /// Rebind a key, replacing any previous binding for it
    pub fn bind(&mut self, code: impl Into<String>, command: Command) {
        self.bindings.insert(code.into(), command);
    }
}

/// Whether the frontend should swallow this key press instead of letting
/// the default (page scroll) happen. Fire is always swallowed; movement
/// keys only while the camera is holding still.
pub fn swallow_key(code: &str, surface: &impl ControlSurface) -> bool {
    match code {
        "Space" => true,
        "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" => surface.scroll_suppressed(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.command_for("ArrowUp"),
            Some(Command::Move(Heading::Up))
        );
        assert_eq!(bindings.command_for("Space"), Some(Command::Fire));
        assert_eq!(bindings.command_for("KeyT"), Some(Command::SwitchTank));
        assert_eq!(bindings.command_for("KeyQ"), None);
    }

    #[test]
    fn test_rebinding() {
        let mut bindings = KeyBindings::default();
        bindings.bind("KeyW", Command::Move(Heading::Up));
        assert_eq!(
            bindings.command_for("KeyW"),
            Some(Command::Move(Heading::Up))
        );
    }

    #[test]
    fn test_stage_builds_a_frame_batch() {
        let mut input = TickInput::default();
        Command::Move(Heading::Left).stage(&mut input);
        Command::Fire.stage(&mut input);
        assert_eq!(input.move_to, Some(Heading::Left));
        assert!(input.fire);
        assert!(!input.switch_tank);
    }

    #[test]
    fn test_swallow_key_through_surface() {
        let mut world = World::new(11);

        // A fresh world holds the camera still, so arrows are swallowed
        assert!(swallow_key("ArrowLeft", &world));
        // Fire is always swallowed, anything else never
        assert!(swallow_key("Space", &world));
        assert!(!swallow_key("KeyT", &world));

        // The surface exposes the controlled tank
        let color = ControlSurface::active_tank(&world).color;
        assert_eq!(color, world.active_tank().color);

        world.switch_tank();
        assert_eq!(
            ControlSurface::active_tank(&world).color,
            world.active_tank().color
        );
    }
}
