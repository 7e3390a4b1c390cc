//! Fixed timestep simulation tick
//!
//! Advances the world deterministically: applies the frame's input
//! commands, then moves and resolves the active tank's bullets.

use super::state::{Heading, World};

/// Input commands for a single tick (one-shot, cleared by the driver)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Discrete move request for the active tank
    pub move_to: Option<Heading>,
    /// Fire a volley, subject to the cooldown
    pub fire: bool,
    /// Hand control to the next tank
    pub switch_tank: bool,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    if input.switch_tank {
        world.switch_tank();
    }
    if let Some(heading) = input.move_to {
        world.move_active(heading);
    }
    if input.fire {
        world.fire();
    }

    world.advance_clock(dt);
    resolve_bullets(world, dt);

    // Dead hay bales leave the world on the same tick the damage landed
    world.hays.retain(|hay| !hay.is_destroyed());
}

/// Move and collide the active tank's bullets. Only the controlled tank's
/// bullets are simulated; a previous tank's shots stay frozen in place.
///
/// Resolution order per bullet: hay bales in collection order first (the
/// first overlap consumes the bullet's damage and the search stops), then
/// walls. A surviving bullet advances and despawns once it leaves the
/// viewport.
fn resolve_bullets(world: &mut World, dt: f32) {
    let active = world.active_index();
    let mut bullets = std::mem::take(&mut world.tanks[active].bullets);

    for bullet in bullets.iter_mut() {
        if !bullet.alive {
            continue;
        }

        if let Some(hay) = world
            .hays
            .iter_mut()
            .filter(|hay| !hay.is_destroyed())
            .find(|hay| bullet.bounds().overlaps(&hay.bounds()))
        {
            hay.take_damage(bullet.damage);
            bullet.alive = false;
            if hay.is_destroyed() {
                log::debug!("hay bale destroyed at ({}, {})", hay.pos.x, hay.pos.y);
            }
            continue;
        }

        if world
            .walls
            .iter()
            .any(|wall| bullet.bounds().overlaps(&wall.bounds()))
        {
            bullet.alive = false;
            continue;
        }

        bullet.advance(dt);
        if !world.view().contains(bullet.pos) {
            bullet.alive = false;
        }
    }

    bullets.retain(|bullet| bullet.alive);
    world.tanks[active].bullets = bullets;
}
