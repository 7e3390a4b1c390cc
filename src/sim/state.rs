//! World state and core simulation types
//!
//! All entity collections live in an explicit [`World`] passed to every
//! operation. The presentation layer reads entity state freely but mutates
//! the simulation only through the input operations (`move_active`, `fire`,
//! `switch_tank`) and the per-frame [`tick`](super::tick::tick).

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Bounds;
use crate::cell_to_world;
use crate::consts::*;
use crate::tuning::Tuning;

/// Facing direction of a tank, mapped to the four grid axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Heading {
    /// Rotation in radians, matching the sprite rotation convention
    /// (right = 0, angles grow clockwise with y pointing down)
    pub fn radians(self) -> f32 {
        match self {
            Heading::Up => -std::f32::consts::FRAC_PI_2,
            Heading::Down => std::f32::consts::FRAC_PI_2,
            Heading::Left => std::f32::consts::PI,
            Heading::Right => 0.0,
        }
    }

    /// Position offset covered by one move step
    pub fn step_offset(self) -> Vec2 {
        match self {
            Heading::Up => Vec2::new(0.0, -MOVE_STEP),
            Heading::Down => Vec2::new(0.0, MOVE_STEP),
            Heading::Left => Vec2::new(-MOVE_STEP, 0.0),
            Heading::Right => Vec2::new(MOVE_STEP, 0.0),
        }
    }

    /// Whether the heading runs along the vertical axis
    pub fn is_vertical(self) -> bool {
        matches!(self, Heading::Up | Heading::Down)
    }
}

/// Tank skin, consumed by the presentation layer to pick an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TankColor {
    Red,
    Blue,
    Green,
}

/// A bullet in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Heading in radians, fixed at fire time
    pub heading: f32,
    /// Damage delivered to the first hay bale hit
    pub damage: f32,
    /// Cleared when the bullet is spent; pruned at the end of the tick
    pub alive: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, heading: f32, damage: f32) -> Self {
        Self {
            pos,
            heading,
            damage,
            alive: true,
        }
    }

    /// Advance along the heading
    pub fn advance(&mut self, dt: f32) {
        self.pos += Vec2::new(self.heading.cos(), self.heading.sin()) * BULLET_SPEED * dt;
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::centered(self.pos, BULLET_SIZE, BULLET_SIZE)
    }
}

/// A controllable tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    pub color: TankColor,
    pub pos: Vec2,
    pub heading: Heading,
    /// Damage each bullet inflicts
    pub damage: f32,
    /// Bullets fired per volley
    pub volley: u32,
    /// Sim-clock time of the last volley; `None` until the first shot
    last_fire: Option<f32>,
    /// Bullets this tank has fired and still owns
    pub bullets: Vec<Bullet>,
    /// Steps since the last camera update. Incremented on every step,
    /// including ones the world later rejects and compensates for.
    pub step_counter: u32,
    /// Hidden while another tank is controlled
    pub visible: bool,
    /// Vertical sprite mirror, toggled by left/right moves (cosmetic)
    pub mirrored: bool,
}

impl Tank {
    pub fn new(color: TankColor, damage: f32, volley: u32, pos: Vec2) -> Self {
        assert!(damage > 0.0, "tank damage must be positive");
        assert!(volley >= 1, "tank must fire at least one bullet per volley");
        Self {
            color,
            pos,
            heading: Heading::default(),
            damage,
            volley,
            last_fire: None,
            bullets: Vec::new(),
            step_counter: 0,
            visible: true,
            mirrored: false,
        }
    }

    /// Rotation in radians for the presentation layer
    pub fn rotation(&self) -> f32 {
        self.heading.radians()
    }

    /// Apply one movement step. The step counter always advances here; the
    /// world decrements it again when it rejects the move.
    pub fn step(&mut self, heading: Heading) {
        self.pos += heading.step_offset();
        self.heading = heading;
        self.step_counter += 1;
        match heading {
            Heading::Left => self.mirrored = true,
            Heading::Right => self.mirrored = false,
            _ => {}
        }
    }

    /// Fire a volley if the cooldown has elapsed. Bullets are laid out
    /// perpendicular to the heading axis, spaced evenly around the tank
    /// position, all sharing the tank's heading and damage.
    pub fn fire(&mut self, now: f32) {
        if let Some(last) = self.last_fire {
            if now - last < FIRE_COOLDOWN {
                return;
            }
        }
        let rotation = self.heading.radians();
        for i in 0..self.volley {
            let lateral = (i as f32 - (self.volley - 1) as f32 / 2.0) * VOLLEY_SPACING;
            let offset = if self.heading.is_vertical() {
                Vec2::new(lateral, 0.0)
            } else {
                Vec2::new(0.0, lateral)
            };
            self.bullets
                .push(Bullet::new(self.pos + offset, rotation, self.damage));
        }
        self.last_fire = Some(now);
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::centered(self.pos, TANK_SIZE, TANK_SIZE)
    }
}

/// A destructible hay bale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hay {
    pub pos: Vec2,
    /// Monotonically non-increasing
    pub health: f32,
}

impl Hay {
    pub fn new(pos: Vec2, health: f32) -> Self {
        assert!(health > 0.0, "hay health must start positive");
        Self { pos, health }
    }

    pub fn take_damage(&mut self, amount: f32) {
        assert!(amount >= 0.0, "damage cannot be negative");
        self.health -= amount;
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::centered(self.pos, HAY_SIZE, HAY_SIZE)
    }
}

/// An indestructible wall segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub pos: Vec2,
}

impl Wall {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::centered(self.pos, WALL_WIDTH, WALL_HEIGHT)
    }
}

/// Signals for the presentation layer, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// The camera should move so the viewport's top-left lands here.
    /// Clamping to world bounds is the viewport controller's job.
    ViewportFollow { top_left: Vec2 },
    /// The camera should snap back to the origin (after a tank switch)
    ViewportReset,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Run seed for reproducible terrain
    pub seed: u64,
    pub tanks: Vec<Tank>,
    pub walls: Vec<Wall>,
    pub hays: Vec<Hay>,
    /// Index of the tank currently receiving input
    active: usize,
    /// Simulation clock in seconds, advanced by `tick`
    clock: f32,
    /// While set, the input layer swallows arrow-key defaults
    scroll_locked: bool,
    /// Visible screen area; bullets despawn outside it
    view: Bounds,
    /// Pending presentation events
    #[serde(skip)]
    events: Vec<WorldEvent>,
}

impl World {
    /// Create a world with the stock tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, &Tuning::default())
    }

    /// Create a world from explicit tuning. Tanks are placed at their tuned
    /// grid cells (only the first one visible), then walls and hay bales are
    /// scattered over randomly sampled unoccupied cells.
    pub fn with_tuning(seed: u64, tuning: &Tuning) -> Self {
        assert!(
            !tuning.roster.is_empty(),
            "tuning must provide at least one tank"
        );

        let mut world = Self {
            seed,
            tanks: Vec::with_capacity(tuning.roster.len()),
            walls: Vec::with_capacity(tuning.wall_count),
            hays: Vec::with_capacity(tuning.hay_count),
            active: 0,
            clock: 0.0,
            scroll_locked: true,
            view: Bounds::new(0.0, 0.0, VIEW_WIDTH, VIEW_HEIGHT),
            events: Vec::new(),
        };

        for (i, entry) in tuning.roster.iter().enumerate() {
            let (col, row) = entry.spawn_cell;
            let mut tank = Tank::new(entry.color, entry.damage, entry.volley, cell_to_world(col, row));
            tank.visible = i == 0;
            world.tanks.push(tank);
        }

        let mut rng = Pcg32::seed_from_u64(seed);
        for _ in 0..tuning.wall_count {
            let pos = world.random_free_cell(&mut rng);
            world.walls.push(Wall::new(pos));
        }
        for _ in 0..tuning.hay_count {
            let pos = world.random_free_cell(&mut rng);
            world.hays.push(Hay::new(pos, tuning.hay_health));
        }

        log::info!(
            "world populated: seed {}, {} tanks, {} walls, {} hay bales",
            seed,
            world.tanks.len(),
            world.walls.len(),
            world.hays.len()
        );
        world
    }

    /// Sample a grid cell nothing is standing on
    fn random_free_cell(&self, rng: &mut Pcg32) -> Vec2 {
        loop {
            let col = rng.random_range(0..GRID_COLS);
            let row = rng.random_range(0..GRID_ROWS);
            let pos = cell_to_world(col, row);
            if !self.is_cell_occupied(pos) {
                return pos;
            }
        }
    }

    /// Whether some entity was placed exactly at this grid position
    pub fn is_cell_occupied(&self, pos: Vec2) -> bool {
        self.walls.iter().any(|w| w.pos == pos)
            || self.hays.iter().any(|h| h.pos == pos)
            || self.tanks.iter().any(|t| t.pos == pos)
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The tank currently receiving input
    pub fn active_tank(&self) -> &Tank {
        &self.tanks[self.active]
    }

    pub fn active_tank_mut(&mut self) -> &mut Tank {
        &mut self.tanks[self.active]
    }

    /// Simulation clock in seconds
    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub(crate) fn advance_clock(&mut self, dt: f32) {
        self.clock += dt;
    }

    /// While true, the input layer must keep arrow keys from scrolling
    pub fn scroll_suppressed(&self) -> bool {
        self.scroll_locked
    }

    /// Visible screen area used for bullet despawn
    pub fn view(&self) -> Bounds {
        self.view
    }

    /// Adopt the presentation layer's actual viewport rectangle
    pub fn set_view(&mut self, view: Bounds) {
        self.view = view;
    }

    /// Take the events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }

    /// Move the active tank one step, rolling back if the destination is
    /// out of bounds or blocked by a wall or hay bale. A rejected move is a
    /// normal outcome, not an error.
    pub fn move_active(&mut self, heading: Heading) {
        let old_pos = self.tanks[self.active].pos;
        self.tanks[self.active].step(heading);

        if self.is_move_invalid() {
            let tank = &mut self.tanks[self.active];
            tank.pos = old_pos;
            // compensate for the unconditional increment in Tank::step
            tank.step_counter -= 1;
            self.scroll_locked = true;
        } else {
            self.follow_camera();
        }
    }

    fn is_move_invalid(&self) -> bool {
        let tank = &self.tanks[self.active];
        let bounds = tank.bounds();
        tank.pos.x < 0.0
            || tank.pos.x >= WORLD_WIDTH
            || tank.pos.y < 0.0
            || tank.pos.y >= WORLD_HEIGHT
            || self.walls.iter().any(|w| bounds.overlaps(&w.bounds()))
            || self.hays.iter().any(|h| bounds.overlaps(&h.bounds()))
    }

    /// After a committed move: once enough steps accumulate, hand the camera
    /// a new focus and restart the count. Below the threshold the input
    /// layer keeps swallowing arrow keys.
    fn follow_camera(&mut self) {
        let view = self.view;
        let tank = &mut self.tanks[self.active];
        if tank.step_counter >= CAMERA_STEP_THRESHOLD {
            let top_left = tank.pos - Vec2::new(view.width / 2.0, view.height / 2.0);
            self.events.push(WorldEvent::ViewportFollow { top_left });
            tank.step_counter = 0;
            self.scroll_locked = false;
        } else {
            self.scroll_locked = true;
        }
    }

    /// Fire a volley from the active tank, subject to its cooldown
    pub fn fire(&mut self) {
        let now = self.clock;
        self.tanks[self.active].fire(now);
    }

    /// Hand control to the next tank in the roster. The incoming tank takes
    /// over at the outgoing tank's position and the camera snaps to origin.
    pub fn switch_tank(&mut self) {
        assert!(!self.tanks.is_empty(), "cannot switch with an empty roster");
        let pos = self.tanks[self.active].pos;
        self.tanks[self.active].visible = false;
        self.active = (self.active + 1) % self.tanks.len();
        let tank = &mut self.tanks[self.active];
        tank.pos = pos;
        tank.visible = true;
        self.events.push(WorldEvent::ViewportReset);
        log::debug!("control handed to {:?} tank", tank.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::TankTuning;
    use proptest::prelude::*;

    fn bare_tuning(volley: u32) -> Tuning {
        Tuning {
            roster: vec![TankTuning {
                color: TankColor::Red,
                damage: 10.0,
                volley,
                spawn_cell: (1, 1),
            }],
            wall_count: 0,
            hay_count: 0,
            ..Tuning::default()
        }
    }

    #[test]
    fn test_population_counts_and_cells() {
        let world = World::new(12345);
        assert_eq!(world.tanks.len(), 3);
        assert_eq!(world.walls.len(), 50);
        assert_eq!(world.hays.len(), 25);

        // Every placed entity sits on a distinct grid cell
        let mut cells: Vec<(i64, i64)> = world
            .walls
            .iter()
            .map(|w| w.pos)
            .chain(world.hays.iter().map(|h| h.pos))
            .chain(world.tanks.iter().map(|t| t.pos))
            .map(|p| (p.x as i64, p.y as i64))
            .collect();
        cells.sort_unstable();
        cells.dedup();
        assert_eq!(cells.len(), 50 + 25 + 3);

        // Only the first tank starts visible
        assert!(world.tanks[0].visible);
        assert!(!world.tanks[1].visible);
        assert!(!world.tanks[2].visible);
    }

    #[test]
    fn test_same_seed_same_terrain() {
        let a = World::new(99);
        let b = World::new(99);
        for (wa, wb) in a.walls.iter().zip(&b.walls) {
            assert_eq!(wa.pos, wb.pos);
        }
        for (ha, hb) in a.hays.iter().zip(&b.hays) {
            assert_eq!(ha.pos, hb.pos);
        }
    }

    #[test]
    fn test_volley_layout_heading_right() {
        let mut world = World::with_tuning(1, &bare_tuning(3));
        assert_eq!(world.active_tank().pos, Vec2::new(35.0, 35.0));

        world.fire();
        let bullets = &world.active_tank().bullets;
        assert_eq!(bullets.len(), 3);
        let mut ys: Vec<f32> = bullets.iter().map(|b| b.pos.y).collect();
        ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(ys, vec![25.0, 35.0, 45.0]);
        for bullet in bullets {
            assert_eq!(bullet.pos.x, 35.0);
            assert_eq!(bullet.heading, 0.0);
            assert_eq!(bullet.damage, 10.0);
        }
    }

    #[test]
    fn test_volley_layout_vertical_heading() {
        let mut world = World::with_tuning(1, &bare_tuning(2));
        world.move_active(Heading::Up);
        world.fire();
        let bullets = &world.active_tank().bullets;
        assert_eq!(bullets.len(), 2);
        // Spread lies on the x axis when the tank faces up or down
        let mut xs: Vec<f32> = bullets.iter().map(|b| b.pos.x).collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(xs, vec![30.0, 40.0]);
        assert_eq!(bullets[0].pos.y, bullets[1].pos.y);
    }

    #[test]
    fn test_first_fire_is_never_gated() {
        let mut world = World::with_tuning(1, &bare_tuning(1));
        world.fire();
        assert_eq!(world.active_tank().bullets.len(), 1);
    }

    #[test]
    fn test_switch_hands_over_position_and_visibility() {
        let mut world = World::with_tuning(
            5,
            &Tuning {
                wall_count: 0,
                hay_count: 0,
                ..Tuning::default()
            },
        );
        world.move_active(Heading::Down);
        let handoff_pos = world.active_tank().pos;

        world.switch_tank();
        assert_eq!(world.active_index(), 1);
        assert_eq!(world.active_tank().pos, handoff_pos);
        assert!(world.active_tank().visible);
        assert!(!world.tanks[0].visible);
        assert_eq!(world.drain_events(), vec![WorldEvent::ViewportReset]);

        // Wraps around to the first tank
        world.switch_tank();
        world.switch_tank();
        assert_eq!(world.active_index(), 0);
    }

    #[test]
    #[should_panic(expected = "damage must be positive")]
    fn test_zero_damage_tank_rejected() {
        let _ = Tank::new(TankColor::Red, 0.0, 1, Vec2::ZERO);
    }

    #[test]
    #[should_panic(expected = "at least one bullet")]
    fn test_zero_volley_rejected() {
        let _ = Tank::new(TankColor::Red, 10.0, 0, Vec2::ZERO);
    }

    #[test]
    #[should_panic(expected = "health must start positive")]
    fn test_non_positive_hay_health_rejected() {
        let _ = Hay::new(Vec2::ZERO, 0.0);
    }

    #[test]
    #[should_panic(expected = "at least one tank")]
    fn test_empty_roster_rejected() {
        let tuning = Tuning {
            roster: Vec::new(),
            ..Tuning::default()
        };
        let _ = World::with_tuning(1, &tuning);
    }

    proptest! {
        #[test]
        fn committed_positions_stay_in_bounds(moves in prop::collection::vec(0usize..4, 0..200)) {
            let headings = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];
            let mut world = World::new(7);
            for m in moves {
                world.move_active(headings[m]);
                let pos = world.active_tank().pos;
                prop_assert!(pos.x >= 0.0 && pos.x < crate::consts::WORLD_WIDTH);
                prop_assert!(pos.y >= 0.0 && pos.y < crate::consts::WORLD_HEIGHT);
            }
        }
    }
}
