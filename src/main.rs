//! Grid Tanks headless demo driver
//!
//! Runs a seeded world with a scripted input stream and prints a summary.
//! Rendering and real keyboard wiring live in a separate frontend; this
//! binary only exercises the simulation.

use grid_tanks::consts::SIM_DT;
use grid_tanks::sim::{Heading, TickInput, World, WorldEvent, tick};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);

    let mut world = World::new(seed);
    let mut rng = Pcg32::seed_from_u64(seed ^ 0x5EED);
    let headings = [
        Heading::Up,
        Heading::Down,
        Heading::Left,
        Heading::Right,
    ];

    let mut follows = 0u32;
    let mut switches = 0u32;

    // Ten simulated seconds of a jittery driver that wanders and shoots
    for frame in 0..600u32 {
        let mut input = TickInput::default();
        if frame % 5 == 0 {
            input.move_to = Some(headings[rng.random_range(0..headings.len())]);
        }
        input.fire = frame % 30 == 0;
        if frame % 240 == 120 {
            input.switch_tank = true;
            switches += 1;
        }
        tick(&mut world, &input, SIM_DT);

        for event in world.drain_events() {
            if let WorldEvent::ViewportFollow { top_left } = event {
                follows += 1;
                log::info!("camera follow -> ({:.0}, {:.0})", top_left.x, top_left.y);
            }
        }
    }

    let tank = world.active_tank();
    println!(
        "seed {seed}: {:?} tank at ({:.0}, {:.0}), {} hay bales left, {} camera follows, {} switches",
        tank.color,
        tank.pos.x,
        tank.pos.y,
        world.hays.len(),
        follows,
        switches
    );
}
