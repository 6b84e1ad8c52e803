//! A woodcutter that picks up an axe, walks to a tree across the sampled
//! grid and chops until it carries enough wood, resting when tired.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::{RngExt, SeedableRng};

use gridmind_ai::{ActionStrategy, Agent, AgentAction, AgentGoal, Belief};
use gridmind_core::Vec2;
use gridmind_paths::Seeker;

use crate::config::DemoConfig;

const WOOD_NEEDED: u32 = 5;
const WALK_SPEED: f32 = 4.0;
const WALK_ENERGY_PER_UNIT: f32 = 0.02;

#[derive(Debug)]
struct World {
    position: Vec2,
    tree: Vec2,
    has_axe: bool,
    wood: u32,
    energy: f32,
}

type Shared<T> = Rc<RefCell<T>>;

struct PickAxe {
    world: Shared<World>,
}

impl ActionStrategy for PickAxe {
    fn can_perform(&self) -> bool {
        true
    }

    fn is_complete(&self) -> bool {
        self.world.borrow().has_axe
    }

    fn update(&mut self, _delta_time: f32) {
        self.world.borrow_mut().has_axe = true;
    }
}

/// Follows a path found by the seeker at start.
struct WalkTo {
    world: Shared<World>,
    seeker: Shared<Seeker>,
    target: Vec2,
    waypoints: Vec<Vec2>,
    next: usize,
}

impl ActionStrategy for WalkTo {
    fn can_perform(&self) -> bool {
        !self.waypoints.is_empty()
    }

    fn is_complete(&self) -> bool {
        !self.waypoints.is_empty() && self.next >= self.waypoints.len()
    }

    fn start(&mut self) {
        let from = self.world.borrow().position;
        self.next = 0;
        self.waypoints = match self.seeker.borrow_mut().search(from, self.target) {
            Some(path) => path.vector_path,
            None => {
                log::warn!("no path from {from} to {}", self.target);
                Vec::new()
            }
        };
    }

    fn update(&mut self, delta_time: f32) {
        let mut world = self.world.borrow_mut();
        let mut budget = WALK_SPEED * delta_time;
        while budget > 0.0 && self.next < self.waypoints.len() {
            let goal = self.waypoints[self.next];
            let dist = world.position.distance(goal);
            let step = dist.min(budget);
            if dist > 0.0 {
                world.position = world.position.lerp(goal, step / dist);
            }
            world.energy -= step * WALK_ENERGY_PER_UNIT;
            budget -= step;
            if step >= dist {
                self.next += 1;
            }
        }
    }
}

/// One swing per second, each yielding one or two logs.
struct Chop {
    world: Shared<World>,
    rng: SmallRng,
    timer: f32,
}

impl ActionStrategy for Chop {
    fn can_perform(&self) -> bool {
        self.world.borrow().energy > 0.0
    }

    fn is_complete(&self) -> bool {
        self.world.borrow().wood >= WOOD_NEEDED
    }

    fn start(&mut self) {
        self.timer = 0.0;
    }

    fn update(&mut self, delta_time: f32) {
        self.timer += delta_time;
        while self.timer >= 1.0 {
            self.timer -= 1.0;
            let mut world = self.world.borrow_mut();
            world.wood += self.rng.random_range(1..=2);
            world.energy -= 0.1;
        }
    }
}

struct Rest {
    world: Shared<World>,
}

impl ActionStrategy for Rest {
    fn can_perform(&self) -> bool {
        true
    }

    fn is_complete(&self) -> bool {
        self.world.borrow().energy >= 1.0
    }

    fn update(&mut self, delta_time: f32) {
        let mut world = self.world.borrow_mut();
        world.energy = (world.energy + 0.5 * delta_time).min(1.0);
    }
}

fn belief(name: &str, world: &Shared<World>, condition: impl Fn(&World) -> bool + 'static) -> Rc<Belief> {
    let world = world.clone();
    Belief::builder(name)
        .condition(move || condition(&world.borrow()))
        .build()
}

pub fn run(config: &DemoConfig, seeker: Seeker) {
    let world = Rc::new(RefCell::new(World {
        position: config.from,
        tree: config.to,
        has_axe: false,
        wood: 0,
        energy: 0.6,
    }));
    let seeker = Rc::new(RefCell::new(seeker));

    let has_axe = belief("hasAxe", &world, |w| w.has_axe);
    let at_tree = belief("atTree", &world, |w| w.position.distance(w.tree) < 1.0);
    let has_wood = belief("hasWood", &world, |w| w.wood >= WOOD_NEEDED);
    let rested = belief("rested", &world, |w| w.energy >= 0.9);

    let mut agent = Agent::new();
    for b in [&has_axe, &at_tree, &has_wood, &rested] {
        agent.add_belief(b.clone());
    }

    agent.add_action(
        AgentAction::builder("pickAxe")
            .effect(has_axe.clone())
            .strategy(PickAxe { world: world.clone() })
            .build(),
    );
    agent.add_action(
        AgentAction::builder("walkToTree")
            .cost(2.0)
            .effect(at_tree.clone())
            .strategy(WalkTo {
                world: world.clone(),
                seeker: seeker.clone(),
                target: config.to,
                waypoints: Vec::new(),
                next: 0,
            })
            .build(),
    );
    agent.add_action(
        AgentAction::builder("chop")
            .precondition(has_axe)
            .precondition(at_tree)
            .effect(has_wood.clone())
            .strategy(Chop {
                world: world.clone(),
                rng: SmallRng::seed_from_u64(config.seed),
                timer: 0.0,
            })
            .build(),
    );
    agent.add_action(
        AgentAction::builder("rest")
            .effect(rested.clone())
            .strategy(Rest { world: world.clone() })
            .build(),
    );

    agent.add_goal(
        AgentGoal::builder("gatherWood")
            .priority(1.0)
            .desired_effect(has_wood)
            .build(),
    );
    agent.add_goal(
        AgentGoal::builder("rest")
            .priority_with({
                let world = world.clone();
                move || (1.0 - world.borrow().energy) * 4.0
            })
            .desired_effect(rested)
            .build(),
    );

    let mut running: Option<String> = None;
    for tick in 0..config.ticks {
        agent.update(config.tick_seconds);

        let now = agent.current_action().map(|a| a.name().to_owned());
        if now != running {
            let w = world.borrow();
            log::info!(
                "tick {tick}: {} (at {}, energy {:.2}, wood {})",
                now.as_deref().unwrap_or("idle"),
                w.position,
                w.energy,
                w.wood
            );
            running = now;
        }
    }

    let w = world.borrow();
    println!(
        "woodcutter after {} ticks: {} wood, energy {:.2}, at {}",
        config.ticks, w.wood, w.energy, w.position
    );
}
