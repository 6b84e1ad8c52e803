//! Decision making for game agents.
//!
//! # Goal-oriented action planning
//!
//! [`Belief`]s are named predicates over the world. [`AgentAction`]s require
//! some beliefs (preconditions), make others true (effects) and run through
//! an [`ActionStrategy`]. [`AgentGoal`]s name the beliefs they want to hold.
//! The [`Planner`] chains actions backwards from a goal into an
//! [`ActionPlan`], and an [`Agent`] executes plans tick by tick, replanning
//! when a plan finishes or breaks.
//!
//! # Arbitration
//!
//! An [`Arbiter`] holds a set of [`Expert`]s and, on every iteration, lets
//! the one with the highest insistence act.

mod action;
mod agent;
mod arbiter;
mod belief;
mod goal;
mod plan;
mod planner;
mod strategy;

pub use action::{ActionBuilder, AgentAction, MIN_COST};
pub use agent::Agent;
pub use arbiter::{Arbiter, Expert, ExpertId, Unregistrar};
pub use belief::{Belief, BeliefBuilder, BeliefSet, all_hold};
pub use goal::{AgentGoal, GoalBuilder, Priority};
pub use plan::ActionPlan;
pub use planner::{Planner, RECENT_GOAL_PENALTY};
pub use strategy::{ActionStrategy, IdleStrategy, InstantStrategy};
