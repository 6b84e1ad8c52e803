use std::fmt;
use std::rc::Rc;

use crate::belief::{Belief, BeliefSet};

/// A goal's priority: a constant, or a closure evaluated on every query.
pub enum Priority {
    Fixed(f32),
    Dynamic(Box<dyn Fn() -> f32>),
}

impl Priority {
    #[inline]
    pub fn value(&self) -> f32 {
        match self {
            Priority::Fixed(p) => *p,
            Priority::Dynamic(f) => f(),
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Fixed(0.0)
    }
}

impl fmt::Debug for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Fixed(p) => f.debug_tuple("Fixed").field(p).finish(),
            Priority::Dynamic(_) => f.write_str("Dynamic"),
        }
    }
}

/// A state the agent wants to reach, described by the beliefs that must
/// hold once it is reached.
#[derive(Debug)]
pub struct AgentGoal {
    name: String,
    priority: Priority,
    desired_effects: BeliefSet,
}

impl AgentGoal {
    pub fn builder(name: impl Into<String>) -> GoalBuilder {
        GoalBuilder {
            name: name.into(),
            priority: Priority::default(),
            desired_effects: BeliefSet::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current priority; higher is more urgent.
    #[inline]
    pub fn priority(&self) -> f32 {
        self.priority.value()
    }

    #[inline]
    pub fn desired_effects(&self) -> &BeliefSet {
        &self.desired_effects
    }

    /// Whether every desired effect already holds.
    pub fn is_satisfied(&self) -> bool {
        self.desired_effects.iter().all(|b| b.evaluate())
    }
}

pub struct GoalBuilder {
    name: String,
    priority: Priority,
    desired_effects: BeliefSet,
}

impl GoalBuilder {
    pub fn priority(mut self, priority: f32) -> Self {
        self.priority = Priority::Fixed(priority);
        self
    }

    /// Priority computed on demand, e.g. from a hunger meter.
    pub fn priority_with(mut self, priority: impl Fn() -> f32 + 'static) -> Self {
        self.priority = Priority::Dynamic(Box::new(priority));
        self
    }

    pub fn desired_effect(mut self, belief: Rc<Belief>) -> Self {
        self.desired_effects.insert(belief);
        self
    }

    pub fn build(self) -> Rc<AgentGoal> {
        Rc::new(AgentGoal {
            name: self.name,
            priority: self.priority,
            desired_effects: self.desired_effects,
        })
    }
}
