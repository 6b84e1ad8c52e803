use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::belief::{Belief, BeliefSet, all_hold};
use crate::strategy::{ActionStrategy, InstantStrategy};

/// Smallest planning cost an action can carry.
pub const MIN_COST: f32 = 1e-3;

/// Something an agent can do: what it needs, what it achieves, what it costs
/// and how it runs.
///
/// Actions are built once and shared through `Rc` between the agent and the
/// plans that reference them. The strategy keeps its own runtime state.
pub struct AgentAction {
    name: String,
    cost: f32,
    preconditions: BeliefSet,
    effects: BeliefSet,
    strategy: RefCell<Box<dyn ActionStrategy>>,
}

impl AgentAction {
    pub fn builder(name: impl Into<String>) -> ActionBuilder {
        ActionBuilder {
            name: name.into(),
            cost: 1.0,
            preconditions: BeliefSet::new(),
            effects: BeliefSet::new(),
            strategy: None,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn cost(&self) -> f32 {
        self.cost
    }

    #[inline]
    pub fn preconditions(&self) -> &BeliefSet {
        &self.preconditions
    }

    #[inline]
    pub fn effects(&self) -> &BeliefSet {
        &self.effects
    }

    /// Whether every precondition holds right now.
    pub fn preconditions_met(&self) -> bool {
        all_hold(&self.preconditions)
    }

    pub fn can_perform(&self) -> bool {
        self.strategy.borrow().can_perform()
    }

    pub fn is_complete(&self) -> bool {
        self.strategy.borrow().is_complete()
    }

    pub fn start(&self) {
        log::trace!("action {} started", self.name);
        self.strategy.borrow_mut().start();
    }

    /// Advance the strategy by `delta_time` if it can run. Once complete,
    /// the effects are evaluated.
    pub fn update(&self, delta_time: f32) {
        let mut strategy = self.strategy.borrow_mut();
        if strategy.can_perform() {
            strategy.update(delta_time);
        }
        if !strategy.is_complete() {
            return;
        }
        drop(strategy);

        for effect in &self.effects {
            let holds = effect.evaluate();
            log::trace!("action {}: effect {} = {holds}", self.name, effect.name());
        }
    }

    pub fn stop(&self) {
        log::trace!("action {} stopped", self.name);
        self.strategy.borrow_mut().stop();
    }
}

impl fmt::Debug for AgentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentAction")
            .field("name", &self.name)
            .field("cost", &self.cost)
            .field("preconditions", &self.preconditions)
            .field("effects", &self.effects)
            .finish_non_exhaustive()
    }
}

pub struct ActionBuilder {
    name: String,
    cost: f32,
    preconditions: BeliefSet,
    effects: BeliefSet,
    strategy: Option<Box<dyn ActionStrategy>>,
}

impl ActionBuilder {
    /// Planning cost. Defaults to `1.0`; anything not positive and finite
    /// is raised to [`MIN_COST`].
    pub fn cost(mut self, cost: f32) -> Self {
        if cost > 0.0 && cost.is_finite() {
            self.cost = cost;
        } else {
            log::warn!("action {}: cost {cost} is not positive, using {MIN_COST}", self.name);
            self.cost = MIN_COST;
        }
        self
    }

    pub fn strategy(mut self, strategy: impl ActionStrategy + 'static) -> Self {
        self.strategy = Some(Box::new(strategy));
        self
    }

    pub fn precondition(mut self, belief: Rc<Belief>) -> Self {
        self.preconditions.insert(belief);
        self
    }

    pub fn effect(mut self, belief: Rc<Belief>) -> Self {
        self.effects.insert(belief);
        self
    }

    pub fn build(self) -> Rc<AgentAction> {
        Rc::new(AgentAction {
            name: self.name,
            cost: self.cost,
            preconditions: self.preconditions,
            effects: self.effects,
            strategy: RefCell::new(
                self.strategy
                    .unwrap_or_else(|| Box::new(InstantStrategy)),
            ),
        })
    }
}
