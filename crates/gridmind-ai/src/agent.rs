//! Runtime driver for goal-oriented planning.
//!
//! Each [`Agent::update`] advances the running action, and whenever nothing
//! is running asks the [`Planner`] for a plan towards a goal that outranks
//! the one being pursued.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::action::AgentAction;
use crate::belief::Belief;
use crate::goal::AgentGoal;
use crate::plan::ActionPlan;
use crate::planner::Planner;

#[derive(Debug, Default)]
pub struct Agent {
    actions: Vec<Rc<AgentAction>>,
    goals: Vec<Rc<AgentGoal>>,
    beliefs: BTreeMap<String, Rc<Belief>>,
    planner: Planner,

    plan: Option<ActionPlan>,
    current_action: Option<Rc<AgentAction>>,
    current_goal: Option<Rc<AgentGoal>>,
    last_goal: Option<Rc<AgentGoal>>,
    plan_pending: bool,
}

impl Agent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_planner(planner: Planner) -> Self {
        Self {
            planner,
            ..Self::default()
        }
    }

    /// Register an action. Adding the same action twice has no effect.
    pub fn add_action(&mut self, action: Rc<AgentAction>) {
        if !self.actions.iter().any(|a| Rc::ptr_eq(a, &action)) {
            self.actions.push(action);
        }
    }

    /// Register a goal. Adding the same goal twice has no effect.
    pub fn add_goal(&mut self, goal: Rc<AgentGoal>) {
        if !self.goals.iter().any(|g| Rc::ptr_eq(g, &goal)) {
            self.goals.push(goal);
        }
    }

    /// Register a belief under its name, replacing any belief of that name.
    pub fn add_belief(&mut self, belief: Rc<Belief>) {
        self.beliefs.insert(belief.name().to_owned(), belief);
    }

    pub fn belief(&self, name: &str) -> Option<&Rc<Belief>> {
        self.beliefs.get(name)
    }

    pub fn beliefs(&self) -> impl Iterator<Item = &Rc<Belief>> + '_ {
        self.beliefs.values()
    }

    pub fn actions(&self) -> &[Rc<AgentAction>] {
        &self.actions
    }

    pub fn goals(&self) -> &[Rc<AgentGoal>] {
        &self.goals
    }

    pub fn plan(&self) -> Option<&ActionPlan> {
        self.plan.as_ref()
    }

    pub fn current_action(&self) -> Option<&Rc<AgentAction>> {
        self.current_action.as_ref()
    }

    /// Goal of the plan being executed.
    pub fn current_goal(&self) -> Option<&Rc<AgentGoal>> {
        self.current_goal.as_ref()
    }

    /// Goal of the last plan that ran to completion.
    pub fn last_goal(&self) -> Option<&Rc<AgentGoal>> {
        self.last_goal.as_ref()
    }

    pub fn planner_mut(&mut self) -> &mut Planner {
        &mut self.planner
    }

    /// Advance the agent by one tick.
    pub fn update(&mut self, delta_time: f32) {
        if self.plan_pending {
            self.plan_pending = false;
            self.switch_to_new_plan();
        }

        match self.current_action.clone() {
            Some(action) if action.is_complete() => {
                action.stop();
                self.current_action = None;
                log::debug!("action {} complete", action.name());

                if self.plan.as_ref().is_some_and(ActionPlan::is_empty) {
                    self.plan = None;
                    self.last_goal = self.current_goal.take();
                    if let Some(goal) = &self.last_goal {
                        log::debug!("goal {} reached", goal.name());
                    }
                }
            }
            Some(action) => action.update(delta_time),
            None => {
                self.replan();
            }
        }

        if self.current_action.is_none() {
            self.plan_pending = false;
            if let Some(next) = self.plan.as_mut().and_then(ActionPlan::pop) {
                self.begin(next);
            }
        }
    }

    /// Ask the planner for a plan towards a goal that outranks the current
    /// one (any goal when none is pursued).
    ///
    /// A new plan replaces the current one. If an action is running, the
    /// switch happens on the next [`update`](Self::update), which stops the
    /// running action unless the new plan starts with the same one. Returns
    /// whether a plan was found.
    pub fn replan(&mut self) -> bool {
        let candidates: Vec<Rc<AgentGoal>> = match &self.current_goal {
            Some(current) => {
                let floor = current.priority();
                self.goals
                    .iter()
                    .filter(|g| g.priority() > floor)
                    .cloned()
                    .collect()
            }
            None => self.goals.clone(),
        };

        let Some(plan) = self
            .planner
            .plan(&self.actions, &candidates, self.last_goal.as_ref())
        else {
            return false;
        };

        self.current_goal = Some(plan.goal().clone());
        self.plan = Some(plan);
        self.plan_pending = true;
        true
    }

    /// Drop the plan, the running action and the pursued goal.
    pub fn clear_state(&mut self) {
        self.plan = None;
        self.current_action = None;
        self.current_goal = None;
        self.plan_pending = false;
    }

    fn switch_to_new_plan(&mut self) {
        let Some(next) = self.plan.as_mut().and_then(ActionPlan::pop) else {
            return;
        };
        if let Some(current) = &self.current_action {
            if Rc::ptr_eq(current, &next) {
                return;
            }
            current.stop();
            self.current_action = None;
        }
        self.begin(next);
    }

    /// Start `action` if its preconditions still hold, otherwise abandon the
    /// plan.
    fn begin(&mut self, action: Rc<AgentAction>) {
        if action.preconditions_met() {
            action.start();
            self.current_action = Some(action);
        } else {
            log::debug!(
                "action {}: preconditions no longer hold, dropping plan",
                action.name()
            );
            self.clear_state();
        }
    }
}
