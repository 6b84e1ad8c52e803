use std::rc::Rc;

use crate::action::AgentAction;
use crate::goal::AgentGoal;

/// A sequence of actions expected to satisfy `goal`.
///
/// Actions are kept as a stack: the next action to run is on top.
#[derive(Debug, Clone)]
pub struct ActionPlan {
    goal: Rc<AgentGoal>,
    stack: Vec<Rc<AgentAction>>,
    total_cost: f32,
}

impl ActionPlan {
    /// `actions` are given in execution order.
    pub fn new(goal: Rc<AgentGoal>, mut actions: Vec<Rc<AgentAction>>, total_cost: f32) -> Self {
        actions.reverse();
        Self {
            goal,
            stack: actions,
            total_cost,
        }
    }

    #[inline]
    pub fn goal(&self) -> &Rc<AgentGoal> {
        &self.goal
    }

    #[inline]
    pub fn total_cost(&self) -> f32 {
        self.total_cost
    }

    /// Number of actions not yet taken.
    #[inline]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn peek(&self) -> Option<&Rc<AgentAction>> {
        self.stack.last()
    }

    pub fn pop(&mut self) -> Option<Rc<AgentAction>> {
        self.stack.pop()
    }

    /// Remaining actions in execution order.
    pub fn actions(&self) -> impl Iterator<Item = &Rc<AgentAction>> + '_ {
        self.stack.iter().rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_execution_order() {
        let goal = AgentGoal::builder("g").build();
        let a = AgentAction::builder("a").build();
        let b = AgentAction::builder("b").cost(2.0).build();
        let mut plan = ActionPlan::new(goal, vec![a.clone(), b.clone()], 3.0);

        let names: Vec<_> = plan.actions().map(|a| a.name()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(plan.total_cost(), 3.0);
        assert!(Rc::ptr_eq(plan.peek().unwrap(), &a));
        assert!(Rc::ptr_eq(&plan.pop().unwrap(), &a));
        assert!(Rc::ptr_eq(&plan.pop().unwrap(), &b));
        assert!(plan.pop().is_none());
        assert!(plan.is_empty());
    }
}
