//! Backward-chaining planner.
//!
//! Starting from a goal's desired effects, the planner looks for actions
//! whose effects cover what is still required, replaces those requirements
//! with the action's preconditions and recurses with the action removed.
//! Every successful branch becomes a leaf of its parent; the plan follows
//! the cheapest leaf at each level from the goal downwards.

use std::rc::Rc;

use crate::action::AgentAction;
use crate::belief::BeliefSet;
use crate::goal::AgentGoal;
use crate::plan::ActionPlan;

/// Default priority penalty applied to the goal pursued last.
pub const RECENT_GOAL_PENALTY: f32 = 0.01;

#[derive(Debug, Clone, Copy)]
pub struct Planner {
    /// Subtracted from the most recent goal's priority when ordering goals,
    /// so that among equal priorities a different goal is tried first.
    pub recent_goal_penalty: f32,
}

impl Default for Planner {
    fn default() -> Self {
        Self {
            recent_goal_penalty: RECENT_GOAL_PENALTY,
        }
    }
}

struct Node {
    action: Option<Rc<AgentAction>>,
    cost: f32,
    leaves: Vec<Node>,
}

impl Node {
    fn new(action: Option<Rc<AgentAction>>, cost: f32) -> Self {
        Self {
            action,
            cost,
            leaves: Vec::new(),
        }
    }

    /// First leaf with the lowest cost.
    fn cheapest_leaf(&self) -> Option<&Node> {
        self.leaves
            .iter()
            .reduce(|best, leaf| if leaf.cost < best.cost { leaf } else { best })
    }
}

impl Planner {
    pub fn new(recent_goal_penalty: f32) -> Self {
        Self {
            recent_goal_penalty,
        }
    }

    /// Plan for the most urgent goal that is not yet satisfied and can be
    /// reached with `actions`.
    ///
    /// Goals are tried by descending priority (ties keep their order in
    /// `goals`); `most_recent_goal` is ranked as if its priority were lower by
    /// [`recent_goal_penalty`](Self::recent_goal_penalty). Returns `None` when
    /// no goal can be planned for.
    pub fn plan(
        &self,
        actions: &[Rc<AgentAction>],
        goals: &[Rc<AgentGoal>],
        most_recent_goal: Option<&Rc<AgentGoal>>,
    ) -> Option<ActionPlan> {
        let mut ordered: Vec<(&Rc<AgentGoal>, f32)> = goals
            .iter()
            .filter(|g| !g.is_satisfied())
            .map(|g| {
                let mut priority = g.priority();
                if most_recent_goal.is_some_and(|r| Rc::ptr_eq(r, g)) {
                    priority -= self.recent_goal_penalty;
                }
                (g, priority)
            })
            .collect();
        ordered.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut by_cost: Vec<Rc<AgentAction>> = Vec::with_capacity(actions.len());
        for action in actions {
            if !by_cost.iter().any(|a| Rc::ptr_eq(a, action)) {
                by_cost.push(action.clone());
            }
        }
        by_cost.sort_by(|a, b| a.cost().total_cmp(&b.cost()));

        for (goal, _) in ordered {
            let mut root = Node::new(None, 0.0);
            if !self.find_path(&mut root, goal.desired_effects().clone(), &by_cost) {
                log::trace!("goal {}: no plan", goal.name());
                continue;
            }
            if root.leaves.is_empty() {
                continue;
            }

            let mut steps = Vec::new();
            let mut node = &root;
            while let Some(leaf) = node.cheapest_leaf() {
                steps.extend(leaf.action.clone());
                node = leaf;
            }
            // Leaves were walked from the goal backwards.
            steps.reverse();

            log::debug!(
                "planned {} for goal {} (cost {})",
                steps
                    .iter()
                    .map(|a| a.name())
                    .collect::<Vec<_>>()
                    .join(" -> "),
                goal.name(),
                node.cost
            );
            return Some(ActionPlan::new(goal.clone(), steps, node.cost));
        }

        log::trace!("no plan for any of {} goals", goals.len());
        None
    }

    /// Expand `parent` with every action that makes progress on `required`.
    /// `actions` must be sorted by ascending cost.
    fn find_path(&self, parent: &mut Node, mut required: BeliefSet, actions: &[Rc<AgentAction>]) -> bool {
        required.retain(|b| !b.evaluate());
        if required.is_empty() {
            return true;
        }

        for action in actions {
            if !action.effects().iter().any(|e| required.contains(e)) {
                continue;
            }

            let mut next_required: BeliefSet = required.difference(action.effects()).cloned().collect();
            next_required.extend(action.preconditions().iter().cloned());

            let remaining: Vec<Rc<AgentAction>> = actions
                .iter()
                .filter(|&a| !Rc::ptr_eq(a, action))
                .cloned()
                .collect();

            let mut child = Node::new(Some(action.clone()), parent.cost + action.cost());
            if self.find_path(&mut child, next_required.clone(), &remaining) {
                parent.leaves.push(child);
                next_required.retain(|b| !action.preconditions().contains(b));
            }

            // This action alone covers everything outside its own
            // preconditions.
            if next_required.is_empty() {
                return true;
            }
        }

        !parent.leaves.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::belief::Belief;

    fn flag(name: &str, value: bool) -> (Rc<Belief>, Rc<Cell<bool>>) {
        let cell = Rc::new(Cell::new(value));
        let belief = Belief::builder(name)
            .condition({
                let cell = cell.clone();
                move || cell.get()
            })
            .build();
        (belief, cell)
    }

    fn names(plan: &ActionPlan) -> Vec<&str> {
        plan.actions().map(|a| a.name()).collect()
    }

    #[test]
    fn single_action_plan() {
        let (has_wood, _) = flag("hasWood", false);
        let chop = AgentAction::builder("chop").effect(has_wood.clone()).build();
        let goal = AgentGoal::builder("getWood")
            .priority(1.0)
            .desired_effect(has_wood)
            .build();

        let plan = Planner::default().plan(&[chop], &[goal.clone()], None).unwrap();
        assert_eq!(names(&plan), ["chop"]);
        assert_eq!(plan.total_cost(), 1.0);
        assert!(Rc::ptr_eq(plan.goal(), &goal));
    }

    #[test]
    fn chains_through_preconditions() {
        let (at_tree, at_tree_cell) = flag("atTree", false);
        let (has_axe, has_axe_cell) = flag("hasAxe", false);
        let (has_wood, has_wood_cell) = flag("hasWood", false);

        let actions = vec![
            AgentAction::builder("chop")
                .cost(2.0)
                .precondition(at_tree.clone())
                .precondition(has_axe.clone())
                .effect(has_wood.clone())
                .build(),
            AgentAction::builder("walkToTree").effect(at_tree).build(),
            AgentAction::builder("pickAxe").effect(has_axe).build(),
        ];
        let goal = AgentGoal::builder("getWood").desired_effect(has_wood).build();

        let plan = Planner::default().plan(&actions, &[goal.clone()], None).unwrap();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.actions().last().unwrap().name(), "chop");
        assert_eq!(plan.total_cost(), 4.0);

        // Applying the plan in order makes the goal true.
        for action in plan.actions() {
            assert!(action.preconditions_met(), "{} not ready", action.name());
            match action.name() {
                "walkToTree" => at_tree_cell.set(true),
                "pickAxe" => has_axe_cell.set(true),
                "chop" => has_wood_cell.set(true),
                other => panic!("unexpected action {other}"),
            }
        }
        assert!(goal.is_satisfied());
    }

    #[test]
    fn no_action_repeats() {
        let (a, _) = flag("a", false);
        let (b, _) = flag("b", false);
        let (c, _) = flag("c", false);
        // `loop` needs its own effect; the planner must not reuse it.
        let actions = vec![
            AgentAction::builder("loop").precondition(a.clone()).effect(a.clone()).effect(b.clone()).build(),
            AgentAction::builder("seed").effect(a.clone()).build(),
            AgentAction::builder("finish").precondition(b).effect(c.clone()).build(),
        ];
        let goal = AgentGoal::builder("g").desired_effect(c).build();

        let plan = Planner::default().plan(&actions, &[goal], None).unwrap();
        let mut seen = names(&plan);
        let total = seen.len();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), total);
        assert_eq!(names(&plan), ["seed", "loop", "finish"]);
    }

    #[test]
    fn repeated_action_handle_is_used_once() {
        let (a, _) = flag("a", false);
        let (b, _) = flag("b", false);
        let grow = AgentAction::builder("grow")
            .precondition(a.clone())
            .effect(a.clone())
            .effect(b.clone())
            .build();
        let seed = AgentAction::builder("seed").effect(a).build();
        let goal = AgentGoal::builder("g").desired_effect(b).build();

        let plan = Planner::default()
            .plan(&[grow.clone(), grow, seed], &[goal], None)
            .unwrap();
        assert_eq!(names(&plan), ["seed", "grow"]);
        assert_eq!(plan.total_cost(), 2.0);
    }

    #[test]
    fn picks_cheapest_branch() {
        let (has_wood, _) = flag("hasWood", false);
        let actions = vec![
            AgentAction::builder("buy").cost(5.0).effect(has_wood.clone()).build(),
            AgentAction::builder("chop").cost(2.0).effect(has_wood.clone()).build(),
        ];
        let goal = AgentGoal::builder("getWood").desired_effect(has_wood).build();

        let plan = Planner::default().plan(&actions, &[goal], None).unwrap();
        assert_eq!(names(&plan), ["chop"]);
        assert_eq!(plan.total_cost(), 2.0);
    }

    #[test]
    fn unreachable_goal_falls_through() {
        let (fly, _) = flag("canFly", false);
        let (rested, _) = flag("rested", false);
        let sleep = AgentAction::builder("sleep").effect(rested.clone()).build();
        let goals = vec![
            AgentGoal::builder("fly").priority(10.0).desired_effect(fly).build(),
            AgentGoal::builder("rest").priority(1.0).desired_effect(rested).build(),
        ];

        let plan = Planner::default().plan(&[sleep], &goals, None).unwrap();
        assert_eq!(plan.goal().name(), "rest");
    }

    #[test]
    fn satisfied_goals_are_skipped() {
        let (done, _) = flag("done", true);
        let act = AgentAction::builder("act").effect(done.clone()).build();
        let goal = AgentGoal::builder("g").desired_effect(done).build();
        assert!(Planner::default().plan(&[act], &[goal], None).is_none());
    }

    #[test]
    fn higher_priority_goal_wins() {
        let (x, _) = flag("x", false);
        let (y, _) = flag("y", false);
        let actions = vec![
            AgentAction::builder("doX").effect(x.clone()).build(),
            AgentAction::builder("doY").effect(y.clone()).build(),
        ];
        let goals = vec![
            AgentGoal::builder("low").priority(1.0).desired_effect(x).build(),
            AgentGoal::builder("high").priority(2.0).desired_effect(y).build(),
        ];
        let plan = Planner::default().plan(&actions, &goals, None).unwrap();
        assert_eq!(plan.goal().name(), "high");
    }

    #[test]
    fn recent_goal_yields_on_ties() {
        let (x, _) = flag("x", false);
        let (y, _) = flag("y", false);
        let actions = vec![
            AgentAction::builder("doX").effect(x.clone()).build(),
            AgentAction::builder("doY").effect(y.clone()).build(),
        ];
        let goals = vec![
            AgentGoal::builder("first").priority(1.0).desired_effect(x).build(),
            AgentGoal::builder("second").priority(1.0).desired_effect(y).build(),
        ];
        let planner = Planner::default();

        let plan = planner.plan(&actions, &goals, None).unwrap();
        assert_eq!(plan.goal().name(), "first");

        let plan = planner.plan(&actions, &goals, Some(&goals[0])).unwrap();
        assert_eq!(plan.goal().name(), "second");

        // Without a penalty ties keep their order.
        let plan = Planner::new(0.0).plan(&actions, &goals, Some(&goals[0])).unwrap();
        assert_eq!(plan.goal().name(), "first");
    }

    #[test]
    fn no_actions_no_plan() {
        let (x, _) = flag("x", false);
        let goal = AgentGoal::builder("g").desired_effect(x).build();
        assert!(Planner::default().plan(&[], &[goal], None).is_none());
    }
}
