use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// A set of beliefs, ordered by name.
pub type BeliefSet = BTreeSet<Rc<Belief>>;

/// A named fact about the world, re-evaluated on every query.
///
/// Two beliefs with the same name are the same belief: equality, ordering
/// and hashing only look at the name.
pub struct Belief {
    name: String,
    condition: Box<dyn Fn() -> bool>,
}

impl Belief {
    pub fn builder(name: impl Into<String>) -> BeliefBuilder {
        BeliefBuilder {
            name: name.into(),
            condition: None,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate the condition now.
    #[inline]
    pub fn evaluate(&self) -> bool {
        (self.condition)()
    }
}

impl fmt::Debug for Belief {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Belief").field("name", &self.name).finish()
    }
}

impl PartialEq for Belief {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Belief {}

impl PartialOrd for Belief {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Belief {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Belief {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

pub struct BeliefBuilder {
    name: String,
    condition: Option<Box<dyn Fn() -> bool>>,
}

impl BeliefBuilder {
    /// Without a condition the belief always evaluates to `false`.
    pub fn condition(mut self, condition: impl Fn() -> bool + 'static) -> Self {
        self.condition = Some(Box::new(condition));
        self
    }

    pub fn build(self) -> Rc<Belief> {
        Rc::new(Belief {
            name: self.name,
            condition: self.condition.unwrap_or_else(|| Box::new(|| false)),
        })
    }
}

/// Whether every belief in `set` currently holds.
pub fn all_hold(set: &BeliefSet) -> bool {
    set.iter().all(|b| b.evaluate())
}
