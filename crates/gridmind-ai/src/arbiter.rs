//! Utility selection: each tick, the most insistent expert acts.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::{Rng, RngExt, SeedableRng};

/// A candidate behaviour competing for control.
pub trait Expert {
    /// How strongly this expert wants to act. Only positive values can win.
    fn insistence(&self) -> i32;

    /// Called on the winner of an iteration.
    fn execute(&mut self);

    /// Called on every expert after the winner has executed.
    fn late_execute(&mut self) {}
}

/// Handle returned by [`Arbiter::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExpertId(u64);

impl fmt::Display for ExpertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expert#{}", self.0)
    }
}

/// Cloneable handle for removing experts from inside their own callbacks.
///
/// Requests are queued and applied when the arbiter next sweeps, at the
/// start and at the end of every [`Arbiter::iteration`].
#[derive(Debug, Clone, Default)]
pub struct Unregistrar {
    pending: Rc<RefCell<Vec<ExpertId>>>,
}

impl Unregistrar {
    pub fn unregister(&self, id: ExpertId) {
        self.pending.borrow_mut().push(id);
    }
}

type SharedExpert = Rc<RefCell<dyn Expert>>;

/// Picks one expert per iteration.
///
/// Ties at the highest positive insistence are broken uniformly at random
/// with the arbiter's own RNG, so a seeded arbiter is reproducible.
pub struct Arbiter<R = SmallRng> {
    experts: Vec<(ExpertId, SharedExpert)>,
    next_id: u64,
    rng: R,
    unregistrar: Unregistrar,
    ties: Vec<usize>,
}

impl Arbiter<SmallRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Arbiter<R> {
    pub fn new(rng: R) -> Self {
        Self {
            experts: Vec::new(),
            next_id: 0,
            rng,
            unregistrar: Unregistrar::default(),
            ties: Vec::new(),
        }
    }

    /// Add an expert. Registering an expert that is already present returns
    /// its existing id.
    pub fn register(&mut self, expert: SharedExpert) -> ExpertId {
        if let Some((id, _)) = self
            .experts
            .iter()
            .find(|(_, e)| std::ptr::addr_eq(Rc::as_ptr(e), Rc::as_ptr(&expert)))
        {
            return *id;
        }
        let id = ExpertId(self.next_id);
        self.next_id += 1;
        self.experts.push((id, expert));
        id
    }

    /// Remove an expert right away. Unknown ids are ignored.
    pub fn unregister(&mut self, id: ExpertId) {
        self.experts.retain(|(e, _)| *e != id);
    }

    /// Handle for deferred removal.
    pub fn unregistrar(&self) -> Unregistrar {
        self.unregistrar.clone()
    }

    pub fn clear(&mut self) {
        self.experts.clear();
        self.unregistrar.pending.borrow_mut().clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.experts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.experts.is_empty()
    }

    /// Run one round: execute the most insistent expert, then give every
    /// expert its `late_execute` call. Returns the winner, if any expert had
    /// a positive insistence.
    pub fn iteration(&mut self) -> Option<ExpertId> {
        self.sweep();

        let mut highest = 0;
        self.ties.clear();
        for (i, (_, expert)) in self.experts.iter().enumerate() {
            let insistence = expert.borrow().insistence();
            if insistence > highest {
                highest = insistence;
                self.ties.clear();
                self.ties.push(i);
            } else if insistence == highest && highest != 0 {
                self.ties.push(i);
            }
        }

        let winner = match self.ties.len() {
            0 => None,
            1 => Some(self.ties[0]),
            n => Some(self.ties[self.rng.random_range(0..n)]),
        };

        let winner = winner.map(|i| {
            let (id, expert) = &self.experts[i];
            log::trace!("{id} wins with insistence {highest}");
            expert.borrow_mut().execute();
            *id
        });

        for (_, expert) in &self.experts {
            expert.borrow_mut().late_execute();
        }

        self.sweep();
        winner
    }

    fn sweep(&mut self) {
        let pending: Vec<ExpertId> = self.unregistrar.pending.borrow_mut().drain(..).collect();
        if pending.is_empty() {
            return;
        }
        self.experts.retain(|(id, _)| !pending.contains(id));
        log::trace!("removed {} experts", pending.len());
    }
}
