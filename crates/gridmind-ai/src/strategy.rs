//! How an action is carried out over time.

/// Runtime behaviour of an [`AgentAction`](crate::AgentAction).
///
/// `start`, `update` and `stop` default to doing nothing, so a strategy only
/// has to report whether it can run and whether it has finished.
pub trait ActionStrategy {
    fn can_perform(&self) -> bool;

    fn is_complete(&self) -> bool;

    fn start(&mut self) {}

    fn update(&mut self, _delta_time: f32) {}

    fn stop(&mut self) {}
}

/// Completes as soon as it is queried. Actions built without a strategy use
/// this one.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantStrategy;

impl ActionStrategy for InstantStrategy {
    fn can_perform(&self) -> bool {
        true
    }

    fn is_complete(&self) -> bool {
        true
    }
}

/// Waits for `duration` seconds of accumulated `update` time.
#[derive(Debug, Clone, Copy)]
pub struct IdleStrategy {
    duration: f32,
    elapsed: f32,
}

impl IdleStrategy {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
        }
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl ActionStrategy for IdleStrategy {
    fn can_perform(&self) -> bool {
        true
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn start(&mut self) {
        self.elapsed = 0.0;
    }

    fn update(&mut self, delta_time: f32) {
        self.elapsed += delta_time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_completes_after_duration() {
        let mut s = IdleStrategy::new(1.0);
        s.start();
        assert!(!s.is_complete());
        s.update(0.6);
        assert!(!s.is_complete());
        s.update(0.6);
        assert!(s.is_complete());

        s.start();
        assert_eq!(s.elapsed(), 0.0);
    }
}
