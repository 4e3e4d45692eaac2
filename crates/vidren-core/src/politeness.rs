//! Randomized pause between distinct network lookups.
//!
//! Only real fetches are followed by a pause; cache hits never wait. The
//! pause only affects wall-clock time, never the produced mapping.

use rand::Rng;
use std::time::Duration;

type Sleeper = Box<dyn FnMut(Duration)>;

pub struct PolitenessScheduler {
    min_delay: Duration,
    max_delay: Duration,
    sleeper: Sleeper,
}

impl std::fmt::Debug for PolitenessScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolitenessScheduler")
            .field("min_delay", &self.min_delay)
            .field("max_delay", &self.max_delay)
            .finish_non_exhaustive()
    }
}

impl PolitenessScheduler {
    /// `max_delay` is raised to `min_delay` if smaller.
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        Self::with_sleeper(min_delay, max_delay, std::thread::sleep)
    }

    /// Same as [`new`](Self::new) but sleeps through `sleeper` (tests record instead of waiting).
    pub fn with_sleeper(
        min_delay: Duration,
        max_delay: Duration,
        sleeper: impl FnMut(Duration) + 'static,
    ) -> Self {
        Self {
            min_delay,
            max_delay: max_delay.max(min_delay),
            sleeper: Box::new(sleeper),
        }
    }

    /// No pauses at all.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn bounds(&self) -> (Duration, Duration) {
        (self.min_delay, self.max_delay)
    }

    /// Sleeps for a uniform draw from `[min_delay, max_delay]` when `did_fetch`
    /// is true. Returns the pause taken.
    pub fn maybe_delay(&mut self, did_fetch: bool) -> Option<Duration> {
        if !did_fetch {
            return None;
        }
        let pause = self.draw();
        tracing::debug!("pausing for {:.2} seconds", pause.as_secs_f64());
        if !pause.is_zero() {
            (self.sleeper)(pause);
        }
        Some(pause)
    }

    fn draw(&self) -> Duration {
        if self.max_delay <= self.min_delay {
            return self.min_delay;
        }
        let secs = rand::rng()
            .random_range(self.min_delay.as_secs_f64()..=self.max_delay.as_secs_f64());
        Duration::from_secs_f64(secs).clamp(self.min_delay, self.max_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording(min: Duration, max: Duration) -> (PolitenessScheduler, Rc<RefCell<Vec<Duration>>>) {
        let slept = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&slept);
        let sched = PolitenessScheduler::with_sleeper(min, max, move |d| sink.borrow_mut().push(d));
        (sched, slept)
    }

    #[test]
    fn no_delay_without_fetch() {
        let (mut sched, slept) = recording(Duration::from_secs(1), Duration::from_secs(3));
        for _ in 0..10 {
            assert_eq!(sched.maybe_delay(false), None);
        }
        assert!(slept.borrow().is_empty());
    }

    #[test]
    fn delay_within_bounds_after_fetch() {
        let min = Duration::from_millis(1_000);
        let max = Duration::from_millis(3_000);
        let (mut sched, slept) = recording(min, max);
        for _ in 0..50 {
            let d = sched.maybe_delay(true).expect("fetch must pause");
            assert!(d >= min && d <= max, "{d:?}");
        }
        assert_eq!(slept.borrow().len(), 50);
        assert!(slept.borrow().iter().all(|d| *d >= min && *d <= max));
    }

    #[test]
    fn equal_bounds_are_exact() {
        let d = Duration::from_millis(1_500);
        let (mut sched, slept) = recording(d, d);
        assert_eq!(sched.maybe_delay(true), Some(d));
        assert_eq!(slept.borrow().as_slice(), &[d]);
    }

    #[test]
    fn zero_delay_does_not_sleep() {
        let (mut sched, slept) = recording(Duration::ZERO, Duration::ZERO);
        assert_eq!(sched.maybe_delay(true), Some(Duration::ZERO));
        assert!(slept.borrow().is_empty());
    }

    #[test]
    fn inverted_bounds_are_normalised() {
        let sched = PolitenessScheduler::new(Duration::from_secs(2), Duration::from_secs(1));
        assert_eq!(
            sched.bounds(),
            (Duration::from_secs(2), Duration::from_secs(2))
        );
    }
}
