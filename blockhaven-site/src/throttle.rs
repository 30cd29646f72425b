//! Leading-edge call-rate limiting.
//!
//! The first call in a window runs immediately and opens the window; every
//! further call until the window closes is dropped, never queued.

/// Window bookkeeping for a throttled callback, driven by explicit timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct Throttle {
    interval_ms: f64,
    window_start: Option<f64>,
}

impl Throttle {
    #[must_use]
    pub const fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            window_start: None,
        }
    }

    /// Returns `true` if a call at `now_ms` may run, opening a new window.
    pub fn admit(&mut self, now_ms: f64) -> bool {
        match self.window_start {
            Some(start) if now_ms - start < self.interval_ms => false,
            _ => {
                self.window_start = Some(now_ms);
                true
            }
        }
    }

    #[must_use]
    pub const fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}

/// A callback wrapped with a [`Throttle`] and a clock.
pub struct Throttled<F, C> {
    inner: F,
    clock: C,
    gate: Throttle,
}

impl<F, C> Throttled<F, C>
where
    C: FnMut() -> f64,
{
    /// Invoke the callback if the current window allows it.
    /// Returns the callback's result, or `None` when the call was dropped.
    pub fn call<A, R>(&mut self, arg: A) -> Option<R>
    where
        F: FnMut(A) -> R,
    {
        let now = (self.clock)();
        self.gate.admit(now).then(|| (self.inner)(arg))
    }
}

/// Wrap `inner` so it runs at most once per `interval_ms`, measured by `clock`.
pub fn throttle<F, C>(inner: F, interval_ms: f64, clock: C) -> Throttled<F, C>
where
    C: FnMut() -> f64,
{
    Throttled {
        inner,
        clock,
        gate: Throttle::new(interval_ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn hundred_calls_in_one_window_run_once() {
        let calls = Rc::new(Cell::new(0_u32));
        let counter = Rc::clone(&calls);
        let mut wrapped = throttle(move |()| counter.set(counter.get() + 1), 16.0, || 1_000.0);
        for _ in 0..100 {
            wrapped.call(());
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn next_window_admits_again_and_trailing_calls_are_dropped() {
        let mut gate = Throttle::new(16.0);
        assert!(gate.admit(0.0));
        assert!(!gate.admit(8.0));
        assert!(!gate.admit(15.9));
        assert!(gate.admit(16.0));
        assert!(!gate.admit(20.0));
        assert!(gate.admit(40.0));
    }

    #[test]
    fn dropped_calls_return_none() {
        let now = Rc::new(Cell::new(0.0_f64));
        let clock_now = Rc::clone(&now);
        let mut wrapped = throttle(|x: u32| x * 2, 16.0, move || clock_now.get());
        assert_eq!(wrapped.call(2), Some(4));
        now.set(5.0);
        assert_eq!(wrapped.call(3), None);
        now.set(17.0);
        assert_eq!(wrapped.call(4), Some(8));
    }
}
