use std::time::{Duration, Instant};

/// Fixed-cadence repaint timer. The tick keeps firing whether or not
/// anything was drawn; the caller decides per tick from its dirty flag.
#[derive(Debug, Clone)]
pub struct RedrawScheduler {
    interval: Duration,
    next_tick: Instant,
}

impl RedrawScheduler {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_tick: now + interval,
        }
    }

    /// Deadline to hand to `ControlFlow::WaitUntil`.
    pub fn deadline(&self) -> Instant {
        self.next_tick
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_tick
    }

    /// Moves to the following tick. After a stall the next tick is one
    /// interval from `now` instead of a burst of overdue ticks.
    pub fn advance(&mut self, now: Instant) {
        self.next_tick += self.interval;
        if self.next_tick <= now {
            self.next_tick = now + self.interval;
        }
    }

    /// Runs `paint` if a tick is due and `dirty` is set, then schedules the
    /// next tick. Returns whether `paint` ran.
    pub fn tick<F: FnOnce()>(&mut self, now: Instant, dirty: bool, paint: F) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.advance(now);
        if dirty {
            paint();
        }
        dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS16: Duration = Duration::from_millis(16);

    #[test]
    fn test_first_tick_one_interval_out() {
        let start = Instant::now();
        let scheduler = RedrawScheduler::new(MS16, start);
        assert_eq!(scheduler.deadline(), start + MS16);
        assert!(!scheduler.is_due(start));
        assert!(scheduler.is_due(start + MS16));
    }

    #[test]
    fn test_advance_keeps_cadence() {
        let start = Instant::now();
        let mut scheduler = RedrawScheduler::new(MS16, start);
        scheduler.advance(start + Duration::from_millis(17));
        assert_eq!(scheduler.deadline(), start + MS16 * 2);
    }

    #[test]
    fn test_advance_after_stall_does_not_burst() {
        let start = Instant::now();
        let mut scheduler = RedrawScheduler::new(MS16, start);
        let late = start + Duration::from_millis(500);
        scheduler.advance(late);
        assert_eq!(scheduler.deadline(), late + MS16);
    }

    #[test]
    fn test_tick_paints_only_when_due_and_dirty() {
        let start = Instant::now();
        let mut scheduler = RedrawScheduler::new(MS16, start);
        let mut painted = 0;

        assert!(!scheduler.tick(start, true, || painted += 1));
        assert_eq!(painted, 0);

        let t1 = start + MS16;
        assert!(!scheduler.tick(t1, false, || painted += 1));
        assert_eq!(painted, 0);
        // The clean tick still moved the schedule forward.
        assert_eq!(scheduler.deadline(), start + MS16 * 2);

        assert!(scheduler.tick(start + MS16 * 2, true, || painted += 1));
        assert_eq!(painted, 1);
    }
}
