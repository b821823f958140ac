use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, trace};

pub const DEFAULT_PERIOD: Duration = Duration::from_millis(100);
pub const DEFAULT_STEP_DEGREES: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Running,
}

/// Drives the scene angle.
///
/// The clock owns its timer: while running, [`AngleClock::tick`] resolves once
/// per period and applies one increment; while stopped it never resolves.
/// Stopping drops the timer, so no tick can fire afterwards. The angle is
/// never wrapped.
pub struct AngleClock {
    angle: f32,
    step: f32,
    period: Duration,
    timer: Option<Interval>,
}

impl AngleClock {
    pub fn new(initial_angle: f32, step: f32, period: Duration) -> Self {
        Self {
            angle: initial_angle,
            step,
            period,
            timer: None,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn state(&self) -> ClockState {
        if self.timer.is_some() {
            ClockState::Running
        } else {
            ClockState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == ClockState::Running
    }

    /// Start ticking. The first tick fires one full period from now.
    /// Starting a running clock keeps the existing timer.
    pub fn start(&mut self) {
        if self.timer.is_some() {
            return;
        }
        let mut timer = interval_at(Instant::now() + self.period, self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
        debug!(angle = self.angle, period_ms = self.period.as_millis() as u64, "clock started");
    }

    /// Stop ticking. Idempotent.
    pub fn stop(&mut self) {
        if self.timer.take().is_some() {
            debug!(angle = self.angle, "clock stopped");
        }
    }

    /// Apply one increment and return the new angle.
    pub fn advance(&mut self) -> f32 {
        self.angle += self.step;
        trace!(angle = self.angle, "tick");
        self.angle
    }

    /// Wait for the next tick, apply it, and return the new angle.
    ///
    /// Pending forever while stopped. Cancel safe: the increment is applied
    /// only after the timer has fired, with no await in between.
    pub async fn tick(&mut self) -> f32 {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
                self.advance()
            }
            None => std::future::pending().await,
        }
    }
}

impl Default for AngleClock {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_STEP_DEGREES, DEFAULT_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, timeout};

    #[test]
    fn test_advance_is_exact() {
        let mut clock = AngleClock::new(10.0, 5.0, DEFAULT_PERIOD);
        for _ in 0..10_000 {
            clock.advance();
        }
        assert_eq!(clock.angle(), 10.0 + 10_000.0 * 5.0);
    }

    #[test]
    fn test_initial_state_is_stopped() {
        let clock = AngleClock::default();
        assert_eq!(clock.state(), ClockState::Stopped);
        assert_eq!(clock.angle(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_period() {
        let mut clock = AngleClock::new(0.0, 5.0, Duration::from_millis(100));
        clock.start();
        assert_eq!(clock.state(), ClockState::Running);

        for n in 1..=20 {
            let angle = clock.tick().await;
            assert_eq!(angle, n as f32 * 5.0);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_waits_one_period() {
        let mut clock = AngleClock::new(0.0, 5.0, Duration::from_millis(100));
        clock.start();
        let early = timeout(Duration::from_millis(50), clock.tick()).await;
        assert!(early.is_err());
        assert_eq!(clock.angle(), 0.0);
        clock.tick().await;
        assert_eq!(clock.angle(), 5.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_clock_never_ticks() {
        let mut clock = AngleClock::new(0.0, 5.0, Duration::from_millis(100));
        clock.start();
        clock.tick().await;
        clock.stop();
        clock.stop();
        assert_eq!(clock.state(), ClockState::Stopped);

        advance(Duration::from_secs(10)).await;
        let result = timeout(Duration::from_secs(5), clock.tick()).await;
        assert!(result.is_err());
        assert_eq!(clock.angle(), 5.0);

        clock.start();
        assert_eq!(clock.tick().await, 10.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_while_running_keeps_single_timer() {
        let mut clock = AngleClock::new(0.0, 5.0, Duration::from_millis(100));
        clock.start();
        advance(Duration::from_millis(60)).await;
        clock.start();

        // Still on the original schedule: fires 40ms later, once.
        let angle = timeout(Duration::from_millis(41), clock.tick()).await;
        assert_eq!(angle.ok(), Some(5.0));
        let early = timeout(Duration::from_millis(50), clock.tick()).await;
        assert!(early.is_err());
        assert_eq!(clock.angle(), 5.0);
    }
}
