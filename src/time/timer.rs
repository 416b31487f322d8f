//! Phased interval timer
//!
//! A small state machine for periodic events that live outside the fixed
//! simulation step. A timer moves `Idle -> Started -> (Waiting ->) Done`,
//! optionally looping back to `Started`. Each transition that matters to a
//! caller is returned from [`PhasedTimer::update`] as a [`TimerEvent`] and
//! stays readable through [`PhasedTimer::just`] until the next update.

use super::clock::Clock;

/// Shape of a timer cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    /// Started -> Done after `delay`
    Simple,
    /// Started -> Waiting after `delay`, Waiting -> Done after `restart_delay`
    TwoWay,
}

/// Immutable timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    pub mode: TimerMode,
    /// Restart at `Started` on the update after reaching `Done`
    pub looping: bool,
    /// Keep running while the clock is paused
    pub ignore_pause: bool,
}

impl TimerConfig {
    pub const fn simple() -> Self {
        Self {
            mode: TimerMode::Simple,
            looping: false,
            ignore_pause: false,
        }
    }

    pub const fn two_way() -> Self {
        Self {
            mode: TimerMode::TwoWay,
            looping: false,
            ignore_pause: false,
        }
    }

    pub const fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    pub const fn ignore_pause(mut self) -> Self {
        self.ignore_pause = true;
        self
    }
}

/// Where the timer is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Started,
    Waiting,
    Done,
}

/// A transition reported by [`PhasedTimer::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Started,
    Waited,
    Done,
}

#[derive(Debug, Clone)]
pub struct PhasedTimer {
    config: TimerConfig,
    delay_ms: f64,
    restart_delay_ms: f64,
    /// Scaled clock time of the last phase change
    stamp_ms: f64,
    phase: Phase,
    just: Option<TimerEvent>,
    completions: u32,
}

impl PhasedTimer {
    /// `restart_delay_ms` is only consulted in [`TimerMode::TwoWay`].
    pub fn new(config: TimerConfig, delay_ms: u32, restart_delay_ms: u32) -> Self {
        Self {
            config,
            delay_ms: delay_ms as f64,
            restart_delay_ms: restart_delay_ms as f64,
            stamp_ms: 0.0,
            phase: Phase::Idle,
            just: None,
            completions: 0,
        }
    }

    /// Jump to `phase` and restart the phase stopwatch.
    pub fn set(&mut self, phase: Phase, clock: &Clock) {
        self.phase = phase;
        self.stamp_ms = clock.now_ms();
    }

    /// Advance the state machine. Call once per frame, after `clock.update`.
    pub fn update(&mut self, clock: &Clock) -> Option<TimerEvent> {
        if clock.is_paused() && !self.config.ignore_pause {
            // Slide the stamp so paused time does not count toward the delay
            self.stamp_ms += clock.frame_delta_ms();
            return None;
        }

        let elapsed = clock.now_ms() - self.stamp_ms;

        let event = match self.phase {
            Phase::Idle => {
                self.set(Phase::Started, clock);
                Some(TimerEvent::Started)
            }
            Phase::Done if self.config.looping => {
                self.set(Phase::Started, clock);
                None
            }
            Phase::Started if elapsed >= self.delay_ms => match self.config.mode {
                TimerMode::TwoWay => {
                    self.set(Phase::Waiting, clock);
                    Some(TimerEvent::Waited)
                }
                TimerMode::Simple => {
                    self.set(Phase::Done, clock);
                    self.completions += 1;
                    Some(TimerEvent::Done)
                }
            },
            // Two-way cycles are not counted
            Phase::Waiting if elapsed >= self.restart_delay_ms => {
                self.set(Phase::Done, clock);
                Some(TimerEvent::Done)
            }
            _ => None,
        };

        self.just = event;
        event
    }

    /// Transition made by the latest update, if any
    #[inline]
    pub fn just(&self) -> Option<TimerEvent> {
        self.just
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of one-shot (`Simple`) runs that reached `Done`
    pub fn completions(&self) -> u32 {
        self.completions
    }

    /// Back to `Idle`; the next update starts a fresh cycle.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.just = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(timer: &mut PhasedTimer, clock: &mut Clock, now_ms: f64) -> Option<TimerEvent> {
        clock.update(now_ms);
        timer.update(clock)
    }

    #[test]
    fn test_two_way_looping_cycle() {
        let mut clock = Clock::default();
        let mut timer = PhasedTimer::new(TimerConfig::two_way().looping(), 2000, 2000);
        assert_eq!(timer.phase(), Phase::Idle);

        assert_eq!(tick(&mut timer, &mut clock, 0.0), Some(TimerEvent::Started));
        assert_eq!(timer.phase(), Phase::Started);
        assert_eq!(timer.just(), Some(TimerEvent::Started));

        // Just-flag clears on the following update
        assert_eq!(tick(&mut timer, &mut clock, 1000.0), None);
        assert_eq!(timer.just(), None);
        assert_eq!(timer.phase(), Phase::Started);

        assert_eq!(tick(&mut timer, &mut clock, 2000.0), Some(TimerEvent::Waited));
        assert_eq!(timer.phase(), Phase::Waiting);

        assert_eq!(tick(&mut timer, &mut clock, 3999.0), None);
        assert_eq!(timer.just(), None);

        assert_eq!(tick(&mut timer, &mut clock, 4000.0), Some(TimerEvent::Done));
        assert_eq!(timer.phase(), Phase::Done);
        assert_eq!(timer.completions(), 0);

        // Loop: restart immediately, without a Started event
        assert_eq!(tick(&mut timer, &mut clock, 4250.0), None);
        assert_eq!(timer.phase(), Phase::Started);
        assert_eq!(timer.just(), None);

        assert_eq!(tick(&mut timer, &mut clock, 6250.0), Some(TimerEvent::Waited));
        assert_eq!(tick(&mut timer, &mut clock, 8250.0), Some(TimerEvent::Done));
        assert_eq!(timer.completions(), 0);
    }

    #[test]
    fn test_simple_looping_counts_each_run() {
        let mut clock = Clock::default();
        let mut timer = PhasedTimer::new(TimerConfig::simple().looping(), 500, 0);

        assert_eq!(tick(&mut timer, &mut clock, 0.0), Some(TimerEvent::Started));
        assert_eq!(tick(&mut timer, &mut clock, 500.0), Some(TimerEvent::Done));
        assert_eq!(tick(&mut timer, &mut clock, 625.0), None);
        assert_eq!(timer.phase(), Phase::Started);
        assert_eq!(tick(&mut timer, &mut clock, 1125.0), Some(TimerEvent::Done));
        assert_eq!(timer.completions(), 2);
    }

    #[test]
    fn test_simple_one_shot() {
        let mut clock = Clock::default();
        let mut timer = PhasedTimer::new(TimerConfig::simple(), 500, 0);

        assert_eq!(tick(&mut timer, &mut clock, 0.0), Some(TimerEvent::Started));
        assert_eq!(tick(&mut timer, &mut clock, 499.0), None);
        assert_eq!(tick(&mut timer, &mut clock, 500.0), Some(TimerEvent::Done));
        assert_eq!(timer.completions(), 1);

        // Not looping: stays done
        assert_eq!(tick(&mut timer, &mut clock, 5000.0), None);
        assert_eq!(timer.phase(), Phase::Done);
        assert_eq!(timer.completions(), 1);
    }

    #[test]
    fn test_pause_freezes_timer() {
        let mut clock = Clock::default();
        let mut timer = PhasedTimer::new(TimerConfig::simple(), 500, 0);
        tick(&mut timer, &mut clock, 0.0);

        clock.set_paused(true);
        for i in 1..=8 {
            assert_eq!(tick(&mut timer, &mut clock, i as f64 * 125.0), None);
        }
        assert_eq!(timer.phase(), Phase::Started);

        // 1000 ms of wall time passed, but only the unpaused time counts
        clock.set_paused(false);
        assert_eq!(tick(&mut timer, &mut clock, 1400.0), None);
        assert_eq!(tick(&mut timer, &mut clock, 1500.0), Some(TimerEvent::Done));
    }

    #[test]
    fn test_ignore_pause_keeps_running() {
        let mut clock = Clock::default();
        let mut timer = PhasedTimer::new(TimerConfig::simple().ignore_pause(), 500, 0);
        tick(&mut timer, &mut clock, 0.0);

        clock.set_paused(true);
        assert_eq!(tick(&mut timer, &mut clock, 250.0), None);
        assert_eq!(tick(&mut timer, &mut clock, 500.0), Some(TimerEvent::Done));
    }

    #[test]
    fn test_reset_restarts_cycle() {
        let mut clock = Clock::default();
        let mut timer = PhasedTimer::new(TimerConfig::simple(), 100, 0);
        tick(&mut timer, &mut clock, 0.0);
        tick(&mut timer, &mut clock, 125.0);
        assert_eq!(timer.phase(), Phase::Done);

        timer.reset();
        assert_eq!(tick(&mut timer, &mut clock, 250.0), Some(TimerEvent::Started));
    }
}
