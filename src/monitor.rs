//! Presence detection state machine.
//!
//! Provides [`PresenceMonitor`] which wires a PIR-style motion predicate and
//! a network-link predicate to a status blinker and a presence publisher.
//! The machine is a flat tagged enum driven from the same cooperative loop
//! as the blinker; all collaborators are injected at construction so several
//! monitors can coexist and the machine is testable without hardware.

use crate::blinker::{BlinkSink, IntervalBlinker};
use crate::pattern::{CALIBRATION_BLINK, LINK_UP_BLINK};

/// Trait for abstracting the presence reporting channel.
///
/// Implement this for your messaging link (MQTT, HTTP, a queue to a network
/// task). Invoked synchronously on presence edges; must not block. Delivery
/// failures are the implementor's concern - this method cannot fail.
pub trait PresencePublisher {
    /// Reports a presence transition: `true` when presence is first
    /// detected, `false` when the alarm hold releases.
    fn publish_presence(&mut self, presence: bool);
}

/// The current state of a presence monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MonitorState {
    /// Sensor warm-up. Motion readings are ignored; the status LED blinks
    /// fast.
    Calibrating,
    /// Watching for motion. With the link up, the status LED gives a short
    /// flash every few seconds; with it down, the LED stays dark.
    Scanning {
        /// Whether the network link was up on the last tick.
        link_up: bool,
    },
    /// Motion detected. The status LED is held solid ON until no motion has
    /// been seen for the configured hold time.
    Alarmed,
}

/// Boolean predicates sampled by the driving loop each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorInputs {
    /// Motion sensor output (e.g. a PIR pin reading HIGH).
    pub motion: bool,
    /// Network link status (e.g. WiFi association + address acquired).
    pub link_up: bool,
}

/// Timing configuration for a presence monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    /// How long the sensor warms up before readings are trusted.
    pub calibration_millis: u32,
    /// How long the alarm holds after the last motion reading.
    pub alarm_hold_millis: u32,
}

impl Default for MonitorConfig {
    /// One minute of calibration (per the HC-SR501 datasheet) and one
    /// minute of alarm hold.
    fn default() -> Self {
        Self {
            calibration_millis: 60_000,
            alarm_hold_millis: 60_000,
        }
    }
}

/// Detects human presence and signals it through a blinker and a publisher.
///
/// Owns an [`IntervalBlinker`] for status signalling and a
/// [`PresencePublisher`] for reporting presence edges. The driving loop
/// samples its sensor and network pins, then calls
/// [`tick`](Self::tick) with the elapsed time and the sampled
/// [`MonitorInputs`]; everything else - blink pattern selection, alarm hold
/// timing, publish edges - happens inside.
///
/// # Type Parameters
/// * `'a` - Lifetime of the borrowed interval tables
/// * `S` - Output device implementation type
/// * `P` - Presence publisher implementation type
pub struct PresenceMonitor<'a, S: BlinkSink, P: PresencePublisher> {
    blinker: IntervalBlinker<'a, S>,
    publisher: P,
    config: MonitorConfig,
    state: MonitorState,
    uptime_millis: u64,
    alarm_deadline_millis: u64,
}

impl<'a, S: BlinkSink, P: PresencePublisher> PresenceMonitor<'a, S, P> {
    /// Creates a monitor in the `Calibrating` state with its status blinker
    /// already running the calibration pattern.
    pub fn new(sink: S, publisher: P, config: MonitorConfig) -> Self {
        let mut monitor = Self {
            blinker: IntervalBlinker::new(sink),
            publisher,
            config,
            state: MonitorState::Calibrating,
            uptime_millis: 0,
            alarm_deadline_millis: 0,
        };

        monitor.apply_entry_effects(MonitorState::Calibrating);
        monitor
    }

    /// Advances the monitor by the given elapsed time with freshly sampled
    /// inputs.
    ///
    /// Ticks the owned blinker first, then evaluates state transitions.
    /// Uptime accumulates in 64 bits, so the hold arithmetic never wraps.
    pub fn tick(&mut self, elapsed_millis: u32, inputs: MonitorInputs) {
        self.uptime_millis += u64::from(elapsed_millis);
        self.blinker.tick_update(elapsed_millis);

        let next = match self.state {
            MonitorState::Calibrating => {
                if self.uptime_millis >= u64::from(self.config.calibration_millis) {
                    Some(MonitorState::Scanning { link_up: false })
                } else {
                    None
                }
            }
            MonitorState::Scanning { link_up } => {
                if inputs.motion {
                    Some(MonitorState::Alarmed)
                } else if inputs.link_up != link_up {
                    Some(MonitorState::Scanning {
                        link_up: inputs.link_up,
                    })
                } else {
                    None
                }
            }
            MonitorState::Alarmed => {
                if inputs.motion {
                    // motion keeps re-arming the hold timer
                    self.alarm_deadline_millis =
                        self.uptime_millis + u64::from(self.config.alarm_hold_millis);
                    None
                } else if self.uptime_millis >= self.alarm_deadline_millis {
                    Some(MonitorState::Scanning { link_up: false })
                } else {
                    None
                }
            }
        };

        if let Some(next) = next {
            self.transition(next);
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Returns total accumulated uptime in milliseconds.
    pub fn uptime_millis(&self) -> u64 {
        self.uptime_millis
    }

    /// Returns a mutable reference to the owned blinker.
    pub fn blinker_mut(&mut self) -> &mut IntervalBlinker<'a, S> {
        &mut self.blinker
    }

    /// Returns a mutable reference to the owned publisher.
    pub fn publisher_mut(&mut self) -> &mut P {
        &mut self.publisher
    }

    fn transition(&mut self, to: MonitorState) {
        let from = self.state;
        self.state = to;

        if to == MonitorState::Alarmed {
            self.alarm_deadline_millis =
                self.uptime_millis + u64::from(self.config.alarm_hold_millis);
        }

        self.apply_entry_effects(to);

        // Presence edges drive the device solid and go out on the wire.
        if from == MonitorState::Alarmed || to == MonitorState::Alarmed {
            let alarm_on = to == MonitorState::Alarmed;
            if let Some(sink) = self.blinker.sink_mut() {
                sink.set_active(alarm_on);
            }
            self.publisher.publish_presence(alarm_on);
        }
    }

    fn apply_entry_effects(&mut self, to: MonitorState) {
        match to {
            MonitorState::Calibrating => {
                // shipped tables are non-empty, so installing them cannot fail
                let _ = self.blinker.set_intervals(&CALIBRATION_BLINK);
                let _ = self.blinker.start_endless();
            }
            MonitorState::Scanning { link_up: true } => {
                let _ = self.blinker.set_intervals(&LINK_UP_BLINK);
                let _ = self.blinker.start_endless();
            }
            MonitorState::Scanning { link_up: false } | MonitorState::Alarmed => {
                self.blinker.stop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    struct MockSink {
        events: Vec<bool, 64>,
    }

    impl MockSink {
        fn new() -> Self {
            Self { events: Vec::new() }
        }
    }

    impl BlinkSink for MockSink {
        fn set_active(&mut self, on: bool) {
            let _ = self.events.push(on);
        }
    }

    struct MockPublisher {
        published: Vec<bool, 16>,
    }

    impl MockPublisher {
        fn new() -> Self {
            Self {
                published: Vec::new(),
            }
        }
    }

    impl PresencePublisher for MockPublisher {
        fn publish_presence(&mut self, presence: bool) {
            let _ = self.published.push(presence);
        }
    }

    const QUIET: MonitorInputs = MonitorInputs {
        motion: false,
        link_up: false,
    };
    const MOTION: MonitorInputs = MonitorInputs {
        motion: true,
        link_up: false,
    };
    const LINKED: MonitorInputs = MonitorInputs {
        motion: false,
        link_up: true,
    };

    fn test_config() -> MonitorConfig {
        MonitorConfig {
            calibration_millis: 1000,
            alarm_hold_millis: 2000,
        }
    }

    fn test_monitor() -> PresenceMonitor<'static, MockSink, MockPublisher> {
        PresenceMonitor::new(MockSink::new(), MockPublisher::new(), test_config())
    }

    fn last_sink_event(monitor: &mut PresenceMonitor<'static, MockSink, MockPublisher>) -> bool {
        *monitor
            .blinker_mut()
            .sink_mut()
            .unwrap()
            .events
            .last()
            .unwrap()
    }

    #[test]
    fn starts_calibrating_with_the_fast_blink() {
        let mut monitor = test_monitor();

        assert_eq!(monitor.state(), MonitorState::Calibrating);
        assert_eq!(monitor.blinker_mut().intervals(), &[125, 125]);
        assert!(monitor.blinker_mut().is_running());
        // the calibration pattern's first ON phase is announced at once
        assert!(last_sink_event(&mut monitor));
    }

    #[test]
    fn motion_during_calibration_is_ignored() {
        let mut monitor = test_monitor();

        monitor.tick(500, MOTION);
        assert_eq!(monitor.state(), MonitorState::Calibrating);
        assert!(monitor.publisher_mut().published.is_empty());
    }

    #[test]
    fn calibration_timeout_moves_to_scanning_with_blinker_stopped() {
        let mut monitor = test_monitor();

        monitor.tick(999, QUIET);
        assert_eq!(monitor.state(), MonitorState::Calibrating);

        monitor.tick(1, QUIET);
        assert_eq!(monitor.state(), MonitorState::Scanning { link_up: false });
        assert!(!monitor.blinker_mut().is_running());
        assert!(monitor.publisher_mut().published.is_empty());
    }

    #[test]
    fn link_edges_toggle_the_scanning_pattern() {
        let mut monitor = test_monitor();
        monitor.tick(1000, QUIET);

        monitor.tick(10, LINKED);
        assert_eq!(monitor.state(), MonitorState::Scanning { link_up: true });
        assert_eq!(monitor.blinker_mut().intervals(), &[10, 3000]);
        assert!(monitor.blinker_mut().is_running());

        monitor.tick(10, QUIET);
        assert_eq!(monitor.state(), MonitorState::Scanning { link_up: false });
        assert!(!monitor.blinker_mut().is_running());
    }

    #[test]
    fn motion_while_scanning_raises_the_alarm() {
        let mut monitor = test_monitor();
        monitor.tick(1000, QUIET);

        monitor.tick(10, MOTION);
        assert_eq!(monitor.state(), MonitorState::Alarmed);
        assert!(!monitor.blinker_mut().is_running());
        // LED held solid ON, presence edge published
        assert!(last_sink_event(&mut monitor));
        assert_eq!(&monitor.publisher_mut().published[..], &[true]);
    }

    #[test]
    fn alarm_releases_after_the_hold_time() {
        let mut monitor = test_monitor();
        monitor.tick(1000, QUIET);
        monitor.tick(10, MOTION);

        // quiet, but the hold has not elapsed yet
        monitor.tick(1999, QUIET);
        assert_eq!(monitor.state(), MonitorState::Alarmed);

        monitor.tick(1, QUIET);
        assert_eq!(monitor.state(), MonitorState::Scanning { link_up: false });
        assert!(!last_sink_event(&mut monitor));
        assert_eq!(&monitor.publisher_mut().published[..], &[true, false]);
    }

    #[test]
    fn motion_re_arms_the_alarm_hold() {
        let mut monitor = test_monitor();
        monitor.tick(1000, QUIET);
        monitor.tick(10, MOTION);

        // fresh motion at t+1500 pushes the deadline out
        monitor.tick(1500, MOTION);
        monitor.tick(1500, QUIET);
        assert_eq!(monitor.state(), MonitorState::Alarmed);

        monitor.tick(500, QUIET);
        assert_eq!(monitor.state(), MonitorState::Scanning { link_up: false });
        assert_eq!(&monitor.publisher_mut().published[..], &[true, false]);
    }

    #[test]
    fn full_cycle_publishes_one_edge_pair_per_visit() {
        let mut monitor = test_monitor();
        monitor.tick(1000, QUIET);

        monitor.tick(10, MOTION);
        monitor.tick(2000, QUIET);
        monitor.tick(10, MOTION);
        monitor.tick(2000, QUIET);

        assert_eq!(
            &monitor.publisher_mut().published[..],
            &[true, false, true, false]
        );
    }

    #[test]
    fn uptime_accumulates_across_ticks() {
        let mut monitor = test_monitor();
        monitor.tick(700, QUIET);
        monitor.tick(400, QUIET);
        assert_eq!(monitor.uptime_millis(), 1100);
    }
}
