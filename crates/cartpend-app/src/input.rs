//! User input: scroll mapping and scripted events for headless runs.

use std::collections::BTreeMap;
use std::str::FromStr;

use cartpend::{Command, Session};

/// Scroll-to-acceleration gain of the manual window (m/s² per notch).
pub const DEFAULT_SCROLL_GAIN: f64 = 10.0;

/// Horizontal acceleration for a scroll of `(dx, dy)` notches.
///
/// A horizontal scroll wins when present (reversed, so scrolling right
/// pushes left); otherwise the vertical scroll is used.
pub fn scroll_acceleration(dx: i32, dy: i32, gain: f64) -> f64 {
    let notches = if dx != 0 { -dx } else { dy };
    f64::from(notches) * gain
}

/// Something a user can do between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Direct acceleration request (m/s²).
    Push(f64),
    Scroll { dx: i32, dy: i32 },
    Reset,
    ToggleController,
}

impl InputEvent {
    /// Route the event into the session.
    pub fn dispatch(self, session: &mut Session, scroll_gain: f64) {
        match self {
            Self::Push(a) => session.push(Command::Accelerate(a)),
            Self::Scroll { dx, dy } => {
                session.push(Command::Accelerate(scroll_acceleration(dx, dy, scroll_gain)))
            }
            Self::Reset => session.push(Command::Reset),
            Self::ToggleController => session.toggle_controller(),
        }
    }
}

/// An event scheduled for a given tick, parsed from `TICK=EVENT`.
///
/// `EVENT` is an acceleration (`120=15`), a scroll (`120=scroll:0,-2`),
/// `reset` or `toggle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedEvent {
    pub tick: u64,
    pub event: InputEvent,
}

impl FromStr for TimedEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tick, event) = s
            .split_once('=')
            .ok_or_else(|| format!("expected TICK=EVENT, got '{s}'"))?;
        let tick = tick
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("bad tick '{tick}': {e}"))?;
        let event = event.trim();

        let event = match event {
            "reset" => InputEvent::Reset,
            "toggle" => InputEvent::ToggleController,
            _ => {
                if let Some(rest) = event.strip_prefix("scroll:") {
                    let (dx, dy) = rest
                        .split_once(',')
                        .ok_or_else(|| format!("expected scroll:DX,DY, got '{event}'"))?;
                    let dx = dx.trim().parse().map_err(|e| format!("bad dx '{dx}': {e}"))?;
                    let dy = dy.trim().parse().map_err(|e| format!("bad dy '{dy}': {e}"))?;
                    InputEvent::Scroll { dx, dy }
                } else {
                    let a: f64 = event
                        .parse()
                        .map_err(|e| format!("bad acceleration '{event}': {e}"))?;
                    InputEvent::Push(a)
                }
            }
        };

        Ok(Self { tick, event })
    }
}

/// Events keyed by the tick they fire on, in the order they were given.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: BTreeMap<u64, Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new(timed: impl IntoIterator<Item = TimedEvent>) -> Self {
        let mut events: BTreeMap<u64, Vec<InputEvent>> = BTreeMap::new();
        for t in timed {
            events.entry(t.tick).or_default().push(t.event);
        }
        Self { events }
    }

    pub fn events_at(&self, tick: u64) -> &[InputEvent] {
        self.events.get(&tick).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartpend::{PhysicalConfig, SimulationState};

    #[test]
    fn horizontal_scroll_wins_and_is_reversed() {
        assert_eq!(scroll_acceleration(0, 2, 10.0), 20.0);
        assert_eq!(scroll_acceleration(1, 2, 10.0), -10.0);
        assert_eq!(scroll_acceleration(-3, 0, 5.0), 15.0);
        assert_eq!(scroll_acceleration(0, 0, 10.0), 0.0);
    }

    #[test]
    fn parses_every_event_form() {
        assert_eq!(
            "12=4.5".parse::<TimedEvent>().unwrap(),
            TimedEvent {
                tick: 12,
                event: InputEvent::Push(4.5)
            }
        );
        assert_eq!(
            "0=scroll:-1,3".parse::<TimedEvent>().unwrap().event,
            InputEvent::Scroll { dx: -1, dy: 3 }
        );
        assert_eq!("7=reset".parse::<TimedEvent>().unwrap().event, InputEvent::Reset);
        assert_eq!(
            "7=toggle".parse::<TimedEvent>().unwrap().event,
            InputEvent::ToggleController
        );
    }

    #[test]
    fn rejects_malformed_events() {
        assert!("12".parse::<TimedEvent>().is_err());
        assert!("x=1".parse::<TimedEvent>().is_err());
        assert!("1=fast".parse::<TimedEvent>().is_err());
        assert!("1=scroll:1".parse::<TimedEvent>().is_err());
    }

    #[test]
    fn groups_events_by_tick_in_order() {
        let script = ScriptedInput::new([
            TimedEvent {
                tick: 5,
                event: InputEvent::Push(1.0),
            },
            TimedEvent {
                tick: 2,
                event: InputEvent::Reset,
            },
            TimedEvent {
                tick: 5,
                event: InputEvent::Push(-1.0),
            },
        ]);
        assert_eq!(script.len(), 3);
        assert_eq!(
            script.events_at(5),
            &[InputEvent::Push(1.0), InputEvent::Push(-1.0)]
        );
        assert!(script.events_at(3).is_empty());
    }

    #[test]
    fn scroll_dispatch_queues_scaled_acceleration() {
        let config = PhysicalConfig::default();
        let mut session = Session::new(config);
        InputEvent::Scroll { dx: 0, dy: 1 }.dispatch(&mut session, 10.0);
        assert_eq!(session.pending_commands(), 1);
        session.tick(&mut []);
        let expected = cartpend::step(
            &cartpend::apply_acceleration(10.0, &SimulationState::at_rest(), &config),
            &config,
        );
        assert_eq!(*session.state(), expected);
    }
}
