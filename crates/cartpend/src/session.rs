//! Fixed-tick driving loop around a single owned state.
//!
//! Per tick, in order:
//! 1. Drain queued commands, applying each immediately
//! 2. Show the pre-integration observation to every observer
//! 3. Run the controller (if enabled) on that same observation and apply its command
//! 4. Advance one tick
//! 5. Reset if the new state is non-finite

use cartpend_dynamics::gate_command;
use cartpend_model::{PhysicalConfig, SimulationState};
use tracing::{debug, info, warn};

use crate::{Command, CommandQueue, Features, Observation, Simulator, observe, reset};

/// Default scale from controller output to cart acceleration (m/s²).
pub const DEFAULT_CONTROLLER_GAIN: f64 = 30.0;

/// Decision-making collaborator that pushes the cart.
pub trait Controller {
    /// Map the feature vector to a command, nominally in `[-1, 1]`.
    fn act(&mut self, features: &Features) -> f64;
}

/// Read-only collaborator shown every tick's pre-integration snapshot.
pub trait Observer {
    fn observe(&mut self, tick: u64, observation: &Observation);
}

/// What happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced,
    /// The state went non-finite and was reset.
    Diverged,
}

/// Sole owner and writer of a `SimulationState`.
pub struct Session {
    config: PhysicalConfig,
    state: SimulationState,
    simulator: Simulator,
    commands: CommandQueue,
    controller: Option<Box<dyn Controller>>,
    controller_enabled: bool,
    gain: f64,
    ticks: u64,
}

impl Session {
    /// Start at rest with the RK4 simulator and no controller.
    pub fn new(config: PhysicalConfig) -> Self {
        Self {
            config,
            state: reset(),
            simulator: Simulator::new(),
            commands: CommandQueue::new(),
            controller: None,
            controller_enabled: false,
            gain: DEFAULT_CONTROLLER_GAIN,
            ticks: 0,
        }
    }

    /// Attach an enabled controller.
    pub fn with_controller(mut self, controller: Box<dyn Controller>) -> Self {
        self.controller = Some(controller);
        self.controller_enabled = true;
        self
    }

    /// Scale applied to controller output.
    pub fn with_gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self
    }

    pub fn with_simulator(mut self, simulator: Simulator) -> Self {
        self.simulator = simulator;
        self
    }

    /// Start from a given state instead of rest.
    pub fn with_state(mut self, state: SimulationState) -> Self {
        self.state = state;
        self
    }

    pub fn config(&self) -> &PhysicalConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Snapshot of the current state.
    pub fn observation(&self) -> Observation {
        observe(&self.state, &self.config)
    }

    /// Ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated time (s).
    pub fn time(&self) -> f64 {
        self.ticks as f64 * self.config.dt()
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Queue a command for the next tick.
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn has_controller(&self) -> bool {
        self.controller.is_some()
    }

    pub fn controller_enabled(&self) -> bool {
        self.controller_enabled && self.controller.is_some()
    }

    pub fn set_controller_enabled(&mut self, enabled: bool) {
        if self.controller_enabled != enabled {
            info!(enabled, "controller toggled");
        }
        self.controller_enabled = enabled;
    }

    pub fn toggle_controller(&mut self) {
        self.set_controller_enabled(!self.controller_enabled);
    }

    /// Run one full tick.
    pub fn tick(&mut self, observers: &mut [&mut dyn Observer]) -> TickOutcome {
        let pending: Vec<Command> = self.commands.drain().collect();
        for command in pending {
            match command {
                Command::Accelerate(a) => self.accelerate(a),
                Command::Reset => self.reset(),
            }
        }

        let observation = self.observation();
        for observer in observers.iter_mut() {
            observer.observe(self.ticks, &observation);
        }

        if self.controller_enabled {
            if let Some(controller) = self.controller.as_mut() {
                let output = controller.act(&observation.features());
                let command = output * self.gain;
                self.accelerate(command);
            }
        }

        self.state = self.simulator.step(&self.config, &self.state);
        self.ticks += 1;

        if self.state.is_finite() {
            TickOutcome::Advanced
        } else {
            warn!(tick = self.ticks, state = ?self.state, "simulation diverged, resetting");
            self.reset();
            TickOutcome::Diverged
        }
    }

    /// Run `n` ticks without observers.
    pub fn run(&mut self, n: u64) -> u64 {
        (0..n)
            .filter(|_| self.tick(&mut []) == TickOutcome::Diverged)
            .count() as u64
    }

    fn accelerate(&mut self, command: f64) {
        if command != 0.0 && gate_command(command, &self.state, &self.config) == 0.0 {
            debug!(command, cart_x = self.state.cart_x, "command blocked at track edge");
        }
        self.state = crate::apply_acceleration(command, &self.state, &self.config);
    }

    fn reset(&mut self) {
        debug!(tick = self.ticks, "state reset");
        self.state = reset();
    }
}
