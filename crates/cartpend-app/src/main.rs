//! cartpend: headless double-pendulum-on-a-cart runner.
//!
//! Steps a session at a fixed tick rate, feeding it scripted input and an
//! optional neural controller, and logs or records the trajectory.

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use cartpend::{Observer, PhysicalConfig, Session, TickOutcome, total_energy};
use cartpend_control::FeedForwardPolicy;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cartpend_app::input::DEFAULT_SCROLL_GAIN;
use cartpend_app::trail::DEFAULT_TRAIL_LENGTH;
use cartpend_app::{CsvRecorder, ScriptedInput, TimedEvent, Trail};

/// Double pendulum on a cart, simulated at a fixed tick rate
#[derive(Parser)]
#[command(name = "cartpend")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON file with physical parameters (missing fields use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Gravitational acceleration (m/s²)
    #[arg(long)]
    gravity: Option<f64>,

    /// Viscous drag on the cart (1/s)
    #[arg(long)]
    horizontal_damping: Option<f64>,

    /// Track half-width (m)
    #[arg(long)]
    edge: Option<f64>,

    /// Inner link length (m)
    #[arg(long)]
    l0: Option<f64>,

    /// Outer link length (m)
    #[arg(long)]
    l1: Option<f64>,

    /// Inner point mass (kg)
    #[arg(long)]
    m0: Option<f64>,

    /// Outer point mass (kg)
    #[arg(long)]
    m1: Option<f64>,

    /// Tick length (s)
    #[arg(long)]
    dt: Option<f64>,

    /// Number of ticks to run
    #[arg(short, long, default_value = "600")]
    ticks: u64,

    /// Policy weights (JSON) for the neural controller
    #[arg(short, long, conflicts_with = "random_policy")]
    policy: Option<PathBuf>,

    /// Use a randomly initialized controller with this seed
    #[arg(long)]
    random_policy: Option<u64>,

    /// Hidden layer widths for --random-policy
    #[arg(long, value_delimiter = ',', default_value = "6")]
    hidden: Vec<usize>,

    /// Scale from controller output to cart acceleration (m/s²)
    #[arg(long, default_value = "30")]
    gain: f64,

    /// Scripted input, repeatable: TICK=ACCEL, TICK=scroll:DX,DY, TICK=reset, TICK=toggle
    #[arg(short, long = "event")]
    events: Vec<TimedEvent>,

    /// Acceleration per scroll notch (m/s²)
    #[arg(long, default_value_t = DEFAULT_SCROLL_GAIN)]
    scroll_gain: f64,

    /// Number of outer-joint positions kept in the trail
    #[arg(long, default_value_t = DEFAULT_TRAIL_LENGTH)]
    trail_length: usize,

    /// Write the per-tick trajectory to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Pace ticks to wall-clock time
    #[arg(long)]
    realtime: bool,
}

impl Cli {
    /// Defaults, then the config file, then individual overrides.
    fn physical_config(&self) -> Result<PhysicalConfig> {
        let base = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("cannot read config {}", path.display()))?;
                PhysicalConfig::from_json(&json)
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => PhysicalConfig::default(),
        };

        let mut builder = base.to_builder();
        if let Some(g) = self.gravity {
            builder = builder.gravity(g);
        }
        if let Some(d) = self.horizontal_damping {
            builder = builder.horizontal_damping(d);
        }
        if let Some(e) = self.edge {
            builder = builder.edge(e);
        }
        if let Some(l) = self.l0 {
            builder = builder.l0(l);
        }
        if let Some(l) = self.l1 {
            builder = builder.l1(l);
        }
        if let Some(m) = self.m0 {
            builder = builder.m0(m);
        }
        if let Some(m) = self.m1 {
            builder = builder.m1(m);
        }
        if let Some(dt) = self.dt {
            builder = builder.dt(dt);
        }
        Ok(builder.build()?)
    }

    fn controller(&self) -> Result<Option<FeedForwardPolicy>> {
        if let Some(path) = &self.policy {
            let policy = FeedForwardPolicy::load(path)
                .with_context(|| format!("cannot load policy {}", path.display()))?;
            return Ok(Some(policy));
        }
        Ok(self.random_policy.map(|seed| {
            FeedForwardPolicy::random(&self.hidden, &mut StdRng::seed_from_u64(seed))
        }))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = cli.physical_config()?;
    info!(?config, "physical configuration");

    let mut session = Session::new(config).with_gain(cli.gain);
    if let Some(policy) = cli.controller()? {
        info!(layers = ?policy.layer_sizes(), gain = cli.gain, "controller attached");
        session = session.with_controller(Box::new(policy));
    }

    let script = ScriptedInput::new(cli.events.iter().copied());
    let mut trail = Trail::new(cli.trail_length);
    let mut recorder = cli
        .csv
        .as_deref()
        .map(|path| {
            CsvRecorder::create(path, config.dt())
                .with_context(|| format!("cannot create {}", path.display()))
        })
        .transpose()?;

    info!(ticks = cli.ticks, scripted = script.len(), "starting");
    let frame = Duration::from_secs_f64(config.dt());
    let mut divergences = 0u64;
    let mut widest_swing: f64 = 0.0;

    {
        let mut observers: Vec<&mut dyn Observer> = Vec::new();
        observers.push(&mut trail);
        if let Some(r) = recorder.as_mut() {
            observers.push(r);
        }

        let mut next_frame = Instant::now();
        for _ in 0..cli.ticks {
            for event in script.events_at(session.ticks()) {
                debug!(tick = session.ticks(), ?event, "input");
                event.dispatch(&mut session, cli.scroll_gain);
            }

            if session.tick(&mut observers) == TickOutcome::Diverged {
                divergences += 1;
            }
            widest_swing = widest_swing.max(session.state().cart_x.abs());

            if cli.realtime {
                next_frame += frame;
                if let Some(wait) = next_frame.checked_duration_since(Instant::now()) {
                    thread::sleep(wait);
                }
            }
        }
    }

    if let Some(recorder) = recorder {
        let rows = recorder.rows();
        recorder.finish().context("cannot finish trajectory log")?;
        info!(rows, "trajectory written");
    }

    let state = session.state();
    info!(
        ticks = session.ticks(),
        time = session.time(),
        divergences,
        widest_swing,
        "finished"
    );
    info!(
        theta0 = state.theta0,
        theta1 = state.theta1,
        cart_x = state.cart_x,
        cart_v = state.cart_v,
        energy = total_energy(state, &config),
        trail_points = trail.len(),
        "final state"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn overrides_layer_over_defaults() {
        let cli = Cli::try_parse_from(["cartpend", "--gravity", "1.62", "--edge", "2"]).unwrap();
        let config = cli.physical_config().unwrap();
        assert_eq!(config.gravity(), 1.62);
        assert_eq!(config.edge(), 2.0);
        assert_eq!(config.l0(), 0.5);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let cli = Cli::try_parse_from(["cartpend", "--dt", "0"]).unwrap();
        assert!(cli.physical_config().is_err());
    }

    #[test]
    fn parses_scripted_events_and_random_policy() {
        let cli = Cli::try_parse_from([
            "cartpend",
            "-e",
            "10=25",
            "--event",
            "40=scroll:0,-1",
            "--random-policy",
            "9",
            "--hidden",
            "4,4",
        ])
        .unwrap();
        assert_eq!(cli.events.len(), 2);
        let policy = cli.controller().unwrap().unwrap();
        assert_eq!(policy.layer_sizes(), vec![8, 4, 4, 1]);
    }
}
