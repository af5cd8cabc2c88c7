//! Per-tick trajectory log written as CSV.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use cartpend::{Observation, Observer};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize)]
struct Row {
    tick: u64,
    time: f64,
    theta0: f64,
    omega0: f64,
    theta1: f64,
    omega1: f64,
    cart_x: f64,
    cart_v: f64,
    p0_x: f64,
    p0_y: f64,
    p1_x: f64,
    p1_y: f64,
}

/// Observer that appends one CSV row per tick.
///
/// Observers cannot fail, so the first write error is kept and reported by
/// [`finish`](Self::finish); later rows are dropped.
pub struct CsvRecorder<W: Write> {
    writer: csv::Writer<W>,
    dt: f64,
    rows: usize,
    error: Option<csv::Error>,
}

impl CsvRecorder<File> {
    pub fn create(path: &Path, dt: f64) -> csv::Result<Self> {
        Ok(Self::from_writer(File::create(path)?, dt))
    }
}

impl<W: Write> CsvRecorder<W> {
    pub fn from_writer(writer: W, dt: f64) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
            dt,
            rows: 0,
            error: None,
        }
    }

    /// Rows written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(self) -> csv::Result<W> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.writer
            .into_inner()
            .map_err(|err| csv::Error::from(err.into_error()))
    }
}

impl<W: Write> Observer for CsvRecorder<W> {
    fn observe(&mut self, tick: u64, observation: &Observation) {
        if self.error.is_some() {
            return;
        }
        let row = Row {
            tick,
            time: tick as f64 * self.dt,
            theta0: observation.theta0,
            omega0: observation.omega0,
            theta1: observation.theta1,
            omega1: observation.omega1,
            cart_x: observation.cart_x,
            cart_v: observation.cart_v,
            p0_x: observation.p0.x,
            p0_y: observation.p0.y,
            p1_x: observation.p1.x,
            p1_y: observation.p1.y,
        };
        match self.writer.serialize(row) {
            Ok(()) => self.rows += 1,
            Err(err) => {
                warn!(tick, error = %err, "trajectory log write failed");
                self.error = Some(err);
            }
        }
    }
}
