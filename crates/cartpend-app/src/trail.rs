//! Fading trail of recent outer-joint positions.

use std::collections::VecDeque;

use cartpend::{Observation, Observer, Vec2};

/// Default number of positions kept.
pub const DEFAULT_TRAIL_LENGTH: usize = 30;

/// One dot of the trail, oldest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailMarker {
    /// Track coordinates (m).
    pub position: Vec2,
    /// Dot radius in pixels; grows from 1 toward the newest third.
    pub radius: u32,
    /// Brightness in `[0, 1)`, newest brightest.
    pub intensity: f64,
}

/// Bounded ring buffer of outer-joint positions in track coordinates.
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, point: Vec2) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<Vec2> {
        self.points.back().copied()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Dots for drawing, sized and faded by age.
    pub fn markers(&self) -> impl Iterator<Item = TrailMarker> + '_ {
        let third = (self.capacity as f64 / 3.0).max(1.0);
        let capacity = self.capacity.max(1) as f64;
        self.points
            .iter()
            .enumerate()
            .map(move |(i, &position)| TrailMarker {
                position,
                radius: 1 + (i as f64 / third).floor() as u32,
                intensity: i as f64 / capacity,
            })
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(DEFAULT_TRAIL_LENGTH)
    }
}

impl Observer for Trail {
    fn observe(&mut self, _tick: u64, observation: &Observation) {
        self.push(observation.outer_on_track());
    }
}
