//! Collaborators around the cartpend core: user input, the outer-joint
//! trail a renderer draws, and a CSV trajectory log.

pub mod input;
pub mod recorder;
pub mod trail;

pub use input::{InputEvent, ScriptedInput, TimedEvent, scroll_acceleration};
pub use recorder::CsvRecorder;
pub use trail::{Trail, TrailMarker};
