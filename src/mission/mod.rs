pub mod mission;
pub mod terrain;

pub use mission::{presets, Mission, MissionBuilder, MissionError};
pub use terrain::generate_reference_and_limits;
