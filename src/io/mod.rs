//! Mission tables in, trajectories and run summaries out.

pub mod csv;
pub mod json;
