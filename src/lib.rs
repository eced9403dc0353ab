pub mod config;
pub mod dynamics;
pub mod mission;
mod gnc_mod;
pub mod sim;
pub mod io;

// The gnc module: expose gnc_mod as `gnc` publicly
pub mod gnc {
    pub use crate::gnc_mod::*;
}

pub mod prelude {
    pub use crate::config::SimConfig;
    pub use crate::dynamics::{Submarine, SubmarineParams};
    pub use crate::gnc::{Controller, PdController, PdGains};
    pub use crate::mission::Mission;
    pub use crate::sim::{ClosedLoop, ControllerReset, PerformanceMetrics, SimError, Trajectory};
}
