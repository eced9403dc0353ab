pub mod controller;
pub mod pd;

pub use controller::Controller;
pub use pd::{PdController, PdGains};
