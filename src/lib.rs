pub(crate) mod util;
pub use util::PiecewiseLinear;

mod config;
pub use config::*;

mod engine;
pub use engine::*;

pub mod geom;

mod haptics;
pub use haptics::*;

mod input;
pub use input::*;

pub mod renderables;
