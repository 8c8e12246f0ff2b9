//! Platform-free core of the page effects: particles, the simulation step,
//! timed shows and the engine loop state. The web front-end supplies the
//! render surfaces and the frame scheduler.

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod frame;
pub mod particle;
pub mod pool;
pub mod shows;
pub mod surface;
pub mod template;
pub mod timeline;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use frame::*;
pub use particle::*;
pub use pool::*;
pub use surface::*;
pub use template::*;
pub use timeline::*;
