pub mod angle;
pub mod animation;
pub mod ar;
pub mod config;
pub mod constants;
pub mod controller;
pub mod host;
pub mod orientation;
pub mod rotation;
pub mod textures;
pub mod triggers;
pub mod visibility;

pub use animation::*;
pub use ar::*;
pub use config::*;
pub use controller::*;
pub use host::*;
pub use orientation::*;
pub use rotation::*;
pub use textures::*;
pub use triggers::*;
pub use visibility::*;
