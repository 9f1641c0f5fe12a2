pub mod config;
pub mod error;
pub mod tolerance;
pub mod traits;

pub use config::{BoundsMargins, PlannerConfig, TerraceSize};
pub use error::{PlanError, Result};
pub use tolerance::Tolerance;
