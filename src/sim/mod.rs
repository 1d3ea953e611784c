//! Deterministic simulation module
//!
//! All scene physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by obstacle ID)
//! - No rendering or platform dependencies

pub mod boat;
pub mod clock;
pub mod collision;
pub mod obstacle;
pub mod projectile;
pub mod state;
pub mod tick;
pub mod wave;

pub use boat::FloatingBody;
pub use clock::SimulationClock;
pub use collision::{CollisionInfo, resolve_ground, resolve_obstacle, sphere_box_collision};
pub use obstacle::{ObstacleSet, StaticObstacle};
pub use projectile::{LaunchPhase, Projectile, Trail};
pub use state::{LaunchEvent, LaunchState, SeaState};
pub use tick::{LaunchInput, SeaInput, tick_launch, tick_sea};
pub use wave::WaveField;
