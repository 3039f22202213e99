//! Domain models shared across the entire Strikeline engine.

pub mod contract;
pub mod position;
pub mod tick;

pub use contract::{Direction, PricedContract, RiskLevel};
pub use position::{ClosedPosition, LiveValuation, Position};
pub use tick::{PriceSnapshot, PriceTick};
