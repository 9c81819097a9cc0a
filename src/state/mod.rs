//! State Management
//!
//! Global application state and the pure filter/zoom engine.

pub mod global;
pub mod timeframe;

pub use global::{provide_global_state, DataPoint, GlobalState};
pub use timeframe::Timeframe;
