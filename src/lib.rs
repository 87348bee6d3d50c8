// Library interface for lapboard
// This allows integration tests to access internal modules

pub mod errors;
pub mod protocol;
pub mod relay;
pub mod timing;

// Re-export commonly used types
pub use errors::LapboardError;
pub use relay::{ConnectionState, DashboardEvent, ReconnectPolicy, TimingSource};
pub use timing::{DashboardState, Run, RunDisplay, TimingEvent};
