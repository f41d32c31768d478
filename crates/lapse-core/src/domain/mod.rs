//! Domain model (IDs, policies, scan windows, notices, scanner state).

pub mod ids;
pub mod notice;
pub mod policy;
pub mod state;
pub mod window;

pub use ids::{CarId, PolicyId};
pub use notice::{ExpirationNotice, UNKNOWN_PROVIDER};
pub use policy::Policy;
pub use state::ScannerState;
pub use window::ScanWindow;
