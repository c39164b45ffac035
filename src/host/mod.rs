//! Host integration seams — persistence, panel access, and presentation.
//!
//! The engine reaches the host application only through these traits; the
//! in-tree [`MockHost`] implements all of them for tests.

pub mod mock;
pub mod traits;

pub use mock::{MockHost, MockHostConfig};
pub use traits::{HostPanel, SettingsSink, TagPresenter};
