pub mod discovery;
pub mod navigator;
pub mod ui;

pub use discovery::{collect_interactive, is_interactive};
pub use navigator::{NavState, Navigator, NavigatorView, Outcome, Page};
pub use ui::{ActivationRecord, UIState};
