//! Presentation namespace: workbench state and text rendering.

mod render;
mod workbench;

pub use render::{NO_ERRORS_MESSAGE, render_result};
pub use workbench::{ViewState, Workbench};
