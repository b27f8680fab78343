pub mod app_state;
pub mod controller;

pub use app_state::{AppState, CurrentView};
pub use controller::{MapViewController, ViewEffect};
