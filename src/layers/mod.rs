pub mod marker;
pub mod popup;

pub use marker::{Marker, MarkerIcon};
pub use popup::{DescriptionView, ExpandedDescriptions, InfoRow};
