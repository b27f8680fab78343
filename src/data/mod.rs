pub mod category;
pub mod geojson;
pub mod loader;
pub mod source;

pub use category::{Category, CategoryFilter, CategoryMatch, CategoryTree};
pub use geojson::{LocationCollection, LocationFeature, LocationProperties, PointGeometry};
pub use loader::{fetch_map_data, DataLoader, LoadState, MapData};
pub use source::{DataSource, HttpDataSource, MemoryDataSource, Resource};
#[cfg(feature = "tokio-runtime")]
pub use source::FileDataSource;
