use crate::data::category::CategoryTree;
use crate::data::geojson::LocationCollection;
use crate::data::source::DataSource;
use crate::Result;
use crossbeam_channel::{bounded, Receiver, TryRecvError};

/// Everything the map view needs, loaded once per session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapData {
    pub categories: CategoryTree,
    pub locations: LocationCollection,
}

/// Fetches categories and locations concurrently.
///
/// Either failure fails the whole load; a partially loaded session is never
/// handed to the view.
pub async fn fetch_map_data(source: &dyn DataSource) -> Result<MapData> {
    log::debug!("loading map data from {}", source.describe());

    let (categories, locations) = futures::try_join!(source.categories(), source.locations())?;

    log::info!(
        "loaded {} top-level categories and {} locations",
        categories.len(),
        locations.len()
    );

    Ok(MapData {
        categories: CategoryTree::new(categories),
        locations,
    })
}

/// The view shows strictly one of these, never a mix
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    /// Terminal for the session; the user reloads to retry
    Error(String),
    Ready(MapData),
}

impl LoadState {
    pub fn from_result(result: Result<MapData>) -> Self {
        match result {
            Ok(data) => Self::Ready(data),
            Err(e) => {
                log::warn!("map data failed to load: {}", e);
                Self::Error(e.to_string())
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&MapData> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// Bridges a background fetch into a frame-driven UI.
///
/// The fetch reports exactly once over a channel; [`DataLoader::poll`] is
/// cheap enough to call every frame.
pub struct DataLoader {
    rx: Receiver<Result<MapData>>,
    state: LoadState,
}

impl DataLoader {
    pub fn from_receiver(rx: Receiver<Result<MapData>>) -> Self {
        Self {
            rx,
            state: LoadState::Loading,
        }
    }

    /// Starts the fetch on the given Tokio runtime
    #[cfg(feature = "tokio-runtime")]
    pub fn spawn(
        handle: &tokio::runtime::Handle,
        source: std::sync::Arc<dyn DataSource>,
    ) -> Self {
        let (tx, rx) = bounded(1);
        handle.spawn(async move {
            let result = fetch_map_data(source.as_ref()).await;
            if tx.send(result).is_err() {
                log::debug!("data loader dropped before the fetch finished");
            }
        });
        Self::from_receiver(rx)
    }

    /// A loader that is already settled, for synchronous callers and tests
    pub fn settled(result: Result<MapData>) -> Self {
        let (tx, rx) = bounded(1);
        // Capacity 1 and a fresh channel: this send cannot fail
        let _ = tx.send(result);
        Self::from_receiver(rx)
    }

    /// Picks up the fetch result if it has arrived
    pub fn poll(&mut self) -> &LoadState {
        if self.state.is_loading() {
            match self.rx.try_recv() {
                Ok(result) => self.state = LoadState::from_result(result),
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    self.state = LoadState::Error("data loader stopped unexpectedly".to_string());
                }
            }
        }
        &self.state
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Hands the loaded data over, leaving the loader spent
    pub fn take_ready(&mut self) -> Option<MapData> {
        match std::mem::replace(&mut self.state, LoadState::Loading) {
            LoadState::Ready(data) => {
                self.state = LoadState::Error("map data already taken".to_string());
                Some(data)
            }
            other => {
                self.state = other;
                None
            }
        }
    }
}
