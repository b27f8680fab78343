use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Geometry of a location. Only single points are supported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PointGeometry {
    /// `coordinates` is `[longitude, latitude]`
    Point { coordinates: [f64; 2] },
}

impl PointGeometry {
    pub fn point(lng: f64, lat: f64) -> Self {
        Self::Point {
            coordinates: [lng, lat],
        }
    }

    /// Wire-order `[longitude, latitude]`
    pub fn coordinates(&self) -> [f64; 2] {
        match self {
            Self::Point { coordinates } => *coordinates,
        }
    }

    /// Transposed into the map's `[latitude, longitude]` order
    pub fn to_lat_lng(&self) -> LatLng {
        LatLng::from_lng_lat(self.coordinates())
    }
}

/// Display metadata and classification of a location
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationProperties {
    pub id: String,
    pub name: String,
    /// Id of the single category this location belongs to
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    /// External map link
    #[serde(default)]
    pub glink: String,
}

fn feature_type() -> String {
    "Feature".to_string()
}

fn collection_type() -> String {
    "FeatureCollection".to_string()
}

/// A single point of interest, GeoJSON-shaped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFeature {
    #[serde(rename = "type", default = "feature_type")]
    pub kind: String,
    pub geometry: PointGeometry,
    pub properties: LocationProperties,
}

impl LocationFeature {
    pub fn new(properties: LocationProperties, lng: f64, lat: f64) -> Self {
        Self {
            kind: feature_type(),
            geometry: PointGeometry::point(lng, lat),
            properties,
        }
    }

    pub fn id(&self) -> &str {
        &self.properties.id
    }

    pub fn name(&self) -> &str {
        &self.properties.name
    }

    pub fn category(&self) -> &str {
        &self.properties.category
    }

    /// Map position, already transposed to `[latitude, longitude]`
    pub fn position(&self) -> LatLng {
        self.geometry.to_lat_lng()
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.properties.description)
    }

    pub fn address(&self) -> Option<&str> {
        non_empty(&self.properties.address)
    }

    pub fn phone(&self) -> Option<&str> {
        non_empty(&self.properties.phone)
    }

    pub fn website(&self) -> Option<&str> {
        non_empty(&self.properties.website)
    }

    pub fn glink(&self) -> Option<&str> {
        non_empty(&self.properties.glink)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Root object returned by the locations endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCollection {
    #[serde(rename = "type", default = "collection_type")]
    pub kind: String,
    pub features: Vec<LocationFeature>,
}

impl LocationCollection {
    pub fn new(features: Vec<LocationFeature>) -> Self {
        Self {
            kind: collection_type(),
            features,
        }
    }

    /// Parses the raw JSON body of the locations endpoint
    pub fn from_json_str(geojson_str: &str) -> crate::Result<Self> {
        let collection: LocationCollection = serde_json::from_str(geojson_str)
            .map_err(|e| crate::Error::ParseError(format!("Invalid GeoJSON: {}", e)))?;

        if collection.kind != "FeatureCollection" {
            return Err(crate::Error::ParseError(format!(
                "expected a FeatureCollection, got {}",
                collection.kind
            )));
        }

        Ok(collection)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// First feature with the given id
    pub fn find(&self, id: &str) -> Option<&LocationFeature> {
        self.features.iter().find(|f| f.id() == id)
    }
}

impl Default for LocationCollection {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
