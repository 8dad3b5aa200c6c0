//! Serde types for the USGS GeoJSON summary feed.
//!
//! These match the wire format of the four summary endpoints. Only the fields
//! the dashboard uses are declared; everything else in the document is
//! ignored during deserialization.

use chrono::DateTime;
use serde::Deserialize;

use super::FeedPayload;
use crate::data::Event;

/// A complete feed document: metadata plus the `features` event array.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedDocument {
    #[serde(default)]
    pub metadata: Option<FeedMetadata>,
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// Feed metadata, used only for optional display.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub generated: Option<i64>,
}

/// One event-shaped record in the `features` array.
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub id: String,
    pub properties: FeatureProperties,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureProperties {
    #[serde(default)]
    pub mag: Option<f64>,
    #[serde(default)]
    pub place: Option<String>,
    /// Occurrence time in milliseconds since the Unix epoch.
    #[serde(default)]
    pub time: i64,
    /// The feed reports this as 0/1, occasionally absent.
    #[serde(default)]
    pub tsunami: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    /// `[longitude, latitude, depth_km]`
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl Feature {
    /// Convert one feed feature into the domain event model.
    fn into_event(self) -> Event {
        let mut coords = self
            .geometry
            .map(|g| g.coordinates)
            .unwrap_or_default()
            .into_iter();
        let longitude = coords.next().unwrap_or(0.0);
        let latitude = coords.next().unwrap_or(0.0);
        let depth_km = coords.next().unwrap_or(0.0);

        Event {
            id: self.id,
            magnitude: self.properties.mag,
            place: self.properties.place,
            time: DateTime::from_timestamp_millis(self.properties.time).unwrap_or_default(),
            tsunami: self.properties.tsunami.unwrap_or(0) != 0,
            longitude,
            latitude,
            depth_km,
        }
    }
}

impl From<FeedDocument> for FeedPayload {
    fn from(document: FeedDocument) -> Self {
        let title = document.metadata.and_then(|m| m.title);
        let events = document.features.into_iter().map(Feature::into_event).collect();
        Self { events, title }
    }
}
