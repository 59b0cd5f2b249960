//! Delivery location captured once per device.

use serde::{Deserialize, Serialize};
use storefront_cache::KvStore;
use tracing::{info, warn};

use crate::error::CommerceError;

/// Key the location is persisted under.
pub const LOCATION_KEY: &str = "userLocation";

/// A map point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Where orders should be delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub city: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl Location {
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            city: city.into(),
            state: state.into(),
            landmark: None,
            coordinates: None,
        }
    }

    pub fn with_landmark(mut self, landmark: impl Into<String>) -> Self {
        self.landmark = Some(landmark.into());
        self
    }

    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.coordinates = Some(Coordinates { lat, lng });
        self
    }

    /// Check that the required fields are filled in.
    pub fn validate(&self) -> Result<(), CommerceError> {
        for (field, value) in [
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
        ] {
            if value.trim().is_empty() {
                return Err(CommerceError::ValidationError(format!(
                    "location {} is required",
                    field
                )));
            }
        }
        if let Some(coords) = self.coordinates {
            if !coords.is_valid() {
                return Err(CommerceError::ValidationError(format!(
                    "coordinates out of range: {}, {}",
                    coords.lat, coords.lng
                )));
            }
        }
        Ok(())
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.address.as_str()];
        if let Some(landmark) = &self.landmark {
            parts.push(landmark);
        }
        parts.push(&self.city);
        parts.push(&self.state);
        parts.join(", ")
    }
}

/// Holds the session's delivery location and persists changes to `S`.
#[derive(Debug)]
pub struct LocationCapture<S> {
    store: S,
    location: Option<Location>,
}

impl<S: KvStore> LocationCapture<S> {
    /// Load any previously saved location.
    ///
    /// A saved value that no longer parses is treated as absent so the
    /// capture prompt is shown again.
    pub fn load(store: S) -> Result<Self, CommerceError> {
        let location = match store.get::<Location>(LOCATION_KEY) {
            Ok(location) => location,
            Err(storefront_cache::CacheError::SerializeError(e)) => {
                warn!(error = %e, "discarding unreadable saved location");
                None
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { store, location })
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn is_location_set(&self) -> bool {
        self.location.is_some()
    }

    /// Validate, remember and persist a new location.
    pub fn set_location(&mut self, location: Location) -> Result<(), CommerceError> {
        location.validate()?;
        self.store.set(LOCATION_KEY, &location)?;
        info!(city = %location.city, state = %location.state, "delivery location saved");
        self.location = Some(location);
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
