use async_trait::async_trait;

use crate::features::geolocation::models::{GeoLocation, GeolocationError, PositionOptions};

/// Device location capability
///
/// Implementations answer one fix request. Timeouts are enforced by the
/// caller, so a provider may simply never resolve.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<GeoLocation, GeolocationError>;
}

/// Position forwarded by the browser alongside a report submission
///
/// The browser performs the real fix and sends either the coordinates or
/// the `GeolocationPositionError.code` it received.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportedPosition {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy: Option<f64>,
    pub error_code: Option<u16>,
}

impl ReportedPosition {
    pub fn resolve(&self) -> Result<GeoLocation, GeolocationError> {
        if let Some(code) = self.error_code {
            return Err(GeolocationError::from_code(code));
        }

        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => {
                let location = GeoLocation {
                    latitude,
                    longitude,
                    accuracy: self.accuracy.unwrap_or(0.0),
                };
                if location.is_valid() {
                    Ok(location)
                } else {
                    Err(GeolocationError::PositionUnavailable)
                }
            }
            _ => Err(GeolocationError::PositionUnavailable),
        }
    }
}

#[async_trait]
impl LocationProvider for ReportedPosition {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<GeoLocation, GeolocationError> {
        self.resolve()
    }
}
