use tracing::debug;

use crate::features::geolocation::models::{GeoLocation, GeolocationError, PositionOptions};
use crate::features::geolocation::provider::LocationProvider;

/// Holds the most recent successful location fix for a draft
#[derive(Debug, Clone, Default)]
pub struct LocationCapture {
    options: PositionOptions,
    location: Option<GeoLocation>,
}

impl LocationCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: PositionOptions) -> Self {
        Self {
            options,
            location: None,
        }
    }

    pub fn location(&self) -> Option<GeoLocation> {
        self.location
    }

    pub fn clear(&mut self) {
        self.location = None;
    }

    /// Request one fresh fix from `provider`
    ///
    /// Any failure clears the stored location, so a stale fix from an
    /// earlier attempt can never satisfy the submission precondition.
    pub async fn request_location(
        &mut self,
        provider: &dyn LocationProvider,
    ) -> Result<GeoLocation, GeolocationError> {
        let result = match tokio::time::timeout(
            self.options.timeout,
            provider.current_position(&self.options),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(GeolocationError::Timeout),
        };

        match result {
            Ok(location) => {
                debug!("Location fix acquired: {}", location.formatted());
                self.location = Some(location);
                Ok(location)
            }
            Err(e) => {
                debug!("Location fix failed: {}", e);
                self.location = None;
                Err(e)
            }
        }
    }
}
