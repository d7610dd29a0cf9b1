pub mod capture;
pub mod models;
pub mod provider;

pub use capture::LocationCapture;
pub use models::{GeoLocation, GeolocationError, PositionOptions};
pub use provider::{LocationProvider, ReportedPosition};
