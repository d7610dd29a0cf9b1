pub mod evidence;
pub mod geolocation;
pub mod reports;
