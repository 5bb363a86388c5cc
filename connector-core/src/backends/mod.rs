pub mod utils;

#[cfg(any(test, feature = "backend_mock"))]
pub mod mock;

#[cfg(feature = "backend_wpa_cli")]
pub mod wpa_cli;
