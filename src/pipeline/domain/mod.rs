pub mod greyness;
pub mod mood;
pub mod palette;
pub mod reducer;
pub mod snapshot;

/// All published statistics carry one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
