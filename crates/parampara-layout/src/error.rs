pub type Result<T> = std::result::Result<T, Error>;

/// Parameter contract violations surfaced by [`crate::LayoutParams::validate`].
///
/// The simulation itself never checks these; feeding it out-of-contract
/// parameters gives undefined numeric behavior, so callers validate first.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("min_distance must be positive, got {0}")]
    NonPositiveMinDistance(f64),

    #[error("damping must lie strictly between 0 and 1, got {0}")]
    DampingOutOfRange(f64),

    #[error("iterations must be positive")]
    ZeroIterations,
}
