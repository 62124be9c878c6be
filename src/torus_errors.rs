use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum TorusError {
    #[error("Orbit appears to be unbound")]
    UnboundOrbit,

    #[error("Angle variables require an azimuth coordinate (phi)")]
    MissingAzimuth,

    #[error("Invalid torus parameter: {0}")]
    InvalidParameter(String),

    #[error("ROOTS finding error: {0}")]
    RootFindingError(#[from] roots::SearchError),
}
