use thiserror::Error;

/// Errors from the fallible edges of the crate
///
/// The simulation core itself cannot fail; these cover loading settings and
/// placing balls in a [`crate::Scene`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid setting `{field}`: {reason}")]
    InvalidSetting {
        field: &'static str,
        reason: &'static str,
    },

    #[error("Object {id} starts below the ground: height {height} < radius {radius}")]
    BelowGround { id: u32, height: f64, radius: f64 },

    #[error("Unknown object: {0}")]
    UnknownObject(u32),
}

impl Error {
    /// Whether the caller can fall back to defaults and carry on
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            Error::Json(_) | Error::InvalidSetting { .. } => false,
            Error::BelowGround { .. } | Error::UnknownObject(_) => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
