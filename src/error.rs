use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON document: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to parse XML document: {0}")]
    XmlReadError(#[from] xml::reader::Error),

    #[error("Failed to write XML document: {0}")]
    XmlWriteError(#[from] xml::writer::Error),

    #[error("Failed to write CSV summary: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Malformed input document '{source_name}': {message}")]
    MalformedInput { source_name: String, message: String },

    #[error("Failed to build internal domain model: {0}")]
    ConversionError(#[from] ConversionError),

    #[error("No vehicle could be assigned to any parking area (capacity table or route catalog is empty)")]
    EmptyAssignment,

    #[error("Invalid distribution parameters: {0}")]
    InvalidDistribution(String),

    #[error("Required environment variable '{0}' is not set")]
    MissingEnvironment(String),

    #[error("Failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Simulator run {run_id} failed: {message}")]
    SimulatorFailed { run_id: u64, message: String },
}

impl Error {
    pub fn malformed(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::MalformedInput { source_name: source_name.into(), message: message.into() }
    }
}

/// Errors raised while turning configuration DTOs into validated domain values.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Unknown stop duration strategy: '{0}'")]
    UnknownDurationStrategy(String),

    #[error("Unknown exit order: '{0}'")]
    UnknownExitOrder(String),

    #[error("Unknown travel time basis: '{0}'")]
    UnknownTravelTimeBasis(String),

    #[error("Parking area '{0}' has a capacity of zero")]
    ZeroCapacity(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
