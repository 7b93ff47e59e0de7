use datafusion::arrow::error::ArrowError;
use datafusion::error::DataFusionError;
use datafusion::parquet::errors::ParquetError;

/// Errors raised while configuring, generating or writing a dataset
#[derive(Debug, thiserror::Error)]
pub enum IcuError {
    /// A count, date, weight table or format that cannot be used.
    /// Always raised before any record is generated.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The configuration file could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Building the table or writing it as CSV failed
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Writing the table as parquet failed
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Summary query failed
    #[error("DataFusion error: {0}")]
    DataFusion(#[from] DataFusionError),
}

impl IcuError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
