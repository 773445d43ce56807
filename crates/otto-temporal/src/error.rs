/// Raised only by explicit validation; resolution itself never fails.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("could not resolve date phrase {0:?}")]
    UnresolvedDate(String),

    #[error("could not resolve time phrase {0:?}")]
    UnresolvedTime(String),
}
