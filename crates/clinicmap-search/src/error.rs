use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("unknown sort key '{0}'; expected one of: name, volume, staffCount, branchCount")]
    UnknownSortKey(String),
}
