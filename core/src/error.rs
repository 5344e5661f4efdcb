use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("training set is empty")]
    EmptyTrainingSet,

    #[error("{features} feature vectors but {labels} labels")]
    LengthMismatch { features: usize, labels: usize },

    #[error("feature vector has {found} dimensions, model expects {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("classifier has not been trained")]
    NotTrained,

    #[error("test size {test_size} leaves no valid split of a corpus of {corpus_size} documents")]
    SplitOutOfRange { test_size: usize, corpus_size: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
