use std::io;

/// Failures surfaced by the codec stages. Each one is raised at the stage
/// boundary where its precondition is violated; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum HuffmanError {
    #[error("input is not valid UTF-8 text")]
    InvalidInput,

    #[error("input contains no symbols to encode")]
    EmptyInput,

    #[error("symbol {0:?} has no entry in the code table")]
    UnknownSymbol(char),

    #[error("encoded stream is empty, nothing to pack")]
    EmptyStream,

    #[error("failed to write packed bytes: {0}")]
    SinkWrite(#[source] io::Error),

    #[error("bit sequence does not lead to any symbol")]
    InvalidCode,

    #[error("bit stream ended in the middle of a code")]
    TruncatedStream,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
