use thiserror::Error;

/// Errors raised while constructing an automaton.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// Words must arrive in non-decreasing code-point order; the
    /// single-pass minimization is unsound otherwise, so the build
    /// aborts rather than skipping or reordering.
    #[error("word \"{word}\" arrived out of order after \"{previous}\"")]
    OutOfOrder { previous: String, word: String },
    #[error("empty words cannot be indexed")]
    EmptyWord,
}

/// Errors raised when a wildcard pattern or rack template contains an
/// unsupported token. Literals, `?` and `*` are the only tokens today.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("unsupported token '{token}' in pattern \"{pattern}\"")]
    InvalidToken { token: char, pattern: String },
}

/// Errors raised when parsing a rack of tiles.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RackError {
    #[error("unsupported tile '{tile}' in rack (expected a letter or '?')")]
    InvalidTile { tile: char },
}
