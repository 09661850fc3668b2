use thiserror::Error;

/// Failures of the field computation. Both are terminal: the computation is
/// one-shot and has no partial result.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The input cannot describe a grid (no sites, or a malformed site).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// All field cells share one raw score, so min-max normalization is undefined.
    #[error("degenerate score range over {cells} cell(s){}", .score.map(|s| format!(", all scoring {s}")).unwrap_or_default())]
    DegenerateRange { cells: usize, score: Option<u64> },
}
