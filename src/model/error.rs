use thiserror::Error;

/// Failures while formulating or solving a facility model.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("cannot formulate a model without sites")]
    NoSites,

    #[error("model `{0}` is infeasible")]
    Infeasible(String),

    #[error("model `{0}` is unbounded")]
    Unbounded(String),

    #[error("solver failed on model `{model}`: {message}")]
    Solver { model: String, message: String },
}
