use thiserror::Error;

pub type KacResult<T> = Result<T, KacError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KacError {
    #[error("invalid quiver definition: {0}")]
    InvalidQuiverDefinition(String),
    #[error("negative dimension {value} at vertex {vertex}")]
    NegativeDimension { vertex: String, value: i64 },
    #[error("operation requires a single-vertex quiver, got {vertices} vertices")]
    UnsupportedOperation { vertices: usize },
    #[error("precomputed table has {available} entries, {needed} required")]
    InconsistentPrecomputedTable { needed: usize, available: usize },
    #[error("weight substitution makes a denominator vanish")]
    DegenerateWeight,
    #[error("division by zero")]
    DivisionByZero,
    #[error("result is not a polynomial: {0}")]
    NonPolynomial(String),
    #[error("plethystic factor has no t-degree and does not terminate")]
    UnboundedSeries,
    #[error("budget exceeded: {0}")]
    BudgetExceeded(String),
    #[error("parse error: {0}")]
    Parse(String),
}
