pub mod calculations;
pub mod engine;
pub mod forms;
pub mod models;
pub mod parameters;
pub mod solver;

pub use engine::{EngineError, TaxEngine};
pub use forms::{FormId, FormLines};
pub use models::*;
pub use parameters::ParameterError;
pub use solver::{FormSolver, SolverError};
