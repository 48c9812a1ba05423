//! Input adapters for the tax engine: return snapshots from JSON and bracket
//! table overrides from CSV.

mod bracket_loader;
mod return_loader;

pub use bracket_loader::{BracketLoadError, BracketLoader, BracketRecord, BracketTableKind};
pub use return_loader::{ReturnLoadError, ReturnLoader};
