//! Format inference: turns a table of unknown layout into canonical
//! `cash_in` / `cash_out` columns, or explains why it cannot.
//!
//! ```text
//!   RawTable ──► columns (role → column) ──► format (strategy) ──► CanonicalDataset
//!                                 │                 │
//!                          direction (type)         └──► Clarification
//! ```

pub mod clarify;
pub mod columns;
pub mod direction;
pub mod format;

pub use clarify::{Clarification, ClarificationKind};
pub use columns::{ColumnRoles, Role};
pub use direction::Direction;
pub use format::{CanonicalDataset, SourceFormat, normalize};
