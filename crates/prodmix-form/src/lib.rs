pub mod file;
pub mod input;
pub mod layout;
pub mod report;
pub mod session;

pub use file::{ConstraintEntry, FileError, ProblemFile, ProductEntry};
pub use input::{parse_count, parse_dimensions, parse_number, parse_profit, Dimensions, ValidationError};
pub use layout::{ConstraintFields, FormLayout, ProductFields};
pub use report::{ConstraintLine, Outcome, ProductLine, Report, NO_FEASIBLE_SOLUTION};
pub use session::Session;
