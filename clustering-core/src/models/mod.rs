//! Data model used by clustering algorithms: a dense matrix, dissimilarity metrics and helpers
//! to convert between different cluster representations.

mod clusters;
pub use self::clusters::*;

mod matrix;
pub use self::matrix::*;

mod metric;
pub use self::metric::*;
