//! This module contains helper functionality shared by all algorithms.

mod comparison;
pub use self::comparison::*;

mod environment;
pub use self::environment::*;

mod error;
pub use self::error::*;

mod quota;
pub use self::quota::*;

mod random;
pub use self::random::*;

mod statistics;
pub use self::statistics::*;

mod telemetry;
pub use self::telemetry::*;

mod timing;
pub use self::timing::*;

/// Alias to a scalar floating type.
pub type Float = f64;
