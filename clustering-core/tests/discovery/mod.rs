//! This module contains tests which run algorithms on generated data to discover violations of
//! their invariants.

mod property;
