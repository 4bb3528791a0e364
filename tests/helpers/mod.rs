//! Test helpers module
//!
//! This module provides storage doubles and test data shared by the
//! AssistantBot integration tests.

pub mod test_data;
pub mod test_storage;

#[allow(unused_imports)]
pub use test_data::*;
#[allow(unused_imports)]
pub use test_storage::*;
