//! Query building.
//!
//! - [`SortState`] - current sort field and direction, encoded as a token
//! - [`FilterSet`] - opaque host filters with a typed category accessor
//! - [`QueryDescriptor`] - the full parameter object for a list query

mod descriptor;
mod filter;
mod order;

pub use descriptor::DEFAULT_INCLUDE;
pub use descriptor::QueryDescriptor;
pub use filter::FilterSet;
pub use order::Direction;
pub use order::SortState;
