//! Ship search: predicates, filter composition and paging parameters

pub mod dates;
pub mod filter;
pub mod params;
pub mod predicate;

pub use filter::ShipFilter;
pub use params::{PageRequest, ShipOrder, ShipSearchParams};
pub use predicate::{Operand, Predicate, ShipField};
