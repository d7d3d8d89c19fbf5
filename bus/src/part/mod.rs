mod error;
mod part;
mod part_kinds;

pub use error::PartError;
pub use part::{BusSupport, CablePart, ItemId, Part};
pub use part_kinds::{PartBuilder, PartKinds};
