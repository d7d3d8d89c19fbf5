use thiserror::Error;

use crate::part::part::ItemId;

/// Errors raised by the part kinds registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartError {
    /// Registration attempted after the registry was locked.
    #[error("PartKinds registry is locked; parts must be registered during startup")]
    RegistryLocked,

    /// Two registrations claimed the same item identity.
    #[error("item {item:?} is already registered")]
    DuplicateItem { item: ItemId },

    /// Two registrations claimed the same durable name.
    #[error("part name '{name}' is already registered")]
    DuplicateName { name: &'static str },

    /// A wire identity no registration matches.
    #[error("item {item:?} is not a registered part")]
    UnknownItem { item: ItemId },

    /// A durable identity no registration matches.
    #[error("'{name}' is not a registered part")]
    UnknownName { name: String },
}
