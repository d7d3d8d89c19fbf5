use thiserror::Error;

use crate::grid::FailedConnection;
use crate::location::PartSlot;
use crate::part::ItemId;

/// Why a part could not be placed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The target slot already holds a part.
    #[error("slot {slot:?} is already occupied")]
    SlotOccupied { slot: PartSlot },

    /// Cable-like parts may only occupy the center slot.
    #[error("cable-like parts may only occupy the center slot")]
    CableOutsideCenter,

    /// Only cable-like parts may occupy the center slot.
    #[error("only cable-like parts may occupy the center slot")]
    AttachmentInCenter,

    /// The part and the carrier in play refuse each other; `slot` names the
    /// occupant that objected (for hub placements) or the target slot (for
    /// attachments).
    #[error("part is incompatible with the carrier at {slot:?}")]
    Incompatible { slot: PartSlot },

    /// The connectivity graph refused an edge; the placement was rolled
    /// back before this was returned.
    #[error("the connectivity graph refused a connection: {0}")]
    ConnectionFailed(FailedConnection),
}

/// Violations recovered from while applying serialized state. The affected
/// slot is left empty and the rest of the payload is still applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// A durable-channel identity no registration matches.
    #[error("invalid saved part '{name}' at {slot:?}; it was ignored")]
    UnknownSavedPart { name: String, slot: PartSlot },

    /// A stream-channel identity no registration matches.
    #[error("invalid stream: {item:?} is not a registered part; {slot:?} left empty")]
    UnknownStreamPart { item: ItemId, slot: PartSlot },

    /// A stream-driven replacement produced a part the container refused.
    #[error("invalid stream: replacement {item:?} rejected at {slot:?}")]
    InvalidStream { item: ItemId, slot: PartSlot },
}
