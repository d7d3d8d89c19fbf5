//! # Gridbus
//! Multi-part bus containers: up to seven parts multiplexed into one host
//! position, a cable-like hub linking attachments into an external grid
//! graph, cached derived shapes, and two-channel state serialization
//! (durable snapshots and network deltas).

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use gridbus_serde::{
    BitReader, BitWrite, BitWriter, Serde, SerdeErr, UnsignedVariableInteger,
};

mod container;
mod grid;
mod host;
mod location;
mod part;
mod storage;

pub use container::{
    Aabb, Facade, FacadeOverlay, PartContainer, PlacementError, SelectedPart, Shape,
    ShapeBuilder, StateError, StreamRead,
};
pub use grid::{FailedConnection, GridGraph, GridNodeId};
pub use host::{BusHost, LoadContext, Redstone};
pub use location::{PartSlot, SideSet};
pub use part::{BusSupport, CablePart, ItemId, Part, PartBuilder, PartError, PartKinds};
pub use storage::{Compound, Tag};
