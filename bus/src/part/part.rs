use gridbus_serde::{BitReader, BitWrite, Serde, SerdeErr, UnsignedVariableInteger};

use crate::container::ShapeBuilder;
use crate::grid::{GridGraph, GridNodeId};
use crate::host::{BusHost, LoadContext};
use crate::location::{PartSlot, SideSet};
use crate::storage::Compound;

/// Identity token of a part's item, used verbatim on both serialization
/// channels and for drop collection. Encoded as a variable-length integer
/// on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(pub u32);

impl Serde for ItemId {
    fn ser(&self, writer: &mut dyn BitWrite) {
        UnsignedVariableInteger::<7>::new(self.0).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let value = UnsignedVariableInteger::<7>::de(reader)?.get();
        let value = u32::try_from(value).map_err(|_| SerdeErr::IntegerOverflow)?;
        Ok(ItemId(value))
    }
}

/// What attachments a cable-like part can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusSupport {
    /// Carries ordinary attachments.
    Cable,
    /// Carries only attachments that explicitly opt into dense carriers.
    DenseCable,
    /// Carries no attachments at all.
    None,
}

/// A part occupying one slot of a [`PartContainer`](crate::PartContainer).
///
/// Both serialization payloads are opaque to the container. Everything
/// beyond `item` has a conservative default so simple attachments only
/// implement what they use.
pub trait Part {
    /// The item identity this part serializes and drops as.
    fn item(&self) -> ItemId;

    /// Capability query marking cable-like parts. Cable-like parts may only
    /// occupy the center slot.
    fn as_cable(&self) -> Option<&dyn CablePart> {
        None
    }

    fn as_cable_mut(&mut self) -> Option<&mut dyn CablePart> {
        None
    }

    /// Whether this part accepts the carrier reported by the center cable
    /// it would ride on.
    fn can_be_placed_on(&self, support: BusSupport) -> bool {
        support == BusSupport::Cable
    }

    /// The part was stored into `slot`.
    fn placed_at(&mut self, _slot: PartSlot) {}

    /// Join the world. Grid-hosted parts create their graph node here;
    /// parts that announce themselves to neighbors must honor
    /// `ctx.is_loading()` and stay quiet during a bulk install.
    fn add_to_world(&mut self, _grid: &mut dyn GridGraph, _host: &mut dyn BusHost, _ctx: &LoadContext) {
    }

    /// Leave the world. Grid-hosted parts destroy their graph node here,
    /// which also severs every connection the node carried.
    fn remove_from_world(&mut self, _grid: &mut dyn GridGraph) {}

    /// This part's node in the connectivity graph, if it hosts one.
    fn grid_node(&self) -> Option<GridNodeId> {
        None
    }

    /// The node exposed to the neighboring position, when different from
    /// [`grid_node`](Part::grid_node).
    fn external_facing_node(&self) -> Option<GridNodeId> {
        self.grid_node()
    }

    /// Contribute this part's bounding boxes.
    fn boxes(&self, _builder: &mut ShapeBuilder) {}

    fn requires_dynamic_render(&self) -> bool {
        false
    }

    fn light_level(&self) -> u8 {
        0
    }

    fn can_connect_redstone(&self) -> bool {
        false
    }

    fn strong_power(&self) -> u8 {
        0
    }

    fn weak_power(&self) -> u8 {
        0
    }

    /// A neighboring position changed.
    fn neighbor_changed(&mut self) {}

    /// Items dropped in addition to the part's own item when the container
    /// breaks.
    fn drops(&self, _out: &mut Vec<ItemId>) {}

    /// Write the incremental wire payload.
    fn write_to_stream(&self, _writer: &mut dyn BitWrite) {}

    /// Apply an incremental wire payload. Returns whether the visible state
    /// changed enough to require a redraw.
    fn read_from_stream(&mut self, _reader: &mut BitReader) -> Result<bool, SerdeErr> {
        Ok(false)
    }

    /// Write the durable payload.
    fn save(&self, _tag: &mut Compound) {}

    /// Apply a durable payload.
    fn load(&mut self, _tag: &Compound) {}
}

/// Capability trait of the cable-like part in the center slot.
pub trait CablePart: Part {
    /// The carrier this cable offers; checked pairwise against
    /// [`Part::can_be_placed_on`] during placement.
    fn supported_buses(&self) -> BusSupport;

    /// Receive the set of sides the cable may still expose as connection
    /// points: sides without an attachment and not blocked by the host.
    fn set_valid_sides(&mut self, _sides: SideSet) {}
}
