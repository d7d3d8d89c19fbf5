use log::debug;

use crate::container::error::PlacementError;
use crate::container::facades::{Facade, FacadeOverlay};
use crate::container::shapes::Shape;
use crate::grid::{FailedConnection, GridGraph, GridNodeId};
use crate::host::{BusHost, LoadContext, Redstone};
use crate::location::{PartSlot, SideSet};
use crate::part::{ItemId, Part};

/// Up to seven parts multiplexed into one host position: a cable-like part
/// in the center slot acting as the hub, one attachment per side, and an
/// independent facade overlay.
///
/// The container enforces placement legality, keeps the hub's star of graph
/// connections consistent across every mutation, caches the derived
/// geometry, and carries the two serialization channels (see the codec
/// methods in `codec.rs`).
pub struct PartContainer {
    center: Option<Box<dyn Part>>,
    sides: [Option<Box<dyn Part>>; 6],
    pub(crate) facades: FacadeOverlay,
    in_world: bool,
    requires_dynamic_render: bool,
    pub(crate) has_redstone: Redstone,
    pub(crate) cached_shape: Option<Shape>,
    pub(crate) cached_collision_shape: Option<Shape>,
    pub(crate) cached_collision_shape_living: Option<Shape>,
}

impl Default for PartContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl PartContainer {
    pub fn new() -> Self {
        Self {
            center: None,
            sides: [None, None, None, None, None, None],
            facades: FacadeOverlay::new(),
            in_world: false,
            requires_dynamic_render: false,
            has_redstone: Redstone::Undecided,
            cached_shape: None,
            cached_collision_shape: None,
            cached_collision_shape_living: None,
        }
    }

    fn slot_ref(&self, slot: PartSlot) -> &Option<Box<dyn Part>> {
        match slot.side_index() {
            None => &self.center,
            Some(index) => &self.sides[index],
        }
    }

    fn slot_mut(&mut self, slot: PartSlot) -> &mut Option<Box<dyn Part>> {
        match slot.side_index() {
            None => &mut self.center,
            Some(index) => &mut self.sides[index],
        }
    }

    pub fn part(&self, slot: PartSlot) -> Option<&dyn Part> {
        self.slot_ref(slot).as_deref()
    }

    pub fn part_mut(&mut self, slot: PartSlot) -> Option<&mut (dyn Part + 'static)> {
        self.slot_mut(slot).as_deref_mut()
    }

    /// Check whether `part` could occupy `slot`, without mutating anything.
    pub fn can_place(&self, part: &dyn Part, slot: PartSlot) -> Result<(), PlacementError> {
        match part.as_cable() {
            Some(cable) => {
                if slot != PartSlot::Center {
                    return Err(PlacementError::CableOutsideCenter);
                }
                for side in PartSlot::SIDES {
                    if let Some(existing) = self.part(side) {
                        if !existing.can_be_placed_on(cable.supported_buses()) {
                            return Err(PlacementError::Incompatible { slot: side });
                        }
                    }
                }
                if self.center.is_some() {
                    return Err(PlacementError::SlotOccupied { slot });
                }
                Ok(())
            }
            None => {
                if slot == PartSlot::Center {
                    return Err(PlacementError::AttachmentInCenter);
                }
                if let Some(cable) = self.center.as_deref().and_then(|c| c.as_cable()) {
                    if !part.can_be_placed_on(cable.supported_buses()) {
                        return Err(PlacementError::Incompatible { slot });
                    }
                }
                if self.part(slot).is_some() {
                    return Err(PlacementError::SlotOccupied { slot });
                }
                Ok(())
            }
        }
    }

    /// Validate and store `part` into `slot`, wiring it into the world and
    /// the connectivity graph when the container is live.
    ///
    /// A rejected graph connection rolls the whole placement back: the part
    /// leaves the world again (destroying its node and any connections it
    /// gained), the slot is cleared, and
    /// [`PlacementError::ConnectionFailed`] is returned. Placing the hub
    /// connects it to every attachment in one all-or-nothing step.
    pub fn place(
        &mut self,
        mut part: Box<dyn Part>,
        slot: PartSlot,
        grid: &mut dyn GridGraph,
        host: &mut dyn BusHost,
        ctx: &LoadContext,
    ) -> Result<PartSlot, PlacementError> {
        self.can_place(part.as_ref(), slot)?;

        part.placed_at(slot);
        *self.slot_mut(slot) = Some(part);
        if self.in_world {
            if let Some(part) = self.part_mut(slot) {
                part.add_to_world(grid, host, ctx);
            }
        }

        if let Err(err) = self.connect_placed(slot, grid) {
            if let Some(mut failed) = self.slot_mut(slot).take() {
                failed.remove_from_world(grid);
            }
            return Err(PlacementError::ConnectionFailed(err));
        }

        self.invalidate_shapes();
        if slot.is_side() {
            self.update_dynamic_render();
        }
        self.update_connections(grid, host);
        if !ctx.is_loading() {
            host.mark_for_update();
            host.mark_for_save();
        }
        self.part_changed(host);

        Ok(slot)
    }

    /// Connect a freshly stored part to the rest of the star. Placing the
    /// hub reaches out to every attachment; placing an attachment reaches
    /// the hub only.
    fn connect_placed(
        &self,
        slot: PartSlot,
        grid: &mut dyn GridGraph,
    ) -> Result<(), FailedConnection> {
        let center_node = self.center.as_deref().and_then(|c| c.grid_node());
        let Some(center_node) = center_node else {
            return Ok(());
        };

        if slot == PartSlot::Center {
            for side in PartSlot::SIDES {
                let Some(side_node) = self.part(side).and_then(|p| p.grid_node()) else {
                    continue;
                };
                if let Err(err) = grid.create_connection(center_node, side_node) {
                    debug!("hub placement failed to connect {side:?}: {err}");
                    return Err(err);
                }
            }
        } else if let Some(side_node) = self.part(slot).and_then(|p| p.grid_node()) {
            if let Err(err) = grid.create_connection(center_node, side_node) {
                debug!("placement at {slot:?} failed to connect: {err}");
                return Err(err);
            }
        }

        Ok(())
    }

    /// Detach and return the occupant of `slot`.
    ///
    /// With `suppress_side_effects` the caller takes over cache
    /// invalidation and host notification; the deserializers use this while
    /// swapping a part out for its replacement.
    pub fn remove_part(
        &mut self,
        slot: PartSlot,
        suppress_side_effects: bool,
        grid: &mut dyn GridGraph,
        host: &mut dyn BusHost,
    ) -> Option<Box<dyn Part>> {
        let mut removed = self.slot_mut(slot).take();
        if let Some(part) = removed.as_mut() {
            part.remove_from_world(grid);
        }

        if !suppress_side_effects {
            self.invalidate_shapes();
            self.update_dynamic_render();
            self.update_connections(grid, host);
            host.mark_for_update();
            host.mark_for_save();
            self.part_changed(host);

            // Cleanup fires only for a live container that has become
            // fully empty; swaps during initialization never reach it.
            if self.in_world && self.is_empty() {
                host.cleanup();
            }
        }

        removed
    }

    /// React to a change in slot occupancy. Without a center part the
    /// facade overlay has nothing to hang onto: facades are detached and
    /// handed to the host as drops.
    pub(crate) fn part_changed(&mut self, host: &mut dyn BusHost) {
        if self.center.is_none() {
            let mut dropped = Vec::new();
            for side in PartSlot::SIDES {
                if let Some(facade) = self.facades.remove_facade(side) {
                    dropped.push(facade.item());
                }
            }
            if !dropped.is_empty() {
                host.spawn_drops(dropped);
            }
        }

        host.part_changed();
    }

    /// The sides the hub may still expose as connection points: every side
    /// without an attachment and not blocked by the host.
    pub fn connectable_sides(&self, host: &dyn BusHost) -> SideSet {
        let mut sides = SideSet::all();
        for side in PartSlot::SIDES {
            if self.part(side).is_some() || host.is_blocked(side) {
                sides.remove(side);
            }
        }
        sides
    }

    /// Recompute the hub's connectable sides and push the result into the
    /// cable and its graph node.
    pub fn update_connections(&mut self, grid: &mut dyn GridGraph, host: &dyn BusHost) {
        if self.center.is_none() {
            return;
        }

        let sides = self.connectable_sides(host);

        if let Some(center) = self.center.as_deref_mut() {
            if let Some(cable) = center.as_cable_mut() {
                cable.set_valid_sides(sides);
            }
            if let Some(node) = center.grid_node() {
                grid.update_node_state(node);
            }
        }
    }

    fn update_dynamic_render(&mut self) {
        self.requires_dynamic_render = false;
        for side in PartSlot::SIDES {
            if let Some(part) = self.part(side) {
                self.requires_dynamic_render |= part.requires_dynamic_render();
            }
        }
    }

    pub fn requires_dynamic_render(&self) -> bool {
        self.requires_dynamic_render
    }

    /// Install every held part into the world and the graph. The center
    /// goes first so attachments find the hub as they come up; connection
    /// failures during a bulk install are logged and tolerated.
    pub fn add_to_world(&mut self, grid: &mut dyn GridGraph, host: &mut dyn BusHost) {
        if self.in_world {
            return;
        }
        self.in_world = true;

        let ctx = LoadContext::loading();

        for slot in PartSlot::ALL {
            if let Some(part) = self.slot_mut(slot).as_deref_mut() {
                part.placed_at(slot);
                part.add_to_world(grid, host, &ctx);
            } else {
                continue;
            }

            if slot.is_side() {
                let side_node = self.part(slot).and_then(|p| p.grid_node());
                let center_node = self.center.as_deref().and_then(|c| c.grid_node());
                if let (Some(center_node), Some(side_node)) = (center_node, side_node) {
                    if let Err(err) = grid.create_connection(center_node, side_node) {
                        debug!("world install failed to connect {slot:?}: {err}");
                    }
                }
            }
        }

        self.part_changed(host);
    }

    /// Detach every part from the world; their graph nodes die and take
    /// the star with them.
    pub fn remove_from_world(&mut self, grid: &mut dyn GridGraph, host: &mut dyn BusHost) {
        if !self.in_world {
            return;
        }
        self.in_world = false;

        for slot in PartSlot::ALL {
            if let Some(part) = self.slot_mut(slot).as_deref_mut() {
                part.remove_from_world(grid);
            }
        }

        self.invalidate_shapes();
        self.part_changed(host);
    }

    pub fn is_in_world(&self) -> bool {
        self.in_world
    }

    pub fn is_empty(&self) -> bool {
        self.center.is_none() && self.sides.iter().all(Option::is_none) && self.facades.is_empty()
    }

    /// The graph node a neighbor beyond `slot`'s side connects to: the
    /// side part's external-facing node when it has one, else the hub's.
    pub fn grid_node(&self, slot: PartSlot) -> Option<GridNodeId> {
        if let Some(part) = self.part(slot) {
            if let Some(node) = part.external_facing_node() {
                return Some(node);
            }
        }
        self.center.as_deref().and_then(|c| c.grid_node())
    }

    pub fn light_level(&self) -> u8 {
        PartSlot::ALL
            .iter()
            .filter_map(|slot| self.part(*slot))
            .map(|part| part.light_level())
            .max()
            .unwrap_or(0)
    }

    /// Lazy neighbor-redstone query; the tri-state sticks until a neighbor
    /// change resets it.
    pub fn has_redstone(&mut self, host: &dyn BusHost) -> bool {
        if self.has_redstone == Redstone::Undecided {
            self.has_redstone = if host.redstone_power() > 0 {
                Redstone::Yes
            } else {
                Redstone::No
            };
        }
        self.has_redstone == Redstone::Yes
    }

    /// A neighboring position changed: the redstone cache is stale, parts
    /// get told, blockage may have shifted the hub's connectable sides, and
    /// neighbor-dependent shapes may differ.
    pub fn neighbor_changed(&mut self, grid: &mut dyn GridGraph, host: &mut dyn BusHost) {
        self.has_redstone = Redstone::Undecided;

        for slot in PartSlot::ALL {
            if let Some(part) = self.slot_mut(slot).as_deref_mut() {
                part.neighbor_changed();
            }
        }

        self.update_connections(grid, host);
        self.invalidate_shapes();
    }

    pub fn can_connect_redstone(&self, side: PartSlot) -> bool {
        self.part(side)
            .map(|part| part.can_connect_redstone())
            .unwrap_or(false)
    }

    pub fn strong_power(&self, side: PartSlot) -> u8 {
        self.part(side).map(|part| part.strong_power()).unwrap_or(0)
    }

    pub fn weak_power(&self, side: PartSlot) -> u8 {
        self.part(side).map(|part| part.weak_power()).unwrap_or(0)
    }

    /// Everything this container drops when broken: every part's item plus
    /// its extra drops, and every facade's item, in slot order.
    pub fn drops(&self, out: &mut Vec<ItemId>) {
        for slot in PartSlot::ALL {
            if let Some(part) = self.part(slot) {
                out.push(part.item());
                part.drops(out);
            }

            if slot.is_side() {
                if let Some(facade) = self.facades.facade(slot) {
                    out.push(facade.item());
                }
            }
        }
    }

    /// Extra drops only; parts and facades themselves stay with the
    /// container (used when the container is picked rather than broken).
    pub fn extra_drops(&self, out: &mut Vec<ItemId>) {
        for slot in PartSlot::ALL {
            if let Some(part) = self.part(slot) {
                part.drops(out);
            }
        }
    }

    /// Rotate side parts and facades one quarter turn around the vertical
    /// axis. Up and Down stay put.
    pub fn rotate_left(&mut self) {
        let north = self.slot_mut(PartSlot::North).take();
        let east = self.slot_mut(PartSlot::East).take();
        let south = self.slot_mut(PartSlot::South).take();
        let west = self.slot_mut(PartSlot::West).take();

        *self.slot_mut(PartSlot::East) = north;
        *self.slot_mut(PartSlot::South) = east;
        *self.slot_mut(PartSlot::West) = south;
        *self.slot_mut(PartSlot::North) = west;

        self.facades.rotate_left();
        self.invalidate_shapes();
    }

    pub fn facade(&self, side: PartSlot) -> Option<&Facade> {
        self.facades.facade(side)
    }

    /// Attach a facade; returns `false` for the center slot.
    pub fn set_facade(&mut self, side: PartSlot, facade: Facade, host: &mut dyn BusHost) -> bool {
        if !self.facades.set_facade(side, facade) {
            return false;
        }
        self.invalidate_shapes();
        host.mark_for_update();
        host.mark_for_save();
        true
    }

    pub fn remove_facade(&mut self, side: PartSlot, host: &mut dyn BusHost) -> Option<Facade> {
        let removed = self.facades.remove_facade(side);
        if removed.is_some() {
            self.invalidate_shapes();
            host.mark_for_update();
            host.mark_for_save();
        }
        removed
    }
}
