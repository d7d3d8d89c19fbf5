use gridbus_serde::{BitReader, BitWrite, Serde, SerdeErr};

use crate::container::shapes::ShapeBuilder;
use crate::location::PartSlot;
use crate::part::ItemId;
use crate::storage::Compound;

/// A per-side decoration, independent of slot occupancy: it disguises a
/// side with another item's look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facade {
    item: ItemId,
    transparent: bool,
}

impl Facade {
    pub fn new(item: ItemId, transparent: bool) -> Self {
        Self { item, transparent }
    }

    pub fn item(&self) -> ItemId {
        self.item
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    /// A one-pixel plate flush against the facade's side.
    pub(crate) fn boxes(&self, builder: &mut ShapeBuilder) {
        match builder.slot() {
            PartSlot::Down => builder.add_box(0.0, 0.0, 0.0, 16.0, 1.0, 16.0),
            PartSlot::Up => builder.add_box(0.0, 15.0, 0.0, 16.0, 16.0, 16.0),
            PartSlot::North => builder.add_box(0.0, 0.0, 0.0, 16.0, 16.0, 1.0),
            PartSlot::South => builder.add_box(0.0, 0.0, 15.0, 16.0, 16.0, 16.0),
            PartSlot::West => builder.add_box(0.0, 0.0, 0.0, 1.0, 16.0, 16.0),
            PartSlot::East => builder.add_box(15.0, 0.0, 0.0, 16.0, 16.0, 16.0),
            PartSlot::Center => {}
        }
    }
}

/// The six facade positions of a container.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FacadeOverlay {
    facades: [Option<Facade>; 6],
}

impl FacadeOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn facade(&self, side: PartSlot) -> Option<&Facade> {
        let index = side.side_index()?;
        self.facades[index].as_ref()
    }

    /// Attach a facade; returns `false` for the center slot.
    pub fn set_facade(&mut self, side: PartSlot, facade: Facade) -> bool {
        let Some(index) = side.side_index() else {
            return false;
        };
        self.facades[index] = Some(facade);
        true
    }

    pub fn remove_facade(&mut self, side: PartSlot) -> Option<Facade> {
        let index = side.side_index()?;
        self.facades[index].take()
    }

    pub fn is_empty(&self) -> bool {
        self.facades.iter().all(Option::is_none)
    }

    /// Quarter turn around the vertical axis, matching the side parts.
    pub(crate) fn rotate_left(&mut self) {
        let north = self.remove_facade(PartSlot::North);
        let east = self.remove_facade(PartSlot::East);
        let south = self.remove_facade(PartSlot::South);
        let west = self.remove_facade(PartSlot::West);

        self.place_rotated(PartSlot::East, north);
        self.place_rotated(PartSlot::South, east);
        self.place_rotated(PartSlot::West, south);
        self.place_rotated(PartSlot::North, west);
    }

    fn place_rotated(&mut self, side: PartSlot, facade: Option<Facade>) {
        if let Some(facade) = facade {
            self.set_facade(side, facade);
        }
    }

    /// Wire payload, present for all six sides unconditionally: a bitmask
    /// byte, then item token and opacity bit per present facade.
    pub(crate) fn write_to_stream(&self, writer: &mut dyn BitWrite) {
        let mut mask: u8 = 0;
        for (index, facade) in self.facades.iter().enumerate() {
            if facade.is_some() {
                mask |= 1 << index;
            }
        }
        writer.write_byte(mask);

        for facade in self.facades.iter().flatten() {
            facade.item.ser(writer);
            facade.transparent.ser(writer);
        }
    }

    /// Apply a wire payload; returns whether any facade changed.
    pub(crate) fn read_from_stream(&mut self, reader: &mut BitReader) -> Result<bool, SerdeErr> {
        let mask = reader.read_byte()?;
        let mut changed = false;

        for index in 0..6 {
            if mask & (1 << index) != 0 {
                let item = ItemId::de(reader)?;
                let transparent = bool::de(reader)?;
                let facade = Facade::new(item, transparent);
                if self.facades[index] != Some(facade) {
                    self.facades[index] = Some(facade);
                    changed = true;
                }
            } else if self.facades[index].take().is_some() {
                changed = true;
            }
        }

        Ok(changed)
    }

    /// Durable payload, written exactly once per container save.
    pub(crate) fn save(&self, tag: &mut Compound) {
        let mut record = Compound::new();
        for (index, facade) in self.facades.iter().enumerate() {
            if let Some(facade) = facade {
                let mut entry = Compound::new();
                entry.put_int("item", facade.item.0 as i32);
                entry.put_int("transparent", facade.transparent as i32);
                record.put_compound(index.to_string(), entry);
            }
        }
        tag.put_compound("facades", record);
    }

    pub(crate) fn load(&mut self, tag: &Compound) {
        let record = tag.get_compound("facades");

        for index in 0..6 {
            let entry = record.and_then(|r| r.get_compound(&index.to_string()));
            match entry.and_then(|e| e.get_int("item")) {
                Some(item) => {
                    let transparent = entry
                        .and_then(|e| e.get_int("transparent"))
                        .unwrap_or(0)
                        != 0;
                    self.facades[index] = Some(Facade::new(ItemId(item as u32), transparent));
                }
                None => {
                    self.facades[index] = None;
                }
            }
        }
    }
}
