use log::{error, warn};

use gridbus_serde::{BitReader, BitWrite, BitWriter, Serde, SerdeErr, UnsignedVariableInteger};

use crate::container::error::StateError;
use crate::container::PartContainer;
use crate::grid::GridGraph;
use crate::host::{BusHost, LoadContext, Redstone};
use crate::location::PartSlot;
use crate::part::{ItemId, PartKinds};
use crate::storage::Compound;

/// Outcome of applying one stream delta.
#[derive(Debug, Default)]
pub struct StreamRead {
    /// Whether the visible state changed enough to require a redraw.
    pub changed: bool,
    /// Violations recovered from during the read; the affected slots were
    /// left empty.
    pub violations: Vec<StateError>,
}

impl PartContainer {
    /// Write the delta-sync form: one occupancy bitmap byte (bit `i` =
    /// slot `i`), then each part's identity token and length-prefixed
    /// payload in ascending slot order, then the facade overlay.
    pub fn write_to_stream(&self, writer: &mut BitWriter) {
        let mut occupied: u8 = 0;
        for slot in PartSlot::ALL {
            if self.part(slot).is_some() {
                occupied |= 1 << slot.index();
            }
        }
        writer.write_byte(occupied);

        for slot in PartSlot::ALL {
            if let Some(part) = self.part(slot) {
                part.item().ser(writer);

                // The length prefix is what keeps an unrecognized part's
                // payload skippable on the reading side.
                let mut payload = BitWriter::new();
                part.write_to_stream(&mut payload);
                let bytes = payload.to_bytes();
                UnsignedVariableInteger::<7>::new(bytes.len() as u64).ser(writer);
                for byte in &bytes {
                    writer.write_byte(*byte);
                }
            }
        }

        self.facades.write_to_stream(writer);
    }

    /// Apply a delta produced by [`write_to_stream`](Self::write_to_stream).
    ///
    /// A matching identity updates the resident part in place; a mismatch
    /// replaces it (remove, then re-add through the registry); an identity
    /// no registration recognizes leaves the slot empty, records the
    /// violation, and keeps parsing the rest of the stream.
    pub fn read_from_stream(
        &mut self,
        reader: &mut BitReader,
        kinds: &PartKinds,
        grid: &mut dyn GridGraph,
        host: &mut dyn BusHost,
    ) -> Result<StreamRead, SerdeErr> {
        let occupied = reader.read_byte()?;
        let mut result = StreamRead::default();
        let ctx = LoadContext::interactive();

        for slot in PartSlot::ALL {
            if occupied & (1 << slot.index()) != 0 {
                let item = ItemId::de(reader)?;

                let length = UnsignedVariableInteger::<7>::de(reader)?.get() as usize;
                let mut payload = Vec::with_capacity(length);
                for _ in 0..length {
                    payload.push(reader.read_byte()?);
                }
                let mut payload = BitReader::new(&payload);

                if self.part(slot).map(|p| p.item()) == Some(item) {
                    if let Some(part) = self.part_mut(slot) {
                        if part.read_from_stream(&mut payload)? {
                            result.changed = true;
                        }
                    }
                } else {
                    if self.part(slot).is_some() {
                        self.remove_part(slot, false, grid, host);
                    }

                    match kinds.create(item) {
                        Ok(part) => match self.place(part, slot, grid, host, &ctx) {
                            Ok(_) => {
                                if let Some(part) = self.part_mut(slot) {
                                    part.read_from_stream(&mut payload)?;
                                }
                                result.changed = true;
                            }
                            Err(err) => {
                                error!(
                                    "invalid stream: replacement {item:?} rejected at {slot:?}: {err}"
                                );
                                result
                                    .violations
                                    .push(StateError::InvalidStream { item, slot });
                            }
                        },
                        Err(_) => {
                            error!(
                                "invalid stream: {item:?} is not a registered part; {slot:?} left empty"
                            );
                            result
                                .violations
                                .push(StateError::UnknownStreamPart { item, slot });
                        }
                    }
                }
            } else if self.part(slot).is_some() {
                self.remove_part(slot, false, grid, host);
            }
        }

        if self.facades.read_from_stream(reader)? {
            result.changed = true;
        }

        // Applied updates may have changed any derived shape.
        self.invalidate_shapes();

        Ok(result)
    }

    /// Write the durable snapshot: the redstone tri-state, a `"def:"` /
    /// `"extra:"` record pair per occupied slot, and the facade overlay
    /// exactly once.
    pub fn save(&self, tag: &mut Compound, kinds: &PartKinds) {
        tag.put_int("has_redstone", self.has_redstone.to_int());

        for slot in PartSlot::ALL {
            if let Some(part) = self.part(slot) {
                let Some(name) = kinds.name_of(part.item()) else {
                    warn!(
                        "part {:?} at {slot:?} is not registered and was not saved",
                        part.item()
                    );
                    continue;
                };

                // Identity-only record; quantity is pinned to one.
                let mut def = Compound::new();
                def.put_string("id", name);
                def.put_int("count", 1);

                let mut extra = Compound::new();
                part.save(&mut extra);

                tag.put_compound(format!("def:{}", slot.index()), def);
                tag.put_compound(format!("extra:{}", slot.index()), extra);
            }
        }

        self.facades.save(tag);
    }

    /// Read a durable snapshot back. Unknown or malformed records are
    /// logged, surfaced, and skipped; the rest of the load continues.
    pub fn load(
        &mut self,
        tag: &Compound,
        kinds: &PartKinds,
        grid: &mut dyn GridGraph,
        host: &mut dyn BusHost,
    ) -> Vec<StateError> {
        self.invalidate_shapes();

        let mut violations = Vec::new();
        let ctx = LoadContext::loading();

        if let Some(value) = tag.get_int("has_redstone") {
            self.has_redstone = Redstone::from_int(value);
        }

        for slot in PartSlot::ALL {
            let def_key = format!("def:{}", slot.index());
            let extra_key = format!("extra:{}", slot.index());

            match (tag.get_compound(&def_key), tag.get_compound(&extra_key)) {
                (Some(def), Some(extra)) => {
                    let Some(name) = def.get_string("id") else {
                        continue;
                    };

                    let resident = self.part(slot).and_then(|p| kinds.name_of(p.item()));
                    if resident == Some(name) {
                        if let Some(part) = self.part_mut(slot) {
                            part.load(extra);
                        }
                    } else {
                        self.remove_part(slot, true, grid, host);

                        let placed = kinds
                            .create_by_name(name)
                            .map_err(|_| ())
                            .and_then(|part| {
                                self.place(part, slot, grid, host, &ctx).map_err(|_| ())
                            });

                        match placed {
                            Ok(_) => {
                                if let Some(part) = self.part_mut(slot) {
                                    part.load(extra);
                                }
                            }
                            Err(()) => {
                                warn!(
                                    "invalid saved part '{name}' at {slot:?}; it was ignored"
                                );
                                violations.push(StateError::UnknownSavedPart {
                                    name: name.to_owned(),
                                    slot,
                                });
                            }
                        }
                    }
                }
                _ => {
                    if self.part(slot).is_some() {
                        self.remove_part(slot, false, grid, host);
                    }
                }
            }
        }

        self.facades.load(tag);

        violations
    }
}
