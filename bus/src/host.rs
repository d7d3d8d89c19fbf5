use crate::location::PartSlot;
use crate::part::ItemId;

/// Callbacks into the host block that owns a container.
pub trait BusHost {
    /// Queue a network sync of the container's state.
    fn mark_for_update(&mut self);

    /// Queue a durable save of the container's state.
    fn mark_for_save(&mut self);

    /// The set of parts changed.
    fn part_changed(&mut self);

    /// Tell neighboring positions to re-evaluate this one.
    fn notify_neighbors(&mut self);

    /// The container became empty while live; the host may remove it.
    fn cleanup(&mut self);

    /// Whether the host forbids connections out of the given side.
    fn is_blocked(&self, side: PartSlot) -> bool;

    /// Strongest redstone power reaching this position from a neighbor.
    fn redstone_power(&self) -> u8;

    /// Turn detached decorations into dropped items.
    fn spawn_drops(&mut self, drops: Vec<ItemId>);

    /// Whether facades render opaque, and therefore contribute to the
    /// visual shape and to pointer hit-testing.
    fn opaque_facades(&self) -> bool {
        false
    }
}

/// Whether a mutation runs as part of a world-load batch.
///
/// Bulk installs construct a loading context for the duration of the batch
/// and pass it by reference down the placement path; update side effects
/// (host markers, neighbor notifications) are suppressed while it is in
/// scope. Going out of scope releases it on every exit path.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadContext {
    loading: bool,
}

impl LoadContext {
    /// Context for interactive, one-off mutations.
    pub fn interactive() -> Self {
        Self { loading: false }
    }

    /// Context for a bulk install during world load.
    pub fn loading() -> Self {
        Self { loading: true }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

/// Tri-state result of the lazy neighbor-redstone query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redstone {
    Yes,
    No,
    Undecided,
}

impl Redstone {
    pub(crate) fn to_int(self) -> i32 {
        match self {
            Redstone::Yes => 0,
            Redstone::No => 1,
            Redstone::Undecided => 2,
        }
    }

    pub(crate) fn from_int(value: i32) -> Redstone {
        match value {
            0 => Redstone::Yes,
            1 => Redstone::No,
            _ => Redstone::Undecided,
        }
    }
}
