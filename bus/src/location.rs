/// One of the seven part slots of a container.
///
/// `Center` holds the cable-like hub; the six side slots hold attachments.
/// The discriminant order is the wire order: the occupancy bitmap and every
/// serialization, shape-building and drop-collection loop iterates slots by
/// ascending index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartSlot {
    Center = 0,
    Down = 1,
    Up = 2,
    North = 3,
    South = 4,
    West = 5,
    East = 6,
}

impl PartSlot {
    pub const ALL: [PartSlot; 7] = [
        PartSlot::Center,
        PartSlot::Down,
        PartSlot::Up,
        PartSlot::North,
        PartSlot::South,
        PartSlot::West,
        PartSlot::East,
    ];

    pub const SIDES: [PartSlot; 6] = [
        PartSlot::Down,
        PartSlot::Up,
        PartSlot::North,
        PartSlot::South,
        PartSlot::West,
        PartSlot::East,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<PartSlot> {
        PartSlot::ALL.get(index).copied()
    }

    pub fn is_side(self) -> bool {
        self != PartSlot::Center
    }

    /// Index into side-only tables. `None` for the center.
    pub fn side_index(self) -> Option<usize> {
        match self {
            PartSlot::Center => None,
            side => Some(side.index() - 1),
        }
    }

    pub fn from_side_index(index: usize) -> Option<PartSlot> {
        PartSlot::SIDES.get(index).copied()
    }
}

/// A set of side slots packed into one byte, bit `i` = side index `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SideSet(u8);

impl SideSet {
    pub const EMPTY: SideSet = SideSet(0);

    pub fn all() -> SideSet {
        SideSet(0b0011_1111)
    }

    pub fn insert(&mut self, side: PartSlot) {
        if let Some(index) = side.side_index() {
            self.0 |= 1 << index;
        }
    }

    pub fn remove(&mut self, side: PartSlot) {
        if let Some(index) = side.side_index() {
            self.0 &= !(1 << index);
        }
    }

    pub fn contains(&self, side: PartSlot) -> bool {
        match side.side_index() {
            Some(index) => self.0 & (1 << index) != 0,
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = PartSlot> + '_ {
        PartSlot::SIDES
            .into_iter()
            .filter(move |side| self.contains(*side))
    }
}
