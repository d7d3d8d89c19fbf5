mod codec;
mod container;
mod error;
mod facades;
mod shapes;

pub use codec::StreamRead;
pub use container::PartContainer;
pub use error::{PlacementError, StateError};
pub use facades::{Facade, FacadeOverlay};
pub use shapes::{Aabb, SelectedPart, Shape, ShapeBuilder};
