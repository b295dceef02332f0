//! Searchable multi-value picker.
//!
//! Selection logic, keyboard navigation and panel placement are plain
//! functions in [`state`] and [`placement`]; [`MultiSelect`] binds them to the
//! DOM and renders the panel through a portal so it escapes clipping parents.

pub mod component;
pub mod placement;
pub mod state;
pub mod traits;

pub use component::MultiSelect;
pub use placement::{compute_dropdown_placement, AnchorRect, DropdownPlacement, PlacementSide, ViewportSize};
pub use state::{DropdownState, KeyOutcome, NavKey};
pub use traits::SelectOption;
