pub mod admission;
pub mod anchor;
pub mod palette;
pub mod touch;

pub use anchor::Anchor;
pub use touch::{BackgroundTap, Contact, MOUSE_ID, TouchState};
