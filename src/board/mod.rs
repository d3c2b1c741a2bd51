//! Dartboard geometry module
//!
//! Everything here is pure: a layout is derived from the viewport once and
//! taps are resolved against it without touching match state.

pub mod hit;
pub mod layout;
pub mod resolve;
pub mod wedge;

pub use hit::{Hit, Ring, score_value};
pub use layout::{BoardLayout, LayoutError, RingRadii};
pub use resolve::resolve_hit;
pub use wedge::{Segment, WEDGE_SEQUENCE, Wedge, wedge_index_at, wedges};
