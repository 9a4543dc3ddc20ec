/// Row height and grid cell sizing
pub mod layout;
/// Replace-on-search record sequences
pub mod records;
/// Artwork destinations guarded against stale deliveries
pub mod slot;
/// Record sequence plus reusable cells
pub mod surface;

pub use layout::RowLayout;
pub use records::{RecordList, SearchTicket};
pub use slot::{ArtworkSlot, FetchTicket};
pub use surface::{Cell, Surface};
