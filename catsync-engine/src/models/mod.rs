//! Engine data model
//!
//! - [`Entry`]: a track record owned by the entry store
//! - [`Container`]: an artist or album that can be drilled into
//! - [`SearchKind`] / [`ContainerKind`]: closed variants replacing kind strings
//! - [`Generation`]: view partition marker

pub mod container;
pub mod entry;
pub mod search_kind;

pub use container::{Container, ContainerKind};
pub use entry::{Entry, Generation, PREVIEW_DURATION_SECS};
pub use search_kind::{SearchKind, TrackShape};
