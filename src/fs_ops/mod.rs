//! Filesystem operations: listing, relocation, streaming copy, space checks.

mod copy;
mod disk;
mod listing;
mod relocate;

pub use copy::copy_and_delete;
pub use listing::list_file_names;
pub use relocate::{Outcome, relocate_file};
