//! Type-safe wrappers for archive extraction operations.
//!
//! `SafePath` can only be obtained by validating an entry name, so code that
//! joins paths onto the destination directory cannot be handed an unchecked
//! name.

pub mod entry_type;
pub mod safe_path;

pub use entry_type::EntryKind;
pub use safe_path::SafePath;
