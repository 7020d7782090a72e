//! Security validation modules.

pub mod path;
pub mod permissions;
pub mod syntax;

// Re-export public types and functions
pub use path::validate_path;
pub use permissions::implied_dir_permissions;
pub use permissions::is_executable;
pub use permissions::sanitize_permissions;
pub use syntax::PathSyntax;
pub use syntax::VolumeStyle;
