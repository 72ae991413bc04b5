//! User domain entities.

pub mod directory;
pub mod model;
pub mod role;

pub use directory::UserDirectory;
pub use model::{NewUser, User, UserPatch};
pub use role::UserRole;
