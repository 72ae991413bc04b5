//! Per-method access control.

pub mod interceptor;
pub mod table;

pub use interceptor::{AuthDecision, AuthInterceptor};
pub use table::AclTable;
