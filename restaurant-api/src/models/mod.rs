mod audit_log;
mod cart;
mod document;
mod user;

pub use audit_log::*;
pub use cart::*;
pub use document::*;
pub use user::*;
