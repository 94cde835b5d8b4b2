mod audit_service;
mod cart_service;
mod document_service;
mod role_store;
mod user_service;

pub use audit_service::*;
pub use cart_service::*;
pub use document_service::*;
pub use role_store::*;
pub use user_service::*;
