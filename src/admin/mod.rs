//! Schema-driven admin panel backend.

pub mod schema;
pub mod slug;

#[cfg(feature = "ssr")]
pub mod board;
#[cfg(feature = "ssr")]
pub mod categories;
#[cfg(feature = "ssr")]
pub mod crud;
