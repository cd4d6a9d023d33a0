//! `pantry-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the pantry and
//! shopping modules (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{InventoryItemId, ShoppingItemId};
