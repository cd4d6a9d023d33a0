//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Pantry and shopping records are keyed by an immutable id that survives
/// edits, exports and imports.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
