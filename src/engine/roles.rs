//! Role assignment
//!
//! Roles are recomputed from scratch on every index change, never patched.

use smallvec::SmallVec;
use std::fmt;

/// Role map sized for the largest probed collection without spilling to the heap
pub type RoleMap = SmallVec<[Role; 20]>;

/// Visual and behavioral classification of an item relative to the current index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The item being shown and played
    Active,
    /// The item before the active one (wrapping)
    Prev,
    /// The item after the active one (wrapping)
    Next,
    /// Every other item
    Hidden,
}

impl Role {
    /// CSS class the host styles against
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Prev => "prev",
            Self::Next => "next",
            Self::Hidden => "hidden",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Index of the previous item, wrapping. `len` must be non-zero.
pub fn prev_index(current: usize, len: usize) -> usize {
    (current + len - 1) % len
}

/// Index of the next item, wrapping. `len` must be non-zero.
pub fn next_index(current: usize, len: usize) -> usize {
    (current + 1) % len
}

/// Role of `index` when `current` is active
///
/// Precedence is active, then prev, then next: with one item it is active,
/// with two items the other one is `prev`.
pub fn role_for(index: usize, current: usize, len: usize) -> Role {
    if index == current {
        Role::Active
    } else if index == prev_index(current, len) {
        Role::Prev
    } else if index == next_index(current, len) {
        Role::Next
    } else {
        Role::Hidden
    }
}

/// Roles for every item; empty when `len == 0`
pub fn assign_roles(current: usize, len: usize) -> RoleMap {
    (0..len).map(|index| role_for(index, current, len)).collect()
}
