//! Carousel engine
//!
//! This module implements the state machine shared by every carousel on the site.
//!
//! # Overview
//!
//! The engine:
//! - **Assigns one role per item** (`active`, `prev`, `next`, `hidden`) as a pure
//!   function of the current index and the collection length
//! - **Drives playback** on role changes: the active item is rewound and played,
//!   every other item is paused and rewound
//! - **Schedules one auto-advance** after every recomputation, using the active
//!   video's duration plus a buffer when known, otherwise a fixed delay
//! - **Suspends on hover** and restarts the full delay on pointer exit
//!
//! # Time
//!
//! The engine never reads the clock. Every operation that can schedule takes a
//! `now: Instant`, and the pending advance is a deadline that the host checks
//! with [`Carousel::tick`]. Scheduling always replaces the previous deadline, so
//! manual navigation can never race the timer into a double advance.
//!
//! # Empty collections
//!
//! With zero items the engine is inert: no role is applied and no deadline is
//! ever set.

pub mod carousel;
pub mod roles;
pub mod timer;

pub use carousel::{Carousel, EngineSettings};
pub use roles::{Role, RoleMap, assign_roles, next_index, prev_index, role_for};
pub use timer::{AutoAdvanceTimer, PendingAdvance};
