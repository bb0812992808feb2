//! Tracked entities and their scene actors.
//!
//! The host feeds a whole-value entity list every sync cycle; the
//! reconciler diffs it against the live actor set and creates, updates
//! or removes actors to match.

mod entity;
mod reconciler;

pub use entity::TrackedEntity;
pub use reconciler::{ActorState, EntityReconciler};
