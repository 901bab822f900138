//! `nav-core` — foundational types for the `ariadne` navigation aid.
//!
//! This crate is a dependency of every other `nav-*` crate.  It has no
//! `nav-*` dependencies and few external ones (`chrono` and `thiserror`,
//! plus optional `serde`).  Everything here is a pure value type; all of it
//! is `Send + Sync` and safe to share between threads.
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`coordinate`]  | `GeoCoordinate`, `CoordinateKind`, `Segment`, `Dms`        |
//! | [`snapshot`]    | `LocationSnapshot`, its builder, `LocationSource`          |
//! | [`geo`]         | `GeoPoint`, haversine distance, initial bearing            |
//! | [`error`]       | `NavError`, `NavResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod coordinate;
pub mod error;
pub mod geo;
pub mod snapshot;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use coordinate::{CoordinateKind, Dms, GeoCoordinate, Segment};
pub use error::{NavError, NavResult};
pub use geo::GeoPoint;
pub use snapshot::{LocationSnapshot, LocationSnapshotBuilder, LocationSource};
