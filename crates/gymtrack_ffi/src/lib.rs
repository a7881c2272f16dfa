//! Flutter-facing bindings for the GymTrack core.

pub mod api;
