//! Reelstate library crate: a frame-stepped fishing encounter for Bevy.
//!
//! The encounter core (`fishing`) is a plain state machine driven through the
//! `FishingContext` trait; `FishingPlugin` wires it into a Bevy app. The binary
//! (`main.rs`) runs it headless with the scripted angler from `autoangler`.

pub mod autoangler;
pub mod fishing;
pub mod input;
pub mod shared;
