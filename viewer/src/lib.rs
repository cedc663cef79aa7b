//! Panoramic navigation engine for linked 360° photo tours.
//!
//! This crate is compiled to WebAssembly (or linked natively by the headless
//! runner). It owns the full navigation lifecycle: mapping view angles onto a
//! cylindrical image strip, easing rotations, resolving which waypoints are on
//! screen, keeping the compass needle continuous, and sequencing the
//! panorama-to-panorama transitions. The host layer is responsible only for
//! feeding input commands, frame ticks and image-load results into the engine
//! and for applying the resulting [`engine::Action`]s to its render surface.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Navigation state machine ([`engine::ViewerCore`]) and the wasm [`engine::Viewer`] wrapper |
//! | [`tour`] | Panorama graph, panoramas and waypoints |
//! | [`config`] | Viewer configuration and tuning knobs |
//! | [`coords`] | Angle/offset conversion on the wrap-around strip |
//! | [`animator`] | Eased rotation toward a target offset |
//! | [`visibility`] | Waypoint placement, render priority and edge summaries |
//! | [`compass`] | Continuous compass bearing |
//! | [`transition`] | Transition phases and their stages |
//! | [`edge`] | Edge indicator visibility timers |
//! | [`input`] | Input commands consumed by the engine |
//! | [`error`] | Error taxonomy |
//! | [`consts`] | Shared numeric defaults |

pub mod animator;
pub mod compass;
pub mod config;
pub mod consts;
pub mod coords;
pub mod edge;
pub mod engine;
pub mod error;
pub mod input;
pub mod tour;
pub mod transition;
pub mod visibility;
