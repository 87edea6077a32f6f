// SPDX-License-Identifier: AGPL-3.0-or-later
//! Rove engine
//!
//! Ties the filesystem layer, the preference store and the navigation and clipboard
//! state machines together behind one [`Engine`] value that a front end drives.

mod config;
mod engine;


pub use config::EngineConfig;
pub use engine::Engine;
