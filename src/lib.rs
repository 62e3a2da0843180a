//! Match Summary - post-match camera choreography
//!
//! Sequences timed camera shots over the participants of a finished (or
//! about-to-start) match, eases the camera between framings and tells the UI
//! which overlay elements may show.

pub mod camera;
pub mod core;
pub mod roster;
pub mod summary;
