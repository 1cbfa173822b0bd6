//! Implementations of the `ImageGenerator` port.
//!
//! - `live/` — Gemini API over HTTPS
//! - `recording/` — delegate to a live adapter and log each settled call
//! - `replaying/` — answer from a cassette, matched by style

pub mod live;
pub mod recording;
pub mod replaying;
