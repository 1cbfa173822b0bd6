//! Live adapters that talk to real image generation APIs.

pub mod gemini;
