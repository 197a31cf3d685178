//! Integration test crate for FrameStudio.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on multiple framestudio crates to verify they work together.

#[cfg(test)]
mod timeline;

#[cfg(test)]
mod frames;

#[cfg(test)]
mod session;
