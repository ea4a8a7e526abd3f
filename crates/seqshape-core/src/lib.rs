//! Seqshape Core Types and Definitions
//!
//! This crate provides the foundational types shared by the seqshape crates:
//!
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Colors**: Pass-through hex colors ([`color::HexColor`])
//! - **Draw**: Positioned shape primitives and the shape sink contract ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
