//! Croquis Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Croquis sketch
//! builder. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Points, sizes, bounds and angle helpers ([`geometry`] module)
//! - **Draw**: Stroke/fill definitions, layered SVG output and the
//!   [`draw::Drawable`] trait ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
