//! # Core Module
//!
//! This module provides the building blocks for representing molecular
//! structures as selections over shared coordinate storage, together with
//! the boundary through which external chemistry engines feed them.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Coordinate buffers, aliased
//!   points, atoms, attribute-bag typing, selections, and the molecule
//!   aggregate
//! - **External Sources** ([`source`]) - The capability trait an external
//!   chemistry engine implements to materialize molecules and discover
//!   chemical features
//! - **Utilities** ([`utils`]) - Element tables and geometric predicates

pub mod models;
pub mod source;
pub mod utils;
