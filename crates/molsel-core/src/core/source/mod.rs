//! Defines the boundary to external chemistry engines.
//!
//! Molecules can be materialized from externally-owned representations
//! (structure, bond graph, conformations, feature annotations). This module
//! specifies the capability set such a representation must provide
//! ([`traits::MoleculeSource`]), the per-atom attribute record it must fill
//! in ([`attributes::AtomAttributes`]), and the feature-discovery data and
//! configuration types ([`features`]). No concrete engine binding lives in
//! this crate; consumers implement the trait over their engine of choice.

pub mod attributes;
pub mod features;
pub mod traits;
