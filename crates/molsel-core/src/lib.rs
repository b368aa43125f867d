//! # molsel
//!
//! A library for modeling molecular structures as composable, indexable
//! selections over shared coordinate storage, with deduplicated typing of
//! atoms by their physicochemical attributes.
//!
//! ## Architectural Philosophy
//!
//! The library sits between an external structural-chemistry engine (which
//! supplies coordinates, bonds, and feature annotations) and downstream
//! analysis code, and is built around two commitments:
//!
//! - **Aliasing correctness.** Positions live once, in a shared
//!   [`core::models::coords::CoordBuffer`]; atoms and every view derived
//!   from them read and write through buffer slots, so a mutation made
//!   through any holder is immediately visible through all of them.
//!
//! - **Selections over copies.** Bonds, angles, and feature groups are
//!   [`core::models::selection::IndexedSelection`]s: ordered index lists
//!   into a shared parent, validated eagerly and composable (a selection of
//!   a selection resolves back onto the same parent).
//!
//! External engines are reached exclusively through the
//! [`core::source::traits::MoleculeSource`] capability trait; the crate
//! performs no force-field computation, no geometry optimization, and no
//! structure file I/O of its own.

pub mod core;
