//! # Core Models Module
//!
//! This module contains the data structures used to represent molecular
//! structures as composable, indexable views over shared coordinate storage.
//!
//! ## Overview
//!
//! Many logical entities (atoms, bonds, angles, discovered features) need to
//! reference the same positions without copying them. The models here make
//! that sharing explicit:
//!
//! - **Shared positions** - one buffer owns the coordinates; everything else
//!   aliases slots in it
//! - **Composable views** - arbitrary named subsets of atoms are grouped and
//!   retrieved as index-defined selections
//! - **Deduplicated typing** - physicochemical classifications are attribute
//!   bags registered once per distinct attribute set
//!
//! ## Key Components
//!
//! - [`coords`] - The shared coordinate buffer and the owned/aliased point handle
//! - [`atom`] - A point plus an optional physicochemical classification
//! - [`typing`] - Attribute-bag atom types and the conflict-checked type registry
//! - [`selection`] - Index-defined views over shared collections and their containers
//! - [`molecule`] - The aggregate of atoms, bonds, angles, and feature groupings

pub mod atom;
pub mod coords;
pub mod molecule;
pub mod selection;
pub mod typing;
