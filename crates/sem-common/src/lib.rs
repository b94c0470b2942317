//! Common types shared across the SEM snapshot slicer.
//!
//! A spectral-element run is split into processor boxes. Each box owns a
//! block of elements, and each element carries a small grid of
//! Gauss-Lobatto-Legendre (GLL) nodes along every axis. This crate knows how
//! to describe such a run ([`DomainDescriptor`], [`Discretization`]), how to
//! rebuild the node coordinates of every box ([`GridGeometry`]), and which
//! field components exist for each kind of snapshot ([`FieldType`],
//! [`Component`]).

pub mod component;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod gll;
pub mod setup;

pub use component::{Component, Derived, FieldType, Primitive};
pub use domain::{Discretization, DomainDescriptor, LocalElements};
pub use error::{SemError, SemResult};
pub use geometry::{GridGeometry, MapExtent, ProcessorBox};
pub use gll::gll_points;
pub use setup::Setup;
