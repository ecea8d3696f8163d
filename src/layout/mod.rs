//! Declarative layout constraints
//!
//! Elements are described one at a time through a [`LayoutProxy`]: each
//! attribute relates to an anchor of another element, optionally offset by
//! a constant or (for sizes) scaled by a multiplier. Constraints are built
//! and activated by a [`LayoutHost`]; [`SolverHost`] is the kasuari-backed
//! host shipped with this crate.

pub mod anchor;
pub mod config;
pub mod constraint;
pub mod expr;
pub mod host;
pub mod property;
pub mod proxy;
pub mod solver;
pub mod types;

pub use anchor::{Anchor, AnchorKind, LayoutAnchor, LayoutDimension, RawAnchor, Size, XAxis, YAxis};
pub use config::{ConfigError, Priority, SolverConfig};
pub use constraint::{
    swap_active, Constraint, ConstraintDescriptor, ConstraintId, ConstraintSet, Relation,
};
pub use expr::{Offset, RelationTarget, Scaled};
pub use host::LayoutHost;
pub use property::{LayoutProperty, PropertyMut};
pub use proxy::{LayoutExt, LayoutProxy};
pub use solver::{SolverError, SolverHost};
pub use types::*;
