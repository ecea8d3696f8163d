//! Anchorage - declarative layout constraints
//!
//! This library lets layout relations read like equations. Each element is
//! described through a proxy whose properties relate to anchors of other
//! elements; every relation becomes one active constraint in a layout host.
//!
//! # Example
//!
//! ```rust
//! use anchorage::{Frame, LayoutExt, SolverConfig, SolverHost};
//!
//! let mut host = SolverHost::new(SolverConfig::default());
//! let root = host.add_root("root", Frame::new(0.0, 0.0, 375.0, 667.0)).unwrap();
//! let view = host.add_item("view", root);
//!
//! let constraints = host.layout(view, |p| {
//!     p.top().equal_to(root.top());
//!     p.leading().equal_to(root.leading() + 20.0);
//!     p.trailing().equal_to(root.trailing() - 20.0);
//!     p.height().equal_to(root.height() * 0.1);
//! });
//! assert_eq!(constraints.len(), 4);
//!
//! host.layout_if_needed();
//! assert!((host.frame(view).x - 20.0).abs() < 1e-6);
//! ```

pub mod demo;
pub mod layout;

pub use demo::DemoScene;
pub use layout::{
    swap_active, Constraint, ConstraintSet, Frame, Item, LayoutExt, LayoutHost, Relation,
    SolverConfig, SolverError, SolverHost,
};
