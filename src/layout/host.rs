//! The contract a layout host provides to the DSL

use super::constraint::{Constraint, ConstraintDescriptor};
use super::types::Item;

/// A layout subsystem that can build and toggle constraints
///
/// The DSL never solves anything itself. It shapes descriptors, hands them
/// to the host, and flips activation flags.
pub trait LayoutHost {
    /// Build a constraint from `descriptor`. The result starts inactive.
    fn make_constraint(&mut self, descriptor: ConstraintDescriptor) -> Constraint;

    fn set_active(&mut self, constraint: &Constraint, active: bool);

    fn is_active(&self, constraint: &Constraint) -> bool;

    /// The element `item` lives in, if it is attached to one
    fn container(&self, item: Item) -> Option<Item>;

    /// Called once before a declaration block runs for `item`
    fn prepare_for_layout(&mut self, _item: Item) {}
}
