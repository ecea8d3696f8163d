//! Constraint descriptors, handles, and batch activation

use std::fmt;

use tracing::trace;

use super::anchor::RawAnchor;
use super::host::LayoutHost;
use super::types::Item;

/// Relation between the two sides of a constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Equal,
    GreaterOrEqual,
    LessOrEqual,
}

impl Relation {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// What a host is asked to build:
/// `first {rel} second * multiplier + constant`, or `first {rel} constant`
/// when there is no second anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintDescriptor {
    pub first: RawAnchor,
    pub relation: Relation,
    pub second: Option<RawAnchor>,
    pub multiplier: f64,
    pub constant: f64,
}

impl ConstraintDescriptor {
    pub fn new(
        first: RawAnchor,
        relation: Relation,
        second: Option<RawAnchor>,
        multiplier: f64,
        constant: f64,
    ) -> Self {
        Self {
            first,
            relation,
            second,
            multiplier,
            constant,
        }
    }

    /// Render the descriptor, naming items with `name_of`
    pub fn display_with<F>(&self, name_of: F) -> String
    where
        F: Fn(Item) -> String,
    {
        let first = format!("{}.{}", name_of(self.first.item), self.first.attribute);
        let Some(second) = self.second else {
            return format!("{} {} {}", first, self.relation, self.constant);
        };

        let mut out = format!(
            "{} {} {}.{}",
            first,
            self.relation,
            name_of(second.item),
            second.attribute
        );
        if self.multiplier != 1.0 {
            out.push_str(&format!(" * {}", self.multiplier));
        }
        if self.constant > 0.0 {
            out.push_str(&format!(" + {}", self.constant));
        } else if self.constant < 0.0 {
            out.push_str(&format!(" - {}", -self.constant));
        }
        out
    }
}

impl fmt::Display for ConstraintDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_with(|item| item.to_string()))
    }
}

/// Host-assigned identity of a constraint
///
/// `host` names the host that created the constraint, `index` its slot in
/// that host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId {
    host: u64,
    index: usize,
}

impl ConstraintId {
    pub fn new(host: u64, index: usize) -> Self {
        Self { host, index }
    }

    pub fn host(self) -> u64 {
        self.host
    }

    pub fn index(self) -> usize {
        self.index
    }
}

/// Opaque handle to a constraint created by a host
///
/// The activation flag lives in the host; the handle can be kept and
/// toggled long after the declaration that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    id: ConstraintId,
    descriptor: ConstraintDescriptor,
}

impl Constraint {
    pub fn new(id: ConstraintId, descriptor: ConstraintDescriptor) -> Self {
        Self { id, descriptor }
    }

    pub fn id(&self) -> ConstraintId {
        self.id
    }

    pub fn descriptor(&self) -> &ConstraintDescriptor {
        &self.descriptor
    }

    pub fn activate<H: LayoutHost + ?Sized>(&self, host: &mut H) {
        host.set_active(self, true);
    }

    pub fn deactivate<H: LayoutHost + ?Sized>(&self, host: &mut H) {
        host.set_active(self, false);
    }

    pub fn is_active<H: LayoutHost + ?Sized>(&self, host: &H) -> bool {
        host.is_active(self)
    }
}

/// Batch activation over an ordered sequence of constraints
pub trait ConstraintSet {
    fn activate_all<H: LayoutHost + ?Sized>(&self, host: &mut H);
    fn deactivate_all<H: LayoutHost + ?Sized>(&self, host: &mut H);
    fn all_active<H: LayoutHost + ?Sized>(&self, host: &H) -> bool;
    fn all_inactive<H: LayoutHost + ?Sized>(&self, host: &H) -> bool;
}

impl ConstraintSet for [Constraint] {
    fn activate_all<H: LayoutHost + ?Sized>(&self, host: &mut H) {
        trace!(count = self.len(), "activating constraint set");
        for constraint in self {
            constraint.activate(host);
        }
    }

    fn deactivate_all<H: LayoutHost + ?Sized>(&self, host: &mut H) {
        trace!(count = self.len(), "deactivating constraint set");
        for constraint in self {
            constraint.deactivate(host);
        }
    }

    fn all_active<H: LayoutHost + ?Sized>(&self, host: &H) -> bool {
        self.iter().all(|c| c.is_active(host))
    }

    fn all_inactive<H: LayoutHost + ?Sized>(&self, host: &H) -> bool {
        self.iter().all(|c| !c.is_active(host))
    }
}

/// Replace one active set with another
///
/// `from` is fully deactivated before anything in `to` is activated, so
/// required constraints of the two sets never coexist in the host.
pub fn swap_active<H: LayoutHost + ?Sized>(host: &mut H, from: &[Constraint], to: &[Constraint]) {
    from.deactivate_all(host);
    to.activate_all(host);
}
