//! Arithmetic sugar for the right-hand side of a relation
//!
//! `root.leading() + 20.0` builds an [`Offset`], `root.height() * 0.1`
//! builds a [`Scaled`]. Both are consumed by the relation methods on
//! properties through [`RelationTarget`]. A bare `f64` is a target only
//! for size anchors.

use std::ops::{Add, Mul, Sub};

use super::anchor::{Anchor, AnchorKind, LayoutAnchor, LayoutDimension, Size};
use super::constraint::{Constraint, Relation};
use super::host::LayoutHost;

/// A peer anchor shifted by a constant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset<K: AnchorKind> {
    pub anchor: Anchor<K>,
    pub constant: f64,
}

impl<K: AnchorKind> Offset<K> {
    pub fn new(anchor: Anchor<K>, constant: f64) -> Self {
        Self { anchor, constant }
    }
}

/// A peer size anchor scaled by a multiplier, then shifted by a constant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaled {
    pub anchor: Anchor<Size>,
    pub multiplier: f64,
    pub constant: f64,
}

impl Scaled {
    pub fn new(anchor: Anchor<Size>, multiplier: f64, constant: f64) -> Self {
        Self {
            anchor,
            multiplier,
            constant,
        }
    }
}

/// Anything that can sit on the right-hand side of a relation on an
/// anchor of kind `K`
pub trait RelationTarget<K: AnchorKind> {
    fn build<H: LayoutHost + ?Sized>(
        self,
        host: &mut H,
        anchor: Anchor<K>,
        relation: Relation,
    ) -> Constraint;
}

impl<K: AnchorKind> RelationTarget<K> for Anchor<K> {
    fn build<H: LayoutHost + ?Sized>(
        self,
        host: &mut H,
        anchor: Anchor<K>,
        relation: Relation,
    ) -> Constraint {
        anchor.constraint(host, relation, self, 0.0)
    }
}

impl<K: AnchorKind> RelationTarget<K> for Offset<K> {
    fn build<H: LayoutHost + ?Sized>(
        self,
        host: &mut H,
        anchor: Anchor<K>,
        relation: Relation,
    ) -> Constraint {
        anchor.constraint(host, relation, self.anchor, self.constant)
    }
}

impl RelationTarget<Size> for Scaled {
    fn build<H: LayoutHost + ?Sized>(
        self,
        host: &mut H,
        anchor: Anchor<Size>,
        relation: Relation,
    ) -> Constraint {
        anchor.scaled_constraint(host, relation, self.anchor, self.multiplier, self.constant)
    }
}

impl RelationTarget<Size> for f64 {
    fn build<H: LayoutHost + ?Sized>(
        self,
        host: &mut H,
        anchor: Anchor<Size>,
        relation: Relation,
    ) -> Constraint {
        anchor.constant_constraint(host, relation, self)
    }
}

impl<K: AnchorKind> Add<f64> for Anchor<K> {
    type Output = Offset<K>;

    fn add(self, constant: f64) -> Offset<K> {
        Offset::new(self, constant)
    }
}

impl<K: AnchorKind> Sub<f64> for Anchor<K> {
    type Output = Offset<K>;

    fn sub(self, constant: f64) -> Offset<K> {
        Offset::new(self, -constant)
    }
}

impl<K: AnchorKind> Add<f64> for Offset<K> {
    type Output = Offset<K>;

    fn add(self, constant: f64) -> Offset<K> {
        Offset::new(self.anchor, self.constant + constant)
    }
}

impl<K: AnchorKind> Sub<f64> for Offset<K> {
    type Output = Offset<K>;

    fn sub(self, constant: f64) -> Offset<K> {
        Offset::new(self.anchor, self.constant - constant)
    }
}

impl Mul<f64> for Anchor<Size> {
    type Output = Scaled;

    fn mul(self, multiplier: f64) -> Scaled {
        Scaled::new(self, multiplier, 0.0)
    }
}

impl Mul<Anchor<Size>> for f64 {
    type Output = Scaled;

    fn mul(self, anchor: Anchor<Size>) -> Scaled {
        Scaled::new(anchor, self, 0.0)
    }
}

impl Add<f64> for Scaled {
    type Output = Scaled;

    fn add(self, constant: f64) -> Scaled {
        Scaled::new(self.anchor, self.multiplier, self.constant + constant)
    }
}

impl Sub<f64> for Scaled {
    type Output = Scaled;

    fn sub(self, constant: f64) -> Scaled {
        Scaled::new(self.anchor, self.multiplier, self.constant - constant)
    }
}
