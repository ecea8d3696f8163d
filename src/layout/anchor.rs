//! Typed anchors and the capabilities they expose
//!
//! An [`Anchor`] names one attribute of one item. The kind marker keeps
//! horizontal, vertical and size anchors apart, so relating a `top` to a
//! `leading` does not type-check. Dimensions additionally support the
//! constant-only and multiplier forms through [`LayoutDimension`].

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use super::constraint::{Constraint, ConstraintDescriptor, Relation};
use super::host::LayoutHost;
use super::types::{Attribute, Item};

/// Horizontal position anchors: leading, trailing, centerX
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XAxis;

/// Vertical position anchors: top, bottom, centerY
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YAxis;

/// Size anchors: width, height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size;

/// Marker trait implemented by the three anchor kinds
pub trait AnchorKind: Copy + fmt::Debug + Eq + Hash + 'static {}

impl AnchorKind for XAxis {}
impl AnchorKind for YAxis {}
impl AnchorKind for Size {}

/// An untyped anchor, as stored in constraint descriptors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawAnchor {
    pub item: Item,
    pub attribute: Attribute,
}

impl RawAnchor {
    pub fn new(item: Item, attribute: Attribute) -> Self {
        Self { item, attribute }
    }
}

impl fmt::Display for RawAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.item, self.attribute)
    }
}

/// A typed handle to one attribute of one item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor<K: AnchorKind> {
    raw: RawAnchor,
    kind: PhantomData<K>,
}

impl<K: AnchorKind> Anchor<K> {
    fn new(item: Item, attribute: Attribute) -> Self {
        Self {
            raw: RawAnchor::new(item, attribute),
            kind: PhantomData,
        }
    }

    pub fn item(&self) -> Item {
        self.raw.item
    }

    pub fn attribute(&self) -> Attribute {
        self.raw.attribute
    }

    pub fn raw(&self) -> RawAnchor {
        self.raw
    }
}

impl Item {
    pub fn leading(self) -> Anchor<XAxis> {
        Anchor::new(self, Attribute::Leading)
    }

    pub fn trailing(self) -> Anchor<XAxis> {
        Anchor::new(self, Attribute::Trailing)
    }

    pub fn center_x(self) -> Anchor<XAxis> {
        Anchor::new(self, Attribute::CenterX)
    }

    pub fn top(self) -> Anchor<YAxis> {
        Anchor::new(self, Attribute::Top)
    }

    pub fn bottom(self) -> Anchor<YAxis> {
        Anchor::new(self, Attribute::Bottom)
    }

    pub fn center_y(self) -> Anchor<YAxis> {
        Anchor::new(self, Attribute::CenterY)
    }

    pub fn width(self) -> Anchor<Size> {
        Anchor::new(self, Attribute::Width)
    }

    pub fn height(self) -> Anchor<Size> {
        Anchor::new(self, Attribute::Height)
    }
}

/// Relations every anchor supports: `self {=,>=,<=} peer + constant`
///
/// The returned constraint is inactive; activating it is the caller's job.
pub trait LayoutAnchor: Copy {
    fn raw_anchor(&self) -> RawAnchor;

    fn constraint<H: LayoutHost + ?Sized>(
        self,
        host: &mut H,
        relation: Relation,
        peer: Self,
        constant: f64,
    ) -> Constraint {
        host.make_constraint(ConstraintDescriptor::new(
            self.raw_anchor(),
            relation,
            Some(peer.raw_anchor()),
            1.0,
            constant,
        ))
    }
}

/// Extra relations for size anchors
pub trait LayoutDimension: LayoutAnchor {
    /// `self {=,>=,<=} constant`
    fn constant_constraint<H: LayoutHost + ?Sized>(
        self,
        host: &mut H,
        relation: Relation,
        constant: f64,
    ) -> Constraint {
        host.make_constraint(ConstraintDescriptor::new(
            self.raw_anchor(),
            relation,
            None,
            1.0,
            constant,
        ))
    }

    /// `self {=,>=,<=} peer * multiplier + constant`
    fn scaled_constraint<H: LayoutHost + ?Sized>(
        self,
        host: &mut H,
        relation: Relation,
        peer: Self,
        multiplier: f64,
        constant: f64,
    ) -> Constraint {
        host.make_constraint(ConstraintDescriptor::new(
            self.raw_anchor(),
            relation,
            Some(peer.raw_anchor()),
            multiplier,
            constant,
        ))
    }
}

impl<K: AnchorKind> LayoutAnchor for Anchor<K> {
    fn raw_anchor(&self) -> RawAnchor {
        self.raw
    }
}

impl LayoutDimension for Anchor<Size> {}
