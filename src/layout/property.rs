//! Per-attribute constraint accumulators

use tracing::debug;

use super::anchor::{Anchor, AnchorKind};
use super::constraint::{Constraint, Relation};
use super::expr::RelationTarget;
use super::host::LayoutHost;

/// One anchor plus every constraint created through it, in order
#[derive(Debug, Clone)]
pub struct LayoutProperty<K: AnchorKind> {
    anchor: Anchor<K>,
    constraints: Vec<Constraint>,
}

impl<K: AnchorKind> LayoutProperty<K> {
    pub fn new(anchor: Anchor<K>) -> Self {
        Self {
            anchor,
            constraints: Vec::new(),
        }
    }

    pub fn anchor(&self) -> Anchor<K> {
        self.anchor
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Build, activate and record one constraint
    pub fn relate<H, T>(&mut self, host: &mut H, relation: Relation, target: T) -> Constraint
    where
        H: LayoutHost + ?Sized,
        T: RelationTarget<K>,
    {
        let constraint = target.build(host, self.anchor, relation);
        host.set_active(&constraint, true);
        debug!(
            constraint = %constraint.descriptor(),
            "declared constraint"
        );
        self.constraints.push(constraint);
        constraint
    }

    pub fn equal<H, T>(&mut self, host: &mut H, target: T) -> Constraint
    where
        H: LayoutHost + ?Sized,
        T: RelationTarget<K>,
    {
        self.relate(host, Relation::Equal, target)
    }

    pub fn greater_than_or_equal<H, T>(&mut self, host: &mut H, target: T) -> Constraint
    where
        H: LayoutHost + ?Sized,
        T: RelationTarget<K>,
    {
        self.relate(host, Relation::GreaterOrEqual, target)
    }

    pub fn less_than_or_equal<H, T>(&mut self, host: &mut H, target: T) -> Constraint
    where
        H: LayoutHost + ?Sized,
        T: RelationTarget<K>,
    {
        self.relate(host, Relation::LessOrEqual, target)
    }
}

/// A property borrowed from a proxy together with the proxy's host
///
/// This is what `proxy.top()` and friends hand out, so a relation reads as
/// `proxy.top().equal_to(root.top())`.
pub struct PropertyMut<'a, K: AnchorKind, H: LayoutHost + ?Sized> {
    host: &'a mut H,
    property: &'a mut LayoutProperty<K>,
}

impl<'a, K: AnchorKind, H: LayoutHost + ?Sized> PropertyMut<'a, K, H> {
    pub(crate) fn new(host: &'a mut H, property: &'a mut LayoutProperty<K>) -> Self {
        Self { host, property }
    }

    pub fn anchor(&self) -> Anchor<K> {
        self.property.anchor()
    }

    /// Constraints created through this property so far
    pub fn constraints(&self) -> &[Constraint] {
        self.property.constraints()
    }

    pub fn relate<T: RelationTarget<K>>(self, relation: Relation, target: T) -> Constraint {
        self.property.relate(self.host, relation, target)
    }

    pub fn equal_to<T: RelationTarget<K>>(self, target: T) -> Constraint {
        self.relate(Relation::Equal, target)
    }

    pub fn greater_than_or_equal_to<T: RelationTarget<K>>(self, target: T) -> Constraint {
        self.relate(Relation::GreaterOrEqual, target)
    }

    pub fn less_than_or_equal_to<T: RelationTarget<K>>(self, target: T) -> Constraint {
        self.relate(Relation::LessOrEqual, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::config::SolverConfig;
    use crate::layout::expr::{Offset, Scaled};
    use crate::layout::solver::SolverHost;
    use crate::layout::types::{Frame, Item};

    fn host_with_view() -> (SolverHost, Item, Item) {
        let mut host = SolverHost::new(SolverConfig::default());
        let root = host
            .add_root("root", Frame::new(0.0, 0.0, 400.0, 800.0))
            .unwrap();
        let view = host.add_item("view", root);
        (host, root, view)
    }

    #[test]
    fn test_relation_produces_one_active_constraint() {
        let (mut host, root, view) = host_with_view();
        let mut property = LayoutProperty::new(view.top());

        let constraint = property.equal(&mut host, root.top());

        assert_eq!(property.constraints(), &[constraint]);
        assert!(constraint.is_active(&host));
        assert_eq!(constraint.descriptor().relation, Relation::Equal);
    }

    #[test]
    fn test_constraints_recorded_in_order() {
        let (mut host, root, view) = host_with_view();
        let mut property = LayoutProperty::new(view.width());

        let a = property.greater_than_or_equal(&mut host, 10.0);
        let b = property.less_than_or_equal(&mut host, root.width() * 0.5);
        let c = property.equal(&mut host, root.width() - 40.0);

        assert_eq!(property.constraints(), &[a, b, c]);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_offset_sugar_matches_direct_constant() {
        let (mut host, root, view) = host_with_view();
        let mut property = LayoutProperty::new(view.leading());

        for c in [0.0, 20.0, -20.0, 3.5] {
            let sugar_add = property.equal(&mut host, root.leading() + c);
            let sugar_sub = property.equal(&mut host, root.leading() - c);
            let direct_add = property.equal(&mut host, Offset::new(root.leading(), c));
            let direct_sub = property.equal(&mut host, Offset::new(root.leading(), -c));
            assert_eq!(sugar_add.descriptor(), direct_add.descriptor());
            assert_eq!(sugar_sub.descriptor(), direct_sub.descriptor());
            assert_eq!(sugar_add.descriptor().constant, c);
            assert_eq!(sugar_sub.descriptor().constant, -c);
        }
    }

    #[test]
    fn test_multiplier_sugar_matches_direct_call() {
        let (mut host, root, view) = host_with_view();
        let mut property = LayoutProperty::new(view.height());

        let sugar = property.equal(&mut host, root.height() * 0.25 + 12.0);
        let direct = property.equal(&mut host, Scaled::new(root.height(), 0.25, 12.0));

        assert_eq!(sugar.descriptor(), direct.descriptor());
        assert_eq!(sugar.descriptor().multiplier, 0.25);
        assert_eq!(sugar.descriptor().constant, 12.0);
    }

    #[test]
    fn test_constant_form_has_no_peer() {
        let (mut host, _root, view) = host_with_view();
        let mut property = LayoutProperty::new(view.height());

        let constraint = property.equal(&mut host, 80.0);

        assert_eq!(constraint.descriptor().second, None);
        assert_eq!(constraint.descriptor().constant, 80.0);
        assert_eq!(constraint.descriptor().multiplier, 1.0);
    }
}
