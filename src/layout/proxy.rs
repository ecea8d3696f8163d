//! Layout proxy and the declaration entry points
//!
//! A [`LayoutProxy`] describes one element. It hands out one property per
//! attribute, realized on first access, and collects every constraint made
//! through them. [`LayoutExt`] wraps a proxy in the two declaration modes
//! and the container helpers.

use tracing::debug;

use super::anchor::{Anchor, AnchorKind, Size, XAxis, YAxis};
use super::constraint::Constraint;
use super::host::LayoutHost;
use super::property::{LayoutProperty, PropertyMut};
use super::types::{Attribute, Item};

/// Declaration-scoped view of one element's eight attributes
pub struct LayoutProxy<'h, H: LayoutHost + ?Sized> {
    host: &'h mut H,
    item: Item,
    leading: Option<LayoutProperty<XAxis>>,
    trailing: Option<LayoutProperty<XAxis>>,
    top: Option<LayoutProperty<YAxis>>,
    bottom: Option<LayoutProperty<YAxis>>,
    width: Option<LayoutProperty<Size>>,
    height: Option<LayoutProperty<Size>>,
    center_x: Option<LayoutProperty<XAxis>>,
    center_y: Option<LayoutProperty<YAxis>>,
    /// Attributes in the order their properties were first touched
    realized: Vec<Attribute>,
}

fn realize<'p, K: AnchorKind>(
    slot: &'p mut Option<LayoutProperty<K>>,
    realized: &mut Vec<Attribute>,
    anchor: Anchor<K>,
) -> &'p mut LayoutProperty<K> {
    slot.get_or_insert_with(|| {
        realized.push(anchor.attribute());
        LayoutProperty::new(anchor)
    })
}

impl<'h, H: LayoutHost + ?Sized> LayoutProxy<'h, H> {
    pub fn new(host: &'h mut H, item: Item) -> Self {
        Self {
            host,
            item,
            leading: None,
            trailing: None,
            top: None,
            bottom: None,
            width: None,
            height: None,
            center_x: None,
            center_y: None,
            realized: Vec::new(),
        }
    }

    /// The element this proxy describes
    ///
    /// Use it to relate one attribute to another of the same element:
    /// `let height = proxy.item().height(); proxy.width().equal_to(height + 100.0);`
    pub fn item(&self) -> Item {
        self.item
    }

    pub fn leading(&mut self) -> PropertyMut<'_, XAxis, H> {
        let property = realize(&mut self.leading, &mut self.realized, self.item.leading());
        PropertyMut::new(&mut *self.host, property)
    }

    pub fn trailing(&mut self) -> PropertyMut<'_, XAxis, H> {
        let property = realize(&mut self.trailing, &mut self.realized, self.item.trailing());
        PropertyMut::new(&mut *self.host, property)
    }

    pub fn top(&mut self) -> PropertyMut<'_, YAxis, H> {
        let property = realize(&mut self.top, &mut self.realized, self.item.top());
        PropertyMut::new(&mut *self.host, property)
    }

    pub fn bottom(&mut self) -> PropertyMut<'_, YAxis, H> {
        let property = realize(&mut self.bottom, &mut self.realized, self.item.bottom());
        PropertyMut::new(&mut *self.host, property)
    }

    pub fn width(&mut self) -> PropertyMut<'_, Size, H> {
        let property = realize(&mut self.width, &mut self.realized, self.item.width());
        PropertyMut::new(&mut *self.host, property)
    }

    pub fn height(&mut self) -> PropertyMut<'_, Size, H> {
        let property = realize(&mut self.height, &mut self.realized, self.item.height());
        PropertyMut::new(&mut *self.host, property)
    }

    pub fn center_x(&mut self) -> PropertyMut<'_, XAxis, H> {
        let property = realize(&mut self.center_x, &mut self.realized, self.item.center_x());
        PropertyMut::new(&mut *self.host, property)
    }

    pub fn center_y(&mut self) -> PropertyMut<'_, YAxis, H> {
        let property = realize(&mut self.center_y, &mut self.realized, self.item.center_y());
        PropertyMut::new(&mut *self.host, property)
    }

    /// Attributes touched so far, in first-access order
    pub fn realized(&self) -> &[Attribute] {
        &self.realized
    }

    fn property_constraints(&self, attribute: Attribute) -> &[Constraint] {
        let constraints = match attribute {
            Attribute::Leading => self.leading.as_ref().map(LayoutProperty::constraints),
            Attribute::Trailing => self.trailing.as_ref().map(LayoutProperty::constraints),
            Attribute::Top => self.top.as_ref().map(LayoutProperty::constraints),
            Attribute::Bottom => self.bottom.as_ref().map(LayoutProperty::constraints),
            Attribute::Width => self.width.as_ref().map(LayoutProperty::constraints),
            Attribute::Height => self.height.as_ref().map(LayoutProperty::constraints),
            Attribute::CenterX => self.center_x.as_ref().map(LayoutProperty::constraints),
            Attribute::CenterY => self.center_y.as_ref().map(LayoutProperty::constraints),
        };
        constraints.unwrap_or(&[])
    }

    /// Every constraint created through this proxy
    ///
    /// Constraints of one attribute stay together and in declaration order;
    /// attributes follow first-access order.
    pub fn constraints(&self) -> Vec<Constraint> {
        self.realized
            .iter()
            .flat_map(|&attribute| self.property_constraints(attribute).iter().copied())
            .collect()
    }
}

/// Declarative layout on any host
pub trait LayoutExt: LayoutHost {
    /// Run `declare` against a proxy for `item` and return every
    /// constraint it created
    fn layout<F>(&mut self, item: Item, declare: F) -> Vec<Constraint>
    where
        F: FnOnce(&mut LayoutProxy<'_, Self>);

    /// Run `declare` and return exactly the constraints it returns
    ///
    /// Constraints created but not returned stay active in the host; they
    /// are just not handed back.
    fn returned_layout<F>(&mut self, item: Item, declare: F) -> Vec<Constraint>
    where
        F: FnOnce(&mut LayoutProxy<'_, Self>) -> Vec<Constraint>;

    /// Pin all four edges of `item` to its container's edges
    fn constrain_edges_to_container(&mut self, item: Item) -> Option<Vec<Constraint>>;

    /// Center `item` in its container
    fn constrain_center_to_container(&mut self, item: Item) -> Option<Vec<Constraint>>;

    /// Pin all four edges of `item` to the edges of `other`
    fn constrain_edges(&mut self, item: Item, other: Item) -> Vec<Constraint>;
}

impl<H: LayoutHost + ?Sized> LayoutExt for H {
    fn layout<F>(&mut self, item: Item, declare: F) -> Vec<Constraint>
    where
        F: FnOnce(&mut LayoutProxy<'_, Self>),
    {
        self.prepare_for_layout(item);
        let mut proxy = LayoutProxy::new(self, item);
        declare(&mut proxy);
        let constraints = proxy.constraints();
        debug!(item = %item, count = constraints.len(), "layout declared");
        constraints
    }

    fn returned_layout<F>(&mut self, item: Item, declare: F) -> Vec<Constraint>
    where
        F: FnOnce(&mut LayoutProxy<'_, Self>) -> Vec<Constraint>,
    {
        self.prepare_for_layout(item);
        let mut proxy = LayoutProxy::new(self, item);
        let returned = declare(&mut proxy);
        debug!(
            item = %item,
            created = proxy.constraints().len(),
            returned = returned.len(),
            "layout declared"
        );
        returned
    }

    fn constrain_edges_to_container(&mut self, item: Item) -> Option<Vec<Constraint>> {
        let container = self.container(item)?;
        Some(self.constrain_edges(item, container))
    }

    fn constrain_center_to_container(&mut self, item: Item) -> Option<Vec<Constraint>> {
        let container = self.container(item)?;
        Some(self.layout(item, |p| {
            p.center_x().equal_to(container.center_x());
            p.center_y().equal_to(container.center_y());
        }))
    }

    fn constrain_edges(&mut self, item: Item, other: Item) -> Vec<Constraint> {
        self.layout(item, |p| {
            p.top().equal_to(other.top());
            p.bottom().equal_to(other.bottom());
            p.leading().equal_to(other.leading());
            p.trailing().equal_to(other.trailing());
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::layout::config::SolverConfig;
    use crate::layout::constraint::{ConstraintDescriptor, ConstraintId, ConstraintSet, Relation};
    use crate::layout::solver::SolverHost;
    use crate::layout::types::Frame;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Call {
        Prepare(Item),
        /// Id and whether the new constraint was active when returned
        Make(ConstraintId, bool),
        SetActive(ConstraintId, bool),
    }

    /// Host that only records what the DSL asks of it
    #[derive(Default)]
    struct RecordingHost {
        calls: Vec<Call>,
        active: Vec<bool>,
    }

    impl LayoutHost for RecordingHost {
        fn make_constraint(&mut self, descriptor: ConstraintDescriptor) -> Constraint {
            let id = ConstraintId::new(0, self.active.len());
            self.active.push(false);
            self.calls.push(Call::Make(id, false));
            Constraint::new(id, descriptor)
        }

        fn set_active(&mut self, constraint: &Constraint, active: bool) {
            self.active[constraint.id().index()] = active;
            self.calls.push(Call::SetActive(constraint.id(), active));
        }

        fn is_active(&self, constraint: &Constraint) -> bool {
            self.active[constraint.id().index()]
        }

        fn container(&self, _item: Item) -> Option<Item> {
            None
        }

        fn prepare_for_layout(&mut self, item: Item) {
            self.calls.push(Call::Prepare(item));
        }
    }

    fn prepare_count(host: &RecordingHost) -> usize {
        host.calls
            .iter()
            .filter(|c| matches!(c, Call::Prepare(_)))
            .count()
    }

    /// Each constraint is made inactive and switched on right away
    fn assert_made_then_activated(host: &RecordingHost, constraints: &[Constraint]) {
        for constraint in constraints {
            let id = constraint.id();
            let at = host
                .calls
                .iter()
                .position(|c| *c == Call::Make(id, false))
                .expect("constraint should be made by the host");
            assert_eq!(host.calls[at + 1], Call::SetActive(id, true));
            assert!(constraint.is_active(host));
        }
    }

    fn setup() -> (SolverHost, Item, Item) {
        let mut host = SolverHost::new(SolverConfig::default());
        let root = host
            .add_root("root", Frame::new(0.0, 0.0, 375.0, 667.0))
            .unwrap();
        let view = host.add_item("view", root);
        (host, root, view)
    }

    #[test]
    fn test_properties_realized_lazily_once() {
        let (mut host, root, view) = setup();
        let mut proxy = LayoutProxy::new(&mut host, view);
        assert!(proxy.realized().is_empty());

        proxy.height().equal_to(80.0);
        proxy.top().equal_to(root.top());
        proxy.height().less_than_or_equal_to(root.height());

        assert_eq!(proxy.realized(), &[Attribute::Height, Attribute::Top]);
    }

    #[test]
    fn test_imperative_layout_groups_by_first_access() {
        let (mut host, root, view) = setup();

        let mut declared = Vec::new();
        let constraints = host.layout(view, |p| {
            declared.push(p.top().equal_to(root.top()));
            declared.push(p.leading().equal_to(root.leading() + 20.0));
            declared.push(p.top().greater_than_or_equal_to(root.top() + 4.0));
            declared.push(p.height().equal_to(40.0));
        });

        assert_eq!(constraints.len(), 4);
        assert_eq!(
            constraints,
            vec![declared[0], declared[2], declared[1], declared[3]]
        );
        assert!(constraints.all_active(&host));
    }

    #[test]
    fn test_empty_declaration_returns_nothing() {
        let (mut host, _root, view) = setup();
        let constraints = host.layout(view, |_| {});
        assert!(constraints.is_empty());
    }

    #[test]
    fn test_returned_layout_returns_exact_sequence() {
        let (mut host, root, view) = setup();

        let mut extra = None;
        let constraints = host.returned_layout(view, |p| {
            let top = p.top().equal_to(root.top());
            extra = Some(p.width().equal_to(100.0));
            let leading = p.leading().equal_to(root.leading());
            vec![leading, top]
        });

        assert_eq!(constraints.len(), 2);
        assert_eq!(constraints[0].descriptor().first, view.leading().raw());
        assert_eq!(constraints[1].descriptor().first, view.top().raw());
        let extra = extra.unwrap();
        assert!(!constraints.contains(&extra));
        assert!(extra.is_active(&host));
    }

    #[test]
    fn test_same_element_relation() {
        let (mut host, _root, view) = setup();

        let constraints = host.layout(view, |p| {
            let height = p.item().height();
            p.height().equal_to(80.0);
            p.width().equal_to(height + 100.0);
        });

        let width = constraints[1].descriptor();
        assert_eq!(width.first, view.width().raw());
        assert_eq!(width.second, Some(view.height().raw()));
        assert_eq!(width.relation, Relation::Equal);
        assert_eq!(width.constant, 100.0);
    }

    #[test]
    fn test_container_helpers_need_a_container() {
        let (mut host, root, _view) = setup();
        assert!(host.constrain_edges_to_container(root).is_none());
        assert!(host.constrain_center_to_container(root).is_none());
    }

    #[test]
    fn test_constrain_edges_to_container() {
        let (mut host, root, view) = setup();

        let constraints = host.constrain_edges_to_container(view).unwrap();

        let firsts: Vec<_> = constraints
            .iter()
            .map(|c| c.descriptor().first.attribute)
            .collect();
        assert_eq!(
            firsts,
            vec![
                Attribute::Top,
                Attribute::Bottom,
                Attribute::Leading,
                Attribute::Trailing
            ]
        );
        assert!(constraints
            .iter()
            .all(|c| c.descriptor().second.map(|a| a.item) == Some(root)));
    }

    #[test]
    fn test_constrain_center_to_container() {
        let (mut host, root, view) = setup();

        let constraints = host.constrain_center_to_container(view).unwrap();

        assert_eq!(constraints.len(), 2);
        assert_eq!(
            constraints[0].descriptor().second,
            Some(root.center_x().raw())
        );
        assert_eq!(
            constraints[1].descriptor().second,
            Some(root.center_y().raw())
        );
    }

    #[test]
    fn test_layout_prepares_once_before_making_constraints() {
        let mut host = RecordingHost::default();
        let root = Item::from_index(0);
        let view = Item::from_index(1);

        let constraints = host.layout(view, |p| {
            p.top().equal_to(root.top() + 8.0);
            p.width().equal_to(120.0);
            p.top().less_than_or_equal_to(root.bottom());
        });

        assert_eq!(constraints.len(), 3);
        assert_eq!(prepare_count(&host), 1);
        assert_eq!(host.calls[0], Call::Prepare(view));
        assert_made_then_activated(&host, &constraints);
    }

    #[test]
    fn test_returned_layout_prepares_once_before_making_constraints() {
        let mut host = RecordingHost::default();
        let root = Item::from_index(0);
        let view = Item::from_index(1);

        let constraints = host.returned_layout(view, |p| {
            vec![
                p.leading().equal_to(root.leading()),
                p.height().greater_than_or_equal_to(root.height() * 0.5),
            ]
        });

        assert_eq!(constraints.len(), 2);
        assert_eq!(prepare_count(&host), 1);
        assert_eq!(host.calls[0], Call::Prepare(view));
        assert_made_then_activated(&host, &constraints);
    }

    #[test]
    fn test_each_declaration_prepares_its_item() {
        let mut host = RecordingHost::default();
        let first = Item::from_index(1);
        let second = Item::from_index(2);

        host.layout(first, |_| {});
        host.returned_layout(second, |p| vec![p.width().equal_to(10.0)]);

        let prepared: Vec<_> = host
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Prepare(item) => Some(*item),
                _ => None,
            })
            .collect();
        assert_eq!(prepared, vec![first, second]);
    }

    #[test]
    fn test_container_helpers_on_detached_host() {
        let mut host = RecordingHost::default();
        let view = Item::from_index(1);
        assert!(host.constrain_edges_to_container(view).is_none());
        assert!(host.calls.is_empty());
    }
}
