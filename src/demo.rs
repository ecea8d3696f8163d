//! Demonstration scene
//!
//! Three views on one root: a banner pinned under the safe area, a box
//! centered in the root, and a box that moves between the bottom of the
//! safe area and the space below the centered box by swapping two
//! constraint sets.

use crate::layout::{
    swap_active, Constraint, ConstraintSet, Frame, Item, LayoutExt, SolverError, SolverHost,
};

/// Items and constraint sets of the demo scene
#[derive(Debug, Clone)]
pub struct DemoScene {
    pub root: Item,
    pub banner: Item,
    pub centered: Item,
    pub mover: Item,
    /// Keeps `mover` at the bottom of the safe area
    pub bottom_layout: Vec<Constraint>,
    /// Keeps `mover` just below `centered`
    pub stacked_layout: Vec<Constraint>,
    stacked: bool,
}

impl DemoScene {
    /// Build the scene inside a new root of the given frame
    pub fn build(host: &mut SolverHost, frame: Frame) -> Result<Self, SolverError> {
        let root = host.add_root("root", frame)?;
        let safe_area = host.safe_area(root);

        let banner = host.add_item("banner", root);
        host.layout(banner, |p| {
            p.top().equal_to(safe_area.top());
            p.leading().equal_to(root.leading() + 20.0);
            p.trailing().equal_to(root.trailing() - 20.0);
            p.height().equal_to(root.height() * 0.1);
        });

        let centered = host.add_item("centered", root);
        host.layout(centered, |p| {
            let height = p.item().height();
            p.center_x().equal_to(root.center_x());
            p.center_y().equal_to(root.center_y());
            p.height().equal_to(80.0);
            p.width().equal_to(height + 100.0);
        });

        let mover = host.add_item("mover", root);
        // Declared constraints start active. The stacked set is declared
        // and switched off before the bottom set exists, so the two never
        // conflict.
        let stacked_layout = host.returned_layout(mover, |p| {
            let height = p.item().height();
            vec![
                p.top().equal_to(centered.bottom()),
                p.center_x().equal_to(root.center_x()),
                p.height().equal_to(80.0),
                p.width().equal_to(height + 100.0),
            ]
        });
        stacked_layout.deactivate_all(host);

        let bottom_layout = host.returned_layout(mover, |p| {
            let height = p.item().height();
            vec![
                p.center_x().equal_to(root.center_x()),
                p.bottom().equal_to(safe_area.bottom()),
                p.height().equal_to(80.0),
                p.width().equal_to(height + 100.0),
            ]
        });

        Ok(Self {
            root,
            banner,
            centered,
            mover,
            bottom_layout,
            stacked_layout,
            stacked: false,
        })
    }

    /// Whether `mover` currently sits below `centered`
    pub fn is_stacked(&self) -> bool {
        self.stacked
    }

    /// Swap the active set of `mover` and run a layout pass
    pub fn toggle(&mut self, host: &mut SolverHost) {
        if self.stacked {
            swap_active(host, &self.stacked_layout, &self.bottom_layout);
        } else {
            swap_active(host, &self.bottom_layout, &self.stacked_layout);
        }
        self.stacked = !self.stacked;
        host.layout_if_needed();
    }

    /// Frames of the three views, by name
    pub fn frames(&self, host: &SolverHost) -> Vec<(String, Frame)> {
        [self.banner, self.centered, self.mover]
            .into_iter()
            .map(|item| (host.name(item), host.frame(item)))
            .collect()
    }
}
