//! Constraint solver host
//!
//! This module provides a [`LayoutHost`] backed by the kasuari Cassowary
//! solver. It owns an element tree, translates anchors into solver
//! expressions, installs constraints as they are activated and reports
//! constraints that cannot be satisfied.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use kasuari::{
    AddConstraintError, Constraint as KasuariConstraint, Expression, Solver as KasuariSolver,
    Variable as KasuariVariable, WeightedRelation::*,
};
use thiserror::Error;
use tracing::{debug, trace, warn};

use super::anchor::RawAnchor;
use super::config::SolverConfig;
use super::constraint::{Constraint, ConstraintDescriptor, ConstraintId, Relation};
use super::host::LayoutHost;
use super::proxy::LayoutExt;
use super::types::{Attribute, Frame, Item};

/// Errors from solver host operations
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("Unsatisfiable constraint {constraint}: {reason}")]
    Unsatisfiable { constraint: String, reason: String },

    #[error("Item '{name}' is not a root")]
    NotARoot { name: String },

    #[error("Internal solver error: {0}")]
    Internal(String),
}

/// Solver variables backing one item
#[derive(Debug, Clone, Copy)]
struct ItemVariables {
    x: KasuariVariable,
    y: KasuariVariable,
    width: KasuariVariable,
    height: KasuariVariable,
}

impl ItemVariables {
    fn new() -> Self {
        Self {
            x: KasuariVariable::new(),
            y: KasuariVariable::new(),
            width: KasuariVariable::new(),
            height: KasuariVariable::new(),
        }
    }

    fn all(&self) -> [KasuariVariable; 4] {
        [self.x, self.y, self.width, self.height]
    }
}

#[derive(Debug, Clone)]
struct ItemEntry {
    name: String,
    container: Option<Item>,
    is_root: bool,
}

/// Host-side state of one constraint
struct ConstraintRecord {
    descriptor: ConstraintDescriptor,
    active: bool,
    /// The solver constraint, while it is installed
    installed: Option<KasuariConstraint>,
}

static NEXT_HOST_ID: AtomicU64 = AtomicU64::new(1);

/// Layout host backed by kasuari
pub struct SolverHost {
    /// Stamped into every constraint id this host hands out
    id: u64,
    solver: KasuariSolver,
    config: SolverConfig,
    items: Vec<ItemEntry>,
    /// Maps items to their solver variables, created on first use
    variables: HashMap<Item, ItemVariables>,
    records: Vec<ConstraintRecord>,
    safe_areas: HashMap<Item, Item>,
    /// Values as of the last layout pass
    values: HashMap<KasuariVariable, f64>,
}

impl SolverHost {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            id: NEXT_HOST_ID.fetch_add(1, Ordering::Relaxed),
            solver: KasuariSolver::new(),
            config,
            items: Vec::new(),
            variables: HashMap::new(),
            records: Vec::new(),
            safe_areas: HashMap::new(),
            values: HashMap::new(),
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn constraint_id(&self, index: usize) -> ConstraintId {
        ConstraintId::new(self.id, index)
    }

    /// The record behind a handle, if this host created it
    fn record(&self, constraint: &Constraint) -> Option<&ConstraintRecord> {
        let id = constraint.id();
        if id.host() != self.id {
            return None;
        }
        self.records.get(id.index())
    }

    fn push_item(&mut self, name: String, container: Option<Item>, is_root: bool) -> Item {
        let item = Item::from_index(self.items.len());
        self.items.push(ItemEntry {
            name,
            container,
            is_root,
        });
        item
    }

    /// Add a top-level item whose frame is held by edit variables
    pub fn add_root(&mut self, name: impl Into<String>, frame: Frame) -> Result<Item, SolverError> {
        let item = self.push_item(name.into(), None, true);
        let strength = self.config.root_priority.strength();
        for var in self.variables_for(item).all() {
            self.solver
                .add_edit_variable(var, strength)
                .map_err(|e| SolverError::Internal(format!("Failed to add edit variable: {}", e)))?;
        }
        self.set_root_frame(item, frame)?;
        Ok(item)
    }

    /// Suggest a new frame for a root item
    pub fn set_root_frame(&mut self, root: Item, frame: Frame) -> Result<(), SolverError> {
        if !self.items.get(root.index()).is_some_and(|e| e.is_root) {
            return Err(SolverError::NotARoot {
                name: self.name(root),
            });
        }
        let vars = self.variables_for(root);
        let suggestions = [
            (vars.x, frame.x),
            (vars.y, frame.y),
            (vars.width, frame.width),
            (vars.height, frame.height),
        ];
        for (var, value) in suggestions {
            self.solver
                .suggest_value(var, value)
                .map_err(|e| SolverError::Internal(format!("Failed to suggest value: {}", e)))?;
        }
        debug!(root = %self.name(root), frame = %frame, "root frame set");
        Ok(())
    }

    /// Add an item inside `container`
    pub fn add_item(&mut self, name: impl Into<String>, container: Item) -> Item {
        self.push_item(name.into(), Some(container), false)
    }

    /// The safe-area guide of `item`, created on first request
    ///
    /// The guide is an item pinned inside `item` by the configured insets.
    pub fn safe_area(&mut self, item: Item) -> Item {
        if let Some(&guide) = self.safe_areas.get(&item) {
            return guide;
        }
        let name = format!("{}.safeArea", self.name(item));
        let guide = self.push_item(name, Some(item), false);
        let insets = self.config.safe_area_insets;
        self.layout(guide, |p| {
            p.top().equal_to(item.top() + insets.top);
            p.leading().equal_to(item.leading() + insets.leading);
            p.bottom().equal_to(item.bottom() - insets.bottom);
            p.trailing().equal_to(item.trailing() - insets.trailing);
        });
        self.safe_areas.insert(item, guide);
        guide
    }

    /// Name of an item; items this host did not create are shown by index
    pub fn name(&self, item: Item) -> String {
        self.items
            .get(item.index())
            .map(|e| e.name.clone())
            .unwrap_or_else(|| item.to_string())
    }

    /// Render a constraint using item names
    pub fn describe(&self, constraint: &Constraint) -> String {
        constraint.descriptor().display_with(|item| self.name(item))
    }

    /// Get or create the solver variables for an item
    fn variables_for(&mut self, item: Item) -> ItemVariables {
        *self.variables.entry(item).or_insert_with(ItemVariables::new)
    }

    /// Create a solver expression for an anchor
    fn expression(&mut self, anchor: RawAnchor) -> Expression {
        let vars = self.variables_for(anchor.item);
        match anchor.attribute {
            Attribute::Leading => vars.x.into(),
            Attribute::Trailing => vars.x + vars.width,
            Attribute::Top => vars.y.into(),
            Attribute::Bottom => vars.y + vars.height,
            Attribute::CenterX => vars.x + vars.width * 0.5,
            Attribute::CenterY => vars.y + vars.height * 0.5,
            Attribute::Width => vars.width.into(),
            Attribute::Height => vars.height.into(),
        }
    }

    fn solver_constraint(&mut self, descriptor: &ConstraintDescriptor) -> KasuariConstraint {
        let strength = self.config.constraint_priority.strength();
        let first = self.expression(descriptor.first);
        match descriptor.second {
            Some(second) => {
                let rhs = descriptor.multiplier * self.expression(second) + descriptor.constant;
                match descriptor.relation {
                    Relation::Equal => first | EQ(strength) | rhs,
                    Relation::GreaterOrEqual => first | GE(strength) | rhs,
                    Relation::LessOrEqual => first | LE(strength) | rhs,
                }
            }
            None => {
                let constant = descriptor.constant;
                match descriptor.relation {
                    Relation::Equal => first | EQ(strength) | constant,
                    Relation::GreaterOrEqual => first | GE(strength) | constant,
                    Relation::LessOrEqual => first | LE(strength) | constant,
                }
            }
        }
    }

    /// Convert a kasuari error to a SolverError with context
    fn convert_kasuari_error(e: AddConstraintError, constraint_desc: String) -> SolverError {
        match e {
            AddConstraintError::UnsatisfiableConstraint => SolverError::Unsatisfiable {
                constraint: constraint_desc,
                reason: "conflicts with active constraints".to_string(),
            },
            AddConstraintError::DuplicateConstraint => {
                SolverError::Internal(format!("Duplicate constraint: {}", constraint_desc))
            }
            AddConstraintError::InternalSolverError(msg) => SolverError::Internal(format!(
                "Internal solver error for {}: {}",
                constraint_desc, msg
            )),
        }
    }

    /// Try to add a constraint to the solver
    ///
    /// A failure leaves the constraint active but broken.
    fn install(&mut self, id: ConstraintId, retrying: bool) {
        let descriptor = self.records[id.index()].descriptor;
        let constraint = self.solver_constraint(&descriptor);
        match self.solver.add_constraint(constraint.clone()) {
            Ok(()) => {
                self.records[id.index()].installed = Some(constraint);
                trace!(constraint = %self.describe(&Constraint::new(id, descriptor)), "installed");
            }
            Err(e) => {
                let desc = self.describe(&Constraint::new(id, descriptor));
                let error = Self::convert_kasuari_error(e, desc);
                if retrying {
                    debug!(error = %error, "constraint still broken");
                } else {
                    warn!(error = %error, "unable to satisfy constraint, leaving it broken");
                }
            }
        }
    }

    fn uninstall(&mut self, id: ConstraintId) {
        if let Some(constraint) = self.records[id.index()].installed.take() {
            if let Err(e) = self.solver.remove_constraint(&constraint) {
                warn!(error = ?e, "failed to remove constraint from solver");
            }
        }
    }

    fn is_broken(record: &ConstraintRecord) -> bool {
        record.active && record.installed.is_none()
    }

    fn retry_broken(&mut self) {
        let broken: Vec<ConstraintId> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| Self::is_broken(r))
            .map(|(i, _)| self.constraint_id(i))
            .collect();
        for id in broken {
            self.install(id, true);
        }
    }

    /// Active constraints the solver could not satisfy
    pub fn broken_constraints(&self) -> Vec<Constraint> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| Self::is_broken(r))
            .map(|(i, r)| Constraint::new(self.constraint_id(i), r.descriptor))
            .collect()
    }

    /// Number of constraints flagged active, broken ones included
    pub fn active_count(&self) -> usize {
        self.records.iter().filter(|r| r.active).count()
    }

    /// Run a layout pass, updating every frame from the solver
    ///
    /// Frames only change here, so activation changes made between two
    /// passes are never observed half-applied.
    pub fn layout_if_needed(&mut self) {
        let changes = self.solver.fetch_changes();
        let changed = changes.len();
        for (var, value) in changes {
            self.values.insert(*var, *value);
        }
        debug!(changed, "layout pass");
    }

    /// Frame of an item as of the last layout pass
    pub fn frame(&self, item: Item) -> Frame {
        let Some(vars) = self.variables.get(&item) else {
            return Frame::zero();
        };
        let value = |var: KasuariVariable| self.values.get(&var).copied().unwrap_or(0.0);
        Frame::new(
            value(vars.x),
            value(vars.y),
            value(vars.width),
            value(vars.height),
        )
    }
}

impl LayoutHost for SolverHost {
    fn make_constraint(&mut self, descriptor: ConstraintDescriptor) -> Constraint {
        let id = self.constraint_id(self.records.len());
        self.records.push(ConstraintRecord {
            descriptor,
            active: false,
            installed: None,
        });
        Constraint::new(id, descriptor)
    }

    fn set_active(&mut self, constraint: &Constraint, active: bool) {
        let id = constraint.id();
        if self.record(constraint).is_none() {
            warn!(constraint = %constraint.descriptor(), "constraint was not created by this host");
            return;
        }
        let record = &mut self.records[id.index()];
        if record.active == active {
            // Re-activating a broken constraint tries it again
            if active && Self::is_broken(record) {
                self.install(id, false);
            }
            return;
        }
        record.active = active;
        if active {
            self.install(id, false);
        } else {
            self.uninstall(id);
            trace!(constraint = %self.describe(constraint), "deactivated");
            if self.config.retry_broken {
                self.retry_broken();
            }
        }
    }

    fn is_active(&self, constraint: &Constraint) -> bool {
        self.record(constraint).is_some_and(|r| r.active)
    }

    fn container(&self, item: Item) -> Option<Item> {
        self.items.get(item.index()).and_then(|e| e.container)
    }
}
