//! Coordinate layout for inferred generations.
//!
//! The engine runs four passes over an owned placement table, strictly in
//! order:
//!
//! 1. initial placement: one row per generation, members in id order;
//! 2. spousal compression: spouses move onto the deeper row and next to
//!    each other;
//! 3. collision resolution: every row is swept left to right so neighbours
//!    sit at least `min_step` apart;
//! 4. child centering: children move under the mean x of their parents and
//!    their row is swept again.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use log::{debug, trace};

use lineage_core::{
    draw::{LabelDefinition, wrap},
    geometry::{Bounds, Point, Size},
    identifier::MemberId,
    semantic::{FamilyTree, Relation, RelationKind},
};

use crate::{config::LayoutConfig, layout::Generations};

/// Numeric parameters of the layout passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    generation_spacing: f32,
    min_step: f32,
    box_width: f32,
    spouse_gap: f32,
    left_margin: f32,
    top_offset: f32,
}

impl LayoutSettings {
    pub fn generation_spacing(&self) -> f32 {
        self.generation_spacing
    }

    pub fn min_step(&self) -> f32 {
        self.min_step
    }

    pub fn box_width(&self) -> f32 {
        self.box_width
    }

    pub fn spouse_gap(&self) -> f32 {
        self.spouse_gap
    }

    pub fn left_margin(&self) -> f32 {
        self.left_margin
    }

    pub fn top_offset(&self) -> f32 {
        self.top_offset
    }

    fn row_top(&self, row: i32) -> f32 {
        self.top_offset + row as f32 * self.generation_spacing
    }
}

impl From<&LayoutConfig> for LayoutSettings {
    fn from(config: &LayoutConfig) -> Self {
        Self {
            generation_spacing: config.generation_spacing(),
            min_step: config.min_step(),
            box_width: config.box_width(),
            spouse_gap: config.spouse_gap(),
            left_margin: config.left_margin(),
            top_offset: config.top_offset(),
        }
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self::from(&LayoutConfig::default())
    }
}

/// Where a single member's box is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    position: Point,
    row: i32,
    box_height: f32,
}

impl Placement {
    /// Top-left corner of the box.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Effective generation the box is drawn on.
    ///
    /// Differs from the inferred generation when spousal compression moved
    /// the member onto its spouse's deeper row.
    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn box_height(&self) -> f32 {
        self.box_height
    }
}

/// Result of a layout: one [`Placement`] per member, in member order.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLayout {
    placements: IndexMap<MemberId, Placement>,
    box_width: f32,
    top_offset: f32,
    generation_spacing: f32,
}

impl TreeLayout {
    /// Returns the placement of `id`, or `None` if `id` is not a member.
    pub fn placement(&self, id: MemberId) -> Option<&Placement> {
        self.placements.get(&id)
    }

    /// Iterates over placements in member insertion order.
    pub fn placements(&self) -> impl Iterator<Item = (MemberId, &Placement)> {
        self.placements.iter().map(|(id, placement)| (*id, placement))
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Width shared by every member box.
    pub fn box_width(&self) -> f32 {
        self.box_width
    }

    /// Y coordinate of the top edge of `row`.
    pub fn row_top(&self, row: i32) -> f32 {
        self.top_offset + row as f32 * self.generation_spacing
    }

    /// Member ids grouped by row, rows ascending, ids in member order.
    pub fn rows(&self) -> BTreeMap<i32, Vec<MemberId>> {
        let mut rows: BTreeMap<i32, Vec<MemberId>> = BTreeMap::new();
        for (id, placement) in &self.placements {
            rows.entry(placement.row).or_default().push(*id);
        }
        rows
    }

    /// Box bounds of `id`.
    pub fn bounds(&self, id: MemberId) -> Option<Bounds> {
        self.placement(id).map(|placement| {
            Bounds::new_from_top_left(
                placement.position,
                Size::new(self.box_width, placement.box_height),
            )
        })
    }
}

/// Layout engine for family trees.
#[derive(Debug, Clone)]
pub struct Engine<'a> {
    settings: LayoutSettings,
    label: &'a LabelDefinition,
}

impl<'a> Engine<'a> {
    /// Creates an engine. `label` determines box heights.
    pub fn new(settings: LayoutSettings, label: &'a LabelDefinition) -> Self {
        Self { settings, label }
    }

    /// Computes box positions for every member of `tree`.
    ///
    /// Members missing from `generations` are placed on generation 0.
    /// Relations touching ids that are not members are ignored.
    pub fn calculate(&self, tree: &FamilyTree, generations: &Generations) -> TreeLayout {
        let mut placements = self.place_initial(tree, generations);
        self.compress_spouses(tree, &mut placements);
        self.resolve_all_rows(&mut placements);
        self.center_children(tree, &mut placements);

        debug!(
            members = placements.len(),
            rows = placements.values().map(|p| p.row).collect::<BTreeSet<_>>().len();
            "Layout calculated"
        );
        trace!(placements:?; "Final placements");

        TreeLayout {
            placements,
            box_width: self.settings.box_width,
            top_offset: self.settings.top_offset,
            generation_spacing: self.settings.generation_spacing,
        }
    }

    fn place_initial(
        &self,
        tree: &FamilyTree,
        generations: &Generations,
    ) -> IndexMap<MemberId, Placement> {
        let mut by_generation: BTreeMap<i32, Vec<MemberId>> = BTreeMap::new();
        for member in tree.members() {
            let generation = generations.get(member.id()).unwrap_or(0);
            by_generation
                .entry(generation)
                .or_default()
                .push(member.id());
        }

        let mut positions: IndexMap<MemberId, (Point, i32)> = IndexMap::new();
        for (&generation, ids) in &mut by_generation {
            ids.sort_unstable();
            let y = self.settings.row_top(generation);
            for (index, id) in ids.iter().enumerate() {
                let x = self.settings.left_margin + index as f32 * self.settings.min_step;
                positions.insert(*id, (Point::new(x, y), generation));
            }
        }

        tree.members()
            .filter_map(|member| {
                let (position, row) = positions.get(&member.id()).copied()?;
                let lines = wrap(member.name(), self.label.max_chars_per_line());
                let placement = Placement {
                    position,
                    row,
                    box_height: self.label.box_height(lines.len()),
                };
                Some((member.id(), placement))
            })
            .collect()
    }

    fn compress_spouses(&self, tree: &FamilyTree, placements: &mut IndexMap<MemberId, Placement>) {
        for relation in tree.relations_of(RelationKind::Spouse) {
            let (Some(a), Some(b)) = (
                placements.get(&relation.from()).copied(),
                placements.get(&relation.to()).copied(),
            ) else {
                skip_dangling(relation);
                continue;
            };

            let row = a.row.max(b.row);
            let y = self.settings.row_top(row);
            let mid = (a.position.x() + b.position.x()) / 2.0;
            let half_gap = self.settings.spouse_gap / 2.0;

            if let Some(placement) = placements.get_mut(&relation.from()) {
                placement.row = row;
                placement.position = Point::new(mid - half_gap, y);
            }
            if let Some(placement) = placements.get_mut(&relation.to()) {
                placement.row = row;
                placement.position = Point::new(mid + half_gap, y);
            }
        }
    }

    fn resolve_all_rows(&self, placements: &mut IndexMap<MemberId, Placement>) {
        let rows: BTreeSet<i32> = placements.values().map(|p| p.row).collect();
        for row in rows {
            self.resolve_row(placements, row);
        }
    }

    /// Sweeps `row` left to right, pushing each box at least `min_step`
    /// past its left neighbour and pinning it to the row top.
    fn resolve_row(&self, placements: &mut IndexMap<MemberId, Placement>, row: i32) {
        let mut members: Vec<(MemberId, f32)> = placements
            .iter()
            .filter(|(_, placement)| placement.row == row)
            .map(|(id, placement)| (*id, placement.position.x()))
            .collect();
        members.sort_by(|(id_a, x_a), (id_b, x_b)| x_a.total_cmp(x_b).then(id_a.cmp(id_b)));

        let y = self.settings.row_top(row);
        let mut floor = self.settings.left_margin;
        for (id, x) in members {
            let x = x.max(floor);
            floor = x + self.settings.min_step;
            if let Some(placement) = placements.get_mut(&id) {
                placement.position = Point::new(x, y);
            }
        }
    }

    fn center_children(&self, tree: &FamilyTree, placements: &mut IndexMap<MemberId, Placement>) {
        let mut groups: IndexMap<i32, Vec<&Relation>> = IndexMap::new();
        for relation in tree.relations_of(RelationKind::Child) {
            let parent_known = placements.contains_key(&relation.from());
            match placements.get(&relation.to()) {
                Some(child) if parent_known => groups.entry(child.row).or_default().push(relation),
                _ => skip_dangling(relation),
            }
        }

        for (row, relations) in groups {
            // Parent x values are read before any child of the group moves
            let mut targets: IndexMap<MemberId, (f32, usize)> = IndexMap::new();
            for relation in relations {
                let Some(parent) = placements.get(&relation.from()) else {
                    continue;
                };
                let entry = targets.entry(relation.to()).or_insert((0.0, 0));
                entry.0 += parent.position.x();
                entry.1 += 1;
            }

            for (child, (sum, count)) in targets {
                if let Some(placement) = placements.get_mut(&child) {
                    let x = sum / count as f32;
                    placement.position = placement.position.with_x(x);
                }
            }

            self.resolve_row(placements, row);
        }
    }
}

fn skip_dangling(relation: &Relation) {
    debug!(
        from = relation.from().value(),
        to = relation.to().value(),
        kind = relation.kind().as_str();
        "Skipping relation with unknown member"
    );
}
