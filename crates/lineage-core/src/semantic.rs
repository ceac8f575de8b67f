//! Semantic model for family trees.
//!
//! A [`FamilyTree`] is the static input of a render: a canvas, a set of
//! [`Member`]s keyed by [`MemberId`], and an append-only list of typed
//! [`Relation`]s. It carries no layout state; positions are produced by the
//! layout engine into its own placement table.
//!
//! # Example
//!
//! ```
//! use lineage_core::{
//!     identifier::MemberId,
//!     semantic::{FamilyTree, RelationKind},
//! };
//!
//! let mut tree = FamilyTree::new(1200.0, 800.0);
//! tree.add_member(MemberId::new(1), "Grandfather A", None);
//! tree.add_member(MemberId::new(3), "Father", Some("patriline"));
//! tree.add_relation(MemberId::new(1), MemberId::new(3), RelationKind::Child);
//!
//! assert_eq!(tree.members().count(), 2);
//! assert_eq!(tree.relations().len(), 1);
//! ```

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use crate::identifier::MemberId;

/// Default canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: f32 = 1200.0;
/// Default canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: f32 = 800.0;

/// Error returned when a relation kind string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown relation kind `{0}`, valid values: child, spouse, sibling")]
pub struct UnknownRelationKind(String);

/// The kind of a [`Relation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// Directed parent → child relation. The primary depth signal.
    Child,
    /// Symmetric same-generation relation, drawn as a dashed line.
    Spouse,
    /// Symmetric same-generation relation, affects generations only.
    Sibling,
}

impl RelationKind {
    /// Returns `true` for kinds whose endpoints are interchangeable.
    pub fn is_symmetric(self) -> bool {
        matches!(self, Self::Spouse | Self::Sibling)
    }

    /// Returns the source-format keyword for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Child => "child",
            Self::Spouse => "spouse",
            Self::Sibling => "sibling",
        }
    }
}

impl FromStr for RelationKind {
    type Err = UnknownRelationKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "child" => Ok(Self::Child),
            "spouse" => Ok(Self::Spouse),
            "sibling" => Ok(Self::Sibling),
            _ => Err(UnknownRelationKind(s.to_string())),
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    id: MemberId,
    name: String,
    tag: Option<String>,
}

impl Member {
    /// Creates a new member.
    pub fn new(id: MemberId, name: impl Into<String>, tag: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tag,
        }
    }

    /// Returns the member's identity.
    pub fn id(&self) -> MemberId {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the opaque styling tag, if any.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

/// A typed edge between two members.
///
/// For [`RelationKind::Child`], `from` is the parent and `to` the child. Symmetric
/// kinds are stored once in the direction they were added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    from: MemberId,
    to: MemberId,
    kind: RelationKind,
}

impl Relation {
    /// Creates a new relation.
    pub fn new(from: MemberId, to: MemberId, kind: RelationKind) -> Self {
        Self { from, to, kind }
    }

    /// Returns the source endpoint (the parent for child relations).
    pub fn from(&self) -> MemberId {
        self.from
    }

    /// Returns the target endpoint (the child for child relations).
    pub fn to(&self) -> MemberId {
        self.to
    }

    /// Returns the relation kind.
    pub fn kind(&self) -> RelationKind {
        self.kind
    }
}

/// Output canvas dimensions. Advisory only: layout neither clips nor rescales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    width: f32,
    height: f32,
}

impl Canvas {
    /// Creates a canvas with the given dimensions.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the canvas width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the canvas height.
    pub fn height(&self) -> f32 {
        self.height
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

/// The family graph: members in insertion order plus relations in insertion order.
#[derive(Debug, Clone, Default)]
pub struct FamilyTree {
    canvas: Canvas,
    members: IndexMap<MemberId, Member>,
    relations: Vec<Relation>,
}

impl FamilyTree {
    /// Creates an empty tree with the given canvas dimensions.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            ..Self::default()
        }
    }

    /// Inserts a member, overwriting any existing member with the same id.
    ///
    /// An overwritten member keeps its original insertion position.
    pub fn add_member(&mut self, id: MemberId, name: &str, tag: Option<&str>) {
        let member = Member::new(id, name, tag.map(str::to_string));
        if self.members.insert(id, member).is_some() {
            debug!(id = id.value(); "Overwrote existing member");
        }
    }

    /// Appends a relation. Endpoints are not validated and duplicates are kept.
    pub fn add_relation(&mut self, from: MemberId, to: MemberId, kind: RelationKind) {
        self.relations.push(Relation::new(from, to, kind));
    }

    /// Returns the canvas dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Replaces the canvas dimensions.
    pub fn set_canvas(&mut self, canvas: Canvas) {
        self.canvas = canvas;
    }

    /// Returns the members in insertion order.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    /// Returns the member with the given id.
    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.get(&id)
    }

    /// Returns `true` if a member with the given id exists.
    pub fn contains_member(&self, id: MemberId) -> bool {
        self.members.contains_key(&id)
    }

    /// Returns the number of members.
    pub fn members_count(&self) -> usize {
        self.members.len()
    }

    /// Returns all relations in insertion order.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Returns relations of the given kind in insertion order.
    pub fn relations_of(&self, kind: RelationKind) -> impl Iterator<Item = &Relation> {
        self.relations.iter().filter(move |r| r.kind == kind)
    }
}
