use std::collections::BTreeSet;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::world::RoomId;

/// The kind of a component. One variant per field of [`ComponentSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Alias names and an optional description.
    Description,
    /// Things resting on or in this entity.
    Container,
    /// Things the player carries.
    Inventory,
    /// Marks an entity that can be picked up.
    Takeable,
    /// Marks the default drop target of a room.
    Floor,
    /// A directional link to another room.
    Portal,
    /// Narration shown when a room is described.
    WorldDescription,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Description => "description",
            Self::Container => "container",
            Self::Inventory => "inventory",
            Self::Takeable => "takeable",
            Self::Floor => "floor",
            Self::Portal => "portal",
            Self::WorldDescription => "world_description",
        };
        f.write_str(name)
    }
}

/// A single component value, used when building entities from a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    /// See [`DescriptionComponent`].
    Description(DescriptionComponent),
    /// See [`ContainerComponent`].
    Container(ContainerComponent),
    /// See [`InventoryComponent`].
    Inventory(InventoryComponent),
    /// See [`TakeableComponent`].
    Takeable(TakeableComponent),
    /// See [`FloorComponent`].
    Floor(FloorComponent),
    /// See [`PortalComponent`].
    Portal(PortalComponent),
    /// See [`WorldDescriptionComponent`].
    WorldDescription(WorldDescriptionComponent),
}

impl Component {
    /// The kind of this component.
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Description(_) => ComponentKind::Description,
            Self::Container(_) => ComponentKind::Container,
            Self::Inventory(_) => ComponentKind::Inventory,
            Self::Takeable(_) => ComponentKind::Takeable,
            Self::Floor(_) => ComponentKind::Floor,
            Self::Portal(_) => ComponentKind::Portal,
            Self::WorldDescription(_) => ComponentKind::WorldDescription,
        }
    }
}

/// The set of typed components attached to an entity.
///
/// Every kind has exactly one slot, so an entity can never carry two
/// components of the same kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentSet {
    /// Alias names and description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<DescriptionComponent>,
    /// Things resting on this entity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerComponent>,
    /// Things carried by this entity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<InventoryComponent>,
    /// Can be picked up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub takeable: Option<TakeableComponent>,
    /// Default drop target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<FloorComponent>,
    /// Link to another room.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portal: Option<PortalComponent>,
    /// Room narration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub world_description: Option<WorldDescriptionComponent>,
}

impl ComponentSet {
    /// Returns true if a component of the given kind is present.
    pub fn has(&self, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Description => self.description.is_some(),
            ComponentKind::Container => self.container.is_some(),
            ComponentKind::Inventory => self.inventory.is_some(),
            ComponentKind::Takeable => self.takeable.is_some(),
            ComponentKind::Floor => self.floor.is_some(),
            ComponentKind::Portal => self.portal.is_some(),
            ComponentKind::WorldDescription => self.world_description.is_some(),
        }
    }

    /// Store a component in its slot. Returns true if an existing component
    /// of the same kind was replaced.
    pub fn insert(&mut self, component: Component) -> bool {
        match component {
            Component::Description(c) => self.description.replace(c).is_some(),
            Component::Container(c) => self.container.replace(c).is_some(),
            Component::Inventory(c) => self.inventory.replace(c).is_some(),
            Component::Takeable(c) => self.takeable.replace(c).is_some(),
            Component::Floor(c) => self.floor.replace(c).is_some(),
            Component::Portal(c) => self.portal.replace(c).is_some(),
            Component::WorldDescription(c) => self.world_description.replace(c).is_some(),
        }
    }

    /// Kinds of all present components, in declaration order.
    pub fn kinds(&self) -> Vec<ComponentKind> {
        [
            ComponentKind::Description,
            ComponentKind::Container,
            ComponentKind::Inventory,
            ComponentKind::Takeable,
            ComponentKind::Floor,
            ComponentKind::Portal,
            ComponentKind::WorldDescription,
        ]
        .into_iter()
        .filter(|kind| self.has(*kind))
        .collect()
    }
}

// ---------------------------------------------------------------------------
// Description
// ---------------------------------------------------------------------------

/// Alias names plus an optional free-text description.
///
/// The first alias is the canonical name used in narration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionComponent {
    /// Alias names. Never empty.
    pub names: Vec<String>,
    /// Text printed when the entity is examined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DescriptionComponent {
    /// Create a description with the given aliases and no text.
    ///
    /// Callers are expected to pass at least one alias; the strict entity
    /// constructor rejects empty alias lists.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            description: None,
        }
    }

    /// Attach a description text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The canonical name, or an empty string for a malformed alias list.
    pub fn name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }

    /// The canonical name with a definite article.
    pub fn describe_the(&self) -> String {
        let name = self.name();
        if name.starts_with("the ") {
            name.to_string()
        } else {
            format!("the {name}")
        }
    }

    /// The canonical name with an indefinite article.
    pub fn describe_a(&self) -> String {
        let name = self.name();
        if name.starts_with("the ") || name.starts_with("a ") || name.starts_with("an ") {
            name.to_string()
        } else if name.starts_with(['a', 'e', 'i', 'o', 'u']) {
            format!("an {name}")
        } else {
            format!("a {name}")
        }
    }

    /// Returns true if any alias contains `text` as a whole word.
    ///
    /// Matching is case-sensitive.
    pub fn matches(&self, text: &str) -> bool {
        NameMatcher::new(text).is_some_and(|matcher| matcher.matches(self))
    }
}

/// A compiled whole-word matcher for a free-text name fragment.
///
/// Compile once per lookup and test it against many descriptions.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    pattern: Regex,
}

impl NameMatcher {
    /// Compile a matcher. Returns `None` for an empty fragment.
    pub fn new(text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(text))).ok()?;
        Some(Self { pattern })
    }

    /// Returns true if any alias of the description contains the fragment
    /// as a whole word.
    pub fn matches(&self, description: &DescriptionComponent) -> bool {
        description
            .names
            .iter()
            .any(|name| self.pattern.is_match(name))
    }
}

// ---------------------------------------------------------------------------
// Containers
// ---------------------------------------------------------------------------

/// Things resting on or in an entity. Membership is unordered; iteration
/// follows handle order so narration is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerComponent {
    /// Handles of the contained entities.
    pub items: BTreeSet<EntityId>,
}

impl ContainerComponent {
    /// An empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// A container pre-filled with the given handles.
    pub fn with_items(items: impl IntoIterator<Item = EntityId>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }
}

/// The items carried by the player, in the order they were picked up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryComponent {
    /// Handles of the carried entities.
    pub items: Vec<EntityId>,
}

impl InventoryComponent {
    /// An empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the item is carried.
    pub fn contains(&self, item: EntityId) -> bool {
        self.items.contains(&item)
    }
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// Marks an entity that can be picked up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TakeableComponent;

/// Marks the default drop target of a room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorComponent;

// ---------------------------------------------------------------------------
// Portals
// ---------------------------------------------------------------------------

/// Direction of travel through a portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// North.
    North,
    /// Northeast.
    Northeast,
    /// East.
    East,
    /// Southeast.
    Southeast,
    /// South.
    South,
    /// Southwest.
    Southwest,
    /// West.
    West,
    /// Northwest.
    Northwest,
    /// Up.
    Up,
    /// Down.
    Down,
    /// Not reachable by a movement command, only by entering.
    #[default]
    None,
}

impl Direction {
    /// All directions a player can walk in.
    pub const WALKABLE: [Direction; 10] = [
        Self::North,
        Self::Northeast,
        Self::East,
        Self::Southeast,
        Self::South,
        Self::Southwest,
        Self::West,
        Self::Northwest,
        Self::Up,
        Self::Down,
    ];

    /// Parse a direction from its name or abbreviation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "n" | "north" => Some(Self::North),
            "ne" | "northeast" => Some(Self::Northeast),
            "e" | "east" => Some(Self::East),
            "se" | "southeast" => Some(Self::Southeast),
            "s" | "south" => Some(Self::South),
            "sw" | "southwest" => Some(Self::Southwest),
            "w" | "west" => Some(Self::West),
            "nw" | "northwest" => Some(Self::Northwest),
            "u" | "up" => Some(Self::Up),
            "d" | "down" => Some(Self::Down),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    /// Get the display name for this direction.
    pub fn name(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::Northeast => "northeast",
            Self::East => "east",
            Self::Southeast => "southeast",
            Self::South => "south",
            Self::Southwest => "southwest",
            Self::West => "west",
            Self::Northwest => "northwest",
            Self::Up => "up",
            Self::Down => "down",
            Self::None => "none",
        }
    }

    /// Short form accepted by movement commands.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::North => "n",
            Self::Northeast => "ne",
            Self::East => "e",
            Self::Southeast => "se",
            Self::South => "s",
            Self::Southwest => "sw",
            Self::West => "w",
            Self::Northwest => "nw",
            Self::Up => "u",
            Self::Down => "d",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A directional link to another room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalComponent {
    /// The room this portal leads to.
    pub room: RoomId,
    /// The direction a movement command must name.
    pub direction: Direction,
}

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

/// Narration shown when the room holding this entity is described.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldDescriptionComponent {
    /// The narration text.
    pub description: String,
}

impl WorldDescriptionComponent {
    /// Create a room narration.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}
