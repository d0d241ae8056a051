//! [`GridIdentity`]: which container a grid is, and how it may be used.
//!
//! Identity is policy and bookkeeping for whoever owns grids (see
//! [`GridRegistry`](crate::registry::GridRegistry)). The placement rules themselves never
//! consult it.

use uuid::Uuid;

/// Stable identity and policy of one container grid.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "save", derive(serde::Serialize, serde::Deserialize))]
pub struct GridIdentity {
    guid: Uuid,
    kind: GridKind,
    features: GridFeatures,
}

impl GridIdentity {
    /// Constructs an identity whose GUID is derived from `name`, with the default features
    /// of `kind`.
    ///
    /// The same name always produces the same GUID, so a container defined by a named
    /// configuration finds its saved contents again after a restart.
    ///
    /// ```
    /// use stowage::identity::{GridIdentity, GridKind};
    ///
    /// let a = GridIdentity::new(GridKind::PersonalStorage, "backpack");
    /// let b = GridIdentity::new(GridKind::PersonalStorage, "backpack");
    /// assert_eq!(a.guid(), b.guid());
    /// assert_ne!(a.guid(), GridIdentity::new(GridKind::PersonalStorage, "stash").guid());
    /// ```
    pub fn new(kind: GridKind, name: &str) -> Self {
        Self {
            guid: Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()),
            kind,
            features: kind.default_features(),
        }
    }

    /// Constructs an identity with an explicitly given GUID, such as one that was loaded
    /// from a save.
    pub fn with_guid(kind: GridKind, guid: Uuid) -> Self {
        Self {
            guid,
            kind,
            features: kind.default_features(),
        }
    }

    /// Returns a copy of `self` with the given features instead.
    #[must_use]
    pub fn with_features(mut self, features: GridFeatures) -> Self {
        self.features = features;
        self
    }

    #[allow(missing_docs)]
    #[inline]
    pub fn guid(&self) -> Uuid {
        self.guid
    }

    #[allow(missing_docs)]
    #[inline]
    pub fn kind(&self) -> GridKind {
        self.kind
    }

    #[allow(missing_docs)]
    #[inline]
    pub fn features(&self) -> GridFeatures {
        self.features
    }

    /// Shorthand for `self.features().contains(feature)`.
    #[inline]
    pub fn has(&self, feature: GridFeatures) -> bool {
        self.features.contains(feature)
    }
}

/// The role a container plays.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "save", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum GridKind {
    /// A player's own bag or stash.
    PersonalStorage,
    /// Slots which accept only particular kinds of item, such as worn equipment.
    EquipmentContainer,
    /// Items lying in the world, such as loot.
    Ground,
    /// A grid which exists only for the duration of some interaction.
    Ephemeral,
}

impl GridKind {
    /// All kinds, in declaration order.
    pub const ALL: [GridKind; 4] = [
        GridKind::PersonalStorage,
        GridKind::EquipmentContainer,
        GridKind::Ground,
        GridKind::Ephemeral,
    ];

    /// Returns the features a container of this kind has unless configured otherwise.
    pub const fn default_features(self) -> GridFeatures {
        match self {
            GridKind::PersonalStorage => GridFeatures::PERSISTABLE
                .union(GridFeatures::DRAGGABLE)
                .union(GridFeatures::SORTABLE)
                .union(GridFeatures::AUTO_SAVE),
            GridKind::EquipmentContainer => GridFeatures::PERSISTABLE
                .union(GridFeatures::DRAGGABLE)
                .union(GridFeatures::TYPE_RESTRICTED),
            GridKind::Ground => GridFeatures::DRAGGABLE
                .union(GridFeatures::AUTO_ORGANIZE)
                .union(GridFeatures::TEMPORARY),
            GridKind::Ephemeral => GridFeatures::DRAGGABLE.union(GridFeatures::TEMPORARY),
        }
    }
}

bitflags::bitflags! {
    /// Capabilities and policies of a container.
    ///
    /// These are advisory: they are stored, persisted, and reported, and hosts and the
    /// [`GridRegistry`](crate::registry::GridRegistry) act on them, but the placement
    /// rules never do.
    #[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
    #[cfg_attr(feature = "save", derive(serde::Serialize, serde::Deserialize))]
    pub struct GridFeatures: u16 {
        /// Contents are included in saves.
        const PERSISTABLE = 1 << 0;
        /// Items may be dragged in and out by the player.
        const DRAGGABLE = 1 << 1;
        /// The player may ask for the grid to be organized.
        const SORTABLE = 1 << 2;
        /// The grid organizes itself after changes.
        const AUTO_ORGANIZE = 1 << 3;
        /// Only some kinds of item are accepted.
        const TYPE_RESTRICTED = 1 << 4;
        /// The player may look but not change anything.
        const READ_ONLY = 1 << 5;
        /// Items of the same kind may share cells.
        const STACKABLE = 1 << 6;
        /// Saved whenever it changes rather than only at save points.
        const AUTO_SAVE = 1 << 7;
        /// Discarded along with its contents when its interaction ends.
        const TEMPORARY = 1 << 8;
    }
}

impl Default for GridFeatures {
    fn default() -> Self {
        Self::empty()
    }
}
