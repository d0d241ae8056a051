//! [`ContainerConfig`]: the description from which a container's grid is built.

use alloc::string::String;
use core::fmt;

use crate::identity::{GridFeatures, GridIdentity, GridKind};
use crate::math::{GridSize, UiCoordinate, UiPoint};
use crate::pointer::{CellMetrics, MetricsError};
use crate::{DimensionsError, GridSurface};

/// Description of one container: its name, shape, and policy.
///
/// Hosts typically load these from data files (see [`ContainerConfig::from_json_str()`]),
/// then call [`ContainerConfig::build()`] to get the grid. Fields missing from the data
/// take their values from [`ContainerConfig::default()`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "save", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "save", serde(default))]
#[non_exhaustive]
pub struct ContainerConfig {
    /// Name of the container. The grid's GUID is derived from this, so it must stay the
    /// same for saved contents to be found again.
    pub name: String,

    /// Width and height in cells.
    pub dimensions: GridSize,

    /// Side length of one cell in the presentation layer, before container scaling.
    pub cell_size: UiCoordinate,

    /// The role of the container.
    pub kind: GridKind,

    /// Features of the container. If [`None`], those given by
    /// [`GridKind::default_features()`] are used.
    pub features: Option<GridFeatures>,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            name: String::from("container"),
            dimensions: GridSize::new(10, 10),
            cell_size: 64.0,
            kind: GridKind::PersonalStorage,
            features: None,
        }
    }
}

impl ContainerConfig {
    /// Constructs a configuration with the given name and dimensions, and defaults for
    /// everything else.
    pub fn new(name: impl Into<String>, dimensions: impl Into<GridSize>) -> Self {
        Self {
            name: name.into(),
            dimensions: dimensions.into(),
            ..Self::default()
        }
    }

    /// Checks that a grid can be built from this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        GridSurface::try_new(self.dimensions).map_err(ConfigError::Dimensions)?;
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::CellSize(self.cell_size));
        }
        Ok(())
    }

    /// Returns the identity of the container this configuration describes.
    pub fn identity(&self) -> GridIdentity {
        let identity = GridIdentity::new(self.kind, &self.name);
        match self.features {
            Some(features) => identity.with_features(features),
            None => identity,
        }
    }

    /// Builds an empty grid and its identity.
    pub fn build(&self) -> Result<(GridIdentity, GridSurface), ConfigError> {
        self.validate()?;
        let surface = GridSurface::try_new(self.dimensions).map_err(ConfigError::Dimensions)?;
        let identity = self.identity();
        log::debug!(
            "built container {:?} ({}) with dimensions {:?}",
            self.name,
            identity.guid(),
            self.dimensions,
        );
        Ok((identity, surface))
    }

    /// Returns the [`CellMetrics`] for drawing this container with its top-left corner
    /// at `origin` and the given scale factor.
    pub fn cell_metrics(
        &self,
        origin: impl Into<UiPoint>,
        scale: UiCoordinate,
    ) -> Result<CellMetrics, ConfigError> {
        CellMetrics::new(origin, self.cell_size, scale).map_err(ConfigError::Metrics)
    }

    /// Parses and validates a configuration in JSON form.
    ///
    /// ```
    /// use stowage::config::ContainerConfig;
    /// use stowage::identity::GridKind;
    ///
    /// let config = ContainerConfig::from_json_str(r#"{
    ///     "name": "belt",
    ///     "dimensions": [6, 1],
    ///     "kind": "EquipmentContainer"
    /// }"#).unwrap();
    /// assert_eq!(config.kind, GridKind::EquipmentContainer);
    /// assert_eq!(config.cell_size, 64.0);
    /// ```
    #[cfg(feature = "save")]
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }
}

/// Error from [`ContainerConfig`] validation.
#[derive(Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// The name is empty.
    EmptyName,
    /// The dimensions cannot form a grid.
    Dimensions(DimensionsError),
    /// The cell size is not finite and positive.
    CellSize(UiCoordinate),
    /// The cell size and scale cannot form [`CellMetrics`].
    Metrics(MetricsError),
    /// The data could not be parsed.
    #[cfg(feature = "save")]
    Parse(serde_json::Error),
}

// Not displaydoc, because of the feature-dependent variant.
impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyName => write!(f, "container name must not be empty"),
            ConfigError::Dimensions(_) => write!(f, "invalid container dimensions"),
            ConfigError::CellSize(size) => {
                write!(f, "cell size must be finite and positive, not {size}")
            }
            ConfigError::Metrics(_) => write!(f, "invalid cell metrics"),
            #[cfg(feature = "save")]
            ConfigError::Parse(_) => write!(f, "could not parse container configuration"),
        }
    }
}

impl core::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ConfigError::EmptyName => None,
            ConfigError::Dimensions(e) => Some(e),
            ConfigError::CellSize(_) => None,
            ConfigError::Metrics(e) => Some(e),
            #[cfg(feature = "save")]
            ConfigError::Parse(e) => Some(e),
        }
    }
}
