#![allow(clippy::missing_inline_in_public_items)]

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::math::{Cell, GridCoordinate, GridRect};

#[derive(Debug, Deserialize, Serialize)]
struct GridRectSer {
    // This one isn't an explicitly versioned enum because we don't expect to need to change it
    lower: [GridCoordinate; 2],
    upper: [GridCoordinate; 2],
}

impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let &Cell { x, y } = self;

        [x, y].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [x, y] = <[i32; 2]>::deserialize(deserializer)?;
        Ok(Cell::new(x, y))
    }
}

impl Serialize for GridRect {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        GridRectSer {
            lower: self.lower_bounds().into(),
            upper: self.upper_bounds().into(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GridRect {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let GridRectSer { lower, upper } = GridRectSer::deserialize(deserializer)?;
        GridRect::checked_from_lower_upper(lower, upper).map_err(serde::de::Error::custom)
    }
}
