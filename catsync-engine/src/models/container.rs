//! Containers: artists and albums listed in the container panel

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::models::SearchKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Artist,
    Album,
}

impl ContainerKind {
    /// Catalog `type` value
    pub fn name(self) -> &'static str {
        match self {
            ContainerKind::Artist => "artist",
            ContainerKind::Album => "album",
        }
    }

    /// Kind used to decode the tracks of a drilled-into container
    pub fn drill_kind(self) -> SearchKind {
        match self {
            ContainerKind::Artist => SearchKind::Artists,
            ContainerKind::Album => SearchKind::Albums,
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContainerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "artist" => Ok(ContainerKind::Artist),
            "album" => Ok(ContainerKind::Album),
            other => Err(Error::UnknownContainerKind(other.to_string())),
        }
    }
}

/// Artist or album row in the container panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub name: String,
    pub kind: ContainerKind,
    /// Catalog id used for follow-up requests
    pub id: String,
    /// Canonical catalog web page
    pub external_url: String,
}
