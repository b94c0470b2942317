//! Field types and their component taxonomy.
//!
//! Every component is either stored directly on disk ([`Primitive`]) or
//! computed node-wise from primitives ([`Derived`]). Which names are valid
//! depends on the [`FieldType`] of the snapshot directory.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of field stored in a snapshot directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Material model: elastic parameters, inverse density and Q.
    #[default]
    EarthModel,
    /// Velocity field time steps.
    VelocitySnapshot,
}

impl FieldType {
    /// Components stored directly on disk for this field type.
    pub fn primitives(&self) -> &'static [Primitive] {
        match self {
            Self::EarthModel => &[
                Primitive::A,
                Primitive::B,
                Primitive::C,
                Primitive::Lambda,
                Primitive::Mu,
                Primitive::RhoInv,
                Primitive::Q,
            ],
            Self::VelocitySnapshot => &[Primitive::Vx, Primitive::Vy, Primitive::Vz],
        }
    }

    /// Components computed from primitives for this field type.
    pub fn derived(&self) -> &'static [Derived] {
        match self {
            Self::EarthModel => &[Derived::Vp, Derived::Vsh, Derived::Vsv, Derived::Rho],
            Self::VelocitySnapshot => &[],
        }
    }

    /// Resolve a component name for this field type.
    ///
    /// Returns `None` when the name is not a component of this field type,
    /// even if it is valid for another one.
    pub fn resolve(&self, name: &str) -> Option<Component> {
        if let Some(p) = self.primitives().iter().find(|p| p.name() == name) {
            return Some(Component::Primitive(*p));
        }
        self.derived()
            .iter()
            .find(|d| d.name() == name)
            .map(|d| Component::Derived(*d))
    }

    /// Whether files of this type carry an iteration suffix.
    pub fn is_time_dependent(&self) -> bool {
        matches!(self, Self::VelocitySnapshot)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EarthModel => "earth_model",
            Self::VelocitySnapshot => "velocity_snapshot",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "earth_model" | "model" => Ok(Self::EarthModel),
            "velocity_snapshot" | "snapshot" => Ok(Self::VelocitySnapshot),
            other => Err(format!("unknown field type '{}'", other)),
        }
    }
}

/// A component stored directly on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Primitive {
    A,
    B,
    C,
    Lambda,
    Mu,
    RhoInv,
    Q,
    Vx,
    Vy,
    Vz,
}

impl Primitive {
    /// Name used in file names and requests.
    pub fn name(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::Lambda => "lambda",
            Self::Mu => "mu",
            Self::RhoInv => "rhoinv",
            Self::Q => "Q",
            Self::Vx => "vx",
            Self::Vy => "vy",
            Self::Vz => "vz",
        }
    }
}

/// A physical quantity computed from primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Derived {
    /// P-wave speed.
    Vp,
    /// Horizontally polarised S-wave speed.
    Vsh,
    /// Vertically polarised S-wave speed.
    Vsv,
    /// Density.
    Rho,
}

impl Derived {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Vp => "vp",
            Self::Vsh => "vsh",
            Self::Vsv => "vsv",
            Self::Rho => "rho",
        }
    }

    /// Primitives read to evaluate this quantity, in formula argument order.
    pub fn inputs(&self) -> &'static [Primitive] {
        match self {
            Self::Vp => &[Primitive::Lambda, Primitive::Mu, Primitive::RhoInv],
            Self::Vsh => &[Primitive::Mu, Primitive::RhoInv],
            Self::Vsv => &[Primitive::Mu, Primitive::RhoInv, Primitive::B],
            Self::Rho => &[Primitive::RhoInv],
        }
    }
}

/// A resolved component, either read directly or computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    Primitive(Primitive),
    Derived(Derived),
}

impl Component {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Primitive(p) => p.name(),
            Self::Derived(d) => d.name(),
        }
    }

    /// Physical unit for colour-bar labels, if one is known.
    pub fn unit(&self) -> Option<&'static str> {
        match self {
            Self::Derived(Derived::Vp | Derived::Vsh | Derived::Vsv)
            | Self::Primitive(Primitive::Vx | Primitive::Vy | Primitive::Vz) => Some("m/s"),
            Self::Derived(Derived::Rho) => Some("kg/m^3"),
            Self::Primitive(Primitive::RhoInv) => Some("m^3/kg"),
            _ => None,
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
