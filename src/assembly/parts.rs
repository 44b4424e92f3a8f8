use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A draggable computer part. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Part {
    Cpu,
    Fan,
    Ram,
    Gpu,
    Ssd,
    Cables,
    Psu,
}

impl Part {
    pub const ALL: [Part; 7] = [
        Part::Cpu,
        Part::Fan,
        Part::Ram,
        Part::Gpu,
        Part::Ssd,
        Part::Cables,
        Part::Psu,
    ];

    /// Identifier a slot's accepted label is compared against.
    pub fn id(self) -> &'static str {
        match self {
            Part::Cpu => "cpu",
            Part::Fan => "fan",
            Part::Ram => "ram",
            Part::Gpu => "gpu",
            Part::Ssd => "ssd",
            Part::Cables => "cables",
            Part::Psu => "psu",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Part::Cpu => "CPU",
            Part::Fan => "Cooling fan",
            Part::Ram => "RAM",
            Part::Gpu => "Graphics card",
            Part::Ssd => "SSD",
            Part::Cables => "Cables",
            Part::Psu => "Power supply",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Part::Cpu => "🧠",
            Part::Fan => "🌀",
            Part::Ram => "📏",
            Part::Gpu => "🎮",
            Part::Ssd => "💾",
            Part::Cables => "🔌",
            Part::Psu => "⚡",
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Part {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Part::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownPart(s.to_string()))
    }
}

/// A drop target on the motherboard. It accepts exactly one part.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Slot {
    pub id: String,
    pub accepts: Part,
    pub label: String,
}

impl Slot {
    pub fn new(id: impl Into<String>, accepts: Part, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            accepts,
            label: label.into(),
        }
    }
}

/// The top-down case layout: one slot per part.
pub fn default_layout() -> Vec<Slot> {
    vec![
        Slot::new("socket", Part::Cpu, "CPU socket"),
        Slot::new("cooler", Part::Fan, "Cooler mount"),
        Slot::new("dimm", Part::Ram, "Memory slots"),
        Slot::new("pcie", Part::Gpu, "PCIe x16"),
        Slot::new("m2", Part::Ssd, "M.2 slot"),
        Slot::new("harness", Part::Cables, "Cable harness"),
        Slot::new("psu-bay", Part::Psu, "PSU bay"),
    ]
}
