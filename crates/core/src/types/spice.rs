//! Spice level of a pickle.

use serde::{Deserialize, Serialize};

/// Error returned when a string names no known spice level.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown spice level: {0} (expected Mild, Medium, Hot or Extra Hot)")]
pub struct SpiceLevelError(pub String);

/// Heat intensity of a product. A closed choice, so it needs no validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum SpiceLevel {
    #[default]
    Mild,
    Medium,
    Hot,
    #[serde(rename = "Extra Hot")]
    ExtraHot,
}

impl SpiceLevel {
    /// All levels, mildest first.
    pub const ALL: [Self; 4] = [Self::Mild, Self::Medium, Self::Hot, Self::ExtraHot];

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Mild => "Mild",
            Self::Medium => "Medium",
            Self::Hot => "Hot",
            Self::ExtraHot => "Extra Hot",
        }
    }
}

impl std::fmt::Display for SpiceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for SpiceLevel {
    type Err = SpiceLevelError;

    /// Case-insensitive; accepts `Extra Hot`, `extra-hot` and `extra_hot`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "mild" => Ok(Self::Mild),
            "medium" => Ok(Self::Medium),
            "hot" => Ok(Self::Hot),
            "extrahot" => Ok(Self::ExtraHot),
            _ => Err(SpiceLevelError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_mild() {
        assert_eq!(SpiceLevel::default(), SpiceLevel::Mild);
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!("Hot".parse::<SpiceLevel>().unwrap(), SpiceLevel::Hot);
        assert_eq!("medium".parse::<SpiceLevel>().unwrap(), SpiceLevel::Medium);
        assert_eq!("Extra Hot".parse::<SpiceLevel>().unwrap(), SpiceLevel::ExtraHot);
        assert_eq!("extra-hot".parse::<SpiceLevel>().unwrap(), SpiceLevel::ExtraHot);
        assert!("volcanic".parse::<SpiceLevel>().is_err());
    }

    #[test]
    fn test_label_roundtrips_through_parse() {
        for level in SpiceLevel::ALL {
            assert_eq!(level.label().parse::<SpiceLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&SpiceLevel::ExtraHot).unwrap();
        assert_eq!(json, "\"Extra Hot\"");
    }
}
