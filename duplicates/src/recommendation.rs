//! Recommendation tiers for overlapping APIs.

use serde::{Deserialize, Serialize};

/// What to do about an overlapping API, by overlap percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// 85 and above: retire the older API.
    Deprecate,
    /// 70 to 84: merge the shared functionality.
    Consolidate,
    /// Below 70: worth a look.
    Review,
}

impl Recommendation {
    /// Pick the tier for an overlap percentage.
    pub fn for_overlap(overlap: u32) -> Self {
        match overlap {
            85.. => Self::Deprecate,
            70..=84 => Self::Consolidate,
            _ => Self::Review,
        }
    }

    /// Render the advice, naming the API under analysis and the existing one.
    pub fn message(self, current_api: &str, existing_api: &str) -> String {
        match self {
            Self::Deprecate => format!(
                "High overlap detected. Consider deprecating {existing_api} and migrating consumers to {current_api}"
            ),
            Self::Consolidate => {
                "Moderate overlap. Consider consolidating overlapping functionality".to_string()
            }
            Self::Review => "Some similarity detected. Review for potential alignment".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Recommendation::for_overlap(100), Recommendation::Deprecate);
        assert_eq!(Recommendation::for_overlap(85), Recommendation::Deprecate);
        assert_eq!(Recommendation::for_overlap(84), Recommendation::Consolidate);
        assert_eq!(Recommendation::for_overlap(70), Recommendation::Consolidate);
        assert_eq!(Recommendation::for_overlap(69), Recommendation::Review);
        assert_eq!(Recommendation::for_overlap(0), Recommendation::Review);
    }

    #[test]
    fn test_deprecate_names_both_apis() {
        let message = Recommendation::Deprecate.message("Accounts v2", "Legacy Users");
        assert_eq!(
            message,
            "High overlap detected. Consider deprecating Legacy Users and migrating consumers to Accounts v2"
        );
    }

    #[test]
    fn test_generic_tiers() {
        assert!(
            Recommendation::Consolidate
                .message("a", "b")
                .starts_with("Moderate overlap")
        );
        assert!(Recommendation::Review.message("a", "b").contains("Review"));
    }
}
