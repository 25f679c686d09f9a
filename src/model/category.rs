use crate::error::Rejection;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The fixed set of spending categories. Anything that does not fit the named categories is
/// recorded as `Other`.
#[derive(
    Default, Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "PascalCase")]
pub enum Category {
    Rent,
    Food,
    Transport,
    Entertainment,
    #[default]
    Other,
}

serde_plain::derive_display_from_serialize!(Category);

impl Category {
    /// Every category, in the order they are prompted for and reported.
    pub const ALL: [Category; 5] = [
        Category::Rent,
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Other,
    ];

    /// A comma separated list of the category names, for prompts and error messages.
    pub fn choices() -> String {
        Self::ALL
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parsing is case-insensitive and ignores surrounding whitespace.
impl FromStr for Category {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.to_string().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Rejection::UnknownCategory {
                input: trimmed.to_string(),
                expected: Category::choices(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Category::Entertainment.to_string(), "Entertainment");
    }

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!(Category::from_str("food").unwrap(), Category::Food);
        assert_eq!(Category::from_str(" RENT ").unwrap(), Category::Rent);
    }

    #[test]
    fn test_parse_unknown() {
        let err = Category::from_str("Groceries").unwrap_err();
        assert!(matches!(err, Rejection::UnknownCategory { .. }));
        assert!(err.to_string().contains("Rent, Food, Transport, Entertainment, Other"));
    }

    #[test]
    fn test_order_matches_prompt_order() {
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
    }
}
