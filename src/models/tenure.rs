//! Tenure bonus ("adicional trintenário") category.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The tenure bonus category, which selects how the seniority factor G
/// becomes the multiplier H.
///
/// Deserialization accepts the snake_case names as well as the labels used
/// in the spreadsheet's drop-down.
///
/// # Example
///
/// ```
/// use diaria_engine::models::TenureBonus;
///
/// let bonus: TenureBonus = "Sim - anterior a 1ºSet07".parse().unwrap();
/// assert_eq!(bonus, TenureBonus::PreSeptember2007);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenureBonus {
    /// No tenure bonus.
    #[default]
    #[serde(alias = "Não", alias = "nao")]
    None,
    /// Bonus granted before 1 September 2007: H = (1 + G/10) × 1.1.
    #[serde(
        rename = "pre_september_2007",
        alias = "Sim - anterior a 1ºSet07",
        alias = "pre_2007"
    )]
    PreSeptember2007,
    /// Bonus granted after 1 September 2007: H = 1.1 + G/10.
    #[serde(
        rename = "post_september_2007",
        alias = "Sim - Posterior a 1ºSet07",
        alias = "post_2007"
    )]
    PostSeptember2007,
}

impl TenureBonus {
    /// Returns the spreadsheet label for this category.
    pub fn label(&self) -> &'static str {
        match self {
            TenureBonus::None => "Não",
            TenureBonus::PreSeptember2007 => "Sim - anterior a 1ºSet07",
            TenureBonus::PostSeptember2007 => "Sim - Posterior a 1ºSet07",
        }
    }
}

impl FromStr for TenureBonus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let all = [
            TenureBonus::None,
            TenureBonus::PreSeptember2007,
            TenureBonus::PostSeptember2007,
        ];
        if let Some(bonus) = all.iter().find(|b| b.label() == trimmed) {
            return Ok(*bonus);
        }

        match trimmed.to_lowercase().replace('-', "_").as_str() {
            "none" | "nao" | "não" => Ok(TenureBonus::None),
            "pre_september_2007" | "pre_2007" => Ok(TenureBonus::PreSeptember2007),
            "post_september_2007" | "post_2007" => Ok(TenureBonus::PostSeptember2007),
            _ => Err(format!(
                "unknown tenure bonus '{}' (expected none, pre-2007 or post-2007)",
                s
            )),
        }
    }
}

impl std::fmt::Display for TenureBonus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        assert_eq!(TenureBonus::default(), TenureBonus::None);
    }

    #[test]
    fn test_parse_spreadsheet_labels() {
        assert_eq!("Não".parse::<TenureBonus>().unwrap(), TenureBonus::None);
        assert_eq!(
            " Sim - Posterior a 1ºSet07 ".parse::<TenureBonus>().unwrap(),
            TenureBonus::PostSeptember2007
        );
    }

    #[test]
    fn test_parse_short_names() {
        assert_eq!(
            "pre-2007".parse::<TenureBonus>().unwrap(),
            TenureBonus::PreSeptember2007
        );
        assert_eq!(
            "post_2007".parse::<TenureBonus>().unwrap(),
            TenureBonus::PostSeptember2007
        );
        assert_eq!("none".parse::<TenureBonus>().unwrap(), TenureBonus::None);
    }

    #[test]
    fn test_parse_unknown_is_error() {
        assert!("sometimes".parse::<TenureBonus>().is_err());
    }

    #[test]
    fn test_deserialize_label_alias() {
        let bonus: TenureBonus = serde_json::from_str("\"Sim - anterior a 1ºSet07\"").unwrap();
        assert_eq!(bonus, TenureBonus::PreSeptember2007);
    }

    #[test]
    fn test_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&TenureBonus::PostSeptember2007).unwrap(),
            "\"post_september_2007\""
        );
    }
}
