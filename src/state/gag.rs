//! Rating scale and the five gags that can hijack it.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One answer on the 1-5 rating scale. `Five` is the best (and only acceptable) answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RatingValue {
    /// Lowest rating.
    #[serde(rename = "1")]
    One,
    /// Second rating.
    #[serde(rename = "2")]
    Two,
    /// Middle rating.
    #[serde(rename = "3")]
    Three,
    /// Second best rating.
    #[serde(rename = "4")]
    Four,
    /// Maximum rating.
    #[serde(rename = "5")]
    Five,
}

impl RatingValue {
    /// Every rating in ascending order.
    pub const ASCENDING: [RatingValue; 5] = [
        RatingValue::One,
        RatingValue::Two,
        RatingValue::Three,
        RatingValue::Four,
        RatingValue::Five,
    ];

    /// The value every gag forces the field to.
    pub const MAX: RatingValue = RatingValue::Five;

    /// Numeric value of the rating (1-5).
    pub fn as_u8(self) -> u8 {
        match self {
            RatingValue::One => 1,
            RatingValue::Two => 2,
            RatingValue::Three => 3,
            RatingValue::Four => 4,
            RatingValue::Five => 5,
        }
    }

    /// Whether this is the maximum rating.
    pub fn is_max(self) -> bool {
        self == Self::MAX
    }

    /// Values from `self` up to and including five, in ascending order.
    pub fn ascending_from(self) -> impl Iterator<Item = RatingValue> {
        Self::ASCENDING.into_iter().filter(move |value| *value >= self)
    }

    /// Number of single steps needed to climb from `self` to five.
    pub fn steps_to_max(self) -> u8 {
        Self::MAX.as_u8() - self.as_u8()
    }
}

impl fmt::Display for RatingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Raised when parsing a rating outside of the 1-5 scale.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a rating between 1 and 5")]
pub struct InvalidRating(pub String);

impl TryFrom<u8> for RatingValue {
    type Error = InvalidRating;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ASCENDING
            .into_iter()
            .find(|rating| rating.as_u8() == value)
            .ok_or_else(|| InvalidRating(value.to_string()))
    }
}

impl FromStr for RatingValue {
    type Err = InvalidRating;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(|value| Self::try_from(value).ok())
            .ok_or_else(|| InvalidRating(s.to_string()))
    }
}

/// The five auto-correct gags. Each owns exactly one rating question and one feature flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GagKind {
    /// A hand slides in and presses five.
    Boldness,
    /// A mouse pointer flies in and clicks five.
    Execution,
    /// A devil pops up next to the question and points at five.
    Humor,
    /// The other options melt away.
    Creativity,
    /// The field counts itself up to five.
    Presentation,
}

impl GagKind {
    /// Every gag in question order.
    pub const ALL: [GagKind; 5] = [
        GagKind::Boldness,
        GagKind::Execution,
        GagKind::Humor,
        GagKind::Creativity,
        GagKind::Presentation,
    ];

    /// Name of the rating field this gag owns.
    pub fn field_name(self) -> &'static str {
        match self {
            GagKind::Boldness => "boldness",
            GagKind::Execution => "execution",
            GagKind::Humor => "humor",
            GagKind::Creativity => "creativity",
            GagKind::Presentation => "presentation",
        }
    }

    /// JSON key of the feature flag gating this gag.
    pub fn flag_key(self) -> &'static str {
        match self {
            GagKind::Boldness => "isFormeBoldness",
            GagKind::Execution => "isFormeExecution",
            GagKind::Humor => "isFormeHumor",
            GagKind::Creativity => "isFormeCreativity",
            GagKind::Presentation => "isFormePresentation",
        }
    }

    /// Question label shown above the rating scale.
    pub fn label(self) -> &'static str {
        match self {
            GagKind::Boldness => "Boldness of Theft",
            GagKind::Execution => "Execution & Improvement",
            GagKind::Humor => "Humor / Branding",
            GagKind::Creativity => "Creativity in Rebranding",
            GagKind::Presentation => "Presentation",
        }
    }
}

impl fmt::Display for GagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Raised when parsing an unknown gag name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown gag `{0}`")]
pub struct UnknownGag(pub String);

impl FromStr for GagKind {
    type Err = UnknownGag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|gag| {
                gag.field_name().eq_ignore_ascii_case(needle)
                    || gag.flag_key().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| UnknownGag(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascending_from_two_reaches_five() {
        let visited: Vec<_> = RatingValue::Two.ascending_from().collect();
        assert_eq!(
            visited,
            vec![
                RatingValue::Two,
                RatingValue::Three,
                RatingValue::Four,
                RatingValue::Five
            ]
        );
        assert_eq!(RatingValue::Two.steps_to_max(), 3);
        assert_eq!(RatingValue::Five.steps_to_max(), 0);
    }

    #[test]
    fn ratings_parse_from_scale_only() {
        assert_eq!("3".parse::<RatingValue>(), Ok(RatingValue::Three));
        assert!("0".parse::<RatingValue>().is_err());
        assert!("6".parse::<RatingValue>().is_err());
        assert!("five".parse::<RatingValue>().is_err());
    }

    #[test]
    fn ratings_serialize_as_strings() {
        assert_eq!(serde_json::to_string(&RatingValue::Five).unwrap(), "\"5\"");
        let parsed: RatingValue = serde_json::from_str("\"1\"").unwrap();
        assert_eq!(parsed, RatingValue::One);
    }

    #[test]
    fn gags_parse_from_field_or_flag_name() {
        assert_eq!("humor".parse::<GagKind>(), Ok(GagKind::Humor));
        assert_eq!("isFormeCreativity".parse::<GagKind>(), Ok(GagKind::Creativity));
        assert!("comment".parse::<GagKind>().is_err());
    }
}
