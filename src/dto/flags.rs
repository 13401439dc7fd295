//! Wire format of the feature flag API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::{flags::FeatureFlagSet, gag::GagKind};

/// Message returned after a successful flag update.
pub const UPDATE_SUCCESS: &str = "update success";

/// Response of `GET /api/allFlags`: every gag flag of the settings row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlagsResponse {
    /// Whether the boldness gag is armed.
    pub is_forme_boldness: bool,
    /// Whether the execution gag is armed.
    pub is_forme_execution: bool,
    /// Whether the humor gag is armed.
    pub is_forme_humor: bool,
    /// Whether the creativity gag is armed.
    pub is_forme_creativity: bool,
    /// Whether the presentation gag is armed.
    pub is_forme_presentation: bool,
}

impl From<FeatureFlagSet> for FlagsResponse {
    fn from(flags: FeatureFlagSet) -> Self {
        Self {
            is_forme_boldness: flags.is_forme_boldness,
            is_forme_execution: flags.is_forme_execution,
            is_forme_humor: flags.is_forme_humor,
            is_forme_creativity: flags.is_forme_creativity,
            is_forme_presentation: flags.is_forme_presentation,
        }
    }
}

impl From<FlagsResponse> for FeatureFlagSet {
    fn from(value: FlagsResponse) -> Self {
        Self {
            is_forme_boldness: value.is_forme_boldness,
            is_forme_execution: value.is_forme_execution,
            is_forme_humor: value.is_forme_humor,
            is_forme_creativity: value.is_forme_creativity,
            is_forme_presentation: value.is_forme_presentation,
        }
    }
}

/// Generic acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human readable acknowledgement.
    pub message: String,
}

impl MessageResponse {
    /// Acknowledgement sent after a flag write.
    pub fn update_success() -> Self {
        Self {
            message: UPDATE_SUCCESS.into(),
        }
    }
}

/// Single-flag update body accepted by one of the `PUT /api/isForme*` routes.
pub trait FlagToggle {
    /// Gag whose flag this body updates.
    const GAG: GagKind;
    /// Requested flag value.
    fn value(&self) -> bool;
}

/// Body of `PUT /api/isFormeBoldness`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoldnessToggle {
    /// New value of the boldness flag.
    pub is_forme_boldness: bool,
}

/// Body of `PUT /api/isFormeExecution`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionToggle {
    /// New value of the execution flag.
    pub is_forme_execution: bool,
}

/// Body of `PUT /api/isFormeHumor`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HumorToggle {
    /// New value of the humor flag.
    pub is_forme_humor: bool,
}

/// Body of `PUT /api/isFormeCreativity`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreativityToggle {
    /// New value of the creativity flag.
    pub is_forme_creativity: bool,
}

/// Body of `PUT /api/isFormePresentation`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresentationToggle {
    /// New value of the presentation flag.
    pub is_forme_presentation: bool,
}

impl FlagToggle for BoldnessToggle {
    const GAG: GagKind = GagKind::Boldness;

    fn value(&self) -> bool {
        self.is_forme_boldness
    }
}

impl FlagToggle for ExecutionToggle {
    const GAG: GagKind = GagKind::Execution;

    fn value(&self) -> bool {
        self.is_forme_execution
    }
}

impl FlagToggle for HumorToggle {
    const GAG: GagKind = GagKind::Humor;

    fn value(&self) -> bool {
        self.is_forme_humor
    }
}

impl FlagToggle for CreativityToggle {
    const GAG: GagKind = GagKind::Creativity;

    fn value(&self) -> bool {
        self.is_forme_creativity
    }
}

impl FlagToggle for PresentationToggle {
    const GAG: GagKind = GagKind::Presentation;

    fn value(&self) -> bool {
        self.is_forme_presentation
    }
}

/// Build the JSON body the `PUT` route of `gag` expects.
pub fn toggle_body(gag: GagKind, value: bool) -> serde_json::Value {
    let mut body = serde_json::Map::with_capacity(1);
    body.insert(gag.flag_key().to_string(), serde_json::Value::Bool(value));
    serde_json::Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_body_matches_route_schema() {
        let body = toggle_body(GagKind::Humor, false);
        let parsed: HumorToggle = serde_json::from_value(body).unwrap();
        assert!(!parsed.value());
        assert_eq!(HumorToggle::GAG, GagKind::Humor);
    }

    #[test]
    fn extra_keys_are_ignored() {
        let parsed: CreativityToggle = serde_json::from_value(serde_json::json!({
            "isFormeCreativity": true,
            "isFormeHumor": false,
        }))
        .unwrap();
        assert!(parsed.value());
    }

    #[test]
    fn missing_or_mistyped_key_is_rejected() {
        assert!(serde_json::from_value::<BoldnessToggle>(serde_json::json!({})).is_err());
        assert!(
            serde_json::from_value::<BoldnessToggle>(serde_json::json!({
                "isFormeBoldness": "yes"
            }))
            .is_err()
        );
    }
}
