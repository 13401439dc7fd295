use serde::{Deserialize, Serialize};

use crate::state::gag::GagKind;

/// One boolean per gag. Mirrors the single settings row; all gags start disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlagSet {
    /// Whether the boldness gag is active.
    pub is_forme_boldness: bool,
    /// Whether the execution gag is active.
    pub is_forme_execution: bool,
    /// Whether the humor gag is active.
    pub is_forme_humor: bool,
    /// Whether the creativity gag is active.
    pub is_forme_creativity: bool,
    /// Whether the presentation gag is active.
    pub is_forme_presentation: bool,
}

impl FeatureFlagSet {
    /// Flag set with every gag enabled.
    pub fn all_enabled() -> Self {
        GagKind::ALL
            .into_iter()
            .fold(Self::default(), |flags, gag| flags.with(gag, true))
    }

    /// Whether the given gag is enabled.
    pub fn get(&self, gag: GagKind) -> bool {
        match gag {
            GagKind::Boldness => self.is_forme_boldness,
            GagKind::Execution => self.is_forme_execution,
            GagKind::Humor => self.is_forme_humor,
            GagKind::Creativity => self.is_forme_creativity,
            GagKind::Presentation => self.is_forme_presentation,
        }
    }

    /// Update a single flag in place.
    pub fn set(&mut self, gag: GagKind, value: bool) {
        let slot = match gag {
            GagKind::Boldness => &mut self.is_forme_boldness,
            GagKind::Execution => &mut self.is_forme_execution,
            GagKind::Humor => &mut self.is_forme_humor,
            GagKind::Creativity => &mut self.is_forme_creativity,
            GagKind::Presentation => &mut self.is_forme_presentation,
        };
        *slot = value;
    }

    /// Copy of the set with one flag changed.
    pub fn with(mut self, gag: GagKind, value: bool) -> Self {
        self.set(gag, value);
        self
    }

    /// Gags whose flag is on, in question order.
    pub fn enabled(&self) -> impl Iterator<Item = GagKind> + '_ {
        GagKind::ALL.into_iter().filter(|gag| self.get(*gag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_all_disabled() {
        let flags = FeatureFlagSet::default();
        assert!(GagKind::ALL.iter().all(|gag| !flags.get(*gag)));
        assert_eq!(flags.enabled().count(), 0);
    }

    #[test]
    fn wire_format_uses_forme_keys() {
        let flags = FeatureFlagSet::default().with(GagKind::Humor, true);
        let json = serde_json::to_value(flags).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "isFormeBoldness": false,
                "isFormeExecution": false,
                "isFormeHumor": true,
                "isFormeCreativity": false,
                "isFormePresentation": false,
            })
        );
    }

    #[test]
    fn set_touches_only_one_flag() {
        let mut flags = FeatureFlagSet::all_enabled();
        flags.set(GagKind::Execution, false);
        let enabled: Vec<_> = flags.enabled().collect();
        assert_eq!(
            enabled,
            vec![
                GagKind::Boldness,
                GagKind::Humor,
                GagKind::Creativity,
                GagKind::Presentation
            ]
        );
    }
}
