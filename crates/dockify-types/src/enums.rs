//! Enumeration types shared across the service.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Rule that reduces an entity's observation history to one record per
/// query.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum SelectionPolicy {
    /// The observation closest to the origin over the entity's whole
    /// history. Answers "has this entity ever reported a point near here".
    #[default]
    MinDistance,
    /// The entity's latest observation (highest id), kept only if it lies
    /// within the radius. Answers "is this entity near here now".
    MostRecent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_min_distance() {
        assert_eq!(SelectionPolicy::default(), SelectionPolicy::MinDistance);
    }

    #[test]
    fn policy_uses_snake_case_names() {
        let parsed: Result<SelectionPolicy, _> = serde_json::from_str("\"most_recent\"");
        assert_eq!(parsed.ok(), Some(SelectionPolicy::MostRecent));

        let json = serde_json::to_string(&SelectionPolicy::MinDistance).ok();
        assert_eq!(json.as_deref(), Some("\"min_distance\""));
    }
}
