//! The step catalog: the ordered, immutable sequence of workflow steps.
//!
//! The catalog is read-only input to the transition controller; the
//! generation gateway reads `estimated_duration_secs` to drive the
//! simulated progress indicator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for one stage of the guided workflow, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    /// Upload and parse the campaign brief.
    UploadBrief,
    /// Generate strategic motivations from the brief.
    Motivations,
    /// Generate platform-specific copy from the selected motivations.
    Copy,
    /// Select assets from the asset library.
    Assets,
    /// Pick a render template.
    Template,
    /// Review the populated content matrix.
    Matrix,
    /// Hand off to rendering.
    Render,
}

impl StepId {
    /// All steps in catalog order.
    pub const ALL: [StepId; 7] = [
        StepId::UploadBrief,
        StepId::Motivations,
        StepId::Copy,
        StepId::Assets,
        StepId::Template,
        StepId::Matrix,
        StepId::Render,
    ];

    /// Position of this step in the catalog.
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|s| *s == self)
            .unwrap_or_default()
    }

    /// Step at the given catalog position, if in bounds.
    pub fn from_index(index: usize) -> Option<StepId> {
        Self::ALL.get(index).copied()
    }

    /// Whether this is the terminal step.
    pub fn is_terminal(self) -> bool {
        self == StepId::Render
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StepId::UploadBrief => "upload_brief",
            StepId::Motivations => "motivations",
            StepId::Copy => "copy",
            StepId::Assets => "assets",
            StepId::Template => "template",
            StepId::Matrix => "matrix",
            StepId::Render => "render",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable definition of a single workflow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepDefinition {
    pub id: StepId,
    pub label: &'static str,
    pub description: &'static str,
    /// Rough duration of the step's generation call, used only for the
    /// simulated progress estimate.
    pub estimated_duration_secs: u64,
}

const CATALOG: [StepDefinition; 7] = [
    StepDefinition {
        id: StepId::UploadBrief,
        label: "Upload Brief",
        description: "Upload the campaign brief document and review the parsed fields",
        estimated_duration_secs: 20,
    },
    StepDefinition {
        id: StepId::Motivations,
        label: "Generate Motivations",
        description: "Generate and select strategic motivations for the campaign messaging",
        estimated_duration_secs: 45,
    },
    StepDefinition {
        id: StepId::Copy,
        label: "Generate Copy",
        description: "Generate and select platform-specific copy variations",
        estimated_duration_secs: 30,
    },
    StepDefinition {
        id: StepId::Assets,
        label: "Select Assets",
        description: "Choose assets from the asset library for the content matrix",
        estimated_duration_secs: 60,
    },
    StepDefinition {
        id: StepId::Template,
        label: "Pick Template",
        description: "Pick the render template the matrix will be built against",
        estimated_duration_secs: 20,
    },
    StepDefinition {
        id: StepId::Matrix,
        label: "Populate Matrix",
        description: "Review the content matrix assembled from your selections",
        estimated_duration_secs: 15,
    },
    StepDefinition {
        id: StepId::Render,
        label: "Render",
        description: "Hand the assembled campaign off for rendering",
        estimated_duration_secs: 90,
    },
];

/// The ordered step catalog. Pure; no failure mode.
pub fn step_catalog() -> &'static [StepDefinition] {
    &CATALOG
}

/// Definition for a single step.
pub fn step_definition(id: StepId) -> &'static StepDefinition {
    &CATALOG[id.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_matches_step_order() {
        let catalog = step_catalog();
        assert_eq!(catalog.len(), StepId::ALL.len());
        for (i, def) in catalog.iter().enumerate() {
            assert_eq!(def.id, StepId::ALL[i]);
            assert_eq!(def.id.index(), i);
        }
    }

    #[test]
    fn test_index_roundtrip() {
        for step in StepId::ALL {
            assert_eq!(StepId::from_index(step.index()), Some(step));
        }
        assert_eq!(StepId::from_index(StepId::ALL.len()), None);
    }

    #[test]
    fn test_only_render_is_terminal() {
        for step in StepId::ALL {
            assert_eq!(step.is_terminal(), step == StepId::Render);
        }
    }

    #[test]
    fn test_step_id_serde_snake_case() {
        let json = serde_json::to_string(&StepId::UploadBrief).unwrap();
        assert_eq!(json, "\"upload_brief\"");
        let step: StepId = serde_json::from_str("\"motivations\"").unwrap();
        assert_eq!(step, StepId::Motivations);
    }

    #[test]
    fn test_display_matches_serde() {
        for step in StepId::ALL {
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(json.trim_matches('"'), step.to_string());
        }
    }
}
