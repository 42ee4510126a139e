//! `airwave steps`: print the workflow step catalog.

use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::step::{step_catalog, StepDefinition};

#[derive(Debug, serde::Serialize)]
struct StepsOutput {
    steps: &'static [StepDefinition],
}

impl CommandOutput for StepsOutput {
    fn to_human(&self) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec![
            "#",
            "Step",
            "Label",
            "Description",
            "Est. (s)",
        ]);
        for (i, def) in self.steps.iter().enumerate() {
            table.add_row(vec![
                (i + 1).to_string(),
                def.id.to_string(),
                def.label.to_string(),
                def.description.to_string(),
                def.estimated_duration_secs.to_string(),
            ]);
        }
        table.to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(json: bool) {
    output(
        &StepsOutput {
            steps: step_catalog(),
        },
        json,
    );
}
