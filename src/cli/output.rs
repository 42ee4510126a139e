//! Human/JSON output switching for CLI commands.

/// A command result that can render for humans or as JSON.
pub trait CommandOutput {
    fn to_human(&self) -> String;
    fn to_json(&self) -> serde_json::Value;
}

/// Print a command result in the requested format.
pub fn output<T: CommandOutput>(result: &T, json: bool) {
    if json {
        let value = result.to_json();
        println!(
            "{}",
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        println!("{}", result.to_human());
    }
}
