//! Prompt generation for row autofill
//!
//! Builds the prose prompt asking the model to infer the pattern behind
//! the user's example rows and continue it.

use crate::suggest::Row;

/// System message framing the task.
pub const SYSTEM_MESSAGE: &str =
    "You are a helpful assistant that continues lists of example values. \
     Respond only with a JSON array of strings.";

/// Build the user prompt for generating `count` rows extending `base`.
///
/// Empty placeholder rows are left out; the model only sees content the
/// user actually wrote.
pub fn build_autofill_prompt(base: &[Row], count: usize) -> String {
    let mut prompt = String::new();

    prompt.push_str("Here is a list of example values a user has written:\n\n");
    for row in base.iter().filter(|row| !row.is_empty()) {
        prompt.push_str(&format!("- {}\n", row));
    }
    prompt.push('\n');

    prompt.push_str(&format!(
        "Infer the pattern behind these examples and produce {} more values continuing it.\n",
        count
    ));
    prompt.push_str("Respond with a JSON array of strings and nothing else. ");
    prompt.push_str("Do not number the values or wrap them in markdown.\n");
    prompt
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod prompt_tests;
