//! Prompt templates for generating and updating modules.

use crate::error::ConfigError;

/// Asks for a fresh module from a description
pub fn render_generate(intent: &str) -> Result<String, ConfigError> {
    let intent = require_intent(intent)?;
    Ok(format!(
        r#"
Generate a complete Python module based on the following prompt.
The code should be production-quality, well-documented, and follow PEP 8 standards.
Do not include any introductory text or explanations, only the raw Python code.
Do not wrap the code in markdown fences such as "```python ... ```", just return the raw Python code.

Prompt:
---
{intent}
---
"#
    ))
}

/// Asks for a revised module given the current source. An empty
/// `existing_source` renders an empty prior-source section.
pub fn render_update(intent: &str, existing_source: &str) -> Result<String, ConfigError> {
    let intent = require_intent(intent)?;
    Ok(format!(
        r#"
Given the following existing Python module:
---
{existing_source}
---

Update the module based on this request: "{intent}"
Return the complete, updated code for the entire file.
Do not include any introductory text or explanations, only the raw Python code.
Do not wrap the code in markdown fences such as "```python ... ```", just return the raw Python code.
"#
    ))
}

fn require_intent(intent: &str) -> Result<&str, ConfigError> {
    if intent.trim().is_empty() {
        Err(ConfigError::EmptyIntent)
    } else {
        Ok(intent)
    }
}
