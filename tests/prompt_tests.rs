use llmport::ConfigError;
use llmport::prompts::{render_generate, render_update};

#[test]
fn test_generate_prompt_contains_intent() {
    let intent = "a CSV reader that yields dicts, with a `delimiter` option";
    let prompt = render_generate(intent).expect("Failed to render prompt");
    assert!(prompt.contains(intent));
    assert!(prompt.contains("Do not include any introductory text"));
}

#[test]
fn test_update_prompt_contains_intent_and_source() {
    let existing = "import os\n\n\ndef cwd():\n    return os.getcwd()\n";
    let prompt = render_update("return a pathlib.Path", existing).expect("Failed to render prompt");
    assert!(prompt.contains("return a pathlib.Path"));
    assert!(prompt.contains(existing));
    assert!(prompt.contains("Return the complete, updated code for the entire file."));
}

#[test]
fn test_update_prompt_with_empty_source() {
    let prompt = render_update("fix bug", "").expect("Empty source must not fail");
    assert!(prompt.contains("fix bug"));
    assert!(prompt.contains("Given the following existing Python module:\n---\n\n---"));
}

#[test]
fn test_intent_with_braces_is_verbatim() {
    let intent = "return {\"a\": 1} from get()";
    let prompt = render_generate(intent).expect("Failed to render prompt");
    assert!(prompt.contains(intent));
}

#[test]
fn test_empty_intent_rejected() {
    assert!(matches!(render_generate("  "), Err(ConfigError::EmptyIntent)));
}
