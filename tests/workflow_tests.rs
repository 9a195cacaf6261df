use llmport::{Error, ModuleError, Outcome, ProviderError};
use std::fs;

use test_utils::{Reply, setup_workflow, text};

#[tokio::test]
async fn test_import_generates_and_logs() {
    let (temp_dir, workflow, prompts) =
        setup_workflow(text("```python\ndef add(a, b):\n    return a + b\n```"));

    let outcome = workflow
        .import("adder", "a function add(a,b) that returns a+b", false)
        .await
        .expect("import should succeed");

    let module_path = temp_dir.path().join("adder.py");
    assert_eq!(outcome.path(), &module_path);
    assert_eq!(
        fs::read_to_string(&module_path).expect("module written"),
        "def add(a, b):\n    return a + b"
    );

    let log = fs::read_to_string(temp_dir.path().join("adder.log")).expect("log written");
    assert!(log.contains("--- PROMPT ["));
    assert!(log.contains("--- RESPONSE ["));
    assert!(log.contains("a function add(a,b) that returns a+b"));
    assert!(log.contains("```python\ndef add(a, b):"));
    assert_eq!(prompts.lock().len(), 1);
}

#[tokio::test]
async fn test_import_keeps_existing_module() {
    let (temp_dir, workflow, prompts) = setup_workflow(text("new = True"));
    let module_path = temp_dir.path().join("cached.py");
    fs::write(&module_path, "old = True").expect("seed module");

    let outcome = workflow
        .import("cached", "anything", false)
        .await
        .expect("import should succeed");

    assert_eq!(outcome, Outcome::Existing(module_path.clone()));
    assert_eq!(fs::read_to_string(&module_path).expect("read"), "old = True");
    assert!(prompts.lock().is_empty(), "no LLM call for an existing module");
    assert!(!temp_dir.path().join("cached.log").exists());
}

#[tokio::test]
async fn test_import_overwrite_regenerates() {
    let (temp_dir, workflow, prompts) = setup_workflow(text("new = True\n"));
    let module_path = temp_dir.path().join("cached.py");
    fs::write(&module_path, "old = True").expect("seed module");

    let outcome = workflow
        .import("cached", "anything", true)
        .await
        .expect("import should succeed");

    assert!(matches!(outcome, Outcome::Generated { .. }));
    assert_eq!(fs::read_to_string(&module_path).expect("read"), "new = True");
    assert_eq!(prompts.lock().len(), 1);
}

#[tokio::test]
async fn test_update_rewrites_module() {
    let (temp_dir, workflow, prompts) = setup_workflow(text(
        "def add(a: int, b: int) -> int:\n    return a + b",
    ));
    let module_path = temp_dir.path().join("adder.py");
    fs::write(&module_path, "def add(a,b): return a+b").expect("seed module");

    let outcome = workflow
        .update("adder", "add type hints")
        .await
        .expect("update should succeed");

    let Outcome::Generated { generation, .. } = outcome else {
        panic!("update always generates");
    };
    assert_eq!(
        generation.source,
        "def add(a: int, b: int) -> int:\n    return a + b"
    );
    assert_eq!(
        fs::read_to_string(&module_path).expect("read"),
        generation.source
    );
    assert!(prompts.lock()[0].contains("def add(a,b): return a+b"));
}

#[tokio::test]
async fn test_update_missing_module() {
    let (_temp_dir, workflow, prompts) = setup_workflow(text("unused"));
    let err = workflow
        .update("ghost", "make it exist")
        .await
        .expect_err("missing module cannot be updated");
    assert!(matches!(err, Error::Module(ModuleError::NotFound(_))));
    assert!(prompts.lock().is_empty());
}

#[tokio::test]
async fn test_provider_failure_writes_nothing() {
    let (temp_dir, workflow, _prompts) = setup_workflow(Reply::ServerError);

    let err = workflow
        .import("broken", "anything", false)
        .await
        .expect_err("provider failure must propagate");

    assert!(matches!(
        err,
        Error::Provider(ProviderError::Status { status: 500, .. })
    ));
    assert!(!temp_dir.path().join("broken.py").exists());
    assert!(!temp_dir.path().join("broken.log").exists());
}

#[tokio::test]
async fn test_failed_update_keeps_previous_source() {
    let (temp_dir, workflow, _prompts) = setup_workflow(Reply::AuthFailure);
    let module_path = temp_dir.path().join("adder.py");
    fs::write(&module_path, "x = 1").expect("seed module");

    let err = workflow
        .update("adder", "anything")
        .await
        .expect_err("auth failure must propagate");

    assert!(matches!(&err, Error::Provider(e) if e.is_auth()));
    assert_eq!(fs::read_to_string(&module_path).expect("read"), "x = 1");
}

#[tokio::test]
async fn test_invalid_module_name() {
    let (_temp_dir, workflow, prompts) = setup_workflow(text("unused"));
    let err = workflow
        .import("../escape", "anything", false)
        .await
        .expect_err("path-like names are rejected");
    assert!(matches!(err, Error::Module(ModuleError::InvalidName(_))));
    assert!(prompts.lock().is_empty());
}
