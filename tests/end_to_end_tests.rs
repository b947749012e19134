//! End-to-end tests: declarations in, artifact on disk out.
//!
//! Each test runs the full pipeline against a temporary directory and checks both the artifact and the
//! diagnostics that were recorded along the way.

use std::fs;

use defconst::backend::module::{MODULE_FORMAT_VERSION, load_module};
use defconst::declaration::RawDeclaration;
use defconst::diagnostics::Severity;
use defconst::{DefineConfig, EmitStrategy, RunStatus, run};
use defconst_core::ConstValue;

fn build_pipeline_declarations() -> Vec<RawDeclaration> {
    vec![
        RawDeclaration::new("DEBUG=true").with_kind("Bool"),
        RawDeclaration::new("VERSION=1.2.3"),
        RawDeclaration::new("DEBUG=false").with_kind("Bool"),
    ]
}

#[test]
fn source_artifact_holds_first_definitions() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("generated").join("consts.rs");
    let config = DefineConfig::new(&target, EmitStrategy::Source);

    let outcome = run(&build_pipeline_declarations(), &config);

    assert!(outcome.success());
    assert_eq!(outcome.artifact(), Some(target.as_path()));
    assert_eq!(outcome.diagnostics.warning_count(), 1);
    let warning = outcome.diagnostics.warnings().next().unwrap();
    assert_eq!(
        warning.message,
        "Constant 'DEBUG' was already defined. Existing value is 'true'. New value is 'false'. Ignoring the new value"
    );

    let code = fs::read_to_string(&target).unwrap();
    assert!(code.contains("pub mod Preprocessor {"), "{code}");
    assert!(code.contains("pub enum DefineConstants {}"), "{code}");
    assert!(code.contains("pub const DEBUG: bool = true;"), "{code}");
    assert!(code.contains(r#"pub const VERSION: &'static str = "1.2.3";"#), "{code}");
    assert!(!code.contains("false"), "{code}");
}

#[test]
fn module_artifact_holds_first_definitions() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("consts.dcm");
    let config = DefineConfig::new(&target, EmitStrategy::Module);

    let outcome = run(&build_pipeline_declarations(), &config);
    assert!(outcome.success());

    let image = load_module(&target).unwrap();
    assert_eq!(image.name, "consts");
    assert_eq!(image.header.format_version, MODULE_FORMAT_VERSION);
    let ty = image.find_type("Preprocessor::DefineConstants").unwrap();
    let names: Vec<_> = ty.accessors.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["DEBUG", "VERSION"]);
    assert_eq!(ty.get("DEBUG"), Some(&ConstValue::Bool(true)));
    assert_eq!(ty.get("VERSION"), Some(&ConstValue::String("1.2.3".into())));
}

#[test]
fn errors_block_the_artifact_for_both_emitters() {
    for (strategy, file) in [(EmitStrategy::Source, "consts.rs"), (EmitStrategy::Module, "consts.dcm")] {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join(file);
        let config = DefineConfig::new(&target, strategy);

        let outcome = run(&[RawDeclaration::new("1BAD=x"), RawDeclaration::new("GOOD=y")], &config);

        assert_eq!(outcome.status, RunStatus::Blocked);
        assert!(!outcome.success());
        assert!(!target.exists());
        let errors: Vec<_> = outcome.diagnostics.errors().collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.starts_with("'1BAD' is not a valid identifier"));
        // Later declarations are still validated.
        assert!(outcome.table.contains("GOOD"));
    }
}

#[test]
fn emitters_agree_on_names_kinds_and_values() {
    let decls = vec![
        RawDeclaration::new("NAME=defconst"),
        RawDeclaration::new("ENABLED=1").with_kind("Bool"),
        RawDeclaration::new("RETRIES= -4 ").with_kind("Int"),
        RawDeclaration::new("TARGETS=x86;;arm;").with_kind("StringArray"),
        RawDeclaration::new("RATE=0.5").with_kind("Float"),
    ];
    let dir = tempfile::tempdir().unwrap();

    let source_target = dir.path().join("consts.rs");
    let source = run(&decls, &DefineConfig::new(&source_target, EmitStrategy::Source).with_namespace(""));
    let module_target = dir.path().join("consts.dcm");
    let module = run(&decls, &DefineConfig::new(&module_target, EmitStrategy::Module).with_namespace(""));

    assert!(source.success() && module.success());
    assert_eq!(source.diagnostics, module.diagnostics);

    let image = load_module(&module_target).unwrap();
    let ty = image.find_type("DefineConstants").unwrap();
    let code = fs::read_to_string(&source_target).unwrap();
    assert!(!code.contains("pub mod"), "{code}");

    for constant in &source.table {
        assert_eq!(ty.get(constant.name()), Some(constant.value()));
    }
    assert_eq!(ty.get("ENABLED"), Some(&ConstValue::Bool(true)));
    assert_eq!(ty.get("RETRIES"), Some(&ConstValue::Int(-4)));
    assert_eq!(
        ty.get("TARGETS"),
        Some(&ConstValue::StringArray(vec!["x86".into(), "arm".into()]))
    );
    assert_eq!(ty.get("RATE"), Some(&ConstValue::String("0.5".into())));

    assert!(code.contains("pub const ENABLED: bool = true;"), "{code}");
    assert!(code.contains("pub const RETRIES: i32 = -4;"), "{code}");
    assert!(code.contains(r#"pub const TARGETS: &'static [&'static str] = &["x86", "arm"];"#), "{code}");
    assert!(code.contains(r#"pub const RATE: &'static str = "0.5";"#), "{code}");
}

#[test]
fn empty_declaration_list_still_writes_a_container() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("empty.dcm");
    let outcome = run(&[], &DefineConfig::new(&target, EmitStrategy::Module).with_class_name("Nothing"));

    assert!(outcome.success());
    assert!(outcome.diagnostics.is_empty());
    let image = load_module(&target).unwrap();
    let ty = image.find_type("Preprocessor::Nothing").unwrap();
    assert!(ty.accessors.is_empty());
}

#[test]
fn unwritable_target_is_reported_as_an_error() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where a directory is expected.
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    let target = blocker.join("consts.rs");

    let outcome = run(&[RawDeclaration::new("A=1")], &DefineConfig::new(&target, EmitStrategy::Source));

    assert_eq!(outcome.status, RunStatus::Failed);
    assert!(!outcome.success());
    let last = outcome.diagnostics.iter().last().unwrap();
    assert_eq!(last.severity, Severity::Error);
    assert!(last.message.starts_with("Failed to write constants artifact"));
}
