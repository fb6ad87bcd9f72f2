//! End-to-end tests for a full compilation run.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{json, Value};
use tempfile::TempDir;

use rulesmith_core::{CompileError, LocalFileSystem, Pipeline, PipelinePaths, RenderOptions};

// ============================================================================
// Test Helpers
// ============================================================================

/// Lays out the default sibling structure: `<root>/cli` is the working
/// directory, sources live under `<root>/.cline` and `<root>/.claude`.
struct Fixture {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();
        for dir in ["cli", ".cline/rules", ".cline/roomodes", ".claude"] {
            fs::create_dir_all(root.join(dir)).unwrap();
        }
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    fn write(&self, relative: &str, content: &str) {
        fs::write(self.root.join(relative), content).unwrap();
    }

    fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root.join(relative)).unwrap()
    }

    fn paths(&self) -> PipelinePaths {
        let work_dir = self.root.join("cli");
        PipelinePaths {
            rules_dir: work_dir.join("../.cline/rules"),
            rules_output: work_dir.join("../.clinerules"),
            modes_dir: work_dir.join("../.cline/roomodes"),
            modes_output: work_dir.join("../.roomodes"),
            preferences_dir: work_dir.join("../.claude"),
            preferences_output: work_dir.join("../.claude_preferences"),
            variables: Some(work_dir.join("../variables.json")),
            base_path: work_dir,
        }
    }

    fn pipeline(&self) -> Pipeline {
        Pipeline::new(Arc::new(LocalFileSystem), self.paths(), RenderOptions::default())
    }

    fn populate(&self) {
        self.write(".cline/roomodes/design.md", "---\nname: Designer\n---\nDesigns things.");
        self.write(".cline/roomodes/coder.md", "---\nname: Coder\n---\nWrites code.");
        self.write(".cline/roomodes/_wip.md", "---\nname: Draft\n---\nNot yet.");
        self.write(".cline/rules/01-general.md", "# General\nBe precise.");
        self.write(".cline/rules/02-team.md", "Team: {{team}}");
        self.write(".claude/prefs.md", "Prefer {{language}}.");
        self.write(".claude/notes.txt", "ignored");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_full_run_without_variables() {
    let fixture = Fixture::new();
    fixture.populate();

    let report = fixture.pipeline().run().await.unwrap();

    assert_eq!(report.modes.file_count, 2);
    assert_eq!(report.rules.file_count, 2);
    assert_eq!(report.preferences.file_count, 1);

    let origin = |file: &str| {
        fixture
            .root
            .join(".cline/roomodes")
            .join(file)
            .to_string_lossy()
            .into_owned()
    };
    let modes: Value = serde_json::from_str(&fixture.read(".roomodes")).unwrap();
    assert_eq!(
        modes,
        json!({
            "customModes": [
                {
                    "name": "Coder",
                    "slug": "coder",
                    "roleDefinition": "Writes code.",
                    "__filename": origin("coder.md")
                },
                {
                    "name": "Designer",
                    "slug": "design",
                    "roleDefinition": "Designs things.",
                    "__filename": origin("design.md")
                }
            ]
        })
    );

    assert_eq!(
        fixture.read(".clinerules"),
        "# General\nBe precise.\n\nTeam: {{team}}\n\nThe following modes are defined in this project:\
         \n- coder Coder at ../.cline/roomodes/coder.md\
         \n- design Designer at ../.cline/roomodes/design.md"
    );
    assert_eq!(fixture.read(".claude_preferences"), "Prefer {{language}}.");
}

#[tokio::test]
async fn test_full_run_with_variables() {
    let fixture = Fixture::new();
    fixture.populate();
    fixture.write(
        "variables.json",
        r#"{"team": "Platform", "language": "<Rust>", "tools": ["git", "cargo"]}"#,
    );
    fixture.write(
        ".cline/rules/03-tools.md",
        "Tools:\n{{#tools}}\n- {{.}}\n{{/tools}}\n{{^strict}}Be pragmatic.{{/strict}}",
    );

    fixture.pipeline().run().await.unwrap();

    let rules = fixture.read(".clinerules");
    assert!(rules.contains("Team: Platform"));
    assert!(rules.contains("Tools:\n- git\n- cargo\nBe pragmatic."));
    assert_eq!(fixture.read(".claude_preferences"), "Prefer <Rust>.");
}

#[tokio::test]
async fn test_malformed_variables_do_not_abort() {
    let fixture = Fixture::new();
    fixture.populate();
    fixture.write("variables.json", "{ this is not json");

    let report = fixture.pipeline().run().await.unwrap();

    assert_eq!(report.rules.file_count, 2);
    assert!(fixture.read(".clinerules").contains("Team: {{team}}"));
}

#[tokio::test]
async fn test_missing_modes_directory() {
    let fixture = Fixture::new();
    fixture.populate();
    fs::remove_dir_all(fixture.root.join(".cline/roomodes")).unwrap();

    let report = fixture.pipeline().run().await.unwrap();

    assert_eq!(report.modes.file_count, 0);
    assert_eq!(fixture.read(".roomodes"), "{\n  \"customModes\": []\n}");
    assert_eq!(fixture.read(".clinerules"), "# General\nBe precise.\n\nTeam: {{team}}");
}

#[tokio::test]
async fn test_missing_rules_directory_aborts_before_preferences() {
    let fixture = Fixture::new();
    fixture.populate();
    fs::remove_dir_all(fixture.root.join(".cline/rules")).unwrap();

    let result = fixture.pipeline().run().await;

    assert!(matches!(result, Err(CompileError::DirectoryNotFound(_))));
    assert!(fixture.root.join(".roomodes").exists());
    assert!(!fixture.root.join(".clinerules").exists());
    assert!(!fixture.root.join(".claude_preferences").exists());
}

#[tokio::test]
async fn test_invalid_mode_front_matter_aborts() {
    let fixture = Fixture::new();
    fixture.populate();
    fixture.write(".cline/roomodes/broken.md", "---\nname: [oops\n---\nBody");

    let result = fixture.pipeline().run().await;

    match result {
        Err(err @ CompileError::Document { .. }) => {
            assert!(err.to_string().contains("broken.md"));
        }
        other => panic!("expected Document error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_runs_are_byte_identical() {
    let fixture = Fixture::new();
    fixture.populate();
    fixture.write("variables.json", r#"{"team": "Platform", "language": "Rust"}"#);

    fixture.pipeline().run().await.unwrap();
    let first = [
        fixture.read(".roomodes"),
        fixture.read(".clinerules"),
        fixture.read(".claude_preferences"),
    ];

    fixture.pipeline().run().await.unwrap();
    let second = [
        fixture.read(".roomodes"),
        fixture.read(".clinerules"),
        fixture.read(".claude_preferences"),
    ];

    assert_eq!(first, second);
}
