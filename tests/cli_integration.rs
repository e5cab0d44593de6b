/// Integration tests for doc-revision
///
/// These tests build throwaway git repositories and run the binary against
/// them. They return early when no `git` executable is available.
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

// Helper to check for a usable git on PATH
fn git_available() -> bool {
    Command::new("git").arg("--version").output().map(|o| o.status.success()).unwrap_or(false)
}

// Helper to run git with a fixed identity and no signing
fn git(args: &[&str], cwd: &Path) -> String {
    let output = Command::new("git")
        .args(["-c", "user.name=Doc Tester", "-c", "user.email=docs@example.com", "-c", "commit.gpgsign=false"])
        .args(args)
        .current_dir(cwd)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run git {}: {}", args.join(" "), e));
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

// Helper to create a repository with a single commit
fn init_repo() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    git(&["init", "-q"], dir.path());
    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("docs/conf.py"), "project = 'demo'\n").unwrap();
    git(&["add", "."], dir.path());
    git(&["commit", "-q", "-m", "Initial commit"], dir.path());
    dir
}

fn head(repo: &Path) -> String {
    git(&["rev-parse", "HEAD"], repo)
}

// Helper to run the binary
fn run_doc_revision(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_doc-revision"))
        .args(args)
        .env_remove("DOC_REVISION_CONFIG")
        .output()
        .expect("Failed to run doc-revision")
}

// Helper to run the binary with $DOC_REVISION_CONFIG set
fn run_doc_revision_with_env_config(args: &[&str], config: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_doc-revision"))
        .args(args)
        .env("DOC_REVISION_CONFIG", config)
        .output()
        .expect("Failed to run doc-revision")
}

fn json_stdout(output: &Output) -> serde_json::Value {
    assert!(output.status.success(), "doc-revision failed: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// Helper to commit a project file at the repository root
fn commit_project_file(repo: &Path, contents: &str) {
    fs::write(repo.join("doc-revision.toml"), contents).unwrap();
    git(&["add", "doc-revision.toml"], repo);
    git(&["commit", "-q", "-m", "Add doc-revision config"], repo);
}

fn run_json(repo: &Path, extra: &[&str]) -> serde_json::Value {
    let mut args = vec!["-C", repo.to_str().unwrap(), "--format", "json"];
    args.extend_from_slice(extra);
    json_stdout(&run_doc_revision(&args))
}

#[test]
fn test_clean_checkout_links_to_commit() {
    if !git_available() {
        return;
    }
    let repo = init_repo();
    let full = head(repo.path());

    let meta = run_json(repo.path(), &[]);
    assert_eq!(meta["version"], full[..8]);
    assert_eq!(meta["source_ref"], full.as_str());
    assert_eq!(meta["is_clean"], true);
    assert_eq!(meta["copyright"], format!("2020, Danny Hermes Revision {}", &full[..8]));
    assert_eq!(meta["html_context"]["github_version"], full.as_str());
}

#[test]
fn test_modified_file_makes_dirty_version() {
    if !git_available() {
        return;
    }
    let repo = init_repo();
    let full = head(repo.path());
    fs::write(repo.path().join("docs/conf.py"), "project = 'changed'\n").unwrap();

    let meta = run_json(repo.path(), &[]);
    assert_eq!(meta["version"], format!("{}-dirty", &full[..8]));
    assert_eq!(meta["source_ref"], "main");
    assert_eq!(meta["full_revision_id"], full.as_str());
    assert_eq!(meta["copyright"], format!("2020, Danny Hermes Revision {}-dirty", &full[..8]));
}

#[test]
fn test_untracked_file_makes_dirty_version() {
    if !git_available() {
        return;
    }
    let repo = init_repo();
    fs::write(repo.path().join("scratch.txt"), "notes\n").unwrap();

    let meta = run_json(repo.path(), &["--default-branch", "trunk"]);
    assert!(meta["version"].as_str().unwrap().ends_with("-dirty"));
    assert_eq!(meta["source_ref"], "trunk");
}

#[test]
fn test_require_clean_rejects_dirty_tree() {
    if !git_available() {
        return;
    }
    let repo = init_repo();
    fs::write(repo.path().join("scratch.txt"), "notes\n").unwrap();

    let output = run_doc_revision(&["-C", repo.path().to_str().unwrap(), "--require-clean"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no metadata should be printed");
    assert!(String::from_utf8_lossy(&output.stderr).contains("uncommitted changes"));
}

#[test]
fn test_not_a_repository_fails() {
    if !git_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();

    let output = run_doc_revision(&["-C", dir.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("`git ") && stderr.contains("` failed ("), "stderr: {}", stderr);
}

#[test]
fn test_repository_without_commits_fails() {
    if !git_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    git(&["init", "-q"], dir.path());

    let output = run_doc_revision(&["-C", dir.path().to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_repeated_runs_are_identical() {
    if !git_available() {
        return;
    }
    let repo = init_repo();
    let args = ["-C", repo.path().to_str().unwrap(), "--format", "toml"];

    let first = run_doc_revision(&args);
    let second = run_doc_revision(&args);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_project_file_and_output_file() {
    if !git_available() {
        return;
    }
    let repo = init_repo();
    commit_project_file(
        repo.path(),
        "project = \"widgets\"\nauthor = \"Jane Doe\"\ncopyright_year = 2024\n\n[html_context]\ngithub_user = \"acme\"\n",
    );
    let full = head(repo.path());

    let out_dir = tempfile::tempdir().unwrap();
    let out_path = out_dir.path().join("version.env");
    let output = run_doc_revision(&[
        "-C",
        repo.path().to_str().unwrap(),
        "--format",
        "env",
        "--output",
        out_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty(), "metadata should go to the file only");

    let written = fs::read_to_string(&out_path).unwrap();
    assert!(written.contains(&format!("export DOC_VERSION='{}'\n", &full[..8])));
    assert!(written.contains(&format!("export DOC_COPYRIGHT='2024, Jane Doe Revision {}'\n", &full[..8])));
    assert!(written.contains(&format!("export DOC_SOURCE_REF='{}'\n", full)));

    let meta = run_json(repo.path(), &[]);
    assert_eq!(meta["project"], "widgets");
    assert_eq!(meta["html_context"]["github_user"], "acme");
    assert_eq!(meta["html_context"]["github_repo"], "widgets");
}

#[test]
fn test_project_file_found_when_run_from_docs_dir() {
    if !git_available() {
        return;
    }
    let repo = init_repo();
    commit_project_file(repo.path(), "project = \"widgets\"\nauthor = \"Jane Doe\"\n");
    let full = head(repo.path());

    let meta = run_json(&repo.path().join("docs"), &[]);
    assert_eq!(meta["project"], "widgets");
    assert_eq!(meta["copyright"], format!("2020, Jane Doe Revision {}", &full[..8]));
    assert_eq!(meta["source_ref"], full.as_str());
}

#[test]
fn test_env_config_overrides_repository_file() {
    if !git_available() {
        return;
    }
    let repo = init_repo();
    commit_project_file(repo.path(), "author = \"Repo Author\"\n");

    let config_dir = tempfile::tempdir().unwrap();
    let env_config = config_dir.path().join("env.toml");
    fs::write(&env_config, "author = \"Env Author\"\ndefault_branch = \"trunk\"\n").unwrap();

    let args = ["-C", repo.path().to_str().unwrap(), "--format", "json"];
    let meta = json_stdout(&run_doc_revision_with_env_config(&args, &env_config));
    assert!(meta["copyright"].as_str().unwrap().contains("Env Author"));

    fs::write(repo.path().join("scratch.txt"), "notes\n").unwrap();
    let dirty = json_stdout(&run_doc_revision_with_env_config(&args, &env_config));
    assert_eq!(dirty["source_ref"], "trunk");
}

#[test]
fn test_config_flag_overrides_env_config() {
    if !git_available() {
        return;
    }
    let repo = init_repo();

    let config_dir = tempfile::tempdir().unwrap();
    let env_config = config_dir.path().join("env.toml");
    fs::write(&env_config, "author = \"Env Author\"\n").unwrap();
    let flag_config = config_dir.path().join("flag.toml");
    fs::write(&flag_config, "author = \"Flag Author\"\n").unwrap();

    let output = run_doc_revision_with_env_config(
        &["-C", repo.path().to_str().unwrap(), "--format", "json", "--config", flag_config.to_str().unwrap()],
        &env_config,
    );
    let meta = json_stdout(&output);
    assert!(meta["copyright"].as_str().unwrap().contains("Flag Author"));
}

#[test]
fn test_missing_env_config_fails() {
    if !git_available() {
        return;
    }
    let repo = init_repo();
    let missing = repo.path().join("missing.toml");

    let output = run_doc_revision_with_env_config(&["-C", repo.path().to_str().unwrap()], &missing);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.toml"));
}
