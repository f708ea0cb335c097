use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CATALOG, CATALOG_PATH, CliTest, GLOSSARY};

const CLEAN_CATALOG: &str = r#"msgid "Pull Request"
msgstr "拉取請求"

msgid "Open a Pull Request"
msgstr "開啟拉取請求"
"#;

#[test]
fn test_reports_violations() -> Result<()> {
    let test = CliTest::with_catalog(CATALOG)?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "Pull Request"  exact-mismatch
      --> locales/zh_TW.po:6
      |
    6 | msgstr "合併請求"
      |         ^^^^^^^^
      = note: "合併請求" is a known mistranslation of "Pull Request"; the glossary requires "拉取請求"
      = suggestion:
      + msgstr "拉取請求"

    error: "Please submit a Pull Request for review."  sentence-error
      --> locales/zh_TW.po:9
      |
    9 | msgstr "請提交一個合併請求以供審查。"
      |                   ^^^^^^^^
      = note: term "Pull Request" is translated as "合併請求", a known mistranslation; use "拉取請求"
      = suggestion:
      + msgstr "請提交一個拉取請求以供審查。"

    ✘ 2 problems (2 errors, 0 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_clean_catalog() -> Result<()> {
    let test = CliTest::with_catalog(CLEAN_CATALOG)?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 catalog file - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_output_is_stable() -> Result<()> {
    let test = CliTest::with_catalog(CATALOG)?;
    test.write_file("locales/ja.po", CATALOG)?;

    // file order, then entry order
    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "Pull Request"  exact-mismatch
      --> locales/ja.po:6
      |
    6 | msgstr "合併請求"
      |         ^^^^^^^^
      = note: "合併請求" is a known mistranslation of "Pull Request"; the glossary requires "拉取請求"
      = suggestion:
      + msgstr "拉取請求"

    error: "Please submit a Pull Request for review."  sentence-error
      --> locales/ja.po:9
      |
    9 | msgstr "請提交一個合併請求以供審查。"
      |                   ^^^^^^^^
      = note: term "Pull Request" is translated as "合併請求", a known mistranslation; use "拉取請求"
      = suggestion:
      + msgstr "請提交一個拉取請求以供審查。"

    error: "Pull Request"  exact-mismatch
      --> locales/zh_TW.po:6
      |
    6 | msgstr "合併請求"
      |         ^^^^^^^^
      = note: "合併請求" is a known mistranslation of "Pull Request"; the glossary requires "拉取請求"
      = suggestion:
      + msgstr "拉取請求"

    error: "Please submit a Pull Request for review."  sentence-error
      --> locales/zh_TW.po:9
      |
    9 | msgstr "請提交一個合併請求以供審查。"
      |                   ^^^^^^^^
      = note: term "Pull Request" is translated as "合併請求", a known mistranslation; use "拉取請求"
      = suggestion:
      + msgstr "請提交一個拉取請求以供審查。"

    ✘ 4 problems (4 errors, 0 warnings)

    ----- stderr -----
    "#);

    let first = test.check_command().output()?;
    let second = test.check_command().output()?;
    assert_eq!(first.stdout, second.stdout);

    Ok(())
}

#[test]
fn test_writes_suggestions_json() -> Result<()> {
    let test = CliTest::with_catalog(CATALOG)?;

    let mut cmd = test.check_command();
    cmd.args([
        "--output",
        "suggestions.json",
        "--commit-id",
        "abc123",
        "--github-output",
        "step-output.txt",
    ]);
    assert_cmd_snapshot!(cmd, @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "Pull Request"  exact-mismatch
      --> locales/zh_TW.po:6
      |
    6 | msgstr "合併請求"
      |         ^^^^^^^^
      = note: "合併請求" is a known mistranslation of "Pull Request"; the glossary requires "拉取請求"
      = suggestion:
      + msgstr "拉取請求"

    error: "Please submit a Pull Request for review."  sentence-error
      --> locales/zh_TW.po:9
      |
    9 | msgstr "請提交一個合併請求以供審查。"
      |                   ^^^^^^^^
      = note: term "Pull Request" is translated as "合併請求", a known mistranslation; use "拉取請求"
      = suggestion:
      + msgstr "請提交一個拉取請求以供審查。"

    ✘ 2 problems (2 errors, 0 warnings)
    Wrote 2 suggestion(s) to suggestions.json

    ----- stderr -----
    "#);

    let records: Value = serde_json::from_str(&test.read_file("suggestions.json")?)?;
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0]["filePath"], CATALOG_PATH);
    assert_eq!(records[0]["startLine"], 6);
    assert_eq!(records[0]["endLine"], 6);
    assert_eq!(records[0]["replacementBlock"], "msgstr \"拉取請求\"");
    assert_eq!(records[0]["commitId"], "abc123");
    assert!(
        records[0]["body"]
            .as_str()
            .unwrap()
            .ends_with("```suggestion\nmsgstr \"拉取請求\"\n```")
    );
    assert_eq!(records[1]["startLine"], 9);
    assert_eq!(records[1]["rule"], "sentence-error");

    assert_eq!(test.read_file("step-output.txt")?, "has_suggestions=true\n");

    Ok(())
}

#[test]
fn test_review_context_from_env() -> Result<()> {
    let test = CliTest::with_catalog(CATALOG)?;

    let mut cmd = test.check_command();
    cmd.args(["--output", "suggestions.json"]);
    cmd.env("GITHUB_REPOSITORY", "owner/docs");
    cmd.env("PR_NUMBER", "17");
    cmd.env("COMMIT_ID", "def456");
    cmd.env("GITHUB_OUTPUT", "step-output.txt");
    let output = cmd.output()?;
    assert_eq!(output.status.code(), Some(1));

    let records: Value = serde_json::from_str(&test.read_file("suggestions.json")?)?;
    assert_eq!(records[0]["repository"], "owner/docs");
    assert_eq!(records[0]["pullRequest"], 17);
    assert_eq!(records[0]["commitId"], "def456");
    assert_eq!(test.read_file("step-output.txt")?, "has_suggestions=true\n");

    Ok(())
}

#[test]
fn test_no_suggestions_output() -> Result<()> {
    let test = CliTest::with_catalog(CLEAN_CATALOG)?;

    let mut cmd = test.check_command();
    cmd.args(["--output", "suggestions.json", "--github-output", "out.txt"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Wrote 0 suggestion(s) to suggestions.json
    ✓ Checked 1 catalog file - no issues found

    ----- stderr -----
    ");

    assert_eq!(test.read_file("suggestions.json")?, "[]\n");
    assert_eq!(test.read_file("out.txt")?, "has_suggestions=false\n");

    Ok(())
}

#[test]
fn test_flagged_spans_are_suppressed() -> Result<()> {
    let test = CliTest::with_catalog(CATALOG)?;
    test.write_file(
        "flagged.json",
        r#"[{ "path": "locales/zh_TW.po", "line": 6 }]"#,
    )?;

    let mut cmd = test.check_command();
    cmd.args(["--flagged", "flagged.json"]);
    assert_cmd_snapshot!(cmd, @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "Please submit a Pull Request for review."  sentence-error
      --> locales/zh_TW.po:9
      |
    9 | msgstr "請提交一個合併請求以供審查。"
      |                   ^^^^^^^^
      = note: term "Pull Request" is translated as "合併請求", a known mistranslation; use "拉取請求"
      = suggestion:
      + msgstr "請提交一個拉取請求以供審查。"

    ✘ 1 problem (1 error, 0 warnings)
    note: 1 violation(s) already reported, skipped

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_previous_output_as_flagged_state() -> Result<()> {
    let test = CliTest::with_catalog(CATALOG)?;

    let mut first = test.check_command();
    first.args(["--output", "suggestions.json"]);
    assert_eq!(first.output()?.status.code(), Some(1));

    let mut second = test.check_command();
    second.args(["--flagged", "suggestions.json"]);
    assert_cmd_snapshot!(second, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    note: 2 violation(s) already reported, skipped
    ✓ Checked 1 catalog file - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_changed_lines_only() -> Result<()> {
    let test = CliTest::with_catalog(CATALOG)?;
    test.write_file(
        "pr.diff",
        r#"diff --git a/locales/zh_TW.po b/locales/zh_TW.po
index 3b18e51..a9c2f1d 100644
--- a/locales/zh_TW.po
+++ b/locales/zh_TW.po
@@ -9 +9 @@ msgid "Please submit a Pull Request for review."
-msgstr "請提交一個拉取請求以供審查。"
+msgstr "請提交一個合併請求以供審查。"
"#,
    )?;

    let mut cmd = test.check_command();
    cmd.args(["--diff", "pr.diff"]);
    assert_cmd_snapshot!(cmd, @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "Please submit a Pull Request for review."  sentence-error
      --> locales/zh_TW.po:9
      |
    9 | msgstr "請提交一個合併請求以供審查。"
      |                   ^^^^^^^^
      = note: term "Pull Request" is translated as "合併請求", a known mistranslation; use "拉取請求"
      = suggestion:
      + msgstr "請提交一個拉取請求以供審查。"

    ✘ 1 problem (1 error, 0 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_diff_without_catalog_changes() -> Result<()> {
    let test = CliTest::with_catalog(CATALOG)?;
    test.write_file(
        "pr.diff",
        "--- a/README.md\n+++ b/README.md\n@@ -1 +1 @@\n-# Docs\n+# Documentation\n",
    )?;

    let mut cmd = test.check_command();
    cmd.args(["--diff", "pr.diff"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 catalog file - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_missing_diff_is_fatal() -> Result<()> {
    let test = CliTest::with_catalog(CATALOG)?;

    let mut cmd = test.check_command();
    cmd.args(["--diff", "missing.diff"]);
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Failed to load diff: missing.diff: failed to read diff: No such file or directory (os error 2)
    ");

    Ok(())
}

#[test]
fn test_source_root() -> Result<()> {
    let test = CliTest::with_file("docs/glossary.json", GLOSSARY)?;
    test.write_file("docs/locales/zh_TW.po", CATALOG)?;
    test.write_file("locales/ignored.po", CATALOG)?;

    let mut cmd = test.check_command();
    cmd.args(["--source-root", "docs", "--output", "suggestions.json"]);
    assert_cmd_snapshot!(cmd, @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "Pull Request"  exact-mismatch
      --> locales/zh_TW.po:6
      |
    6 | msgstr "合併請求"
      |         ^^^^^^^^
      = note: "合併請求" is a known mistranslation of "Pull Request"; the glossary requires "拉取請求"
      = suggestion:
      + msgstr "拉取請求"

    error: "Please submit a Pull Request for review."  sentence-error
      --> locales/zh_TW.po:9
      |
    9 | msgstr "請提交一個合併請求以供審查。"
      |                   ^^^^^^^^
      = note: term "Pull Request" is translated as "合併請求", a known mistranslation; use "拉取請求"
      = suggestion:
      + msgstr "請提交一個拉取請求以供審查。"

    ✘ 2 problems (2 errors, 0 warnings)
    Wrote 2 suggestion(s) to suggestions.json

    ----- stderr -----
    "#);

    let records: Value = serde_json::from_str(&test.read_file("suggestions.json")?)?;
    assert_eq!(records[0]["filePath"], CATALOG_PATH);
    assert_eq!(records[1]["filePath"], CATALOG_PATH);

    Ok(())
}

#[test]
fn test_explicit_files() -> Result<()> {
    let test = CliTest::with_catalog(CLEAN_CATALOG)?;
    test.write_file("other/de.po", CATALOG)?;

    assert_eq!(test.check_command().output()?.status.code(), Some(1));

    let mut cmd = test.check_command();
    cmd.arg(CATALOG_PATH);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 catalog file - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_config_file() -> Result<()> {
    let test = CliTest::with_file(
        ".glosscheckrc.json",
        r#"{ "glossary": "terms/glossary.json", "includes": ["locales"] }"#,
    )?;
    test.write_file("terms/glossary.json", GLOSSARY)?;
    test.write_file(CATALOG_PATH, CATALOG)?;
    test.write_file("vendor/es.po", CATALOG)?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "Pull Request"  exact-mismatch
      --> locales/zh_TW.po:6
      |
    6 | msgstr "合併請求"
      |         ^^^^^^^^
      = note: "合併請求" is a known mistranslation of "Pull Request"; the glossary requires "拉取請求"
      = suggestion:
      + msgstr "拉取請求"

    error: "Please submit a Pull Request for review."  sentence-error
      --> locales/zh_TW.po:9
      |
    9 | msgstr "請提交一個合併請求以供審查。"
      |                   ^^^^^^^^
      = note: term "Pull Request" is translated as "合併請求", a known mistranslation; use "拉取請求"
      = suggestion:
      + msgstr "請提交一個拉取請求以供審查。"

    ✘ 2 problems (2 errors, 0 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_glossary_flag() -> Result<()> {
    let test = CliTest::with_file(
        "custom.json",
        r#"[{ "term": "Commit", "correct": "提交", "incorrect": ["承諾"] }]"#,
    )?;
    test.write_file(CATALOG_PATH, "msgid \"Commit\"\nmsgstr \"承諾\"\n")?;

    let mut cmd = test.check_command();
    cmd.args(["--glossary", "custom.json"]);
    assert_cmd_snapshot!(cmd, @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "Commit"  exact-mismatch
      --> locales/zh_TW.po:2
      |
    2 | msgstr "承諾"
      |         ^^^^
      = note: "承諾" is a known mistranslation of "Commit"; the glossary requires "提交"
      = suggestion:
      + msgstr "提交"

    ✘ 1 problem (1 error, 0 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_missing_glossary_is_fatal() -> Result<()> {
    let test = CliTest::with_file(CATALOG_PATH, CATALOG)?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Failed to load glossary: ./glossary.json: failed to read glossary: No such file or directory (os error 2)
    ");

    Ok(())
}

#[test]
fn test_malformed_glossary_is_fatal() -> Result<()> {
    let test = CliTest::with_file(
        "glossary.json",
        r#"[{ "source": "Pull Request" }, { "source": "", "target": "x" }]"#,
    )?;
    test.write_file(CATALOG_PATH, CATALOG)?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Failed to load glossary: ./glossary.json: glossary rejected, 2 malformed record(s): #0: missing or empty `target`; #1: missing or empty `source`
    ");

    Ok(())
}

#[test]
fn test_invalid_flagged_state_is_fatal() -> Result<()> {
    let test = CliTest::with_catalog(CATALOG)?;
    test.write_file("flagged.json", "")?;

    let mut cmd = test.check_command();
    cmd.args(["--flagged", "flagged.json"]);
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Failed to load flagged state: flagged.json: invalid flagged state: EOF while parsing a value at line 1 column 0
    ");

    Ok(())
}

#[test]
fn test_unparsable_catalog_is_a_warning() -> Result<()> {
    let test = CliTest::with_catalog(CLEAN_CATALOG)?;
    test.write_file("locales/broken.po", "msgid \"unterminated\nmsgstr \"x\"\n")?;

    let mut cmd = test.check_command();
    cmd.env("RUST_LOG", "error");
    assert_cmd_snapshot!(cmd, @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: "line 1: malformed string literal"  parse-error
      --> locales/broken.po

    ✘ 1 problem (0 errors, 1 warning)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_verbose_logs_to_stderr() -> Result<()> {
    let test = CliTest::with_catalog(CLEAN_CATALOG)?;

    let mut cmd = test.check_command();
    cmd.arg("-v");
    let output = cmd.output()?;

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("scan finished"));
    assert!(stderr.contains("catalogs=1"));

    Ok(())
}
