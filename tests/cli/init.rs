use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CATALOG, CATALOG_PATH, CliTest, GLOSSARY};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .glosscheckrc.json

    ----- stderr -----
    ");

    let config: Value = serde_json::from_str(&test.read_file(".glosscheckrc.json")?)?;
    assert_eq!(config["glossary"], "glossary.json");
    assert_eq!(config["includes"], Value::Array(vec![]));
    assert!(config["ignores"].as_array().is_some_and(|a| !a.is_empty()));
    assert!(config.get("flaggedState").is_none());

    Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
    let test = CliTest::with_file(".glosscheckrc.json", r#"{ "glossary": "terms.json" }"#)?;

    let mut cmd = test.command();
    cmd.arg("init");
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: .glosscheckrc.json already exists
    ");

    assert_eq!(
        test.read_file(".glosscheckrc.json")?,
        r#"{ "glossary": "terms.json" }"#
    );

    Ok(())
}

#[test]
fn test_init_config_is_usable() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    assert!(cmd.output()?.status.success());

    test.write_file("glossary.json", GLOSSARY)?;
    test.write_file(CATALOG_PATH, CATALOG)?;
    assert!(test.root().join(".glosscheckrc.json").exists());

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
