use anyhow::Result;
use insta::assert_snapshot;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::CliTest;

const TWO_LANGS: &str = r#"{ "supportedLangs": ["en", "fr"] }"#;
const ENGLISH: &str = r#"{ "supportedLangs": ["en"] }"#;

fn project(config: &str, source: &str) -> Result<CliTest> {
    let test = CliTest::with_file(".speakrc.json", config)?;
    test.write_file("src/app.tsx", source)?;
    Ok(test)
}

#[test]
fn test_extract_writes_base_and_scoped_files() -> Result<()> {
    let test = project(
        TWO_LANGS,
        r#"import { $translate as t } from 'qwik-speak';
export const App = () => <div>{t(['a.b', 'a.c'])}{t('d')}</div>;
"#,
    )?;

    assert_cmd_snapshot!(test.extract_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    i18n/en/app.json
    i18n/en/a.json
    i18n/fr/app.json
    i18n/fr/a.json
    ✓ extracted keys: 3

    ----- stderr -----
    ");

    assert_snapshot!(test.read_file("i18n/en/app.json")?, @r#"
{
  "d": ""
}
"#);
    assert_snapshot!(test.read_file("i18n/en/a.json")?, @r#"
{
  "a": {
    "b": "",
    "c": ""
  }
}
"#);
    assert_eq!(
        test.read_file("i18n/fr/a.json")?,
        test.read_file("i18n/en/a.json")?
    );
    Ok(())
}

#[test]
fn test_extract_keeps_existing_translations() -> Result<()> {
    let test = project(
        TWO_LANGS,
        "export const App = () => $translate(['a.b', 'a.c']);\n",
    )?;
    test.write_file("i18n/fr/a.json", r#"{ "a": { "b": "Bonjour", "old": "x" } }"#)?;

    assert_cmd_snapshot!(test.extract_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    i18n/en/a.json
    i18n/fr/a.json
    ✓ extracted keys: 2

    ----- stderr -----
    ");

    assert_snapshot!(test.read_file("i18n/fr/a.json")?, @r#"
{
  "a": {
    "b": "Bonjour",
    "c": "",
    "old": "x"
  }
}
"#);
    Ok(())
}

#[test]
fn test_extract_is_idempotent() -> Result<()> {
    let test = project(
        TWO_LANGS,
        "export const App = () => $translate(['home.title@@Welcome', 'nav.home']);\n",
    )?;

    test.extract_command().output()?;
    let first = test.read_file("i18n/en/home.json")?;

    assert_cmd_snapshot!(test.extract_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    i18n/en/home.json
    i18n/en/nav.json
    i18n/fr/home.json
    i18n/fr/nav.json
    ✓ extracted keys: 2

    ----- stderr -----
    ");

    assert_eq!(first, test.read_file("i18n/en/home.json")?);
    assert!(first.contains(r#""title": "Welcome""#));
    Ok(())
}

#[test]
fn test_extract_default_value_in_base_file() -> Result<()> {
    let test = project(
        ENGLISH,
        "export const App = () => $translate('app.title@@Speak');\n",
    )?;

    assert_cmd_snapshot!(test.extract_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    i18n/en/app.json
    ✓ extracted keys: 1

    ----- stderr -----
    ");

    assert_snapshot!(test.read_file("i18n/en/app.json")?, @r#"
{
  "app": {
    "title": "Speak"
  }
}
"#);
    Ok(())
}

#[test]
fn test_extract_plural_keys() -> Result<()> {
    let test = project(
        ENGLISH,
        r#"import { $plural as p } from 'qwik-speak';
export const Items = ({ count }) => p(count, 'item');
"#,
    )?;

    assert_cmd_snapshot!(test.extract_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    i18n/en/item.json
    ✓ extracted keys: 2

    ----- stderr -----
    ");

    assert_snapshot!(test.read_file("i18n/en/item.json")?, @r#"
{
  "item": {
    "one": "",
    "other": ""
  }
}
"#);
    Ok(())
}

#[test]
fn test_extract_plural_with_unsupported_key_is_skipped() -> Result<()> {
    let test = project(
        ENGLISH,
        r#"export const Items = ({ count, cond }) => [
  $translate('a.b'),
  $plural(count, cond ? 'a.x' : 'a.y'),
  $plural(count, 5),
];
"#,
    )?;

    assert_cmd_snapshot!(test.extract_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    i18n/en/a.json
    ✓ extracted keys: 1

    ----- stderr -----
    warning: 2 call site(s) with an unsupported key argument skipped (use -v for details)
    ");

    assert!(!test.root().join("i18n/en/app.json").exists());
    Ok(())
}

#[test]
fn test_extract_reports_dynamic_keys() -> Result<()> {
    let test = project(
        ENGLISH,
        r#"export const App = ({ key, count }) => [
  $translate('a.b'),
  $translate(key),
  $plural(count, key),
];
"#,
    )?;

    assert_cmd_snapshot!(test.extract_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    i18n/en/a.json
    ✓ extracted keys: 1
    skipped keys due to dynamic params: 1
    skipped plurals due to dynamic params: 1

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_extract_lang_flag_overrides_config() -> Result<()> {
    let test = project(TWO_LANGS, "export const App = () => $translate('d');\n")?;

    assert_cmd_snapshot!(test.extract_command().args(["--lang", "de"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    i18n/de/app.json
    ✓ extracted keys: 1

    ----- stderr -----
    ");

    assert!(!test.root().join("i18n/en").exists());
    Ok(())
}

#[test]
fn test_extract_skips_test_files_and_unparsable_files() -> Result<()> {
    let test = project(ENGLISH, "export const App = () => $translate('kept');\n")?;
    test.write_file("src/app.test.tsx", "$translate('ignored');\n")?;
    test.write_file("src/broken.ts", "const = $translate('never';\n")?;

    assert_cmd_snapshot!(test.extract_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    i18n/en/app.json
    ✓ extracted keys: 1

    ----- stderr -----
    warning: 1 file(s) could not be parsed (use -v for details)
    ");

    assert_snapshot!(test.read_file("i18n/en/app.json")?, @r#"
{
  "kept": ""
}
"#);
    Ok(())
}

#[test]
fn test_extract_without_config_uses_defaults() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", "$translate('d');\n")?;

    assert_cmd_snapshot!(test.extract_command().arg("--verbose"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    i18n/en-US/app.json
    ✓ extracted keys: 1

    ----- stderr -----
    Note: No .speakrc.json found, using default configuration
    ");
    Ok(())
}

#[test]
fn test_extract_from_subdirectory_uses_config_location() -> Result<()> {
    let test = project(ENGLISH, "export const App = () => $translate('d');\n")?;
    test.write_file("src/components/button.tsx", "$translate('button.label');\n")?;

    let mut cmd = test.extract_command();
    cmd.current_dir(test.root().join("src/components"));

    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ../../i18n/en/app.json
    ../../i18n/en/button.json
    ✓ extracted keys: 2

    ----- stderr -----
    ");

    assert!(test.root().join("i18n/en/button.json").exists());
    assert!(!test.root().join("src/components/i18n").exists());
    Ok(())
}

#[test]
fn test_extract_invalid_language_is_an_error() -> Result<()> {
    let test = project(r#"{ "supportedLangs": ["xx"] }"#, "$translate('d');\n")?;

    assert_cmd_snapshot!(test.extract_command(), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Invalid language in 'supportedLangs': "xx": No Cardinal plural rules for language "xx"
    "#);

    assert!(!test.root().join("i18n").exists());
    Ok(())
}

#[test]
fn test_extract_key_unusable_as_file_name_writes_nothing() -> Result<()> {
    let test = project(
        TWO_LANGS,
        "$translate('d');\n$translate('errors/404.title');\n",
    )?;

    assert_cmd_snapshot!(test.extract_command(), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Cannot write assets for "en": Cannot use key "errors/404" as an asset file name
    "#);

    assert!(!test.root().join("i18n").exists());
    Ok(())
}

#[test]
fn test_extract_missing_source_root_is_an_error() -> Result<()> {
    let test = CliTest::with_file(
        ".speakrc.json",
        r#"{ "supportedLangs": ["en"], "sourceFilesPaths": ["app"] }"#,
    )?;

    assert_cmd_snapshot!(test.extract_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Source path does not exist: app
    ");
    Ok(())
}
