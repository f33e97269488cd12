//! End-to-end tests for the `xlf-sync` binary.

#![cfg(feature = "cli")]

use std::fs;
use std::process::Command;

const SOURCE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff version="1.2">
  <file source-language="en">
    <body>
      <trans-unit id="a">
        <source>One</source>
      </trans-unit>
      <trans-unit id="b">
        <source>Two</source>
      </trans-unit>
    </body>
  </file>
</xliff>"#;

const PREVIOUS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff version="1.2">
  <file source-language="en" target-language="de">
    <body>
      <trans-unit id="a">
        <source>One</source>
        <target>Eins</target>
      </trans-unit>
    </body>
  </file>
</xliff>"#;

fn xlf_sync() -> Command {
    Command::new(env!("CARGO_BIN_EXE_xlf-sync"))
}

#[test]
fn test_cli_writes_synchronized_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("messages.xlf");
    let target = dir.path().join("messages.de.xlf");
    fs::write(&source, format!("{SOURCE}\n")).unwrap();
    fs::write(&target, PREVIOUS).unwrap();

    let output = xlf_sync()
        .arg(&source)
        .args(["--lang", "de", "--target"])
        .arg(&target)
        .arg("--output")
        .arg(&target)
        .output()
        .expect("Failed to run xlf-sync");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("2 units: 1 matched, 1 need translation"));

    let written = fs::read_to_string(&target).unwrap();
    assert!(written.contains(r#"<file source-language="en" target-language="de">"#));
    assert!(written.contains("<source>One</source>\n        <target>Eins</target>"));
    assert!(written.contains("<source>Two</source>\n        <target>NOT TRANSLATED YET</target>"));
    assert!(written.ends_with("</xliff>\n"));
}

#[test]
fn test_cli_reads_config_and_prints_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("messages.xlf");
    let config = dir.path().join("settings.json");
    fs::write(&source, SOURCE).unwrap();
    fs::write(&config, r#"{ "missingTranslation": "TODO" }"#).unwrap();

    let output = xlf_sync()
        .arg(&source)
        .args(["-l", "fr", "-q", "--config"])
        .arg(&config)
        .output()
        .expect("Failed to run xlf-sync");

    assert!(output.status.success());
    assert!(output.stderr.is_empty());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<xliff version=\"1.2\">"));
    assert_eq!(stdout.matches("<target>TODO</target>").count(), 2);
}

#[test]
fn test_cli_rejects_invalid_source() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("broken.xlf");
    fs::write(&source, r#"<xliff version="1.0"><file/></xliff>"#).unwrap();

    let output = xlf_sync()
        .arg(&source)
        .args(["--lang", "de"])
        .output()
        .expect("Failed to run xlf-sync");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not a valid XLIFF"));
}
