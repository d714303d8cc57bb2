//! End-to-end tests: run the `profile-page` binary against a temp profile.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const DATA: &str = r#"{
  "name": "Jane <Doe>",
  "contact": { "location": "Rome, Italy" },
  "sections": [
    {
      "title": "Skills",
      "blocks": [
        {
          "rows": [
            { "title": "Skill", "type": "text", "value": "Go" },
            { "title": "Grid", "type": "table", "value": [["a", "b"], ["c", "d"]] }
          ]
        }
      ]
    },
    {
      "title": "About",
      "blocks": [
        { "rows": [{ "title": "Bio", "type": "plain", "value": "*Builds* things\n_daily_" }] }
      ]
    }
  ]
}
"#;

const TEMPLATE: &str = "<html><head><title>{{name}}</title></head><body>{{content}}</body></html>";

fn write_profile(dir: &Path) {
    fs::write(dir.join("data.json"), DATA).unwrap();
    fs::write(dir.join("template.html"), TEMPLATE).unwrap();
    fs::write(dir.join("style.css"), "h1 { color: teal; }").unwrap();
}

fn run(source: &Path, output: &Path, args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_profile-page"));
    cmd.args(args)
        .arg("--source")
        .arg(source)
        .arg("--output")
        .arg(output)
        .env_remove("PII_EMAIL")
        .env_remove("PII_PHONE");
    for (k, v) in env {
        cmd.env(k, v);
    }
    cmd.output().expect("failed to run profile-page")
}

const SECRETS: &[(&str, &str)] = &[
    ("PII_EMAIL", "jane@example.com"),
    ("PII_PHONE", "+39 345 123 7212"),
];

#[test]
fn build_renders_page_and_copies_stylesheet() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_profile(src.path());
    let dist = out.path().join("dist");

    let result = run(src.path(), &dist, &["build"], SECRETS);
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

    let page = fs::read_to_string(dist.join("index.html")).unwrap();
    assert!(page.contains("<title>Jane &lt;Doe&gt;</title>"));
    assert!(page.contains(r#"<div class="label">Skill</div><div class="value">Go</div>"#));
    assert!(page.contains(r#"<div class="label">Grid</div>"#));
    assert!(page.contains("<tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr>"));
    assert!(page.contains("<strong>Builds</strong> things<br><em>daily</em>"));
    assert!(page.contains("***@example.com"));
    assert!(page.contains("+39 *** *** 7212"));
    assert!(!page.contains("jane@example.com"));

    assert_eq!(
        fs::read_to_string(dist.join("style.css")).unwrap(),
        "h1 { color: teal; }"
    );

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("001 Skills (2 rows)"));
    assert!(stdout.contains("002 About (1 row)"));
}

#[test]
fn missing_email_fails_without_output() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_profile(src.path());
    let dist = out.path().join("dist");

    let result = run(src.path(), &dist, &["build"], &[("PII_PHONE", "+39 345 123 7212")]);

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("PII_EMAIL"), "stderr: {stderr}");
    assert!(!dist.join("index.html").exists());
    assert!(!dist.exists());
}

#[test]
fn empty_phone_fails_without_output() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_profile(src.path());
    let dist = out.path().join("dist");

    let result = run(
        src.path(),
        &dist,
        &["build"],
        &[("PII_EMAIL", "jane@example.com"), ("PII_PHONE", "")],
    );

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("PII_PHONE"));
    assert!(!dist.exists());
}

#[test]
fn malformed_document_fails_without_output() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_profile(src.path());
    fs::write(src.path().join("data.json"), "{\"name\": ").unwrap();
    let dist = out.path().join("dist");

    let result = run(src.path(), &dist, &["build"], SECRETS);

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("data.json"));
    assert!(!dist.exists());
}

#[test]
fn missing_marker_still_builds() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_profile(src.path());
    fs::write(src.path().join("template.html"), "<main>{{content}}</main>").unwrap();
    let dist = out.path().join("dist");

    let result = run(src.path(), &dist, &["build"], SECRETS);

    assert!(result.status.success());
    let page = fs::read_to_string(dist.join("index.html")).unwrap();
    assert!(page.starts_with("<main><header"));
    assert!(String::from_utf8_lossy(&result.stdout).contains("Warning: template has no {{name}}"));
}

#[test]
fn strict_markers_rejects_incomplete_template() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_profile(src.path());
    fs::write(src.path().join("template.html"), "<main>{{content}}</main>").unwrap();
    fs::write(src.path().join("config.toml"), "strict_markers = true\n").unwrap();
    let dist = out.path().join("dist");

    let result = run(src.path(), &dist, &["build"], SECRETS);

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("{{name}}"));
    assert!(!dist.exists());
}

#[test]
fn check_writes_nothing() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_profile(src.path());
    let dist = out.path().join("dist");

    let result = run(src.path(), &dist, &["check"], SECRETS);

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Template: all markers present"));
    assert!(!dist.exists());
}

#[test]
fn gen_config_prints_defaults() {
    let tmp = TempDir::new().unwrap();
    let result = run(tmp.path(), tmp.path(), &["gen-config"], &[]);
    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("data = \"data.json\""));
    assert!(stdout.contains("[markers]"));
}

#[test]
fn gen_template_output_builds() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_profile(src.path());
    let generated = run(src.path(), out.path(), &["gen-template"], &[]);
    assert!(generated.status.success());
    fs::write(src.path().join("template.html"), &generated.stdout).unwrap();

    let result = run(src.path(), out.path(), &["build"], SECRETS);

    assert!(result.status.success());
    let page = fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(page.contains("<title>Jane &lt;Doe&gt;</title>"));
    assert!(page.contains(r#"href="style.css""#));
    assert!(!page.contains("{{content}}"));
}
