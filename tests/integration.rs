use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_shaderbuild")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Drop the three banner lines.
fn body(output: &str) -> String {
    output.splitn(4, '\n').nth(3).unwrap_or("").to_string()
}

fn write_table(dir: &TempDir, name: &str, rows: &[&str]) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, rows.join("\n") + "\n").unwrap();
    path.to_str().unwrap().to_string()
}

// -- build --

#[test]
fn build_to_stdout() {
    let expected = std::fs::read_to_string(fixture_path("post.expected.glsl")).unwrap();

    let assert = cmd()
        .args(["build", "-s", &fixture_path("shaders")])
        .arg(fixture_path("tables/post.tsv"))
        .assert()
        .success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let lines: Vec<&str> = output.lines().take(3).collect();
    assert_eq!(lines[0], "// Shader Build: post");
    assert_eq!(lines[1], "// AUTOGENERATED by Shader Build System");
    assert!(lines[2].starts_with("// DATE: "), "got: {}", lines[2]);
    assert_eq!(lines[2].len(), "// DATE: 20240101_000000".len());
    assert_eq!(body(&output), expected);
}

#[test]
fn build_with_glob() {
    let assert = cmd()
        .args(["build", "-s", &fixture_path("shaders")])
        .arg(fixture_path("tables/*.tsv"))
        .assert()
        .success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(output.starts_with("// Shader Build: post\n"));
}

#[test]
fn build_with_label() {
    cmd()
        .args(["build", "-s", &fixture_path("shaders")])
        .args(["-l", "Astra ColorTK"])
        .arg(fixture_path("tables/post.tsv"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("// Astra ColorTK: post\n"));
}

#[test]
fn build_save_writes_glsl_file() {
    let dir = TempDir::new().unwrap();
    let prepend = format!("{}/out/", dir.path().display());

    cmd()
        .args(["build", "-s", &fixture_path("shaders"), "--save"])
        .args(["-p", &prepend])
        .arg(fixture_path("tables/post.tsv"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let saved = std::fs::read_to_string(dir.path().join("out").join("post.glsl")).unwrap();
    let expected = std::fs::read_to_string(fixture_path("post.expected.glsl")).unwrap();
    assert!(saved.starts_with("// Shader Build: post\n"));
    assert_eq!(body(&saved), expected);
}

#[test]
fn build_header_mismatch_is_silent() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir, "bad.tsv", &["kind\tname\tgrp", "function\tluma\tcommon"]);

    cmd()
        .args(["build", "-s", &fixture_path("shaders")])
        .arg(&table)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn build_unknown_row_type_fails() {
    let dir = TempDir::new().unwrap();
    let table = write_table(
        &dir,
        "bad.tsv",
        &["type\tid\tclass", "comment\tnote\t", "function\tluma\tcommon"],
    );

    cmd()
        .args(["build", "-s", &fixture_path("shaders")])
        .arg(&table)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("undefined row type"));
}

#[test]
fn build_missing_function_fails() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir, "bad.tsv", &["type\tid\tclass", "function\tnope\tcommon"]);

    cmd()
        .args(["build", "-s", &fixture_path("shaders")])
        .arg(&table)
        .assert()
        .failure()
        .stderr(predicate::str::contains("function nope not found in shader class common"));
}

#[test]
fn build_missing_text_fails() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir, "bad.tsv", &["type\tid\tclass", "text\tabsent\t"]);

    cmd()
        .args(["build", "-s", &fixture_path("shaders")])
        .arg(&table)
        .assert()
        .failure()
        .stderr(predicate::str::contains("text document not found"));
}

#[test]
fn build_missing_shader_dir_fails() {
    cmd()
        .args(["build", "-s", "/definitely/not/here"])
        .arg(fixture_path("tables/post.tsv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to assemble"));
}

#[test]
fn build_requires_tables() {
    cmd().arg("build").assert().failure();
}

// -- catalog --

#[test]
fn catalog_dumps_json() {
    let assert = cmd()
        .args(["catalog", "-s", &fixture_path("shaders")])
        .assert()
        .success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["common"]["defines"][0], "#define PI 3.14159265");
    assert_eq!(json["common"]["functions"]["luma"]["params"], "vec3 c");
    assert_eq!(
        json["common"]["functions"]["gamma"]["body"],
        "\tif (g <= 0.0) {\n\t\treturn c;\n\t}\n\treturn pow(c, vec3(1.0 / g));"
    );
    assert_eq!(
        json["common"]["structs"]["Material"]["body"],
        "\n\tvec3 albedo;\n\tfloat roughness;\n"
    );
    assert_eq!(json["noise"]["functions"]["hash"]["signature"], "float hash");
}

#[test]
fn catalog_single_class() {
    let assert = cmd()
        .args(["catalog", "-s", &fixture_path("shaders"), "-c", "noise"])
        .assert()
        .success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["name"], "noise");
    assert_eq!(json["defines"][0], "#define OCTAVES 4");
}

#[test]
fn catalog_unknown_class_fails() {
    cmd()
        .args(["catalog", "-s", &fixture_path("shaders"), "-c", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown shader class: missing"));
}
