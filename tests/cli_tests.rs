//! CLI tests driving the envelope-cipher binary.

use assert_cmd::Command;
use envelope_cipher::{CipherOptions, EnvelopeCipher, TextEncoding};
use predicates::prelude::*;
use tempfile::TempDir;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("envelope-cipher").expect("Failed to find binary");
    cmd.env_remove("ENVELOPE_CIPHER_SECRET")
        .env_remove("RUST_LOG");
    cmd
}

fn encrypt_one(secret: &str, value: &str) -> String {
    let output = cli()
        .args(["--secret", secret, "--iterations", "1000", "encrypt", value])
        .output()
        .expect("Failed to run encrypt");
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

#[test]
fn test_encrypt_then_decrypt() {
    let envelope = encrypt_one("s3cr3t", "hello");

    cli()
        .args(["--secret", "s3cr3t", "--iterations", "1000", "decrypt", envelope.as_str()])
        .assert()
        .success()
        .stdout("hello\n");
}

#[test]
fn test_stdin_lines() {
    let output = cli()
        .args(["--secret", "s3cr3t", "--iterations", "1000", "encrypt"])
        .write_stdin("first\n\nsecond\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let envelopes = String::from_utf8(output.stdout).unwrap();
    assert_eq!(envelopes.lines().count(), 2);

    cli()
        .args(["--secret", "s3cr3t", "--iterations", "1000", "decrypt"])
        .write_stdin(envelopes)
        .assert()
        .success()
        .stdout("first\nsecond\n");
}

#[test]
fn test_stdin_whitespace_only_line_is_a_value() {
    let output = cli()
        .args(["--secret", "s3cr3t", "--iterations", "1000", "encrypt"])
        .write_stdin("   \nnext\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let envelopes = String::from_utf8(output.stdout).unwrap();
    assert_eq!(envelopes.lines().count(), 2);

    cli()
        .args(["--secret", "s3cr3t", "--iterations", "1000", "decrypt"])
        .write_stdin(envelopes)
        .assert()
        .success()
        .stdout("   \nnext\n");
}

#[test]
fn test_secret_from_environment() {
    let envelope = encrypt_one("from-env", "value");

    cli()
        .env("ENVELOPE_CIPHER_SECRET", "from-env")
        .args(["--iterations", "1000", "decrypt", envelope.as_str()])
        .assert()
        .success()
        .stdout("value\n");
}

#[test]
fn test_wrong_secret_fails() {
    let envelope = encrypt_one("right", "value");

    cli()
        .args(["--secret", "wrong", "--iterations", "1000", "decrypt", envelope.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Authentication failed"));
}

#[test]
fn test_json_null_rejected() {
    cli()
        .args(["--secret", "s3cr3t", "--iterations", "1000", "encrypt", "--json", "null"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn test_json_number_is_text() {
    let output = cli()
        .args(["--secret", "s3cr3t", "--iterations", "1000", "encrypt", "--json", "42"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let envelope = String::from_utf8(output.stdout).unwrap();

    cli()
        .args(["--secret", "s3cr3t", "--iterations", "1000", "decrypt", envelope.trim()])
        .assert()
        .success()
        .stdout("42\n");
}

#[test]
fn test_truncated_envelope_fails() {
    cli()
        .args(["--secret", "s3cr3t", "--iterations", "1000", "decrypt", "abcd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed envelope"));
}

#[test]
fn test_empty_secret_fails() {
    cli()
        .args(["--secret", "", "encrypt", "value"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_options_file_matches_library() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("options.json");
    let options = CipherOptions::default()
        .with_encoding(TextEncoding::Base64)
        .with_salt_length(32)
        .with_pbkdf2_iterations(1000);
    options.save(&path).unwrap();

    let output = cli()
        .args(["--secret", "s3cr3t", "--options"])
        .arg(&path)
        .args(["encrypt", "from the cli"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let envelope = String::from_utf8(output.stdout).unwrap();

    let cipher = EnvelopeCipher::with_options("s3cr3t", options).unwrap();
    assert_eq!(cipher.decrypt(envelope.trim()).unwrap(), "from the cli");
}

#[test]
fn test_flags_override_options_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("options.json");
    std::fs::write(&path, r#"{"encoding":"base64","pbkdf2Iterations":1000}"#).unwrap();

    let output = cli()
        .args(["--secret", "s3cr3t", "--encoding", "hex", "--options"])
        .arg(&path)
        .args(["encrypt", "override"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let envelope = String::from_utf8(output.stdout).unwrap();

    let cipher = EnvelopeCipher::with_options(
        "s3cr3t",
        CipherOptions::default().with_pbkdf2_iterations(1000),
    )
    .unwrap();
    assert_eq!(cipher.decrypt(envelope.trim()).unwrap(), "override");
}
