// e2e/cli_integration.rs: CLI integration tests
//
// Runs the `lzvn` binary as a black box with std::process::Command: output
// naming, stdout and test modes, overwrite protection, size limits and exit
// codes.

#[path = "../tests/support/encoder.rs"]
mod encoder;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

use encoder::{encode, encode_literal_pieces, mixed_corpus};

fn lzvn_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_lzvn"))
}

fn lzvn(args: &[&str]) -> Output {
    Command::new(lzvn_bin())
        .args(args)
        .env_remove("LZVN_BLOCK_SIZE")
        .env_remove("LZVN_NBWORKERS")
        .output()
        .expect("failed to run lzvn")
}

/// Write an encoded copy of `data` to `<dir>/<name>`.
fn make_block(dir: &TempDir, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, encode(data)).unwrap();
    path
}

fn s(p: &Path) -> &str {
    p.to_str().unwrap()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

// ── 1. Output naming ─────────────────────────────────────────────────────────

#[test]
fn test_cli_derived_output_name() {
    let dir = TempDir::new().unwrap();
    let data = mixed_corpus(5_000);
    let input = make_block(&dir, "corpus.txt.lzvn", &data);

    let out = lzvn(&[s(&input)]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(fs::read(dir.path().join("corpus.txt")).unwrap(), data);
    assert!(input.exists(), "input must be kept");
}

#[test]
fn test_cli_explicit_output() {
    let dir = TempDir::new().unwrap();
    let input = make_block(&dir, "raw.bin", b"named output");
    let output = dir.path().join("decoded.txt");

    let out = lzvn(&["-o", s(&output), s(&input)]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(fs::read(&output).unwrap(), b"named output");
}

#[test]
fn test_cli_unknown_suffix_fails() {
    let dir = TempDir::new().unwrap();
    let input = make_block(&dir, "raw.bin", b"data");

    let out = lzvn(&[s(&input)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("unknown suffix"), "stderr: {}", stderr(&out));
}

#[test]
fn test_cli_multiple_inputs() {
    let dir = TempDir::new().unwrap();
    let a = make_block(&dir, "a.lzvn", b"first");
    let b = make_block(&dir, "b.lzvn", b"second");

    let out = lzvn(&["-T", "2", s(&a), s(&b)]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(fs::read(dir.path().join("a")).unwrap(), b"first");
    assert_eq!(fs::read(dir.path().join("b")).unwrap(), b"second");
}

#[test]
fn test_cli_output_with_multiple_inputs_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let a = make_block(&dir, "a.lzvn", b"first");
    let b = make_block(&dir, "b.lzvn", b"second");

    let out = lzvn(&["-o", s(&dir.path().join("x")), s(&a), s(&b)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("bad usage"), "stderr: {}", stderr(&out));
}

// ── 2. Stdout and test modes ─────────────────────────────────────────────────

#[test]
fn test_cli_stdout_concatenates_in_order() {
    let dir = TempDir::new().unwrap();
    let a = make_block(&dir, "a.lzvn", b"one ");
    let b = make_block(&dir, "b.lzvn", b"two ");
    let c = make_block(&dir, "c.lzvn", b"three");

    let out = lzvn(&["-c", s(&a), s(&b), s(&c)]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(out.stdout, b"one two three");
    assert!(out.stderr.is_empty(), "stdout mode should be silent: {}", stderr(&out));
}

#[test]
fn test_cli_stdin_to_stdout() {
    let data = mixed_corpus(20_000);
    let mut child = Command::new(lzvn_bin())
        .args(["-c", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(&encode(&data)).unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(out.stdout, data);
}

#[test]
fn test_cli_test_mode_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = make_block(&dir, "t.lzvn", b"integrity check");

    let out = lzvn(&["-t", s(&input)]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(out.stdout.is_empty());
    assert!(!dir.path().join("t").exists());
}

#[test]
fn test_cli_test_mode_detects_corruption() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.lzvn");
    fs::write(&input, [0xe1, b'a', 0x7f]).unwrap();

    let out = lzvn(&["-t", s(&input)]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("invalid opcode 0x7f at offset 2"), "stderr: {err}");
}

// ── 3. Overwrite protection ──────────────────────────────────────────────────

#[test]
fn test_cli_refuses_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    let input = make_block(&dir, "f.lzvn", b"fresh");
    let existing = dir.path().join("f");
    fs::write(&existing, b"stale").unwrap();

    let out = lzvn(&[s(&input)]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(fs::read(&existing).unwrap(), b"stale");

    let out = lzvn(&["-f", s(&input)]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(fs::read(&existing).unwrap(), b"fresh");
}

#[test]
fn test_cli_partial_failure_still_writes_good_inputs() {
    let dir = TempDir::new().unwrap();
    let good = make_block(&dir, "good.lzvn", b"survives");
    let bad = dir.path().join("bad.lzvn");
    fs::write(&bad, [0x00, 0x01]).unwrap();

    let out = lzvn(&[s(&bad), s(&good)]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(fs::read(dir.path().join("good")).unwrap(), b"survives");
    assert!(!dir.path().join("bad").exists());
}

// ── 4. Block size ────────────────────────────────────────────────────────────

/// Write `data` as four-byte literal runs, so every multiple of 4 is a
/// valid place for the output capacity to end.
fn make_pieces(dir: &TempDir, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, encode_literal_pieces(data, 4)).unwrap();
    path
}

#[test]
fn test_cli_size_limits_output() {
    let dir = TempDir::new().unwrap();
    let input = make_pieces(&dir, "s.lzvn", b"abcdefghijklmnop");

    let out = lzvn(&["-c", "-s", "4", s(&input)]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(out.stdout, b"abcd");
}

#[test]
fn test_cli_size_inside_literal_run_fails() {
    let dir = TempDir::new().unwrap();
    let input = make_pieces(&dir, "o.lzvn", b"abcdefghijklmnop");

    let out = lzvn(&["-c", "-s", "6", s(&input)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(
        stderr(&out).contains("literal size exceeds uncompressed data size"),
        "stderr: {}",
        stderr(&out)
    );
}

#[test]
fn test_cli_size_from_environment() {
    let dir = TempDir::new().unwrap();
    let input = make_pieces(&dir, "e.lzvn", b"abcdefghijklmnop");

    let out = Command::new(lzvn_bin())
        .args(["-c", s(&input)])
        .env("LZVN_BLOCK_SIZE", "8")
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(out.stdout, b"abcdefgh");
}

#[test]
fn test_cli_default_size_is_64k() {
    let dir = TempDir::new().unwrap();
    let data = mixed_corpus(100_000);
    let input = make_block(&dir, "big.lzvn", &data);

    let out = lzvn(&["-c", s(&input)]);
    // The block is cut at 64 KiB, possibly mid-match.
    if out.status.success() {
        assert_eq!(out.stdout, &data[..64 * 1024]);
    }

    let out = lzvn(&["-c", "-s", "1M", s(&input)]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(out.stdout, data);
}

#[test]
fn test_cli_exact_size() {
    let dir = TempDir::new().unwrap();
    let input = make_block(&dir, "x.lzvn", b"0123456789");

    let out = lzvn(&["-t", "--exact", "-s", "10", s(&input)]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let out = lzvn(&["-t", "--exact", "-s", "11", s(&input)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("expected exactly 11"), "stderr: {}", stderr(&out));
}

#[test]
fn test_cli_zero_size_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = make_block(&dir, "z.lzvn", b"zero");
    let out = lzvn(&["-t", "-s", "0", s(&input)]);
    assert_eq!(out.status.code(), Some(1));
}

// ── 5. Misc ──────────────────────────────────────────────────────────────────

#[test]
fn test_cli_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let out = lzvn(&[s(&dir.path().join("absent.lzvn"))]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("cannot read"), "stderr: {}", stderr(&out));
}

#[test]
fn test_cli_version() {
    let out = lzvn(&["--version"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_quiet_suppresses_success_lines() {
    let dir = TempDir::new().unwrap();
    let input = make_block(&dir, "q.lzvn", b"quiet");

    let loud = lzvn(&["-t", s(&input)]);
    assert!(stderr(&loud).contains("decoded 5 bytes"), "stderr: {}", stderr(&loud));

    let quiet = lzvn(&["-t", "-q", s(&input)]);
    assert!(quiet.status.success());
    assert!(quiet.stderr.is_empty(), "stderr: {}", stderr(&quiet));
}
