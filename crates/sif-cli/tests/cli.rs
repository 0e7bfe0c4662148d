//! End-to-end tests for the siftool binary.

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Test context holding a scratch directory with one object file in it
struct TestContext {
    temp_dir: TempDir,
    object: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let object = temp_dir.path().join("rootfs.squashfs");
        std::fs::write(&object, [0xde, 0xad, 0xbe, 0xef]).expect("failed to write object");

        Self { temp_dir, object }
    }

    fn siftool(&self, args: &[&str]) -> Output {
        let bin_path = env!("CARGO_BIN_EXE_siftool");
        Command::new(bin_path)
            .current_dir(self.temp_dir.path())
            .env_remove("RUST_LOG")
            .args(args)
            .output()
            .expect("failed to run siftool")
    }

    fn add(&self, extra: &[&str]) -> Output {
        let object = self.object.to_str().expect("utf-8 temp path");
        let mut args = vec!["--json", "add", "image.sif", object];
        args.extend_from_slice(extra);
        self.siftool(&args)
    }
}

fn json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "siftool failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx.siftool(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
}

#[test]
fn test_add_partition() {
    let ctx = TestContext::new();
    let report = json(&ctx.add(&[
        "--datatype",
        "4",
        "--partfs",
        "1",
        "--parttype",
        "2",
        "--partarch",
        "2",
    ]));

    assert_eq!(report["data_type"], "Partition");
    assert_eq!(report["extra"], "0100000002000000303200");
    assert_eq!(report["metadata"][0], "Squashfs *System amd64");
    assert_eq!(report["name"], "rootfs.squashfs");
    assert_eq!(report["group_id"], 0xf000_0000_u32);
}

#[test]
fn test_add_signature_with_group_and_link() {
    let ctx = TestContext::new();
    let report = json(&ctx.add(&[
        "--datatype",
        "5",
        "--signhash",
        "1",
        "--signentity",
        "433FE984155206BD962725E20E8713472A879943",
        "--groupid",
        "1",
        "--link",
        "2",
        "--alignment",
        "0",
        "--filename",
        "sig",
    ]));

    assert_eq!(report["group_id"], 0xf000_0001_u32);
    assert_eq!(report["link_id"], 2);
    assert_eq!(report["alignment"], 0);
    assert_eq!(report["name"], "sig");
    assert_eq!(
        report["metadata"][0],
        "SHA256 433FE984155206BD962725E20E8713472A879943"
    );
}

#[test]
fn test_add_rejects_bad_entity() {
    let ctx = TestContext::new();
    let output = ctx.add(&["--datatype", "5", "--signhash", "1", "--signentity", "ZZ"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_add_partition_requires_all_flags() {
    let ctx = TestContext::new();
    let output = ctx.add(&["--datatype", "4", "--partfs", "1"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--partarch"));
}

#[test]
fn test_add_rejects_unknown_datatype() {
    let ctx = TestContext::new();
    let output = ctx.add(&["--datatype", "9"]);
    assert!(!output.status.success());
}

#[test]
fn test_add_missing_object_file() {
    let ctx = TestContext::new();
    let output = ctx.siftool(&["add", "image.sif", "missing.bin", "--datatype", "7"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to open"));
}

#[test]
fn test_arch_listing() {
    let ctx = TestContext::new();
    let output = ctx.siftool(&["arch", "--json"]);
    let listing = json(&output);

    assert_eq!(listing.as_array().map(Vec::len), Some(11));
    assert_eq!(listing[1]["name"], "amd64");
    assert_eq!(listing[1]["tag"], "02");
}
