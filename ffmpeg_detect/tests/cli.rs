//! End-to-end checks of the binary's failure behavior.

use std::path::Path;
use std::process::Command;

#[test]
fn unopenable_input_exits_255_without_artifacts() {
    let input = Path::new("definitely-missing.jpg");
    let output = Command::new(env!("CARGO_BIN_EXE_ffmpeg_detect"))
        .arg(input)
        .arg("--classes")
        .arg("definitely-missing.names")
        .output()
        .expect("failed to spawn ffmpeg_detect");

    assert_eq!(output.status.code(), Some(255));
    assert!(!output.stderr.is_empty());
    assert!(!input.with_extension("out.jpg").exists());
    assert!(!input.with_extension("out.json").exists());
}
