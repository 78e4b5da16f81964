use anyhow::Result;
use std::process::{Command, Output};

fn bert_bench(args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_bert-bench"))
        .args(args)
        .output()?)
}

#[test]
fn missing_model_dir_exits_non_zero() -> Result<()> {
    let output = bert_bench(&["--model_dir", "/nonexistent/bert_sst2"])?;
    assert!(!output.status.success());
    Ok(())
}

#[test]
fn no_model_exits_non_zero() -> Result<()> {
    let output = bert_bench(&[])?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No model configured"), "stderr: {}", stderr);
    Ok(())
}

#[test]
fn zero_repeats_exits_non_zero() -> Result<()> {
    let output = bert_bench(&["--model_dir", "/tmp", "--repeats", "0"])?;
    assert!(!output.status.success());
    Ok(())
}

#[test]
fn json_mode_keeps_logs_off_stdout() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let model_dir = dir.path().to_string_lossy().into_owned();
    let output = bert_bench(&["--model_dir", &model_dir, "--format", "json"])?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Backend: cpu (mkldnn)"), "stderr: {}", stderr);

    if output.status.success() {
        // Engine linked in: stdout is exactly one JSON report.
        let report: serde_json::Value = serde_json::from_str(stdout.trim())?;
        assert!(report["label"].is_string());
    } else {
        assert!(stdout.trim().is_empty(), "stdout: {}", stdout);
    }
    Ok(())
}
