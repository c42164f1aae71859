use std::path::PathBuf;

use serde::Serialize;
use vidpack_container::{lock_path, ContainerError, Ffmpeg, ScratchDir};

use crate::cmd::DoctorArgs;
use crate::exit::{CliResult, HEALTH_CHECK_FAILED, SUCCESS};
use crate::output::OutputFormat;

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Pass,
    Fail,
    Warn,
    Skip,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    detail: String,
}

#[derive(Debug, Serialize)]
struct DoctorOutput {
    schema_id: &'static str,
    checks: Vec<CheckResult>,
    overall: &'static str,
}

pub fn run(args: DoctorArgs, format: OutputFormat) -> CliResult<i32> {
    let checks = vec![
        ffmpeg_check(&Ffmpeg::new(&args.ffmpeg, 1, "ffv1")),
        temp_dir_writable_check(),
        scratch_dir_check(std::env::var_os("VIDPACK_SCRATCH_DIR").map(PathBuf::from)),
    ];

    let has_fail = checks.iter().any(|c| matches!(c.status, CheckStatus::Fail));
    let overall = if has_fail { "fail" } else { "pass" };

    let output = DoctorOutput {
        schema_id: "https://schemas.3leaps.dev/vidpack/cli/v1/doctor-report.schema.json",
        checks,
        overall,
    };

    print_doctor(&output, format);

    if has_fail {
        Ok(HEALTH_CHECK_FAILED)
    } else {
        Ok(SUCCESS)
    }
}

fn print_doctor(output: &DoctorOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => crate::output::print_json(output),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("vidpack doctor\n");
            for c in &output.checks {
                println!(
                    "  [{:>4}] {:<18} {}",
                    status_text(c.status),
                    c.name,
                    c.detail
                );
            }
            if output.overall == "pass" {
                println!("\n  Result: all checks passed");
            } else {
                println!("\n  Result: one or more checks failed");
            }
        }
        OutputFormat::Raw => {
            println!("{}", output.overall);
        }
    }
}

fn status_text(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "PASS",
        CheckStatus::Fail => "FAIL",
        CheckStatus::Warn => "WARN",
        CheckStatus::Skip => "SKIP",
    }
}

fn ffmpeg_check(ffmpeg: &Ffmpeg) -> CheckResult {
    match ffmpeg.version() {
        Ok(version) => CheckResult {
            name: "ffmpeg".to_string(),
            status: CheckStatus::Pass,
            detail: version,
        },
        Err(err) => CheckResult {
            name: "ffmpeg".to_string(),
            status: CheckStatus::Fail,
            detail: err.to_string(),
        },
    }
}

fn temp_dir_writable_check() -> CheckResult {
    let result = ScratchDir::temporary(false).and_then(|scratch| {
        let marker = scratch.path().join("frame_0000.png");
        std::fs::write(&marker, b"").map_err(|source| ContainerError::Io {
            path: marker.clone(),
            source,
        })
    });

    match result {
        Ok(()) => CheckResult {
            name: "temp_dir_writable".to_string(),
            status: CheckStatus::Pass,
            detail: format!("{} accepts frame files", std::env::temp_dir().display()),
        },
        Err(err) => CheckResult {
            name: "temp_dir_writable".to_string(),
            status: CheckStatus::Fail,
            detail: err.to_string(),
        },
    }
}

fn scratch_dir_check(path: Option<PathBuf>) -> CheckResult {
    let Some(path) = path else {
        return CheckResult {
            name: "scratch_dir".to_string(),
            status: CheckStatus::Skip,
            detail: "VIDPACK_SCRATCH_DIR not set".to_string(),
        };
    };

    if path.exists() && !path.is_dir() {
        return CheckResult {
            name: "scratch_dir".to_string(),
            status: CheckStatus::Fail,
            detail: format!("{} is not a directory", path.display()),
        };
    }

    let lock = lock_path(&path);
    if lock.exists() {
        let owner = std::fs::read_to_string(&lock).unwrap_or_default();
        return CheckResult {
            name: "scratch_dir".to_string(),
            status: CheckStatus::Warn,
            detail: format!(
                "{} is locked by pid {} (taken over if that process has exited)",
                path.display(),
                owner.trim()
            ),
        };
    }

    CheckResult {
        name: "scratch_dir".to_string(),
        status: CheckStatus::Pass,
        detail: format!("{} is available", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doctor_output_has_overall_status() {
        let checks = vec![CheckResult {
            name: "x".to_string(),
            status: CheckStatus::Pass,
            detail: "ok".to_string(),
        }];
        let output = DoctorOutput {
            schema_id: "x",
            checks,
            overall: "pass",
        };
        let json = serde_json::to_string(&output).expect("doctor output should serialize");
        assert!(json.contains("\"overall\":\"pass\""));
    }

    #[test]
    fn missing_ffmpeg_fails_check() {
        let check = ffmpeg_check(&Ffmpeg::new("/nonexistent/vidpack-ffmpeg", 24, "ffv1"));
        assert!(matches!(check.status, CheckStatus::Fail));
        assert!(check.detail.contains("could not be started"));
    }

    #[test]
    fn temp_dir_is_writable() {
        let check = temp_dir_writable_check();
        assert!(matches!(check.status, CheckStatus::Pass), "{}", check.detail);
    }

    #[test]
    fn scratch_lock_is_found_for_trailing_separator() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("frames");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(root.path().join("frames.lock"), b"4242\n").unwrap();

        let mut with_slash = dir.into_os_string();
        with_slash.push("/");
        let check = scratch_dir_check(Some(PathBuf::from(with_slash)));
        assert!(matches!(check.status, CheckStatus::Warn), "{}", check.detail);
        assert!(check.detail.contains("pid 4242"));
    }

    #[test]
    fn unset_scratch_dir_is_skipped() {
        assert!(matches!(scratch_dir_check(None).status, CheckStatus::Skip));
    }
}
