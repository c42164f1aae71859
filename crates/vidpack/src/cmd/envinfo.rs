use std::collections::BTreeMap;

use serde::Serialize;
use vidpack_container::{ContainerConfig, FRAME_PATTERN};

use crate::cmd::EnvinfoArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_json, OutputFormat};

const ENV_KEYS: [&str; 3] = ["VIDPACK_FFMPEG", "VIDPACK_SCRATCH_DIR", "RUST_LOG"];

#[derive(Serialize)]
struct EnvInfoOutput {
    schema_id: &'static str,
    version: &'static str,
    target: String,
    os: &'static str,
    arch: &'static str,
    temp_dir: String,
    frame_pattern: &'static str,
    defaults: Defaults,
    environment: BTreeMap<&'static str, Option<String>>,
}

#[derive(Serialize)]
struct Defaults {
    width: u32,
    height: u32,
    frame_rate: u32,
    codec: String,
    container_ext: String,
    ffmpeg: String,
}

impl From<ContainerConfig> for Defaults {
    fn from(config: ContainerConfig) -> Self {
        Self {
            width: config.dims.width,
            height: config.dims.height,
            frame_rate: config.frame_rate,
            codec: config.codec,
            container_ext: config.container_ext,
            ffmpeg: config.ffmpeg.display().to_string(),
        }
    }
}

pub fn run(_args: EnvinfoArgs, format: OutputFormat) -> CliResult<i32> {
    let output = EnvInfoOutput {
        schema_id: "https://schemas.3leaps.dev/vidpack/cli/v1/envinfo.schema.json",
        version: env!("CARGO_PKG_VERSION"),
        target: option_env!("VIDPACK_BUILD_TARGET")
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS)),
        os: std::env::consts::OS,
        arch: std::env::consts::ARCH,
        temp_dir: std::env::temp_dir().display().to_string(),
        frame_pattern: FRAME_PATTERN,
        defaults: ContainerConfig::default().into(),
        environment: ENV_KEYS
            .iter()
            .map(|key| (*key, std::env::var(key).ok()))
            .collect(),
    };

    match format {
        OutputFormat::Json => print_json(&output),
        OutputFormat::Table | OutputFormat::Pretty => print_summary(&output),
        OutputFormat::Raw => println!("{}", output.version),
    }
    Ok(SUCCESS)
}

fn print_summary(output: &EnvInfoOutput) {
    let d = &output.defaults;
    println!("vidpack {} ({})", output.version, output.target);
    println!("  temp dir:  {}", output.temp_dir);
    println!("  frames:    {} at {}x{}", output.frame_pattern, d.width, d.height);
    println!(
        "  container: .{} via {} ({}, {} fps)",
        d.container_ext, d.ffmpeg, d.codec, d.frame_rate
    );
    for (key, value) in &output.environment {
        println!("  {key}={}", value.as_deref().unwrap_or(""));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_container_config() {
        let defaults = Defaults::from(ContainerConfig::default());
        assert_eq!((defaults.width, defaults.height), (640, 480));
        assert_eq!(defaults.codec, "ffv1");
        assert_eq!(defaults.ffmpeg, "ffmpeg");
    }

    #[test]
    fn envinfo_json_lists_every_variable() {
        let out = EnvInfoOutput {
            schema_id: "x",
            version: "0.1.0",
            target: "x86_64-unknown-linux-gnu".to_string(),
            os: "linux",
            arch: "x86_64",
            temp_dir: "/tmp".to_string(),
            frame_pattern: FRAME_PATTERN,
            defaults: ContainerConfig::default().into(),
            environment: ENV_KEYS.iter().map(|key| (*key, None)).collect(),
        };

        let json = serde_json::to_string(&out).expect("envinfo output should serialize");
        assert!(json.contains("\"schema_id\":\"x\""));
        assert!(json.contains("\"VIDPACK_SCRATCH_DIR\":null"));
        assert!(json.contains("\"frame_pattern\":\"frame_%04d.png\""));
    }
}
