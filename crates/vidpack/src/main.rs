mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "vidpack",
    version,
    about = "Carry files through lossless video containers"
)]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_encode_subcommand() {
        let cli = Cli::try_parse_from([
            "vidpack",
            "encode",
            "report.pdf",
            "--output-path-dir",
            "/tmp/out",
            "--save-artifacts",
        ])
        .expect("encode args should parse");

        match cli.command {
            Command::Encode(args) => {
                assert_eq!(args.output_dir, std::path::PathBuf::from("/tmp/out"));
                assert!(args.scratch.keep_frames);
                assert_eq!(args.frame.dims(), None);
                assert_eq!(args.frame.dims_or_default().width, 640);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn file_size_requires_file_format() {
        let err = Cli::try_parse_from(["vidpack", "decode", "x.mkv", "--file-size", "10"])
            .expect_err("--file-size alone should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn meta_out_conflicts_with_no_meta() {
        let err = Cli::try_parse_from([
            "vidpack",
            "encode",
            "a.bin",
            "--meta-out",
            "m.json",
            "--no-meta",
        ])
        .expect_err("conflicting args should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn parses_decode_with_override() {
        let cli = Cli::try_parse_from([
            "vidpack",
            "decode",
            "clip.mkv",
            "--file-size",
            "700",
            "--file-format",
            "pdf",
            "--width",
            "320",
        ])
        .expect("decode args should parse");
        match cli.command {
            Command::Decode(args) => {
                assert_eq!(args.metadata.file_size, Some(700));
                assert_eq!(args.metadata.file_format.as_deref(), Some("pdf"));
                assert_eq!(args.frame.width, Some(320));
                assert_eq!(args.frame.height, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_inspect_subcommand() {
        let cli = Cli::try_parse_from(["vidpack", "inspect", "report-pdf-700.mkv"])
            .expect("inspect args should parse");
        assert!(matches!(cli.command, Command::Inspect(_)));
    }
}
