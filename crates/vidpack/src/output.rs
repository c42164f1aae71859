use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use vidpack_container::{DecodeReport, EncodeReport};

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct EncodeOutput<'a> {
    schema_id: &'a str,
    input: String,
    container: String,
    side_record: Option<String>,
    original_length: u64,
    width: u32,
    height: u32,
    frames: usize,
    frame_capacity: usize,
    padding_length: usize,
    kept_frames: Option<String>,
}

#[derive(Serialize)]
struct DecodeOutput<'a> {
    schema_id: &'a str,
    output: String,
    original_length: u64,
    metadata_source: &'a str,
    width: u32,
    height: u32,
    frames: usize,
    kept_frames: Option<String>,
}

/// Frame plan derived from metadata alone.
#[derive(Debug, Serialize)]
pub struct InspectOutput {
    pub schema_id: &'static str,
    pub container: String,
    pub metadata_source: &'static str,
    pub recovered_name: String,
    pub original_length: u64,
    pub width: u32,
    pub height: u32,
    pub frames: usize,
    pub frame_capacity: usize,
    pub padding_length: usize,
}

pub fn print_encode(report: &EncodeReport, format: OutputFormat) {
    let out = EncodeOutput {
        schema_id: "https://schemas.3leaps.dev/vidpack/cli/v1/encode-report.schema.json",
        input: report.record.file_name(),
        container: report.container.display().to_string(),
        side_record: report.side_record.as_ref().map(|p| p.display().to_string()),
        original_length: report.record.original_length,
        width: report.dims.width,
        height: report.dims.height,
        frames: report.frames,
        frame_capacity: report.frame_capacity,
        padding_length: report.padding_length,
        kept_frames: report.kept_frames.as_ref().map(|p| p.display().to_string()),
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => print_table(vec![
            ("INPUT", out.input.clone()),
            ("CONTAINER", out.container.clone()),
            ("SIZE", out.original_length.to_string()),
            ("FRAMES", format!("{} x {}x{}", out.frames, out.width, out.height)),
            ("PADDING", out.padding_length.to_string()),
            ("SIDE RECORD", out.side_record.clone().unwrap_or_else(|| "-".to_string())),
        ]),
        OutputFormat::Pretty => {
            println!(
                "encoded {} ({} bytes) into {} frames of {}x{} -> {}",
                out.input, out.original_length, out.frames, out.width, out.height, out.container
            );
            if let Some(dir) = &out.kept_frames {
                println!("frames kept in {dir}");
            }
        }
        OutputFormat::Raw => println!("{}", out.container),
    }
}

pub fn print_decode(report: &DecodeReport, format: OutputFormat) {
    let out = DecodeOutput {
        schema_id: "https://schemas.3leaps.dev/vidpack/cli/v1/decode-report.schema.json",
        output: report.output.display().to_string(),
        original_length: report.original_length,
        metadata_source: report.source.as_str(),
        width: report.dims.width,
        height: report.dims.height,
        frames: report.frames,
        kept_frames: report.kept_frames.as_ref().map(|p| p.display().to_string()),
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => print_table(vec![
            ("OUTPUT", out.output.clone()),
            ("SIZE", out.original_length.to_string()),
            ("METADATA", out.metadata_source.to_string()),
            ("FRAMES", format!("{} x {}x{}", out.frames, out.width, out.height)),
        ]),
        OutputFormat::Pretty => {
            println!(
                "recovered {} ({} bytes, metadata from {})",
                out.output, out.original_length, out.metadata_source
            );
            if let Some(dir) = &out.kept_frames {
                println!("frames kept in {dir}");
            }
        }
        OutputFormat::Raw => println!("{}", out.output),
    }
}

pub fn print_inspect(out: &InspectOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => print_table(vec![
            ("CONTAINER", out.container.clone()),
            ("METADATA", out.metadata_source.to_string()),
            ("RECOVERED AS", out.recovered_name.clone()),
            ("SIZE", out.original_length.to_string()),
            ("FRAMES", format!("{} x {}x{}", out.frames, out.width, out.height)),
            ("PADDING", out.padding_length.to_string()),
        ]),
        OutputFormat::Pretty => println!(
            "{}: {} bytes as {} ({} frames of {}x{}, {} padding bytes, metadata from {})",
            out.container,
            out.original_length,
            out.recovered_name,
            out.frames,
            out.width,
            out.height,
            out.padding_length,
            out.metadata_source
        ),
        OutputFormat::Raw => println!("{}", out.original_length),
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn print_table(rows: Vec<(&str, String)>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["FIELD", "VALUE"]);
    for (field, value) in rows {
        table.add_row(vec![field.to_string(), value]);
    }
    println!("{table}");
}
