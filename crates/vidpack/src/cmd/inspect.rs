use vidpack_frame::{frame_count, padding_length};
use vidpack_meta::resolve;

use crate::cmd::InspectArgs;
use crate::exit::{frame_error, metadata_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_inspect, InspectOutput, OutputFormat};

pub fn run(args: InspectArgs, format: OutputFormat) -> CliResult<i32> {
    let output = inspect(&args)?;
    print_inspect(&output, format);
    Ok(SUCCESS)
}

fn inspect(args: &InspectArgs) -> CliResult<InspectOutput> {
    let dims = args.frame.dims_or_default();
    let frame_capacity = dims
        .capacity()
        .map_err(|err| frame_error("invalid frame size", err))?;

    let container_ext = args.container_ext.trim_start_matches('.');
    let resolved = resolve(&args.metadata.request(&args.container, container_ext))
        .map_err(|err| metadata_error("metadata unavailable", err))?;

    let original_length = usize::try_from(resolved.record.original_length).map_err(|_| {
        CliError::new(
            DATA_INVALID,
            format!(
                "original length {} does not fit in memory on this platform",
                resolved.record.original_length
            ),
        )
    })?;

    Ok(InspectOutput {
        schema_id: "https://schemas.3leaps.dev/vidpack/cli/v1/inspect-report.schema.json",
        container: args.container.display().to_string(),
        metadata_source: resolved.source.as_str(),
        recovered_name: resolved.output_file_name(),
        original_length: resolved.record.original_length,
        width: dims.width,
        height: dims.height,
        frames: frame_count(original_length, dims)
            .map_err(|err| frame_error("invalid frame size", err))?,
        frame_capacity,
        padding_length: padding_length(original_length, dims)
            .map_err(|err| frame_error("invalid frame size", err))?,
    })
}
