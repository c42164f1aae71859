use std::path::PathBuf;

use tracing::info;
use vidpack_container::{encode_file, EncodeRequest, Ffmpeg};
use vidpack_meta::DEFAULT_SIDE_RECORD_NAME;

use crate::cmd::{container_config, EncodeArgs};
use crate::exit::{container_error, CliResult, SUCCESS};
use crate::output::{print_encode, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let config = container_config(&args.frame, &args.tool);
    config
        .validate()
        .map_err(|err| container_error("invalid encode settings", err))?;

    let side_record = side_record_path(&args);
    let scratch = args.scratch.acquire()?;
    let tool = Ffmpeg::from_config(&config);

    info!(
        input = %args.input.display(),
        dims = %config.dims,
        scratch = %scratch.path().display(),
        "encoding"
    );

    let request = EncodeRequest {
        input: &args.input,
        output_dir: &args.output_dir,
        side_record: side_record.as_deref(),
    };
    let report = encode_file(&request, &scratch, &config, &tool)
        .map_err(|err| container_error("encode failed", err))?;

    print_encode(&report, format);
    Ok(SUCCESS)
}

fn side_record_path(args: &EncodeArgs) -> Option<PathBuf> {
    if args.no_meta {
        return None;
    }
    Some(
        args.meta_out
            .clone()
            .unwrap_or_else(|| args.output_dir.join(DEFAULT_SIDE_RECORD_NAME)),
    )
}
