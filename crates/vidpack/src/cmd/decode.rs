use tracing::info;
use vidpack_container::{decode_file, DecodeRequest, Ffmpeg};
use vidpack_meta::resolve;

use crate::cmd::{container_config, DecodeArgs};
use crate::exit::{container_error, metadata_error, CliResult, SUCCESS};
use crate::output::{print_decode, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let config = container_config(&args.frame, &args.tool);
    config
        .validate()
        .map_err(|err| container_error("invalid decode settings", err))?;
    let dims = args.frame.dims();

    // Metadata comes first so a container we cannot size never reaches ffmpeg.
    let metadata = resolve(&args.metadata.request(&args.container, &config.container_ext))
        .map_err(|err| metadata_error("metadata unavailable", err))?;

    let scratch = args.scratch.acquire()?;
    let tool = Ffmpeg::from_config(&config);

    info!(
        container = %args.container.display(),
        dims = %dims.map_or_else(|| "from frames".to_string(), |d| d.to_string()),
        source = metadata.source.as_str(),
        "decoding"
    );

    let request = DecodeRequest {
        container: &args.container,
        metadata: &metadata,
        dims,
        output_dir: &args.output_dir,
    };
    let report = decode_file(&request, &scratch, &config, &tool)
        .map_err(|err| container_error("decode failed", err))?;

    print_decode(&report, format);
    Ok(SUCCESS)
}
