//! motion_crop - decide whether a frame pair shows motion inside an ROI
//!
//! Prints exactly one JSON record on stdout:
//! - `{"motion": false, "reason": ...}`
//! - `{"motion": true, "crop_path": ..., "bbox": [x,y,w,h], "original_res": [w,h], "crop_res": [w,h]}`
//! - `{"error": ...}`
//!
//! Exits non-zero only when the arguments are missing or unusable by the
//! parser. Logs go to stderr.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;

use roi_motion::{MotionConfig, MotionRecord, MotionRequest};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Older frame.
    frame_a: String,
    /// More recent frame; the crop is taken from this one.
    frame_b: String,
    /// ROI polygon as JSON, e.g. '[[0,0],[640,0],[640,480]]'. '[]' disables ROI filtering.
    #[arg(allow_hyphen_values = true)]
    roi: String,
    /// Minimum motion area as a percentage of the frame area (e.g. 0.5).
    #[arg(allow_hyphen_values = true)]
    min_area_percent: String,
    /// Padding per side as a percentage of the motion box size (e.g. 20).
    #[arg(allow_hyphen_values = true)]
    padding_percent: String,
    /// Output path for the crop; the extension selects the image format.
    output: String,
    /// Anything after the output path is ignored.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    extra: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            log::error!("{}", err);
            let message = match err.kind() {
                ErrorKind::MissingRequiredArgument => "missing args".to_string(),
                _ => format!("invalid args: {:?}", err.kind()),
            };
            println!("{}", MotionRecord::error(message).to_json());
            return ExitCode::FAILURE;
        }
    };

    let record = match run(&args) {
        Ok(record) => record,
        Err(err) => {
            log::error!("{:#}", err);
            MotionRecord::error(format!("{:#}", err))
        }
    };
    println!("{}", record.to_json());
    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<MotionRecord> {
    if !args.extra.is_empty() {
        log::warn!("ignoring {} extra argument(s)", args.extra.len());
    }
    let config = MotionConfig::load().context("invalid configuration")?;
    let request = match MotionRequest::parse(
        &args.frame_a,
        &args.frame_b,
        &args.roi,
        &args.min_area_percent,
        &args.padding_percent,
        &args.output,
    ) {
        Ok(request) => request,
        Err(err) => return Ok(MotionRecord::from(&err)),
    };
    Ok(roi_motion::analyze_to_record(&request, &config))
}
