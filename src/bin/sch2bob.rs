use clap::{App, Arg};
use env_logger::Env;
use log::{error, info};
use rayon::prelude::*;
use sch2bob::bob::{convert_file, Outcome};
use std::path::Path;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn convert(file: &str) -> bool {
    info!("Processing: {}", file);
    match convert_file(Path::new(file)) {
        Ok(Outcome::Skipped { output }) => {
            info!("Skipping: {} ({} exists)", file, output.display());
            true
        }
        Ok(Outcome::Converted { output, voxels }) => {
            info!("Converted: {} -> {} ({} blocks)", file, output.display(), voxels);
            true
        }
        Err(e) => {
            error!("{}: {}", file, e);
            false
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let matches = App::new("sch2bob")
        .about("Convert decompressed MCEdit schematics into BOB2 files")
        .arg(
            Arg::with_name("files")
                .takes_value(true)
                .multiple(true)
                .required(true),
        )
        .arg(
            Arg::with_name("jobs")
                .long("jobs")
                .short("j")
                .takes_value(true)
                .required(false),
        )
        .get_matches();

    if let Some(jobs) = matches.value_of("jobs") {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs.parse()?)
            .build_global()?;
    }

    let files: Vec<_> = matches.values_of("files").into_iter().flatten().collect();

    let failed = files.par_iter().filter(|file| !convert(file)).count();

    info!("{} files, {} failed", files.len(), failed);

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
