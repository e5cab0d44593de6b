// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod cli;
mod config;
mod error;
mod export;
mod git;
mod metadata;
mod types;
mod ui;
mod version;

use error::RevisionError;
use git::GitCli;
use log::debug;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    if let Err(e) = run(&args) {
        ui::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Resolve settings, derive metadata once, and emit it
fn run(args: &cli::CliArgs) -> error::Result<()> {
    let git = GitCli::new(&args.repo);
    debug!("Inspecting checkout at {}", git.repo().display());

    let settings = config::build_settings(args, &git, config::config_path_from_env())?;
    let metadata = metadata::report(&git, &settings)?;
    debug!(
        "Source links target {} {}",
        if metadata.links_to_branch() { "branch" } else { "commit" },
        metadata.source_ref
    );

    if !metadata.is_clean {
        if args.require_clean {
            return Err(RevisionError::DirtyWorkingTree);
        }
        ui::print_warning(&format!(
            "working tree is dirty; version is {} and source links point at '{}'",
            metadata.version, metadata.source_ref
        ));
    }

    let rendered = export::render(&metadata, args.format)?;
    match args.output {
        Some(ref path) => {
            export::write_file(&rendered, path)?;
            ui::status(&format!("Metadata for {} written to {}", metadata.version, path.display()));
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
