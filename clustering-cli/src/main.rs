//! A command line interface to the clustering algorithm suite.
//!
//! ## Usage
//!
//! - cluster csv data using affinity propagation with default parameters:
//!
//!     `clustering cluster data.csv`
//!
//! - cluster csv data with header using k-medoids and three centers, writing result to the file:
//!
//!     `clustering cluster data.csv --has-header --algorithm kmedoids --clusters 3 -o result.json`
//!
//! - cluster csv data using algorithm specified in json config:
//!
//!     `clustering cluster data.csv --config config.json --seed 42`
//!
//! For more details, simply run
//!
//!     clustering --help

#[cfg(test)]
#[path = "../tests/unit/main_test.rs"]
mod main_test;

mod commands;

use self::cli::{get_app, run_subcommand};

fn main() {
    let matches = get_app().get_matches();

    run_subcommand(matches);
}

mod cli {
    use super::commands::cluster::{get_cluster_app, run_cluster};
    use super::commands::create_write_buffer;
    use clap::{ArgMatches, Command};
    use std::process;

    pub fn get_app() -> Command {
        Command::new("Clustering algorithm suite")
            .version(env!("CARGO_PKG_VERSION"))
            .about("A command line interface to clustering algorithms")
            .subcommand(get_cluster_app())
    }

    pub fn run_subcommand(arg_matches: ArgMatches) {
        if let Err(err) = match arg_matches.subcommand() {
            Some(("cluster", cluster_matches)) => run_cluster(cluster_matches, create_write_buffer),
            _ => Err("no subcommand was used. Use -h to print help information.".to_string()),
        } {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}
