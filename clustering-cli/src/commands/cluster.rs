#[cfg(test)]
#[path = "../../tests/unit/commands/cluster_test.rs"]
mod cluster_test;

use super::*;

use clustering_cli::extensions::config::{Config, create_config_from_name, read_config};
use clustering_cli::extensions::export::write_output;
use clustering_cli::extensions::import::read_csv_matrix;
use clustering_cli::run_clustering;
use std::io::BufReader;

const INPUT_ARG_NAME: &str = "INPUT";
const CONFIG_ARG_NAME: &str = "config";
const ALGORITHM_ARG_NAME: &str = "algorithm";
const CLUSTERS_ARG_NAME: &str = "clusters";
const RANDOM_SEED_ARG_NAME: &str = "seed";
const OUT_RESULT_ARG_NAME: &str = "out-result";
const HAS_HEADER_ARG_NAME: &str = "has-header";
const VERBOSE_ARG_NAME: &str = "verbose";

const ALGORITHM_NAMES: [&str; 7] =
    ["affinityPropagation", "cast", "ecast", "ward", "growingNeuralGas", "neuralGas", "kmedoids"];

pub fn get_cluster_app() -> Command {
    Command::new("cluster")
        .about("Clusters rows of numeric data read from csv file")
        .arg(Arg::new(INPUT_ARG_NAME).help("Sets csv file with numeric data to use").required(true).index(1))
        .arg(
            Arg::new(CONFIG_ARG_NAME)
                .help("Specifies path to algorithm config file")
                .short('c')
                .long(CONFIG_ARG_NAME)
                .required(false)
                .conflicts_with(ALGORITHM_ARG_NAME),
        )
        .arg(
            Arg::new(ALGORITHM_ARG_NAME)
                .help("Specifies algorithm to use with its default parameters")
                .short('a')
                .long(ALGORITHM_ARG_NAME)
                .required(false)
                .value_parser(ALGORITHM_NAMES)
                .default_value("affinityPropagation"),
        )
        .arg(
            Arg::new(CLUSTERS_ARG_NAME)
                .help("Specifies amount of clusters for algorithms which need it")
                .short('k')
                .long(CLUSTERS_ARG_NAME)
                .required(false)
                .conflicts_with(CONFIG_ARG_NAME),
        )
        .arg(
            Arg::new(RANDOM_SEED_ARG_NAME)
                .help("Specifies random seed, overrides the one from config")
                .short('s')
                .long(RANDOM_SEED_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(OUT_RESULT_ARG_NAME)
                .help("Specifies path to file for result output")
                .short('o')
                .long(OUT_RESULT_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(HAS_HEADER_ARG_NAME)
                .help("Specifies that the first csv record is a header, detected automatically if not set")
                .long(HAS_HEADER_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(VERBOSE_ARG_NAME)
                .help("Enables progress logging to stderr")
                .short('v')
                .long(VERBOSE_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
}

pub fn run_cluster(
    matches: &ArgMatches,
    out_writer_func: fn(Option<File>) -> BufWriter<Box<dyn Write>>,
) -> Result<(), String> {
    let input_path = matches.get_one::<String>(INPUT_ARG_NAME).ok_or("input file is not specified")?;
    let has_header = matches.get_flag(HAS_HEADER_ARG_NAME).then_some(true);
    let is_verbose = matches.get_flag(VERBOSE_ARG_NAME);

    let config = get_config(matches)?;
    let data = read_csv_matrix(BufReader::new(open_file(input_path, "input")), has_header)
        .map_err(|err| format!("cannot read input data: '{err}'"))?;

    let output = run_clustering(&data, &config, is_verbose)?;

    let out_result = matches.get_one::<String>(OUT_RESULT_ARG_NAME).map(|path| create_file(path, "out result"));

    write_output(&output, out_writer_func(out_result))
}

fn get_config(matches: &ArgMatches) -> Result<Config, String> {
    let seed = parse_int_value::<u64>(matches, RANDOM_SEED_ARG_NAME, "random seed")?;

    let mut config = match matches.get_one::<String>(CONFIG_ARG_NAME) {
        Some(config_path) => read_config(BufReader::new(open_file(config_path, "config")))?,
        None => {
            let name = matches.get_one::<String>(ALGORITHM_ARG_NAME).ok_or("algorithm is not specified")?;
            let clusters = parse_int_value::<usize>(matches, CLUSTERS_ARG_NAME, "amount of clusters")?;

            create_config_from_name(name, clusters, None)?
        }
    };

    if seed.is_some() {
        config.seed = seed;
    }

    Ok(config)
}
