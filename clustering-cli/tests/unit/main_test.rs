use super::*;

#[test]
fn can_build_cli_app() {
    get_app().debug_assert();
}

#[test]
fn can_parse_cluster_subcommand() {
    let args = vec!["clustering", "cluster", "data.csv", "-a", "ward", "-v"];

    let matches = get_app().try_get_matches_from(args).unwrap();

    let (name, cluster_matches) = matches.subcommand().unwrap();
    assert_eq!(name, "cluster");
    assert_eq!(cluster_matches.get_one::<String>("INPUT").map(String::as_str), Some("data.csv"));
    assert_eq!(cluster_matches.get_one::<String>("algorithm").map(String::as_str), Some("ward"));
    assert!(cluster_matches.get_flag("verbose"));
    assert!(!cluster_matches.get_flag("has-header"));
}

#[test]
fn can_use_default_algorithm() {
    let matches = get_app().try_get_matches_from(vec!["clustering", "cluster", "data.csv"]).unwrap();

    let (_, cluster_matches) = matches.subcommand().unwrap();
    assert_eq!(
        cluster_matches.get_one::<String>("algorithm").map(String::as_str),
        Some("affinityPropagation")
    );
}
