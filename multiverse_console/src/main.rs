#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod play;
mod stress_test;
mod tui;

use std::str::FromStr;

use anyhow::Context;
use clap::builder::PossibleValuesParser;
use clap::{Command, arg};
use multiverse_chess::rules::{Rules, StartingPosition};
use strum::IntoEnumIterator;


fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let variants = StartingPosition::iter().map(<&'static str>::from);
    let matches = Command::new("Multiverse chess")
        .version(clap::crate_version!())
        .about("Chess with multiverse time travel: console app")
        .subcommand_required(true)
        .subcommand(
            Command::new("play")
                .about("Play a hot-seat game in the terminal")
                .arg(
                    arg!(--"variant" <variant> "Starting position")
                        .value_parser(PossibleValuesParser::new(variants.clone()))
                        .default_value("standard"),
                )
                .arg(
                    arg!(--"rules" <rules_file> "Path to yaml-serialized Rules. Overrides --variant.")
                        .required(false),
                ),
        )
        .subcommand(
            Command::new("stress-test")
                .about(concat!(
                    "Plays random games, checking game invariants and undo after every move. ",
                    "Can be used for testing or benchmarking."
                ))
                .arg(
                    arg!(--"variant" <variant> "Starting position; all variants by default")
                        .value_parser(PossibleValuesParser::new(variants))
                        .required(false),
                )
                .arg(
                    arg!(-'n' --"games" <n> "Number of games per variant")
                        .value_parser(clap::value_parser!(u64).range(1..))
                        .default_value("100"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("play", sub_matches)) => {
            let rules = match sub_matches.get_one::<String>("rules") {
                Some(filename) => read_rules_file(filename)?,
                None => Rules::for_variant(parse_variant(
                    sub_matches.get_one::<String>("variant").unwrap(),
                )?),
            };
            play::run(rules)
        }
        Some(("stress-test", sub_matches)) => stress_test::run(stress_test::StressTestConfig {
            variants: match sub_matches.get_one::<String>("variant") {
                Some(variant) => vec![parse_variant(variant)?],
                None => StartingPosition::iter().collect(),
            },
            num_games: *sub_matches.get_one::<u64>("games").unwrap() as usize,
        }),
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}

fn parse_variant(name: &str) -> anyhow::Result<StartingPosition> {
    StartingPosition::from_str(name).with_context(|| format!("Unknown variant: {name}"))
}

fn read_rules_file(filename: &str) -> anyhow::Result<Rules> {
    let contents = std::fs::read_to_string(filename)
        .with_context(|| format!("Reading rules file {filename}"))?;
    let rules: Rules = serde_yaml::from_str(&contents).context("Parsing rules file")?;
    rules.verify().map_err(anyhow::Error::msg).context("Invalid rules")?;
    Ok(rules)
}
