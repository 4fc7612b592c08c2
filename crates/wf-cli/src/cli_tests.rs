use super::*;
use clap::Parser;
use yare::parameterized;

#[parameterized(
    worker = { &["wf", "run", "worker", "demo"] },
    publisher = { &["wf", "run", "publisher", "demo"] },
    list = { &["wf", "list"] },
)]
fn accepts_every_top_level_subcommand(argv: &[&str]) {
    Cli::try_parse_from(argv).unwrap();
}

#[test]
fn run_worker_carries_the_application_name() {
    let cli = Cli::try_parse_from(["wf", "run", "worker", "demo"]).unwrap();
    match cli.command {
        Command::Run { kind: RunKind::Worker { name } } => assert_eq!(name, "demo"),
        _ => unreachable!("expected Run(Worker)"),
    }
}

#[test]
fn run_without_a_kind_is_rejected() {
    assert!(Cli::try_parse_from(["wf", "run"]).is_err());
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["wf", "frobnicate"]).is_err());
}
