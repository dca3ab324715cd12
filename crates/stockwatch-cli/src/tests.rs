use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["stockwatch"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_each_subcommand() {
    for (arg, expected) in [
        ("run", Commands::Run),
        ("crawl", Commands::Crawl),
        ("partition", Commands::Partition),
        ("report", Commands::Report),
    ] {
        let cli = Cli::try_parse_from(["stockwatch", arg]).expect("expected valid cli args");
        assert_eq!(cli.command, Some(expected));
    }
}

#[test]
fn rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["stockwatch", "serve"]).is_err());
}
