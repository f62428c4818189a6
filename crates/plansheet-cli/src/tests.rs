use super::*;

#[test]
fn parses_scrape_with_defaults() {
    let cli = Cli::try_parse_from(["plansheet", "scrape"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Scrape {
            url: None,
            max_pages: None,
            no_email: false,
            json: false
        }
    ));
}

#[test]
fn parses_scrape_with_all_flags() {
    let cli = Cli::try_parse_from([
        "plansheet",
        "scrape",
        "--url",
        "https://www.amazon.in/s?k=godrej",
        "--max-pages",
        "3",
        "--no-email",
        "--json",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Scrape {
            url: Some(ref u),
            max_pages: Some(3),
            no_email: true,
            json: true
        } if u == "https://www.amazon.in/s?k=godrej"
    ));
}

#[test]
fn rejects_non_numeric_max_pages() {
    assert!(Cli::try_parse_from(["plansheet", "scrape", "--max-pages", "many"]).is_err());
}

#[test]
fn parses_from_html_with_page_url() {
    let cli = Cli::try_parse_from([
        "plansheet",
        "from-html",
        "saved/search.html",
        "--page-url",
        "https://www.amazon.in/s?k=godrej&page=2",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::FromHtml {
            ref file,
            page_url: Some(_),
            no_email: false,
            json: false
        } if file == &PathBuf::from("saved/search.html")
    ));
}

#[test]
fn from_html_requires_file() {
    assert!(Cli::try_parse_from(["plansheet", "from-html"]).is_err());
}

#[test]
fn parses_enrich_no_email() {
    let cli = Cli::try_parse_from(["plansheet", "enrich", "old.xlsx", "--no-email"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Enrich { ref file, no_email: true } if file == &PathBuf::from("old.xlsx")
    ));
}

#[test]
fn parses_plans_asin() {
    let cli = Cli::try_parse_from(["plansheet", "plans", "B0C2NHPZJF"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Plans { ref asin } if asin == "B0C2NHPZJF"));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["plansheet"]).is_err());
}

#[test]
fn help_is_reported_by_the_parser() {
    let err = Cli::try_parse_from(["plansheet", "--help"]).expect_err("help short-circuits parsing");
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}
