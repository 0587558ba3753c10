use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Fixtures { competition: String, season: String },
    Summary { match_id: String },
    Shots { match_id: String },
    Report { match_id: String },
    Competitions,
    Help,
    Version,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub output: Option<PathBuf>,
    pub compact: bool,
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub options: Options,
}

pub fn parse_args<I>(args: I) -> Result<Invocation, String>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut positional = Vec::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Invocation { command: Command::Help, options }),
            "-V" | "--version" => return Ok(Invocation { command: Command::Version, options }),
            "-o" | "--output" => {
                let path = args.next().ok_or_else(|| format!("{arg} needs a file path"))?;
                options.output = Some(PathBuf::from(path));
            }
            "--compact" => options.compact = true,
            "-v" | "--verbose" => options.verbose = true,
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(format!("Unknown argument: {flag}"));
            }
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let Some(name) = positional.next() else {
        return Ok(Invocation { command: Command::Help, options });
    };
    let mut required = |what: &str| {
        positional
            .next()
            .ok_or_else(|| format!("`{name}` needs a {what}"))
    };

    let command = match name.as_str() {
        "fixtures" => Command::Fixtures {
            competition: required("competition name")?,
            season: required("season")?,
        },
        "summary" => Command::Summary { match_id: required("match id")? },
        "shots" => Command::Shots { match_id: required("match id")? },
        "report" => Command::Report { match_id: required("match id")? },
        "competitions" => Command::Competitions,
        other => return Err(format!("Unknown command: {other}")),
    };
    if let Some(extra) = positional.next() {
        return Err(format!("Unexpected argument: {extra}"));
    }

    Ok(Invocation { command, options })
}

pub fn usage_text() -> &'static str {
    "fbref - scrape FBref fixtures, match summaries and shots as JSON

Usage:
  fbref fixtures <competition> <season>   e.g. fbref fixtures \"Premier League\" 2023-2024
  fbref summary <match-id>
  fbref shots <match-id>
  fbref report <match-id>
  fbref competitions
  fbref --help
  fbref --version

Options:
  -o, --output <path>   Write JSON to a file instead of stdout
      --compact         Single-line JSON
  -v, --verbose         Debug logging, even when RUST_LOG is set

Environment:
  FBREF_BASE_URL        Site root (default https://fbref.com/en)
  FBREF_MAX_RETRIES     Extra attempts on transient failures (default 3)
  FBREF_BACKOFF_FACTOR  Backoff seconds, doubled per retry (default 1.0)
  FBREF_TIMEOUT_SECS    Per-request timeout (default 20)
  RUST_LOG              Log filter (default warn)"
}
