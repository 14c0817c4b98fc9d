use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use tracing::debug;

use github_open_prs::fetch::run;
use github_open_prs::github::create_client;
use github_open_prs::output::{plugin_name, render};

#[derive(Parser, Debug)]
#[command(name = "github-open-prs")]
#[command(about = "Lists open GitHub PRs that involve you or one of your teams", long_about = None)]
#[command(version)]
struct Cli {
    /// Write requests and raw responses to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Parse arguments. The status-bar host expects output no matter what, so
/// unusable arguments are reported on stderr and otherwise ignored; a `-v`
/// among them still counts.
fn parse_cli<I, T>(args: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    match Cli::try_parse_from(args.clone()) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                std::process::exit(0);
            }
            _ => {
                eprint!("{err}");
                Cli {
                    verbose: args.iter().skip(1).any(|a| a == "-v" || a == "--verbose"),
                }
            }
        },
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_filter = if verbose { "warn,github_open_prs=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+); a provider
    // that is already installed is fine
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = parse_cli(std::env::args_os());
    init_tracing(cli.verbose);

    let outcome = run(None, create_client).await;
    if let Err(e) = &outcome {
        debug!("run failed: {:?}", e);
    }

    let arg0 = std::env::args_os().next();
    print!("{}", render(&outcome, &plugin_name(arg0.as_deref())));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_flag() {
        assert!(parse_cli(["github-open-prs.5m", "-v"]).verbose);
        assert!(parse_cli(["github-open-prs.5m", "--verbose"]).verbose);
        assert!(!parse_cli(["github-open-prs.5m"]).verbose);
    }

    #[test]
    fn test_unknown_argument_keeps_verbose() {
        assert!(parse_cli(["github-open-prs.5m", "-v", "--bogus"]).verbose);
        assert!(parse_cli(["github-open-prs.5m", "--bogus", "--verbose"]).verbose);
        assert!(!parse_cli(["github-open-prs.5m", "--bogus"]).verbose);
    }

    #[test]
    fn test_program_name_alone_is_not_verbose() {
        assert!(!parse_cli(["-v", "--bogus"]).verbose);
    }
}
