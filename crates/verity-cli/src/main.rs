use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod suites;
mod testing;

/// Verity test runner.
///
/// Runs the registered test suites: every test case executes once, in
/// isolation, and all of its assertions are recorded before the outcome is
/// decided.
///
/// EXAMPLES:
///     verity test                   Run all tests
///     verity test contains          Run tests whose name contains "contains"
///     verity test --scope app       Run tests in the app scope
///     verity list                   List tests without running them
///
/// ENVIRONMENT VARIABLES:
///     VERITY_FORMAT     'pretty' or 'json'
///     VERITY_PARALLEL   Set to 'false' to run tests sequentially
///     VERITY_THREADS    Worker threads for parallel runs
///     VERITY_VERBOSE    Set to '1' for one line per test
///     VERITY_LOG        Log filter (e.g. 'debug'), logs go to stderr
///     NO_COLOR          Set to disable colored output
#[derive(Parser)]
#[command(name = "verity")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run tests
    ///
    /// Discovers the registered test cases, runs them and prints a summary.
    /// Exits with status 1 if any test failed or errored.
    ///
    /// EXAMPLES:
    ///     verity test                   Run all tests
    ///     verity test sample -v         Verbose run of matching tests
    ///     verity test --sequential      Run on a single thread
    ///     verity test --json            Machine-readable report
    #[command(visible_alias = "t")]
    Test {
        /// Filter tests by name pattern
        pattern: Option<String>,
        /// Only run tests in this scope (e.g. 'app' or 'frontend::sample test')
        #[arg(long, short = 's')]
        scope: Option<String>,
        /// Run tests sequentially instead of parallel
        #[arg(long)]
        sequential: bool,
        /// Worker threads for parallel runs
        #[arg(long, short = 'j')]
        threads: Option<usize>,
        /// Verbose output (show all test names)
        #[arg(long, short = 'v')]
        verbose: bool,
        /// Disable colored output
        #[arg(long)]
        no_color: bool,
        /// Directory to search for verity.toml
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// List tests without running them
    #[command(visible_alias = "l")]
    List {
        /// Filter tests by name pattern
        pattern: Option<String>,
        /// Only list tests in this scope
        #[arg(long, short = 's')]
        scope: Option<String>,
        /// Directory to search for verity.toml
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("VERITY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Test {
            pattern,
            scope,
            sequential,
            threads,
            verbose,
            no_color,
            dir,
            json,
        } => {
            let args = commands::test::TestArgs {
                pattern,
                scope,
                sequential,
                threads,
                verbose,
                no_color,
                dir,
                json,
            };
            let code = commands::test::run(args)?;
            if code != 0 {
                std::process::exit(code);
            }
        }
        Commands::List {
            pattern,
            scope,
            dir,
            json,
        } => {
            let args = commands::list::ListArgs {
                pattern,
                scope,
                dir,
                json,
            };
            commands::list::run(args)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_verifies() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_test_defaults() {
        let cli = Cli::parse_from(["verity", "test"]);
        match cli.command {
            Commands::Test {
                pattern,
                scope,
                sequential,
                threads,
                json,
                dir,
                ..
            } => {
                assert_eq!(pattern, None);
                assert_eq!(scope, None);
                assert!(!sequential);
                assert_eq!(threads, None);
                assert!(!json);
                assert_eq!(dir, PathBuf::from("."));
            }
            _ => panic!("Expected Test command"),
        }
    }

    #[test]
    fn test_parse_test_flags() {
        let cli = Cli::parse_from([
            "verity", "t", "contains", "-s", "app", "-j", "2", "--sequential", "-v", "--json",
        ]);
        match cli.command {
            Commands::Test {
                pattern,
                scope,
                threads,
                sequential,
                verbose,
                json,
                ..
            } => {
                assert_eq!(pattern.as_deref(), Some("contains"));
                assert_eq!(scope.as_deref(), Some("app"));
                assert_eq!(threads, Some(2));
                assert!(sequential && verbose && json);
            }
            _ => panic!("Expected Test command"),
        }
    }

    #[test]
    fn test_alias_l_for_list() {
        let cli = Cli::parse_from(["verity", "l", "--json"]);
        assert!(matches!(cli.command, Commands::List { json: true, .. }));
    }

    #[test]
    fn test_completions_bash() {
        let cli = Cli::parse_from(["verity", "completions", "bash"]);
        match cli.command {
            Commands::Completions { shell } => assert_eq!(shell, Shell::Bash),
            _ => panic!("Expected Completions command"),
        }
    }
}
