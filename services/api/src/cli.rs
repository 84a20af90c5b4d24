use crate::demo::{run_demo, run_steps, DemoArgs, StepsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use docuverify::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "DocuVerify Portal",
    about = "Run or demonstrate the DocuVerify application portal from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Walk a scripted applicant through the wizard and the payment widget
    Demo(DemoArgs),
    /// Print the step plan and required-field rules for a ruleset
    Steps(StepsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args).await,
        Command::Steps(args) => {
            run_steps(args);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docuverify::portal::RulesetVersion;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["docuverify-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn demo_accepts_ruleset_and_poll_interval() {
        let cli = Cli::try_parse_from([
            "docuverify-api",
            "demo",
            "--ruleset",
            "legacy",
            "--poll-ms",
            "25",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Demo(args)) => {
                assert_eq!(args.ruleset, Some(RulesetVersion::Legacy));
                assert_eq!(args.poll_ms, Some(25));
            }
            other => panic!("expected demo command, got {other:?}"),
        }
    }

    #[test]
    fn unknown_ruleset_is_rejected() {
        assert!(Cli::try_parse_from(["docuverify-api", "steps", "--ruleset", "beta"]).is_err());
    }
}
