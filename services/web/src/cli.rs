use crate::listing::{run_list, run_show, run_summary, ListArgs, ShowArgs, SourceArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use senate_directory::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Senate Directory",
    about = "Serve or query the filterable senate directory",
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
    /// Print the legislators left after applying filters and a sort
    List(ListArgs),
    /// Print party counts, gender split, average age and leadership
    Summary(SourceArgs),
    /// Print the detail card for one legislator
    Show(ShowArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) sources: SourceArgs,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::List(args) => run_list(args).await,
        Command::Summary(args) => run_summary(args).await,
        Command::Show(args) => run_show(args).await,
    }
}
