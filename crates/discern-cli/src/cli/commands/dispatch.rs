use super::super::args::{Cli, Command};
use crate::exit_codes::SUCCESS;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Score(args) => super::score::run(args).await,
        Command::Analyze(args) => super::analyze::run(args),
        Command::Export(args) => super::export::run(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(SUCCESS)
        }
    }
}
