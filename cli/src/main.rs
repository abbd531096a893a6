mod commands;
mod terminal;

use commands::{CommandLine, matrix};
use hostrank_common::config::Config;
use terminal::logging;

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg: Config = commands.config();

    logging::init_logging(cfg.verbosity);

    matrix::matrix(&commands.inputs(), commands.output_matrix.as_deref(), &cfg)
}
