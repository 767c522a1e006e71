//! Shell completions command

use clap::CommandFactory;
use clap_complete::Shell;

/// Generate shell completions on stdout
pub fn run(shell: Shell) {
    let mut cmd = <crate::cli::Cli as CommandFactory>::command();
    clap_complete::generate(shell, &mut cmd, "mcinstall", &mut std::io::stdout().lock());
}
