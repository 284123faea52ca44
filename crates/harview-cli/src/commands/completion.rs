use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use std::io;

/// Long help shown by `harview completion --help`
pub const AFTER_HELP: &str = "\
SUPPORTED SHELLS:
    bash, zsh, fish, powershell, elvish

INSTALLATION:
    bash:  harview completion --shell bash >> ~/.bashrc
    zsh:   harview completion --shell zsh > \"${fpath[1]}/_harview\"
    fish:  harview completion --shell fish > ~/.config/fish/completions/harview.fish";

/// Write the completion script for `shell` to stdout
pub fn execute(shell: Shell, cmd: &mut Command) -> Result<()> {
    tracing::debug!("Generating {} completion script", shell);
    let bin_name = cmd.get_name().to_string();
    generate(shell, cmd, bin_name, &mut io::stdout());
    Ok(())
}
