use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    oci8-installer completions bash > ~/.bash_completion.d/oci8-installer\n\n\
                  Generate zsh completions:\n    oci8-installer completions zsh > ~/.zfunc/_oci8-installer\n\n\
                  Generate fish completions:\n    oci8-installer completions fish > ~/.config/fish/completions/oci8-installer.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
