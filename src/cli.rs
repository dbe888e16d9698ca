use clap::Parser;
use clap::error::ErrorKind;
use std::path::PathBuf;

pub const HELP_KEYS: &str = "\
Key Bindings:
  Esc / q            : Quit
  Right / Space      : Next image
  Left / Backspace   : Previous image
  Delete             : Delete image from disk and show the next one
  Left mouse drag    : Move window
";

#[derive(Parser, Debug)]
#[command(name = "imgv", about = "A minimal image viewer", after_help = HELP_KEYS)]
pub struct Cli {
    /// Image file or directory to view
    pub path: PathBuf,

    /// Relaunch in the background and return to the shell
    #[arg(long)]
    pub detach: bool,

    /// Ignore the Delete key
    #[arg(long)]
    pub no_delete: bool,
}

impl Cli {
    /// Parse the command line. Help and version requests exit with 0, any
    /// other usage error with 1.
    pub fn parse_or_exit() -> Self {
        match Self::try_parse() {
            Ok(cli) => cli,
            Err(e) => match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
                _ => {
                    let _ = e.print();
                    std::process::exit(1);
                }
            },
        }
    }
}
