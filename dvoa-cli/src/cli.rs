//! Command-line flags.

use std::path::PathBuf;

use clap::Parser;

/// Wrapper for the DVOACAP library: run one prediction from a JSON input file.
#[derive(Debug, Parser)]
#[command(name = "dvoacap", version)]
pub struct Args {
    /// JSON formatted input file (`-` for stdin)
    #[arg(short = 'i', long, default_value = "input.json")]
    pub infile: PathBuf,

    /// Formatted prediction output (`-` for stdout)
    #[arg(short = 'o', long, default_value = "output.txt")]
    pub outfile: PathBuf,

    /// Shared library implementing the prediction (overrides config and DVOACAP_LIBRARY)
    #[arg(short = 'l', long)]
    pub library: Option<PathBuf>,

    /// Exported function to call (overrides config and DVOACAP_ENTRY_POINT)
    #[arg(long)]
    pub entry_point: Option<String>,

    /// Reject input that is not valid JSON before calling the library
    #[arg(long, overrides_with = "no_check_json")]
    pub check_json: bool,

    /// Pass input through unchecked, even if config or DVOACAP_CHECK_JSON enables the check
    #[arg(long, overrides_with = "check_json")]
    pub no_check_json: bool,

    /// Config file (default: ~/.config/dvoacap/config.toml, then /etc/dvoacap/config.toml)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Do not print "Done" after a successful run
    #[arg(short = 'q', long)]
    pub quiet: bool,
}
