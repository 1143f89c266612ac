use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Zotero CSV export to read
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// WordPress WXR document to write
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_positional_paths() {
        let cli = Cli::try_parse_from(["zot2wp", "in.csv", "out.xml"]).expect("parse");
        assert_eq!(cli.input, PathBuf::from("in.csv"));
        assert_eq!(cli.output, PathBuf::from("out.xml"));
    }

    #[test]
    fn missing_output_is_a_usage_error() {
        let err = Cli::try_parse_from(["zot2wp", "in.csv"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn missing_both_is_a_usage_error() {
        assert!(Cli::try_parse_from(["zot2wp"]).is_err());
    }
}
