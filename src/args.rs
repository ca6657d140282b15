use std::path::PathBuf;

use clap::Parser;

use crate::executor::resolver::MouseAction;

/// Find an on-screen control by its label and click it.
///
/// With a TARGET, runs one capture → match → action cycle. Without one,
/// starts an interactive command loop.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Text of the element to act on, e.g. "Submit"
    pub target: Option<String>,

    /// What to do with the matched element
    #[arg(long, value_enum, default_value_t = MouseAction::Click)]
    pub action: MouseAction,

    /// Analyze this image instead of the screen (implies --dry-run)
    #[arg(long, value_name = "FILE")]
    pub image: Option<PathBuf>,

    /// Log pointer actions instead of performing them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the detected elements as JSON and exit
    #[arg(long)]
    pub list: bool,

    /// Write an annotated screenshot of the detections and exit
    #[arg(long, value_name = "FILE")]
    pub annotate: Option<PathBuf>,

    /// Config file (default: search next to the binary, the working directory,
    /// then the user config dir)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the effective configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    pub write_default_config: Option<PathBuf>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn dry_run(&self) -> bool {
        self.dry_run || self.image.is_some()
    }

    pub fn one_shot(&self) -> bool {
        self.target.is_some() || self.list || self.annotate.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_target_defaults_to_click() {
        let args = Args::try_parse_from(["seemouse", "Submit"]).unwrap();
        assert_eq!(args.target.as_deref(), Some("Submit"));
        assert_eq!(args.action, MouseAction::Click);
        assert!(args.one_shot());
        assert!(!args.dry_run());
    }

    #[test]
    fn image_implies_dry_run() {
        let args = Args::try_parse_from(["seemouse", "--image", "shot.png", "--action", "double-click", "OK"]).unwrap();
        assert!(args.dry_run());
        assert_eq!(args.action, MouseAction::Double);
    }

    #[test]
    fn no_target_means_interactive() {
        let args = Args::try_parse_from(["seemouse", "-v"]).unwrap();
        assert!(!args.one_shot());
        assert!(args.verbose);
    }
}
