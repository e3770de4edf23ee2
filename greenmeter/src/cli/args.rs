//! CLI argument definitions
//!
//! The metrics source is configured through the environment only; flags
//! choose how readings are presented.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "greenmeter",
    version,
    about = "Full-screen green-energy kiosk backed by Prometheus",
    after_help = "\
ENVIRONMENT:
    PROMETHEUS_URL      Base address of the Prometheus API (required)
    PULL_DURATION       Poll interval in seconds (default: 60)
    RUST_LOG            Log filter, e.g. RUST_LOG=greenmeter=debug

EXAMPLES:
    PROMETHEUS_URL=http://prometheus:9090 greenmeter
    PROMETHEUS_URL=http://prometheus:9090 greenmeter --headless"
)]
pub struct Args {
    /// Print one line per reading instead of drawing the full-screen display
    #[arg(long)]
    pub headless: bool,

    /// Suppress the startup banner
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_display_mode() {
        let args = Args::parse_from(["greenmeter"]);
        assert!(!args.headless);
        assert!(!args.quiet);
    }

    #[test]
    fn test_headless_flag() {
        let args = Args::parse_from(["greenmeter", "--headless", "-q"]);
        assert!(args.headless);
        assert!(args.quiet);
    }
}
