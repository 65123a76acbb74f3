use std::env;
use std::path::PathBuf;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_INTERVAL_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// One screenshot, every detector, print the hits
    Detect { image: PathBuf },
    /// Play a directory of frames through the wait loop
    Replay { dir: PathBuf },
}

#[derive(Debug)]
pub struct Args {
    pub mode: Mode,
    pub overlay_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub timeout_secs: u64,
    pub interval_ms: u64,
    pub debug_mode: bool,
}

impl Args {
    pub fn parse() -> Option<Self> {
        let args: Vec<String> = env::args().skip(1).collect();
        Self::parse_from(&args)
    }

    pub fn parse_from(args: &[String]) -> Option<Self> {
        let mut mode: Option<Mode> = None;
        let mut overlay_path: Option<PathBuf> = None;
        let mut config_path: Option<PathBuf> = None;
        let mut timeout_secs = DEFAULT_TIMEOUT_SECS;
        let mut interval_ms = DEFAULT_INTERVAL_MS;
        let mut debug_mode = false;

        for arg in args {
            if arg == "--help" || arg == "-h" {
                print_help();
                return None;
            } else if arg == "--version" || arg == "-v" {
                println!("Screen Watch v{}", env!("APP_VERSION_DISPLAY"));
                return None;
            } else if arg == "--debug" {
                debug_mode = true;
            } else if let Some(val) = arg.strip_prefix("--detect=") {
                mode = Some(Mode::Detect {
                    image: PathBuf::from(val),
                });
            } else if let Some(val) = arg.strip_prefix("--replay=") {
                mode = Some(Mode::Replay {
                    dir: PathBuf::from(val),
                });
            } else if let Some(val) = arg.strip_prefix("--overlay=") {
                overlay_path = Some(PathBuf::from(val));
            } else if let Some(val) = arg.strip_prefix("--config=") {
                config_path = Some(PathBuf::from(val));
            } else if let Some(val) = arg.strip_prefix("--timeout=") {
                match val.parse::<u64>() {
                    Ok(secs) => timeout_secs = secs,
                    Err(_) => {
                        eprintln!("❌ Invalid timeout value: {}", val);
                        return None;
                    }
                }
            } else if let Some(val) = arg.strip_prefix("--interval=") {
                match val.parse::<u64>() {
                    Ok(ms) => interval_ms = ms,
                    Err(_) => {
                        eprintln!("❌ Invalid interval value: {}", val);
                        return None;
                    }
                }
            } else {
                eprintln!("❌ Unknown argument: {}", arg);
                print_help();
                return None;
            }
        }

        let Some(mode) = mode else {
            eprintln!("❌ Nothing to do: pass --detect=<image> or --replay=<dir>");
            print_help();
            return None;
        };

        Some(Args {
            mode,
            overlay_path,
            config_path,
            timeout_secs,
            interval_ms,
            debug_mode,
        })
    }
}

fn print_help() {
    println!("👁️ Screen Watch: visual state detection");
    println!();
    println!("USAGE:");
    println!("    screen-watch --detect=<image> [FLAGS]");
    println!("    screen-watch --replay=<dir> [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    --detect=<image>    Run every detector on one screenshot");
    println!("    --replay=<dir>      Wait for a detector to fire over the frames in <dir>");
    println!("    --overlay=<png>     Save the frame with detector regions and hits drawn on it");
    println!("    --config=<json>     Dialog bubble thresholds (missing fields use defaults)");
    println!(
        "    --timeout=N         Give up waiting after N seconds (default: {})",
        DEFAULT_TIMEOUT_SECS
    );
    println!(
        "    --interval=MS       Replay one frame every MS milliseconds (default: {})",
        DEFAULT_INTERVAL_MS
    );
    println!("    --debug             Enable debug logging (RUST_LOG still wins)");
    println!("    --help, -h          Show this help message");
    println!("    --version, -v       Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    screen-watch --detect=screenshot.png --overlay=marked.png");
    println!("    screen-watch --replay=recording/ --timeout=10 --interval=250");
}
