use clap::Parser;
use std::path::PathBuf;

use crate::files::AllowSet;

pub const HELP_KEYS: &str = "\
Key Bindings:
  Right / l     : Next image
  Left / h      : Previous image
  i             : Toggle info overlay
  ?             : Toggle help overlay
  Esc / q       : Quit
";

#[derive(Parser, Debug)]
#[command(name = "ziv", about = "Unpack a zip of images once and page through them", after_help = HELP_KEYS)]
pub struct Cli {
    /// Zip archive holding the images
    #[arg(default_value = "CCTV.zip")]
    pub archive: PathBuf,

    /// Directory to extract into. Skipped if it already exists.
    /// Defaults to the archive path without its extension.
    #[arg(short = 'd', long, value_name = "DIR")]
    pub target_dir: Option<PathBuf>,

    /// Image extensions to show, comma separated (case-insensitive)
    #[arg(
        short,
        long = "ext",
        value_name = "EXT",
        value_delimiter = ',',
        default_values = ["jpg", "jpeg", "png", "gif", "ppm", "pgm"]
    )]
    pub extensions: Vec<String>,

    /// Initial window width
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Initial window height
    #[arg(long, default_value = "600")]
    pub height: u32,

    /// Window title
    #[arg(long, default_value = "CCTV Image Viewer")]
    pub title: String,
}

impl Cli {
    /// Explicit `--target-dir`, else the archive path minus its extension.
    /// An archive without an extension gets a `.d` suffix so the target never
    /// names the archive itself.
    pub fn target_dir(&self) -> PathBuf {
        if let Some(ref dir) = self.target_dir {
            return dir.clone();
        }
        match self.archive.extension() {
            Some(_) => self.archive.with_extension(""),
            None => self.archive.with_extension("d"),
        }
    }

    pub fn allow_set(&self) -> AllowSet {
        AllowSet::new(&self.extensions)
    }
}
