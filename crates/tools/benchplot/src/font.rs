//! Font acquisition for chart text.
//!
//! The drawing library keeps registered fonts in a process-wide table, so a
//! font is loaded at most once per path. Callers get a [`ChartFont`] that
//! tells the renderer whether text can be drawn at all.

use plotters::style::{FontStyle, register_font};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::Error;

/// Family name every chart text style uses.
pub const FONT_FAMILY: &str = "sans-serif";

/// Locations probed when no font is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/HelveticaNeue.ttc",
    "/System/Library/Fonts/Helvetica.ttc",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Path of the font currently registered under [`FONT_FAMILY`].
static REGISTERED: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Font state handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartFont {
    /// Text is drawn with the font loaded from this path.
    Loaded(PathBuf),
    /// No usable font; the chart is drawn without text.
    Unavailable,
}

impl ChartFont {
    /// Returns `true` if titles, tick labels and the legend can be drawn.
    pub fn has_text(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// Load the configured font, or the first loadable system font.
///
/// A configured path that cannot be loaded is an error. Failing to find a
/// system font is not.
pub fn acquire(configured: Option<&Path>) -> Result<ChartFont, Error> {
    if let Some(path) = configured {
        register(path)?;
        return Ok(ChartFont::Loaded(path.to_path_buf()));
    }

    Ok(SYSTEM_FONTS
        .iter()
        .map(Path::new)
        .filter(|path| path.is_file())
        .find(|path| register(path).is_ok())
        .map_or(ChartFont::Unavailable, |path| {
            ChartFont::Loaded(path.to_path_buf())
        }))
}

fn register(path: &Path) -> Result<(), Error> {
    let mut registered = REGISTERED
        .lock()
        .map_err(|_| Error::Font("font registry lock poisoned".into()))?;
    if registered.as_deref() == Some(path) {
        return Ok(());
    }

    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    // The registry holds fonts for the life of the process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(FONT_FAMILY, FontStyle::Normal, bytes).map_err(|_| {
        Error::Font(format!(
            "{}: not a valid TrueType/OpenType font",
            path.display()
        ))
    })?;

    *registered = Some(path.to_path_buf());
    Ok(())
}
