use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::style::{register_font, FontStyle};
use walkdir::WalkDir;

use crate::error::ReportError;

/// Family name the charts ask for.
pub const CHART_FONT_FAMILY: &str = "sans-serif";

const FONT_DIRS: [&str; 4] = [
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "C:\\Windows\\Fonts",
];

/// Preferred faces, best first. Any other `.ttf` is used as a last resort.
const PREFERRED: [&str; 5] = [
    "DejaVuSans.ttf",
    "LiberationSans-Regular.ttf",
    "FreeSans.ttf",
    "Arial.ttf",
    "arial.ttf",
];

static INSTALLED: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Register a TrueType font for chart text, once per process.
///
/// Returns whether text can be drawn. Later calls return the first outcome
/// regardless of `explicit`.
pub fn ensure_chart_font(explicit: Option<&Path>) -> bool {
    INSTALLED
        .get_or_init(|| {
            let candidates: Vec<PathBuf> = match explicit {
                Some(p) => vec![p.to_path_buf()],
                None => system_font_candidates(),
            };
            for path in candidates {
                match install(&path) {
                    Ok(()) => {
                        log::debug!("Chart font: {}", path.display());
                        return Some(path);
                    }
                    Err(e) if explicit.is_some() => log::warn!("{e}"),
                    Err(e) => log::debug!("{e}"),
                }
            }
            log::warn!("No usable TrueType font found; charts will be drawn without text");
            None
        })
        .is_some()
}

fn install(path: &Path) -> Result<(), ReportError> {
    let bytes = std::fs::read(path).map_err(|_| ReportError::Font(path.to_path_buf()))?;
    // plotters keeps registered fonts for the process lifetime.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(CHART_FONT_FAMILY, FontStyle::Normal, bytes)
        .map_err(|_| ReportError::Font(path.to_path_buf()))
}

/// `.ttf` files under the usual system font directories, preferred faces first.
fn system_font_candidates() -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = FONT_DIRS
        .iter()
        .map(Path::new)
        .filter(|dir| dir.is_dir())
        .flat_map(|dir| {
            WalkDir::new(dir)
                .max_depth(5)
                .follow_links(true)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.into_path())
                .filter(|p| {
                    p.extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| e.eq_ignore_ascii_case("ttf"))
                })
        })
        .collect();

    found.sort_by_key(|p| preference_rank(p));
    found
}

fn preference_rank(path: &Path) -> (usize, PathBuf) {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let rank = PREFERRED
        .iter()
        .position(|pref| *pref == name)
        .unwrap_or(PREFERRED.len());
    (rank, path.to_path_buf())
}
