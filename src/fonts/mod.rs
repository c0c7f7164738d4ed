//! Font loading utilities for txt2pdf.
//!
//! `genpdf` embeds TrueType fonts, so a font family has to be found on disk before the first
//! document can be rendered.  A Roboto family supplied by the user is searched first; when none is
//! found a system family (DejaVu Sans, Liberation Sans or Arial) is used instead.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{FontData, FontFamily};
use log::{debug, warn};

/// Name of the preferred font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "Roboto";

/// Environment variable naming a directory with the preferred font family.
pub const FONTS_DIR_ENV: &str = "TXT2PDF_FONTS_DIR";

/// File names making up one font family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FamilyFiles {
    name: &'static str,
    regular: &'static str,
    bold: &'static str,
    italic: &'static str,
    bold_italic: &'static str,
}

impl FamilyFiles {
    fn all(&self) -> [&'static str; 4] {
        [self.regular, self.bold, self.italic, self.bold_italic]
    }
}

const BUNDLED_FAMILY: FamilyFiles = FamilyFiles {
    name: DEFAULT_FONT_FAMILY_NAME,
    regular: "Roboto-Regular.ttf",
    bold: "Roboto-Bold.ttf",
    italic: "Roboto-Italic.ttf",
    bold_italic: "Roboto-BoldItalic.ttf",
};

const DEJAVU_SANS: FamilyFiles = FamilyFiles {
    name: "DejaVu Sans",
    regular: "DejaVuSans.ttf",
    bold: "DejaVuSans-Bold.ttf",
    italic: "DejaVuSans-Oblique.ttf",
    bold_italic: "DejaVuSans-BoldOblique.ttf",
};

const FALLBACK_FAMILIES: &[(FamilyFiles, &[&str])] = &[
    (
        DEJAVU_SANS,
        &[
            "/usr/share/fonts/truetype/dejavu",
            "/usr/share/fonts/dejavu",
            "/usr/share/fonts/dejavu-sans-fonts",
            "/usr/share/fonts/TTF",
        ],
    ),
    (
        FamilyFiles {
            name: "Liberation Sans",
            regular: "LiberationSans-Regular.ttf",
            bold: "LiberationSans-Bold.ttf",
            italic: "LiberationSans-Italic.ttf",
            bold_italic: "LiberationSans-BoldItalic.ttf",
        },
        &[
            "/usr/share/fonts/truetype/liberation",
            "/usr/share/fonts/truetype/liberation2",
            "/usr/share/fonts/liberation-sans",
            "/usr/share/fonts/liberation",
            "/usr/share/fonts/TTF",
        ],
    ),
    (
        FamilyFiles {
            name: "Arial",
            regular: "arial.ttf",
            bold: "arialbd.ttf",
            italic: "ariali.ttf",
            bold_italic: "arialbi.ttf",
        },
        &["C:\\Windows\\Fonts"],
    ),
];

fn font_directory_candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = explicit {
        candidates.push(path.to_path_buf());
    }

    if let Some(path) = env::var_os(FONTS_DIR_ENV) {
        if !path.is_empty() {
            candidates.push(PathBuf::from(path));
        }
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            let candidate = bin_dir.join("assets/fonts");
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
    }

    candidates
}

fn missing_font_files(path: &Path, family: &FamilyFiles) -> Vec<&'static str> {
    family
        .all()
        .into_iter()
        .filter(|name| !path.join(name).is_file())
        .collect()
}

fn resolve_font_directory(explicit: Option<&Path>) -> Result<PathBuf, Error> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates(explicit) {
        let exists = candidate.is_dir();
        let missing = missing_font_files(&candidate, &BUNDLED_FAMILY);

        if exists && missing.is_empty() {
            return Ok(candidate);
        }

        let reason = if !exists {
            format!("directory missing at {}", candidate.display())
        } else {
            format!("missing files [{}]", missing.join(", "))
        };

        attempts.push(format!("{} ({})", candidate.display(), reason));
    }

    Err(Error::new(
        format!(
            "Unable to locate font directory. Checked: {}. Pass --fonts-dir or set {}.",
            attempts.join(", "),
            FONTS_DIR_ENV
        ),
        io::Error::new(io::ErrorKind::NotFound, "font directory not found"),
    ))
}

fn load_font(directory: &Path, file: &str, family: &str) -> Result<FontData, Error> {
    let path = directory.join(file);
    FontData::load(&path, None).map_err(|err| {
        let io_kind = if path.is_file() {
            io::ErrorKind::Other
        } else {
            io::ErrorKind::NotFound
        };
        Error::new(
            format!(
                "Failed to load {} font at {}: {}",
                family,
                path.display(),
                err
            ),
            io::Error::new(io_kind, err.to_string()),
        )
    })
}

fn load_family(directory: &Path, files: &FamilyFiles) -> Result<FontFamily<FontData>, Error> {
    Ok(FontFamily {
        regular: load_font(directory, files.regular, files.name)?,
        bold: load_font(directory, files.bold, files.name)?,
        italic: load_font(directory, files.italic, files.name)?,
        bold_italic: load_font(directory, files.bold_italic, files.name)?,
    })
}

/// Returns the first family of `families` whose files are all present in one of its directories.
fn locate_family<'a>(
    families: &'a [(FamilyFiles, &'a [&'a str])],
) -> Option<(&'a FamilyFiles, &'a Path)> {
    families.iter().find_map(|(files, directories)| {
        directories
            .iter()
            .map(Path::new)
            .find(|directory| missing_font_files(directory, files).is_empty())
            .map(|directory| (files, directory))
    })
}

fn system_fallback_font_family() -> Result<FontFamily<FontData>, Error> {
    if let Some((files, directory)) = locate_family(FALLBACK_FAMILIES) {
        debug!("Using {} fonts from {}", files.name, directory.display());
        return load_family(directory, files);
    }

    Err(Error::new(
        "No system font family found for fallback",
        io::Error::new(io::ErrorKind::NotFound, "system fonts not found"),
    ))
}

fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}

/// Loads the Roboto family from the first matching search directory, falling back to a system
/// family when none of the directories contain it.
///
/// Search order: `explicit`, the `TXT2PDF_FONTS_DIR` environment variable and `assets/fonts` next
/// to the executable.
pub fn resolve_font_family(explicit: Option<&Path>) -> Result<FontFamily<FontData>, Error> {
    let bundled =
        resolve_font_directory(explicit).and_then(|dir| load_family(&dir, &BUNDLED_FAMILY));

    match bundled {
        Ok(family) => Ok(family),
        Err(err) if fonts_missing(&err) => match system_fallback_font_family() {
            Ok(fallback) => {
                warn!("Bundled fonts unavailable ({}); using a system font family.", err);
                Ok(fallback)
            }
            Err(fallback_err) => {
                warn!(
                    "Bundled fonts unavailable ({}); system fallback failed: {}",
                    err, fallback_err
                );
                Err(Error::new(
                    format!(
                        "Bundled fonts unavailable and system fallback failed: {}",
                        err
                    ),
                    io::Error::new(io::ErrorKind::NotFound, "no usable fonts are available"),
                ))
            }
        },
        Err(err) => Err(err),
    }
}

/// Indicates whether any usable font family can be found on this machine.
pub fn default_fonts_available() -> bool {
    resolve_font_directory(None).is_ok() || locate_family(FALLBACK_FAMILIES).is_some()
}
