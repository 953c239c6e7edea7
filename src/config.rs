use crate::layout::{PageGeometry, PaginationPolicy};
use crate::pagesize;
use crate::style::StyleSet;
use crate::units::Pt;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Everything about a render that isn't the resume itself
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub geometry: PageGeometry,
    pub style: StyleSet,
    pub pagination: PaginationPolicy,
    /// Draw a band in the highlight colour across the top of the first page
    pub header_strip: bool,
    /// Where the finished PDF is written
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            geometry: PageGeometry::default(),
            style: StyleSet::default(),
            pagination: PaginationPolicy::default(),
            header_strip: false,
            output: PathBuf::from("resume.pdf"),
        }
    }
}

/// The on-disk form of [Config]. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    geometry: GeometryFile,
    style: StyleSet,
    pagination: PaginationPolicy,
    header_strip: bool,
    output: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct GeometryFile {
    /// `A4`, `A5`, `Letter`, or `Legal`; explicit `width` and `height` win
    page_size: Option<String>,
    width: Option<Pt>,
    height: Option<Pt>,
    margin: Option<Pt>,
    line_spacing: Option<Pt>,
}

impl GeometryFile {
    fn resolve(self) -> Result<PageGeometry> {
        let (width, height) = match self.page_size.as_deref() {
            Some(name) => pagesize::by_name(name).ok_or_else(|| {
                Error::InvalidGeometry(format!("unknown page size `{name}`"))
            })?,
            None => pagesize::A4,
        };
        PageGeometry::new(
            (self.width.unwrap_or(width), self.height.unwrap_or(height)),
            self.margin.unwrap_or(PageGeometry::DEFAULT_MARGIN),
            self.line_spacing.unwrap_or(PageGeometry::DEFAULT_LINE_SPACING),
        )
    }
}

impl Config {
    /// Parse a JSON configuration, validating its page geometry
    pub fn from_json(json: &str) -> Result<Config> {
        let file: ConfigFile = serde_json::from_str(json)?;
        let defaults = Config::default();
        Ok(Config {
            geometry: file.geometry.resolve()?,
            style: file.style,
            pagination: file.pagination,
            header_strip: file.header_strip,
            output: file.output.unwrap_or(defaults.output),
        })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        log::debug!("loading configuration from {}", path.display());
        Config::from_json(&std::fs::read_to_string(path)?)
    }
}
