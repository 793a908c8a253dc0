//! QR encoding of invoices
//!
//! Renders a payload as a QR code in raster (PNG) or vector (SVG) form. The payload is
//! either the bare invoice or a `lightning:` URI, callers pick with [`PayloadConvention`].

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, ImageFormat, Rgba};
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// URI scheme prefix for page-embedded codes
pub const LIGHTNING_URI_PREFIX: &str = "lightning:";

/// Default pixels per module
pub const DEFAULT_SCALE: u32 = 3;

/// Largest rendered side, in pixels or SVG units
pub const MAX_IMAGE_SIDE: u32 = 4096;

/// Modules of quiet zone on each side
const QUIET_ZONE_MODULES: usize = 4;

/// What string the QR code carries for a given invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadConvention {
    /// The invoice text only
    Bare,
    /// `lightning:<invoice>`
    LightningUri,
}

impl PayloadConvention {
    /// Build the payload for `bolt11`
    pub fn apply(&self, bolt11: &str) -> String {
        match self {
            PayloadConvention::Bare => bolt11.to_string(),
            PayloadConvention::LightningUri => format!("{LIGHTNING_URI_PREFIX}{bolt11}"),
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QrFormat {
    /// PNG image
    Raster,
    /// SVG document
    Vector,
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    /// ~7% recovery
    L,
    /// ~15% recovery
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    #[default]
    H,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::L => EcLevel::L,
            ErrorCorrection::M => EcLevel::M,
            ErrorCorrection::Q => EcLevel::Q,
            ErrorCorrection::H => EcLevel::H,
        }
    }
}

/// RGBA colour
///
/// Parsed from `#rgb`, `#rrggbb`, `#rrggbbaa` or the names `black`, `white` and
/// `transparent`. Printed as CSS hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color([u8; 4]);

impl Color {
    /// Opaque black
    pub const BLACK: Color = Color([0, 0, 0, 255]);
    /// Opaque white
    pub const WHITE: Color = Color([255, 255, 255, 255]);
    /// Fully transparent
    pub const TRANSPARENT: Color = Color([0, 0, 0, 0]);

    /// Colour from RGBA channels
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// RGBA channels
    pub const fn channels(&self) -> [u8; 4] {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        if a == u8::MAX {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "black" => return Ok(Color::BLACK),
            "white" => return Ok(Color::WHITE),
            "transparent" => return Ok(Color::TRANSPARENT),
            _ => {}
        }

        let invalid = || Error::EncodingFailure(format!("invalid colour: {s}"));
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        // #rgb is shorthand for #rrggbb
        let short = |digit: &str| channel(digit).map(|v| v * 17);

        match hex.len() {
            3 => Ok(Color([
                short(&hex[0..1])?,
                short(&hex[1..2])?,
                short(&hex[2..3])?,
                255,
            ])),
            6 => Ok(Color([
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                255,
            ])),
            8 => Ok(Color([
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            ])),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Rendering parameters shared by both formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Colour of dark modules
    pub module_color: Color,
    /// Colour of light modules and quiet zone
    pub background_color: Color,
    /// Pixels (or SVG units) per module
    pub scale: u32,
    /// Error correction level
    pub error_correction: ErrorCorrection,
    /// Draw the 4-module quiet zone
    pub quiet_zone: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            module_color: Color::BLACK,
            background_color: Color::WHITE,
            scale: DEFAULT_SCALE,
            error_correction: ErrorCorrection::default(),
            quiet_zone: true,
        }
    }
}

/// A rendered QR code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedImage {
    /// PNG bytes
    Raster {
        /// Encoded PNG
        png: Vec<u8>,
        /// Parameters used
        options: RenderOptions,
    },
    /// SVG markup without explicit root width/height
    Vector {
        /// SVG document
        svg: String,
        /// Parameters used
        options: RenderOptions,
    },
}

impl EncodedImage {
    /// The encoded bytes
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            EncodedImage::Raster { png, .. } => png,
            EncodedImage::Vector { svg, .. } => svg.as_bytes(),
        }
    }

    /// MIME type of the encoded bytes
    pub fn content_type(&self) -> &'static str {
        match self {
            EncodedImage::Raster { .. } => "image/png",
            EncodedImage::Vector { .. } => "image/svg+xml",
        }
    }
}

/// Encode `payload` in the requested format
pub fn encode(
    payload: &str,
    format: QrFormat,
    options: &RenderOptions,
) -> Result<EncodedImage, Error> {
    match format {
        QrFormat::Raster => Ok(EncodedImage::Raster {
            png: render_raster(payload, options)?,
            options: *options,
        }),
        QrFormat::Vector => Ok(EncodedImage::Vector {
            svg: render_vector(payload, options)?,
            options: *options,
        }),
    }
}

/// Render `payload` as PNG bytes
pub fn render_raster(payload: &str, options: &RenderOptions) -> Result<Vec<u8>, Error> {
    let code = build_code(payload, options)?;

    let image = code
        .render::<Rgba<u8>>()
        .dark_color(Rgba(options.module_color.channels()))
        .light_color(Rgba(options.background_color.channels()))
        .module_dimensions(options.scale, options.scale)
        .quiet_zone(options.quiet_zone)
        .build();

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| Error::EncodingFailure(e.to_string()))?;

    tracing::trace!("Rendered {} byte PNG", png.len());

    Ok(png)
}

/// Render `payload` as an SVG document sized by its container
///
/// The XML declaration and the root element's `width`/`height` attributes are removed so
/// the markup can be embedded directly in a page.
pub fn render_vector(payload: &str, options: &RenderOptions) -> Result<String, Error> {
    let code = build_code(payload, options)?;

    let module_color = options.module_color.to_string();
    let background_color = options.background_color.to_string();

    let document = code
        .render::<svg::Color<'_>>()
        .dark_color(svg::Color(&module_color))
        .light_color(svg::Color(&background_color))
        .module_dimensions(options.scale, options.scale)
        .quiet_zone(options.quiet_zone)
        .build();

    strip_svg_dimensions(&document)
}

/// `data:` URI for embedding PNG bytes in HTML
pub fn png_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

fn build_code(payload: &str, options: &RenderOptions) -> Result<QrCode, Error> {
    if payload.is_empty() {
        return Err(Error::EncodingFailure("payload is empty".to_string()));
    }

    if options.scale == 0 {
        return Err(Error::EncodingFailure("scale must be positive".to_string()));
    }

    let code =
        QrCode::with_error_correction_level(payload.as_bytes(), options.error_correction.into())
            .map_err(|e| Error::EncodingFailure(e.to_string()))?;

    let quiet_zone = if options.quiet_zone {
        2 * QUIET_ZONE_MODULES
    } else {
        0
    };
    let modules = code.width() + quiet_zone;

    // The renderers allocate the whole image up front
    u32::try_from(modules)
        .ok()
        .and_then(|width| width.checked_mul(options.scale))
        .filter(|side| *side <= MAX_IMAGE_SIDE)
        .ok_or_else(|| {
            Error::EncodingFailure(format!(
                "{} modules at scale {} exceed {} pixels",
                modules, options.scale, MAX_IMAGE_SIDE
            ))
        })?;

    Ok(code)
}

fn strip_svg_dimensions(document: &str) -> Result<String, Error> {
    let start = document
        .find("<svg")
        .ok_or_else(|| Error::EncodingFailure("renderer produced no <svg> element".to_string()))?;
    let body = &document[start..];

    let end = body
        .find('>')
        .ok_or_else(|| Error::EncodingFailure("unterminated <svg> element".to_string()))?;

    let dimensions = Regex::new(r#"\s(?:width|height)="[^"]*""#)
        .map_err(|e| Error::EncodingFailure(e.to_string()))?;
    let root = dimensions.replace_all(&body[..end], "");

    Ok(format!("{}{}", root, &body[end..]))
}
