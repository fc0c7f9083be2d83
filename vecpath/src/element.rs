//! Element-level interchange: a whole [`Path`] as an SVG `<path>` element,
//! and import of every path in an `<svg>` document.

use std::sync::OnceLock;

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;

use crate::error::{Error, Result};
use crate::geometry::limits;
use crate::model::{PathStyle, Rect, Vec2};
use crate::path::Path;
use crate::svg::{self, ParseWarning};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

fn translate_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        const NUM: &str = r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?";
        Regex::new(&format!(r"translate\(\s*({NUM})\s*(?:,\s*|\s+)({NUM})\s*\)"))
            .expect("translate pattern is valid")
    })
}

fn color_attr(c: &Option<String>) -> String {
    match c {
        Some(c) => escape(c.as_str()).into_owned(),
        None => "none".to_string(),
    }
}

/// `<path …/>` carrying the curve data, style and translation.
pub fn to_path_element(path: &Path) -> String {
    let style = path.style();
    let t = path.translation();
    format!(
        r#"<path d="{}" fill="{}" stroke="{}" stroke-width="{}" transform="translate({},{})"/>"#,
        svg::serialize(path.control_points()),
        color_attr(&style.fill),
        color_attr(&style.stroke),
        style.stroke_width,
        t.x,
        t.y
    )
}

/// Standalone `<svg>` document; the view box spans every non-empty path.
pub fn to_svg_document(paths: &[Path]) -> String {
    let mut view: Option<Rect> = None;
    for p in paths.iter().filter(|p| !p.is_empty()) {
        let b = p.bounding_box();
        view = Some(match view {
            None => b,
            Some(v) => Rect::from_extents(
                v.x.min(b.x),
                v.y.min(b.y),
                v.max_x().max(b.max_x()),
                v.max_y().max(b.max_y()),
            ),
        });
    }
    let mut out = match view {
        Some(v) => format!(
            r#"<svg xmlns="{}" viewBox="{} {} {} {}">"#,
            SVG_NS, v.x, v.y, v.width, v.height
        ),
        None => format!(r#"<svg xmlns="{}">"#, SVG_NS),
    };
    for p in paths {
        out.push_str("\n  ");
        out.push_str(&to_path_element(p));
    }
    out.push_str("\n</svg>\n");
    out
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportedDocument {
    pub paths: Vec<Path>,
    pub warnings: Vec<ParseWarning>,
}

/// Every `<path>` of an `<svg>` document, in document order.
pub fn from_svg_document(xml: &str) -> Result<ImportedDocument> {
    let mut doc = ImportedDocument::default();
    import_elements(xml, b"svg", |e| {
        if e.local_name().as_ref() != b"path" {
            return Ok(());
        }
        if doc.paths.len() >= limits::MAX_DOCUMENT_PATHS {
            return Err(Error::malformed("too many path elements"));
        }
        let (path, warnings) = path_from_attributes(e)?;
        doc.paths.push(path);
        doc.warnings.extend(warnings);
        Ok(())
    })?;
    Ok(doc)
}

/// A document whose root is a single `<path>` element.
pub fn path_from_element(xml: &str) -> Result<Path> {
    let mut found = None;
    import_elements(xml, b"path", |e| {
        if found.is_none() {
            found = Some(path_from_attributes(e)?.0);
        }
        Ok(())
    })?;
    found.ok_or_else(|| Error::malformed("no path element"))
}

fn import_elements<F>(xml: &str, root: &[u8], mut visit: F) -> Result<()>
where
    F: FnMut(&BytesStart<'_>) -> Result<()>,
{
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buffer = Vec::new();
    let mut seen_root = false;

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if !seen_root {
                    if e.local_name().as_ref() != root {
                        return Err(Error::malformed(format!(
                            "root element is <{}>, expected <{}>",
                            String::from_utf8_lossy(e.local_name().as_ref()),
                            String::from_utf8_lossy(root)
                        )));
                    }
                    seen_root = true;
                }
                visit(e)?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(Error::malformed(err.to_string())),
        }
        buffer.clear();
    }

    if !seen_root {
        return Err(Error::malformed("document has no root element"));
    }
    Ok(())
}

fn path_from_attributes(e: &BytesStart<'_>) -> Result<(Path, Vec<ParseWarning>)> {
    let mut d: Option<String> = None;
    let mut style = PathStyle::default();
    let mut translation = Vec2::ZERO;

    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|err| Error::malformed(err.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|err| Error::malformed(err.to_string()))?
            .into_owned();
        match attr.key.as_ref() {
            b"d" => d = Some(value),
            b"fill" => style.fill = parse_color(value),
            b"stroke" => style.stroke = parse_color(value),
            b"stroke-width" => match value.trim().parse::<f64>() {
                Ok(w) if limits::in_width_bounds(w) => style.stroke_width = w,
                _ => log::warn!("ignoring stroke-width {:?}", value),
            },
            b"transform" => translation = parse_translate(&value).unwrap_or(Vec2::ZERO),
            _ => {}
        }
    }

    let d = d.ok_or_else(|| Error::malformed("path element has no 'd' attribute"))?;
    let parsed = svg::parse(&d)?;
    let mut path = Path::new(parsed.points);
    path.set_style(style);
    path.set_translation(translation);
    Ok((path, parsed.warnings))
}

fn parse_color(value: String) -> Option<String> {
    let v = value.trim();
    if v.is_empty() || v == "none" {
        None
    } else {
        Some(v.to_string())
    }
}

/// Offset from the first `translate(tx,ty)` in a transform list.
pub fn parse_translate(transform: &str) -> Option<Vec2> {
    let caps = translate_pattern().captures(transform)?;
    let x = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let y = caps.get(2)?.as_str().parse::<f64>().ok()?;
    Some(Vec2::new(x, y))
}
