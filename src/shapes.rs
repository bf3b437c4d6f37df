//! Shape markup checks.
//!
//! Shape elements hold SVG fragments drawn inside a 100x100 view box. Markup
//! from the catalog is trusted; markup from the assistant or the command bar
//! is checked for well-formedness before it reaches the deck.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Error, Result};

/// Check that `markup` is a well-formed SVG fragment and return it trimmed.
///
/// A full `<svg>` document is unwrapped to its children so every stored
/// shape shares the same view box.
pub fn normalize_markup(markup: &str) -> Result<String> {
    let trimmed = markup.trim();
    if trimmed.is_empty() {
        return Err(Error::parse("empty shape markup", None));
    }
    check_well_formed(trimmed)?;
    Ok(unwrap_svg_root(trimmed).unwrap_or(trimmed).trim().to_string())
}

fn check_well_formed(fragment: &str) -> Result<()> {
    // Wrap so that multiple sibling roots are accepted
    let wrapped = format!("<g>{fragment}</g>");
    let mut reader = Reader::from_str(&wrapped);
    let mut depth: usize = 0;
    let mut elements: usize = 0;
    let mut wrapper_closed = false;

    loop {
        let event = reader.read_event();
        // Only the end of input may follow the wrapper's closing tag
        if wrapper_closed && !matches!(event, Ok(Event::Eof)) {
            return Err(Error::parse("shape markup closes more elements than it opens", None));
        }
        match event {
            Ok(Event::Start(e)) => {
                check_attributes(&e)?;
                depth += 1;
                elements += 1;
            }
            Ok(Event::Empty(e)) => {
                check_attributes(&e)?;
                elements += 1;
            }
            Ok(Event::End(_)) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| Error::parse("unexpected closing tag in shape markup", None))?;
                wrapper_closed = depth == 0;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::parse(
                    format!("malformed shape markup at byte {}: {e}", reader.buffer_position()),
                    None,
                ))
            }
        }
    }

    if depth != 0 {
        return Err(Error::parse("unclosed element in shape markup", None));
    }
    // The wrapper itself counts as one
    if elements < 2 {
        return Err(Error::parse("shape markup contains no elements", None));
    }
    Ok(())
}

fn check_attributes(e: &quick_xml::events::BytesStart<'_>) -> Result<()> {
    for attr in e.attributes() {
        attr.map_err(|err| Error::parse(format!("bad attribute in shape markup: {err}"), None))?;
    }
    Ok(())
}

/// Inner content of a single outer `<svg ...>...</svg>`, if that is what `markup` is.
fn unwrap_svg_root(markup: &str) -> Option<&str> {
    if !markup.starts_with("<svg") || !markup.ends_with("</svg>") {
        return None;
    }
    let open_end = markup.find('>')?;
    if markup[..open_end].ends_with('/') {
        return None;
    }
    let close_start = markup.rfind("</svg>")?;
    (open_end < close_start).then(|| &markup[open_end + 1..close_start])
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::presets::SHAPES;

    #[test]
    fn every_catalog_shape_is_well_formed() {
        for shape in SHAPES {
            assert!(normalize_markup(shape.markup).is_ok(), "{} failed", shape.name);
        }
    }

    #[test]
    fn svg_root_is_unwrapped() {
        let markup = r#"<svg viewBox="0 0 100 100"><circle cx="50" cy="50" r="10" /></svg>"#;
        assert_eq!(normalize_markup(markup).unwrap(), r#"<circle cx="50" cy="50" r="10" />"#);
    }

    #[test]
    fn unclosed_tags_are_rejected() {
        assert!(normalize_markup("<path d=\"M0 0\">").is_err());
        assert!(normalize_markup("<g><rect /></circle>").is_err());
    }

    #[test]
    fn fragments_cannot_close_the_wrapper() {
        assert!(normalize_markup("</g><g>").is_err());
        assert!(normalize_markup("<rect /></g><g><rect />").is_err());
        assert!(normalize_markup("<g><rect /></g><circle r=\"1\" />").is_ok());
    }

    #[test]
    fn plain_text_is_rejected() {
        assert!(normalize_markup("   ").is_err());
        assert!(normalize_markup("just words").is_err());
    }
}
