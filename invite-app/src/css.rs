//! CSS values for overlay styles and card backgrounds.

use invite_core::{Centering, Extent, FontSlant, FontWeight, Length, TextOverlay};

/// CSS length for a position.
pub fn length(value: Length) -> String {
    match value {
        Length::Percent(p) => format!("{p}%"),
        Length::Px(px) => format!("{px}px"),
    }
}

/// CSS length for a dimension.
pub fn extent(value: Extent) -> String {
    match value {
        Extent::Auto => "auto".to_string(),
        Extent::Px(px) => format!("{px}px"),
    }
}

/// `transform` for the default placement.
pub const fn transform(centering: Centering) -> &'static str {
    match centering {
        Centering::None => "none",
        Centering::Horizontal => "translateX(-50%)",
        Centering::Both => "translate(-50%, -50%)",
    }
}

pub const fn font_weight(weight: FontWeight) -> &'static str {
    match weight {
        FontWeight::Normal => "normal",
        FontWeight::Bold => "bold",
    }
}

pub const fn font_style(slant: FontSlant) -> &'static str {
    match slant {
        FontSlant::Normal => "normal",
        FontSlant::Italic => "italic",
    }
}

/// Inline style declarations for an overlay element.
pub fn declarations(overlay: &TextOverlay) -> Vec<(&'static str, String)> {
    let style = &overlay.style;
    let geometry = &overlay.geometry;
    vec![
        ("font-family", style.font_family.clone()),
        ("font-size", format!("{}px", style.font_size)),
        ("color", style.color.clone()),
        ("text-align", style.align.as_css().to_string()),
        ("left", length(geometry.left)),
        ("top", length(geometry.top)),
        ("transform", transform(geometry.centering).to_string()),
        ("font-weight", font_weight(style.weight).to_string()),
        ("font-style", font_style(style.slant).to_string()),
        ("line-height", style.line_height.to_string()),
        ("letter-spacing", format!("{}px", style.letter_spacing)),
        ("width", extent(geometry.width)),
        ("height", extent(geometry.height)),
    ]
}

/// `background-image` value for a card; empty clears it.
pub fn background_image(data_url: Option<&str>) -> String {
    data_url.map_or_else(String::new, |url| format!("url({url})"))
}

/// Class list for a side-list row.
pub fn list_item_class(active: bool) -> &'static str {
    if active {
        "text-element-item active"
    } else {
        "text-element-item"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invite_core::{Cards, Geometry, TextStyle};

    fn overlay() -> TextOverlay {
        let card = Cards::new(1).id(0).expect("card 0");
        TextOverlay::new("Hello", card, TextStyle::default(), Geometry::default())
    }

    fn lookup<'a>(decls: &'a [(&'static str, String)], name: &str) -> &'a str {
        decls
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
            .expect("declaration present")
    }

    #[test]
    fn default_overlay_is_centered_on_both_axes() {
        let decls = declarations(&overlay());
        assert_eq!(lookup(&decls, "left"), "50%");
        assert_eq!(lookup(&decls, "top"), "50%");
        assert_eq!(lookup(&decls, "transform"), "translate(-50%, -50%)");
        assert_eq!(lookup(&decls, "width"), "auto");
        assert_eq!(lookup(&decls, "font-size"), "16px");
        assert_eq!(lookup(&decls, "line-height"), "1.5");
        assert_eq!(lookup(&decls, "letter-spacing"), "0px");
    }

    #[test]
    fn dragged_overlay_uses_pixels_and_no_transform() {
        let mut o = overlay();
        o.geometry.left = Length::Px(12.5);
        o.geometry.top = Length::Px(40.0);
        o.geometry.centering = Centering::None;
        o.geometry.width = Extent::Px(120.0);

        let decls = declarations(&o);
        assert_eq!(lookup(&decls, "left"), "12.5px");
        assert_eq!(lookup(&decls, "top"), "40px");
        assert_eq!(lookup(&decls, "transform"), "none");
        assert_eq!(lookup(&decls, "width"), "120px");
    }

    #[test]
    fn seed_transform_is_horizontal_only() {
        assert_eq!(transform(Centering::Horizontal), "translateX(-50%)");
    }

    #[test]
    fn background_image_wraps_data_url() {
        assert_eq!(
            background_image(Some("data:image/png;base64,AAAA")),
            "url(data:image/png;base64,AAAA)"
        );
        assert_eq!(background_image(None), "");
    }

    #[test]
    fn list_item_class_marks_active() {
        assert_eq!(list_item_class(true), "text-element-item active");
        assert_eq!(list_item_class(false), "text-element-item");
    }
}
