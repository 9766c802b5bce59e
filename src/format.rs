//! Rich-text rendering for formatted paste.
//!
//! When "paste with format" is on and the captured entry carries formatting,
//! the paste path re-materializes the text as RTF or HTML markup before it is
//! placed on the clipboard. The flavor recorded at capture time decides which
//! renderer runs; entries without a flavor paste as plain text.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatFlavor {
    Rtf,
    Html,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormatInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor: Option<FormatFlavor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<(u8, u8, u8)>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<(u8, u8, u8)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
}

/// Render `text` with the given formatting, dispatching on the flavor.
pub fn apply_format(text: &str, info: &FormatInfo) -> String {
    match info.flavor {
        Some(FormatFlavor::Rtf) => render_rtf(text, info),
        Some(FormatFlavor::Html) => render_html(text, info),
        None => text.to_string(),
    }
}

fn render_rtf(text: &str, info: &FormatInfo) -> String {
    let mut rtf = String::from(r"{\rtf1\ansi\deff0");
    if let Some(font) = &info.font {
        rtf.push_str(r"{\fonttbl{\f0\fnil ");
        rtf.push_str(font);
        rtf.push_str(";}}");
    }
    if let Some((r, g, b)) = info.color {
        rtf.push_str(&format!(r"{{\colortbl;\red{r}\green{g}\blue{b};}}"));
    }
    rtf.push_str(r"\f0");
    if let Some(size) = info.size {
        // RTF font size is expressed in half-points.
        rtf.push_str(&format!(r"\fs{}", (size * 2.0) as i32));
    }
    if info.bold {
        rtf.push_str(r"\b");
    }
    if info.italic {
        rtf.push_str(r"\i");
    }
    if info.underline {
        rtf.push_str(r"\ul");
    }
    rtf.push(' ');
    rtf.push_str(&text.replace('\n', r"\par "));
    rtf.push('}');
    rtf
}

fn render_html(text: &str, info: &FormatInfo) -> String {
    let mut style = String::new();
    if let Some(font) = &info.font {
        style.push_str(&format!("font-family: {font}; "));
    }
    if let Some(size) = info.size {
        style.push_str(&format!("font-size: {size}pt; "));
    }
    if let Some((r, g, b)) = info.color {
        style.push_str(&format!("color: rgb({r}, {g}, {b}); "));
    }
    if let Some((r, g, b)) = info.background_color {
        style.push_str(&format!("background-color: rgb({r}, {g}, {b}); "));
    }
    let mut html = format!("<div style='{style}'>");
    if info.bold {
        html.push_str("<strong>");
    }
    if info.italic {
        html.push_str("<em>");
    }
    html.push_str(text);
    if info.italic {
        html.push_str("</em>");
    }
    if info.bold {
        html.push_str("</strong>");
    }
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_when_no_flavor() {
        let info = FormatInfo {
            bold: true,
            ..Default::default()
        };
        assert_eq!(apply_format("hello", &info), "hello");
    }

    #[test]
    fn rtf_rendering() {
        let info = FormatInfo {
            flavor: Some(FormatFlavor::Rtf),
            font: Some("Segoe UI".into()),
            size: Some(11.0),
            color: Some((10, 20, 30)),
            bold: true,
            ..Default::default()
        };
        let out = apply_format("line1\nline2", &info);
        assert!(out.starts_with(r"{\rtf1\ansi\deff0"));
        assert!(out.contains(r"{\fonttbl{\f0\fnil Segoe UI;}}"));
        assert!(out.contains(r"{\colortbl;\red10\green20\blue30;}"));
        assert!(out.contains(r"\fs22"));
        assert!(out.contains(r"\b "));
        assert!(out.contains(r"line1\par line2"));
        assert!(out.ends_with('}'));
    }

    #[test]
    fn html_rendering_nests_emphasis() {
        let info = FormatInfo {
            flavor: Some(FormatFlavor::Html),
            size: Some(12.0),
            bold: true,
            italic: true,
            ..Default::default()
        };
        let out = apply_format("hi", &info);
        assert_eq!(
            out,
            "<div style='font-size: 12pt; '><strong><em>hi</em></strong></div>"
        );
    }
}
