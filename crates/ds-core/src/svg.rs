//! SVG export of a document (the "download" action).

use crate::color::Color;
use crate::model::{CanvasObject, Document, ObjectKind};
use std::fmt::Write;

fn svg_color(c: Color) -> String {
    if c.a == 255 {
        c.to_hex()
    } else {
        format!("rgba({}, {}, {}, {:.3})", c.r, c.g, c.b, f32::from(c.a) / 255.0)
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// ` fill="…" stroke="…" stroke-width="…"` for an object.
fn paint_attrs(obj: &CanvasObject) -> String {
    let mut attrs = String::new();
    match obj.fill {
        Some(fill) => {
            let _ = write!(attrs, r#" fill="{}""#, svg_color(fill));
        }
        None => attrs.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = obj.stroke {
        let _ = write!(
            attrs,
            r#" stroke="{}" stroke-width="{}""#,
            svg_color(stroke.color),
            stroke.width
        );
    }
    attrs
}

fn render_object(out: &mut String, obj: &CanvasObject) {
    let paint = paint_attrs(obj);
    let id = escape_xml(obj.id.as_str());
    let (x, y) = (obj.left, obj.top);
    let _ = match &obj.kind {
        ObjectKind::Text {
            content,
            font_size,
            font_weight,
        } => writeln!(
            out,
            r#"  <text id="{id}" x="{x}" y="{}" font-size="{font_size}" font-weight="{font_weight}"{paint}>{}</text>"#,
            y + font_size,
            escape_xml(content)
        ),
        ObjectKind::Rect { width, height } => writeln!(
            out,
            r#"  <rect id="{id}" x="{x}" y="{y}" width="{width}" height="{height}"{paint}/>"#
        ),
        ObjectKind::Circle { radius } => writeln!(
            out,
            r#"  <circle id="{id}" cx="{}" cy="{}" r="{radius}"{paint}/>"#,
            x + radius,
            y + radius
        ),
        ObjectKind::Triangle { width, height } => writeln!(
            out,
            r#"  <polygon id="{id}" points="{},{y} {},{} {x},{}"{paint}/>"#,
            x + width / 2.0,
            x + width,
            y + height,
            y + height
        ),
        ObjectKind::Line { x1, y1, x2, y2 } => writeln!(
            out,
            r#"  <line id="{id}" x1="{}" y1="{}" x2="{}" y2="{}"{paint}/>"#,
            x + x1,
            y + y1,
            x + x2,
            y + y2
        ),
        ObjectKind::Polygon { points } => {
            let pts: Vec<String> = points
                .iter()
                .map(|p| format!("{},{}", x + p.x, y + p.y))
                .collect();
            writeln!(out, r#"  <polygon id="{id}" points="{}"{paint}/>"#, pts.join(" "))
        }
        ObjectKind::Image {
            src,
            width,
            height,
            scale,
        } => writeln!(
            out,
            r#"  <image id="{id}" x="{x}" y="{y}" width="{}" height="{}" href="{}"/>"#,
            *width as f32 * scale,
            *height as f32 * scale,
            escape_xml(src)
        ),
    };
}

/// Render the whole document: a background rect, then objects back to front.
pub fn render_svg(doc: &Document) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = doc.width,
        h = doc.height
    );
    let _ = writeln!(
        out,
        r#"  <rect width="100%" height="100%" fill="{}"/>"#,
        svg_color(doc.background)
    );
    for obj in &doc.objects {
        render_object(&mut out, obj);
    }
    out.push_str("</svg>\n");
    out
}
