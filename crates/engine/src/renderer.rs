//! Rendering boundary and the bundled SVG renderer.

use std::fmt::Write;

use async_trait::async_trait;

use logo_core::{Combination, LogoError, LogoLayout, LogoResult};

/// Turns a combination into a drawable artifact. Implementations must be pure.
#[async_trait]
pub trait LogoRenderer: Send + Sync {
    async fn render(&self, combination: &Combination) -> LogoResult<String>;
}

/// Renders combinations as standalone SVG markup.
#[derive(Debug, Clone)]
pub struct SvgRenderer;

impl SvgRenderer {
    /// Create a new renderer instance.
    pub fn new() -> Self {
        Self
    }

    fn canvas(layout: LogoLayout) -> (u32, u32) {
        match layout {
            LogoLayout::IconLeft | LogoLayout::IconRight | LogoLayout::TextOnly | LogoLayout::IconIntegrated => {
                (400, 200)
            }
            LogoLayout::IconTop | LogoLayout::Stacked | LogoLayout::Badge => (300, 300),
            LogoLayout::IconOnly => (200, 200),
        }
    }

    fn build(&self, c: &Combination) -> Result<String, std::fmt::Error> {
        let (w, h) = Self::canvas(c.layout);
        let p = &c.palette;
        let name = escape_xml(&c.company_name);
        let slogan = c
            .slogan
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(escape_xml);
        let font = format!(
            "font-family=\"'{}', sans-serif\" font-weight=\"{}\"",
            escape_xml(&c.font.family),
            c.font.weight
        );
        let icon_path = escape_xml(&c.icon.path);

        let mut svg = String::new();
        write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" data-layout="{}">"#,
            c.layout.id()
        )?;
        write!(svg, r#"<rect width="100%" height="100%" fill="{}"/>"#, p.background)?;

        match c.layout {
            LogoLayout::IconLeft => {
                write!(svg, r#"<g transform="translate(20 50)"><path d="{icon_path}" fill="{}"/></g>"#, p.primary)?;
                write!(svg, r#"<text x="140" y="105" text-anchor="start" font-size="40" fill="{}" {font}>{name}</text>"#, p.text)?;
                if let Some(slogan) = &slogan {
                    write!(svg, r#"<text x="140" y="135" text-anchor="start" font-size="16" fill="{}" {font}>{slogan}</text>"#, p.secondary)?;
                }
            }
            LogoLayout::IconRight => {
                write!(svg, r#"<g transform="translate(280 50)"><path d="{icon_path}" fill="{}"/></g>"#, p.primary)?;
                write!(svg, r#"<text x="260" y="105" text-anchor="end" font-size="40" fill="{}" {font}>{name}</text>"#, p.text)?;
                if let Some(slogan) = &slogan {
                    write!(svg, r#"<text x="260" y="135" text-anchor="end" font-size="16" fill="{}" {font}>{slogan}</text>"#, p.secondary)?;
                }
            }
            LogoLayout::IconTop | LogoLayout::Stacked => {
                write!(svg, r#"<g transform="translate(100 40)"><path d="{icon_path}" fill="{}"/></g>"#, p.primary)?;
                write!(svg, r#"<text x="150" y="190" text-anchor="middle" font-size="36" fill="{}" {font}>{name}</text>"#, p.text)?;
                if let Some(slogan) = &slogan {
                    write!(svg, r#"<text x="150" y="225" text-anchor="middle" font-size="16" fill="{}" {font}>{slogan}</text>"#, p.secondary)?;
                }
            }
            LogoLayout::TextOnly => {
                write!(svg, r#"<text x="200" y="105" text-anchor="middle" font-size="48" fill="{}" {font}>{name}</text>"#, p.primary)?;
                if let Some(slogan) = &slogan {
                    write!(svg, r#"<text x="200" y="140" text-anchor="middle" font-size="16" fill="{}" {font}>{slogan}</text>"#, p.text)?;
                }
            }
            LogoLayout::IconOnly => {
                write!(svg, r#"<g transform="translate(50 50)"><path d="{icon_path}" fill="{}"/></g>"#, p.primary)?;
            }
            LogoLayout::IconIntegrated => {
                write!(svg, r#"<g transform="translate(40 78) scale(0.44)"><path d="{icon_path}" fill="{}"/></g>"#, p.accent)?;
                write!(svg, r#"<text x="90" y="112" text-anchor="start" font-size="44" fill="{}" {font}>{name}</text>"#, p.primary)?;
                if let Some(slogan) = &slogan {
                    write!(svg, r#"<text x="90" y="145" text-anchor="start" font-size="16" fill="{}" {font}>{slogan}</text>"#, p.text)?;
                }
            }
            LogoLayout::Badge => {
                write!(svg, r#"<circle cx="150" cy="150" r="130" fill="{}"/>"#, p.primary)?;
                write!(svg, r#"<circle cx="150" cy="150" r="112" fill="none" stroke="{}" stroke-width="3"/>"#, p.accent)?;
                write!(svg, r#"<g transform="translate(100 100)"><path d="{icon_path}" fill="{}"/></g>"#, p.background)?;
                svg.push_str(r#"<defs><path id="badge-arc" d="M40 150a110 110 0 0 1 220 0"/></defs>"#);
                write!(svg, r##"<text font-size="22" fill="{}" {font}><textPath href="#badge-arc" startOffset="50%" text-anchor="middle">{name}</textPath></text>"##, p.background)?;
                if let Some(slogan) = &slogan {
                    write!(svg, r#"<text x="150" y="225" text-anchor="middle" font-size="13" fill="{}" {font}>{slogan}</text>"#, p.background)?;
                }
            }
        }

        svg.push_str("</svg>");
        Ok(svg)
    }
}

#[async_trait]
impl LogoRenderer for SvgRenderer {
    async fn render(&self, combination: &Combination) -> LogoResult<String> {
        self.build(combination)
            .map_err(|e| LogoError::renderer(format!("failed to write svg: {e}")))
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
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
