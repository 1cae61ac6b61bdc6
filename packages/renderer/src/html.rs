//! Static HTML rendering for a published page.
//!
//! Text elements carry their HTML pre-compiled (`compiled_value`), so this
//! module only assembles structure around it: document shell, theme custom
//! properties, navigation, and per-element wrappers.

use pagecanvas_config::{
    DisplaySize, ImageElementConfig, PageConfig, PageElementConfig, SiteConfig, TextElementConfig,
    ThemePattern,
};

/// Options for page rendering
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

struct Context {
    options: RenderOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: RenderOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        let indent = self.options.indent.clone();
        for _ in 0..self.depth {
            self.add(&indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Render one page of a site to a full HTML document.
pub fn render_page_html(site: &SiteConfig, page: &PageConfig, options: &RenderOptions) -> String {
    let mut ctx = Context::new(options.clone());

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();

    render_head(site, page, &mut ctx);

    ctx.add_line("<body>");
    ctx.indent();

    render_header(site, &mut ctx);
    render_nav(site, page, &mut ctx);

    ctx.add_line("<main class=\"page\">");
    ctx.indent();
    for element in &page.elements {
        match element {
            PageElementConfig::Text(text) => render_text(text, &mut ctx),
            PageElementConfig::Image(image) => render_image(image, &mut ctx),
        }
    }
    ctx.dedent();
    ctx.add_line("</main>");

    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    ctx.get_output()
}

fn render_head(site: &SiteConfig, page: &PageConfig, ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!(
        "<title>{} · {}</title>",
        escape(&page.title),
        escape(&site.title)
    ));
    if !site.description.is_empty() {
        ctx.add_line(&format!(
            "<meta name=\"description\" content=\"{}\">",
            escape(&site.description)
        ));
    }

    // Theme travels as custom properties; the stylesheet derives every
    // surface color from them.
    let theme = &site.theme;
    ctx.add_line("<style>");
    ctx.indent();
    ctx.add_line(":root {");
    ctx.indent();
    ctx.add_line(&format!("--theme-hue: {};", theme.hue));
    ctx.add_line(&format!("--theme-saturation: {}%;", theme.saturation));
    ctx.add_line(&format!("--theme-lightness: {}%;", theme.lightness));
    if theme.pattern == ThemePattern::Noise {
        ctx.add_line(&format!(
            "--theme-pattern-intensity: {};",
            f64::from(theme.pattern_intensity) / 100.0
        ));
    }
    ctx.dedent();
    ctx.add_line("}");
    ctx.dedent();
    ctx.add_line("</style>");

    ctx.dedent();
    ctx.add_line("</head>");
}

fn render_header(site: &SiteConfig, ctx: &mut Context) {
    ctx.add_line("<header class=\"site-header\">");
    ctx.indent();
    if let Some(image_url) = &site.header.image_url {
        ctx.add_line(&format!(
            "<img class=\"site-banner\" src=\"{}\" alt=\"\">",
            escape(image_url)
        ));
    }
    ctx.add_line(&format!("<h1>{}</h1>", escape(&site.title)));
    ctx.dedent();
    ctx.add_line("</header>");
}

/// Navigation lists the site's `on_nav` pages in document order; the
/// current page is marked with `aria-current`.
fn render_nav(site: &SiteConfig, current: &PageConfig, ctx: &mut Context) {
    let on_nav: Vec<&PageConfig> = site.pages.iter().filter(|p| p.on_nav).collect();
    if on_nav.is_empty() {
        return;
    }

    ctx.add_line("<nav>");
    ctx.indent();
    ctx.add_line("<ul>");
    ctx.indent();
    for page in on_nav {
        let current_attr = if page.uuid == current.uuid {
            " aria-current=\"page\""
        } else {
            ""
        };
        let label = if page.icon.is_empty() {
            escape(&page.title)
        } else {
            format!("{} {}", escape(&page.icon), escape(&page.title))
        };
        ctx.add_line(&format!(
            "<li><a href=\"{}\"{}>{}</a></li>",
            escape(&page.path),
            current_attr,
            label
        ));
    }
    ctx.dedent();
    ctx.add_line("</ul>");
    ctx.dedent();
    ctx.add_line("</nav>");
}

fn render_text(text: &TextElementConfig, ctx: &mut Context) {
    // compiled_value is already sanitized HTML — emitted verbatim.
    match &text.box_color {
        Some(color) => {
            ctx.add_line(&format!(
                "<div class=\"element element-text element-box\" style=\"background-color: {}\">",
                escape(color)
            ));
        }
        None => ctx.add_line("<div class=\"element element-text\">"),
    }
    ctx.indent();
    for line in text.compiled_value.lines() {
        ctx.add_line(line);
    }
    ctx.dedent();
    ctx.add_line("</div>");
}

fn render_image(image: &ImageElementConfig, ctx: &mut Context) {
    if image.url.large.is_empty() {
        // Placeholder with no upload attached yet: nothing to publish.
        return;
    }

    ctx.add_line(&format!(
        "<figure class=\"element element-image {}\">",
        display_size_class(image.display_size)
    ));
    ctx.indent();
    ctx.add_line(&format!(
        "<img src=\"{}\" srcset=\"{} 480w, {} 960w, {} 1920w\" width=\"{}\" height=\"{}\" loading=\"lazy\" alt=\"\">",
        escape(&image.url.medium),
        escape(&image.url.small),
        escape(&image.url.medium),
        escape(&image.url.large),
        image.original_size.width,
        image.original_size.height,
    ));
    ctx.dedent();
    ctx.add_line("</figure>");
}

fn display_size_class(size: DisplaySize) -> &'static str {
    match size {
        DisplaySize::Original => "size-original",
        DisplaySize::OneThird => "size-one-third",
        DisplaySize::Half => "size-half",
        DisplaySize::TwoThirds => "size-two-thirds",
        DisplaySize::Full => "size-full",
        DisplaySize::Extra => "size-extra",
    }
}

/// Escape for text and attribute-value positions.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecanvas_config::{
        HeaderConfig, IconConfig, ImageDimensions, ImageUrlSet, ThemeConfig, CURRENT_SCHEMA_VERSION,
    };
    use uuid::Uuid;

    fn site_with_pages(pages: Vec<PageConfig>) -> SiteConfig {
        SiteConfig {
            version: CURRENT_SCHEMA_VERSION,
            title: "Studio <One>".to_string(),
            description: "A portfolio".to_string(),
            header: HeaderConfig { image_url: None },
            theme: ThemeConfig {
                hue: 210,
                saturation: 40,
                lightness: 50,
                pattern: ThemePattern::Noise,
                pattern_intensity: 30,
            },
            icon: IconConfig::Emoji {
                value: "🎨".to_string(),
            },
            domain: None,
            subdomain: "studio".to_string(),
            pages,
        }
    }

    fn page(path: &str, title: &str, on_nav: bool) -> PageConfig {
        PageConfig {
            version: CURRENT_SCHEMA_VERSION,
            uuid: Uuid::new_v4(),
            path: path.to_string(),
            title: title.to_string(),
            icon: String::new(),
            on_nav,
            elements: Vec::new(),
        }
    }

    #[test]
    fn test_shell_and_escaped_title() {
        let home = page("/", "Home", true);
        let site = site_with_pages(vec![home.clone()]);

        let html = render_page_html(&site, &home, &RenderOptions::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Home · Studio &lt;One&gt;</title>"));
        assert!(html.contains("--theme-hue: 210;"));
    }

    #[test]
    fn test_nav_lists_on_nav_pages_only() {
        let home = page("/", "Home", true);
        let about = page("/about", "About", true);
        let hidden = page("/drafts", "Drafts", false);
        let site = site_with_pages(vec![home.clone(), about, hidden]);

        let html = render_page_html(&site, &home, &RenderOptions::default());
        assert!(html.contains(r#"<a href="/" aria-current="page">Home</a>"#));
        assert!(html.contains(r#"<a href="/about">About</a>"#));
        assert!(!html.contains("Drafts"));
    }

    #[test]
    fn test_text_element_emits_compiled_value_verbatim() {
        let mut home = page("/", "Home", true);
        let mut text = TextElementConfig::empty(Uuid::new_v4());
        text.value = "# Hi".to_string();
        text.compiled_value = "<h1>Hi</h1>".to_string();
        text.box_color = Some("#ffeecc".to_string());
        home.elements.push(PageElementConfig::Text(text));
        let site = site_with_pages(vec![home.clone()]);

        let html = render_page_html(&site, &home, &RenderOptions::default());
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains(r##"style="background-color: #ffeecc""##));
    }

    #[test]
    fn test_image_element_emits_srcset_and_size_class() {
        let mut home = page("/", "Home", true);
        home.elements.push(PageElementConfig::Image(ImageElementConfig {
            version: CURRENT_SCHEMA_VERSION,
            uuid: Uuid::new_v4(),
            url: ImageUrlSet {
                large: "l.webp".to_string(),
                medium: "m.webp".to_string(),
                small: "s.webp".to_string(),
            },
            display_size: DisplaySize::TwoThirds,
            original_size: ImageDimensions {
                width: 1600,
                height: 900,
            },
        }));
        let site = site_with_pages(vec![home.clone()]);

        let html = render_page_html(&site, &home, &RenderOptions::default());
        assert!(html.contains("size-two-thirds"));
        assert!(html.contains(r#"srcset="s.webp 480w, m.webp 960w, l.webp 1920w""#));
        assert!(html.contains(r#"width="1600" height="900""#));
    }

    #[test]
    fn test_unuploaded_placeholder_image_is_skipped() {
        let mut home = page("/", "Home", true);
        home.elements
            .push(PageElementConfig::Image(ImageElementConfig::placeholder(
                Uuid::new_v4(),
            )));
        let site = site_with_pages(vec![home.clone()]);

        let html = render_page_html(&site, &home, &RenderOptions::default());
        assert!(!html.contains("element-image"));
    }
}
