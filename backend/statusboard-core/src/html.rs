// src/html.rs
use std::fmt::Write as _;

/// Publisher details for search and link-preview tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteMeta {
    pub name: String,
    pub keywords: Option<String>,
}

/// Page-level settings shared by every generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    pub refresh_secs: u32,
    pub zone_label: String,
    /// Enables author, robots and Open Graph tags when set
    pub site: Option<SiteMeta>,
    /// Public URL of this page, emitted as canonical link and `og:url`
    pub canonical_url: Option<String>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            refresh_secs: 3600,
            zone_label: "KST".to_string(),
            site: None,
            canonical_url: None,
        }
    }
}

/// Escapes text for element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn meta_tags(title: &str, description: &str, options: &PageOptions) -> String {
    let mut tags = String::new();
    let _ = writeln!(
        tags,
        "<meta name=\"description\" content=\"{}\">",
        escape(description)
    );

    if let Some(site) = &options.site {
        let full_title = format!("{} - {}", title, site.name);
        if let Some(keywords) = &site.keywords {
            let _ = writeln!(tags, "<meta name=\"keywords\" content=\"{}\">", escape(keywords));
        }
        let _ = writeln!(tags, "<meta name=\"author\" content=\"{}\">", escape(&site.name));
        tags.push_str("<meta name=\"robots\" content=\"index, follow\">\n");
        tags.push_str("<meta property=\"og:type\" content=\"website\">\n");
        let _ = writeln!(
            tags,
            "<meta property=\"og:title\" content=\"{}\">",
            escape(&full_title)
        );
        let _ = writeln!(
            tags,
            "<meta property=\"og:description\" content=\"{}\">",
            escape(description)
        );
        tags.push_str("<meta property=\"og:locale\" content=\"ko_KR\">\n");
        let _ = writeln!(
            tags,
            "<meta property=\"og:site_name\" content=\"{}\">",
            escape(&site.name)
        );
    }

    if let Some(url) = &options.canonical_url {
        let _ = writeln!(tags, "<link rel=\"canonical\" href=\"{}\">", escape(url));
        if options.site.is_some() {
            let _ = writeln!(tags, "<meta property=\"og:url\" content=\"{}\">", escape(url));
        }
    }
    tags
}

/// `<head>` with charset, viewport, the periodic reload, page metadata and an
/// inlined stylesheet.
pub fn document_head(title: &str, description: &str, options: &PageOptions, css: &str) -> String {
    let display_title = match &options.site {
        Some(site) => format!("{} - {}", title, site.name),
        None => title.to_string(),
    };

    let mut head = String::new();
    // Writing to a String cannot fail
    let _ = write!(
        head,
        "<head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta http-equiv=\"refresh\" content=\"{refresh}\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n\
         {meta}\
         <style>\n{css}</style>\n\
         </head>\n",
        refresh = options.refresh_secs,
        title = escape(&display_title),
        meta = meta_tags(title, description, options),
        css = css,
    );
    head
}
