use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::GalleryConfig;
use crate::i18n::Messages;
use crate::media;
use crate::models::portfolio::{Media, PortfolioItem};
use crate::viewer::ViewerFrame;

/// Element ids a host page provides for rendered content.
pub struct HostPage {
    pub template: &'static str,
    pub containers: &'static [&'static str],
}

pub const INDEX_PAGE: HostPage = HostPage {
    template: "index",
    containers: &["portfolio-root"],
};

pub const PROJECT_PAGE: HostPage = HostPage {
    template: "project",
    containers: &["project-root"],
};

impl HostPage {
    pub fn has_container(&self, id: &str) -> bool {
        self.containers.contains(&id)
    }
}

/// Escape text for use in element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

fn type_label<'a>(item: &PortfolioItem, msgs: &'a Messages) -> &'a str {
    if item.is_video() {
        msgs.type_video
    } else {
        msgs.type_photo
    }
}

/// Grid of cards for `container_id`, or `None` if the page has no such container.
pub fn render_grid(
    page: &HostPage,
    container_id: &str,
    items: &[PortfolioItem],
    msgs: &Messages,
) -> Option<String> {
    if !page.has_container(container_id) {
        return None;
    }
    if items.is_empty() {
        return Some(format!(r#"<p class="hint">{}</p>"#, escape_html(msgs.empty_catalog)));
    }

    let mut html = String::from(r#"<div class="grid">"#);
    for item in items {
        html.push_str(&format!(
            r#"
    <div class="card" data-open-id="{id}" role="button" tabindex="0">
        <img class="thumb" src="{cover}" alt="{title}" />
        <div class="meta">
            <div>
                <div class="title">{title}</div>
                <div class="hint">{desc}</div>
            </div>
            <div>
                <div class="type">{label}</div>
            </div>
        </div>
    </div>"#,
            id = escape_html(&item.id),
            cover = escape_html(&item.cover),
            title = escape_html(&item.title),
            desc = escape_html(item.description_or_empty()),
            label = escape_html(type_label(item, msgs)),
        ));
    }
    html.push_str("\n</div>");
    Some(html)
}

/// Single-project body for the `?id=` query value.
pub fn render_project(
    id: Option<&str>,
    items: &[PortfolioItem],
    cfg: &GalleryConfig,
    msgs: &Messages,
) -> String {
    let id = match id.map(str::trim).filter(|s| !s.is_empty()) {
        Some(id) => id,
        None => return format!(r#"<p class="hint">{}</p>"#, escape_html(msgs.project_id_missing)),
    };
    let item = match PortfolioItem::find_by_id(items, id) {
        Some(it) => it,
        None => return format!(r#"<p class="hint">{}</p>"#, escape_html(msgs.project_not_found)),
    };

    let media_html = match &item.media {
        Media::Image { src } => format!(
            r#"<img src="{}" alt="{}" style="width:100%;border-radius:10px;object-fit:cover"/>"#,
            escape_html(src),
            escape_html(&item.title)
        ),
        Media::Video { src, .. } => {
            let frame_src = media::youtube_embed_url(src);
            format!(
                r#"<div style="position:relative;padding-top:56.25%"><iframe src="{}" style="position:absolute;left:0;top:0;width:100%;height:100%;border:0" allow="autoplay;encrypted-media" allowfullscreen></iframe></div>"#,
                escape_html(&frame_src)
            )
        }
    };

    format!(
        r#"<div class="project">
    <div class="project-media">
        {media_html}
    </div>
    <div class="project-info">
        <h2>{title}</h2>
        <p>{desc}</p>
        <div class="project-actions">
            <button class="lb-btn primary" id="proj-play" data-open-id="{id}">{play}</button>
            <a class="lb-btn" href="{src}" target="_blank" rel="noopener">{new_tab}</a>
            <a class="lb-btn" href="mailto:{email}">{collab}</a>
        </div>
    </div>
</div>"#,
        media_html = media_html,
        title = escape_html(&item.title),
        desc = escape_html(item.description_or_empty()),
        id = escape_html(&item.id),
        play = escape_html(msgs.play_in_viewer),
        src = escape_html(item.src()),
        new_tab = escape_html(msgs.open_new_tab),
        email = escape_html(&cfg.contact_email),
        collab = escape_html(msgs.request_collab),
    )
}

/// Overlay markup for a viewer frame. A closed frame renders an empty, hidden overlay.
pub fn render_viewer(frame: &ViewerFrame, msgs: &Messages) -> String {
    let (display, hidden) = if frame.open { ("flex", "false") } else { ("none", "true") };
    let media_html = frame.media.as_ref().map(|m| m.to_html()).unwrap_or_default();
    let download_html = match (&frame.item_id, &frame.download) {
        (Some(id), Some(dl)) => format!(
            r#"<a class="lb-btn" id="lb-download" href="/download/{}" download="{}">{}</a>"#,
            escape_html(&urlencode(id)),
            escape_html(&dl.filename),
            escape_html(msgs.download)
        ),
        _ => String::new(),
    };

    format!(
        r#"<div class="lightbox" id="rabo-lightbox" aria-hidden="{hidden}" style="display:{display}">
    <div class="lb-inner" role="dialog" aria-modal="true">
        <div class="lb-media" id="lb-media">{media_html}</div>
        <div class="lb-info">
            <div>
                <div class="lb-title" id="lb-title">{title}</div>
                <div class="lb-desc" id="lb-desc">{desc}</div>
            </div>
            <div class="lb-controls">
                <button class="lb-btn" id="lb-prev" data-action="prev">{prev}</button>
                <button class="lb-btn" id="lb-next" data-action="next">{next}</button>
                {download_html}
                <button class="lb-btn primary" id="lb-close" data-action="close">{close}</button>
            </div>
        </div>
    </div>
</div>"#,
        hidden = hidden,
        display = display,
        media_html = media_html,
        title = escape_html(&frame.title),
        desc = escape_html(&frame.description),
        prev = escape_html(msgs.prev),
        next = escape_html(msgs.next),
        download_html = download_html,
        close = escape_html(msgs.close),
    )
}

/// Overlay shown instead of media when an id does not resolve.
pub fn render_viewer_notice(message: &str, msgs: &Messages) -> String {
    format!(
        r#"<div class="lightbox" id="rabo-lightbox" aria-hidden="false" style="display:flex">
    <div class="lb-inner" role="dialog" aria-modal="true">
        <div class="lb-media" id="lb-media"><p class="hint">{message}</p></div>
        <div class="lb-info">
            <div class="lb-controls">
                <button class="lb-btn primary" id="lb-close" data-action="close">{close}</button>
            </div>
        </div>
    </div>
</div>"#,
        message = escape_html(message),
        close = escape_html(msgs.close),
    )
}

/// RFC 3986 unreserved characters pass through; everything else is escaped.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Percent-encode a path segment.
pub fn urlencode(s: &str) -> String {
    utf8_percent_encode(s, SEGMENT).to_string()
}

/// Page script: forwards card clicks, overlay buttons and keys to the
/// viewer endpoints and swaps in the overlay HTML they return.
pub const VIEWER_JS: &str = r#"
(function() {
    function swap(html) {
        var cur = document.getElementById('rabo-lightbox');
        if (cur) cur.outerHTML = html;
        else document.body.insertAdjacentHTML('beforeend', html);
    }

    function send(path) {
        return fetch(path, { method: 'POST' })
            .then(function(r) { if (!r.ok) throw new Error('viewer ' + r.status); return r.text(); })
            .then(swap);
    }

    document.addEventListener('click', function(e) {
        var opener = e.target.closest('[data-open-id]');
        if (opener) {
            e.preventDefault();
            send('/viewer/open/' + encodeURIComponent(opener.dataset.openId));
            return;
        }
        var btn = e.target.closest('#rabo-lightbox [data-action]');
        if (btn) {
            send('/viewer/' + btn.dataset.action);
            return;
        }
        if (e.target.id === 'rabo-lightbox') send('/viewer/backdrop');
    });

    document.addEventListener('keydown', function(e) {
        var lb = document.getElementById('rabo-lightbox');
        if (!lb || lb.getAttribute('aria-hidden') !== 'false') return;
        if (e.key === 'Escape' || e.key === 'ArrowLeft' || e.key === 'ArrowRight') {
            send('/viewer/key/' + e.key);
        }
    });
})();
"#;
