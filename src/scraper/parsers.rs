use crate::models::ForumThread;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::ScrapeError;

// ── Listing page ──────────────────────────────────────────────────────────────

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Parse(format!("selector {:?}: {:?}", css, e)))
}

/// Pull every thread out of one `ul.all-topics` listing.
///
/// A missing container or an item without its topic link / author link is an
/// error for the whole page: a layout change makes the rest of it unreliable.
pub fn parse_listing_page(html: &str) -> Result<Vec<ForumThread>, ScrapeError> {
    let doc = Html::parse_document(html);

    let list_sel = selector("ul.all-topics")?;
    let li_sel = selector("li")?;
    let a_sel = selector("a")?;
    let author_sel = selector("div p a")?;

    let list = doc
        .select(&list_sel)
        .next()
        .ok_or_else(|| ScrapeError::Parse("no `ul.all-topics` listing on page".to_string()))?;

    list.select(&li_sel)
        .enumerate()
        .map(|(i, li)| parse_topic_item(li, i, &a_sel, &author_sel))
        .collect()
}

fn parse_topic_item(
    li: ElementRef<'_>,
    index: usize,
    a_sel: &Selector,
    author_sel: &Selector,
) -> Result<ForumThread, ScrapeError> {
    let missing = |what: &str| ScrapeError::Parse(format!("topic #{}: missing {}", index + 1, what));

    let link = li.select(a_sel).next().ok_or_else(|| missing("topic link"))?;
    let url = link.value().attr("href").ok_or_else(|| missing("topic href"))?;
    let title = link.text().collect::<String>().trim().to_string();

    let author = li
        .select(author_sel)
        .next()
        .ok_or_else(|| missing("author link"))?
        .text()
        .collect::<String>()
        .trim()
        .to_string();

    Ok(ForumThread::new(url, title, author))
}

// ── Topic count ───────────────────────────────────────────────────────────────

static TOPICS_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:<h3>)?All Topics \(((?-u:\d)+) Topics\)(?:</h3>)?$")
        .expect("valid topic marker pattern")
});

/// Find the first "All Topics (N Topics)" heading line whose N fits and return N.
pub fn parse_topic_count(html: &str) -> Option<u64> {
    html.lines().find_map(|line| {
        let caps = TOPICS_MARKER.captures(line.trim())?;
        caps[1].parse().ok()
    })
}

/// `ceil(topics / per_page)`
pub fn page_count(topics: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 0;
    }
    topics.div_ceil(u64::from(per_page)).min(u64::from(u32::MAX)) as u32
}

// ── Tests ─────────────────────────────────────────────────────────────────────
