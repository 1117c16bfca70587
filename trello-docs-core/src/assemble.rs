//! Document assembly: cards + configuration → one self-contained HTML page.
//!
//! Planning (filtering, sectioning, numbering, page breaks) is separated from
//! rendering so layout decisions can be inspected without parsing HTML; see
//! [`plan_sections`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::config::{GeneratorConfig, ListRef, LogoPosition};
use crate::format::{escape_html, Formatter};
use crate::model::{Card, Comment, Label};
use crate::template::{SCRIPT, STYLES};

/// A card placed in the document.
#[derive(Debug, Clone)]
pub struct PlannedCard<'a> {
    pub card: &'a Card,
    /// `"{section}.{position}"`, both 1-based.
    pub number: String,
    pub page_break_after: bool,
}

/// One selected list with at least one surviving card.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    /// 1-based.
    pub index: usize,
    pub list: &'a ListRef,
    pub cards: Vec<PlannedCard<'a>>,
}

#[derive(Debug, Clone)]
pub struct Document {
    pub html: String,
    /// Cards rendered, after empty-card exclusion.
    pub card_count: usize,
    pub section_count: usize,
}

const LABEL_FALLBACK_COLOR: &str = "#999";

static STYLE_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</style").expect("style close pattern"));

/// User stylesheet with any `</style` removed, so it cannot end the
/// document's style element.
pub fn sanitize_custom_css(css: &str) -> String {
    let mut out = css.to_string();
    // Removal can splice a new match together, e.g. "</st</styleyle".
    while STYLE_CLOSE.is_match(&out) {
        warn!("Removed closing style tag from custom CSS");
        out = STYLE_CLOSE.replace_all(&out, "").into_owned();
    }
    out
}

/// Trello's label palette.
pub fn label_color(color: Option<&str>) -> &'static str {
    match color {
        Some("green") => "#61bd4f",
        Some("yellow") => "#f2d600",
        Some("orange") => "#ff9f1a",
        Some("red") => "#eb5a46",
        Some("purple") => "#c377e0",
        Some("blue") => "#0079bf",
        Some("sky") => "#00c2e0",
        Some("lime") => "#51e898",
        Some("pink") => "#ff78cb",
        Some("black") => "#344563",
        _ => LABEL_FALLBACK_COLOR,
    }
}

/// Page-break flags for a section of `len` cards. The last card of a
/// section never breaks.
pub fn page_breaks(len: usize, config: &GeneratorConfig) -> Vec<bool> {
    let per_page = config.cards_per_print_page as usize;
    (0..len)
        .map(|position| {
            let is_last = position + 1 == len;
            if config.one_card_per_print_page {
                !is_last
            } else if config.enable_print_pagination && per_page > 0 {
                (position + 1) % per_page == 0 && !is_last
            } else {
                false
            }
        })
        .collect()
}

/// Filter, group by source list in selection order, number and paginate.
///
/// Lists without surviving cards produce no section. A list selected more
/// than once is fetched once per selection; the k-th selection gets the k-th
/// copy of each card, so every fetched card is rendered exactly once.
pub fn plan_sections<'a>(cards: &'a [Card], config: &'a GeneratorConfig) -> Vec<Section<'a>> {
    // (card, how many earlier copies of the same card this list already holds)
    let mut by_list: HashMap<&str, Vec<(&'a Card, usize)>> = HashMap::new();
    let mut copies: HashMap<(&str, &str), usize> = HashMap::new();
    let mut excluded = 0usize;
    for card in cards {
        if config.exclude_empty_cards && card.is_empty() {
            excluded += 1;
            continue;
        }
        let seen = copies
            .entry((card.id_list.as_str(), card.id.as_str()))
            .or_insert(0);
        by_list
            .entry(card.id_list.as_str())
            .or_default()
            .push((card, *seen));
        *seen += 1;
    }
    if excluded > 0 {
        debug!(excluded, "Excluded empty cards");
    }

    let mut selections: HashMap<&str, usize> = HashMap::new();
    let mut sections = Vec::new();
    for list in &config.selected_lists {
        let occurrence = selections.entry(list.id.as_str()).or_insert(0);
        let wanted = *occurrence;
        *occurrence += 1;

        let list_cards: Vec<&'a Card> = by_list
            .get(list.id.as_str())
            .map(|bucket| {
                bucket
                    .iter()
                    .filter(|(_, copy)| *copy == wanted)
                    .map(|(card, _)| *card)
                    .collect()
            })
            .unwrap_or_default();
        if list_cards.is_empty() {
            debug!(list_id = %list.id, "No cards for selected list, omitting section");
            continue;
        }
        let index = sections.len() + 1;
        let breaks = page_breaks(list_cards.len(), config);
        let cards = list_cards
            .iter()
            .zip(breaks)
            .enumerate()
            .map(|(position, (&card, page_break_after))| PlannedCard {
                card,
                number: format!("{}.{}", index, position + 1),
                page_break_after,
            })
            .collect();
        sections.push(Section { index, list, cards });
    }
    sections
}

/// Render the document stamped with the current time.
pub fn assemble(cards: &[Card], config: &GeneratorConfig) -> Document {
    assemble_at(cards, config, Utc::now())
}

/// Render the document with an explicit generation timestamp.
pub fn assemble_at(
    cards: &[Card],
    config: &GeneratorConfig,
    generated_at: DateTime<Utc>,
) -> Document {
    let sections = plan_sections(cards, config);
    let card_count: usize = sections.iter().map(|s| s.cards.len()).sum();
    let renderer = Renderer {
        config,
        formatter: Formatter::default(),
        generated_at,
    };
    let html = renderer.document(&sections, card_count);
    info!(
        sections = sections.len(),
        cards = card_count,
        bytes = html.len(),
        "Assembled HTML document"
    );
    Document {
        html,
        card_count,
        section_count: sections.len(),
    }
}

struct Renderer<'a> {
    config: &'a GeneratorConfig,
    formatter: Formatter,
    generated_at: DateTime<Utc>,
}

impl Renderer<'_> {
    fn document(&self, sections: &[Section<'_>], card_count: usize) -> String {
        let config = self.config;
        let cover_page = config.cover_letter.enabled && config.cover_letter.show_on_separate_page;

        let mut html = String::with_capacity(32 * 1024);
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str(&format!("    <title>{}</title>\n", escape_html(&config.title)));
        html.push_str("    <style>");
        html.push_str(STYLES);
        if !config.custom_css.trim().is_empty() {
            html.push_str(&sanitize_custom_css(&config.custom_css));
            html.push('\n');
        }
        html.push_str("    </style>\n</head>\n<body>\n");

        // Header. A cover-position logo falls back here when there is no cover page.
        html.push_str("    <div class=\"header\">\n        <div class=\"container\">\n");
        if config.logo.position == LogoPosition::Header
            || (config.logo.position == LogoPosition::Cover && !cover_page)
        {
            html.push_str(&self.logo());
        }
        html.push_str(&format!("            <h1>{}</h1>\n", escape_html(&config.title)));
        if !config.subtitle.trim().is_empty() {
            html.push_str(&format!(
                "            <p>{}</p>\n",
                escape_html(&config.subtitle)
            ));
        }
        html.push_str("        </div>\n    </div>\n\n    <div class=\"container\">\n");

        if cover_page {
            html.push_str(&self.cover_letter());
        }

        html.push_str(&format!(
            r#"        <div class="search-section">
            <input type="text" class="search-box" placeholder="Search cards..." id="searchBox">
            <div class="stats">
                <span id="resultCount">{}</span>
                <span>Generated: {}</span>
            </div>
        </div>
"#,
            card_count_text(card_count),
            self.generated_at.format("%Y-%m-%d %H:%M UTC"),
        ));

        html.push_str("        <div id=\"cardsContainer\">\n");
        for section in sections {
            html.push_str(&self.section(section));
        }
        html.push_str("        </div>\n");
        html.push_str(
            r#"        <div class="no-results" id="noResults">
            <h3>No cards found</h3>
            <p>Try adjusting your search terms</p>
        </div>
    </div>
"#,
        );

        html.push_str(&self.footer());
        html.push_str("\n    <script>");
        html.push_str(SCRIPT);
        html.push_str("    </script>\n</body>\n</html>\n");
        html
    }

    fn logo(&self) -> String {
        let logo = &self.config.logo;
        if !logo.enabled || logo.url.trim().is_empty() {
            return String::new();
        }
        format!(
            "            <div class=\"logo-container\"><img src=\"{}\" alt=\"Logo\" class=\"logo\" style=\"width: {}px;\"></div>\n",
            escape_html(&logo.url),
            logo.width
        )
    }

    fn list_names(&self) -> String {
        self.config
            .selected_lists
            .iter()
            .map(|l| escape_html(&l.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn cover_letter(&self) -> String {
        let config = self.config;
        let cover = &config.cover_letter;
        let title = if cover.title.trim().is_empty() {
            &config.title
        } else {
            &cover.title
        };
        let mut html = String::from(
            "        <div class=\"cover-letter-page page-break-after\" id=\"coverLetterPage\">\n",
        );
        if config.logo.position == LogoPosition::Cover {
            html.push_str(&self.logo());
        }
        html.push_str(&format!(
            r#"            <div class="cover-letter-content">
                <h1 class="cover-title">{title}</h1>
                <div class="cover-content">{content}</div>
                <div class="cover-meta">
                    <p>Generated: {date}</p>
                    <p>Board: {board}</p>
                    <p>Lists: {lists}</p>
                </div>
            </div>
        </div>
"#,
            title = escape_html(title),
            content = self.formatter.format(&cover.content),
            date = self.generated_at.format("%Y-%m-%d"),
            board = escape_html(&config.board_name),
            lists = self.list_names(),
        ));
        html
    }

    fn section(&self, section: &Section<'_>) -> String {
        let mut html = format!(
            r#"        <section class="document-section" id="section-{index}">
            <h2 class="section-title"><span class="section-number">{index}.</span> {name} <span class="section-count">({count})</span></h2>
"#,
            index = section.index,
            name = escape_html(&section.list.name),
            count = card_count_text_short(section.cards.len()),
        );
        for planned in &section.cards {
            html.push_str(&self.card(planned));
        }
        html.push_str("        </section>\n");
        html
    }

    fn card(&self, planned: &PlannedCard<'_>) -> String {
        let card = planned.card;
        let config = self.config;
        let break_class = if planned.page_break_after {
            " page-break-after"
        } else {
            ""
        };
        let search = format!("{} {}", card.name, card.desc).to_lowercase();
        let number = if config.show_card_numbers {
            format!("<span class=\"card-number\">{}</span> ", planned.number)
        } else {
            String::new()
        };
        let title = if card.url.is_empty() {
            escape_html(&card.name)
        } else {
            format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener\" title=\"View in Trello\">{}</a>",
                escape_html(&card.url),
                escape_html(&card.name)
            )
        };

        let mut html = format!(
            r#"            <article class="card-item{break_class}" id="card-{anchor}" data-search="{search}">
                <div class="card-header">
                    <h3 class="card-title">{number}{title}</h3>
                    <div class="card-meta">
                        <div class="card-labels">{labels}</div>
                        <span class="card-id">#{id_short}</span>
                    </div>
                </div>
                <div class="card-content">
{description}
                </div>
"#,
            anchor = planned.number.replace('.', "-"),
            search = escape_html(&search),
            labels = render_labels(&card.labels),
            id_short = card.id_short,
            description = self.formatter.format(&card.desc),
        );
        if config.show_attachments && !card.attachments.is_empty() {
            html.push_str(&render_attachments(card));
        }
        if config.include_comments && !card.comments.is_empty() {
            html.push_str(&render_comments(&card.comments));
        }
        html.push_str("            </article>\n");
        html
    }

    fn footer(&self) -> String {
        let config = self.config;
        let mut html = String::from("\n    <div class=\"footer\">\n");
        html.push_str(&format!(
            "        <p>Generated from Trello Board: {}</p>\n",
            escape_html(&config.board_name)
        ));
        html.push_str(&format!("        <p>Lists: {}</p>\n", self.list_names()));
        if config.logo.position == LogoPosition::Footer {
            html.push_str(&self.logo());
        }
        html.push_str("    </div>\n");
        html
    }
}

fn card_count_text(count: usize) -> String {
    format!("{} found", card_count_text_short(count))
}

fn card_count_text_short(count: usize) -> String {
    if count == 1 {
        "1 card".to_string()
    } else {
        format!("{count} cards")
    }
}

fn render_labels(labels: &[Label]) -> String {
    labels
        .iter()
        .map(|label| {
            format!(
                "<span class=\"label\" style=\"background-color: {}\">{}</span>",
                label_color(label.color.as_deref()),
                escape_html(&label.name)
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_attachments(card: &Card) -> String {
    let items: String = card
        .attachments
        .iter()
        .map(|att| {
            format!(
                "                        <li><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a> <span class=\"attachment-size\">({})</span></li>\n",
                escape_html(&att.url),
                escape_html(&att.name),
                escape_html(&att.size_text)
            )
        })
        .collect();
    format!(
        r#"                <div class="attachments-section">
                    <h4>Image attachments ({count})</h4>
                    <ul class="attachments-list">
{items}                    </ul>
                </div>
"#,
        count = card.attachments.len(),
    )
}

fn render_comments(comments: &[Comment]) -> String {
    let items: String = comments
        .iter()
        .map(|comment| {
            let date = comment
                .date
                .map(|d| d.format("%Y-%m-%d at %H:%M UTC").to_string())
                .unwrap_or_else(|| "Unknown date".to_string());
            format!(
                r#"                        <div class="comment-item">
                            <div class="comment-header">
                                <span class="comment-author">{author}</span>
                                <span class="comment-date">{date}</span>
                            </div>
                            <div class="comment-content">{text}</div>
                        </div>
"#,
                author = escape_html(&comment.author),
                text = escape_html(&comment.text),
            )
        })
        .collect();
    format!(
        r#"                <div class="comments-section">
                    <h4>Comments ({count})</h4>
                    <div class="comments-list">
{items}                    </div>
                </div>
"#,
        count = comments.len(),
    )
}
