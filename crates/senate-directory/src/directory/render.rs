//! Server-side HTML for the directory page and the load-failure notice.
//!
//! Cards are drawn once per deck order; filtered-out cards carry the `hidden`
//! attribute instead of being left out.

use super::detail::LegislatorDetail;
use super::domain::{capitalize_first, Category, Legislator};
use super::dropdown::DropdownState;
use super::loader::LoadError;
use super::report::{seat_layout, summarize, views::DirectorySummary};
use super::session::{DirectorySession, SessionId};
use super::sort::{SortDirection, SortField};
use std::fmt::Write;

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub fn render_page(
    session: &DirectorySession,
    session_id: &SessionId,
    detail: Option<&LegislatorDetail>,
) -> String {
    let base = format!("/sessions/{}", escape_html(&session_id.0));
    let mut html = String::new();
    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>Senate Directory</title></head><body>\n",
    );
    html.push_str("<div id=\"page-container\">\n");

    let summary = summarize(session.directory().legislators());
    render_summary(&mut html, &summary);
    render_seats(&mut html, session.directory().legislators());

    html.push_str("<section id=\"senators-list\">\n<div id=\"filter-header\">\n");
    render_tags(&mut html, session, &base);
    render_name_search(&mut html, session, &base);
    render_filters(&mut html, session, &base);
    render_sort_buttons(&mut html, session, &base);
    html.push_str("</div>\n");
    render_cards(&mut html, session, &base);
    html.push_str("</section>\n");

    if let Some(detail) = detail {
        render_detail(&mut html, detail, &base);
    }

    html.push_str("</div>\n</body></html>\n");
    html
}

/// Failure notice shown instead of the directory; dismissing it reloads the page.
pub fn render_failure(error: &LoadError) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>Senate Directory</title></head><body>\n\
<div id=\"error-pop-up\"><h2>{}</h2><p>{}</p>\
<div class=\"button-container\"><a id=\"dismiss\" class=\"filled\" href=\"/\">Reload</a></div></div>\n</body></html>\n",
        escape_html(error.title()),
        escape_html(&error.to_string())
    )
}

fn render_summary(html: &mut String, summary: &DirectorySummary) {
    html.push_str("<section id=\"party-counts\"><div class=\"content\">\n");
    for entry in &summary.party_counts {
        writeln!(
            html,
            "<div class=\"count-bubble {}\"><h1 class=\"count\">{}</h1><h3>{}</h3></div>",
            escape_html(&entry.party),
            entry.count,
            escape_html(&entry.label)
        )
        .expect("write party count");
    }
    html.push_str("</div></section>\n");

    writeln!(
        html,
        "<section id=\"gender-stats-container\"><div class=\"percentage\"><h1>{}%</h1><h3>females</h3></div>\
<div class=\"percentage\"><h1>{}%</h1><h3>males</h3></div></section>",
        summary.gender.female_pct, summary.gender.male_pct
    )
    .expect("write gender stats");

    if let Some(age) = summary.average_age {
        writeln!(
            html,
            "<section id=\"average-age-container\"><h3>average age</h3><h1>{age}</h1></section>"
        )
        .expect("write average age");
    }

    html.push_str("<section id=\"years-in-office-container\"><h3>years in office</h3><div id=\"bars-container\">\n");
    for bar in &summary.years_in_office.bars {
        writeln!(
            html,
            "<div class=\"graph-bar\" style=\"width: {}%\"><h1>{}</h1></div>",
            bar.width_pct, bar.years
        )
        .expect("write years bar");
    }
    let [low, mid, high] = summary.years_in_office.axis;
    writeln!(
        html,
        "<div id=\"bar-graph-axis\"><h3>{low}</h3><h3>{mid}</h3><h3>{high}</h3></div></div></section>"
    )
    .expect("write years axis");

    html.push_str("<section id=\"leaders-container\">\n");
    for group in &summary.leaders {
        write!(
            html,
            "<h4>{}</h4><div id=\"{}-leaders-container\">",
            escape_html(&group.heading),
            escape_html(&group.party)
        )
        .expect("write leader heading");
        for leader in &group.leaders {
            write!(
                html,
                "<div class=\"leader-line\"><div class=\"leadership-title\">{}</div><div class=\"name\">{}</div></div>",
                escape_html(&leader.title),
                escape_html(&leader.name)
            )
            .expect("write leader line");
        }
        html.push_str("</div>\n");
    }
    html.push_str("</section>\n");
}

fn render_seats(html: &mut String, legislators: &[Legislator]) {
    html.push_str("<svg id=\"senate-floor-graphic-container\" width=\"1000\" height=\"450\">\n");
    for seat in seat_layout(legislators) {
        writeln!(
            html,
            "<a href=\"#{}\"><circle class=\"dot\" cx=\"{:.1}\" cy=\"{:.1}\" r=\"8\" fill=\"{}\"/></a>",
            escape_html(seat.id.as_str()),
            seat.x,
            450.0 - seat.y,
            seat.color
        )
        .expect("write seats");
    }
    html.push_str("</svg>\n");
}

fn render_tags(html: &mut String, session: &DirectorySession, base: &str) {
    html.push_str("<div id=\"filter-tag-container\">\n");
    for tag in session.tags() {
        writeln!(
            html,
            "<form class=\"tag {value}\" method=\"post\" action=\"{base}/tags/remove\">\
<input type=\"hidden\" name=\"category\" value=\"{category}\"><input type=\"hidden\" name=\"value\" value=\"{value}\">\
<button type=\"submit\" class=\"fa fa-close\" aria-label=\"remove\"></button>{label}</form>",
            value = escape_html(&tag.value),
            category = tag.category.key(),
            label = escape_html(&tag.label),
        )
        .expect("write tags");
    }
    html.push_str("</div>\n");
}

fn render_name_search(html: &mut String, session: &DirectorySession, base: &str) {
    writeln!(
        html,
        "<form class=\"text-input-container\" method=\"post\" action=\"{base}/name\">\
<input type=\"text\" name=\"value\" value=\"{}\"><button type=\"submit\">Search</button></form>\
<form method=\"post\" action=\"{base}/reset\"><button type=\"submit\">Reset</button></form>",
        escape_html(session.filter().name())
    )
    .expect("write name search");
}

fn render_filters(html: &mut String, session: &DirectorySession, base: &str) {
    html.push_str("<div id=\"filter-container\"><h2>Filters</h2>\n");
    for category in Category::ordered() {
        let key = category.key();
        let open = session.dropdowns().state(category) == DropdownState::Open;
        writeln!(
            html,
            "<div class=\"filter-section-header {key}\"><h5>{}</h5></div>\
<div class=\"dropdown-container {key}\">\
<form method=\"post\" action=\"{base}/dropdowns/{key}/toggle\"><button type=\"submit\">{}</button></form>",
            category.label(),
            if open { "Close" } else { "Open" }
        )
        .expect("write filters");

        write!(
            html,
            "<div class=\"dropdown\"{}>\
<form class=\"text-input-container\" method=\"post\" action=\"{base}/dropdowns/{key}/search\">\
<input type=\"text\" name=\"value\" value=\"{}\"></form>",
            if open { "" } else { " hidden" },
            escape_html(session.dropdowns().search(category))
        )
        .expect("write filters");
        for option in session.option_entries(category) {
            write!(
                html,
                "<form class=\"{value}\" method=\"post\" action=\"{base}/filters\"{hidden}>\
<input type=\"hidden\" name=\"category\" value=\"{key}\"><input type=\"hidden\" name=\"value\" value=\"{value}\">\
<input type=\"hidden\" name=\"selected\" value=\"{next}\">\
<button type=\"submit\" id=\"{value}\" class=\"{checked}\">{label}</button></form>",
                value = escape_html(&option.value),
                hidden = if option.listed { "" } else { " hidden" },
                next = !option.checked,
                checked = if option.checked { "checked" } else { "unchecked" },
                label = escape_html(&option.label),
            )
            .expect("write filters");
        }
        html.push_str("</div></div>\n");
    }
    html.push_str("</div>\n");
}

fn render_sort_buttons(html: &mut String, session: &DirectorySession, base: &str) {
    html.push_str("<div id=\"sort-container\"><h2>Sort by</h2>\n");
    for field in [SortField::LastName, SortField::State] {
        let class = match session.sort().direction_for(field) {
            SortDirection::None => "sort-button",
            SortDirection::Ascending => "sort-button asc",
            SortDirection::Descending => "sort-button desc",
        };
        writeln!(
            html,
            "<form method=\"post\" action=\"{base}/sort/{key}\"><button type=\"submit\" id=\"{key}-sort\" class=\"{class}\">{label}</button></form>",
            key = field.key(),
            label = field.label(),
        )
        .expect("write sort buttons");
    }
    html.push_str("</div>\n");
}

/// Cards are grouped into one `senators-list-<party>` container per party,
/// in the order each party first appears in the deck.
fn render_cards(html: &mut String, session: &DirectorySession, base: &str) {
    let mut groups: Vec<(&str, String)> = Vec::new();
    for card in session.deck().cards() {
        let Some(legislator) = session.directory().get(&card.id) else {
            continue;
        };
        let index = match groups
            .iter()
            .position(|(party, _)| *party == legislator.party)
        {
            Some(index) => index,
            None => {
                groups.push((legislator.party.as_str(), String::new()));
                groups.len() - 1
            }
        };
        let group = &mut groups[index].1;

        let id = escape_html(legislator.id.as_str());
        writeln!(
            group,
            "<div id=\"{id}\" class=\"senator-card\"{hidden}>\
<img src=\"{image}\" alt=\"\"><div class=\"overlay {party}\"></div>\
<div class=\"top\"><a class=\"name\" href=\"{base}?detail={id}\">{name}</a><div class=\"state\">{state}</div>\
<i class=\"fa fa-{gender} gender\"></i></div>\
<div class=\"bottom\"><div class=\"rank\">{rank}</div><div class=\"party\">{party_label}</div></div></div>",
            hidden = if card.hidden { " hidden" } else { "" },
            image = escape_html(legislator.image_url.as_deref().unwrap_or("")),
            party = escape_html(&legislator.party),
            name = escape_html(&legislator.full_name()),
            state = escape_html(&legislator.state),
            gender = escape_html(&legislator.gender),
            rank = escape_html(&capitalize_first(&legislator.rank)),
            party_label = escape_html(&capitalize_first(&legislator.party)),
        )
        .expect("write card");
    }

    html.push_str("<div id=\"senators-container\">\n");
    for (party, cards) in groups {
        writeln!(html, "<div id=\"senators-list-{}\">", escape_html(party))
            .expect("write party list");
        html.push_str(&cards);
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n");
}

fn render_detail(html: &mut String, detail: &LegislatorDetail, base: &str) {
    write!(
        html,
        "<div id=\"curtain\"></div><div id=\"pop-up\"><a class=\"fa fa-close\" href=\"{base}\"></a>\
<div id=\"pop-up-image\" style=\"background: url('{image}')\"></div><div id=\"pop-up-socials\">",
        image = escape_html(detail.image_url.as_deref().unwrap_or("")),
    )
    .expect("write detail");
    for link in &detail.links {
        write!(
            html,
            "<div class=\"pop-up-url {kind}\"><a href=\"{href}\" target=\"_blank\"><i class=\"fa fa-{icon}\"></i></a></div>",
            kind = link.kind,
            href = escape_html(&link.href),
            icon = if link.kind == "website" { "globe" } else { link.kind },
        )
        .expect("write detail");
    }
    writeln!(
        html,
        "</div><div id=\"pop-up-text\"><h2 id=\"pop-up-name\">{}</h2><div id=\"pop-up-party\" class=\"{}\">{}</div>\
<div id=\"pop-up-description\">{}</div><div id=\"pop-up-office\">{}</div><div id=\"pop-up-phone\">{}</div></div></div>",
        escape_html(&detail.display_name),
        escape_html(&detail.party),
        escape_html(&detail.party),
        escape_html(&detail.biography),
        escape_html(detail.office.as_deref().unwrap_or("")),
        escape_html(detail.phone.as_deref().unwrap_or("")),
    )
    .expect("write detail");
}
