use super::domain::{capitalize_first, Legislator, LegislatorId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    pub kind: &'static str,
    pub href: String,
}

/// Fields shown in the detail popup for one legislator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegislatorDetail {
    pub id: LegislatorId,
    pub display_name: String,
    pub biography: String,
    pub party: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub links: Vec<SocialLink>,
}

impl LegislatorDetail {
    pub fn from_legislator(legislator: &Legislator) -> Self {
        Self {
            id: legislator.id.clone(),
            display_name: display_name(legislator),
            biography: biography(legislator),
            party: legislator.party.clone(),
            office: legislator.office.clone(),
            phone: legislator.phone.clone(),
            image_url: legislator.image_url.clone(),
            links: links(legislator),
        }
    }
}

fn display_name(legislator: &Legislator) -> String {
    match legislator.nickname.as_deref() {
        Some(nickname) => format!(
            "{} ({}) {}",
            legislator.first_name, nickname, legislator.last_name
        ),
        None => legislator.full_name(),
    }
}

fn biography(legislator: &Legislator) -> String {
    let pronoun = match legislator.gender.as_str() {
        "male" => "He",
        "female" => "She",
        _ => "They",
    };
    let party = capitalize_first(&legislator.party);
    let mut sentences = vec![format!(
        "{} is the {} and is a {}.",
        legislator.last_name, legislator.description, party
    )];

    if let Some(start) = legislator.start_date {
        let verb = if pronoun == "They" { "have" } else { "has" };
        sentences.push(format!("{pronoun} {verb} served since {start}."));
    }
    if let Some(end) = legislator.end_date {
        sentences.push(format!("{} serves until {end}.", legislator.last_name));
    }
    if let Some(age) = legislator.age {
        let verb = if pronoun == "They" { "are" } else { "is" };
        sentences.push(format!("{pronoun} {verb} {age} years old."));
    }

    sentences.join(" ")
}

fn links(legislator: &Legislator) -> Vec<SocialLink> {
    let mut links = Vec::new();
    if let Some(website) = &legislator.website {
        links.push(SocialLink {
            kind: "website",
            href: website.clone(),
        });
    }
    if let Some(handle) = &legislator.twitter {
        links.push(SocialLink {
            kind: "twitter",
            href: format!("https://www.twitter.com/{handle}"),
        });
    }
    if let Some(handle) = &legislator.youtube {
        links.push(SocialLink {
            kind: "youtube",
            href: format!("https://www.youtube.com/{handle}"),
        });
    }
    links
}
