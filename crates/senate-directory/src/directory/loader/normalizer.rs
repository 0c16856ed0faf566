use super::parser::{ImageSources, RosterDocument, RosterRecord};
use crate::directory::domain::{Legislator, LegislatorId};
use chrono::{DateTime, Datelike, NaiveDate};

/// Joins roster records with image sources, preserving roster order.
pub(crate) fn normalize_roster(
    document: RosterDocument,
    images: &ImageSources,
    today: NaiveDate,
) -> Vec<Legislator> {
    document
        .objects
        .into_iter()
        .map(|record| normalize_record(record, images, today))
        .collect()
}

fn normalize_record(record: RosterRecord, images: &ImageSources, today: NaiveDate) -> Legislator {
    let RosterRecord {
        person,
        description,
        party,
        state,
        senator_rank,
        extra,
        phone,
        startdate,
        enddate,
        website,
        leadership_title,
    } = record;

    let birthday = person.birthday.as_deref().and_then(parse_date);
    let start_date = startdate.as_deref().and_then(parse_date);
    let image_url = images.get(&person.bioguideid).cloned();
    if image_url.is_none() {
        tracing::debug!(id = %person.bioguideid, "no image source for legislator");
    }

    Legislator {
        id: LegislatorId(person.bioguideid),
        first_name: person.firstname,
        last_name: person.lastname,
        nickname: person.nickname,
        description: description.unwrap_or_default(),
        party: party.trim().to_lowercase(),
        state,
        rank: senator_rank.unwrap_or_default(),
        gender: person.gender.unwrap_or_default(),
        office: extra.and_then(|extra| extra.address),
        phone,
        birthday,
        age: birthday.map(|date| years_between(date, today)),
        start_date,
        end_date: enddate.as_deref().and_then(parse_date),
        years_in_office: start_date.map(|date| years_between(date, today)),
        twitter: person.twitterid,
        youtube: person.youtubeid,
        website,
        leadership_title,
        image_url,
    }
}

/// Calendar-year difference, ignoring month and day.
pub(crate) fn years_between(earlier: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - earlier.year()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}
