use super::views::{
    DirectorySummary, GenderStats, LeaderEntry, LeaderGroup, PartyCountEntry,
    YearsInOfficeBar, YearsInOfficeHistogram,
};
use crate::directory::domain::{capitalize_first, Legislator};
use std::collections::BTreeMap;

const BASE_PARTIES: [&str; 3] = ["democrat", "republican", "independent"];
const LEADERSHIP_PARTIES: [&str; 2] = ["democrat", "republican"];

pub fn summarize(legislators: &[Legislator]) -> DirectorySummary {
    DirectorySummary {
        total: legislators.len(),
        party_counts: party_counts(legislators),
        gender: gender_stats(legislators),
        average_age: average_age(legislators),
        years_in_office: years_in_office(legislators),
        leaders: leaders_by_party(legislators),
    }
}

/// Seat counts per party, largest first. The three main parties always appear.
pub fn party_counts(legislators: &[Legislator]) -> Vec<PartyCountEntry> {
    let mut counts: Vec<(String, usize)> = BASE_PARTIES
        .iter()
        .map(|party| (party.to_string(), 0))
        .collect();

    for legislator in legislators {
        match counts.iter_mut().find(|(party, _)| *party == legislator.party) {
            Some((_, count)) => *count += 1,
            None => counts.push((legislator.party.clone(), 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .map(|(party, count)| PartyCountEntry {
            label: format!("{}s", capitalize_first(&party)),
            party,
            count,
        })
        .collect()
}

pub fn gender_stats(legislators: &[Legislator]) -> GenderStats {
    let female = legislators.iter().filter(|l| l.gender == "female").count();
    let male = legislators.iter().filter(|l| l.gender == "male").count();

    GenderStats {
        female,
        male,
        female_pct: truncated_pct(female, legislators.len()),
        male_pct: truncated_pct(male, legislators.len()),
    }
}

/// Mean age truncated toward zero, over legislators whose age is known.
pub fn average_age(legislators: &[Legislator]) -> Option<i32> {
    let ages: Vec<i64> = legislators
        .iter()
        .filter_map(|l| l.age.map(i64::from))
        .collect();
    if ages.is_empty() {
        return None;
    }
    let mean = ages.iter().sum::<i64>() / ages.len() as i64;
    i32::try_from(mean).ok()
}

pub fn years_in_office(legislators: &[Legislator]) -> YearsInOfficeHistogram {
    let mut buckets: BTreeMap<i32, usize> = BTreeMap::new();
    for years in legislators.iter().filter_map(|l| l.years_in_office) {
        *buckets.entry(years).or_default() += 1;
    }

    let max = buckets.values().copied().max().unwrap_or(0);
    let bars = buckets
        .into_iter()
        .map(|(years, count)| YearsInOfficeBar {
            years,
            count,
            width_pct: truncated_pct(count, max),
        })
        .collect();

    YearsInOfficeHistogram {
        bars,
        axis: [0, max / 2, max],
    }
}

/// Titled legislators grouped by party; democrat and republican groups always come first.
pub fn leaders_by_party(legislators: &[Legislator]) -> Vec<LeaderGroup> {
    let mut groups: Vec<LeaderGroup> = LEADERSHIP_PARTIES
        .iter()
        .map(|party| leader_group(party))
        .collect();

    for legislator in legislators {
        let Some(title) = legislator.leadership_title.as_deref() else {
            continue;
        };
        let position = match groups.iter().position(|g| g.party == legislator.party) {
            Some(position) => position,
            None => {
                groups.push(leader_group(&legislator.party));
                groups.len() - 1
            }
        };
        groups[position].leaders.push(LeaderEntry {
            id: legislator.id.clone(),
            title: title.to_string(),
            name: leader_name(legislator),
        });
    }

    groups
}

fn leader_group(party: &str) -> LeaderGroup {
    LeaderGroup {
        party: party.to_string(),
        heading: format!("{}s", capitalize_first(party)),
        leaders: Vec::new(),
    }
}

fn leader_name(legislator: &Legislator) -> String {
    match legislator.nickname.as_deref() {
        Some(nickname) => format!(
            "{} \"{}\" {}",
            legislator.first_name, nickname, legislator.last_name
        ),
        None => legislator.full_name(),
    }
}

fn truncated_pct(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    u32::try_from(part * 100 / whole).unwrap_or(u32::MAX)
}
