use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub(crate) struct RosterDocument {
    pub(crate) objects: Vec<RosterRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RosterRecord {
    pub(crate) person: PersonRecord,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) description: Option<String>,
    pub(crate) party: String,
    pub(crate) state: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) senator_rank: Option<String>,
    #[serde(default)]
    pub(crate) extra: Option<ExtraRecord>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) phone: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) startdate: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) enddate: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) website: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) leadership_title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PersonRecord {
    pub(crate) bioguideid: String,
    pub(crate) firstname: String,
    pub(crate) lastname: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) nickname: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) gender: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) birthday: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) twitterid: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) youtubeid: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExtraRecord {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) address: Option<String>,
}

pub(crate) type ImageSources = HashMap<String, String>;

pub(crate) fn parse_roster(bytes: &[u8]) -> Result<RosterDocument, serde_json::Error> {
    serde_json::from_slice(bytes)
}

pub(crate) fn parse_images(bytes: &[u8]) -> Result<ImageSources, serde_json::Error> {
    serde_json::from_slice(bytes)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
