// src/render/summary.rs
// Site summary block: name, description, theme and the two site dates.

use serde::Serialize;

use super::card::format_timestamp;
use crate::site::SiteInfo;

const SUMMARY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryDisplay {
    pub name: String,
    pub description: String,
    pub theme: String,
    pub created: String,
    pub updated: String,
}

pub fn format_summary(site: &SiteInfo) -> SummaryDisplay {
    SummaryDisplay {
        name: site.name.clone(),
        description: site.description.clone(),
        theme: site.theme.clone(),
        created: format_timestamp(site.created, SUMMARY_DATE_FORMAT),
        updated: format_timestamp(site.updated, SUMMARY_DATE_FORMAT),
    }
}
