use crate::domain::model::TrustTier;
use serde::{Deserialize, Serialize};

const INDIA_TIER2: &[&str] = &[
    "timesofindia.com", "hindustantimes.com", "indianexpress.com", "thehindu.com",
    "livemint.com", "business-standard.com", "ndtv.com", "pti.in", "economictimes.com",
    "theprint.in", "scroll.in", "moneycontrol.com",
    // fact-checkers and official portals
    "altnews.in", "boomlive.in", "factly.in", "pib.gov.in",
    "data.gov.in", "ncrb.gov.in", "mha.gov.in", "prsindia.org",
];

const GLOBAL_TIER1: &[&str] = &[
    "reuters.com", "apnews.com", "bbc.com", "bbc.co.uk", "theguardian.com",
    "nytimes.com", "wsj.com", "ft.com", "washingtonpost.com", "aljazeera.com",
];

const INTL_ORG_ACAD: &[&str] = &[
    "who.int", "un.org", "worldbank.org", "imf.org", "oecd.org",
    "journals.plos.org", "nature.com", "science.org", "thelancet.com",
];

const FACTCHECK_GLOBAL: &[&str] = &["snopes.com", "politifact.com", "factcheck.org", "fullfact.org"];

const WEAK_OR_OPEN: &[&str] = &[
    "wikipedia.org", "medium.com", "quora.com", "reddit.com", "blogspot.com",
    "wordpress.com", "substack.com", "stackexchange.com",
];

/// 區域設定決定是否套用區域性的第二層名單
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Global,
    India,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TrustTiers {
    region: Region,
}

impl TrustTiers {
    pub fn new(region: Region) -> Self {
        Self { region }
    }

    pub fn classify(&self, domain: &str) -> TrustTier {
        let d = domain.trim().to_ascii_lowercase();

        if is_official(&d) {
            return TrustTier {
                level: 3,
                reason: "official/government or judiciary",
            };
        }
        if self.region == Region::India && INDIA_TIER2.contains(&d.as_str()) {
            return TrustTier {
                level: 2,
                reason: "major Indian outlet / fact-check / official portal",
            };
        }
        if INTL_ORG_ACAD.contains(&d.as_str()) {
            return TrustTier {
                level: 1,
                reason: "international org / academic",
            };
        }
        if GLOBAL_TIER1.contains(&d.as_str()) || FACTCHECK_GLOBAL.contains(&d.as_str()) {
            return TrustTier {
                level: 1,
                reason: "reputable global media / fact-checker",
            };
        }
        if WEAK_OR_OPEN
            .iter()
            .any(|weak| d == *weak || d.ends_with(&format!(".{}", weak)))
        {
            return TrustTier {
                level: 0,
                reason: "low-signal/openly editable/community",
            };
        }
        TrustTier {
            level: 0,
            reason: "unvetted/other",
        }
    }
}

fn is_official(domain: &str) -> bool {
    domain == "gov"
        || domain.ends_with(".gov")
        || domain.ends_with(".gov.in")
        || domain.ends_with(".nic.in")
        || domain.ends_with(".gov.uk")
}
