use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::SiteError;

const CASE_STUDIES_JSON: &str = include_str!("../data/case_studies.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStudy {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub meta: Option<CaseStudyMeta>,
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
    #[serde(default)]
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStudyMeta {
    pub client: String,
    pub scope: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    pub title: String,
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub image_caption: Option<String>,
}

/// The case studies shipped with the page.
pub fn load() -> Result<Vec<CaseStudy>, SiteError> {
    parse(CASE_STUDIES_JSON)
}

pub fn parse(json: &str) -> Result<Vec<CaseStudy>, SiteError> {
    let studies: Vec<CaseStudy> = serde_json::from_str(json)?;
    validate(&studies)?;
    Ok(studies)
}

fn validate(studies: &[CaseStudy]) -> Result<(), SiteError> {
    let mut seen = HashSet::new();
    for study in studies {
        if study.id.is_empty() {
            return Err(SiteError::EmptyId);
        }
        if !seen.insert(study.id.as_str()) {
            return Err(SiteError::DuplicateId(study.id.clone()));
        }
        if let Some(block) = study.blocks.iter().find(|b| b.paragraphs.is_empty()) {
            return Err(SiteError::EmptyBlock {
                id: study.id.clone(),
                block: block.title.clone(),
            });
        }
    }
    Ok(())
}
