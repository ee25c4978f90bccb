//! Case study markup.

use crate::case_studies::{CaseStudy, CaseStudyMeta, ContentBlock};
use crate::config;
use crate::markup::{El, Markup};

pub fn header_id(study_id: &str) -> String {
    format!("{}-header", study_id)
}

pub fn panel_id(study_id: &str) -> String {
    format!("{}-content", study_id)
}

/// The whole accordion, one item per case study in list order.
pub fn render_case_studies(studies: &[CaseStudy]) -> Vec<Markup> {
    studies.iter().map(render_case_study).collect()
}

pub fn render_case_study(study: &CaseStudy) -> Markup {
    let header_id = header_id(&study.id);
    let panel_id = panel_id(&study.id);

    let logo_alt = match &study.meta {
        Some(meta) => format!("{} Logo", meta.client),
        None => "Client logo".to_string(),
    };

    let header = El::new("button")
        .class("case-study-header")
        .attr("aria-expanded", "false")
        .attr("aria-controls", panel_id.as_str())
        .attr("id", header_id.as_str())
        .child(
            El::new("img")
                .attr("src", config::asset_path(config::CASE_STUDY_LOGO))
                .attr("alt", logo_alt)
                .class("case-study-header-logo"),
        )
        .child(
            El::new("div")
                .class("case-study-header-content")
                .child(El::new("h3").class("case-study-title").text(study.title.as_str())),
        )
        .child(
            El::new("i")
                .class("fas fa-chevron-down case-study-chevron")
                .attr("aria-hidden", "true"),
        );

    let mut inner = El::new("div").class("case-study-content-inner").child(
        El::new("div")
            .class("case-study-header-section")
            .children(study.meta.as_ref().map(render_meta)),
    );
    inner = inner.children(
        study
            .blocks
            .iter()
            .enumerate()
            .map(|(index, block)| render_block(index, block)),
    );
    if !study.tools.is_empty() {
        inner = inner.child(render_tools(&study.tools));
    }

    let panel = El::new("div")
        .class("case-study-content")
        .attr("id", panel_id.as_str())
        .attr("aria-labelledby", header_id.as_str())
        .child(inner);

    El::new("div")
        .class("case-study-item")
        .attr("data-case-study-id", study.id.as_str())
        .child(header)
        .child(panel)
        .into()
}

fn render_meta(meta: &CaseStudyMeta) -> El {
    let item = |label: &str, value: &str| {
        El::new("div")
            .class("case-study-meta-item")
            .child(El::new("span").class("case-study-meta-label").text(label))
            .child(El::new("span").class("case-study-meta-value").text(value))
    };

    El::new("div")
        .class("case-study-meta")
        .child(item("Client:", &meta.client))
        .child(item("Scope:", &meta.scope))
        .child(item("Role:", &meta.role))
}

fn render_block(index: usize, block: &ContentBlock) -> El {
    // Even blocks put the image on the left, odd ones on the right.
    let layout = if index % 2 == 0 {
        "block-image-left"
    } else {
        "block-image-right"
    };
    let caption = block
        .image_caption
        .as_deref()
        .unwrap_or(config::IMAGE_CAPTION_PLACEHOLDER);
    let alt = block
        .image_caption
        .as_deref()
        .unwrap_or(config::IMAGE_ALT_FALLBACK);

    El::new("div")
        .class(format!("case-study-block {}", layout))
        .attr("data-block-index", index.to_string())
        .child(
            El::new("div")
                .class("case-study-block-image")
                .child(
                    El::new("img")
                        .attr("src", config::asset_path(config::case_study_image(index)))
                        .attr("alt", alt)
                        .class("case-study-image-large"),
                )
                .child(El::new("p").class("case-study-image-caption").text(caption)),
        )
        .child(
            El::new("div")
                .class("case-study-block-text")
                .child(El::new("h3").class("case-study-block-title").text(block.title.as_str()))
                .child(
                    El::new("div")
                        .class("case-study-block-content")
                        .children(block.paragraphs.iter().map(|p| El::new("p").text(p.as_str()))),
                ),
        )
}

fn render_tools(tools: &[String]) -> El {
    El::new("div")
        .class("case-study-tools")
        .child(El::new("span").class("case-study-tools-label").text("Tools used:"))
        .children(
            tools
                .iter()
                .map(|tool| El::new("span").class("case-study-tool-tag").text(tool.as_str())),
        )
}
