use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose console output when built locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

pub const ASSET_DIR: &str = "img";

/// Images shown next to case study blocks, picked by block position.
pub const CASE_STUDY_IMAGES: [&str; 3] = ["SawayWebsite.png", "Automation.png", "Effects.png"];
pub const CASE_STUDY_LOGO: &str = "saway_logo.png";

pub const FALLBACK_HEADLINE: &str = "Make Good Prompt";
pub const IMAGE_CAPTION_PLACEHOLDER: &str = "Image placeholder";
pub const IMAGE_ALT_FALLBACK: &str = "Case study image";

// Markup contract
pub const HERO_ICON_ID: &str = "hero-icon";
pub const HEADLINE_ID: &str = "headline";
pub const CTA_BUTTON_ID: &str = "cta-button";
pub const PROFILE_IMAGE_ID: &str = "profile-image";
pub const ACCORDION_CONTAINER_ID: &str = "case-studies-accordion";
pub const HEADER_LOGO_SELECTOR: &str = ".logo-header";
pub const SERVICE_CARD_SELECTOR: &str = ".service-card";
pub const MENU_TOGGLE_SELECTOR: &str = ".mobile-menu-toggle";
pub const NAV_MENU_SELECTOR: &str = ".nav-menu";
pub const ANCHOR_LINK_SELECTOR: &str = ".nav-menu a[href^=\"#\"]";

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
pub const HOVER_QUERY: &str = "(hover: hover)";
pub const FINE_POINTER_QUERY: &str = "(pointer: fine)";

pub fn asset_path(file: &str) -> String {
    format!("{}/{}", ASSET_DIR, file)
}

/// Falls back to the first image once the blocks outnumber the images.
pub fn case_study_image(index: usize) -> &'static str {
    CASE_STUDY_IMAGES
        .get(index)
        .copied()
        .unwrap_or(CASE_STUDY_IMAGES[0])
}
