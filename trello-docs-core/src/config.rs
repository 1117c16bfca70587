//! Generator configuration: defaults, typed overrides, validation and presets.
//!
//! A [`GeneratorConfig`] is built once per run and never mutated afterwards.
//! Partial input (a config file, a request body, a preset) is expressed as
//! [`ConfigOverrides`], where every field is optional and only the fields
//! that are set replace the current values. Nested logo and cover-letter
//! options merge field by field.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::DocsError;

/// A list chosen for the document. Its position in
/// [`GeneratorConfig::selected_lists`] is the section order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl ListRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoPosition {
    #[default]
    Header,
    Cover,
    Footer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogoOptions {
    pub enabled: bool,
    pub url: String,
    /// Rendered width in pixels.
    pub width: u32,
    pub position: LogoPosition,
}

impl Default for LogoOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            url: String::new(),
            width: 200,
            position: LogoPosition::Header,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoverLetterOptions {
    pub enabled: bool,
    pub title: String,
    /// Markdown, rendered with the same formatter as card descriptions.
    pub content: String,
    pub show_on_separate_page: bool,
}

impl Default for CoverLetterOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            title: String::new(),
            content: String::new(),
            show_on_separate_page: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    pub board_id: Option<String>,
    pub board_name: String,
    pub selected_lists: Vec<ListRef>,

    pub include_comments: bool,
    pub show_attachments: bool,
    pub exclude_empty_cards: bool,

    pub enable_print_pagination: bool,
    pub cards_per_print_page: u32,
    /// Takes precedence over `enable_print_pagination`.
    pub one_card_per_print_page: bool,
    pub show_card_numbers: bool,

    pub logo: LogoOptions,
    pub cover_letter: CoverLetterOptions,

    pub output_file_name: String,
    pub title: String,
    pub subtitle: String,
    /// Appended verbatim after the built-in stylesheet.
    #[serde(rename = "customCSS", alias = "customCss")]
    pub custom_css: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            board_id: None,
            board_name: String::new(),
            selected_lists: Vec::new(),
            include_comments: true,
            show_attachments: true,
            exclude_empty_cards: false,
            enable_print_pagination: false,
            cards_per_print_page: 3,
            one_card_per_print_page: false,
            show_card_numbers: true,
            logo: LogoOptions::default(),
            cover_letter: CoverLetterOptions::default(),
            output_file_name: "documentation.html".to_string(),
            title: "Documentation".to_string(),
            subtitle: String::new(),
            custom_css: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoOverrides {
    pub enabled: Option<bool>,
    pub url: Option<String>,
    pub width: Option<u32>,
    pub position: Option<LogoPosition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterOverrides {
    pub enabled: Option<bool>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub show_on_separate_page: Option<bool>,
}

/// Partial configuration. Unset fields leave the target untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    pub board_id: Option<String>,
    pub board_name: Option<String>,
    pub selected_lists: Option<Vec<ListRef>>,
    pub include_comments: Option<bool>,
    pub show_attachments: Option<bool>,
    pub exclude_empty_cards: Option<bool>,
    pub enable_print_pagination: Option<bool>,
    pub cards_per_print_page: Option<u32>,
    pub one_card_per_print_page: Option<bool>,
    pub show_card_numbers: Option<bool>,
    pub logo: Option<LogoOverrides>,
    pub cover_letter: Option<CoverLetterOverrides>,
    pub output_file_name: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(rename = "customCSS", alias = "customCss")]
    pub custom_css: Option<String>,
}

fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}

impl GeneratorConfig {
    /// Apply every field set in `overrides`.
    pub fn merge(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(board_id) = &overrides.board_id {
            self.board_id = Some(board_id.clone());
        }
        set(&mut self.board_name, &overrides.board_name);
        set(&mut self.selected_lists, &overrides.selected_lists);
        set(&mut self.include_comments, &overrides.include_comments);
        set(&mut self.show_attachments, &overrides.show_attachments);
        set(&mut self.exclude_empty_cards, &overrides.exclude_empty_cards);
        set(
            &mut self.enable_print_pagination,
            &overrides.enable_print_pagination,
        );
        set(&mut self.cards_per_print_page, &overrides.cards_per_print_page);
        set(
            &mut self.one_card_per_print_page,
            &overrides.one_card_per_print_page,
        );
        set(&mut self.show_card_numbers, &overrides.show_card_numbers);
        if let Some(logo) = &overrides.logo {
            set(&mut self.logo.enabled, &logo.enabled);
            set(&mut self.logo.url, &logo.url);
            set(&mut self.logo.width, &logo.width);
            set(&mut self.logo.position, &logo.position);
        }
        if let Some(cover) = &overrides.cover_letter {
            set(&mut self.cover_letter.enabled, &cover.enabled);
            set(&mut self.cover_letter.title, &cover.title);
            set(&mut self.cover_letter.content, &cover.content);
            set(
                &mut self.cover_letter.show_on_separate_page,
                &cover.show_on_separate_page,
            );
        }
        set(&mut self.output_file_name, &overrides.output_file_name);
        set(&mut self.title, &overrides.title);
        set(&mut self.subtitle, &overrides.subtitle);
        set(&mut self.custom_css, &overrides.custom_css);
        self
    }

    /// `Err(DocsError::Configuration)` carrying every failed rule.
    pub fn validate(&self) -> Result<(), DocsError> {
        let errors = validate_config(self);
        if errors.is_empty() {
            Ok(())
        } else {
            info!(errors = ?errors, "Configuration rejected");
            Err(DocsError::Configuration(errors))
        }
    }

    pub fn selected_list_ids(&self) -> Vec<String> {
        self.selected_lists.iter().map(|l| l.id.clone()).collect()
    }
}

/// Defaults with `overrides` applied.
pub fn create_config(overrides: &ConfigOverrides) -> GeneratorConfig {
    GeneratorConfig::default().merge(overrides)
}

/// Human-readable rule violations; empty means valid.
pub fn validate_config(config: &GeneratorConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if config
        .board_id
        .as_deref()
        .map_or(true, |id| id.trim().is_empty())
    {
        errors.push("Board ID is required".to_string());
    }
    if config.selected_lists.is_empty() {
        errors.push("At least one list must be selected".to_string());
    }
    if config.enable_print_pagination && config.cards_per_print_page < 1 {
        errors.push("Cards per print page must be greater than 0".to_string());
    }
    if config.title.trim().is_empty() {
        errors.push("Title is required".to_string());
    }

    errors
}

/// Named bundles of overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Simple,
    Detailed,
    PrintReady,
    OnePerPage,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Simple,
        Preset::Detailed,
        Preset::PrintReady,
        Preset::OnePerPage,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Simple => "simple",
            Preset::Detailed => "detailed",
            Preset::PrintReady => "printReady",
            Preset::OnePerPage => "onePerPage",
        }
    }

    pub fn overrides(self) -> ConfigOverrides {
        match self {
            Preset::Simple => ConfigOverrides {
                include_comments: Some(false),
                show_attachments: Some(false),
                enable_print_pagination: Some(false),
                one_card_per_print_page: Some(false),
                title: Some("Simple Documentation".into()),
                ..Default::default()
            },
            Preset::Detailed => ConfigOverrides {
                include_comments: Some(true),
                show_attachments: Some(true),
                enable_print_pagination: Some(true),
                cards_per_print_page: Some(2),
                one_card_per_print_page: Some(false),
                title: Some("Detailed Documentation".into()),
                ..Default::default()
            },
            Preset::PrintReady => ConfigOverrides {
                include_comments: Some(true),
                show_attachments: Some(true),
                enable_print_pagination: Some(true),
                cards_per_print_page: Some(3),
                show_card_numbers: Some(true),
                title: Some("Print-Ready Documentation".into()),
                ..Default::default()
            },
            Preset::OnePerPage => ConfigOverrides {
                include_comments: Some(true),
                show_attachments: Some(true),
                one_card_per_print_page: Some(true),
                show_card_numbers: Some(true),
                title: Some("One Card Per Page".into()),
                ..Default::default()
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = DocsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "simple" => Ok(Preset::Simple),
            "detailed" => Ok(Preset::Detailed),
            "printready" => Ok(Preset::PrintReady),
            "oneperpage" => Ok(Preset::OnePerPage),
            _ => Err(DocsError::UnknownPreset(s.to_string())),
        }
    }
}

/// Merge the named preset onto `config`.
pub fn apply_preset(config: GeneratorConfig, name: &str) -> Result<GeneratorConfig, DocsError> {
    let preset: Preset = name.parse()?;
    debug!(preset = %preset, "Applying configuration preset");
    Ok(config.merge(&preset.overrides()))
}
