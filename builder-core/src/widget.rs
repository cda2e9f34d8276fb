//! Widget catalog - the static palette of placeable widgets.
//!
//! ## Standard Catalog
//!
//! | Category   | Widgets                                                          |
//! |------------|------------------------------------------------------------------|
//! | Basic      | heading, text, button, image, divider, spacer                    |
//! | Content    | hero, container, columns, card, testimonial, gallery             |
//! | Forms      | contact-form, newsletter-signup, prayer-request                  |
//! | Media      | video, audio, live-stream                                        |
//! | Church     | pastor-message, bible-verse, donation-widget, service-times, ... |
//! | Advanced   | html, map, countdown                                             |

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::element::{Props, StyleMap};
use crate::{BuilderError, BuilderResult};

/// Palette section a widget belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetCategory {
    /// Headings, text, buttons and simple blocks.
    Basic,
    /// Composite content sections.
    Content,
    /// Input forms.
    Forms,
    /// Audio and video.
    Media,
    /// Church-specific widgets.
    Church,
    /// Raw HTML, embeds and utilities.
    Advanced,
}

impl WidgetCategory {
    /// All categories in palette display order.
    pub const ALL: [Self; 6] = [
        Self::Basic,
        Self::Content,
        Self::Forms,
        Self::Media,
        Self::Church,
        Self::Advanced,
    ];

    /// Display label shown in the palette.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "Básico",
            Self::Content => "Conteúdo",
            Self::Forms => "Formulários",
            Self::Media => "Mídia",
            Self::Church => "Igreja",
            Self::Advanced => "Avançado",
        }
    }
}

/// Icon shown next to a widget in the palette and structure list.
///
/// The renderer maps each variant to a concrete glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum WidgetIcon {
    Heading,
    Text,
    Button,
    Image,
    Divider,
    Spacer,
    Hero,
    Container,
    Columns,
    Card,
    Quote,
    Gallery,
    Mail,
    Newsletter,
    Prayer,
    Video,
    Audio,
    LiveStream,
    Pastor,
    Bible,
    Donation,
    Clock,
    Calendar,
    Users,
    Code,
    Map,
    Timer,
    /// Used for element types missing from the catalog.
    Unknown,
}

/// A placeable widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetDefinition {
    /// Unique key.
    pub id: String,
    /// Type discriminator copied onto placed elements; equal to `id`.
    #[serde(rename = "type")]
    pub widget_type: String,
    /// Display label.
    pub name: String,
    /// Palette section.
    pub category: WidgetCategory,
    /// Palette icon.
    pub icon: WidgetIcon,
    /// Default properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Props>,
    /// Default content; overrides the canned per-type default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Default styles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

impl WidgetDefinition {
    /// Create a definition whose type equals its id.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: WidgetCategory,
        icon: WidgetIcon,
    ) -> Self {
        let id = id.into();
        Self {
            widget_type: id.clone(),
            id,
            name: name.into(),
            category,
            icon,
            props: None,
            content: None,
            styles: None,
        }
    }

    /// Set the default content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Add a default style.
    #[must_use]
    pub fn with_style(mut self, key: &str, value: &str) -> Self {
        self.styles
            .get_or_insert_with(StyleMap::new)
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Add a default property.
    #[must_use]
    pub fn with_prop(mut self, key: &str, value: serde_json::Value) -> Self {
        self.props
            .get_or_insert_with(Props::new)
            .insert(key.to_string(), value);
        self
    }
}

/// Canned content for a freshly placed element of `widget_type`.
#[must_use]
pub fn default_content_for(widget_type: &str) -> &'static str {
    match widget_type {
        "heading" => "Novo Título",
        "text" => "Digite seu texto aqui...",
        "button" => "Clique Aqui",
        "hero" => "Bem-vindos à Nossa Igreja",
        "testimonial" => "Compartilhe seu testemunho...",
        "pastor-message" => "Mensagem do Pastor",
        "bible-verse" => "Porque Deus amou o mundo...",
        _ => "",
    }
}

/// Ordered collection of widget definitions with lookup by id.
#[derive(Debug, Clone, Default)]
pub struct WidgetCatalog {
    widgets: Vec<WidgetDefinition>,
    index: HashMap<String, usize>,
}

impl WidgetCatalog {
    /// Build a catalog from definitions.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::DuplicateWidget`] if two definitions share an id,
    /// or [`BuilderError::WidgetTypeMismatch`] if a type differs from its id.
    pub fn new(widgets: impl IntoIterator<Item = WidgetDefinition>) -> BuilderResult<Self> {
        let mut catalog = Self::default();
        for widget in widgets {
            catalog.insert(widget)?;
        }
        Ok(catalog)
    }

    /// The church website catalog.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::default();
        for widget in standard_widgets() {
            if let Err(e) = catalog.insert(widget) {
                tracing::warn!("Skipping standard widget: {e}");
            }
        }
        catalog
    }

    /// Add a definition to the end of the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::DuplicateWidget`] if the id is already present,
    /// or [`BuilderError::WidgetTypeMismatch`] if the type differs from the id.
    pub fn insert(&mut self, widget: WidgetDefinition) -> BuilderResult<()> {
        if widget.widget_type != widget.id {
            return Err(BuilderError::WidgetTypeMismatch {
                id: widget.id,
                widget_type: widget.widget_type,
            });
        }
        if self.index.contains_key(&widget.id) {
            return Err(BuilderError::DuplicateWidget(widget.id));
        }
        self.index.insert(widget.id.clone(), self.widgets.len());
        self.widgets.push(widget);
        Ok(())
    }

    /// Look up a widget by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&WidgetDefinition> {
        self.index.get(id).map(|&i| &self.widgets[i])
    }

    /// Check whether a widget id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All widgets in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &WidgetDefinition> {
        self.widgets.iter()
    }

    /// Widgets in a category, in catalog order.
    pub fn by_category(&self, category: WidgetCategory) -> impl Iterator<Item = &WidgetDefinition> {
        self.widgets.iter().filter(move |w| w.category == category)
    }

    /// Case-insensitive search over widget ids and names.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&WidgetDefinition> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.widgets.iter().collect();
        }
        self.widgets
            .iter()
            .filter(|w| w.id.contains(&query) || w.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Number of widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

fn standard_widgets() -> Vec<WidgetDefinition> {
    use serde_json::json;
    use WidgetCategory::{Advanced, Basic, Church, Content, Forms, Media};

    vec![
        // Basic
        WidgetDefinition::new("heading", "Título", Basic, WidgetIcon::Heading)
            .with_prop("level", json!(2))
            .with_style("fontSize", "32px")
            .with_style("fontWeight", "700"),
        WidgetDefinition::new("text", "Texto", Basic, WidgetIcon::Text)
            .with_style("fontSize", "16px")
            .with_style("lineHeight", "1.6"),
        WidgetDefinition::new("button", "Botão", Basic, WidgetIcon::Button)
            .with_prop("href", json!("#"))
            .with_style("backgroundColor", "#2563eb")
            .with_style("color", "#ffffff")
            .with_style("padding", "12px 24px")
            .with_style("borderRadius", "6px"),
        WidgetDefinition::new("image", "Imagem", Basic, WidgetIcon::Image)
            .with_prop("src", json!(""))
            .with_prop("alt", json!("")),
        WidgetDefinition::new("divider", "Divisor", Basic, WidgetIcon::Divider)
            .with_style("borderTop", "1px solid #e5e7eb"),
        WidgetDefinition::new("spacer", "Espaçador", Basic, WidgetIcon::Spacer)
            .with_style("height", "48px"),
        // Content
        WidgetDefinition::new("hero", "Banner Principal", Content, WidgetIcon::Hero)
            .with_prop("subtitle", json!("Venha nos visitar neste domingo"))
            .with_style("backgroundColor", "#1e3a8a")
            .with_style("color", "#ffffff")
            .with_style("padding", "64px 24px")
            .with_style("textAlign", "center"),
        WidgetDefinition::new("container", "Container", Content, WidgetIcon::Container)
            .with_style("padding", "16px"),
        WidgetDefinition::new("columns", "Colunas", Content, WidgetIcon::Columns)
            .with_prop("count", json!(2)),
        WidgetDefinition::new("card", "Cartão", Content, WidgetIcon::Card)
            .with_style("borderRadius", "8px")
            .with_style("padding", "24px"),
        WidgetDefinition::new("testimonial", "Testemunho", Content, WidgetIcon::Quote)
            .with_prop("author", json!("")),
        WidgetDefinition::new("gallery", "Galeria", Content, WidgetIcon::Gallery)
            .with_prop("images", json!([])),
        // Forms
        WidgetDefinition::new("contact-form", "Formulário de Contato", Forms, WidgetIcon::Mail)
            .with_content("Entre em contato"),
        WidgetDefinition::new(
            "newsletter-signup",
            "Inscrição na Newsletter",
            Forms,
            WidgetIcon::Newsletter,
        )
        .with_content("Receba nossas novidades"),
        WidgetDefinition::new("prayer-request", "Pedido de Oração", Forms, WidgetIcon::Prayer)
            .with_content("Como podemos orar por você?"),
        // Media
        WidgetDefinition::new("video", "Vídeo", Media, WidgetIcon::Video)
            .with_prop("url", json!("")),
        WidgetDefinition::new("audio", "Áudio", Media, WidgetIcon::Audio)
            .with_prop("url", json!("")),
        WidgetDefinition::new("live-stream", "Transmissão ao Vivo", Media, WidgetIcon::LiveStream)
            .with_prop("channel", json!("")),
        // Church
        WidgetDefinition::new("pastor-message", "Mensagem do Pastor", Church, WidgetIcon::Pastor)
            .with_prop("pastor", json!("")),
        WidgetDefinition::new("bible-verse", "Versículo Bíblico", Church, WidgetIcon::Bible)
            .with_prop("reference", json!("João 3:16"))
            .with_style("fontStyle", "italic"),
        WidgetDefinition::new("donation-widget", "Doações", Church, WidgetIcon::Donation)
            .with_content("Contribua com a obra")
            .with_prop("methods", json!(["pix", "cartao"])),
        WidgetDefinition::new("service-times", "Horários de Culto", Church, WidgetIcon::Clock)
            .with_prop("services", json!([])),
        WidgetDefinition::new("event-list", "Agenda de Eventos", Church, WidgetIcon::Calendar)
            .with_prop("limit", json!(3)),
        WidgetDefinition::new("ministry-card", "Ministério", Church, WidgetIcon::Users),
        // Advanced
        WidgetDefinition::new("html", "HTML Personalizado", Advanced, WidgetIcon::Code),
        WidgetDefinition::new("map", "Mapa", Advanced, WidgetIcon::Map)
            .with_prop("address", json!("")),
        WidgetDefinition::new("countdown", "Contagem Regressiva", Advanced, WidgetIcon::Timer)
            .with_prop("target", json!("")),
    ]
}
