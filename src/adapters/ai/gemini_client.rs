//! Gemini Client - Routine augmentation and product analysis over Google's Gemini API.
//!
//! Implements both AI ports:
//!
//! - [`RoutineAugmenter`]: asks the model to reorder the deterministic routine
//!   and explain it. The reply is a JSON object whose slots list the same
//!   products; anything else is rejected later by the augmentation guard.
//! - [`ProductAttributeExtractor`]: asks the model for the attributes of a
//!   product known only by its name.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-2.5-flash")
//!     .with_timeout(Duration::from_secs(60));
//!
//! let client = GeminiClient::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::domain::catalog::{ProductDraft, ProductName, RoutineSlot};
use crate::domain::environment::{HumidityLevel, PollutionLevel, UvLevel};
use crate::domain::routine::{Alert, MomentSelection, Routine};
use crate::ports::{AugmentError, AugmentationRequest, ProductAttributeExtractor, RoutineAugmenter};

/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
/// Default Gemini API root.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-2.5-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether an API key is present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.expose_secret().trim().is_empty()
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API client.
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, AugmentError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AugmentError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Sends a prompt and returns the raw text of the first candidate.
    async fn generate(&self, prompt: String, max_tokens: u32, temperature: f32) -> Result<String, AugmentError> {
        if !self.config.is_configured() {
            return Err(AugmentError::NotConfigured);
        }

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens: max_tokens,
                response_mime_type: "application/json".to_string(),
            },
        };

        debug!(model = %self.config.model, max_tokens, "Sending Gemini request");

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AugmentError::Unavailable(format!(
                        "Request timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else {
                    AugmentError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => AugmentError::Unavailable("authentication failed".to_string()),
                _ => AugmentError::Unavailable(format!("Unexpected status {}: {}", status, body)),
            });
        }

        let reply: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AugmentError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        reply
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AugmentError::InvalidResponse("empty reply (no candidate)".to_string()))
    }
}

#[async_trait]
impl RoutineAugmenter for GeminiClient {
    async fn augment(&self, request: AugmentationRequest) -> Result<Routine, AugmentError> {
        let text = self.generate(routine_prompt(&request), 4096, 0.3).await?;
        parse_routine_reply(&text, &request.routine)
    }
}

#[async_trait]
impl ProductAttributeExtractor for GeminiClient {
    async fn propose(&self, product_name: &str) -> Result<ProductDraft, AugmentError> {
        let text = self.generate(product_prompt(product_name), 512, 0.2).await?;
        parse_product_reply(&text, product_name)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Prompts
// ════════════════════════════════════════════════════════════════════════════════

fn slot_products(selection: &MomentSelection) -> String {
    if selection.products.is_empty() {
        return "(aucun)".to_string();
    }
    selection
        .products
        .iter()
        .map(|p| format!("\"{}\"", p))
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_or_none<I: IntoIterator<Item = S>, S: ToString>(items: I) -> String {
    let joined = items.into_iter().map(|s| s.to_string()).collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "aucun".to_string()
    } else {
        joined
    }
}

fn routine_prompt(request: &AugmentationRequest) -> String {
    let profile = &request.profile;
    let env = &request.environment;
    let routine = &request.routine;

    let stress = request
        .context
        .as_ref()
        .map(|c| c.effective_stress(profile))
        .unwrap_or(profile.stress_level);

    let history = if request.recent_history.is_empty() {
        "Aucun historique disponible (premiere analyse)".to_string()
    } else {
        request
            .recent_history
            .iter()
            .map(|r| {
                format!(
                    "- {} ({}): matin [{}], soir [{}]",
                    r.created_at().as_datetime().format("%Y-%m-%d %H:%M"),
                    r.mode(),
                    slot_products(&r.routine().morning),
                    slot_products(&r.routine().evening),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let instructions = request
        .context
        .as_ref()
        .map(|c| c.instructions.trim())
        .filter(|i| !i.is_empty())
        .map(|i| format!("## CONTEXTE DU JOUR\n{}\n", i))
        .unwrap_or_default();

    format!(
        r#"Tu es un dermatologue expert. Une routine a deja ete calculee par des regles de securite.
Tu peux UNIQUEMENT reordonner les produits a l'interieur de chaque moment, ajouter des alertes
et rediger un resume. N'ajoute, ne retire et ne deplace aucun produit.

## PROFIL
- Type de peau: {skin_type}
- Tranche d'age: {age_band}
- Niveau de stress: {stress}/10
- Conditions cutanees: {conditions}
- Allergies: {allergies}
- Objectifs: {goals}

## ENVIRONNEMENT
- UV: {uv} ({uv_level})
- Humidite: {humidity}% ({humidity_level})
- Temperature: {temperature}C
- PM2.5: {pm25}

## ROUTINE CALCULEE
- matin: [{morning}]
- journee: [{midday}]
- soir: [{evening}]

## HISTORIQUE RECENT
{history}

{instructions}
## FORMAT DE REPONSE (JSON strict)
{{"morning": {{"products": ["..."], "alerts": ["..."]}}, "midday": {{"products": [], "alerts": []}}, "evening": {{"products": [], "alerts": []}}, "summary": "Resume court en francais"}}"#,
        skin_type = profile.skin_type,
        age_band = profile.age_band,
        stress = stress.value(),
        conditions = join_or_none(&profile.conditions),
        allergies = join_or_none(&profile.allergies),
        goals = join_or_none(&profile.goals),
        uv = env.uv_index(),
        uv_level = uv_label(env.uv_level()),
        humidity = env.humidity_pct(),
        humidity_level = humidity_label(env.humidity_level()),
        temperature = env.temperature_c(),
        pm25 = env
            .pm25()
            .map(|v| format!("{} ug/m3 ({})", v, pollution_label(env.pollution_level())))
            .unwrap_or_else(|| "inconnu".to_string()),
        morning = slot_products(&routine.morning),
        midday = slot_products(&routine.midday),
        evening = slot_products(&routine.evening),
        history = history,
        instructions = instructions,
    )
}

fn uv_label(level: UvLevel) -> &'static str {
    match level {
        UvLevel::Low => "faible",
        UvLevel::Moderate => "modere",
        UvLevel::High => "eleve",
        UvLevel::VeryHigh => "tres eleve",
        UvLevel::Extreme => "extreme",
    }
}

fn humidity_label(level: HumidityLevel) -> &'static str {
    match level {
        HumidityLevel::VeryDry => "tres sec",
        HumidityLevel::Dry => "sec",
        HumidityLevel::Normal => "normal",
        HumidityLevel::Humid => "humide",
    }
}

fn pollution_label(level: PollutionLevel) -> &'static str {
    match level {
        PollutionLevel::Excellent => "excellente",
        PollutionLevel::Good => "bonne",
        PollutionLevel::Moderate => "moyenne",
        PollutionLevel::Poor => "mauvaise",
        PollutionLevel::VeryPoor => "tres mauvaise",
        PollutionLevel::Unknown => "inconnue",
    }
}

fn product_prompt(product_name: &str) -> String {
    format!(
        r#"Tu es un expert cosmetologue. Analyse le produit suivant et retourne ses caracteristiques
au format JSON strict, sans texte autour.

{{"name": "Nom complet", "category": "cleanser|treatment|moisturizer|protection", "moment": "matin|journee|soir|tous", "photosensitive": false, "occlusivity": 1-5, "cleansing_power": 1-5, "active_tag": "hydration|acne|repair"}}

photosensitive = true pour retinoides, AHA, BHA concentre, vitamine C pure, peroxyde de benzoyle.
occlusivity: 1 eaux et gels, 3 cremes legeres, 5 baumes et huiles.
cleansing_power: 1 eaux micellaires et laits, 3 mousses, 5 demaquillants waterproof.

PRODUIT: {product_name}"#
    )
}

// ════════════════════════════════════════════════════════════════════════════════
// Reply parsing
// ════════════════════════════════════════════════════════════════════════════════

/// Extracts the first JSON object from a model reply.
///
/// Handles markdown fences and prose around the object.
fn extract_json(text: &str) -> Option<serde_json::Value> {
    let trimmed = text.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .map(|rest| rest.trim_end().trim_end_matches("```"))
        .unwrap_or(trimmed)
        .trim();

    if let Ok(value) = serde_json::from_str(unfenced) {
        return Some(value);
    }

    let start = unfenced.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, c) in unfenced[start..].char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    let end = start + offset + c.len_utf8();
                    return serde_json::from_str(&unfenced[start..end]).ok();
                }
            }
            _ => {}
        }
    }
    None
}

#[derive(Debug, Deserialize)]
struct RoutineReply {
    morning: Option<SlotReply>,
    midday: Option<SlotReply>,
    evening: Option<SlotReply>,
    summary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SlotReply {
    #[serde(default)]
    products: Vec<String>,
    #[serde(default)]
    alerts: Vec<String>,
}

fn parse_routine_reply(text: &str, deterministic: &Routine) -> Result<Routine, AugmentError> {
    let value = extract_json(text)
        .ok_or_else(|| AugmentError::InvalidResponse("no JSON object in reply".to_string()))?;
    let reply: RoutineReply = serde_json::from_value(value)
        .map_err(|e| AugmentError::InvalidResponse(format!("unexpected routine shape: {}", e)))?;

    let slot = |reply: Option<SlotReply>, slot: RoutineSlot| -> Result<MomentSelection, AugmentError> {
        let Some(reply) = reply else {
            return Ok(deterministic.selection(slot).clone());
        };
        let products = reply
            .products
            .into_iter()
            .map(|name| {
                ProductName::new(name)
                    .map_err(|e| AugmentError::InvalidResponse(format!("{}: {}", slot, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let alerts = reply
            .alerts
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .map(Alert::advisory)
            .collect();
        Ok(MomentSelection {
            slot,
            products,
            alerts,
        })
    };

    let mut routine = Routine::new(
        slot(reply.morning, RoutineSlot::Morning)?,
        slot(reply.midday, RoutineSlot::Midday)?,
        slot(reply.evening, RoutineSlot::Evening)?,
    );
    routine.summary = reply.summary;
    Ok(routine)
}

#[derive(Debug, Deserialize)]
struct ProductReply {
    name: Option<String>,
    category: Option<String>,
    moment: Option<String>,
    photosensitive: Option<bool>,
    occlusivity: Option<i64>,
    cleansing_power: Option<i64>,
    active_tag: Option<String>,
}

fn parse_product_reply(text: &str, requested_name: &str) -> Result<ProductDraft, AugmentError> {
    let value = extract_json(text)
        .ok_or_else(|| AugmentError::InvalidResponse("no JSON object in reply".to_string()))?;
    let reply: ProductReply = serde_json::from_value(value)
        .map_err(|e| AugmentError::InvalidResponse(format!("unexpected product shape: {}", e)))?;

    let category = reply
        .category
        .ok_or_else(|| AugmentError::InvalidResponse("reply has no category".to_string()))?;

    Ok(ProductDraft {
        name: reply
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| requested_name.to_string()),
        category,
        moment: reply.moment,
        photosensitive: reply.photosensitive,
        occlusivity: reply.occlusivity,
        cleansing_power: reply.cleansing_power,
        active_tag: reply.active_tag,
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Gemini API Types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}
