//! Product value objects and the draft-to-product validation boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Level, ValidationError};

/// Product category, in routine application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cleanser,
    Treatment,
    Moisturizer,
    Protection,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Cleanser,
        Category::Treatment,
        Category::Moisturizer,
        Category::Protection,
    ];

    /// Position of the category in a routine (cleanser first).
    pub fn application_rank(&self) -> u8 {
        match self {
            Category::Cleanser => 0,
            Category::Treatment => 1,
            Category::Moisturizer => 2,
            Category::Protection => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cleanser => "cleanser",
            Category::Treatment => "treatment",
            Category::Moisturizer => "moisturizer",
            Category::Protection => "protection",
        }
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cleanser" => Ok(Category::Cleanser),
            "treatment" => Ok(Category::Treatment),
            "moisturizer" => Ok(Category::Moisturizer),
            "protection" => Ok(Category::Protection),
            _ => Err(ValidationError::unknown_variant(
                "category",
                s,
                "cleanser, treatment, moisturizer, protection",
            )),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the three daily routine slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutineSlot {
    Morning,
    Midday,
    Evening,
}

impl RoutineSlot {
    pub const ALL: [RoutineSlot; 3] = [RoutineSlot::Morning, RoutineSlot::Midday, RoutineSlot::Evening];

    /// Slots exposed to daylight UV.
    pub fn is_daytime(&self) -> bool {
        matches!(self, RoutineSlot::Morning | RoutineSlot::Midday)
    }
}

impl fmt::Display for RoutineSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutineSlot::Morning => write!(f, "morning"),
            RoutineSlot::Midday => write!(f, "midday"),
            RoutineSlot::Evening => write!(f, "evening"),
        }
    }
}

/// When a product may be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Moment {
    Morning,
    Midday,
    Evening,
    #[default]
    Any,
}

impl Moment {
    /// Returns true if a product with this moment belongs in `slot`.
    pub fn applies_to(&self, slot: RoutineSlot) -> bool {
        match self {
            Moment::Any => true,
            Moment::Morning => slot == RoutineSlot::Morning,
            Moment::Midday => slot == RoutineSlot::Midday,
            Moment::Evening => slot == RoutineSlot::Evening,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Moment::Morning => "morning",
            Moment::Midday => "midday",
            Moment::Evening => "evening",
            Moment::Any => "any",
        }
    }
}

impl FromStr for Moment {
    type Err = ValidationError;

    /// Accepts the English names and the legacy French spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" | "matin" => Ok(Moment::Morning),
            "midday" | "journee" | "journée" => Ok(Moment::Midday),
            "evening" | "soir" => Ok(Moment::Evening),
            "any" | "tous" => Ok(Moment::Any),
            _ => Err(ValidationError::unknown_variant(
                "moment",
                s,
                "morning, midday, evening, any",
            )),
        }
    }
}

/// Main action of a product's active ingredients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTag {
    Acne,
    #[default]
    Hydration,
    Repair,
}

impl ActiveTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveTag::Acne => "acne",
            ActiveTag::Hydration => "hydration",
            ActiveTag::Repair => "repair",
        }
    }
}

impl FromStr for ActiveTag {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "acne" => Ok(ActiveTag::Acne),
            "hydration" => Ok(ActiveTag::Hydration),
            "repair" => Ok(ActiveTag::Repair),
            _ => Err(ValidationError::unknown_variant(
                "active_tag",
                s,
                "acne, hydration, repair",
            )),
        }
    }
}

/// Product display name; the catalog identity.
///
/// Two names denote the same product when they are equal ignoring case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductName(String);

impl ProductName {
    /// Creates a name, trimming whitespace and rejecting blanks.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive identity comparison.
    pub fn matches(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.trim().to_lowercase()
    }
}

impl TryFrom<String> for ProductName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductName> for String {
    fn from(name: ProductName) -> Self {
        name.0
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated cosmetic product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    name: ProductName,
    category: Category,
    moment: Moment,
    photosensitive: bool,
    occlusivity: Level,
    cleansing_power: Level,
    active_tag: ActiveTag,
}

impl Product {
    /// Creates a product with default attributes (moment any, mid-range levels).
    pub fn new(name: ProductName, category: Category) -> Self {
        Self {
            name,
            category,
            moment: Moment::default(),
            photosensitive: false,
            occlusivity: Level::default(),
            cleansing_power: Level::default(),
            active_tag: ActiveTag::default(),
        }
    }

    pub fn with_moment(mut self, moment: Moment) -> Self {
        self.moment = moment;
        self
    }

    pub fn with_photosensitive(mut self, photosensitive: bool) -> Self {
        self.photosensitive = photosensitive;
        self
    }

    /// Sets occlusivity, clamped into [1, 5].
    pub fn with_occlusivity(mut self, value: i64) -> Self {
        self.occlusivity = Level::clamped(value);
        self
    }

    /// Sets cleansing power, clamped into [1, 5].
    pub fn with_cleansing_power(mut self, value: i64) -> Self {
        self.cleansing_power = Level::clamped(value);
        self
    }

    pub fn with_active_tag(mut self, tag: ActiveTag) -> Self {
        self.active_tag = tag;
        self
    }

    pub fn name(&self) -> &ProductName {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn moment(&self) -> Moment {
        self.moment
    }

    pub fn is_photosensitive(&self) -> bool {
        self.photosensitive
    }

    pub fn occlusivity(&self) -> Level {
        self.occlusivity
    }

    pub fn cleansing_power(&self) -> Level {
        self.cleansing_power
    }

    pub fn active_tag(&self) -> ActiveTag {
        self.active_tag
    }

    pub fn is_cleanser(&self) -> bool {
        self.category == Category::Cleanser
    }
}

/// Unvalidated product data as stored on disk or proposed by the AI extractor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photosensitive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occlusivity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleansing_power: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_tag: Option<String>,
}

impl TryFrom<ProductDraft> for Product {
    type Error = ValidationError;

    fn try_from(draft: ProductDraft) -> Result<Self, Self::Error> {
        let name = ProductName::new(draft.name)?;
        let category: Category = draft.category.parse()?;
        let moment = match draft.moment.as_deref() {
            Some(raw) => raw.parse()?,
            None => Moment::default(),
        };
        let active_tag = match draft.active_tag.as_deref() {
            Some(raw) => raw.parse()?,
            None => ActiveTag::default(),
        };

        Ok(Product::new(name, category)
            .with_moment(moment)
            .with_photosensitive(draft.photosensitive.unwrap_or(false))
            .with_occlusivity(draft.occlusivity.unwrap_or(3))
            .with_cleansing_power(draft.cleansing_power.unwrap_or(3))
            .with_active_tag(active_tag))
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.as_str().to_string(),
            category: product.category.as_str().to_string(),
            moment: Some(product.moment.as_str().to_string()),
            photosensitive: Some(product.photosensitive),
            occlusivity: Some(product.occlusivity.value() as i64),
            cleansing_power: Some(product.cleansing_power.value() as i64),
            active_tag: Some(product.active_tag.as_str().to_string()),
        }
    }
}
