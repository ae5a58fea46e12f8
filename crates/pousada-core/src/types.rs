//! # Domain Types
//!
//! Records persisted in the local key-value store, plus the small enums the
//! rest of the crate is built on.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Catalog                     Inventory              Stays               │
//! │  ┌───────────────┐           ┌─────────────┐        ┌────────────────┐  │
//! │  │ Product       │           │ HotelRoom   │──────► │ Room (active)  │  │
//! │  │ Amenity       │           │  number     │ check  │  status        │  │
//! │  │ PackageService│           │  amenities  │  in    │  order[]       │  │
//! │  │ Package       │           └─────────────┘        │  meal_package  │  │
//! │  └───────────────┘                                  └───────┬────────┘  │
//! │                                                     checkout│ ▲ reopen  │
//! │                                                             ▼ │         │
//! │                                                     ┌────────────────┐  │
//! │                                                     │ ClosedRoom     │  │
//! │                                                     │ (billing snap) │  │
//! │                                                     └────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Field names and shapes match the stored JSON exactly (`camelCase`, prices
//! as decimal numbers, instants as ISO-8601 UTC strings with milliseconds).
//! Existing stored data must load unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;

/// Builds a new identifier of the form `<prefix>_<uuid>`.
pub fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

// =============================================================================
// Meals
// =============================================================================

/// Product id of the reserved daily breakfast product.
pub const MEAL_BREAKFAST_ID: &str = "meal_breakfast";
/// Product id of the reserved daily lunch product.
pub const MEAL_LUNCH_ID: &str = "meal_lunch";
/// Product id of the reserved daily dinner product.
pub const MEAL_DINNER_ID: &str = "meal_dinner";

/// One of the three daily meals a stay can include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
}

impl Meal {
    pub const ALL: [Meal; 3] = [Meal::Breakfast, Meal::Lunch, Meal::Dinner];

    /// Reserved catalog product priced as this meal's daily rate.
    pub const fn product_id(self) -> &'static str {
        match self {
            Meal::Breakfast => MEAL_BREAKFAST_ID,
            Meal::Lunch => MEAL_LUNCH_ID,
            Meal::Dinner => MEAL_DINNER_ID,
        }
    }

    /// Room amenity that makes this meal complimentary.
    pub const fn amenity_name(self) -> &'static str {
        match self {
            Meal::Breakfast => "Café da Manhã",
            Meal::Lunch => "Almoço",
            Meal::Dinner => "Jantar",
        }
    }

    /// Reserved product created when the catalog lacks it.
    pub fn default_product(self) -> Product {
        let (name, price) = match self {
            Meal::Breakfast => ("Café da Manhã (Diária)", 30.0),
            Meal::Lunch => ("Almoço (Diária)", 50.0),
            Meal::Dinner => ("Jantar (Diária)", 45.0),
        };
        Product {
            id: self.product_id().to_string(),
            name: name.to_string(),
            price,
        }
    }

    /// Maps a product id back to its meal, if it is a reserved meal product.
    pub fn from_product_id(id: &str) -> Option<Meal> {
        Meal::ALL.into_iter().find(|meal| meal.product_id() == id)
    }
}

/// Meal flags of a stay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MealPlan {
    pub breakfast: bool,
    pub lunch: bool,
    pub dinner: bool,
}

impl MealPlan {
    pub fn includes(&self, meal: Meal) -> bool {
        match meal {
            Meal::Breakfast => self.breakfast,
            Meal::Lunch => self.lunch,
            Meal::Dinner => self.dinner,
        }
    }

    pub fn set(&mut self, meal: Meal, included: bool) {
        match meal {
            Meal::Breakfast => self.breakfast = included,
            Meal::Lunch => self.lunch = included,
            Meal::Dinner => self.dinner = included,
        }
    }

    /// Iterates the meals switched on in this plan.
    pub fn meals(&self) -> impl Iterator<Item = Meal> + '_ {
        Meal::ALL.into_iter().filter(|meal| self.includes(*meal))
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A sellable item. Also prices the daily meals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
}

impl Product {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_decimal(self.price)
    }

    /// Reserved meal products cannot be deleted.
    pub fn is_reserved_meal(&self) -> bool {
        Meal::from_product_id(&self.id).is_some()
    }
}

/// Free-form named room feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Amenity {
    pub id: String,
    pub name: String,
}

/// Named service that packages bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PackageService {
    pub id: String,
    pub name: String,
}

/// Bundle of services sold for a flat additional price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Package {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub service_ids: Vec<String>,
}

// =============================================================================
// Inventory
// =============================================================================

/// A physical room of the property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HotelRoom {
    pub id: String,
    pub number: String,
    pub name: String,
    /// Amenity names.
    pub amenities: Vec<String>,
}

// =============================================================================
// Stays
// =============================================================================

/// A line of a room's running consumption tab.
///
/// Name and price are frozen when the line is created; later catalog edits
/// do not change existing lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderItem {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub product_price: f64,
    pub quantity: i64,
}

impl OrderItem {
    /// Snapshots the product as a new line with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        OrderItem {
            id: new_id("order"),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            product_price: product.price,
            quantity: 1,
        }
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_decimal(self.product_price)
    }

    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

/// Status of an active stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum StayStatus {
    Reserved,
    Occupied,
}

impl StayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StayStatus::Reserved => "reserved",
            StayStatus::Occupied => "occupied",
        }
    }
}

/// An active stay (reserved or occupied).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Room {
    pub id: String,
    pub room_number: String,
    pub room_name: String,
    pub guest_name: String,
    pub daily_rate: f64,
    #[serde(with = "iso8601")]
    #[ts(as = "String")]
    pub check_in_date: DateTime<Utc>,
    #[serde(default, with = "iso8601::option")]
    #[ts(as = "Option<String>")]
    pub check_out_date: Option<DateTime<Utc>>,
    pub order: Vec<OrderItem>,
    pub status: StayStatus,
    /// Amenity names copied from the inventory room at check-in.
    pub amenities: Vec<String>,
    pub meal_package: MealPlan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub package_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub package_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub package_price: Option<f64>,
}

impl Room {
    #[inline]
    pub fn daily_rate(&self) -> Money {
        Money::from_decimal(self.daily_rate)
    }

    #[inline]
    pub fn package_price(&self) -> Money {
        self.package_price.map(Money::from_decimal).unwrap_or_default()
    }
}

/// Immutable billing record of a finished stay.
///
/// Serialized as the room's fields plus the closure fields, side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ClosedRoom {
    #[serde(flatten)]
    pub room: Room,
    #[serde(with = "iso8601")]
    #[ts(as = "String")]
    pub final_check_out_date: DateTime<Utc>,
    pub room_total: f64,
    pub order_total: f64,
    pub meal_package_total: f64,
    pub total_amount: f64,
    pub original_status: StayStatus,
}

impl ClosedRoom {
    #[inline]
    pub fn id(&self) -> &str {
        &self.room.id
    }

    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_decimal(self.total_amount)
    }
}

// =============================================================================
// Preferences
// =============================================================================

/// Colour theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

// =============================================================================
// Instant Serialization
// =============================================================================

/// ISO-8601 UTC instants with millisecond precision (`2024-01-01T00:00:00.000Z`).
///
/// Reading also accepts any RFC 3339 offset and bare `YYYY-MM-DD` dates
/// (taken as midnight UTC).
pub mod iso8601 {
    use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn format(instant: &DateTime<Utc>) -> String {
        instant.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn parse(text: &str) -> Option<DateTime<Utc>> {
        if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
            return Some(instant.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(instant))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).ok_or_else(|| de::Error::custom(format!("invalid instant: {}", text)))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            instant: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match instant {
                Some(instant) => serializer.serialize_str(&super::format(instant)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(text) if text.is_empty() => Ok(None),
                Some(text) => super::parse(&text)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid instant: {}", text))),
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
