//! Business details prefilled from place data.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::payment::PaymentPlan;
use crate::error::Result;
use crate::places::{PlaceDetails, PlacesSource};

const FALLBACK_PHONE: &str = "+91 98765 43210";
const FALLBACK_ADDRESS: &str = "123 Main Street, Building Name";
const FALLBACK_CITY: &str = "Visakhapatnam";
const FALLBACK_AREA: &str = "Asilmetta";

/// Business category offered at onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum BusinessCategory {
    Restaurant,
    Cafe,
    #[default]
    Retail,
    Healthcare,
    Fitness,
    Beauty,
    Services,
}

impl BusinessCategory {
    /// Map Google place types to a category. The first recognised type wins.
    #[must_use]
    pub fn from_place_types<S: AsRef<str>>(types: &[S]) -> Self {
        types
            .iter()
            .find_map(|t| Self::from_place_type(t.as_ref()))
            .unwrap_or(Self::Services)
    }

    fn from_place_type(place_type: &str) -> Option<Self> {
        let category = match place_type {
            "cafe" | "bakery" => Self::Cafe,
            "restaurant" | "food" | "meal_takeaway" | "meal_delivery" | "bar" => Self::Restaurant,
            "store" | "jewelry_store" | "clothing_store" | "shopping_mall" | "shoe_store"
            | "electronics_store" | "supermarket" => Self::Retail,
            "hospital" | "doctor" | "dentist" | "pharmacy" | "health" => Self::Healthcare,
            "gym" => Self::Fitness,
            "beauty_salon" | "hair_care" | "spa" => Self::Beauty,
            _ => return None,
        };
        Some(category)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::Cafe => "cafe",
            Self::Retail => "retail",
            Self::Healthcare => "healthcare",
            Self::Fitness => "fitness",
            Self::Beauty => "beauty",
            Self::Services => "services",
        }
    }

    /// Suggested services, most common first
    #[must_use]
    pub const fn suggested_services(self) -> &'static [&'static str] {
        match self {
            Self::Restaurant => &["Dine-in", "Takeaway", "Home Delivery", "Catering"],
            Self::Cafe => &["Coffee", "Snacks", "Takeaway", "Free Wi-Fi"],
            Self::Retail => &["In-store Shopping", "Home Delivery", "Gift Wrapping"],
            Self::Healthcare => &["Consultation", "Diagnostics", "Pharmacy"],
            Self::Fitness => &["Personal Training", "Group Classes", "Cardio"],
            Self::Beauty => &["Haircut", "Facial", "Bridal Makeup", "Manicure"],
            Self::Services => &["Consultation", "Support", "Installation"],
        }
    }
}

impl std::fmt::Display for BusinessCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Onboarding form contents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub area: String,
    pub category: BusinessCategory,
    pub overview: String,
    pub google_business_review_link: String,
    pub services: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_plan: Option<PaymentPlan>,
}

impl BusinessDraft {
    /// Fields that must be filled before payment can start
    #[must_use]
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        missing
    }
}

/// `contact@<name>.com` using the lowercase alphanumerics of `name`
fn contact_email(name: &str) -> String {
    let domain: String = name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    let domain = if domain.is_empty() { "business" } else { domain.as_str() };
    format!("contact@{domain}.com")
}

/// Street address, city and area extracted from address components
struct PostalParts {
    address: String,
    city: String,
    area: String,
}

fn postal_parts(details: &PlaceDetails) -> PostalParts {
    let long_name = |kind: &str| details.component(kind).map(|c| c.long_name.clone());

    let street: Vec<String> = ["street_number", "route"]
        .iter()
        .filter_map(|kind| long_name(*kind))
        .collect();
    let area = long_name("sublocality_level_1")
        .or_else(|| long_name("sublocality"))
        .unwrap_or_default();

    let address = if street.is_empty() {
        // no street components: use the leading part of the formatted address
        details
            .formatted_address
            .split(',')
            .next()
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    } else {
        street.join(", ")
    };

    PostalParts {
        address,
        city: long_name("locality").unwrap_or_default(),
        area,
    }
}

/// Build a draft for `business_name` from optional place details.
///
/// The typed business name always wins over the place name; the phone
/// number entered at the analyse step is used when the place has none.
#[must_use]
pub fn prefill_draft(business_name: &str, phone: &str, details: Option<&PlaceDetails>) -> BusinessDraft {
    let name = business_name.trim();

    let Some(details) = details else {
        return BusinessDraft {
            name: name.to_string(),
            email: contact_email(name),
            phone: if phone.is_empty() {
                FALLBACK_PHONE.to_string()
            } else {
                phone.to_string()
            },
            address: FALLBACK_ADDRESS.to_string(),
            city: FALLBACK_CITY.to_string(),
            area: FALLBACK_AREA.to_string(),
            category: BusinessCategory::Retail,
            overview: format!(
                "Welcome to {name}! We are committed to providing excellent service and customer satisfaction."
            ),
            google_business_review_link: String::new(),
            services: vec![
                "Service 1".to_string(),
                "Service 2".to_string(),
                "Service 3".to_string(),
            ],
            payment_plan: None,
        };
    };

    let parts = postal_parts(details);
    let category = BusinessCategory::from_place_types(&details.types);

    BusinessDraft {
        name: if name.is_empty() {
            details.name.clone()
        } else {
            name.to_string()
        },
        email: contact_email(&details.name),
        phone: details.phone().unwrap_or(phone).to_string(),
        overview: format!(
            "Welcome to {}! We are a {category} business committed to providing excellent service and customer satisfaction. Visit us at {}, {}.",
            details.name, parts.address, parts.city
        ),
        address: parts.address,
        city: parts.city,
        area: parts.area,
        category,
        google_business_review_link: details.website.clone().unwrap_or_default(),
        services: category
            .suggested_services()
            .iter()
            .take(3)
            .map(ToString::to_string)
            .collect(),
        payment_plan: None,
    }
}

/// Look the business up and prefill from the first suggestion's details.
pub fn prefill_from_source(
    source: &dyn PlacesSource,
    business_name: &str,
    phone: &str,
) -> Result<BusinessDraft> {
    let details = match source.autocomplete(business_name)?.first() {
        Some(prediction) => source.details(&prediction.place_id)?,
        None => None,
    };
    Ok(prefill_draft(business_name, phone, details.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::places::MockPlaces;

    #[test]
    fn test_contact_email() {
        assert_eq!(
            contact_email("Mia by Tanishq - Asilmetta, Visakhapatnam"),
            "contact@miabytanishqasilmettavisakhapatnam.com"
        );
        assert_eq!(contact_email("!!!"), "contact@business.com");
    }

    #[test]
    fn test_category_mapping() {
        assert_eq!(
            BusinessCategory::from_place_types(&["cafe", "restaurant"]),
            BusinessCategory::Cafe
        );
        assert_eq!(
            BusinessCategory::from_place_types(&["jewelry_store", "store"]),
            BusinessCategory::Retail
        );
        assert_eq!(
            BusinessCategory::from_place_types(&["establishment", "point_of_interest"]),
            BusinessCategory::Services
        );
    }

    #[test]
    fn test_fallback_draft() {
        let draft = prefill_draft("Sunrise Bakery", "", None);
        assert_eq!(draft.email, "contact@sunrisebakery.com");
        assert_eq!(draft.phone, "+91 98765 43210");
        assert_eq!(draft.address, "123 Main Street, Building Name");
        assert_eq!(draft.category, BusinessCategory::Retail);
        assert_eq!(draft.services.len(), 3);

        let draft = prefill_draft("Sunrise Bakery", "+91 90000 00000", None);
        assert_eq!(draft.phone, "+91 90000 00000");
    }

    #[test]
    fn test_prefill_from_mock_place() {
        let mock = MockPlaces::new();
        let draft = prefill_from_source(&mock, "Mia by Tanishq", "").expect("prefill");
        assert_eq!(draft.name, "Mia by Tanishq");
        assert_eq!(draft.address, "2, Sampath Vinayaka Temple Road");
        assert_eq!(draft.city, "Visakhapatnam");
        assert_eq!(draft.area, "CBM Compound");
        assert_eq!(draft.phone, "+91 891 256 7890");
        assert_eq!(draft.category, BusinessCategory::Retail);
        assert_eq!(draft.google_business_review_link, "https://www.tanishq.co.in");
        assert!(draft.overview.contains("We are a retail business"));
    }

    #[test]
    fn test_prefill_without_street_components() {
        let mock = MockPlaces::new();
        let draft = prefill_from_source(&mock, "Beauty Salon", "").expect("prefill");
        assert_eq!(draft.address, "Ground Floor");
        assert_eq!(draft.area, "Daba Gardens");
        assert_eq!(draft.category, BusinessCategory::Beauty);
    }

    #[test]
    fn test_missing_required() {
        let draft = BusinessDraft::default();
        assert_eq!(draft.missing_required(), vec!["name", "email"]);
    }
}
