//! Built-in place data for running without a Places API key.

use super::{
    AddressComponent, Geometry, LatLng, PlaceDetails, PlacePrediction, PlacesSource,
    StructuredFormatting,
};
use crate::error::Result;

/// Mock place source over eight fixed businesses in Visakhapatnam and Kakinada.
#[derive(Debug, Clone)]
pub struct MockPlaces {
    businesses: Vec<PlaceDetails>,
}

impl MockPlaces {
    #[must_use]
    pub fn new() -> Self {
        Self {
            businesses: mock_businesses(),
        }
    }

    /// Mock source over a caller-supplied data set
    #[must_use]
    pub const fn with_businesses(businesses: Vec<PlaceDetails>) -> Self {
        Self { businesses }
    }

    #[must_use]
    pub fn businesses(&self) -> &[PlaceDetails] {
        &self.businesses
    }

    /// Case-insensitive substring match on name or formatted address.
    #[must_use]
    pub fn predictions(&self, query: &str) -> Vec<PlacePrediction> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.businesses
            .iter()
            .filter(|b| {
                b.name.to_lowercase().contains(&needle)
                    || b.formatted_address.to_lowercase().contains(&needle)
            })
            .map(to_prediction)
            .collect()
    }

    #[must_use]
    pub fn find(&self, place_id: &str) -> Option<&PlaceDetails> {
        self.businesses.iter().find(|b| b.place_id == place_id)
    }
}

impl Default for MockPlaces {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacesSource for MockPlaces {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn autocomplete(&self, query: &str) -> Result<Vec<PlacePrediction>> {
        Ok(self.predictions(query))
    }

    fn details(&self, place_id: &str) -> Result<Option<PlaceDetails>> {
        Ok(self.find(place_id).cloned())
    }

    fn missing_means_not_found(&self) -> bool {
        true
    }
}

fn to_prediction(business: &PlaceDetails) -> PlacePrediction {
    let secondary_text = business
        .formatted_address
        .split(',')
        .take(2)
        .collect::<Vec<_>>()
        .join(", ")
        .trim()
        .to_string();

    PlacePrediction {
        place_id: business.place_id.clone(),
        description: format!("{}, {}", business.name, business.formatted_address),
        structured_formatting: StructuredFormatting {
            main_text: business.name.clone(),
            secondary_text,
        },
    }
}

fn component(long_name: &str, short_name: &str, types: &[&str]) -> AddressComponent {
    AddressComponent {
        long_name: long_name.to_string(),
        short_name: short_name.to_string(),
        types: types.iter().map(ToString::to_string).collect(),
    }
}

/// Trailing locality/district/state/country/postcode components
fn region(locality: &str, district: Option<&str>, postal_code: &str) -> Vec<AddressComponent> {
    let mut components = vec![component(locality, locality, &["locality", "political"])];
    if let Some(district) = district {
        components.push(component(
            district,
            district,
            &["administrative_area_level_2", "political"],
        ));
    }
    components.extend([
        component("Andhra Pradesh", "AP", &["administrative_area_level_1", "political"]),
        component("India", "IN", &["country", "political"]),
        component(postal_code, postal_code, &["postal_code"]),
    ]);
    components
}

struct Entry {
    place_id: &'static str,
    name: &'static str,
    address: &'static str,
    phone: &'static str,
    website: &'static str,
    components: Vec<AddressComponent>,
    location: (f64, f64),
    types: &'static [&'static str],
    rating: f64,
    reviews: u32,
}

impl From<Entry> for PlaceDetails {
    fn from(e: Entry) -> Self {
        Self {
            place_id: e.place_id.to_string(),
            name: e.name.to_string(),
            formatted_address: e.address.to_string(),
            formatted_phone_number: Some(e.phone.to_string()),
            international_phone_number: Some(e.phone.to_string()),
            website: Some(e.website.to_string()),
            address_components: e.components,
            geometry: Some(Geometry {
                location: LatLng {
                    lat: e.location.0,
                    lng: e.location.1,
                },
            }),
            types: e.types.iter().map(ToString::to_string).collect(),
            business_status: Some("OPERATIONAL".to_string()),
            rating: Some(e.rating),
            user_ratings_total: Some(e.reviews),
        }
    }
}

fn with_region(mut head: Vec<AddressComponent>, tail: Vec<AddressComponent>) -> Vec<AddressComponent> {
    head.extend(tail);
    head
}

const JEWELRY: &[&str] = &["jewelry_store", "store", "establishment", "point_of_interest"];
const RESTAURANT: &[&str] = &["restaurant", "food", "point_of_interest", "establishment"];

#[allow(clippy::too_many_lines)]
fn mock_businesses() -> Vec<PlaceDetails> {
    let sub1 = &["sublocality_level_1", "sublocality"];
    let sub2 = &["sublocality_level_2", "sublocality"];

    let urban = Some("Visakhapatnam Urban");

    vec![
        Entry {
            place_id: "mock_place_1",
            name: "Mia by Tanishq - Asilmetta, Visakhapatnam",
            address: "2, Sampath Vinayaka Temple Rd, near Sampath Vinayaka Temple, CBM Compound, Asilmetta, Visakhapatnam, Visakhapatnam Urban, Andhra Pradesh 530003, India",
            phone: "+91 891 256 7890",
            website: "https://www.tanishq.co.in",
            components: with_region(
                vec![
                    component("2", "2", &["street_number"]),
                    component(
                        "Sampath Vinayaka Temple Road",
                        "Sampath Vinayaka Temple Rd",
                        &["route"],
                    ),
                    component("CBM Compound", "CBM Compound", sub1),
                    component("Asilmetta", "Asilmetta", sub2),
                ],
                region("Visakhapatnam", urban, "530003"),
            ),
            location: (17.6868, 83.2185),
            types: JEWELRY,
            rating: 4.5,
            reviews: 234,
        },
        Entry {
            place_id: "mock_place_2",
            name: "MAMMA MIA STREET EATS",
            address: "P8F4+9J8, Dwaraka Nagar, Visakhapatnam, Visakhapatnam Urban, Andhra Pradesh 530016, India",
            phone: "+91 891 234 5678",
            website: "https://www.mammamia.com",
            components: with_region(
                vec![component("Dwaraka Nagar", "Dwaraka Nagar", sub1)],
                region("Visakhapatnam", urban, "530016"),
            ),
            location: (17.7292, 83.2986),
            types: RESTAURANT,
            rating: 4.2,
            reviews: 189,
        },
        Entry {
            place_id: "mock_place_3",
            name: "Mia by Tanishq - Kakinada",
            address: "Door No: 20-1-46, Revenue Ward, 14, Main Rd, opp. to SRMT, Rama Rao Peta, Kakinada, Andhra Pradesh 533001, India",
            phone: "+91 884 223 4567",
            website: "https://www.tanishq.co.in",
            components: with_region(
                vec![
                    component("20-1-46", "20-1-46", &["street_number"]),
                    component("Main Road", "Main Rd", &["route"]),
                    component("Rama Rao Peta", "Rama Rao Peta", sub1),
                ],
                region("Kakinada", None, "533001"),
            ),
            location: (16.9333, 82.2167),
            types: JEWELRY,
            rating: 4.6,
            reviews: 312,
        },
        Entry {
            place_id: "mock_place_4",
            name: "The Coffee House - MVP Colony",
            address: "Shop No. 12, MVP Colony, Sector 1, Visakhapatnam, Andhra Pradesh 530017, India",
            phone: "+91 891 278 9012",
            website: "https://www.thecoffeehouse.com",
            components: with_region(
                vec![
                    component("12", "12", &["street_number"]),
                    component("MVP Colony", "MVP Colony", sub1),
                    component("Sector 1", "Sector 1", sub2),
                ],
                region("Visakhapatnam", None, "530017"),
            ),
            location: (17.74, 83.30),
            types: &["cafe", "restaurant", "food", "point_of_interest", "establishment"],
            rating: 4.3,
            reviews: 156,
        },
        Entry {
            place_id: "mock_place_5",
            name: "FitZone Gym - Seethammadhara",
            address: "Plot No. 45, Seethammadhara, Visakhapatnam, Andhra Pradesh 530013, India",
            phone: "+91 891 245 6789",
            website: "https://www.fitzone.com",
            components: with_region(
                vec![
                    component("45", "45", &["street_number"]),
                    component("Seethammadhara", "Seethammadhara", sub1),
                ],
                region("Visakhapatnam", None, "530013"),
            ),
            location: (17.75, 83.31),
            types: &["gym", "health", "establishment", "point_of_interest"],
            rating: 4.4,
            reviews: 278,
        },
        Entry {
            place_id: "mock_place_6",
            name: "Beauty Salon Pro - Daba Gardens",
            address: "Ground Floor, Daba Gardens, Visakhapatnam, Andhra Pradesh 530020, India",
            phone: "+91 891 267 8901",
            website: "https://www.beautysalonpro.com",
            components: with_region(
                vec![component("Daba Gardens", "Daba Gardens", sub1)],
                region("Visakhapatnam", None, "530020"),
            ),
            location: (17.72, 83.29),
            types: &["beauty_salon", "hair_care", "establishment", "point_of_interest"],
            rating: 4.1,
            reviews: 142,
        },
        Entry {
            place_id: "mock_place_7",
            name: "Green Leaf Restaurant - Beach Road",
            address: "Beach Road, R K Beach, Visakhapatnam, Andhra Pradesh 530001, India",
            phone: "+91 891 256 3456",
            website: "https://www.greenleafrestaurant.com",
            components: with_region(
                vec![
                    component("Beach Road", "Beach Rd", &["route"]),
                    component("R K Beach", "R K Beach", sub1),
                ],
                region("Visakhapatnam", None, "530001"),
            ),
            location: (17.70, 83.30),
            types: RESTAURANT,
            rating: 4.5,
            reviews: 421,
        },
        Entry {
            place_id: "mock_place_8",
            name: "Tech Solutions Inc - Gajuwaka",
            address: "IT Park, Gajuwaka, Visakhapatnam, Andhra Pradesh 530026, India",
            phone: "+91 891 289 0123",
            website: "https://www.techsolutions.com",
            components: with_region(
                vec![
                    component("IT Park", "IT Park", sub1),
                    component("Gajuwaka", "Gajuwaka", sub2),
                ],
                region("Visakhapatnam", None, "530026"),
            ),
            location: (17.68, 83.22),
            types: &["establishment", "point_of_interest"],
            rating: 4.0,
            reviews: 89,
        },
    ]
    .into_iter()
    .map(PlaceDetails::from)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eight_businesses() {
        let mock = MockPlaces::new();
        assert_eq!(mock.businesses().len(), 8);
        for (i, b) in mock.businesses().iter().enumerate() {
            assert_eq!(b.place_id, format!("mock_place_{}", i + 1));
        }
    }

    #[test]
    fn test_autocomplete_matches_name_case_insensitive() {
        let mock = MockPlaces::new();
        let results = mock.predictions("mia");
        let ids: Vec<_> = results.iter().map(|p| p.place_id.as_str()).collect();
        assert_eq!(ids, vec!["mock_place_1", "mock_place_2", "mock_place_3"]);
    }

    #[test]
    fn test_autocomplete_matches_address() {
        let mock = MockPlaces::new();
        let results = mock.predictions("  KAKINADA ");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].place_id, "mock_place_3");
    }

    #[test]
    fn test_autocomplete_empty_query() {
        let mock = MockPlaces::new();
        assert!(mock.predictions("").is_empty());
        assert!(mock.predictions("   ").is_empty());
        assert!(mock.predictions("zzz-no-such-business").is_empty());
    }

    #[test]
    fn test_prediction_shape() {
        let mock = MockPlaces::new();
        let p = &mock.predictions("FitZone")[0];
        assert_eq!(p.structured_formatting.main_text, "FitZone Gym - Seethammadhara");
        assert_eq!(p.structured_formatting.secondary_text, "Plot No. 45,  Seethammadhara");
        assert!(p.description.starts_with("FitZone Gym - Seethammadhara, Plot No. 45"));
    }

    #[test]
    fn test_region_components() {
        let mock = MockPlaces::new();
        let first = mock.find("mock_place_1").expect("present");
        assert_eq!(first.address_components.len(), 9);
        assert_eq!(
            first.component("postal_code").map(|c| c.long_name.as_str()),
            Some("530003")
        );
        assert_eq!(
            first
                .component("administrative_area_level_2")
                .map(|c| c.long_name.as_str()),
            Some("Visakhapatnam Urban")
        );

        let third = mock.find("mock_place_3").expect("present");
        assert_eq!(third.address_components.len(), 7);
        assert_eq!(
            third.component("locality").map(|c| c.long_name.as_str()),
            Some("Kakinada")
        );
    }

    #[test]
    fn test_details_lookup() {
        let mock = MockPlaces::new();
        let details = mock.details("mock_place_7").expect("never fails");
        assert_eq!(details.map(|d| d.user_ratings_total), Some(Some(421)));
        assert!(mock.details("unknown").expect("never fails").is_none());
    }

    #[test]
    fn test_custom_data_set() {
        let mock = MockPlaces::with_businesses(vec![PlaceDetails {
            place_id: "custom_1".to_string(),
            name: "Corner Bakery".to_string(),
            formatted_address: "12 Beach Road, Vizag".to_string(),
            ..Default::default()
        }]);
        assert_eq!(mock.businesses().len(), 1);
        assert_eq!(mock.predictions("beach")[0].place_id, "custom_1");
        assert!(mock.predictions("tanishq").is_empty());
    }
}
