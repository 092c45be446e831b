//! Real Nilüfer (Bursa) locations for realistic test fixtures.
//!
//! Coordinates approximate container points in Nilüfer's larger
//! neighborhoods, sourced from OpenStreetMap.

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub neighborhood: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, neighborhood: &'static str, lat: f64, lng: f64) -> Self {
        Self {
            name,
            neighborhood,
            lat,
            lng,
        }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

// ============================================================================
// Görükle (university district, west)
// ============================================================================

pub const GORUKLE: &[Location] = &[
    Location::new("Görükle Merkez", "gorukle", 40.2329, 28.8346),
    Location::new("Görükle Sakarya Cd", "gorukle", 40.2351, 28.8312),
    Location::new("Görükle Üniversite Kapısı", "gorukle", 40.2287, 28.8401),
    Location::new("Görükle Pazar Alanı", "gorukle", 40.2343, 28.8387),
    Location::new("Dumlupınar Mh", "gorukle", 40.2301, 28.8290),
];

// ============================================================================
// Özlüce / Altınşehir (residential, center-west)
// ============================================================================

pub const OZLUCE: &[Location] = &[
    Location::new("Özlüce Merkez", "ozluce", 40.2355, 28.9105),
    Location::new("Özlüce Yaşam Cd", "ozluce", 40.2381, 28.9142),
    Location::new("Altınşehir Mh", "ozluce", 40.2402, 28.9231),
    Location::new("23 Nisan Mh", "ozluce", 40.2330, 28.9174),
];

// ============================================================================
// Central Nilüfer (Beşevler, Ataevler, Konak, İhsaniye)
// ============================================================================

pub const CENTRAL: &[Location] = &[
    Location::new("Beşevler Sanayi", "besevler", 40.2052, 28.9780),
    Location::new("Beşevler Okul Önü", "besevler", 40.2078, 28.9812),
    Location::new("Ataevler Meydan", "ataevler", 40.2122, 28.9652),
    Location::new("Ataevler Barış Cd", "ataevler", 40.2149, 28.9687),
    Location::new("Konak Lefkoşe Cd", "konak", 40.2110, 28.9743),
    Location::new("Konak Kültürpark", "konak", 40.2137, 28.9770),
    Location::new("İhsaniye İzmir Yolu", "ihsaniye", 40.2167, 28.9866),
    Location::new("İhsaniye Meydan", "ihsaniye", 40.2190, 28.9830),
    Location::new("Fethiye Mh", "fethiye", 40.2339, 28.9570),
    Location::new("Karaman Mh", "karaman", 40.2296, 28.9664),
    Location::new("Demirci Mh", "demirci", 40.1930, 28.9662),
];

/// All container points across the district.
pub fn all_locations() -> Vec<Location> {
    GORUKLE
        .iter()
        .chain(OZLUCE.iter())
        .chain(CENTRAL.iter())
        .cloned()
        .collect()
}
