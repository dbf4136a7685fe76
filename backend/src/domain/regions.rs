//! Static region and district lookup for school locations.
//!
//! Regions are the 31 first-level administrative regions of Tanzania. Only
//! some regions carry an explicit district list; every other region offers
//! [`FALLBACK_DISTRICTS`] so a location can still be captured.

/// Every region a school may be located in, in display order.
pub const REGIONS: [&str; 31] = [
    "Arusha",
    "Dar es Salaam",
    "Dodoma",
    "Geita",
    "Iringa",
    "Kagera",
    "Katavi",
    "Kigoma",
    "Kilimanjaro",
    "Lindi",
    "Manyara",
    "Mara",
    "Mbeya",
    "Morogoro",
    "Mtwara",
    "Mwanza",
    "Njombe",
    "Pemba North",
    "Pemba South",
    "Pwani",
    "Rukwa",
    "Ruvuma",
    "Shinyanga",
    "Simiyu",
    "Singida",
    "Songwe",
    "Tabora",
    "Tanga",
    "Zanzibar North",
    "Zanzibar South",
    "Zanzibar Urban West",
];

/// Districts offered for regions without an explicit entry.
pub const FALLBACK_DISTRICTS: [&str; 4] = ["District 1", "District 2", "District 3", "District 4"];

const DISTRICTS: &[(&str, &[&str])] = &[
    (
        "Arusha",
        &[
            "Arusha City",
            "Arusha Rural",
            "Karatu",
            "Longido",
            "Meru",
            "Monduli",
            "Ngorongoro",
        ],
    ),
    (
        "Dar es Salaam",
        &["Ilala", "Kinondoni", "Temeke", "Ubungo", "Kigamboni"],
    ),
    (
        "Dodoma",
        &[
            "Bahi",
            "Chamwino",
            "Chemba",
            "Dodoma City",
            "Kondoa",
            "Kongwa",
            "Mpwapwa",
        ],
    ),
    (
        "Kilimanjaro",
        &[
            "Hai",
            "Moshi Municipal",
            "Moshi Rural",
            "Mwanga",
            "Rombo",
            "Same",
            "Siha",
        ],
    ),
    (
        "Mbeya",
        &[
            "Busokelo",
            "Chunya",
            "Kyela",
            "Mbarali",
            "Mbeya City",
            "Mbeya Rural",
            "Rungwe",
        ],
    ),
    (
        "Morogoro",
        &[
            "Gairo",
            "Ifakara Town",
            "Kilombero",
            "Kilosa",
            "Malinyi",
            "Morogoro Municipal",
            "Morogoro Rural",
            "Mvomero",
            "Ulanga",
        ],
    ),
    (
        "Mwanza",
        &[
            "Buchosa",
            "Ilemela",
            "Kwimba",
            "Magu",
            "Misungwi",
            "Nyamagana",
            "Sengerema",
            "Ukerewe",
        ],
    ),
    (
        "Tanga",
        &[
            "Bumbuli",
            "Handeni",
            "Kilindi",
            "Korogwe",
            "Lushoto",
            "Mkinga",
            "Muheza",
            "Pangani",
            "Tanga City",
        ],
    ),
];

/// All regions in display order.
#[must_use]
pub fn regions() -> &'static [&'static str] {
    &REGIONS
}

/// Whether `region` names one of [`REGIONS`].
#[must_use]
pub fn is_known_region(region: &str) -> bool {
    REGIONS.contains(&region)
}

/// District options for `region`.
///
/// Unmapped regions, including unknown ones, yield [`FALLBACK_DISTRICTS`].
///
/// # Examples
/// ```
/// use shule::domain::regions::{districts_for, FALLBACK_DISTRICTS};
///
/// assert!(districts_for("Dar es Salaam").contains(&"Kinondoni"));
/// assert_eq!(districts_for("Katavi"), FALLBACK_DISTRICTS.as_slice());
/// ```
#[must_use]
pub fn districts_for(region: &str) -> &'static [&'static str] {
    DISTRICTS
        .iter()
        .find(|(name, _)| *name == region)
        .map_or(FALLBACK_DISTRICTS.as_slice(), |(_, districts)| *districts)
}

/// Whether `district` is among the options offered for `region`.
#[must_use]
pub fn offers_district(region: &str, district: &str) -> bool {
    districts_for(region).contains(&district)
}
