//! Physical location of a school.

use serde::{Deserialize, Serialize};

use super::contact::string_newtype_conversions;
use super::regions;
use super::validation::{FieldValidationError, require_min_chars};

/// Minimum length for ward and street names.
pub const PLACE_NAME_MIN: usize = 3;

/// One of the known Tanzanian regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Region(String);

impl Region {
    /// Accept a region listed in [`regions::REGIONS`]. Matching is exact.
    pub fn new(region: impl AsRef<str>) -> Result<Self, FieldValidationError> {
        let region = region.as_ref();
        if region.trim().is_empty() {
            return Err(FieldValidationError::Required);
        }
        if !regions::is_known_region(region) {
            return Err(FieldValidationError::InvalidChoice);
        }
        Ok(Self(region.to_owned()))
    }

    /// District options for this region.
    #[must_use]
    pub fn districts(&self) -> &'static [&'static str] {
        regions::districts_for(&self.0)
    }
}

/// A district offered for its region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct District(String);

impl District {
    /// Accept `district` only when `region` offers it.
    pub fn new(region: &str, district: &str) -> Result<Self, FieldValidationError> {
        if district.trim().is_empty() {
            return Err(FieldValidationError::Required);
        }
        if !regions::offers_district(region, district) {
            return Err(FieldValidationError::InvalidChoice);
        }
        Ok(Self(district.to_owned()))
    }
}

impl AsRef<str> for District {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Ward or street name with at least [`PLACE_NAME_MIN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlaceName(String);

impl PlaceName {
    /// Validate and construct a place name.
    pub fn new(name: impl AsRef<str>) -> Result<Self, FieldValidationError> {
        require_min_chars(name.as_ref(), PLACE_NAME_MIN).map(Self)
    }
}

string_newtype_conversions!(Region, PlaceName);

/// Location values written after the school row exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationDetails {
    pub region: Region,
    pub district: District,
    pub ward: PlaceName,
    pub street: PlaceName,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", FieldValidationError::Required)]
    #[case("Atlantis", FieldValidationError::InvalidChoice)]
    #[case("arusha", FieldValidationError::InvalidChoice)]
    fn rejects_unlisted_regions(#[case] raw: &str, #[case] expected: FieldValidationError) {
        assert_eq!(Region::new(raw), Err(expected));
    }

    #[rstest]
    #[case("Dar es Salaam", "Kinondoni")]
    #[case("Katavi", "District 2")]
    fn accepts_offered_districts(#[case] region: &str, #[case] district: &str) {
        let accepted = District::new(region, district).expect("district offered");
        assert_eq!(accepted.as_ref(), district);
    }

    #[rstest]
    #[case("Arusha", "", FieldValidationError::Required)]
    #[case("Arusha", "Kinondoni", FieldValidationError::InvalidChoice)]
    #[case("Dar es Salaam", "District 1", FieldValidationError::InvalidChoice)]
    fn rejects_districts_outside_the_region(
        #[case] region: &str,
        #[case] district: &str,
        #[case] expected: FieldValidationError,
    ) {
        assert_eq!(District::new(region, district), Err(expected));
    }

    #[rstest]
    fn region_lists_its_districts() {
        let region = Region::new("Mwanza").expect("known region");
        assert!(region.districts().contains(&"Ilemela"));
    }
}
