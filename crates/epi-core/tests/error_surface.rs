use epi_core::errors::{EpiError, ErrorInfo};
use epi_core::{check_species, coordinate_tag, species_from_len, Tag};

#[test]
fn oversized_species_is_a_domain_error() {
    let err = check_species(13).unwrap_err();
    assert_eq!(err.family(), "Domain");
    assert_eq!(err.info().code, "species-range");
    assert_eq!(err.info().context["species"], "13");
    assert_eq!(err.info().context["max"], "12");
    assert!(check_species(12).is_ok());
}

#[test]
fn non_power_of_two_length_is_a_shape_error() {
    let err = species_from_len(24).unwrap_err();
    assert!(matches!(err, EpiError::Shape(_)));
    assert_eq!(err.info().context["len"], "24");
    assert_eq!(species_from_len(32).unwrap(), 5);
}

#[test]
fn singleton_mask_names_the_mask() {
    let err = coordinate_tag(4, 3, "ABC").unwrap_err();
    assert!(matches!(err, EpiError::Domain(_)));
    assert!(err.to_string().starts_with("domain: ["));
}

#[test]
fn malformed_tag_reports_its_text() {
    let err = "v_ABC".parse::<Tag>().unwrap_err();
    assert_eq!(err.info().code, "malformed-tag");
    assert_eq!(err.info().context["tag"], "v_ABC");
}

#[test]
fn length_mismatch_carries_sizes() {
    let err = EpiError::length_mismatch("fitness-length", "fitness vector", 32, 31);
    assert_eq!(err.family(), "Shape");
    assert_eq!(err.info().context["expected"], "32");
    assert_eq!(err.info().context["actual"], "31");
}

#[test]
fn display_lists_context_then_hint() {
    let err = EpiError::Domain(
        ErrorInfo::new("projection-base", "base out of range")
            .with_context("base", "11")
            .with_context("max", "10")
            .with_hint("fixed values must be single digits"),
    );
    assert_eq!(
        err.to_string(),
        "domain: [projection-base] base out of range (base=11, max=10); fixed values must be single digits"
    );
    let bare = EpiError::Arithmetic(ErrorInfo::new("inexact-halving", "odd coefficient"));
    assert_eq!(bare.to_string(), "arithmetic: [inexact-halving] odd coefficient");
}

#[test]
fn errors_roundtrip_through_json() {
    let err = EpiError::Serde(ErrorInfo::new("report-deserialize", "truncated input"));
    let json = serde_json::to_string(&err).unwrap();
    assert!(json.contains("\"family\":\"Serde\""));
    assert!(!json.contains("hint"));
    let restored: EpiError = serde_json::from_str(&json).unwrap();
    assert_eq!(err, restored);
}
