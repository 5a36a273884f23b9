use keygate_model::{Feature, License, LicenseBuilder, NEVER_EXPIRES, UNLIMITED_LICENSES};
use pretty_assertions::assert_eq;

fn sample() -> License {
    LicenseBuilder::new()
        .product_key("PK-1234")
        .holder("Acme Corporation")
        .issuer("Keygate")
        .subject("widget-pro")
        .issue_date(1_700_000_000_000)
        .good_after_date(1_700_000_000_000)
        .good_before_date(1_800_000_000_000)
        .number_of_licenses(25)
        .feature(Feature::new("PRO", 1_750_000_000_000))
        .feature(Feature::never_expiring("BASIC"))
        .build()
}

#[test]
fn serialize_deserialize_roundtrip() {
    let license = sample();
    let restored = License::deserialize(&license.serialize()).unwrap();
    assert_eq!(restored, license);
    // Expiry must survive exactly even though Feature equality ignores it.
    assert_eq!(
        restored.feature("PRO").unwrap().good_before_date(),
        1_750_000_000_000
    );
    assert!(restored.feature("BASIC").unwrap().never_expires());
}

#[test]
fn wire_rendering_is_stable() {
    let license = LicenseBuilder::new()
        .product_key("pk")
        .holder("h")
        .issuer("i")
        .subject("s")
        .issue_date(5)
        .good_after_date(6)
        .good_before_date(7)
        .number_of_licenses(8)
        .feature(Feature::new("F", 9))
        .build();
    assert_eq!(license.to_string(), "[pk][h][i][s][5][6][7][8][[F\u{1F}9]]");
}

#[test]
fn empty_license_roundtrip() {
    let license = LicenseBuilder::new().issue_date(0).build();
    assert_eq!(
        license.to_string(),
        format!("[][][][][0][0][0][{}][[]]", UNLIMITED_LICENSES)
    );
    let restored = License::deserialize(&license.serialize()).unwrap();
    assert_eq!(restored, license);
    assert!(restored.features().is_empty());
}

#[test]
fn feature_lookup_respects_expiry() {
    let license = sample();
    assert!(license.has_license_for_feature("PRO", 1_749_999_999_999));
    assert!(!license.has_license_for_feature("PRO", 1_750_000_000_001));
    // Never-expiring feature is valid at any query time.
    assert!(license.has_license_for_feature("BASIC", i64::MAX));
    assert!(!license.has_license_for_feature("MISSING", 0));
}

#[test]
fn any_and_all_feature_queries() {
    let license = sample();
    let t = 1_700_000_000_000;
    assert!(license.has_license_for_any_feature(&["MISSING", "BASIC"], t));
    assert!(!license.has_license_for_any_feature(&["MISSING", "ABSENT"], t));
    assert!(license.has_license_for_all_features(&["PRO", "BASIC"], t));
    assert!(!license.has_license_for_all_features(&["PRO", "MISSING"], t));
    assert!(license.has_license_for_all_features(&[], t));
}

#[test]
fn any_and_all_now_variants_use_wall_clock() {
    let license = sample();
    // BASIC never expires, so it is valid at any wall-clock time; MISSING
    // is not on the license at all.
    assert!(license.has_license_for_any_feature_now(&["MISSING", "BASIC"]));
    assert!(!license.has_license_for_any_feature_now(&["MISSING", "ABSENT"]));
    assert!(license.has_license_for_all_features_now(&["BASIC"]));
    assert!(!license.has_license_for_all_features_now(&["BASIC", "MISSING"]));
    assert!(license.has_license_for_all_features_now(&[]));
}

#[test]
fn acme_scenario() {
    let t = 1_000_000;
    let license = LicenseBuilder::new()
        .holder("Acme")
        .good_after_date(t)
        .good_before_date(t + 1000)
        .feature(Feature::never_expiring("PRO"))
        .build();

    let restored = License::deserialize(&license.serialize()).unwrap();
    assert!(restored.has_license_for_feature("PRO", t + 500));
    assert!(!restored.has_license_for_feature("MISSING", t + 2000));
}

#[test]
fn builder_replaces_feature_by_name_keeping_position() {
    let license = LicenseBuilder::new()
        .feature(Feature::new("A", 1))
        .feature(Feature::new("B", 2))
        .feature(Feature::new("A", 99))
        .build();

    let names: Vec<&str> = license.features().iter().map(|f| f.name()).collect();
    assert_eq!(names, ["A", "B"]);
    assert_eq!(license.feature("A").unwrap().good_before_date(), 99);
}

#[test]
fn builder_is_reusable_after_build() {
    let builder = LicenseBuilder::new().holder("Acme").issue_date(1);
    let first = builder.build();
    let second = builder.build();
    assert_eq!(first, second);
}

#[test]
fn builder_defaults() {
    let license = LicenseBuilder::new().build();
    assert_eq!(license.product_key(), "");
    assert_eq!(license.good_after_date(), 0);
    assert_eq!(license.good_before_date(), 0);
    assert_eq!(license.number_of_licenses(), UNLIMITED_LICENSES);
    assert!(license.issue_date() > 0);
}

#[test]
fn equality_is_feature_order_independent_but_expiry_sensitive() {
    let base = LicenseBuilder::new().issue_date(1);
    let ab = base
        .clone()
        .feature(Feature::new("A", 1))
        .feature(Feature::new("B", 2))
        .build();
    let ba = base
        .clone()
        .feature(Feature::new("B", 2))
        .feature(Feature::new("A", 1))
        .build();
    let different_expiry = base
        .clone()
        .feature(Feature::new("A", 7))
        .feature(Feature::new("B", 2))
        .build();

    assert_eq!(ab, ba);
    assert_ne!(ab, different_expiry);
}

#[test]
fn clone_is_deep() {
    let license = sample();
    let copy = license.clone();
    assert_eq!(copy, license);
    assert_eq!(copy.serialize(), license.serialize());
}

#[test]
fn hash_agrees_with_equality() {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let hash = |license: &License| {
        let mut hasher = DefaultHasher::new();
        license.hash(&mut hasher);
        hasher.finish()
    };

    let base = LicenseBuilder::new().issue_date(1);
    let ab = base
        .clone()
        .feature(Feature::new("A", 1))
        .feature(Feature::new("B", 2))
        .build();
    let ba = base
        .clone()
        .feature(Feature::new("B", 2))
        .feature(Feature::new("A", 1))
        .build();
    assert_eq!(hash(&ab), hash(&ba));
}
