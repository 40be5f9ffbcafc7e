use aphrodite::western::{
    get_sign_ruler, get_sign_ruler_from_longitude, signs_ruled_by, DignitiesService, DignityType,
};
use aphrodite::{Planet, Sign};

#[test]
fn test_modern_and_traditional_rulers_differ_on_outer_signs() {
    assert_eq!(get_sign_ruler(Sign::Scorpio, false), Planet::Mars);
    assert_eq!(get_sign_ruler(Sign::Scorpio, true), Planet::Pluto);
    assert_eq!(get_sign_ruler(Sign::Aquarius, true), Planet::Uranus);
    assert_eq!(get_sign_ruler(Sign::Pisces, true), Planet::Neptune);
    assert_eq!(get_sign_ruler(Sign::Leo, true), Planet::Sun);
}

#[test]
fn test_ruler_from_longitude() {
    // 135 degrees is mid-Leo
    assert_eq!(get_sign_ruler_from_longitude(135.0, false), Planet::Sun);
    assert_eq!(get_sign_ruler_from_longitude(359.9, false), Planet::Jupiter);
}

#[test]
fn test_signs_ruled_by() {
    assert_eq!(signs_ruled_by(Planet::Venus, false), vec![Sign::Taurus, Sign::Libra]);
    assert_eq!(signs_ruled_by(Planet::Mars, true), vec![Sign::Aries]);
    assert!(signs_ruled_by(Planet::Chiron, true).is_empty());
}

#[test]
fn test_every_sign_ruler_is_in_rulership() {
    let service = DignitiesService;
    for sign in Sign::ALL {
        let ruler = get_sign_ruler(sign, false);
        assert_eq!(
            service.primary_dignity(ruler, sign),
            DignityType::Rulership,
            "{} in {}",
            ruler,
            sign
        );
    }
}

#[test]
fn test_debilities_and_peregrine() {
    let service = DignitiesService;
    assert_eq!(service.primary_dignity(Planet::Sun, Sign::Aquarius), DignityType::Detriment);
    assert_eq!(service.primary_dignity(Planet::Saturn, Sign::Aries), DignityType::Fall);
    assert_eq!(service.primary_dignity(Planet::Venus, Sign::Gemini), DignityType::Peregrine);
    assert_eq!(service.primary_dignity(Planet::Ceres, Sign::Virgo), DignityType::Peregrine);
}
