use super::super::layout::Layout;
use super::*;

fn codec(width: u32, mode: Representation) -> NumeralCodec {
    NumeralCodec::new(width, mode).expect("test width should be valid")
}

fn pattern(s: &str) -> BitPattern {
    s.parse().expect("test bit string should be valid")
}

#[test]
fn test_known_patterns_width_4() {
    use Representation::*;
    let cases: &[(Representation, f64, &str)] = &[
        (Unsigned, 0.0, "0000"),
        (Unsigned, 5.0, "0101"),
        (Unsigned, 15.0, "1111"),
        (SignMagnitude, 3.0, "0011"),
        (SignMagnitude, -3.0, "1011"),
        (SignMagnitude, -7.0, "1111"),
        (SignMagnitude, -0.0, "1000"),
        (OnesComplement, -3.0, "1100"),
        (OnesComplement, -7.0, "1000"),
        (OnesComplement, -0.0, "1111"),
        (TwosComplement, -1.0, "1111"),
        (TwosComplement, -3.0, "1101"),
        (TwosComplement, -8.0, "1000"),
        (TwosComplement, 7.0, "0111"),
    ];
    for (mode, value, expected) in cases {
        let mut c = codec(4, *mode);
        let bits = c
            .encode(*value)
            .unwrap_or_else(|e| panic!("failed to encode {value} as {mode}: {e}"));
        assert_eq!(bits.to_string(), *expected, "encoding {value} as {mode}");
    }
}

#[test]
fn test_round_trip_all_modes() {
    for width in 1..=8 {
        for mode in Representation::all() {
            let mut c = codec(width, mode);
            for v in c.lower_bound()..c.upper_bound() {
                let value = v as f64;
                let bits = c.encode(value).expect("value is in range");
                assert_eq!(bits.len(), width as usize);
                let out = c.decode(&bits).expect("pattern has the right width");
                assert_eq!(
                    out, value,
                    "round trip failed for {value} in {width}-bit {mode}: {bits}"
                );
                assert_eq!(c.last_value(), Some(value));
            }
        }
    }
}

#[test]
fn test_negative_zero_in_signed_zero_modes() {
    for mode in [Representation::SignMagnitude, Representation::OnesComplement] {
        let mut c = codec(6, mode);
        let plus = c.encode(0.0).unwrap();
        let minus = c.encode(-0.0).unwrap();
        assert_ne!(plus, minus, "{mode} should have two zeroes");

        let decoded = c.decode(&minus).unwrap();
        assert_eq!(decoded, 0.0);
        assert!(decoded.is_sign_negative(), "{mode}: {minus} should decode to -0");
        assert!(c.decode(&plus).unwrap().is_sign_positive());
    }
}

#[test]
fn test_negative_zero_without_signed_zero() {
    for mode in [Representation::Unsigned, Representation::TwosComplement] {
        let mut c = codec(6, mode);
        let plus = c.encode(0.0).unwrap();
        let minus = c.encode(-0.0).unwrap();
        assert_eq!(plus, minus, "{mode} has only one zero");
        assert!(c.decode(&minus).unwrap().is_sign_positive());
    }
}

#[test]
fn test_bounds_rejection() {
    let mut cases = 0;
    for width in 1..=6 {
        for mode in Representation::all() {
            let mut c = codec(width, mode);
            let lower = c.lower_bound();
            let upper = c.upper_bound();
            for value in [lower - 1, upper] {
                let value = value as f64;
                assert_eq!(
                    c.encode(value),
                    Err(NumeralError::OutOfRange {
                        value,
                        lower,
                        upper
                    }),
                    "{width}-bit {mode} should reject {value}"
                );
                cases += 1;
            }
            assert_eq!(c.last_value(), None);
        }
    }
    assert_eq!(cases, 48);
}

#[test]
fn test_twos_complement_minimum() {
    let mut c = codec(4, Representation::TwosComplement);
    assert_eq!(c.encode(-8.0), Ok(pattern("1000")));

    let mut sm = codec(4, Representation::SignMagnitude);
    assert_eq!(sm.lower_bound(), -7);
    assert!(matches!(
        sm.encode(-8.0),
        Err(NumeralError::OutOfRange { .. })
    ));
}

#[test]
fn test_complement_relationship() {
    for mode in [Representation::OnesComplement, Representation::TwosComplement] {
        for width in 2..=8 {
            let layout = Layout::new(width, mode).unwrap();
            let complement = layout.complement_constant().expect("complement mode");
            let magnitude_bits = layout.magnitude_bits();
            for v in layout.lower_bound()..0 {
                let negative = encode_with(&layout, v as f64).unwrap();
                let positive = encode_with(&layout, (complement + v) as f64).unwrap();
                assert_eq!(
                    negative.low_bits_value(magnitude_bits),
                    positive.low_bits_value(magnitude_bits),
                    "{width}-bit {mode}: magnitude of {v} should match that of {}",
                    complement + v
                );
                assert_eq!(negative.first(), Some(true));
                assert_eq!(positive.first(), Some(false));
            }
        }
    }
}

#[test]
fn test_not_numeric() {
    let mut c = codec(6, Representation::TwosComplement);
    assert!(matches!(
        c.encode(f64::NAN),
        Err(NumeralError::NotNumeric(_))
    ));
    assert_eq!(
        c.encode(f64::INFINITY),
        Err(NumeralError::NotNumeric(f64::INFINITY))
    );
    assert_eq!(
        c.encode(f64::NEG_INFINITY),
        Err(NumeralError::NotNumeric(f64::NEG_INFINITY))
    );
    assert_eq!(c.last_value(), None);
}

#[test]
fn test_fractional_values_are_floored() {
    let mut c = codec(4, Representation::Unsigned);
    assert_eq!(c.encode(2.7), Ok(pattern("0010")));
    assert_eq!(c.last_value(), Some(2.7));
    assert_eq!(c.displayed_value(), Some(2.0));
    assert_eq!(c.encode(15.99), Ok(pattern("1111")));

    let mut t = codec(4, Representation::TwosComplement);
    assert_eq!(t.encode(-0.5), Ok(pattern("1111")));
    assert_eq!(t.displayed_value(), Some(-1.0));

    let mut s = codec(4, Representation::SignMagnitude);
    assert_eq!(s.encode(-2.5), Ok(pattern("1011")));
}

#[test]
fn test_failed_encode_keeps_last_value() {
    let mut c = codec(4, Representation::Unsigned);
    c.encode(9.0).unwrap();
    assert!(c.encode(16.0).is_err());
    assert!(c.encode(-1.0).is_err());
    assert_eq!(c.last_value(), Some(9.0));
    assert_eq!(c.current_bits(), Some(pattern("1001")));
}

#[test]
fn test_decode_width_mismatch() {
    let c = codec(6, Representation::Unsigned);
    assert_eq!(
        c.decode(&pattern("0101")),
        Err(NumeralError::WidthMismatch {
            expected: 6,
            got: 4
        })
    );
}

#[test]
fn test_set_mode_without_value() {
    let mut c = codec(4, Representation::Unsigned);
    assert_eq!(c.set_mode(Representation::TwosComplement), Ok(None));
    assert_eq!(c.mode(), Representation::TwosComplement);
    assert_eq!(c.width(), 4);
    assert_eq!(c.lower_bound(), -8);
}

#[test]
fn test_set_mode_reencodes() {
    let mut c = codec(4, Representation::Unsigned);
    c.encode(5.0).unwrap();
    assert_eq!(
        c.set_mode(Representation::OnesComplement),
        Ok(Some(pattern("0101")))
    );
    c.encode(-3.0).unwrap();
    assert_eq!(
        c.set_mode(Representation::TwosComplement),
        Ok(Some(pattern("1101")))
    );
    assert_eq!(
        c.set_mode(Representation::SignMagnitude),
        Ok(Some(pattern("1011")))
    );
    assert_eq!(c.last_value(), Some(-3.0));
}

#[test]
fn test_set_mode_rollback() {
    let mut c = codec(4, Representation::TwosComplement);
    c.encode(-8.0).unwrap();
    let before = c.clone();

    assert_eq!(
        c.set_mode(Representation::SignMagnitude),
        Err(NumeralError::OutOfRange {
            value: -8.0,
            lower: -7,
            upper: 8
        })
    );
    assert_eq!(c, before);
    assert_eq!(c.mode(), Representation::TwosComplement);
    assert_eq!(c.lower_bound(), -8);
    assert_eq!(c.last_value(), Some(-8.0));

    // A positive value which only fits without a sign bit.
    let mut u = codec(4, Representation::Unsigned);
    u.encode(12.0).unwrap();
    assert!(u.set_mode(Representation::OnesComplement).is_err());
    assert_eq!(u.mode(), Representation::Unsigned);
    assert_eq!(u.current_bits(), Some(pattern("1100")));
}

#[cfg(test)]
mod proptests {
    use super::super::super::layout::Layout;
    use super::*;
    use test_strategy::{proptest, Arbitrary};

    #[derive(Debug, Arbitrary)]
    struct InRangeValue {
        #[strategy(1..=16u32)]
        width: u32,
        mode: Representation,
        #[strategy({
            let layout = Layout::new(#width, #mode).unwrap();
            layout.lower_bound()..layout.upper_bound()
        })]
        integral: i64,
        #[strategy(0.0..1.0f64)]
        fraction: f64,
    }

    #[proptest]
    fn decode_inverts_encode(input: InRangeValue) {
        let mut c = NumeralCodec::new(input.width, input.mode).unwrap();
        let bits = c.encode(input.integral as f64).unwrap();
        assert_eq!(c.decode(&bits), Ok(input.integral as f64));
    }

    #[proptest]
    fn fractional_part_is_discarded(input: InRangeValue) {
        let mut c = NumeralCodec::new(input.width, input.mode).unwrap();
        let whole = c.encode(input.integral as f64).unwrap();
        let value = input.integral as f64 + input.fraction;
        if value < c.upper_bound() as f64 {
            assert_eq!(c.encode(value), Ok(whole));
        }
    }
}
