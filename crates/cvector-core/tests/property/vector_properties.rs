use cvector_core::{spin, CorrelationVector, VectorFactory, Version};
use proptest::prelude::*;

/// A V1 base: 16 characters from the standard base64 alphabet.
fn v1_base() -> impl Strategy<Value = String> {
    "[A-Za-z0-9+/]{16}"
}

/// A well-formed V1 value with one to four extension segments.
fn v1_vector() -> impl Strategy<Value = String> {
    (v1_base(), prop::collection::vec(0u32..100_000, 1..4)).prop_map(|(base, extensions)| {
        let mut value = base;
        for extension in extensions {
            value.push('.');
            value.push_str(&extension.to_string());
        }
        value
    })
}

proptest! {
    #[test]
    fn parse_round_trips_extend(input in v1_vector(), bumps in 0usize..20) {
        let extended = CorrelationVector::extend(&input).unwrap();
        prop_assert!(extended.is_clean());
        let extended = extended.into_value();
        for _ in 0..bumps {
            extended.increment();
        }

        let parsed = CorrelationVector::parse(&extended.value()).unwrap().into_value();
        prop_assert_eq!(parsed.base(), extended.base());
        prop_assert_eq!(parsed.extension(), extended.extension());
        prop_assert_eq!(parsed.version(), Version::V1);
    }

    #[test]
    fn sequential_increments_count_up(input in v1_vector(), count in 1u32..200) {
        let cv = CorrelationVector::extend(&input).unwrap().into_value();
        for expected in 1..=count {
            let value = cv.increment();
            if cv.is_immutable() {
                break;
            }
            prop_assert_eq!(value, format!("{}.{}", input, expected));
        }
    }

    #[test]
    fn rendered_length_stays_under_ceiling(
        segments in prop::collection::vec(any::<u64>(), 1..5),
        count in 0usize..1200,
    ) {
        let mut input = "tul4NUsfs9Cl7mOf".to_string();
        for segment in segments {
            input.push('.');
            input.push_str(&segment.to_string());
        }

        let cv = CorrelationVector::extend(&input).unwrap().into_value();
        for _ in 0..count {
            cv.increment();
        }

        let value = cv.value();
        if input.len() + 2 > 63 {
            // No room for a new ".0" level: frozen exactly as received.
            prop_assert_eq!(&value, &format!("{input}!"));
        } else {
            let body = value.strip_suffix('!').unwrap_or(&value);
            prop_assert!(body.len() <= 63, "{} is {} bytes", value, body.len());
        }
        prop_assert_eq!(cv.is_immutable(), value.ends_with('!'));
    }

    #[test]
    fn terminated_values_never_change(input in v1_vector()) {
        let terminated = format!("{input}!");
        let cv = CorrelationVector::parse(&terminated).unwrap().into_value();
        prop_assert_eq!(cv.increment(), terminated.clone());
        prop_assert_eq!(CorrelationVector::extend(&terminated).unwrap().into_value().value(), terminated.clone());
        prop_assert_eq!(spin(&terminated).unwrap().into_value().value(), terminated);
    }

    #[test]
    fn strict_extend_accepts_generated_vectors(input in v1_vector()) {
        let outcome = VectorFactory::strict().extend(&input).unwrap();
        prop_assert!(outcome.is_clean());
        prop_assert_eq!(outcome.value.value(), format!("{input}.0"));
    }
}
