//! Fixed catalog of 3-D Secure test cards.
//!
//! Two families: frictionless cards authenticate without user interaction,
//! challenge cards force the interactive challenge UI. The `custom`
//! sentinel leaves the card fields editable.

/// A named test-card preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestCard {
    /// Stable raw value used for persistence.
    pub raw_value: &'static str,
    /// Human-readable name.
    pub display_name: &'static str,
    /// Primary account number.
    pub number: &'static str,
    /// Expiration date in `MM/YY` form.
    pub expiration_date: &'static str,
    /// Card verification value.
    pub cvv: &'static str,
}

impl TestCard {
    /// Whether this is the `custom` sentinel.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.raw_value == CUSTOM.raw_value
    }
}

/// Sentinel entry: no preset values, fields stay editable.
pub const CUSTOM: TestCard = TestCard {
    raw_value: "custom",
    display_name: "Custom",
    number: "",
    expiration_date: "",
    cvv: "",
};

/// The full catalog, `custom` first.
pub const TEST_CARDS: &[TestCard] = &[
    CUSTOM,
    // Frictionless
    TestCard {
        raw_value: "visaFrictionless",
        display_name: "Visa Frictionless Test Card",
        number: "4556557955726624",
        expiration_date: "01/30",
        cvv: "123",
    },
    TestCard {
        raw_value: "mastercardFrictionless",
        display_name: "Mastercard Frictionless Test Card",
        number: "5333259155643223",
        expiration_date: "01/30",
        cvv: "123",
    },
    TestCard {
        raw_value: "amexFrictionless",
        display_name: "Amex Frictionless Test Card",
        number: "341502098634895",
        expiration_date: "01/30",
        cvv: "123",
    },
    TestCard {
        raw_value: "dinersFrictionless",
        display_name: "Diners Frictionless Test Card",
        number: "36000000000008",
        expiration_date: "01/30",
        cvv: "123",
    },
    TestCard {
        raw_value: "jcbFrictionless",
        display_name: "JCB Frictionless Test Card",
        number: "3528000000000056",
        expiration_date: "01/30",
        cvv: "123",
    },
    // Challenge
    TestCard {
        raw_value: "visaChallenge",
        display_name: "Visa Challenge Test Card",
        number: "4024007189449340",
        expiration_date: "01/30",
        cvv: "456",
    },
    TestCard {
        raw_value: "mastercardChallenge",
        display_name: "Mastercard Challenge Test Card",
        number: "5267648608924299",
        expiration_date: "01/30",
        cvv: "456",
    },
    TestCard {
        raw_value: "amexChallenge",
        display_name: "Amex Challenge Test Card",
        number: "349531373081938",
        expiration_date: "01/30",
        cvv: "456",
    },
    TestCard {
        raw_value: "dinersChallenge",
        display_name: "Diners Challenge Test Card",
        number: "36000002000048",
        expiration_date: "01/30",
        cvv: "456",
    },
    TestCard {
        raw_value: "jcbChallenge",
        display_name: "JCB Challenge Test Card",
        number: "3528000000000148",
        expiration_date: "01/30",
        cvv: "456",
    },
];

/// Looks up a preset by raw value, falling back to [`CUSTOM`] for anything
/// unknown. Unknown persisted values must never fail.
#[must_use]
pub fn from_raw(value: &str) -> &'static TestCard {
    TEST_CARDS
        .iter()
        .find(|card| card.raw_value == value)
        .unwrap_or(&CUSTOM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_resolves_known_cards() {
        let card = from_raw("visaChallenge");
        assert_eq!(card.number, "4024007189449340");
        assert_eq!(card.cvv, "456");
        assert!(!card.is_custom());
    }

    #[test]
    fn test_from_raw_falls_back_to_custom() {
        assert!(from_raw("").is_custom());
        assert!(from_raw("not-a-card").is_custom());
    }

    #[test]
    fn test_catalog_raw_values_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for card in TEST_CARDS {
            assert!(seen.insert(card.raw_value), "duplicate {}", card.raw_value);
        }
    }

    #[test]
    fn test_non_custom_cards_are_fully_populated() {
        for card in TEST_CARDS.iter().filter(|c| !c.is_custom()) {
            assert!(!card.number.is_empty());
            assert_eq!(card.expiration_date, "01/30");
            assert!(!card.cvv.is_empty());
        }
    }
}
