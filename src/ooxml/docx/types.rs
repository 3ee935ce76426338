/// Primitive value types of the document model.
///
/// WordprocessingML distinguishes an absent attribute from one that is
/// present with an empty or default value. Every optional value in the model
/// is an `Option`, and the types here keep the literal form of values that
/// have several spellings.
use std::collections::BTreeSet;

/// On/off value as written in the markup.
///
/// The literal token is kept so that a decoded `w:val="on"` is written back
/// as `on` rather than normalized to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OnOff {
    True,
    False,
    On,
    Off,
    /// `1`
    One,
    /// `0`
    Zero,
}

impl OnOff {
    /// Convert to the XML token.
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::True => "true",
            Self::False => "false",
            Self::On => "on",
            Self::Off => "off",
            Self::One => "1",
            Self::Zero => "0",
        }
    }

    /// Parse from an XML token.
    ///
    /// Returns `None` if the value is not recognized.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "true" => Some(Self::True),
            "false" => Some(Self::False),
            "on" => Some(Self::On),
            "off" => Some(Self::Off),
            "1" => Some(Self::One),
            "0" => Some(Self::Zero),
            _ => None,
        }
    }

    /// The canonical token for a boolean.
    #[inline]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }

    #[inline]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::True | Self::On | Self::One)
    }
}

/// An on/off element such as `<w:b/>` or `<w:b w:val="0"/>`.
///
/// A missing `w:val` means "on".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Toggle {
    pub val: Option<OnOff>,
}

impl Toggle {
    /// `<x/>`
    #[inline]
    pub const fn on() -> Self {
        Self { val: None }
    }

    /// `<x/>` for true, `<x w:val="false"/>` for false.
    #[inline]
    pub const fn from_bool(value: bool) -> Self {
        if value {
            Self::on()
        } else {
            Self {
                val: Some(OnOff::False),
            }
        }
    }

    #[inline]
    pub const fn is_on(self) -> bool {
        match self.val {
            Some(val) => val.is_on(),
            None => true,
        }
    }
}

/// Parse an `ST_DecimalNumber` style integer.
#[inline]
pub(crate) fn parse_decimal(s: &str) -> Option<i64> {
    atoi_simd::parse::<i64, false, false>(s.trim().as_bytes()).ok()
}

/// Numeric ids that must stay unique within the part (`w:id` of content
/// controls, `wp:docPr` ids).
///
/// New ids continue after the highest one seen. Once that runs past
/// `i64::MAX` the lowest free positive id is handed out instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct IdCounter {
    last: i64,
    used: BTreeSet<i64>,
}

impl IdCounter {
    /// Record an id present in the markup.
    pub(crate) fn observe(&mut self, id: i64) {
        self.last = self.last.max(id);
        self.used.insert(id);
    }

    /// Mint an id not seen or minted before.
    pub(crate) fn next(&mut self) -> i64 {
        let id = match self.last.checked_add(1) {
            Some(id) => {
                self.last = id;
                id
            },
            None => {
                let id = self.lowest_free();
                log::debug!("id counter exhausted, reusing free id {}", id);
                id
            },
        };
        self.used.insert(id);
        id
    }

    fn lowest_free(&self) -> i64 {
        let mut candidate = 1;
        for &id in self.used.range(1..) {
            if id != candidate {
                break;
            }
            candidate = candidate.saturating_add(1);
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_off_keeps_literal_token() {
        for token in ["true", "false", "on", "off", "1", "0"] {
            assert_eq!(OnOff::from_xml(token).map(OnOff::to_xml), Some(token));
        }
        assert_eq!(OnOff::from_xml("yes"), None);
        assert!(OnOff::On.is_on());
        assert!(!OnOff::Zero.is_on());
    }

    #[test]
    fn test_toggle_without_value_is_on() {
        assert!(Toggle::on().is_on());
        assert!(Toggle::default().is_on());
        assert!(!Toggle::from_bool(false).is_on());
        assert!(
            Toggle {
                val: Some(OnOff::One)
            }
            .is_on()
        );
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("1440"), Some(1440));
        assert_eq!(parse_decimal("-720"), Some(-720));
        assert_eq!(parse_decimal("12pt"), None);
        assert_eq!(parse_decimal(""), None);
    }

    #[test]
    fn test_id_counter_continues_after_highest() {
        let mut ids = IdCounter::default();
        assert_eq!(ids.next(), 1);
        ids.observe(-1_234_567);
        ids.observe(40);
        assert_eq!(ids.next(), 41);
        assert_eq!(ids.next(), 42);
    }

    #[test]
    fn test_id_counter_at_maximum_reuses_free_ids() {
        let mut ids = IdCounter::default();
        ids.observe(1);
        ids.observe(2);
        ids.observe(4);
        ids.observe(i64::MAX);
        assert_eq!(ids.next(), 3);
        assert_eq!(ids.next(), 5);
        assert_eq!(ids.next(), 6);
    }
}
