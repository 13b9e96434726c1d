//! Label interpretation for the two detection models

use crate::constants::{MEDIUM_WEIGHT, STRONG_WEIGHT, WEAK_WEIGHT};
use log::warn;
use serde::{Deserialize, Serialize};

/// How a model's class labels are read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelScheme {
    /// Labels carry the number of hairs in a follicular unit ("1", "class2", ...)
    #[default]
    HairCount,
    /// Labels name a shaft caliber ("weak", "medium", "strong")
    Thickness,
}

impl LabelScheme {
    /// Suppression priority of a label. Higher classes win overlaps.
    ///
    /// Unparseable hair-count labels degrade to priority 0; thickness labels
    /// are always 0.
    pub fn priority(&self, label: &str) -> u32 {
        match self {
            LabelScheme::HairCount => parse_class_number(label).unwrap_or_else(|| {
                warn!("unparseable density label {:?}, using priority 0", label);
                0
            }),
            LabelScheme::Thickness => 0,
        }
    }

    /// Overlay colour the annotation renderer uses for a label (RGB).
    pub fn annotation_color(&self, label: &str) -> (u8, u8, u8) {
        match self {
            LabelScheme::HairCount => match parse_class_number(label) {
                Some(1) => (0, 0, 255),
                Some(2) => (255, 255, 255),
                _ => NEUTRAL_COLOR,
            },
            LabelScheme::Thickness => match ThicknessClass::from_label(label) {
                Some(ThicknessClass::Weak) => (255, 0, 0),
                Some(ThicknessClass::Medium) => (255, 255, 0),
                Some(ThicknessClass::Strong) => (0, 255, 0),
                None => NEUTRAL_COLOR,
            },
        }
    }
}

const NEUTRAL_COLOR: (u8, u8, u8) = (128, 128, 128);

/// Extract the class number from `"3"` or `"class3"`.
pub fn parse_class_number(label: &str) -> Option<u32> {
    let trimmed = label.trim();
    let digits = trimmed.strip_prefix("class").unwrap_or(trimmed);
    digits.trim().parse::<u32>().ok()
}

/// Hairs per follicular unit encoded in a density label, at least 1.
pub fn hair_count(label: &str) -> u32 {
    match parse_class_number(label) {
        Some(count) if count > 0 => count,
        _ => {
            warn!("unparseable hair count in label {:?}, counting 1 hair", label);
            1
        }
    }
}

/// Caliber class of a single hair shaft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThicknessClass {
    Weak,
    Medium,
    Strong,
}

impl ThicknessClass {
    /// Case-insensitive match on the thickness model's label vocabulary.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("strong") {
            Some(ThicknessClass::Strong)
        } else if label.eq_ignore_ascii_case("medium") {
            Some(ThicknessClass::Medium)
        } else if label.eq_ignore_ascii_case("weak") {
            Some(ThicknessClass::Weak)
        } else {
            None
        }
    }

    /// Contribution of one shaft to the hair caliber index.
    pub fn weight(&self) -> f64 {
        match self {
            ThicknessClass::Strong => STRONG_WEIGHT,
            ThicknessClass::Medium => MEDIUM_WEIGHT,
            ThicknessClass::Weak => WEAK_WEIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_class_number() {
        assert_eq!(parse_class_number("3"), Some(3));
        assert_eq!(parse_class_number("class3"), Some(3));
        assert_eq!(parse_class_number(" 2 "), Some(2));
        assert_eq!(parse_class_number("weak"), None);
        assert_eq!(parse_class_number("class"), None);
        assert_eq!(parse_class_number("-1"), None);
    }

    #[test]
    fn test_priority_by_scheme() {
        assert_eq!(LabelScheme::HairCount.priority("class4"), 4);
        assert_eq!(LabelScheme::HairCount.priority("bogus"), 0);
        assert_eq!(LabelScheme::Thickness.priority("strong"), 0);
        assert_eq!(LabelScheme::Thickness.priority("3"), 0);
    }

    #[test]
    fn test_hair_count_defaults_to_one() {
        assert_eq!(hair_count("2"), 2);
        assert_eq!(hair_count("class3"), 3);
        assert_eq!(hair_count("unknown"), 1);
        assert_eq!(hair_count("0"), 1);
    }

    #[test]
    fn test_thickness_labels() {
        assert_eq!(ThicknessClass::from_label("Strong"), Some(ThicknessClass::Strong));
        assert_eq!(ThicknessClass::from_label("weak"), Some(ThicknessClass::Weak));
        assert_eq!(ThicknessClass::from_label("thin"), None);
        assert_eq!(ThicknessClass::Medium.weight(), 1.5);
    }

    #[test]
    fn test_annotation_colors() {
        assert_eq!(LabelScheme::HairCount.annotation_color("1"), (0, 0, 255));
        assert_eq!(LabelScheme::HairCount.annotation_color("2"), (255, 255, 255));
        assert_eq!(LabelScheme::Thickness.annotation_color("weak"), (255, 0, 0));
        assert_eq!(LabelScheme::Thickness.annotation_color("medium"), (255, 255, 0));
        assert_eq!(LabelScheme::Thickness.annotation_color("strong"), (0, 255, 0));
        assert_eq!(LabelScheme::Thickness.annotation_color("other"), (128, 128, 128));
    }
}
