use serde::{Deserialize, Serialize};

/// Target column of the labeled dataset. The server trains against it; the
/// client only documents it.
pub const TARGET_COLUMN: &str = "class";

/// The six categorical inputs of a car evaluation, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Buying,
    Maint,
    Doors,
    Persons,
    LugBoot,
    Safety,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::Buying,
        Feature::Maint,
        Feature::Doors,
        Feature::Persons,
        Feature::LugBoot,
        Feature::Safety,
    ];

    /// Wire/CSV column name.
    pub fn name(self) -> &'static str {
        match self {
            Feature::Buying => "buying",
            Feature::Maint => "maint",
            Feature::Doors => "doors",
            Feature::Persons => "persons",
            Feature::LugBoot => "lug_boot",
            Feature::Safety => "safety",
        }
    }

    pub fn parse(name: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Legal values for this feature, in display order. Fixed for the
    /// lifetime of the process; there is no way to extend a domain.
    pub fn domain(self) -> &'static [&'static str] {
        match self {
            Feature::Buying | Feature::Maint => &["vhigh", "high", "med", "low"],
            Feature::Doors => &["2", "3", "4", "5more"],
            Feature::Persons => &["2", "4", "more"],
            Feature::LugBoot => &["small", "med", "big"],
            Feature::Safety => &["low", "med", "high"],
        }
    }

    pub fn admits(self, value: &str) -> bool {
        self.domain().contains(&value)
    }

    /// Initial form selection for this feature.
    pub fn default_value(self) -> &'static str {
        match self {
            Feature::Buying | Feature::Maint | Feature::LugBoot => "med",
            Feature::Doors | Feature::Persons => "4",
            Feature::Safety => "high",
        }
    }
}

/// The closed set of acceptability classes the model predicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassLabel {
    Unacc,
    Acc,
    Good,
    Vgood,
}

impl ClassLabel {
    pub const ALL: [ClassLabel; 4] = [
        ClassLabel::Unacc,
        ClassLabel::Acc,
        ClassLabel::Good,
        ClassLabel::Vgood,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ClassLabel::Unacc => "unacc",
            ClassLabel::Acc => "acc",
            ClassLabel::Good => "good",
            ClassLabel::Vgood => "vgood",
        }
    }

    pub fn parse(label: &str) -> Option<ClassLabel> {
        ClassLabel::ALL.into_iter().find(|c| c.as_str() == label)
    }
}

/// Coarse severity grouping of a class label for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Bad,
    Good,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_feature_has_a_domain_legal_default() {
        for feature in Feature::ALL {
            assert!(
                feature.admits(feature.default_value()),
                "default for {} is outside its domain",
                feature.name()
            );
        }
    }

    #[test]
    fn domains_match_the_dataset_dictionary() {
        assert_eq!(
            Feature::Buying.domain(),
            &["vhigh", "high", "med", "low"]
        );
        assert_eq!(Feature::Buying.domain(), Feature::Maint.domain());
        assert_eq!(Feature::Doors.domain(), &["2", "3", "4", "5more"]);
        assert_eq!(Feature::Persons.domain(), &["2", "4", "more"]);
        assert_eq!(Feature::LugBoot.domain(), &["small", "med", "big"]);
        assert_eq!(Feature::Safety.domain(), &["low", "med", "high"]);
    }

    #[test]
    fn feature_names_round_trip_through_parse() {
        for feature in Feature::ALL {
            assert_eq!(Feature::parse(feature.name()), Some(feature));
        }
        assert_eq!(Feature::parse("colour"), None);
    }

    #[test]
    fn class_labels_parse_only_the_closed_set() {
        assert_eq!(ClassLabel::parse("unacc"), Some(ClassLabel::Unacc));
        assert_eq!(ClassLabel::parse("vgood"), Some(ClassLabel::Vgood));
        assert_eq!(ClassLabel::parse("excellent"), None);
        assert_eq!(ClassLabel::parse("UNACC"), None);
    }
}
