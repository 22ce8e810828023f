use shared::domain::{ClassLabel, Tier};

/// Rendered verdict for one prediction. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayResult {
    pub text: String,
    pub tier: Tier,
}

/// Maps a predicted label to display text and a severity tier. Labels
/// outside the known set are shown verbatim rather than rejected; the tier
/// rule is simply Bad iff the label is `unacc`.
pub fn present(label: &str) -> DisplayResult {
    let text = match ClassLabel::parse(label) {
        Some(ClassLabel::Unacc) => "This car is UNACCEPTABLE".to_string(),
        Some(ClassLabel::Acc) => "This car is ACCEPTABLE".to_string(),
        Some(ClassLabel::Good) => "This car is GOOD".to_string(),
        Some(ClassLabel::Vgood) => "This car is VERY GOOD".to_string(),
        None => label.to_string(),
    };
    let tier = if label == ClassLabel::Unacc.as_str() {
        Tier::Bad
    } else {
        Tier::Good
    };
    DisplayResult { text, tier }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_render_their_verdict_text() {
        assert_eq!(present("unacc").text, "This car is UNACCEPTABLE");
        assert_eq!(present("acc").text, "This car is ACCEPTABLE");
        assert_eq!(present("good").text, "This car is GOOD");
        assert_eq!(present("vgood").text, "This car is VERY GOOD");
    }

    #[test]
    fn tier_is_bad_only_for_unacc() {
        assert_eq!(present("unacc").tier, Tier::Bad);
        for label in ["acc", "good", "vgood", "mystery", ""] {
            assert_eq!(present(label).tier, Tier::Good, "label {label:?}");
        }
    }

    #[test]
    fn unknown_labels_are_shown_verbatim() {
        let result = present("probably fine");
        assert_eq!(result.text, "probably fine");
        assert_eq!(result.tier, Tier::Good);
    }
}
