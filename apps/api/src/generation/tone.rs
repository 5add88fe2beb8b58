//! Tone directives: the fixed set of register instructions a user can pick
//! for the cover letter. Only selection is user-controlled; the instruction
//! text itself is not editable.

use serde::{Deserialize, Serialize};

/// One of the four selectable cover-letter tones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneDirective {
    #[default]
    ProfessionalConfident,
    EnthusiasticEnergetic,
    FormalTraditional,
    FriendlyApproachable,
}

impl ToneDirective {
    /// All tones in display order.
    pub const ALL: [ToneDirective; 4] = [
        ToneDirective::ProfessionalConfident,
        ToneDirective::EnthusiasticEnergetic,
        ToneDirective::FormalTraditional,
        ToneDirective::FriendlyApproachable,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ToneDirective::ProfessionalConfident => "Professional and Confident",
            ToneDirective::EnthusiasticEnergetic => "Enthusiastic and Energetic",
            ToneDirective::FormalTraditional => "Formal and Traditional",
            ToneDirective::FriendlyApproachable => "Friendly and Approachable",
        }
    }

    /// The instruction string substituted into the cover-letter prompt.
    pub fn instruction(&self) -> &'static str {
        match self {
            ToneDirective::ProfessionalConfident => {
                "Write in a professional, confident tone that demonstrates expertise and \
                 leadership qualities. Show authority in your field while remaining respectful."
            }
            ToneDirective::EnthusiasticEnergetic => {
                "Write with enthusiasm and energy, showing genuine excitement about the \
                 opportunity. Use dynamic language that conveys passion and motivation."
            }
            ToneDirective::FormalTraditional => {
                "Write in a formal, traditional business tone. Use conservative language \
                 appropriate for established, corporate environments."
            }
            ToneDirective::FriendlyApproachable => {
                "Write in a warm, friendly tone that shows personality while maintaining \
                 professionalism. Demonstrate cultural fit and collaborative spirit."
            }
        }
    }
}

/// Wire shape for `GET /api/v1/tones`.
#[derive(Debug, Clone, Serialize)]
pub struct ToneOption {
    pub id: ToneDirective,
    pub label: &'static str,
    pub instruction: &'static str,
}

pub fn tone_options() -> Vec<ToneOption> {
    ToneDirective::ALL
        .iter()
        .map(|t| ToneOption {
            id: *t,
            label: t.label(),
            instruction: t.instruction(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tone_is_professional() {
        assert_eq!(ToneDirective::default(), ToneDirective::ProfessionalConfident);
    }

    #[test]
    fn test_exactly_four_options() {
        assert_eq!(tone_options().len(), 4);
    }

    #[test]
    fn test_tone_serde_snake_case() {
        let tone: ToneDirective = serde_json::from_str(r#""formal_traditional""#).unwrap();
        assert_eq!(tone, ToneDirective::FormalTraditional);
        assert_eq!(
            serde_json::to_string(&ToneDirective::FriendlyApproachable).unwrap(),
            r#""friendly_approachable""#
        );
    }

    #[test]
    fn test_unknown_tone_rejected() {
        assert!(serde_json::from_str::<ToneDirective>(r#""sarcastic""#).is_err());
    }

    #[test]
    fn test_instructions_are_distinct_and_single_spaced() {
        let mut seen = std::collections::HashSet::new();
        for tone in ToneDirective::ALL {
            let text = tone.instruction();
            assert!(seen.insert(text), "duplicate instruction for {tone:?}");
            assert!(!text.contains("  "), "line continuation left double space in {tone:?}");
        }
    }

    #[test]
    fn test_enthusiastic_mentions_enthusiasm() {
        assert!(ToneDirective::EnthusiasticEnergetic
            .instruction()
            .contains("enthusiasm"));
    }
}
