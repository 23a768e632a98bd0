use crate::graphemes::{GraphemeRule, RuleKind};
use crate::unicode::HAL_KIRIMA;

/// Builds Sinhala output one unit at a time, tracking whether the last
/// consonant still needs a vowel sign or hal kirima.
#[derive(Default)]
pub(crate) struct Renderer {
    out: String,
    pending_consonant: bool,
}

impl Renderer {
    pub(crate) fn push_rule(&mut self, rule: &GraphemeRule) {
        match &rule.kind {
            RuleKind::Consonant => {
                self.close_consonant();
                self.out.push_str(&rule.output);
                self.pending_consonant = true;
            }
            // attaches to the consonant, which still takes the vowel
            RuleKind::Medial => {
                self.out.push_str(&rule.output);
                self.pending_consonant = true;
            }
            RuleKind::Vowel { sign } => {
                if self.pending_consonant {
                    self.out.push_str(sign);
                } else {
                    self.out.push_str(&rule.output);
                }
                self.pending_consonant = false;
            }
            RuleKind::Modifier => {
                self.out.push_str(&rule.output);
                self.pending_consonant = false;
            }
        }
    }

    /// Text copied through unchanged.
    pub(crate) fn push_raw(&mut self, text: &str) {
        self.close_consonant();
        self.out.push_str(text);
    }

    pub(crate) fn finish(mut self) -> String {
        self.close_consonant();
        self.out
    }

    fn close_consonant(&mut self) {
        if self.pending_consonant {
            self.out.push(HAL_KIRIMA);
            self.pending_consonant = false;
        }
    }
}
