//! Scoring a guess against the hidden target.
//!
//! Seven checks run in a fixed order. Each contributes one report line made
//! of a colored square, a bold label and the guess's value for that
//! attribute. The guess is fully correct only when all seven match.

use std::cmp::Ordering;
use std::fmt;

use crate::evolution;
use crate::record::PokeRecord;

/// Appended to the name line while the target's name carries a form suffix.
const FORM_NAME_HINT: &str = " (Current Pokemon's name have gender or forms in name) ";

/// Number of attribute checks in a comparison.
pub const CHECK_COUNT: usize = 7;

/// Outcome of a single attribute check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Match,
    Partial,
    Miss,
}

impl Verdict {
    fn binary(equal: bool) -> Self {
        if equal {
            Self::Match
        } else {
            Self::Miss
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Match => ":green_square:",
            Self::Partial => ":yellow_square:",
            Self::Miss => ":red_square:",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Name,
    Types,
    Color,
    EggGroups,
    EvolutionStage,
    Habitat,
    Generation,
}

impl Attribute {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "**Name**: ",
            Self::Types => "**Type(s)**: ",
            Self::Color => "**Main Color**: ",
            Self::EggGroups => "**Egg groups**: ",
            Self::EvolutionStage => "**Evolution stage**:\t\t",
            Self::Habitat => "**Habitat**:\t\t",
            Self::Generation => "**Generation**: ",
        }
    }
}

/// One rendered check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckLine {
    pub attribute: Attribute,
    pub verdict: Verdict,
    /// The guess's value as displayed.
    pub shown: String,
}

impl fmt::Display for CheckLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.verdict.glyph(),
            self.attribute.label(),
            self.shown
        )
    }
}

/// Result of [`compare`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub all_correct: bool,
    pub lines: Vec<CheckLine>,
}

impl Comparison {
    /// The report text, one `\n`-terminated line per check.
    pub fn report(&self) -> String {
        self.lines.iter().map(|line| format!("{}\n", line)).collect()
    }

    pub fn verdict(&self, attribute: Attribute) -> Option<Verdict> {
        self.lines
            .iter()
            .find(|line| line.attribute == attribute)
            .map(|line| line.verdict)
    }
}

/// Score `guess` against `target`.
pub fn compare(target: &PokeRecord, guess: &PokeRecord) -> Comparison {
    let mut name_shown = guess.name.clone();
    if target.name.contains('-') {
        name_shown.push_str(FORM_NAME_HINT);
    }

    let target_stage = stage_or_zero(target);
    let guess_stage = stage_or_zero(guess);

    let lines = vec![
        CheckLine {
            attribute: Attribute::Name,
            verdict: Verdict::binary(target.name == guess.name),
            shown: name_shown,
        },
        CheckLine {
            attribute: Attribute::Types,
            verdict: type_verdict(&target.types, &guess.types),
            shown: guess.types.join(", "),
        },
        CheckLine {
            attribute: Attribute::Color,
            verdict: Verdict::binary(target.color == guess.color),
            shown: guess.color.clone(),
        },
        CheckLine {
            attribute: Attribute::EggGroups,
            verdict: egg_group_verdict(&target.egg_groups, &guess.egg_groups),
            shown: guess.egg_groups.join(", "),
        },
        CheckLine {
            attribute: Attribute::EvolutionStage,
            verdict: Verdict::binary(target_stage == guess_stage),
            shown: guess_stage.to_string(),
        },
        CheckLine {
            attribute: Attribute::Habitat,
            verdict: Verdict::binary(target.habitat == guess.habitat),
            shown: guess.habitat.clone(),
        },
        CheckLine {
            attribute: Attribute::Generation,
            verdict: generation_verdict(target.generation, guess.generation),
            shown: guess.generation.to_string(),
        },
    ];

    let correct = lines
        .iter()
        .filter(|line| line.verdict == Verdict::Match)
        .count();

    Comparison {
        all_correct: correct == CHECK_COUNT,
        lines,
    }
}

/// Match when both lists hold the same types, miss when they share none.
fn type_verdict(target: &[String], guess: &[String]) -> Verdict {
    let overlap = target.iter().filter(|t| guess.contains(t)).count();
    if overlap == target.len() && target.len() == guess.len() {
        Verdict::Match
    } else if overlap == 0 {
        Verdict::Miss
    } else {
        Verdict::Partial
    }
}

/// Every target group must appear in the guess; the first absent one is a
/// miss. Extra groups on the guess are ignored, so this never yields
/// [`Verdict::Partial`].
fn egg_group_verdict(target: &[String], guess: &[String]) -> Verdict {
    for group in target {
        if !guess.contains(group) {
            return Verdict::Miss;
        }
    }
    Verdict::Match
}

fn generation_verdict(target: u32, guess: u32) -> Verdict {
    let order = target.cmp(&guess);
    if order != Ordering::Equal {
        log::debug!("generation {} is {:?} guess {}", target, order, guess);
    }
    Verdict::binary(order == Ordering::Equal)
}

/// Evolution stage, or 0 when the name isn't on the chain's first branch.
fn stage_or_zero(record: &PokeRecord) -> u8 {
    evolution::stage(&record.name, &record.evolution).unwrap_or_else(|e| {
        log::error!("can't get evolution stage: {}", e);
        0
    })
}
