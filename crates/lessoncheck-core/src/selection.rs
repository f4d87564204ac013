//! Question selection.
//!
//! Filters narrow a bank to one section or difficulty. Mock exams draw a
//! random sample from a larger bank, balanced across difficulties by a
//! [`DifficultyMix`]. Every draw takes an explicit RNG so callers can seed it.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::bank::{build_bank, QuestionBank};
use crate::error::ConfigError;
use crate::model::{Difficulty, Question};

/// Questions tagged with `section`, in bank order.
pub fn by_section<'a>(
    questions: &'a [Question],
    section: &'a str,
) -> impl Iterator<Item = &'a Question> + 'a {
    questions
        .iter()
        .filter(move |q| q.section.as_deref() == Some(section))
}

/// Questions tagged with `difficulty`, in bank order.
pub fn by_difficulty(
    questions: &[Question],
    difficulty: Difficulty,
) -> impl Iterator<Item = &Question> + '_ {
    questions
        .iter()
        .filter(move |q| q.difficulty == Some(difficulty))
}

/// Build a smaller bank from the questions matching every given filter.
///
/// Keeps the title and pass mark. Fails with `EmptyBank` when nothing matches.
pub fn filter_bank(
    bank: &QuestionBank,
    section: Option<&str>,
    difficulty: Option<Difficulty>,
) -> Result<QuestionBank, ConfigError> {
    let questions: Vec<Question> = bank
        .questions()
        .iter()
        .filter(|q| section.map_or(true, |s| q.section.as_deref() == Some(s)))
        .filter(|q| difficulty.map_or(true, |d| q.difficulty == Some(d)))
        .cloned()
        .collect();

    build_bank(bank.title(), questions, Some(bank.passing_score_percent()))
}

/// Up to `count` distinct questions in random order.
pub fn random_sample<R: Rng + ?Sized>(
    questions: &[Question],
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut pool = questions.to_vec();
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}

/// Relative weight of each difficulty in a drawn exam.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyMix {
    #[serde(default)]
    pub basic: f64,
    #[serde(default)]
    pub intermediate: f64,
    #[serde(default)]
    pub advanced: f64,
}

impl Default for DifficultyMix {
    fn default() -> Self {
        Self {
            basic: 0.35,
            intermediate: 0.45,
            advanced: 0.2,
        }
    }
}

impl DifficultyMix {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [self.basic, self.intermediate, self.advanced];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::InvalidDifficultyMix);
        }
        if self.per_mille().iter().sum::<u64>() == 0 {
            return Err(ConfigError::InvalidDifficultyMix);
        }
        Ok(())
    }

    /// Weights rounded to thousandths, in `Difficulty::ALL` order.
    fn per_mille(&self) -> [u64; 3] {
        [self.basic, self.intermediate, self.advanced].map(|w| (w.max(0.0) * 1000.0).round() as u64)
    }

    /// Split `count` questions across difficulties by largest remainder.
    ///
    /// The targets always sum to `count` for a valid mix. Ties go to the
    /// easier difficulty.
    pub fn targets(&self, count: usize) -> [(Difficulty, usize); 3] {
        let weights = self.per_mille();
        let total: u64 = weights.iter().sum();
        let mut targets = Difficulty::ALL.map(|d| (d, 0usize));
        if total == 0 {
            return targets;
        }

        let mut remainders = Vec::with_capacity(3);
        let mut assigned = 0;
        for (i, weight) in weights.into_iter().enumerate() {
            let scaled = count as u64 * weight;
            targets[i].1 = (scaled / total) as usize;
            assigned += targets[i].1;
            remainders.push((i, scaled % total));
        }

        // Stable sort keeps the easier difficulty first on equal remainders.
        remainders.sort_by(|a, b| b.1.cmp(&a.1));
        for (i, _) in remainders.into_iter().take(count.saturating_sub(assigned)) {
            targets[i].1 += 1;
        }
        targets
    }
}

/// Draw `count` questions, taking each difficulty's share from its tagged
/// questions and filling any shortfall from whatever is left, untagged
/// questions included. The result is shuffled.
pub fn balanced_sample<R: Rng + ?Sized>(
    questions: &[Question],
    count: usize,
    mix: &DifficultyMix,
    rng: &mut R,
) -> Vec<Question> {
    let mut picked = Vec::with_capacity(count);
    let mut rest: Vec<Question> = questions
        .iter()
        .filter(|q| q.difficulty.is_none())
        .cloned()
        .collect();

    for (difficulty, target) in mix.targets(count) {
        let mut tier: Vec<Question> = by_difficulty(questions, difficulty).cloned().collect();
        tier.shuffle(rng);
        let take = target.min(tier.len());
        rest.extend(tier.split_off(take));
        picked.extend(tier);
    }

    let shortfall = count.saturating_sub(picked.len());
    picked.extend(random_sample(&rest, shortfall, rng));
    picked.shuffle(rng);
    picked
}

/// Mock exam settings from a lesson's `[exam]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamConfig {
    /// How many questions each attempt draws.
    #[serde(alias = "totalQuestions")]
    pub question_count: usize,
    /// Pass mark for the exam; the quiz pass mark when unset.
    #[serde(default, alias = "passThreshold")]
    pub pass_threshold: Option<u8>,
    #[serde(default, alias = "timeLimit")]
    pub time_limit_secs: Option<u64>,
    /// Defaults to 35% basic, 45% intermediate, 20% advanced.
    #[serde(default, alias = "difficultyMix")]
    pub difficulty_mix: Option<DifficultyMix>,
}

impl ExamConfig {
    /// Check the settings against a bank of `available` questions.
    pub fn validate(&self, available: usize) -> Result<(), ConfigError> {
        if let Some(mix) = &self.difficulty_mix {
            mix.validate()?;
        }
        if self.question_count == 0 || self.question_count > available {
            return Err(ConfigError::ExamSizeOutOfRange {
                requested: self.question_count,
                available,
            });
        }
        if let Some(pass) = self.pass_threshold {
            if pass > 100 {
                return Err(ConfigError::PassingScoreOutOfRange(pass));
            }
        }
        Ok(())
    }

    pub fn mix(&self) -> DifficultyMix {
        self.difficulty_mix.unwrap_or_default()
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs.map(Duration::from_secs)
    }
}

/// Draw an exam bank from `bank`.
pub fn draw_exam<R: Rng + ?Sized>(
    bank: &QuestionBank,
    exam: &ExamConfig,
    rng: &mut R,
) -> Result<QuestionBank, ConfigError> {
    exam.validate(bank.len())?;

    let questions = balanced_sample(bank.questions(), exam.question_count, &exam.mix(), rng);
    let passing = exam.pass_threshold.unwrap_or(bank.passing_score_percent());

    tracing::debug!(
        title = bank.title(),
        drawn = questions.len(),
        available = bank.len(),
        "drew exam"
    );
    build_bank(bank.title(), questions, Some(passing))
}

/// RNG for drawing exams: seeded when `seed` is given, from OS entropy otherwise.
pub fn exam_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
