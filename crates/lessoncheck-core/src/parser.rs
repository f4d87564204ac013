//! Lesson file loader.
//!
//! Loads a lesson's section quiz, inline checks and optional mock-exam
//! settings from TOML or JSON files and directories, and lints them for
//! authoring mistakes that are not hard errors.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use rand::Rng;
use serde::Deserialize;

use crate::bank::{build_bank, QuestionBank};
use crate::check::InlineCheck;
use crate::error::ConfigError;
use crate::legacy::RawQuestion;
use crate::model::QuestionId;
use crate::selection::{by_difficulty, draw_exam, ExamConfig};

/// Intermediate structure shared by the TOML and JSON file shapes.
#[derive(Debug, Deserialize)]
struct LessonFile {
    quiz: QuizHeader,
    #[serde(default)]
    exam: Option<ExamConfig>,
    #[serde(default)]
    checks: Vec<RawQuestion>,
    #[serde(default)]
    questions: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct QuizHeader {
    title: String,
    #[serde(default, alias = "passingScore")]
    passing_score: Option<u8>,
}

/// On-disk encoding of a lesson file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonFormat {
    Toml,
    Json,
}

impl LessonFormat {
    /// Pick a format from a file extension. Anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => LessonFormat::Json,
            _ => LessonFormat::Toml,
        }
    }
}

/// Defaults applied while loading.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Pass mark for quizzes that do not set one. Falls back to 70.
    pub default_passing_score: Option<u8>,
}

/// A loaded lesson: the scored section quiz plus its inline checks.
#[derive(Debug, Clone)]
pub struct Lesson {
    /// File the lesson was read from.
    pub source: PathBuf,
    pub bank: Arc<QuestionBank>,
    pub checks: Vec<InlineCheck>,
    /// Questions and checks whose answer was given as option text.
    pub legacy_answers: Vec<QuestionId>,
    /// Set when the bank is a pool that attempts draw a mock exam from.
    pub exam: Option<ExamConfig>,
}

impl Lesson {
    /// The bank an attempt should run: a fresh draw for exam lessons, the
    /// whole quiz otherwise.
    pub fn attempt_bank<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> std::result::Result<Arc<QuestionBank>, ConfigError> {
        match &self.exam {
            Some(exam) => Ok(Arc::new(draw_exam(&self.bank, exam, rng)?)),
            None => Ok(Arc::clone(&self.bank)),
        }
    }
}

/// Parse a single lesson file.
pub fn parse_lesson(path: &Path, options: &LoadOptions) -> Result<Lesson> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read lesson file: {}", path.display()))?;

    parse_lesson_str(&content, path, options)
}

/// Parse lesson file contents, choosing the format from `source_path`.
pub fn parse_lesson_str(content: &str, source_path: &Path, options: &LoadOptions) -> Result<Lesson> {
    let parsed: LessonFile = match LessonFormat::from_path(source_path) {
        LessonFormat::Toml => toml::from_str(content)
            .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?,
        LessonFormat::Json => serde_json::from_str(content)
            .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?,
    };

    build_lesson(parsed, source_path, options)
        .with_context(|| format!("invalid lesson: {}", source_path.display()))
}

fn build_lesson(
    parsed: LessonFile,
    source_path: &Path,
    options: &LoadOptions,
) -> std::result::Result<Lesson, ConfigError> {
    let legacy_answers = parsed
        .checks
        .iter()
        .chain(&parsed.questions)
        .filter(|q| q.uses_literal_answer())
        .map(|q| q.id.clone())
        .collect();

    let mut seen_check_ids = HashSet::new();
    let mut checks = Vec::with_capacity(parsed.checks.len());
    for raw in parsed.checks {
        if !seen_check_ids.insert(raw.id.clone()) {
            return Err(ConfigError::DuplicateId { id: raw.id });
        }
        checks.push(InlineCheck::new(raw.resolve()?)?);
    }

    let questions = parsed
        .questions
        .into_iter()
        .map(RawQuestion::resolve)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let passing_score = parsed.quiz.passing_score.or(options.default_passing_score);
    let bank = build_bank(parsed.quiz.title, questions, passing_score)?;

    if let Some(exam) = &parsed.exam {
        exam.validate(bank.len())?;
    }

    Ok(Lesson {
        source: source_path.to_path_buf(),
        bank: Arc::new(bank),
        checks,
        legacy_answers,
        exam: parsed.exam,
    })
}

/// Recursively list `.toml` and `.json` lesson files, sorted by path.
pub fn collect_lesson_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();

        if path.is_dir() {
            files.extend(collect_lesson_files(&path)?);
        } else if path
            .extension()
            .is_some_and(|ext| ext == "toml" || ext == "json")
        {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Load every lesson under a directory, skipping files that fail to load.
pub fn load_lesson_directory(dir: &Path, options: &LoadOptions) -> Result<Vec<Lesson>> {
    let mut lessons = Vec::new();

    for path in collect_lesson_files(dir)? {
        match parse_lesson(&path, options) {
            Ok(lesson) => lessons.push(lesson),
            Err(e) => {
                tracing::warn!("skipping {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(lessons)
}

/// A non-fatal authoring issue found by [`lint_lesson`].
#[derive(Debug, Clone)]
pub struct LintWarning {
    /// The question or check concerned; `None` for lesson-wide issues.
    pub question_id: Option<QuestionId>,
    pub message: String,
}

/// Check a lesson for issues that do not stop it from being used.
pub fn lint_lesson(lesson: &Lesson) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    let questions = lesson
        .checks
        .iter()
        .map(InlineCheck::question)
        .chain(lesson.bank.questions());

    for question in questions {
        let warn = |message: String| LintWarning {
            question_id: Some(question.id.clone()),
            message,
        };

        if question.prompt.trim().is_empty() {
            warnings.push(warn("prompt is empty".into()));
        }
        if question.explanation.trim().is_empty() {
            warnings.push(warn("explanation is empty".into()));
        }
        for (index, option) in question.options.iter().enumerate() {
            if option.trim().is_empty() {
                warnings.push(warn(format!("option {} is blank", index + 1)));
            }
        }
    }

    for id in &lesson.legacy_answers {
        warnings.push(LintWarning {
            question_id: Some(id.clone()),
            message: "correct answer is given as option text; replace it with an index".into(),
        });
    }

    if let Some(exam) = &lesson.exam {
        for (difficulty, wanted) in exam.mix().targets(exam.question_count) {
            let available = by_difficulty(lesson.bank.questions(), difficulty).count();
            if available < wanted {
                warnings.push(LintWarning {
                    question_id: None,
                    message: format!(
                        "exam wants {wanted} {difficulty} questions but the bank has {available}; \
                         the rest are drawn from other questions"
                    ),
                });
            }
        }
    }

    warnings
}
