//! End-to-end run: normalize, tokenize, build the vocabulary, extract
//! features, split, then train and score a classifier.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::classifier::{
    accuracy, Classifier, LinearSvm, NaiveBayes, DEFAULT_BAYES_ALPHA, DEFAULT_SVM_EPOCHS, DEFAULT_SVM_LAMBDA,
};
use crate::dataset::{shuffle_together, split, Split};
use crate::features::FeatureExtractor;
use crate::normalizer::normalize;
use crate::tokenizer::{tokenize_and_stem_with, TokenizerOptions};
use crate::vocabulary::{count_tokens, CountMode, Vocabulary, DEFAULT_THRESHOLD};
use crate::{Document, Error, FeatureVector, Label, Result, Token};

pub const DEFAULT_TEST_SIZE: usize = 5000;

/// Which rows the vocabulary is counted over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VocabularyScope {
    /// Training rows only; test rows never influence the feature space.
    #[default]
    Training,
    /// Every row, test rows included.
    Corpus,
}

/// Classifier to train, with its hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClassifierKind {
    Svm { lambda: f64, epochs: usize },
    Bayes { alpha: f64 },
}

impl ClassifierKind {
    pub fn svm() -> Self {
        ClassifierKind::Svm { lambda: DEFAULT_SVM_LAMBDA, epochs: DEFAULT_SVM_EPOCHS }
    }

    pub fn bayes() -> Self {
        ClassifierKind::Bayes { alpha: DEFAULT_BAYES_ALPHA }
    }

    pub fn build(self) -> Box<dyn Classifier> {
        match self {
            ClassifierKind::Svm { lambda, epochs } => Box::new(LinearSvm::new().with_lambda(lambda).with_epochs(epochs)),
            ClassifierKind::Bayes { alpha } => Box::new(NaiveBayes::new().with_alpha(alpha)),
        }
    }
}

impl Default for ClassifierKind {
    fn default() -> Self {
        Self::svm()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Keep only the first M documents.
    pub corpus_size: Option<usize>,
    pub test_size: usize,
    pub threshold: usize,
    pub count_mode: CountMode,
    pub vocabulary_scope: VocabularyScope,
    /// Shuffle rows before splitting; `None` keeps corpus order.
    pub shuffle_seed: Option<u64>,
    pub tokenizer: TokenizerOptions,
    pub classifier: ClassifierKind,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            corpus_size: None,
            test_size: DEFAULT_TEST_SIZE,
            threshold: DEFAULT_THRESHOLD,
            count_mode: CountMode::Occurrences,
            vocabulary_scope: VocabularyScope::Training,
            shuffle_seed: None,
            tokenizer: TokenizerOptions::default(),
            classifier: ClassifierKind::svm(),
        }
    }
}

pub struct Prepared {
    pub extractor: FeatureExtractor,
    pub split: Split<FeatureVector, Label>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub corpus_size: usize,
    pub train_size: usize,
    pub test_size: usize,
    pub vocabulary_size: usize,
    /// Holdout accuracy in percent.
    pub accuracy: f64,
}

/// Normalize then tokenize and stem one message.
pub fn tokenize_document(text: &str, options: TokenizerOptions) -> Vec<Token> {
    tokenize_and_stem_with(&normalize(text), options)
}

/// Vocabulary over every document, as used for inspection.
pub fn corpus_vocabulary(documents: &[Document], config: &PipelineConfig) -> Vocabulary {
    let tokenized: Vec<Vec<Token>> = documents.iter().map(|d| tokenize_document(&d.text, config.tokenizer)).collect();
    Vocabulary::from_counts(&count_tokens(&tokenized, config.count_mode), config.threshold)
}

pub fn prepare(mut documents: Vec<Document>, config: &PipelineConfig) -> Result<Prepared> {
    if let Some(m) = config.corpus_size {
        documents.truncate(m);
    }
    let corpus_size = documents.len();
    let out_of_range = || Error::SplitOutOfRange { test_size: config.test_size, corpus_size };
    let train_size = corpus_size.checked_sub(config.test_size).ok_or_else(out_of_range)?;

    let (tokenized, labels): (Vec<Vec<Token>>, Vec<Label>) =
        documents.into_iter().map(|d| (tokenize_document(&d.text, config.tokenizer), d.label)).unzip();
    tracing::debug!(documents = tokenized.len(), "tokenized corpus");

    // Corpus-wide vocabulary is counted in load order, before any shuffle.
    let corpus_vocabulary = match config.vocabulary_scope {
        VocabularyScope::Corpus => Some(Vocabulary::from_counts(&count_tokens(&tokenized, config.count_mode), config.threshold)),
        VocabularyScope::Training => None,
    };

    let (tokenized, labels) = match config.shuffle_seed {
        Some(seed) => {
            let mismatch = Error::LengthMismatch { features: tokenized.len(), labels: labels.len() };
            shuffle_together(tokenized, labels, &mut StdRng::seed_from_u64(seed)).ok_or(mismatch)?
        }
        None => (tokenized, labels),
    };

    let vocabulary = match corpus_vocabulary {
        Some(vocabulary) => vocabulary,
        None => Vocabulary::from_counts(&count_tokens(&tokenized[..train_size], config.count_mode), config.threshold),
    };
    tracing::info!(terms = vocabulary.len(), scope = ?config.vocabulary_scope, "vocabulary built");

    let extractor = FeatureExtractor::new(vocabulary);
    let features = extractor.extract_all(&tokenized);
    let split = split(features, labels, train_size).ok_or_else(out_of_range)?;
    Ok(Prepared { extractor, split })
}

pub fn run(documents: Vec<Document>, config: &PipelineConfig) -> Result<RunReport> {
    let Prepared { extractor, split } = prepare(documents, config)?;
    let mut classifier = config.classifier.build();

    tracing::info!(train = split.train_len(), classifier = ?config.classifier, "training");
    classifier.train(&split.train_x, &split.train_y)?;
    let predicted = classifier.predict(&split.test_x)?;
    let accuracy = accuracy(&predicted, &split.test_y);

    Ok(RunReport {
        corpus_size: split.train_len() + split.test_len(),
        train_size: split.train_len(),
        test_size: split.test_len(),
        vocabulary_size: extractor.dimensions(),
        accuracy,
    })
}
