use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use spamfilter_core::classifier::{DEFAULT_BAYES_ALPHA, DEFAULT_SVM_EPOCHS, DEFAULT_SVM_LAMBDA};
use spamfilter_core::corpus;
use spamfilter_core::pipeline::{self, ClassifierKind, PipelineConfig, VocabularyScope, DEFAULT_TEST_SIZE};
use spamfilter_core::tokenizer::TokenizerOptions;
use spamfilter_core::vocabulary::{CountMode, DEFAULT_THRESHOLD};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "trainer")]
#[command(about = "Train and evaluate a bag-of-words SMS spam classifier", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on the corpus prefix and print holdout accuracy (percent) for the suffix
    Evaluate {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Number of trailing documents held out for testing
        #[arg(long, default_value_t = DEFAULT_TEST_SIZE)]
        test_size: usize,
        /// Rows the vocabulary is built from
        #[arg(long, value_enum, default_value_t = ScopeArg::Training)]
        vocabulary_scope: ScopeArg,
        /// Shuffle documents with this seed before splitting
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = ClassifierArg::Svm)]
        classifier: ClassifierArg,
        /// SVM regularization strength
        #[arg(long, default_value_t = DEFAULT_SVM_LAMBDA)]
        lambda: f64,
        /// SVM passes over the training set
        #[arg(long, default_value_t = DEFAULT_SVM_EPOCHS)]
        epochs: usize,
        /// Naive Bayes Laplace smoothing
        #[arg(long, default_value_t = DEFAULT_BAYES_ALPHA)]
        alpha: f64,
    },
    /// Print the corpus vocabulary, one token per line
    Vocab {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
}

#[derive(Args)]
struct CorpusArgs {
    /// CSV file, or a directory searched for *.csv files
    #[arg(long)]
    input: String,
    /// Use only the first N documents
    #[arg(long)]
    corpus_size: Option<usize>,
    /// Keep tokens counted strictly more than this many times
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: usize,
    #[arg(long, value_enum, default_value_t = CountArg::Occurrences)]
    count_mode: CountArg,
    /// Do not drop English stopwords before stemming
    #[arg(long, default_value_t = false)]
    keep_stopwords: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScopeArg {
    Training,
    Corpus,
}

#[derive(Clone, Copy, ValueEnum)]
enum ClassifierArg {
    Svm,
    Bayes,
}

#[derive(Clone, Copy, ValueEnum)]
enum CountArg {
    Occurrences,
    Documents,
}

impl CorpusArgs {
    fn config(&self) -> PipelineConfig {
        PipelineConfig {
            corpus_size: self.corpus_size,
            threshold: self.threshold,
            count_mode: match self.count_mode {
                CountArg::Occurrences => CountMode::Occurrences,
                CountArg::Documents => CountMode::Documents,
            },
            tokenizer: TokenizerOptions { keep_stopwords: self.keep_stopwords },
            ..PipelineConfig::default()
        }
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate { corpus, test_size, vocabulary_scope, seed, classifier, lambda, epochs, alpha } => {
            let config = PipelineConfig {
                test_size,
                vocabulary_scope: match vocabulary_scope {
                    ScopeArg::Training => VocabularyScope::Training,
                    ScopeArg::Corpus => VocabularyScope::Corpus,
                },
                shuffle_seed: seed,
                classifier: match classifier {
                    ClassifierArg::Svm => ClassifierKind::Svm { lambda, epochs },
                    ClassifierArg::Bayes => ClassifierKind::Bayes { alpha },
                },
                ..corpus.config()
            };
            evaluate(&corpus.input, &config)
        }
        Commands::Vocab { corpus } => print_vocabulary(&corpus.input, &corpus.config()),
    }
}

fn evaluate(input: &str, config: &PipelineConfig) -> Result<()> {
    let documents = corpus::load(input).with_context(|| format!("failed to read corpus {input}"))?;
    let report = pipeline::run(documents, config)?;
    tracing::info!(
        corpus = report.corpus_size,
        train = report.train_size,
        test = report.test_size,
        vocabulary = report.vocabulary_size,
        "evaluation complete"
    );
    println!("{}", report.accuracy);
    Ok(())
}

fn print_vocabulary(input: &str, config: &PipelineConfig) -> Result<()> {
    let mut documents = corpus::load(input).with_context(|| format!("failed to read corpus {input}"))?;
    if let Some(m) = config.corpus_size {
        documents.truncate(m);
    }
    let vocabulary = pipeline::corpus_vocabulary(&documents, config);
    tracing::info!(terms = vocabulary.len(), "vocabulary built; adjust --threshold for more or fewer terms");
    for term in vocabulary.iter() {
        println!("{term}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_defaults_follow_pipeline_defaults() {
        let cli = Cli::try_parse_from(["trainer", "evaluate", "--input", "spam.csv"]).unwrap();
        let Commands::Evaluate { corpus, test_size, seed, lambda, epochs, alpha, .. } = cli.command else {
            panic!("expected evaluate");
        };
        assert_eq!(test_size, DEFAULT_TEST_SIZE);
        assert_eq!((lambda, epochs, alpha), (DEFAULT_SVM_LAMBDA, DEFAULT_SVM_EPOCHS, DEFAULT_BAYES_ALPHA));
        assert_eq!(seed, None);
        assert_eq!(corpus.config(), PipelineConfig::default());
    }

    #[test]
    fn corpus_flags_map_onto_config() {
        let cli = Cli::try_parse_from([
            "trainer", "vocab", "--input", "data", "--threshold", "0", "--count-mode", "documents", "--keep-stopwords",
            "--corpus-size", "100",
        ])
        .unwrap();
        let Commands::Vocab { corpus } = cli.command else {
            panic!("expected vocab");
        };
        let config = corpus.config();
        assert_eq!(config.threshold, 0);
        assert_eq!(config.count_mode, CountMode::Documents);
        assert!(config.tokenizer.keep_stopwords);
        assert_eq!(config.corpus_size, Some(100));
    }
}
