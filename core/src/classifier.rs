//! Binary spam/ham classifiers over binary feature vectors.
//!
//! Both implementations share the [`Classifier`] trait: train on
//! `(vector, label)` pairs, then predict one label per vector in input order.

use crate::{Error, FeatureVector, Label, Result};

pub const DEFAULT_SVM_LAMBDA: f64 = 1e-3;
pub const DEFAULT_SVM_EPOCHS: usize = 20;
pub const DEFAULT_BAYES_ALPHA: f64 = 1.0;

pub trait Classifier {
    fn train(&mut self, features: &[FeatureVector], labels: &[Label]) -> Result<()>;

    fn predict(&self, features: &[FeatureVector]) -> Result<Vec<Label>>;
}

/// Percentage (0 to 100) of positions where `predicted` matches `truth`. An empty test set scores 0.
pub fn accuracy(predicted: &[Label], truth: &[Label]) -> f64 {
    if truth.is_empty() {
        return 0.0;
    }
    let hits = predicted.iter().zip(truth.iter()).filter(|(p, t)| p == t).count();
    hits as f64 / truth.len() as f64 * 100.0
}

fn check_training_set(features: &[FeatureVector], labels: &[Label]) -> Result<usize> {
    if features.len() != labels.len() {
        return Err(Error::LengthMismatch { features: features.len(), labels: labels.len() });
    }
    let first = features.first().ok_or(Error::EmptyTrainingSet)?;
    let dims = first.len();
    check_dimensions(features, dims)?;
    Ok(dims)
}

fn check_dimensions(features: &[FeatureVector], expected: usize) -> Result<()> {
    match features.iter().find(|x| x.len() != expected) {
        Some(x) => Err(Error::DimensionMismatch { expected, found: x.len() }),
        None => Ok(()),
    }
}

/// Linear soft-margin SVM trained with Pegasos sub-gradient steps.
///
/// Rows are visited in their given order on every epoch, so training is
/// deterministic. The bias is learned as the weight of a constant extra
/// feature and is regularized along with the rest.
#[derive(Debug, Clone)]
pub struct LinearSvm {
    lambda: f64,
    epochs: usize,
    weights: Vec<f64>,
    bias: f64,
    trained: bool,
}

impl LinearSvm {
    pub fn new() -> Self {
        Self { lambda: DEFAULT_SVM_LAMBDA, epochs: DEFAULT_SVM_EPOCHS, weights: Vec::new(), bias: 0.0, trained: false }
    }

    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs.max(1);
        self
    }

    pub fn weights(&self) -> &[f64] { &self.weights }

    pub fn decision_value(&self, x: &FeatureVector) -> f64 {
        self.bias + self.weights.iter().zip(x.iter()).map(|(w, &xi)| w * f64::from(xi)).sum::<f64>()
    }
}

impl Default for LinearSvm {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for LinearSvm {
    fn train(&mut self, features: &[FeatureVector], labels: &[Label]) -> Result<()> {
        let dims = check_training_set(features, labels)?;
        let mut w = vec![0.0; dims];
        let mut b = 0.0;
        let mut t = 0usize;
        for _ in 0..self.epochs {
            for (x, y) in features.iter().zip(labels.iter()) {
                t += 1;
                let eta = 1.0 / (self.lambda * t as f64);
                let y = y.sign();
                let score = b + w.iter().zip(x.iter()).map(|(wi, &xi)| wi * f64::from(xi)).sum::<f64>();
                let shrink = 1.0 - eta * self.lambda;
                w.iter_mut().for_each(|wi| *wi *= shrink);
                b *= shrink;
                if y * score < 1.0 {
                    for (wi, &xi) in w.iter_mut().zip(x.iter()) {
                        if xi != 0 {
                            *wi += eta * y * f64::from(xi);
                        }
                    }
                    b += eta * y;
                }
            }
        }
        tracing::debug!(dims, steps = t, "svm trained");
        self.weights = w;
        self.bias = b;
        self.trained = true;
        Ok(())
    }

    fn predict(&self, features: &[FeatureVector]) -> Result<Vec<Label>> {
        if !self.trained {
            return Err(Error::NotTrained);
        }
        check_dimensions(features, self.weights.len())?;
        Ok(features.iter().map(|x| Label::from_sign(self.decision_value(x))).collect())
    }
}

/// Bernoulli naive Bayes with Laplace smoothing.
#[derive(Debug, Clone)]
pub struct NaiveBayes {
    alpha: f64,
    /// log P(class), indexed spam then ham
    log_priors: [f64; 2],
    /// log P(feature present | class) and log P(feature absent | class)
    log_present: [Vec<f64>; 2],
    log_absent: [Vec<f64>; 2],
    trained: bool,
}

const CLASSES: [Label; 2] = [Label::Spam, Label::Ham];

fn class_index(label: Label) -> usize {
    match label {
        Label::Spam => 0,
        Label::Ham => 1,
    }
}

impl NaiveBayes {
    pub fn new() -> Self {
        Self {
            alpha: DEFAULT_BAYES_ALPHA,
            log_priors: [0.0; 2],
            log_present: [Vec::new(), Vec::new()],
            log_absent: [Vec::new(), Vec::new()],
            trained: false,
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    fn log_likelihood(&self, class: usize, x: &FeatureVector) -> f64 {
        let mut score = self.log_priors[class];
        for (i, &xi) in x.iter().enumerate() {
            score += if xi != 0 { self.log_present[class][i] } else { self.log_absent[class][i] };
        }
        score
    }
}

impl Default for NaiveBayes {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for NaiveBayes {
    fn train(&mut self, features: &[FeatureVector], labels: &[Label]) -> Result<()> {
        let dims = check_training_set(features, labels)?;
        let mut class_docs = [0usize; 2];
        let mut present = [vec![0usize; dims], vec![0usize; dims]];
        for (x, &label) in features.iter().zip(labels.iter()) {
            let c = class_index(label);
            class_docs[c] += 1;
            for (count, &xi) in present[c].iter_mut().zip(x.iter()) {
                if xi != 0 {
                    *count += 1;
                }
            }
        }

        let total = labels.len() as f64;
        for c in 0..CLASSES.len() {
            // an unseen class can never be predicted
            self.log_priors[c] = if class_docs[c] == 0 { f64::NEG_INFINITY } else { (class_docs[c] as f64 / total).ln() };
            let denom = class_docs[c] as f64 + 2.0 * self.alpha;
            let p: Vec<f64> = present[c].iter().map(|&n| (n as f64 + self.alpha) / denom).collect();
            self.log_present[c] = p.iter().map(|p| p.ln()).collect();
            self.log_absent[c] = p.iter().map(|p| (1.0 - p).ln()).collect();
        }
        tracing::debug!(dims, spam = class_docs[0], ham = class_docs[1], "naive bayes trained");
        self.trained = true;
        Ok(())
    }

    fn predict(&self, features: &[FeatureVector]) -> Result<Vec<Label>> {
        if !self.trained {
            return Err(Error::NotTrained);
        }
        check_dimensions(features, self.log_present[0].len())?;
        Ok(features
            .iter()
            .map(|x| {
                let spam = self.log_likelihood(0, x);
                let ham = self.log_likelihood(1, x);
                if spam > ham { Label::Spam } else { Label::Ham }
            })
            .collect())
    }
}
