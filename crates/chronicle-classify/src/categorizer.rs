//! One-vs-rest linear SVM over TF-IDF vectors.
//!
//! Each label gets a hinge-loss separator `w·x + b` fit by dual coordinate
//! descent (the liblinear L1-loss solver, bias folded in as a constant
//! feature). Examples are visited in input order with no shuffling, so a
//! given training set and configuration always produce the same model.
//! Prediction picks the label with the largest margin score.

use chronicle_core::config::ClassifierConfig;
use chronicle_core::error::{ChronicleError, Result};
use chronicle_core::types::CategoryLabel;
use tracing::{debug, info, warn};

/// Projected gradients smaller than this are treated as zero.
const GRADIENT_EPSILON: f64 = 1e-12;

/// A single binary separator: `score(x) = weights·x + bias`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearMargin {
    pub weights: Vec<f64>,
    pub bias: f64,
    /// Coordinate-descent passes used during fit.
    pub iterations: usize,
    pub converged: bool,
}

impl LinearMargin {
    pub fn score(&self, vector: &[f64]) -> f64 {
        dot(&self.weights, vector) + self.bias
    }

    /// Fit a separator for `targets` in `{-1.0, +1.0}`.
    fn fit(vectors: &[Vec<f64>], targets: &[f64], config: &ClassifierConfig) -> Self {
        let dims = vectors.first().map_or(0, Vec::len);
        let c = config.regularization;
        let mut weights = vec![0.0; dims];
        let mut bias = 0.0;
        let mut alpha = vec![0.0; vectors.len()];
        // Diagonal of the kernel matrix, +1 for the bias feature.
        let diagonal: Vec<f64> = vectors.iter().map(|x| dot(x, x) + 1.0).collect();

        let mut iterations = 0;
        let mut converged = false;
        while iterations < config.max_iterations {
            iterations += 1;
            let mut max_pg = f64::NEG_INFINITY;
            let mut min_pg = f64::INFINITY;

            for (i, x) in vectors.iter().enumerate() {
                let y = targets[i];
                let gradient = y * (dot(&weights, x) + bias) - 1.0;
                let projected = if alpha[i] <= 0.0 {
                    gradient.min(0.0)
                } else if alpha[i] >= c {
                    gradient.max(0.0)
                } else {
                    gradient
                };
                max_pg = max_pg.max(projected);
                min_pg = min_pg.min(projected);

                if projected.abs() > GRADIENT_EPSILON {
                    let previous = alpha[i];
                    alpha[i] = (previous - gradient / diagonal[i]).clamp(0.0, c);
                    let step = (alpha[i] - previous) * y;
                    for (w, xi) in weights.iter_mut().zip(x) {
                        *w += step * xi;
                    }
                    bias += step;
                }
            }

            if max_pg - min_pg < config.tolerance {
                converged = true;
                break;
            }
        }

        Self {
            weights,
            bias,
            iterations,
            converged,
        }
    }
}

/// Fitted multi-class linear classifier over the closed label set.
///
/// Only labels present in the training data get a separator; the others can
/// never be predicted.
#[derive(Debug, Clone)]
pub struct Categorizer {
    dimensions: usize,
    /// Separators in [`CategoryLabel::ALL`] order.
    margins: Vec<(CategoryLabel, LinearMargin)>,
}

impl Categorizer {
    /// Fit one separator per label present in `labels`.
    ///
    /// Fails with [`ChronicleError::InsufficientTrainingData`] when inputs are
    /// empty, of different lengths or widths, or cover fewer than two labels.
    pub fn fit(
        vectors: &[Vec<f64>],
        labels: &[CategoryLabel],
        config: &ClassifierConfig,
    ) -> Result<Self> {
        validate_config(config)?;

        if vectors.is_empty() {
            return Err(ChronicleError::InsufficientTrainingData(
                "no training examples".to_string(),
            ));
        }
        if vectors.len() != labels.len() {
            return Err(ChronicleError::InsufficientTrainingData(format!(
                "{} vectors but {} labels",
                vectors.len(),
                labels.len()
            )));
        }
        let dimensions = vectors[0].len();
        if let Some(bad) = vectors.iter().find(|v| v.len() != dimensions) {
            return Err(ChronicleError::DimensionMismatch {
                expected: dimensions,
                actual: bad.len(),
            });
        }

        let present: Vec<CategoryLabel> = CategoryLabel::ALL
            .into_iter()
            .filter(|label| labels.contains(label))
            .collect();
        if present.len() < 2 {
            return Err(ChronicleError::InsufficientTrainingData(format!(
                "need at least 2 distinct labels, found {}",
                present.len()
            )));
        }

        let mut margins = Vec::with_capacity(present.len());
        for label in present {
            let targets: Vec<f64> = labels
                .iter()
                .map(|l| if *l == label { 1.0 } else { -1.0 })
                .collect();
            let margin = LinearMargin::fit(vectors, &targets, config);
            if margin.converged {
                debug!(label = %label, iterations = margin.iterations, "Separator converged");
            } else {
                warn!(
                    label = %label,
                    iterations = margin.iterations,
                    "Separator did not converge within max_iterations"
                );
            }
            margins.push((label, margin));
        }

        info!(
            examples = vectors.len(),
            dimensions,
            labels = margins.len(),
            "Linear SVM categorizer fitted"
        );

        Ok(Self {
            dimensions,
            margins,
        })
    }

    /// Feature width the model was fit on.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Labels this model can predict, in tie-breaking order.
    pub fn labels(&self) -> Vec<CategoryLabel> {
        self.margins.iter().map(|(label, _)| *label).collect()
    }

    /// The separator fit for `label`, if it was present in training.
    pub fn margin(&self, label: CategoryLabel) -> Option<&LinearMargin> {
        self.margins
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, margin)| margin)
    }

    /// Margin score of every trained label for `vector`.
    pub fn decision_scores(&self, vector: &[f64]) -> Result<Vec<(CategoryLabel, f64)>> {
        self.check_dimensions(vector)?;
        Ok(self
            .margins
            .iter()
            .map(|(label, margin)| (*label, margin.score(vector)))
            .collect())
    }

    /// The label with the highest margin score. Ties go to the label that
    /// sorts first.
    pub fn predict(&self, vector: &[f64]) -> Result<CategoryLabel> {
        let scores = self.decision_scores(vector)?;
        let mut best = scores[0];
        for candidate in &scores[1..] {
            if candidate.1 > best.1 {
                best = *candidate;
            }
        }
        Ok(best.0)
    }

    fn check_dimensions(&self, vector: &[f64]) -> Result<()> {
        if vector.len() != self.dimensions {
            return Err(ChronicleError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            });
        }
        Ok(())
    }
}

fn validate_config(config: &ClassifierConfig) -> Result<()> {
    if !(config.regularization.is_finite() && config.regularization > 0.0) {
        return Err(ChronicleError::Config(format!(
            "classifier.regularization must be a positive number, got {}",
            config.regularization
        )));
    }
    if config.max_iterations == 0 {
        return Err(ChronicleError::Config(
            "classifier.max_iterations must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
