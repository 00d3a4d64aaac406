//! Rating predictor: a pre-trained latent-factor model.
//!
//! The model is trained offline and shipped as a serialized artifact; this
//! crate only loads it and answers `predict(user, movie)` queries. The
//! recommendation core depends on the [`RatingPredictor`] trait, not on the
//! concrete model, so tests can inject stub predictors.
//!
//! The artifact is a biased matrix-factorization model: the estimated
//! rating for (user u, movie i) is
//!
//! ```text
//! r̂(u, i) = μ + b_u + b_i + p_u · q_i
//! ```
//!
//! clamped to the 0-5 rating scale. When the model has no factors for the
//! user or the item, the missing terms are omitted and the prediction is
//! flagged as a fallback.

use catalog::{MovieId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Rating scale bounds the model was trained on.
const RATING_MIN: f32 = 0.0;
const RATING_MAX: f32 = 5.0;

/// Errors that can occur while loading the model artifact.
///
/// All of these are fatal at startup: a recommender without its model must
/// not serve requests.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed model artifact: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid model artifact: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// One estimated rating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Estimated rating, clamped to the 0-5 scale.
    pub estimate: f32,
    /// True when the model had no factors for the user or the item and
    /// fell back toward its global mean.
    pub fallback: bool,
}

/// Capability to estimate how a user would rate a movie.
///
/// The core treats this as an opaque collaborator; anything implementing
/// it can drive the neighbor search.
pub trait RatingPredictor: Send + Sync {
    fn predict(&self, user: UserId, movie: MovieId) -> Prediction;
}

/// A pre-trained SVD-style latent-factor model.
///
/// Serialized as JSON with the global mean, per-user and per-item biases,
/// and factor vectors of a fixed dimension.
#[derive(Debug, Serialize, Deserialize)]
pub struct SvdModel {
    global_mean: f32,
    n_factors: usize,
    user_bias: HashMap<UserId, f32>,
    item_bias: HashMap<MovieId, f32>,
    user_factors: HashMap<UserId, Vec<f32>>,
    item_factors: HashMap<MovieId, Vec<f32>>,
}

impl SvdModel {
    /// Load the model artifact from a JSON file.
    ///
    /// Fails on any I/O or format problem; callers treat that as fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let model: SvdModel = serde_json::from_reader(BufReader::new(file))?;
        model.validate()?;
        info!(
            users = model.user_factors.len(),
            items = model.item_factors.len(),
            factors = model.n_factors,
            "Loaded rating prediction model from {:?}",
            path
        );
        Ok(model)
    }

    /// Assemble a model from its components. Used by training export
    /// tooling and by tests.
    pub fn from_components(
        global_mean: f32,
        n_factors: usize,
        user_bias: HashMap<UserId, f32>,
        item_bias: HashMap<MovieId, f32>,
        user_factors: HashMap<UserId, Vec<f32>>,
        item_factors: HashMap<MovieId, Vec<f32>>,
    ) -> Result<Self> {
        let model = Self {
            global_mean,
            n_factors,
            user_bias,
            item_bias,
            user_factors,
            item_factors,
        };
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if !self.global_mean.is_finite() {
            return Err(ModelError::Invalid("global mean is not finite".to_string()));
        }
        for (user, factors) in &self.user_factors {
            if factors.len() != self.n_factors {
                return Err(ModelError::Invalid(format!(
                    "user {} has {} factors, expected {}",
                    user,
                    factors.len(),
                    self.n_factors
                )));
            }
        }
        for (item, factors) in &self.item_factors {
            if factors.len() != self.n_factors {
                return Err(ModelError::Invalid(format!(
                    "item {} has {} factors, expected {}",
                    item,
                    factors.len(),
                    self.n_factors
                )));
            }
        }
        Ok(())
    }
}

impl RatingPredictor for SvdModel {
    fn predict(&self, user: UserId, movie: MovieId) -> Prediction {
        let mut estimate = self.global_mean;
        let mut fallback = false;

        match self.user_bias.get(&user) {
            Some(bias) => estimate += bias,
            None => fallback = true,
        }
        match self.item_bias.get(&movie) {
            Some(bias) => estimate += bias,
            None => fallback = true,
        }

        match (self.user_factors.get(&user), self.item_factors.get(&movie)) {
            (Some(p), Some(q)) => {
                estimate += p.iter().zip(q.iter()).map(|(a, b)| a * b).sum::<f32>();
            }
            _ => fallback = true,
        }

        Prediction {
            estimate: estimate.clamp(RATING_MIN, RATING_MAX),
            fallback,
        }
    }
}
