use std::sync::Arc;

use crate::calculate::ScoreWeights;
use crate::storage::StorageConfig;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<StorageConfig>,
    pub weights: ScoreWeights,
}
