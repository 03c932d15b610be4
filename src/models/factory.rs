use crate::config::{ClassifierConfig, ModelKind};
use crate::models::classifier_trait::ClassifierModel;
use crate::models::forest::ForestClassifier;
use crate::models::knn::KnnClassifier;
use crate::models::logistic::LogisticClassifier;
use crate::models::tree::TreeClassifier;
use crate::models::voting::VotingClassifier;

/// Build an unfit boxed classifier from a `ClassifierConfig`.
///
/// Every call returns a fresh instance, so repeated builds from the same
/// config never share fitted state.
pub fn build_model(config: &ClassifierConfig) -> Box<dyn ClassifierModel> {
    match &config.kind {
        ModelKind::LogisticRegression { .. } => Box::new(LogisticClassifier::new(config.clone())),
        ModelKind::DecisionTree { .. } => Box::new(TreeClassifier::new(config.clone())),
        ModelKind::KNearestNeighbors { .. } => Box::new(KnnClassifier::new(config.clone())),
        ModelKind::RandomForest { .. } => Box::new(ForestClassifier::new(config.clone())),
        ModelKind::Voting { .. } => Box::new(VotingClassifier::new(config.clone())),
    }
}
