use anyhow::{bail, Result};
use ndarray::Array2;
use std::collections::BTreeMap;

use crate::config::{ClassifierConfig, ModelKind};
use crate::models::{factory, observed_classes, primary_class, ClassifierModel};

/// Hard-voting ensemble over independently fitted member models.
///
/// Each row's label is the majority vote across members; ties resolve to the
/// smallest label.
pub struct VotingClassifier {
    members: Vec<Box<dyn ClassifierModel>>,
    classes: Vec<i32>,
}

impl VotingClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        let ModelKind::Voting { members } = &config.kind else {
            panic!("Expected ModelKind::Voting params, got {:?}", config.kind);
        };
        let members = members
            .iter()
            .map(|kind| factory::build_model(&ClassifierConfig::new(config.seed, kind.clone())))
            .collect();
        VotingClassifier {
            members,
            classes: Vec::new(),
        }
    }
}

impl ClassifierModel for VotingClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[i32]) -> Result<()> {
        if self.members.is_empty() {
            bail!("Voting ensemble has no members");
        }
        for member in self.members.iter_mut() {
            member.fit(x, y)?;
        }
        self.classes = observed_classes(y);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>> {
        let votes: Vec<Vec<i32>> = self
            .members
            .iter()
            .map(|member| member.predict(x))
            .collect::<Result<_>>()?;

        let n_rows = votes.first().map(|v| v.len()).unwrap_or(0);
        let mut out = Vec::with_capacity(n_rows);
        for row in 0..n_rows {
            let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
            for member_votes in &votes {
                *counts.entry(member_votes[row]).or_insert(0) += 1;
            }
            // max_by_key keeps the last maximum; reversing the sorted map
            // makes ties resolve to the smallest label.
            let winner = counts
                .into_iter()
                .rev()
                .max_by_key(|&(_, count)| count)
                .map(|(label, _)| label);
            match winner {
                Some(label) => out.push(label),
                None => bail!("Voting ensemble produced no votes"),
            }
        }
        Ok(out)
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        // Vote fraction for the primary class.
        let primary = primary_class(&self.classes);
        let votes: Vec<Vec<i32>> = self
            .members
            .iter()
            .map(|member| member.predict(x))
            .collect::<Result<_>>()?;
        let n_members = votes.len() as f64;
        let n_rows = votes.first().map(|v| v.len()).unwrap_or(0);

        Ok((0..n_rows)
            .map(|row| {
                let agreeing = votes
                    .iter()
                    .filter(|member_votes| Some(member_votes[row]) == primary)
                    .count();
                agreeing as f64 / n_members
            })
            .collect())
    }

    fn name(&self) -> &str {
        "Voting Classifier"
    }
}
