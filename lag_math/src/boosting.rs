//! Gradient-boosted regression trees over a single feature
//!
//! Trees are grown on the squared-error gradients of the running ensemble
//! prediction, with L1 (`alpha`) and L2 (`lambda`) regularisation on leaf
//! weights. With one feature the split search is exact: every midpoint
//! between neighbouring distinct feature values is a candidate.

use crate::{check_samples, MathError, Result};
use serde::{Deserialize, Serialize};

/// Most boosting rounds [`GradientBoostingParams::validate`] accepts
pub const MAX_ESTIMATORS: usize = 10_000;

/// Hyperparameters for [`GradientBoostedTrees`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientBoostingParams {
    /// Number of boosting rounds
    pub n_estimators: usize,
    /// Shrinkage applied to every leaf weight
    pub learning_rate: f64,
    /// Maximum tree depth (a depth of 0 is a single leaf)
    pub max_depth: usize,
    /// L1 regularisation on leaf weights
    pub alpha: f64,
    /// L2 regularisation on leaf weights
    pub lambda: f64,
    /// Minimum hessian sum (sample count for squared error) in a child
    pub min_child_weight: f64,
    /// Minimum loss reduction required to split
    pub gamma: f64,
    /// Fraction of features sampled per tree. With one feature at least
    /// one column is always kept, so this never changes the fit.
    pub colsample_bytree: f64,
}

impl Default for GradientBoostingParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            learning_rate: 0.1,
            max_depth: 5,
            alpha: 10.0,
            lambda: 1.0,
            min_child_weight: 1.0,
            gamma: 0.0,
            colsample_bytree: 0.3,
        }
    }
}

impl GradientBoostingParams {
    /// Check that every parameter is within its valid range
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_ESTIMATORS).contains(&self.n_estimators) {
            return Err(MathError::InvalidInput(format!(
                "n_estimators must be in 1..={}",
                MAX_ESTIMATORS
            )));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(MathError::InvalidInput(
                "learning_rate must be in (0, 1]".to_string(),
            ));
        }
        if !(self.alpha >= 0.0 && self.lambda >= 0.0 && self.gamma >= 0.0) {
            return Err(MathError::InvalidInput(
                "alpha, lambda and gamma must be non-negative".to_string(),
            ));
        }
        if !(self.min_child_weight >= 0.0) {
            return Err(MathError::InvalidInput(
                "min_child_weight must be non-negative".to_string(),
            ));
        }
        if !(self.colsample_bytree > 0.0 && self.colsample_bytree <= 1.0) {
            return Err(MathError::InvalidInput(
                "colsample_bytree must be in (0, 1]".to_string(),
            ));
        }
        Ok(())
    }

    fn threshold_l1(&self, g: f64) -> f64 {
        if g > self.alpha {
            g - self.alpha
        } else if g < -self.alpha {
            g + self.alpha
        } else {
            0.0
        }
    }

    fn score(&self, g: f64, h: f64) -> f64 {
        let t = self.threshold_l1(g);
        t * t / (h + self.lambda)
    }

    fn leaf_weight(&self, g: f64, h: f64) -> f64 {
        -self.threshold_l1(g) / (h + self.lambda) * self.learning_rate
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf(f64),
    Split {
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A single regression tree; feature values below a split threshold go left
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionTree {
    root: Node,
}

impl RegressionTree {
    /// Grow a tree on per-sample gradients (hessians are all 1 for squared error).
    ///
    /// `order` must list sample indices sorted ascending by feature value.
    fn grow(xs: &[f64], grads: &[f64], order: &[usize], params: &GradientBoostingParams) -> Self {
        Self {
            root: Self::grow_node(xs, grads, order, 0, params),
        }
    }

    fn grow_node(
        xs: &[f64],
        grads: &[f64],
        order: &[usize],
        depth: usize,
        params: &GradientBoostingParams,
    ) -> Node {
        let g_total: f64 = order.iter().map(|&i| grads[i]).sum();
        let h_total = order.len() as f64;

        if depth >= params.max_depth || order.len() < 2 {
            return Node::Leaf(params.leaf_weight(g_total, h_total));
        }

        let parent_score = params.score(g_total, h_total);
        let mut best: Option<(usize, f64)> = None;
        let mut g_left = 0.0;

        for k in 1..order.len() {
            g_left += grads[order[k - 1]];
            let (x_prev, x_next) = (xs[order[k - 1]], xs[order[k]]);
            if x_prev >= x_next {
                continue;
            }

            let h_left = k as f64;
            let h_right = h_total - h_left;
            if h_left < params.min_child_weight || h_right < params.min_child_weight {
                continue;
            }

            let gain = params.score(g_left, h_left) + params.score(g_total - g_left, h_right)
                - parent_score;
            if gain > params.gamma && best.map_or(true, |(_, g)| gain > g) {
                best = Some((k, gain));
            }
        }

        match best {
            Some((k, _)) => Node::Split {
                threshold: (xs[order[k - 1]] + xs[order[k]]) / 2.0,
                left: Box::new(Self::grow_node(xs, grads, &order[..k], depth + 1, params)),
                right: Box::new(Self::grow_node(xs, grads, &order[k..], depth + 1, params)),
            },
            None => Node::Leaf(params.leaf_weight(g_total, h_total)),
        }
    }

    /// Leaf weight for one feature value
    pub fn predict(&self, x: f64) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf(weight) => return *weight,
                Node::Split {
                    threshold,
                    left,
                    right,
                } => node = if x < *threshold { left } else { right },
            }
        }
    }

    /// Number of leaves in the tree
    pub fn leaf_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            match node {
                Node::Leaf(_) => 1,
                Node::Split { left, right, .. } => count(left) + count(right),
            }
        }
        count(&self.root)
    }
}

/// Additive ensemble of regression trees on top of a constant base score
#[derive(Debug, Clone)]
pub struct GradientBoostedTrees {
    base_score: f64,
    trees: Vec<RegressionTree>,
}

impl GradientBoostedTrees {
    /// Fit the ensemble to paired samples.
    ///
    /// The base score is the target mean; each round fits one tree to the
    /// residual gradients of the ensemble so far.
    pub fn fit(xs: &[f64], ys: &[f64], params: &GradientBoostingParams) -> Result<Self> {
        check_samples(xs, ys)?;
        params.validate()?;

        let base_score = ys.iter().sum::<f64>() / ys.len() as f64;
        let mut order: Vec<usize> = (0..xs.len()).collect();
        order.sort_by(|&a, &b| xs[a].total_cmp(&xs[b]));

        let mut predictions = vec![base_score; xs.len()];
        let mut grads = vec![0.0; xs.len()];
        let mut trees = Vec::with_capacity(params.n_estimators);

        for _ in 0..params.n_estimators {
            for (g, (p, y)) in grads.iter_mut().zip(predictions.iter().zip(ys.iter())) {
                *g = p - y;
            }

            let tree = RegressionTree::grow(xs, &grads, &order, params);
            for (p, &x) in predictions.iter_mut().zip(xs.iter()) {
                *p += tree.predict(x);
            }
            trees.push(tree);
        }

        Ok(Self { base_score, trees })
    }

    /// Predict the target for one feature value
    pub fn predict(&self, x: f64) -> f64 {
        self.base_score + self.trees.iter().map(|t| t.predict(x)).sum::<f64>()
    }

    /// The constant every prediction starts from
    pub fn base_score(&self) -> f64 {
        self.base_score
    }

    /// The fitted trees in boosting order
    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }
}
