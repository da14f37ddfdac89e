//! Synchronous goal arbitration

use std::fmt;

/// Scores one goal for an agent. Must not block or await.
pub trait GoalEvaluator<A, G>: Send + Sync {
    /// Goal this evaluator argues for
    fn goal(&self) -> G;

    /// How much the agent wants the goal right now
    fn desirability(&self, agent: &A) -> f64;
}

/// Picks the most desirable goal; earlier evaluators win ties.
pub struct Arbiter<A, G> {
    evaluators: Vec<Box<dyn GoalEvaluator<A, G>>>,
}

impl<A, G> Arbiter<A, G> {
    pub fn new() -> Self {
        Arbiter {
            evaluators: Vec::new(),
        }
    }

    pub fn with(mut self, evaluator: impl GoalEvaluator<A, G> + 'static) -> Self {
        self.evaluators.push(Box::new(evaluator));
        self
    }

    pub fn add(&mut self, evaluator: Box<dyn GoalEvaluator<A, G>>) {
        self.evaluators.push(evaluator);
    }

    pub fn len(&self) -> usize {
        self.evaluators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluators.is_empty()
    }

    /// Winning goal and its score, `None` with no evaluators.
    /// NaN scores never win.
    pub fn arbitrate(&self, agent: &A) -> Option<(G, f64)> {
        let mut best: Option<(&dyn GoalEvaluator<A, G>, f64)> = None;
        for evaluator in &self.evaluators {
            let score = evaluator.desirability(agent);
            if score.is_nan() {
                continue;
            }
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((evaluator.as_ref(), score)),
            }
        }
        best.map(|(evaluator, score)| (evaluator.goal(), score))
    }
}

impl<A, G> Default for Arbiter<A, G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, G> fmt::Debug for Arbiter<A, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arbiter")
            .field("evaluators", &self.evaluators.len())
            .finish()
    }
}
