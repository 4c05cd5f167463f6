//! Explanatory text for an evaluation.

use crate::model::ModelPriors;

/// Display-ready paragraph describing the model and its prior
/// hyperparameters.
pub fn describe(priors: &ModelPriors) -> String {
    match priors {
        ModelPriors::Conversion(beta) => format!(
            "Conversion data is modeled as a binomial distribution, with each variant's \
             binomial parameter modeled with a weak beta conjugate prior \
             (prior beta successes = {}, prior beta failures = {}). \
             The expected value of the binomial distribution describing the data is the \
             posterior beta distribution describing the parameters themselves, plotted below.",
            beta.alpha, beta.beta
        ),
        ModelPriors::NumericContinuous(gamma) => format!(
            "Continuous numeric data is modeled as an exponential distribution, with each \
             variant's parameter modeled with a weak gamma prior \
             (prior gamma alpha = {}, prior gamma scale = {}). \
             The expected value of the exponential distribution describing the data is the \
             inverse of the parameter, plotted below.",
            gamma.shape, gamma.scale
        ),
        ModelPriors::NumericDiscrete(gamma) => format!(
            "Discrete numeric data is modeled as a poisson distribution, with each \
             variant's parameter modeled with a weak gamma prior \
             (prior gamma alpha = {}, prior gamma scale = {}). \
             The expected value of the poisson distribution describing the data is the \
             parameter, plotted below.",
            gamma.shape, gamma.scale
        ),
    }
}
