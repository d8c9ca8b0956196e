//! A single inference: one conclusion derived from finitely many premises.

use std::fmt;

/// One derivation step in an inference graph.
///
/// Premises are an ordered sequence and may repeat; engines treat them as a
/// set where that matters. An inference whose conclusion appears among its
/// premises is a tautology and never participates in resolution.
pub trait Inference<C> {
    /// Diagnostic name of the rule that produced this inference.
    fn name(&self) -> &str;

    fn conclusion(&self) -> &C;

    fn premises(&self) -> &[C];
}

impl<C, I: Inference<C> + ?Sized> Inference<C> for &I {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn conclusion(&self) -> &C {
        (**self).conclusion()
    }

    fn premises(&self) -> &[C] {
        (**self).premises()
    }
}

/// Plain value implementation of [`Inference`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenericInference<C> {
    name: String,
    conclusion: C,
    premises: Vec<C>,
}

impl<C> GenericInference<C> {
    pub fn new(name: impl Into<String>, conclusion: C, premises: Vec<C>) -> Self {
        GenericInference {
            name: name.into(),
            conclusion,
            premises,
        }
    }
}

impl<C> Inference<C> for GenericInference<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn conclusion(&self) -> &C {
        &self.conclusion
    }

    fn premises(&self) -> &[C] {
        &self.premises
    }
}

impl<C: fmt::Debug> fmt::Display for GenericInference<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({:?} -| {:?})",
            self.name, self.conclusion, self.premises
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let inf = GenericInference::new("r1", "c", vec!["a", "b"]);
        assert_eq!(inf.name(), "r1");
        assert_eq!(*inf.conclusion(), "c");
        assert_eq!(inf.premises(), ["a", "b"]);
    }

    #[test]
    fn display() {
        let inf = GenericInference::new("r1", 1, vec![2]);
        assert_eq!(inf.to_string(), "r1(1 -| [2])");
    }
}
