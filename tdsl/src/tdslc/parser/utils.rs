use crate::tdslc::parser::{Rule, errors::ParserError};
use pest::iterators::{Pair, Pairs};

pub trait PairTools<'a> {
    /// Equivalent to `pair.into_inner().next()` with an error in place of `None`.
    fn try_inner_next(self) -> Result<Pair<'a, Rule>, ParserError>;
}

impl<'a> PairTools<'a> for Pair<'a, Rule> {
    fn try_inner_next(self) -> Result<Pair<'a, Rule>, ParserError> {
        let rule = self.as_rule();
        self.into_inner()
            .next()
            .ok_or_else(|| ParserError::from(format!("Expected inner rule of {rule:?}")))
    }
}

pub trait PairsTools<'a> {
    fn try_next(&mut self) -> Result<Pair<'a, Rule>, ParserError>;
}

impl<'a> PairsTools<'a> for Pairs<'a, Rule> {
    fn try_next(&mut self) -> Result<Pair<'a, Rule>, ParserError> {
        self.next()
            .ok_or_else(|| ParserError::from("Expected another rule"))
    }
}
