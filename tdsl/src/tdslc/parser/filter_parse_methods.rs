use crate::tdslc::{
    events::PropertyFilter,
    parser::{DslParser, ParserError, Rule, utils::PairTools},
};
use pest::iterators::Pair;

impl DslParser {
    /// `!('key', 'a', 1, true)`: the first literal is the key, the rest are
    /// sorted into string, numeric and boolean values in source order.
    pub(super) fn parse_filter(&self, pair: Pair<Rule>) -> Result<PropertyFilter, ParserError> {
        let mut negated = false;
        let mut key = None;
        let mut filter = PropertyFilter::default();

        for p in pair.into_inner() {
            match p.as_rule() {
                Rule::negation => negated = true,
                Rule::string_literal if key.is_none() => {
                    key = Some(Self::parse_string_literal(p)?);
                }
                Rule::string_literal => filter.string_values.push(Self::parse_string_literal(p)?),
                Rule::number => filter.numeric_values.push(p.as_str().to_string()),
                Rule::boolean => filter.boolean_values.push(p.as_str().to_string()),
                other => {
                    return Err(ParserError::from(format!(
                        "Unexpected rule in filter: {other:?}"
                    )));
                }
            }
        }

        filter.key = key.ok_or_else(|| ParserError::from("Filter without a key"))?;
        filter.negated = negated;
        Ok(filter)
    }

    pub(super) fn parse_string_literal(pair: Pair<Rule>) -> Result<String, ParserError> {
        let inner = pair.try_inner_next()?;
        Ok(unescape(inner.as_str()))
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::unescape;

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"it\'s"), "it's");
        assert_eq!(unescape(r"a\\b"), r"a\b");
        assert_eq!(unescape("plain"), "plain");
    }
}
