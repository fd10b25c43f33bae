use crate::tdslc::{
    events::DslEvent,
    parser::{
        DslParser, ParserError, Rule,
        utils::{PairTools, PairsTools},
    },
};
use pest::iterators::Pair;

impl DslParser {
    pub(super) fn parse_start_statement(&mut self, pair: Pair<Rule>) -> Result<(), ParserError> {
        let mut pairs = pair.into_inner();
        self.emit(DslEvent::StartEnter);
        self.parse_vertex(pairs.try_next()?, true)?;
        for p in pairs {
            match p.as_rule() {
                Rule::traversal_step => self.parse_traversal_step(p)?,
                Rule::limit => {
                    let raw = p.try_inner_next()?.as_str();
                    let n = raw
                        .parse::<u64>()
                        .map_err(|_| ParserError::from(format!("Invalid limit `{raw}`")))?;
                    self.emit(DslEvent::Limit(n));
                }
                other => {
                    return Err(ParserError::from(format!(
                        "Unexpected rule in start statement: {other:?}"
                    )));
                }
            }
        }
        self.emit(DslEvent::StartExit);
        Ok(())
    }

    pub(super) fn parse_nested_statement(&mut self, pair: Pair<Rule>) -> Result<(), ParserError> {
        self.emit(DslEvent::NestedEnter);
        let mut steps = 0;
        for p in pair.into_inner() {
            match p.as_rule() {
                Rule::edge_filter => self.parse_edge_filter(p)?,
                Rule::vertex => self.parse_vertex(p, false)?,
                Rule::traversal_step => {
                    self.parse_traversal_step(p)?;
                    steps += 1;
                }
                other => {
                    return Err(ParserError::from(format!(
                        "Unexpected rule in nested statement: {other:?}"
                    )));
                }
            }
        }
        self.emit(DslEvent::NestedExit { count: 1 + steps });
        Ok(())
    }

    fn parse_traversal_step(&mut self, pair: Pair<Rule>) -> Result<(), ParserError> {
        for p in pair.into_inner() {
            match p.as_rule() {
                Rule::edge_filter => self.parse_edge_filter(p)?,
                Rule::vertex => self.parse_vertex(p, false)?,
                Rule::union => self.parse_union(p)?,
                other => {
                    return Err(ParserError::from(format!(
                        "Unexpected rule in traversal step: {other:?}"
                    )));
                }
            }
        }
        Ok(())
    }

    fn parse_union(&mut self, pair: Pair<Rule>) -> Result<(), ParserError> {
        self.emit(DslEvent::UnionEnter);
        let mut has_store = false;
        let mut members = 0;
        for p in pair.into_inner() {
            match p.as_rule() {
                Rule::nested_statement => {
                    if members > 0 {
                        self.emit(DslEvent::Comma);
                    }
                    self.parse_nested_statement(p)?;
                    members += 1;
                }
                Rule::store => has_store = true,
                other => {
                    return Err(ParserError::from(format!(
                        "Unexpected rule in union: {other:?}"
                    )));
                }
            }
        }
        self.emit(DslEvent::UnionExit { has_store });
        Ok(())
    }

    /// Root vertices of the start statement report their filter keys so the
    /// analyzer can check them against the schema.
    fn parse_vertex(&mut self, pair: Pair<Rule>, root: bool) -> Result<(), ParserError> {
        let mut pairs = pair.into_inner();
        let label = pairs.try_next()?.as_str().to_string();
        self.emit(DslEvent::VertexEnter { label });

        let mut has_store = false;
        let mut keys = Vec::new();
        for p in pairs {
            match p.as_rule() {
                Rule::store => has_store = true,
                Rule::filter => {
                    let filter = self.parse_filter(p)?;
                    keys.push(filter.key.clone());
                    self.emit(DslEvent::PropertyFilter(filter));
                }
                Rule::where_clause => self.parse_where_clause(p)?,
                other => {
                    return Err(ParserError::from(format!(
                        "Unexpected rule in vertex: {other:?}"
                    )));
                }
            }
        }

        self.emit(DslEvent::VertexExit {
            has_store,
            filter_keys: root.then_some(keys),
        });
        Ok(())
    }

    fn parse_where_clause(&mut self, pair: Pair<Rule>) -> Result<(), ParserError> {
        let mut negated = false;
        let mut nested = None;
        for p in pair.into_inner() {
            match p.as_rule() {
                Rule::negation => negated = true,
                Rule::nested_statement => nested = Some(p),
                other => {
                    return Err(ParserError::from(format!(
                        "Unexpected rule in where clause: {other:?}"
                    )));
                }
            }
        }
        let nested = nested.ok_or_else(|| ParserError::from("Where clause without traversal"))?;

        self.emit(DslEvent::WhereEnter { negated });
        self.parse_nested_statement(nested)?;
        self.emit(DslEvent::WhereExit { negated });
        Ok(())
    }

    fn parse_edge_filter(&mut self, pair: Pair<Rule>) -> Result<(), ParserError> {
        let labels = pair
            .into_inner()
            .map(Self::parse_string_literal)
            .collect::<Result<Vec<_>, _>>()?;
        self.emit(DslEvent::EdgeFilter { labels });
        Ok(())
    }
}
