// Copyright 2025 HelixDB Inc.
// SPDX-License-Identifier: AGPL-3.0

//! Semantic analyzer for the traversal DSL.
//!
//! [`DslCompiler`] consumes grammar events one at a time, keeps the scope stack
//! and the cross-scope [`TraversalState`], and on [`DslCompiler::finish`]
//! assembles the query text and runs the post-compile rules.

use tracing::{debug, trace, warn};

use crate::{
    config::DslConfig,
    protocol::error::DslError,
    schema::SchemaOracle,
    tdslc::{
        analyzer::{rules::RuleValidator, state::TraversalState},
        events::{DslEvent, PropertyFilter},
        generator::{
            CompiledQuery, assemble,
            scope::ScopeBuilder,
            traversal_steps::{EdgeStep, FilterStep, Step},
            utils::GeneratedValue,
        },
    },
};

pub mod rules;
pub mod state;

/// One compilation session. Owns its scope stack and traversal state, so a
/// fresh instance is needed per query; the schema oracle is only read.
pub struct DslCompiler<'a> {
    config: DslConfig,
    schema: Option<&'a dyn SchemaOracle>,
    /// Scopes in opening order. The most recently opened scope receives every
    /// emitted step, including steps emitted after it closes, which keeps the
    /// concatenated fragments in source order.
    scopes: Vec<ScopeBuilder>,
    state: TraversalState,
    /// Labels of vertices entered but not yet exited.
    open_vertices: Vec<String>,
}

impl<'a> DslCompiler<'a> {
    pub fn new(config: DslConfig, schema: Option<&'a dyn SchemaOracle>) -> Self {
        Self {
            config,
            schema,
            scopes: Vec::new(),
            state: TraversalState::new(),
            open_vertices: Vec::new(),
        }
    }

    pub fn state(&self) -> &TraversalState {
        &self.state
    }

    pub fn scopes(&self) -> &[ScopeBuilder] {
        &self.scopes
    }

    pub fn config(&self) -> &DslConfig {
        &self.config
    }

    pub fn process_all<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = DslEvent>,
    {
        for event in events {
            self.process(event);
        }
    }

    pub fn process(&mut self, event: DslEvent) {
        trace!(%event, "processing event");
        match event {
            DslEvent::QueryEnter => {
                if !self.scopes.is_empty() {
                    warn!(
                        scopes = self.scopes.len(),
                        "query-enter with scopes already open"
                    );
                }
                self.scopes.push(ScopeBuilder::new());
            }
            DslEvent::QueryExit => {
                if !self.state.output_marked() {
                    debug!("query closed without any node marked for output");
                }
            }
            DslEvent::StartEnter => {
                self.current_scope().push(Step::Start);
            }
            DslEvent::StartExit => {
                let aggregate = self.config.aggregate;
                self.current_scope().push(Step::End { aggregate });
                self.state.pop_nodes(1);
            }
            DslEvent::NestedEnter => {
                let mut scope = ScopeBuilder::new();
                scope.push(Step::StartInstance);
                self.scopes.push(scope);
            }
            DslEvent::NestedExit { count } => self.exit_nested(count),
            DslEvent::VertexEnter { label } => self.enter_vertex(label),
            DslEvent::VertexExit {
                has_store,
                filter_keys,
            } => self.exit_vertex(has_store, filter_keys),
            DslEvent::Comma => {
                self.current_scope().push(Step::Comma);
            }
            DslEvent::EdgeFilter { labels } => self.state.set_edge_label_filter(labels),
            DslEvent::PropertyFilter(filter) => self.property_filter(filter),
            DslEvent::Limit(n) => {
                self.current_scope().push(Step::Limit(n));
            }
            DslEvent::UnionEnter => {
                self.state.open_results();
                self.current_scope().push(Step::UnionOpen);
            }
            DslEvent::UnionExit { has_store } => self.exit_union(has_store),
            DslEvent::WhereEnter { negated } => {
                self.state.open_results();
                self.current_scope().push(Step::WhereOpen { negated });
            }
            DslEvent::WhereExit { negated } => {
                // where blocks never surface a result node to the parent
                if self.state.close_results().is_none() {
                    warn!("where-exit without a matching where-enter");
                }
                self.current_scope().push(Step::WhereClose { negated });
            }
        }
    }

    /// Assembles the query and runs the enabled rules.
    pub fn finish(self) -> Result<CompiledQuery, DslError> {
        if !self.state.output_marked() {
            return Err(DslError::NoOutputMarker);
        }

        let DslCompiler {
            config,
            scopes,
            state,
            ..
        } = self;

        let query = assemble(scopes).map_err(|errors| DslError::Compile { errors })?;
        debug!(query = %query, node_count = state.node_count(), "assembled query");

        RuleValidator::validate(
            &config.validation_rules,
            state.edge_log(),
            state.node_count(),
            config.max_node_count,
        )?;

        Ok(CompiledQuery {
            query,
            aggregate: config.aggregate,
            node_count: state.node_count(),
            edge_count: state.edge_log().len(),
        })
    }

    fn current_scope(&mut self) -> &mut ScopeBuilder {
        if self.scopes.is_empty() {
            warn!("event arrived before query-enter; opening a root scope");
            self.scopes.push(ScopeBuilder::new());
        }
        let top = self.scopes.len() - 1;
        &mut self.scopes[top]
    }

    fn enter_vertex(&mut self, label: String) {
        match self.state.current_node().map(str::to_string) {
            Some(from) => {
                let labels = self.state.take_edge_label_filter();
                self.check_edge(&from, &label, &labels);
                self.current_scope().push(Step::Edge(EdgeStep {
                    from: from.clone(),
                    to: label.clone(),
                    labels,
                }));
                self.state.log_edge(from, label.clone());
            }
            None => {
                if !self.state.edge_label_filter().is_empty() {
                    warn!(
                        node_type = %label,
                        labels = ?self.state.edge_label_filter(),
                        "edge label filter on a root vertex is ignored"
                    );
                }
                self.current_scope().push(Step::NodeType(label.clone()));
            }
        }
        self.state.push_node(label.clone());
        self.open_vertices.push(label);
    }

    fn exit_vertex(&mut self, has_store: bool, filter_keys: Option<Vec<String>>) {
        let label = self.open_vertices.pop();
        if label.is_none() {
            warn!("vertex-exit without a matching vertex-enter");
        }

        if self.config.validate_structure
            && let (Some(label), Some(keys)) = (&label, &filter_keys)
        {
            self.check_filter_keys(label, keys);
        }
        if has_store {
            self.current_scope().push(Step::Store);
            self.state.mark_output();
        }
        self.state.clear_edge_label_filter();
        self.state.count_node();
    }

    fn exit_nested(&mut self, count: usize) {
        // the deepest node the nested traversal reached is its result
        let result = self.state.current_node().map(str::to_string);
        let popped = self.state.pop_nodes(count);
        if popped < count {
            warn!(count, popped, "nested-exit popped fewer nodes than expected");
        }
        match result {
            Some(result) => {
                if !self.state.collect_result(result) {
                    trace!("nested statement outside a union or where block");
                }
            }
            None => warn!("nested-exit with an empty node stack"),
        }
    }

    fn exit_union(&mut self, has_store: bool) {
        match self.state.close_results() {
            Some(results) => match results.into_iter().next() {
                Some(result) => self.state.push_node(result),
                None => warn!("union closed without any branch result"),
            },
            None => warn!("union-exit without a matching union-enter"),
        }
        self.current_scope().push(Step::UnionClose);
        if has_store {
            self.current_scope().push(Step::Store);
            self.state.mark_output();
        }
    }

    fn property_filter(&mut self, filter: PropertyFilter) {
        let Some(node) = self.state.current_node().map(str::to_string) else {
            warn!(key = %filter.key, "property filter with no node in scope");
            return;
        };

        let PropertyFilter {
            key,
            negated,
            string_values,
            numeric_values,
            boolean_values,
        } = filter;

        let values = string_values
            .into_iter()
            .map(GeneratedValue::Literal)
            .chain(numeric_values.into_iter().map(GeneratedValue::Number))
            .chain(boolean_values.into_iter().map(|b| boolean_value(&b)))
            .filter(|value| value.raw() != key)
            .collect();

        let step = FilterStep {
            node,
            key,
            negated,
            values,
        };
        trace!(node = %step.node, key = %step.key, values = step.values.len(), "property filter");
        self.current_scope().push(Step::Filter(step));
    }

    fn check_edge(&mut self, from: &str, to: &str, labels: &[String]) {
        let Some(schema) = self.schema else {
            return;
        };
        let rules = schema.edge_rules(from, to);
        if rules.is_empty() {
            self.current_scope()
                .push_err(format!("no edge rule between `{from}` and `{to}`"));
            return;
        }
        for label in labels {
            if !rules.iter().any(|rule| &rule.label == label) {
                self.current_scope().push_err(format!(
                    "no edge rule between `{from}` and `{to}` with label `{label}`"
                ));
            }
        }
    }

    fn check_filter_keys(&mut self, node_type: &str, keys: &[String]) {
        let Some(schema) = self.schema else {
            warn!(node_type, "structural validation enabled without a schema");
            return;
        };
        match schema.node_properties(node_type) {
            None => self
                .current_scope()
                .push_err(format!("unknown node type `{node_type}`")),
            Some(properties) => {
                for key in keys {
                    if !properties.contains(key) {
                        self.current_scope().push_err(format!(
                            "invalid filter key `{key}` for node type `{node_type}`"
                        ));
                    }
                }
            }
        }
    }
}

fn boolean_value(raw: &str) -> GeneratedValue {
    match raw.to_lowercase().as_str() {
        "true" => GeneratedValue::Boolean(true),
        "false" => GeneratedValue::Boolean(false),
        other => GeneratedValue::Literal(other.to_string()),
    }
}
