use crate::{
    config::DslConfig,
    protocol::error::{DslError, ErrorCategory},
    tdslc::{
        compile,
        events::{DslEvent, PropertyFilter},
        parser::{DslParser, ariadne_render},
    },
};

fn compile_default(dsl: &str) -> Result<String, DslError> {
    compile(dsl, &DslConfig::default(), None).map(|compiled| compiled.query)
}

#[test]
fn test_parse_stored_root_with_filter() {
    let events = DslParser::parse_events("pnf*('prov-status','in_service')").unwrap();
    assert_eq!(
        events,
        vec![
            DslEvent::QueryEnter,
            DslEvent::StartEnter,
            DslEvent::vertex("pnf"),
            DslEvent::PropertyFilter(
                PropertyFilter::new("prov-status").with_strings(["in_service"])
            ),
            DslEvent::root_vertex_exit(true, ["prov-status"]),
            DslEvent::StartExit,
            DslEvent::QueryExit,
        ]
    );
}

#[test]
fn test_parse_union_members_are_comma_separated() {
    let events =
        DslParser::parse_events("pnf > [ pserver*, ('tosca.relationships.HostedOn') vserver ]*")
            .unwrap();
    assert_eq!(
        events,
        vec![
            DslEvent::QueryEnter,
            DslEvent::StartEnter,
            DslEvent::vertex("pnf"),
            DslEvent::root_vertex_exit(false, Vec::<String>::new()),
            DslEvent::UnionEnter,
            DslEvent::NestedEnter,
            DslEvent::vertex("pserver"),
            DslEvent::vertex_exit(true),
            DslEvent::NestedExit { count: 1 },
            DslEvent::Comma,
            DslEvent::NestedEnter,
            DslEvent::EdgeFilter {
                labels: vec!["tosca.relationships.HostedOn".to_string()],
            },
            DslEvent::vertex("vserver"),
            DslEvent::vertex_exit(false),
            DslEvent::NestedExit { count: 1 },
            DslEvent::UnionExit { has_store: true },
            DslEvent::StartExit,
            DslEvent::QueryExit,
        ]
    );
}

#[test]
fn test_nested_exit_counts_traversal_steps() {
    let events =
        DslParser::parse_events("pnf* > [ pserver > p-interface > l-interface, vserver ]").unwrap();
    let counts = events
        .iter()
        .filter_map(|event| match event {
            DslEvent::NestedExit { count } => Some(*count),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(counts, vec![3, 1]);
}

#[test]
fn test_parse_where_clause_and_trailing_store() {
    let events = DslParser::parse_events("pserver('hostname','h1')!(> p-interface)*").unwrap();
    assert_eq!(
        events[4..],
        [
            DslEvent::WhereEnter { negated: true },
            DslEvent::NestedEnter,
            DslEvent::vertex("p-interface"),
            DslEvent::vertex_exit(false),
            DslEvent::NestedExit { count: 1 },
            DslEvent::WhereExit { negated: true },
            DslEvent::root_vertex_exit(true, ["hostname"]),
            DslEvent::StartExit,
            DslEvent::QueryExit,
        ]
    );
}

#[test]
fn test_parse_filter_value_kinds() {
    let events = DslParser::parse_events("pnf*('in-maint', TRUE)!('frequency', 5, -2.5)").unwrap();
    assert_eq!(
        events[3],
        DslEvent::PropertyFilter(PropertyFilter::new("in-maint").with_booleans(["TRUE"]))
    );
    assert_eq!(
        events[4],
        DslEvent::PropertyFilter(
            PropertyFilter::new("frequency")
                .negated()
                .with_numbers(["5", "-2.5"])
        )
    );
}

#[test]
fn test_limit_is_case_insensitive() {
    for dsl in ["pnf* LIMIT 5", "pnf* limit 5", "pnf* Limit   5"] {
        let events = DslParser::parse_events(dsl).unwrap();
        assert!(events.contains(&DslEvent::Limit(5)), "{dsl}");
    }
}

#[test]
fn test_compile_text_filters() {
    assert_eq!(
        compile_default("pnf*('in-maint', true)!('prov-status','retired')").unwrap(),
        "builder.getVerticesByProperty('aai-node-type', 'pnf')\
         .getVerticesByBooleanProperty('in-maint', true)\
         .getVerticesExcludeByProperty('prov-status', 'retired')\
         .store('x').cap('x').unfold().dedup()"
    );
    assert_eq!(
        compile_default("pnf*('frequency', 5, 7)('pnf-name')").unwrap(),
        "builder.getVerticesByProperty('aai-node-type', 'pnf')\
         .getVerticesByProperty('frequency', [5, 7])\
         .has('pnf-name')\
         .store('x').cap('x').unfold().dedup()"
    );
}

#[test]
fn test_compile_text_escapes_quotes() {
    assert_eq!(
        compile_default(r"pnf*('pnf-name', 'it\'s')").unwrap(),
        r"builder.getVerticesByProperty('aai-node-type', 'pnf').getVerticesByProperty('pnf-name', 'it\'s').store('x').cap('x').unfold().dedup()"
    );
}

#[test]
fn test_compile_text_edge_labels_and_limit() {
    assert_eq!(
        compile_default("pnf > ('a', 'b') pserver* LIMIT 3").unwrap(),
        "builder.getVerticesByProperty('aai-node-type', 'pnf')\
         .createEdgeTraversalWithLabels('pnf', 'pserver', ['a', 'b'])\
         .store('x').limit(3).cap('x').unfold().dedup()"
    );
}

#[test]
fn test_compile_text_union_store() {
    assert!(
        compile_default("pnf > [ pserver, vserver ]*")
            .unwrap()
            .ends_with("createEdgeTraversal('pnf', 'vserver')).store('x').cap('x').unfold().dedup()")
    );
    assert!(matches!(
        compile_default("pnf > [ pserver, vserver ]"),
        Err(DslError::NoOutputMarker)
    ));
}

#[test]
fn test_text_without_store_has_no_output() {
    let err = compile_default("pnf('prov-status','in_service')").unwrap_err();
    assert!(matches!(err, DslError::NoOutputMarker));
}

#[test]
fn test_syntax_errors_carry_span() {
    for dsl in ["", "pnf* >", "pnf*('unterminated)", "pnf* > [ pserver"] {
        let err = compile_default(dsl).unwrap_err();
        assert_eq!(err.code(), "PARSE_ERROR", "{dsl}");
        assert_eq!(err.category(), ErrorCategory::Malformed);
        let DslError::Parse(parse_err) = err else {
            panic!("expected a parse error for {dsl:?}");
        };
        assert!(parse_err.span().is_some());
        assert!(!ariadne_render::render(&parse_err, dsl, "<query>").is_empty());
    }
}
