use std::{sync::Arc, thread};

use crate::{
    config::DslConfig,
    schema::{EdgeKind, StaticSchema},
    tdslc::{
        DslProcessor,
        events::{DslEvent, PropertyFilter},
    },
};

fn stored_pnf() -> Vec<DslEvent> {
    vec![
        DslEvent::QueryEnter,
        DslEvent::StartEnter,
        DslEvent::vertex("pnf"),
        DslEvent::PropertyFilter(PropertyFilter::new("pnf-name").with_strings(["pnf-1"])),
        DslEvent::root_vertex_exit(true, ["pnf-name"]),
        DslEvent::vertex("pserver"),
        DslEvent::vertex_exit(false),
        DslEvent::StartExit,
        DslEvent::QueryExit,
    ]
}

#[test]
fn test_processor_is_shareable_across_threads() {
    let schema = StaticSchema::new()
        .with_node("pnf", ["pnf-name"])
        .with_node("pserver", ["hostname"])
        .with_edge("pnf", "pserver", "tosca.relationships.HostedOn", EdgeKind::Tree);
    let processor = DslProcessor::new(DslConfig::default().with_structure_validation(true))
        .with_schema(Arc::new(schema));

    let expected = processor.compile_events(stored_pnf()).unwrap();
    thread::scope(|s| {
        let handles = (0..8)
            .map(|_| s.spawn(|| processor.compile_events(stored_pnf()).unwrap()))
            .collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_processor_sessions_are_independent() {
    let processor = DslProcessor::default();
    let mut missing_store = stored_pnf();
    missing_store[4] = DslEvent::root_vertex_exit(false, ["pnf-name"]);

    assert!(processor.compile_events(missing_store).is_err());
    let compiled = processor.compile_events(stored_pnf()).unwrap();
    assert_eq!(compiled.node_count, 2);
    assert_eq!(compiled.edge_count, 1);
}

#[test]
fn test_processor_uses_its_config() {
    let processor = DslProcessor::new(DslConfig::default().with_max_node_count(1));
    assert_eq!(processor.config().max_node_count, 1);
    let err = processor.compile_events(stored_pnf()).unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
}

#[cfg(feature = "parser")]
#[test]
fn test_processor_compiles_text() {
    let processor = DslProcessor::default();
    let compiled = processor.compile("pnf*('pnf-name','pnf-1') > pserver").unwrap();
    assert_eq!(
        compiled.query,
        "builder.getVerticesByProperty('aai-node-type', 'pnf')\
         .getVerticesByProperty('pnf-name', 'pnf-1')\
         .store('x')\
         .createEdgeTraversal('pnf', 'pserver')\
         .cap('x').unfold().dedup()"
    );
    assert_eq!(
        sonic_rs::to_string(&compiled).unwrap(),
        format!(
            r#"{{"query":"{}","aggregate":false,"node_count":2,"edge_count":1}}"#,
            compiled.query
        )
    );
}
