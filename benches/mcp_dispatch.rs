//! Performance benchmarks for MCP request dispatch

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};

use highspot_mcp::mcp::{
    build_registry, McpHandler, McpRequest, Registry, RegistryHandler, SearchContext,
};
use highspot_mcp::search::{HighspotClient, SearchConfig, StaticCredentials};

fn setup_registry() -> Arc<Registry> {
    let client = HighspotClient::new(SearchConfig::default()).unwrap();
    let ctx = SearchContext::new(client, Arc::new(StaticCredentials::default()));
    Arc::new(build_registry(Arc::new(ctx)).unwrap())
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

fn bench_registry_call(c: &mut Criterion) {
    let rt = runtime();
    let registry = setup_registry();

    let mut group = c.benchmark_group("registry_call");

    let calls: Vec<(&str, &str, Value)> = vec![
        ("tool", "add", json!({"expression": "2+3+4"})),
        ("prompt", "math_addition_example_prompt", json!("2+3+4")),
        ("invalid_args", "add", json!({"expression": 7})),
        ("handler_error", "add", json!({"expression": "2++4"})),
    ];

    for (label, name, args) in calls {
        group.bench_with_input(BenchmarkId::new("case", label), &args, |b, args| {
            b.iter(|| {
                rt.block_on(registry.call(black_box(name), args.clone()))
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_handle_request(c: &mut Criterion) {
    let rt = runtime();
    let handler = RegistryHandler::new(setup_registry());

    let mut group = c.benchmark_group("handle_request");

    let requests = vec![
        ("tools_list", "tools/list", Value::Null),
        ("prompts_list", "prompts/list", Value::Null),
        (
            "tools_call",
            "tools/call",
            json!({"name": "add", "arguments": {"expression": "1+2+3+4+5"}}),
        ),
    ];

    for (label, method, params) in requests {
        let request = McpRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params,
        };
        group.bench_with_input(BenchmarkId::new("method", label), &request, |b, request| {
            b.iter(|| rt.block_on(handler.handle_request(black_box(request.clone()))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_registry_call, bench_handle_request);

criterion_main!(benches);
