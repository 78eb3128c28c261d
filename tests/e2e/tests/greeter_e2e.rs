//! Full batch round trip through a live server

use codec::{decode_state_value, unwrap, wrap};
use function_e2e_tests::{caller_address, greeter_request, TestServer};
use function_server::greeter::{Counter, Greeting};
use function_server::Greeter;
use functions::FunctionRegistry;
use types::{EgressIdentifier, MutationType};

fn greeter_registry() -> FunctionRegistry {
    let mut registry = FunctionRegistry::new();
    registry.register(Greeter::function_type(), Greeter::default());
    registry
}

fn hello() -> types::TypedValue {
    wrap(Some(&Greeting {
        greeting: "Hello".to_string(),
    }))
    .unwrap()
    .unwrap()
}

#[tokio::test]
async fn test_greeter_batch_produces_expected_effects() {
    let server = TestServer::start(greeter_registry()).await.unwrap();

    let reply = server.invoke(&greeter_request().unwrap()).await.unwrap();
    let response = reply.invocation_result();

    // read-only-state was declared and read but never written
    assert_eq!(response.state_mutations.len(), 2);
    assert!(response
        .state_mutations
        .iter()
        .all(|m| m.state_name != "read-only-state"));

    let modified = response
        .state_mutations
        .iter()
        .find(|m| m.state_name == "modified-state")
        .expect("modified-state mutation");
    assert_eq!(modified.mutation_type, MutationType::Modify);
    let mut counter = Counter::default();
    unwrap(&decode_state_value(&modified.state_value).unwrap(), Some(&mut counter)).unwrap();
    assert_eq!(counter.count, 2);

    let deleted = response
        .state_mutations
        .iter()
        .find(|m| m.state_name == "deleted-state")
        .expect("deleted-state mutation");
    assert_eq!(deleted.mutation_type, MutationType::Delete);
    assert!(deleted.state_value.is_empty());

    assert_eq!(response.outgoing_messages.len(), 1);
    assert_eq!(response.outgoing_messages[0].target, caller_address());
    assert_eq!(response.outgoing_messages[0].argument, hello());

    assert_eq!(response.delayed_invocations.len(), 1);
    assert_eq!(response.delayed_invocations[0].target, caller_address());
    assert_eq!(response.delayed_invocations[0].delay_in_ms, 60_000);
    assert_eq!(response.delayed_invocations[0].argument, hello());

    assert_eq!(response.outgoing_egresses.len(), 1);
    assert_eq!(
        response.outgoing_egresses[0].egress(),
        EgressIdentifier::new("test", "egress")
    );
    assert_eq!(response.outgoing_egresses[0].argument, hello());
}

#[tokio::test]
async fn test_batches_do_not_share_state() {
    let server = TestServer::start(greeter_registry()).await.unwrap();

    let first = server.invoke(&greeter_request().unwrap()).await.unwrap();
    let second = server.invoke(&greeter_request().unwrap()).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unregistered_function_fails_batch() {
    let server = TestServer::start(FunctionRegistry::new()).await.unwrap();

    let err = server.invoke(&greeter_request().unwrap()).await.unwrap_err();

    assert!(err.to_string().contains("500"));
}
